//! HTTP-level tests for the public tool listing and detail endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_tool, create_user, get, tool_draft};
use serde_json::json;
use sqlx::PgPool;
use tooldir_db::repositories::{CategoryRepo, TagRepo, VoteRepo};

fn names(items: &serde_json::Value) -> Vec<&str> {
    items
        .as_array()
        .expect("expected an array")
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect()
}

/// Alpha (writing, Freemium, featured) and Beta (no relations, Paid).
async fn seed_alpha_beta(pool: &PgPool) -> (i64, i64) {
    let writing = CategoryRepo::create(pool, "writing", "Writing", None)
        .await
        .unwrap();
    let gpt = TagRepo::create(pool, "gpt", "GPT", "tool").await.unwrap();

    let mut alpha = tool_draft("alpha", "Alpha");
    alpha.category_ids = vec![writing.id];
    alpha.tag_ids = vec![gpt.id];
    alpha.pricing_model = Some("Freemium, Enterprise".to_string());
    alpha.is_featured = true;
    let alpha = create_tool(pool, &alpha).await;

    let mut beta = tool_draft("beta", "Beta");
    beta.pricing_model = Some("Paid".to_string());
    let beta = create_tool(pool, &beta).await;

    (alpha.id, beta.id)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_tools_without_filters(pool: PgPool) {
    seed_alpha_beta(&pool).await;
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/tools").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 2);
    // Newest first.
    assert_eq!(names(&json["data"]["items"]), vec!["Beta", "Alpha"]);
    assert_eq!(json["data"]["items"][0]["votes"], json!({ "up": 0, "down": 0 }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_filter(pool: PgPool) {
    seed_alpha_beta(&pool).await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/v1/tools?categories=writing").await).await;

    assert_eq!(names(&json["data"]["items"]), vec!["Alpha"]);
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["categories"][0]["slug"], "writing");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pricing_filter_matches_token_substring(pool: PgPool) {
    seed_alpha_beta(&pool).await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app.clone(), "/api/v1/tools?pricing=free").await).await;
    assert_eq!(names(&json["data"]["items"]), vec!["Alpha"]);

    let json = body_json(get(app, "/api/v1/tools/count?pricing=paid,enterprise").await).await;
    assert_eq!(json["data"]["count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pagination_keeps_total(pool: PgPool) {
    seed_alpha_beta(&pool).await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/v1/tools?page=2&limit=1").await).await;

    assert_eq!(names(&json["data"]["items"]), vec!["Alpha"]);
    assert_eq!(json["data"]["total"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_feature_flag_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/tools?flags=sponsored").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_includes_vote_counts(pool: PgPool) {
    let (alpha, _) = seed_alpha_beta(&pool).await;
    let (voter, _) = create_user(&pool, "voter@example.com", "member").await;
    let (other, _) = create_user(&pool, "other@example.com", "member").await;
    VoteRepo::create(&pool, alpha, voter.id, "like").await.unwrap();
    VoteRepo::create(&pool, alpha, other.id, "maybe").await.unwrap();
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/v1/tools?search=alp").await).await;

    assert_eq!(names(&json["data"]["items"]), vec!["Alpha"]);
    assert_eq!(json["data"]["items"][0]["votes"], json!({ "up": 1, "down": 0 }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_featured_and_newest(pool: PgPool) {
    seed_alpha_beta(&pool).await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app.clone(), "/api/v1/tools/featured").await).await;
    assert_eq!(names(&json["data"]), vec!["Alpha"]);

    let json = body_json(get(app, "/api/v1/tools/newest?limit=1").await).await;
    assert_eq!(names(&json["data"]), vec!["Beta"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filter_options_exclude_news_tags(pool: PgPool) {
    seed_alpha_beta(&pool).await;
    TagRepo::create(&pool, "release", "Release", "news").await.unwrap();
    TagRepo::create(&pool, "ai", "AI", "both").await.unwrap();
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/v1/tools/filters").await).await;

    assert_eq!(json["data"]["categories"][0]["slug"], "writing");
    let mut tags: Vec<&str> = json["data"]["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["slug"].as_str().unwrap())
        .collect();
    tags.sort_unstable();
    assert_eq!(tags, vec!["ai", "gpt"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tool_detail(pool: PgPool) {
    let gpt = TagRepo::create(&pool, "gpt", "GPT", "tool").await.unwrap();
    let mut draft = tool_draft("alpha", "Alpha");
    draft.tag_ids = vec![gpt.id];
    draft.data_types = Some(json!(["Email", "Usage data"]));
    draft.security_measures = Some(json!({ "encryption_at_rest": true }));
    draft.sources = Some(json!({
        "status_page": "https://status.example.com",
        "privacy_policy": "https://example.com/privacy"
    }));
    draft.social_proof = Some(json!({ "users": 12500 }));
    create_tool(&pool, &draft).await;

    let mut sibling = tool_draft("sibling", "Sibling");
    sibling.tag_ids = vec![gpt.id];
    create_tool(&pool, &sibling).await;
    create_tool(&pool, &tool_draft("unrelated", "Unrelated")).await;
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/tools/alpha").await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["tool"]["slug"], "alpha");
    assert_eq!(data["votes"], json!({ "up": 0, "down": 0 }));
    assert_eq!(data["compliance"]["avv_dpa"], "Unclear");
    assert_eq!(data["compliance"]["risk_level"], "Medium");
    assert_eq!(data["ratings"], json!({ "overall": null, "gdpr": null }));
    assert_eq!(
        data["data_types"],
        json!([
            { "key": "Entry 1", "value": "Email" },
            { "key": "Entry 2", "value": "Usage data" }
        ])
    );
    assert_eq!(
        data["security_measures"],
        json!([{ "key": "Encryption at rest", "value": "Yes" }])
    );
    assert_eq!(data["sources"][0]["label"], "Privacy policy");
    assert_eq!(data["sources"][1]["label"], "Status page");
    assert_eq!(data["social_proof"], "12,500+ users");

    let mut similar = names(&data["similar"]);
    similar.sort_unstable();
    assert_eq!(similar, vec!["Alpha", "Sibling"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tool_detail_compliance_and_rating_fallbacks(pool: PgPool) {
    let mut draft = tool_draft("alpha", "Alpha");
    draft.avv_dpa_statuses = vec!["yes".into(), "no".into()];
    draft.hosting_regions = vec!["eu".into(), "usa".into()];
    draft.rating_overall = Some(4.2);
    draft.gdpr_score = Some(8.0);
    draft.rating_gdpr = Some(6.5);
    create_tool(&pool, &draft).await;
    let app = common::build_test_app(pool);

    let data = body_json(get(app, "/api/v1/tools/alpha").await).await["data"].clone();

    assert_eq!(data["compliance"]["avv_dpa"], "Yes");
    assert_eq!(data["compliance"]["hosting_region"], "Eu, Usa");
    assert_eq!(data["ratings"], json!({ "overall": 4.2, "gdpr": 8.0 }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_tool_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/tools/ghost").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_page_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/tools?page=abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}
