//! HTTP-level tests for the admin endpoints: RBAC, dashboard and creation.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_tool, create_user, get, get_auth, post_json_auth, tool_draft};
use serde_json::json;
use sqlx::PgPool;
use tooldir_db::repositories::{CategoryRepo, NewsRepo, TagRepo, ToolRepo};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_routes_require_admin_role(pool: PgPool) {
    let (_, member) = create_user(&pool, "member@example.com", "member").await;
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/admin/dashboard").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app.clone(), "/api/v1/admin/dashboard", &member).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response =
        post_json_auth(app, "/api/v1/admin/tools", json!({ "slug": "x" }), &member).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_counts_and_recent(pool: PgPool) {
    let (_, admin) = create_user(&pool, "admin@example.com", "admin").await;
    create_tool(&pool, &tool_draft("alpha", "Alpha")).await;
    create_tool(&pool, &tool_draft("beta", "Beta")).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/dashboard", &admin).await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(
        data["counts"],
        json!({ "tools": 2, "news": 0, "users": 1, "bookmarks": 0, "clicks": 0 })
    );
    assert_eq!(data["recent_tools"][0]["slug"], "beta");
    assert!(data["recent_clicks"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_form_options_list_all_scopes(pool: PgPool) {
    let (_, admin) = create_user(&pool, "admin@example.com", "admin").await;
    CategoryRepo::create(&pool, "writing", "Writing", None).await.unwrap();
    TagRepo::create(&pool, "gpt", "GPT", "tool").await.unwrap();
    TagRepo::create(&pool, "release", "Release", "news").await.unwrap();
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, "/api/v1/admin/form-options", &admin).await).await;

    assert_eq!(json["data"]["categories"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["tags"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_tool_from_form_fields(pool: PgPool) {
    let (_, admin) = create_user(&pool, "admin@example.com", "admin").await;
    let writing = CategoryRepo::create(&pool, "writing", "Writing", None).await.unwrap();
    let app = common::build_test_app(pool.clone());

    let form = json!({
        "slug": " alpha ",
        "name": "Alpha",
        "logo_url": "https://cdn.example.com/logo.png",
        "thumbnail_url": "https://cdn.example.com/thumb.png",
        "pricing_model": "Freemium",
        "gdpr_score": "4,5",
        "hosting_region": "EU",
        "risk_level": "",
        "is_featured": "on",
        "data_types": "Email\nUsage: anonymised",
        "sources_privacy": "https://example.com/privacy",
        "sources_custom_label": "Status Page",
        "sources_custom_url": "https://status.example.com",
        "category_ids": [writing.id]
    });
    let response = post_json_auth(app, "/api/v1/admin/tools", form, &admin).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["slug"], "alpha");
    assert_eq!(data["gdpr_score"], 4.5);
    assert_eq!(data["hosting_region"], "eu");
    assert_eq!(data["risk_level"], "medium");
    assert_eq!(data["avv_dpa"], "unknown");
    assert_eq!(data["is_featured"], true);
    assert_eq!(data["categories"][0]["slug"], "writing");
    assert_eq!(
        data["sources"],
        json!({
            "privacy_policy": "https://example.com/privacy",
            "status_page": "https://status.example.com"
        })
    );

    let stored = ToolRepo::find_by_slug(&pool, "alpha").await.unwrap();
    assert!(stored.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_tool_reports_field_errors(pool: PgPool) {
    let (_, admin) = create_user(&pool, "admin@example.com", "admin").await;
    let app = common::build_test_app(pool.clone());

    let form = json!({
        "name": "Alpha",
        "logo_url": "not a url",
        "thumbnail_url": "https://cdn.example.com/thumb.png",
        "hosting_region": "mars"
    });
    let response = post_json_auth(app, "/api/v1/admin/tools", form, &admin).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = json["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"slug"));
    assert!(fields.contains(&"logo_url"));
    assert!(fields.contains(&"hosting_region"));
    assert_eq!(ToolRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_slug_is_conflict(pool: PgPool) {
    let (_, admin) = create_user(&pool, "admin@example.com", "admin").await;
    create_tool(&pool, &tool_draft("alpha", "Alpha")).await;
    let app = common::build_test_app(pool);

    let form = json!({
        "slug": "alpha",
        "name": "Alpha again",
        "logo_url": "https://cdn.example.com/logo.png",
        "thumbnail_url": "https://cdn.example.com/thumb.png"
    });
    let response = post_json_auth(app, "/api/v1/admin/tools", form, &admin).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_news(pool: PgPool) {
    let (_, admin) = create_user(&pool, "admin@example.com", "admin").await;
    let release = TagRepo::create(&pool, "release", "Release", "news").await.unwrap();
    let app = common::build_test_app(pool);

    let form = json!({
        "slug": "launch",
        "title": "Launch",
        "excerpt": "Short version",
        "published_at": "2024-03-01",
        "source_url": "https://example.com/launch",
        "tag_ids": [release.id]
    });
    let response = post_json_auth(app.clone(), "/api/v1/admin/news", form, &admin).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["content"], "Short version");
    assert_eq!(data["sources"], json!({ "primary": "https://example.com/launch" }));
    assert!(data["published_at"].as_str().unwrap().starts_with("2024-03-01"));

    let detail = body_json(get(app, "/api/v1/news/launch").await).await;
    assert_eq!(detail["data"]["tags"][0]["slug"], "release");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_tool_with_unknown_links_is_rejected(pool: PgPool) {
    let (_, admin) = create_user(&pool, "admin@example.com", "admin").await;
    let writing = CategoryRepo::create(&pool, "writing", "Writing", None).await.unwrap();
    let app = common::build_test_app(pool.clone());

    let form = json!({
        "slug": "alpha",
        "name": "Alpha",
        "logo_url": "https://cdn.example.com/logo.png",
        "thumbnail_url": "https://cdn.example.com/thumb.png",
        "category_ids": [writing.id, 999999],
        "tag_ids": [888888]
    });
    let response = post_json_auth(app, "/api/v1/admin/tools", form, &admin).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"][0]["field"], "category_ids");
    assert_eq!(json["fields"][0]["message"], "Unknown id(s): 999999");
    assert_eq!(json["fields"][1]["field"], "tag_ids");
    assert_eq!(ToolRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_news_with_unknown_tag_is_rejected(pool: PgPool) {
    let (_, admin) = create_user(&pool, "admin@example.com", "admin").await;
    let app = common::build_test_app(pool.clone());

    let form = json!({
        "slug": "launch",
        "title": "Launch",
        "source_url": "https://example.com/launch",
        "tag_ids": [424242]
    });
    let response = post_json_auth(app, "/api/v1/admin/news", form, &admin).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"][0]["field"], "tag_ids");
    assert_eq!(NewsRepo::count(&pool).await.unwrap(), 0);
}
