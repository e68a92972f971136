//! Admin-only handlers: dashboard, form options and content creation.
//!
//! Unlike the public read paths, the create endpoints propagate backend
//! errors so the admin sees a failed write (409 for a taken slug).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tooldir_core::admin_form::{unknown_ids_error, NewsForm, ToolForm};
use tooldir_core::error::CoreError;
use tooldir_core::types::DbId;
use tooldir_db::repositories::{CategoryRepo, NewsRepo, TagRepo, ToolRepo};
use tooldir_db::DbPool;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/dashboard
pub async fn dashboard(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let dashboard = state.directory.dashboard().await;
    Ok(Json(DataResponse { data: dashboard }))
}

/// GET /api/v1/admin/form-options
///
/// Every category and tag, regardless of scope.
pub async fn form_options(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let options = state.directory.form_options().await;
    Ok(Json(DataResponse { data: options }))
}

/// POST /api/v1/admin/tools
pub async fn create_tool(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<ToolForm>,
) -> AppResult<impl IntoResponse> {
    let draft = form.into_draft()?;
    ensure_links_exist(&state.pool, &draft.category_ids, &draft.tag_ids).await?;
    let tool = ToolRepo::create(&state.pool, &draft).await?;

    tracing::info!(
        tool_id = tool.id,
        slug = %tool.slug,
        user_id = admin.user_id,
        "Tool created"
    );

    let view = state
        .directory
        .hydrate_tools(vec![tool])
        .await
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::Internal("Created tool vanished during hydration".into()))?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// POST /api/v1/admin/news
pub async fn create_news(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<NewsForm>,
) -> AppResult<impl IntoResponse> {
    let draft = form.into_draft()?;
    ensure_links_exist(&state.pool, &[], &draft.tag_ids).await?;
    let news = NewsRepo::create(&state.pool, &draft).await?;

    tracing::info!(
        news_id = news.id,
        slug = %news.slug,
        user_id = admin.user_id,
        "News created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: news })))
}

/// Reject category/tag ids that name no row before anything is written.
async fn ensure_links_exist(
    pool: &DbPool,
    category_ids: &[DbId],
    tag_ids: &[DbId],
) -> AppResult<()> {
    let mut errors = Vec::new();

    if !category_ids.is_empty() {
        let found = CategoryRepo::find_by_ids(pool, category_ids).await?;
        errors.extend(unknown_ids_error(
            "category_ids",
            category_ids,
            found.iter().map(|category| category.id),
        ));
    }
    if !tag_ids.is_empty() {
        let found = TagRepo::find_by_ids(pool, tag_ids).await?;
        errors.extend(unknown_ids_error(
            "tag_ids",
            tag_ids,
            found.iter().map(|tag| tag.id),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::InvalidFields(errors).into())
    }
}
