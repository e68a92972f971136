//! Handlers for the public `/news` resource.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use tooldir_core::error::CoreError;

use crate::error::AppResult;
use crate::query::{query_params, NewsListParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/news
///
/// Latest news, optionally narrowed to items carrying any of `tags`.
pub async fn list_news(
    State(state): State<AppState>,
    query: Result<Query<NewsListParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let params = query_params(query)?;
    let news = state
        .directory
        .news_list(&params.tag_slugs(), params.limit)
        .await;
    Ok(Json(DataResponse { data: news }))
}

/// GET /api/v1/news/tags
pub async fn news_tags(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tags = state.directory.news_tags().await;
    Ok(Json(DataResponse { data: tags }))
}

/// GET /api/v1/news/{slug}
pub async fn get_news(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let item = state
        .directory
        .news_by_slug(&slug)
        .await
        .ok_or_else(|| CoreError::not_found("News", &slug))?;
    Ok(Json(DataResponse { data: item }))
}
