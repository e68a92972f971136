//! Handlers for the signed-in user's `/bookmarks`.
//!
//! Every query is scoped to the caller's user id, so one user can never see
//! or modify another user's bookmarks; such ids simply read as not found.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tooldir_core::error::CoreError;
use tooldir_core::types::DbId;
use tooldir_db::models::bookmark::{ToggleBookmark, ToggleResult, UpdateBookmarkNote};
use tooldir_db::repositories::{BookmarkRepo, ToolRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/bookmarks
///
/// The caller's bookmarks, newest first, each with its hydrated tool.
pub async fn list_bookmarks(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let bookmarks = state.directory.bookmarks_for_user(auth.user_id).await;
    Ok(Json(DataResponse { data: bookmarks }))
}

/// POST /api/v1/bookmarks/toggle
///
/// Remove the bookmark if present, create it otherwise.
pub async fn toggle_bookmark(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ToggleBookmark>,
) -> AppResult<impl IntoResponse> {
    let exists = !ToolRepo::find_by_ids(&state.pool, &[input.tool_id])
        .await?
        .is_empty();
    if !exists {
        return Err(AppError::Core(CoreError::not_found("Tool", input.tool_id)));
    }

    let bookmarked = BookmarkRepo::toggle(&state.pool, auth.user_id, input.tool_id).await?;

    if bookmarked {
        tracing::info!(tool_id = input.tool_id, user_id = auth.user_id, "Bookmark added");
    } else {
        tracing::info!(tool_id = input.tool_id, user_id = auth.user_id, "Bookmark removed");
    }

    Ok(Json(DataResponse {
        data: ToggleResult {
            tool_id: input.tool_id,
            bookmarked,
        },
    }))
}

/// PUT /api/v1/bookmarks/{id}/note
///
/// Replace the note. A blank note clears it.
pub async fn update_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(bookmark_id): Path<DbId>,
    Json(input): Json<UpdateBookmarkNote>,
) -> AppResult<impl IntoResponse> {
    let notes = input
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let bookmark = BookmarkRepo::update_note(&state.pool, bookmark_id, auth.user_id, notes)
        .await?
        .ok_or_else(|| CoreError::not_found("Bookmark", bookmark_id))?;

    tracing::info!(bookmark_id, user_id = auth.user_id, "Bookmark note updated");

    Ok(Json(DataResponse { data: bookmark }))
}

/// DELETE /api/v1/bookmarks/{id}
pub async fn delete_bookmark(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(bookmark_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = BookmarkRepo::delete(&state.pool, bookmark_id, auth.user_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Bookmark", bookmark_id)));
    }

    tracing::info!(bookmark_id, user_id = auth.user_id, "Bookmark deleted");

    Ok(StatusCode::NO_CONTENT)
}
