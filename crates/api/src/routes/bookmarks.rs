//! Route definitions for `/bookmarks`. All routes require auth.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::bookmarks;
use crate::state::AppState;

/// Routes mounted at `/bookmarks`.
///
/// ```text
/// GET    /              -> list_bookmarks
/// POST   /toggle        -> toggle_bookmark
/// PUT    /{id}/note     -> update_note
/// DELETE /{id}          -> delete_bookmark
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bookmarks::list_bookmarks))
        .route("/toggle", post(bookmarks::toggle_bookmark))
        .route("/{id}/note", put(bookmarks::update_note))
        .route("/{id}", delete(bookmarks::delete_bookmark))
}
