pub mod admin;
pub mod auth;
pub mod bookmarks;
pub mod health;
pub mod news;
pub mod outbound;
pub mod tools;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                   login (public)
/// /auth/me                      current user (auth)
///
/// /tools                        list with votes + total (public)
/// /tools/count                  count under the same filters
/// /tools/featured               featured strip
/// /tools/newest                 newest tools (?limit=)
/// /tools/filters                categories + tool-scoped tags
/// /tools/{slug}                 detail with votes and similar tools
///
/// /news                         list (?tags=&limit=)
/// /news/tags                    news-scoped tags
/// /news/{slug}                  detail
///
/// /bookmarks                    own bookmarks (auth)
/// /bookmarks/toggle             add or remove (auth)
/// /bookmarks/{id}/note          update note (auth)
/// /bookmarks/{id}               delete (auth)
///
/// /newsletter                   subscribe (public)
///
/// /admin/dashboard              counts + recent activity (admin)
/// /admin/form-options           all categories + tags (admin)
/// /admin/tools                  create tool (admin)
/// /admin/news                   create news (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/tools", tools::router())
        .nest("/news", news::router())
        .nest("/bookmarks", bookmarks::router())
        .route("/newsletter", post(handlers::newsletter::subscribe))
        .nest("/admin", admin::router())
}
