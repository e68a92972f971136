use axum::routing::get;
use axum::Router;

use crate::handlers::news;
use crate::state::AppState;

/// Routes mounted at `/news`.
///
/// ```text
/// GET /          -> list_news
/// GET /tags      -> news_tags
/// GET /{slug}    -> get_news
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(news::list_news))
        .route("/tags", get(news::news_tags))
        .route("/{slug}", get(news::get_news))
}
