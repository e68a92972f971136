//! Route definitions for the public `/tools` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::tools;
use crate::state::AppState;

/// Routes mounted at `/tools`.
///
/// ```text
/// GET /             -> list_tools
/// GET /count        -> count_tools
/// GET /featured     -> featured_tools
/// GET /newest       -> newest_tools
/// GET /filters      -> filter_options
/// GET /{slug}       -> get_tool
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tools::list_tools))
        .route("/count", get(tools::count_tools))
        .route("/featured", get(tools::featured_tools))
        .route("/newest", get(tools::newest_tools))
        .route("/filters", get(tools::filter_options))
        .route("/{slug}", get(tools::get_tool))
}
