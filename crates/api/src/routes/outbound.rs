//! Root-level affiliate redirect.

use axum::routing::get;
use axum::Router;

use crate::handlers::outbound;
use crate::state::AppState;

/// ```text
/// GET /out/{slug}   -> redirect (optional auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/out/{slug}", get(outbound::redirect))
}
