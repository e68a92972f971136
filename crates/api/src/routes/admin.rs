//! Route definitions for `/admin`. All routes require the admin role.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /dashboard      -> dashboard
/// GET  /form-options   -> form_options
/// POST /tools          -> create_tool
/// POST /news           -> create_news
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/form-options", get(admin::form_options))
        .route("/tools", post(admin::create_tool))
        .route("/news", post(admin::create_news))
}
