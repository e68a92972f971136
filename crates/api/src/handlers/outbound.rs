//! Affiliate redirect with click tracking.
//!
//! This endpoint never fails: unknown slugs, blank affiliate URLs and
//! backend errors all end in a redirect to the site root.

use axum::extract::{Path, State};
use axum::http::header::{LOCATION, REFERER, USER_AGENT};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use tooldir_core::outbound::{resolve_target, RedirectTarget};
use tooldir_db::models::click_event::CreateClickEvent;
use tooldir_db::repositories::{ClickEventRepo, ToolRepo};

use crate::middleware::auth::OptionalAuthUser;
use crate::state::AppState;

fn header_value(headers: &HeaderMap, name: axum::http::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// GET /out/{slug}
///
/// `302` to the tool's affiliate URL after recording a click event, or to
/// `/` when there is nothing to redirect to.
pub async fn redirect(
    OptionalAuthUser(user): OptionalAuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    let row = match ToolRepo::find_redirect(&state.pool, &slug).await {
        Ok(row) => row,
        Err(e) => {
            tracing::error!(slug = %slug, error = %e, "Failed to look up redirect target");
            None
        }
    };
    let Some(row) = row else {
        return found(RedirectTarget::SiteRoot.location());
    };

    let target = resolve_target(row.affiliate_url.as_deref());
    if !target.is_affiliate() {
        return found(target.location());
    }

    let click = CreateClickEvent {
        tool_id: row.id,
        user_id: user.map(|u| u.user_id),
        referrer: header_value(&headers, REFERER),
        user_agent: header_value(&headers, USER_AGENT),
    };
    if let Err(e) = ClickEventRepo::create(&state.pool, &click).await {
        tracing::warn!(tool_id = row.id, error = %e, "Failed to record click event");
    }

    found(target.location())
}
