//! Handler for newsletter signup.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tooldir_core::newsletter::{NewsletterSignup, SubscribeOutcome};
use tooldir_db::repositories::NewsletterRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub status: SubscribeOutcome,
    pub message: &'static str,
}

/// POST /api/v1/newsletter
///
/// Subscribing an address twice is a success with an "already subscribed"
/// message.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(input): Json<NewsletterSignup>,
) -> AppResult<impl IntoResponse> {
    let subscription = input.into_subscription()?;
    let outcome = NewsletterRepo::subscribe(&state.pool, &subscription).await?;

    tracing::info!(
        status = ?outcome,
        consent = subscription.consent,
        "Newsletter signup"
    );

    Ok(Json(DataResponse {
        data: SubscribeResponse {
            status: outcome,
            message: outcome.message(),
        },
    }))
}
