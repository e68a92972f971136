//! Newsletter subscription model.

use serde::Serialize;
use sqlx::FromRow;
use tooldir_core::types::{DbId, Timestamp};

/// A row from the `newsletter_subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsletterSubscription {
    pub id: DbId,
    pub email: String,
    pub consent: bool,
    pub created_at: Timestamp,
}
