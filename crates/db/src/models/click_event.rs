//! Affiliate click event models.

use serde::Serialize;
use sqlx::FromRow;
use tooldir_core::types::{DbId, Timestamp};

/// A row from the append-only `click_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClickEvent {
    pub id: DbId,
    pub tool_id: DbId,
    pub user_id: Option<DbId>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// Insert DTO for a click on `/out/{slug}`.
#[derive(Debug, Clone, Default)]
pub struct CreateClickEvent {
    pub tool_id: DbId,
    pub user_id: Option<DbId>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}

/// A recent click joined with its tool's name for the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentClick {
    pub id: DbId,
    pub tool_id: DbId,
    pub tool_name: String,
    pub tool_slug: String,
    pub referrer: Option<String>,
    pub created_at: Timestamp,
}
