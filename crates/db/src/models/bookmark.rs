//! Bookmark models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tooldir_core::types::{DbId, Timestamp};

use crate::models::tool::ToolView;

/// A row from the `bookmarks` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Bookmark {
    pub id: DbId,
    pub user_id: DbId,
    pub tool_id: DbId,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// A bookmark with its tool hydrated. `tool` is absent when the tool could
/// not be loaded.
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkWithTool {
    #[serde(flatten)]
    pub bookmark: Bookmark,
    pub tool: Option<ToolView>,
}

/// Body of `POST /bookmarks/toggle`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleBookmark {
    pub tool_id: DbId,
}

/// Body of `PUT /bookmarks/{id}/note`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBookmarkNote {
    pub notes: Option<String>,
}

/// Whether the tool is bookmarked after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleResult {
    pub tool_id: DbId,
    pub bookmarked: bool,
}
