//! News models.

use serde::Serialize;
use sqlx::FromRow;
use tooldir_core::types::{DbId, Timestamp};

use crate::models::tag::Tag;

/// A row from the `news` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct News {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub published_at: Timestamp,
    pub sources: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl News {
    /// The `primary` entry of `sources`, if any.
    pub fn source_url(&self) -> Option<&str> {
        self.sources
            .as_ref()
            .and_then(|sources| sources.get("primary"))
            .and_then(serde_json::Value::as_str)
    }
}

/// A news item with its tags attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsView {
    #[serde(flatten)]
    pub news: News,
    pub source_url: Option<String>,
    pub tags: Vec<Tag>,
}

impl NewsView {
    pub fn new(news: News, tags: Vec<Tag>) -> Self {
        Self {
            source_url: news.source_url().map(String::from),
            news,
            tags,
        }
    }
}

/// Lightweight news reference for admin listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsSummary {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub published_at: Timestamp,
}
