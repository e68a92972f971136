//! Category lookup model.

use serde::Serialize;
use sqlx::FromRow;
use tooldir_core::relations::RelatedEntity;
use tooldir_core::types::DbId;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
}

impl RelatedEntity for Category {
    fn entity_id(&self) -> DbId {
        self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}
