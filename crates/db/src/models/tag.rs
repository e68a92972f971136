//! Tag lookup model.

use serde::Serialize;
use sqlx::FromRow;
use tooldir_core::relations::RelatedEntity;
use tooldir_core::types::DbId;

/// A row from the `tags` table. `scope` is one of `tool`, `news`, `both`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub scope: String,
}

impl RelatedEntity for Tag {
    fn entity_id(&self) -> DbId {
        self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}
