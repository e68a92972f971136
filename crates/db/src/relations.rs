//! PostgreSQL-backed [`RelationSource`]s over the join tables.

use async_trait::async_trait;
use sqlx::PgPool;
use tooldir_core::error::CoreError;
use tooldir_core::hydration::{JoinRow, RelationSource};
use tooldir_core::types::DbId;

use crate::models::category::Category;
use crate::models::tag::Tag;
use crate::repositories::{CategoryRepo, TagRepo};

fn backend_error(err: sqlx::Error) -> CoreError {
    CoreError::Internal(err.to_string())
}

fn to_join_rows(rows: Vec<(DbId, DbId)>) -> Vec<JoinRow> {
    rows.into_iter()
        .map(|(owner_id, related_id)| JoinRow {
            owner_id,
            related_id,
        })
        .collect()
}

/// `tool_categories` -> `categories`.
pub struct ToolCategorySource<'a> {
    pub pool: &'a PgPool,
}

#[async_trait]
impl<'a> RelationSource for ToolCategorySource<'a> {
    type Entity = Category;

    async fn join_rows(&self, owner_ids: &[DbId]) -> Result<Vec<JoinRow>, CoreError> {
        CategoryRepo::join_rows_for_tools(self.pool, owner_ids)
            .await
            .map(to_join_rows)
            .map_err(backend_error)
    }

    async fn lookup(&self, ids: &[DbId]) -> Result<Vec<Category>, CoreError> {
        CategoryRepo::find_by_ids(self.pool, ids)
            .await
            .map_err(backend_error)
    }
}

/// `tool_tags` -> `tags`.
pub struct ToolTagSource<'a> {
    pub pool: &'a PgPool,
}

#[async_trait]
impl<'a> RelationSource for ToolTagSource<'a> {
    type Entity = Tag;

    async fn join_rows(&self, owner_ids: &[DbId]) -> Result<Vec<JoinRow>, CoreError> {
        TagRepo::join_rows_for_tools(self.pool, owner_ids)
            .await
            .map(to_join_rows)
            .map_err(backend_error)
    }

    async fn lookup(&self, ids: &[DbId]) -> Result<Vec<Tag>, CoreError> {
        TagRepo::find_by_ids(self.pool, ids)
            .await
            .map_err(backend_error)
    }
}

/// `news_tags` -> `tags`.
pub struct NewsTagSource<'a> {
    pub pool: &'a PgPool,
}

#[async_trait]
impl<'a> RelationSource for NewsTagSource<'a> {
    type Entity = Tag;

    async fn join_rows(&self, owner_ids: &[DbId]) -> Result<Vec<JoinRow>, CoreError> {
        TagRepo::join_rows_for_news(self.pool, owner_ids)
            .await
            .map(to_join_rows)
            .map_err(backend_error)
    }

    async fn lookup(&self, ids: &[DbId]) -> Result<Vec<Tag>, CoreError> {
        TagRepo::find_by_ids(self.pool, ids)
            .await
            .map_err(backend_error)
    }
}
