//! Repository for the `tags` table and the `tool_tags` / `news_tags` joins.

use sqlx::PgPool;
use tooldir_core::types::DbId;

use crate::models::tag::Tag;

const COLUMNS: &str = "id, slug, name, scope";

pub struct TagRepo;

impl TagRepo {
    /// All tags, alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags ORDER BY name ASC");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    /// Tags whose scope is one of `scopes`, alphabetically.
    pub async fn list_by_scopes(pool: &PgPool, scopes: &[&str]) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE scope = ANY($1) ORDER BY name ASC");
        sqlx::query_as::<_, Tag>(&query)
            .bind(scopes)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = ANY($1)");
        sqlx::query_as::<_, Tag>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// `(tool_id, tag_id)` join rows for the given tools.
    pub async fn join_rows_for_tools(
        pool: &PgPool,
        tool_ids: &[DbId],
    ) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, DbId)>(
            "SELECT tool_id, tag_id FROM tool_tags WHERE tool_id = ANY($1) ORDER BY tool_id, tag_id",
        )
        .bind(tool_ids)
        .fetch_all(pool)
        .await
    }

    /// `(news_id, tag_id)` join rows for the given news items.
    pub async fn join_rows_for_news(
        pool: &PgPool,
        news_ids: &[DbId],
    ) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, DbId)>(
            "SELECT news_id, tag_id FROM news_tags WHERE news_id = ANY($1) ORDER BY news_id, tag_id",
        )
        .bind(news_ids)
        .fetch_all(pool)
        .await
    }

    /// Insert a tag. Used for seeding reference data.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        name: &str,
        scope: &str,
    ) -> Result<Tag, sqlx::Error> {
        let query =
            format!("INSERT INTO tags (slug, name, scope) VALUES ($1, $2, $3) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tag>(&query)
            .bind(slug)
            .bind(name)
            .bind(scope)
            .fetch_one(pool)
            .await
    }
}
