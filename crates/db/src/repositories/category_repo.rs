//! Repository for the `categories` table and the `tool_categories` join.

use sqlx::PgPool;
use tooldir_core::types::DbId;

use crate::models::category::Category;

const COLUMNS: &str = "id, slug, name, description";

pub struct CategoryRepo;

impl CategoryRepo {
    /// All categories, alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Categories with the given ids, in no particular order.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = ANY($1)");
        sqlx::query_as::<_, Category>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// `(tool_id, category_id)` join rows for the given tools.
    pub async fn join_rows_for_tools(
        pool: &PgPool,
        tool_ids: &[DbId],
    ) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, DbId)>(
            "SELECT tool_id, category_id FROM tool_categories \
             WHERE tool_id = ANY($1) ORDER BY tool_id, category_id",
        )
        .bind(tool_ids)
        .fetch_all(pool)
        .await
    }

    /// Insert a category. Used for seeding reference data.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (slug, name, description) VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(slug)
            .bind(name)
            .bind(description)
            .fetch_one(pool)
            .await
    }
}
