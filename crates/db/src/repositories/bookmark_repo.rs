//! Repository for the `bookmarks` table.
//!
//! Every mutating method is scoped to the owning user; a bookmark id that
//! belongs to someone else behaves like a missing one.

use sqlx::PgPool;
use tooldir_core::types::DbId;

use crate::models::bookmark::Bookmark;

const COLUMNS: &str = "id, user_id, tool_id, notes, created_at";

pub struct BookmarkRepo;

impl BookmarkRepo {
    /// A user's bookmarks, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Bookmark>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookmarks WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Remove the bookmark if it exists, otherwise add it.
    ///
    /// Returns whether the tool is bookmarked afterwards. The insert is
    /// `ON CONFLICT DO NOTHING`, so a concurrent double toggle cannot create
    /// duplicates.
    pub async fn toggle(pool: &PgPool, user_id: DbId, tool_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed = sqlx::query("DELETE FROM bookmarks WHERE user_id = $1 AND tool_id = $2")
            .bind(user_id)
            .bind(tool_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            sqlx::query(
                "INSERT INTO bookmarks (user_id, tool_id) VALUES ($1, $2) \
                 ON CONFLICT (user_id, tool_id) DO NOTHING",
            )
            .bind(user_id)
            .bind(tool_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(removed == 0)
    }

    /// Replace the note on one of the user's bookmarks.
    pub async fn update_note(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        notes: Option<&str>,
    ) -> Result<Option<Bookmark>, sqlx::Error> {
        let query = format!(
            "UPDATE bookmarks SET notes = $3 WHERE id = $1 AND user_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(id)
            .bind(user_id)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the user's bookmarks. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM bookmarks")
            .fetch_one(pool)
            .await
    }
}
