//! Read access to the `tool_votes` table.
//!
//! Rows are returned as JSON objects so the aggregator can cope with the
//! direction column under any of its historical names.

use sqlx::PgPool;
use tooldir_core::types::DbId;

pub struct VoteRepo;

impl VoteRepo {
    /// Every vote row for the given tools, as `to_jsonb(row)`.
    pub async fn rows_for_tools(
        pool: &PgPool,
        tool_ids: &[DbId],
    ) -> Result<Vec<serde_json::Value>, sqlx::Error> {
        sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT to_jsonb(v) FROM tool_votes v WHERE v.tool_id = ANY($1)",
        )
        .bind(tool_ids)
        .fetch_all(pool)
        .await
    }

    /// Insert a vote. Voting is not exposed over HTTP; this seeds data.
    pub async fn create(
        pool: &PgPool,
        tool_id: DbId,
        user_id: DbId,
        vote_type: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO tool_votes (tool_id, user_id, vote_type) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(tool_id)
        .bind(user_id)
        .bind(vote_type)
        .fetch_one(pool)
        .await
    }
}
