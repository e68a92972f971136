//! Repository for the append-only `click_events` table.

use sqlx::PgPool;

use crate::models::click_event::{ClickEvent, CreateClickEvent, RecentClick};

const COLUMNS: &str = "id, tool_id, user_id, referrer, user_agent, created_at";

pub struct ClickEventRepo;

impl ClickEventRepo {
    pub async fn create(pool: &PgPool, input: &CreateClickEvent) -> Result<ClickEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO click_events (tool_id, user_id, referrer, user_agent) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClickEvent>(&query)
            .bind(input.tool_id)
            .bind(input.user_id)
            .bind(&input.referrer)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    /// The latest clicks with their tool names.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<RecentClick>, sqlx::Error> {
        sqlx::query_as::<_, RecentClick>(
            "SELECT ce.id, ce.tool_id, t.name AS tool_name, t.slug AS tool_slug, \
                    ce.referrer, ce.created_at \
             FROM click_events ce \
             JOIN tools t ON t.id = ce.tool_id \
             ORDER BY ce.created_at DESC, ce.id DESC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM click_events")
            .fetch_one(pool)
            .await
    }
}
