//! Repository for the `news` table.

use sqlx::PgPool;
use tooldir_core::admin_form::NewsDraft;

use crate::models::news::{News, NewsSummary};

const COLUMNS: &str = "\
    id, slug, title, excerpt, content, image_url, published_at, sources, \
    created_at, updated_at";

const SUMMARY_COLUMNS: &str = "id, slug, title, published_at";

pub struct NewsRepo;

impl NewsRepo {
    /// Most recently published items, up to `limit`.
    pub async fn list_published(pool: &PgPool, limit: i64) -> Result<Vec<News>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news ORDER BY published_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news WHERE slug = $1");
        sqlx::query_as::<_, News>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM news")
            .fetch_one(pool)
            .await
    }

    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<NewsSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM news ORDER BY published_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, NewsSummary>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Insert a news item and its tag joins in one transaction.
    pub async fn create(pool: &PgPool, input: &NewsDraft) -> Result<News, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO news (slug, title, excerpt, content, image_url, published_at, sources) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let news = sqlx::query_as::<_, News>(&insert_query)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.image_url)
            .bind(input.published_at)
            .bind(&input.sources)
            .fetch_one(&mut *tx)
            .await?;

        if !input.tag_ids.is_empty() {
            sqlx::query(
                "INSERT INTO news_tags (news_id, tag_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) ON CONFLICT DO NOTHING",
            )
            .bind(news.id)
            .bind(&input.tag_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(news)
    }
}
