//! Repository for the `tools` table.

use sqlx::PgPool;
use tooldir_core::admin_form::ToolDraft;
use tooldir_core::types::DbId;

use crate::models::tool::{RedirectRow, Tool, ToolSummary};

const COLUMNS: &str = "\
    id, slug, name, short_description, description, summary, pricing_model, \
    affiliate_url, cta_label, logo_url, thumbnail_url, use_case, platform, \
    avv_dpa, avv_dpa_details, avv_dpa_statuses, hosting_region, \
    hosting_region_details, hosting_regions, subprocessors, risk_level, \
    risk_level_details, community_rating, gdpr_score, rating_overall, rating_gdpr, \
    data_types, data_type_notes, security_measures, security_notes, social_proof, \
    sources, is_featured, is_trending, is_new, partner_offer, is_recommended, \
    feature_flags, inline_categories, inline_tags, last_checked_at, created_at, updated_at";

const SUMMARY_COLUMNS: &str = "id, slug, name, created_at";

pub struct ToolRepo;

impl ToolRepo {
    /// Every tool, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tool>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tools ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Tool>(&query).fetch_all(pool).await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM tools")
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Tool>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tools WHERE slug = $1");
        sqlx::query_as::<_, Tool>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Tool>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tools WHERE id = ANY($1)");
        sqlx::query_as::<_, Tool>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Id and affiliate URL for the redirect endpoint.
    pub async fn find_redirect(pool: &PgPool, slug: &str) -> Result<Option<RedirectRow>, sqlx::Error> {
        sqlx::query_as::<_, RedirectRow>("SELECT id, affiliate_url FROM tools WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// The most recently created tools.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<ToolSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM tools ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, ToolSummary>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Insert a tool and its category/tag joins in one transaction.
    pub async fn create(pool: &PgPool, input: &ToolDraft) -> Result<Tool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO tools \
                (slug, name, short_description, description, summary, pricing_model, \
                 affiliate_url, cta_label, logo_url, thumbnail_url, use_case, platform, \
                 avv_dpa, avv_dpa_details, avv_dpa_statuses, hosting_region, \
                 hosting_region_details, hosting_regions, subprocessors, risk_level, \
                 risk_level_details, community_rating, gdpr_score, rating_overall, rating_gdpr, \
                 data_types, data_type_notes, security_measures, security_notes, social_proof, \
                 sources, is_featured, is_trending, is_new, partner_offer, is_recommended, \
                 feature_flags, last_checked_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
                     $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, \
                     $31, $32, $33, $34, $35, $36, $37, $38) \
             RETURNING {COLUMNS}"
        );
        let tool = sqlx::query_as::<_, Tool>(&insert_query)
            .bind(&input.slug)
            .bind(&input.name)
            .bind(&input.short_description)
            .bind(&input.description)
            .bind(&input.summary)
            .bind(&input.pricing_model)
            .bind(&input.affiliate_url)
            .bind(&input.cta_label)
            .bind(&input.logo_url)
            .bind(&input.thumbnail_url)
            .bind(&input.use_case)
            .bind(&input.platform)
            .bind(input.avv_dpa.as_str())
            .bind(&input.avv_dpa_details)
            .bind(&input.avv_dpa_statuses)
            .bind(input.hosting_region.as_str())
            .bind(&input.hosting_region_details)
            .bind(&input.hosting_regions)
            .bind(input.subprocessors.as_str())
            .bind(input.risk_level.as_str())
            .bind(&input.risk_level_details)
            .bind(input.community_rating)
            .bind(input.gdpr_score)
            .bind(input.rating_overall)
            .bind(input.rating_gdpr)
            .bind(&input.data_types)
            .bind(&input.data_type_notes)
            .bind(&input.security_measures)
            .bind(&input.security_notes)
            .bind(&input.social_proof)
            .bind(&input.sources)
            .bind(input.is_featured)
            .bind(input.is_trending)
            .bind(input.is_new)
            .bind(input.partner_offer)
            .bind(input.is_recommended)
            .bind(&input.feature_flags)
            .bind(input.last_checked_at)
            .fetch_one(&mut *tx)
            .await?;

        if !input.category_ids.is_empty() {
            sqlx::query(
                "INSERT INTO tool_categories (tool_id, category_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) ON CONFLICT DO NOTHING",
            )
            .bind(tool.id)
            .bind(&input.category_ids)
            .execute(&mut *tx)
            .await?;
        }

        if !input.tag_ids.is_empty() {
            sqlx::query(
                "INSERT INTO tool_tags (tool_id, tag_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) ON CONFLICT DO NOTHING",
            )
            .bind(tool.id)
            .bind(&input.tag_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(tool)
    }

    /// Set the legacy inline category/tag columns. Only used to load
    /// pre-migration data; new tools link through the join tables.
    pub async fn set_inline_relations(
        pool: &PgPool,
        id: DbId,
        inline_categories: Option<&serde_json::Value>,
        inline_tags: Option<&serde_json::Value>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tools SET inline_categories = $2, inline_tags = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(inline_categories)
        .bind(inline_tags)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
