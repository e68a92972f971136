//! Tool models: the raw row, the hydrated view and lightweight summaries.

use serde::Serialize;
use sqlx::FromRow;
use tooldir_core::relations::{inline_names, reconcile, Linked};
use tooldir_core::tool_filter::{FeatureFlag, Filterable};
use tooldir_core::types::{DbId, Timestamp};

use crate::models::category::Category;
use crate::models::tag::Tag;

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// A row from the `tools` table.
///
/// The legacy `inline_categories` / `inline_tags` columns are never
/// serialized; they are folded into [`ToolView`] during hydration.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Tool {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub pricing_model: Option<String>,
    pub affiliate_url: Option<String>,
    pub cta_label: Option<String>,
    pub logo_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub use_case: Option<String>,
    pub platform: Option<String>,

    pub avv_dpa: String,
    pub avv_dpa_details: Option<String>,
    pub avv_dpa_statuses: Vec<String>,
    pub hosting_region: String,
    pub hosting_region_details: Option<String>,
    pub hosting_regions: Vec<String>,
    pub subprocessors: String,
    pub risk_level: String,
    pub risk_level_details: Option<String>,

    pub community_rating: Option<f64>,
    pub gdpr_score: Option<f64>,
    pub rating_overall: Option<f64>,
    pub rating_gdpr: Option<f64>,

    pub data_types: Option<serde_json::Value>,
    pub data_type_notes: Option<String>,
    pub security_measures: Option<serde_json::Value>,
    pub security_notes: Option<String>,
    pub social_proof: Option<serde_json::Value>,
    pub sources: Option<serde_json::Value>,

    pub is_featured: bool,
    pub is_trending: bool,
    pub is_new: bool,
    pub partner_offer: bool,
    pub is_recommended: bool,
    pub feature_flags: Vec<String>,

    #[serde(skip_serializing)]
    pub inline_categories: Option<serde_json::Value>,
    #[serde(skip_serializing)]
    pub inline_tags: Option<serde_json::Value>,

    pub last_checked_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Hydrated view
// ---------------------------------------------------------------------------

/// A tool with its categories and tags attached.
///
/// Both lists are slug-unique and contain relational entries first, then
/// entries synthesised from the legacy inline columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolView {
    #[serde(flatten)]
    pub tool: Tool,
    pub categories: Vec<Linked<Category>>,
    pub tags: Vec<Linked<Tag>>,
}

impl ToolView {
    /// Merge relational categories/tags with the row's inline names.
    pub fn hydrate(tool: Tool, categories: Vec<Category>, tags: Vec<Tag>) -> Self {
        let categories = reconcile(categories, &inline_names(tool.inline_categories.as_ref()));
        let tags = reconcile(tags, &inline_names(tool.inline_tags.as_ref()));
        Self {
            tool,
            categories,
            tags,
        }
    }

    pub fn related_tag_slugs(&self) -> Vec<String> {
        self.tags.iter().map(|tag| tag.slug().to_string()).collect()
    }
}

impl Filterable for ToolView {
    fn name(&self) -> &str {
        &self.tool.name
    }

    fn short_description(&self) -> Option<&str> {
        self.tool.short_description.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.tool.description.as_deref()
    }

    fn category_slugs(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(Linked::slug)
    }

    fn tag_slugs(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(Linked::slug)
    }

    fn pricing_model(&self) -> Option<&str> {
        self.tool.pricing_model.as_deref()
    }

    fn has_flag(&self, flag: FeatureFlag) -> bool {
        match flag {
            FeatureFlag::Featured => self.tool.is_featured,
            FeatureFlag::Trending => self.tool.is_trending,
            FeatureFlag::New => self.tool.is_new,
            FeatureFlag::Partner => self.tool.partner_offer,
            FeatureFlag::Recommended => self.tool.is_recommended,
        }
    }
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

/// Lightweight tool reference for admin listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ToolSummary {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub created_at: Timestamp,
}

/// The two columns the affiliate redirect needs.
#[derive(Debug, Clone, FromRow)]
pub struct RedirectRow {
    pub id: DbId,
    pub affiliate_url: Option<String>,
}
