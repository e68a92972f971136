//! Handlers for the public `/tools` resource.
//!
//! Reads go through [`Directory`](tooldir_db::directory::Directory), which
//! degrades to empty results on backend errors, so only a missing slug or
//! an invalid query surfaces as an error here.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tooldir_core::compliance::{avv_dpa_label, format_status_value, hosting_region_label};
use tooldir_core::error::CoreError;
use tooldir_core::json_fields::{
    extract_entries, format_social_proof, normalize_sources, JsonEntry, SourceLink,
};
use tooldir_core::types::DbId;
use tooldir_core::votes::VoteCounts;
use tooldir_db::models::tool::ToolView;

use crate::error::AppResult;
use crate::query::{query_params, LimitParams, ToolListParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A listed tool with its vote counters.
#[derive(Debug, Serialize)]
pub struct ListedTool {
    #[serde(flatten)]
    pub tool: ToolView,
    pub votes: VoteCounts,
}

#[derive(Debug, Serialize)]
pub struct ToolPage {
    pub items: Vec<ListedTool>,
    /// Matches across all pages.
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct ToolCount {
    pub count: i64,
}

/// Display labels for the enumerated compliance columns.
#[derive(Debug, Serialize)]
pub struct ComplianceLabels {
    pub avv_dpa: String,
    pub hosting_region: String,
    pub subprocessors: String,
    pub risk_level: String,
}

/// Headline ratings. Each prefers the curated score and falls back to the
/// aggregated rating column.
#[derive(Debug, Serialize)]
pub struct DetailRatings {
    pub overall: Option<f64>,
    pub gdpr: Option<f64>,
}

/// Everything the tool detail page renders.
#[derive(Debug, Serialize)]
pub struct ToolDetail {
    pub tool: ToolView,
    pub votes: VoteCounts,
    pub similar: Vec<ToolView>,
    pub compliance: ComplianceLabels,
    pub ratings: DetailRatings,
    pub data_types: Vec<JsonEntry>,
    pub security_measures: Vec<JsonEntry>,
    pub sources: Vec<SourceLink>,
    pub social_proof: Option<String>,
}

impl ToolDetail {
    fn build(tool: ToolView, votes: VoteCounts, similar: Vec<ToolView>) -> Self {
        let row = &tool.tool;
        let compliance = ComplianceLabels {
            avv_dpa: avv_dpa_label(&row.avv_dpa_statuses, &row.avv_dpa),
            hosting_region: hosting_region_label(&row.hosting_regions, &row.hosting_region),
            subprocessors: format_status_value(&row.subprocessors),
            risk_level: format_status_value(&row.risk_level),
        };
        let ratings = DetailRatings {
            overall: row.community_rating.or(row.rating_overall),
            gdpr: row.gdpr_score.or(row.rating_gdpr),
        };
        let data_types = extract_entries(row.data_types.as_ref());
        let security_measures = extract_entries(row.security_measures.as_ref());
        let sources = normalize_sources(row.sources.as_ref());
        let social_proof = format_social_proof(row.social_proof.as_ref());

        Self {
            tool,
            votes,
            similar,
            compliance,
            ratings,
            data_types,
            security_measures,
            sources,
            social_proof,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/tools
///
/// Filtered, paginated tools (newest first) with vote counts and the total
/// number of matches.
pub async fn list_tools(
    State(state): State<AppState>,
    query: Result<Query<ToolListParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let params = query_params(query)?;
    let filter = params.filter()?;
    let directory = &state.directory;

    let (tools, total) = tokio::join!(
        directory.tools(&filter, params.pagination()),
        directory.tool_count(&filter),
    );

    let ids: Vec<DbId> = tools.iter().map(|view| view.tool.id).collect();
    let votes = directory.vote_counts(&ids).await;

    let items = tools
        .into_iter()
        .map(|tool| ListedTool {
            votes: votes.get(&tool.tool.id).copied().unwrap_or_default(),
            tool,
        })
        .collect();

    Ok(Json(DataResponse {
        data: ToolPage { items, total },
    }))
}

/// GET /api/v1/tools/count
pub async fn count_tools(
    State(state): State<AppState>,
    query: Result<Query<ToolListParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let params = query_params(query)?;
    let filter = params.filter()?;
    let count = state.directory.tool_count(&filter).await;

    Ok(Json(DataResponse {
        data: ToolCount { count },
    }))
}

/// GET /api/v1/tools/featured
pub async fn featured_tools(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tools = state.directory.featured_tools().await;
    Ok(Json(DataResponse { data: tools }))
}

/// GET /api/v1/tools/newest
pub async fn newest_tools(
    State(state): State<AppState>,
    query: Result<Query<LimitParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let params = query_params(query)?;
    let tools = state.directory.newest_tools(params.limit).await;
    Ok(Json(DataResponse { data: tools }))
}

/// GET /api/v1/tools/filters
///
/// Categories and tool-scoped tags for the listing sidebar.
pub async fn filter_options(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let options = state.directory.filter_options().await;
    Ok(Json(DataResponse { data: options }))
}

/// GET /api/v1/tools/{slug}
pub async fn get_tool(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let directory = &state.directory;
    let tool = directory
        .tool_by_slug(&slug)
        .await
        .ok_or_else(|| CoreError::not_found("Tool", &slug))?;

    let tool_ids = [tool.tool.id];
    let (votes, similar) = tokio::join!(
        directory.vote_counts(&tool_ids),
        directory.similar_tools(&tool),
    );
    let votes = votes.get(&tool.tool.id).copied().unwrap_or_default();

    Ok(Json(DataResponse {
        data: ToolDetail::build(tool, votes, similar),
    }))
}
