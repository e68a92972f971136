//! Shared query parameter types for API handlers.
//!
//! List-valued parameters are comma-separated (`?categories=writing,seo`).

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use serde::Deserialize;
use tooldir_core::error::CoreError;
use tooldir_core::tool_filter::{FeatureFlag, Pagination, ToolFilter};

use crate::error::{AppError, AppResult};

/// Unwrap a `Query` extraction, turning a malformed query string
/// (`?page=abc`) into a JSON `BAD_REQUEST` instead of axum's plain-text one.
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Query parameters for `GET /tools` and `GET /tools/count`.
#[derive(Debug, Default, Deserialize)]
pub struct ToolListParams {
    pub search: Option<String>,
    pub categories: Option<String>,
    pub tags: Option<String>,
    pub pricing: Option<String>,
    pub flags: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ToolListParams {
    /// Build the filter. An unknown feature flag is a validation error.
    pub fn filter(&self) -> Result<ToolFilter, CoreError> {
        let feature_flags = split_list(self.flags.as_deref())
            .iter()
            .map(|flag| flag.parse::<FeatureFlag>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(CoreError::Validation)?;

        Ok(ToolFilter {
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            categories: split_list(self.categories.as_deref()),
            tags: split_list(self.tags.as_deref()),
            pricing_models: split_list(self.pricing.as_deref()),
            feature_flags,
        })
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// `?limit=` only.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<u32>,
}

/// Query parameters for `GET /news`.
#[derive(Debug, Default, Deserialize)]
pub struct NewsListParams {
    pub tags: Option<String>,
    pub limit: Option<i64>,
}

impl NewsListParams {
    pub fn tag_slugs(&self) -> Vec<String> {
        split_list(self.tags.as_deref())
    }
}

/// Split a comma-separated parameter, trimming and dropping blank entries.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn split_list_drops_blank_entries() {
        assert_eq!(split_list(Some(" writing, ,seo,")), vec!["writing", "seo"]);
        assert!(split_list(Some("")).is_empty());
        assert!(split_list(None).is_empty());
    }

    #[test]
    fn empty_params_build_an_inactive_filter() {
        let filter = ToolListParams::default().filter().unwrap();
        assert!(!filter.has_active_clauses());
    }

    #[test]
    fn params_map_onto_filter_clauses() {
        let params = ToolListParams {
            search: Some("  notes ".into()),
            categories: Some("writing,research".into()),
            pricing: Some("free".into()),
            flags: Some("Featured,new".into()),
            page: Some(2),
            limit: Some(10),
            ..Default::default()
        };
        let filter = params.filter().unwrap();
        assert_eq!(filter.search.as_deref(), Some("notes"));
        assert_eq!(filter.categories, vec!["writing", "research"]);
        assert_eq!(filter.pricing_models, vec!["free"]);
        assert_eq!(filter.feature_flags, vec![FeatureFlag::Featured, FeatureFlag::New]);
        assert_eq!(
            params.pagination(),
            Pagination {
                page: Some(2),
                limit: Some(10)
            }
        );
    }

    #[test]
    fn blank_search_is_ignored() {
        let params = ToolListParams {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(params.filter().unwrap().search, None);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let params = ToolListParams {
            flags: Some("featured,sponsored".into()),
            ..Default::default()
        };
        assert_matches!(params.filter(), Err(CoreError::Validation(msg)) if msg.contains("sponsored"));
    }
}
