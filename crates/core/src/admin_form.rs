//! Parsing and validation of the admin create forms.
//!
//! Every form field arrives as a string. Fields are trimmed and blank values
//! treated as absent before validation; the parsed drafts carry typed values
//! ready for insertion.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

use crate::compliance::{AvvStatus, HostingRegion, RiskLevel, SubprocessorStatus};
use crate::error::{field_errors, CoreError, FieldError};
use crate::slug::validate_slug;
use crate::types::{DbId, Timestamp};

/// Separators accepted by list fields such as `hosting_regions`.
pub const FORM_LIST_DELIMITERS: [char; 4] = ['\n', ',', ';', '|'];

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Trim; blank becomes `None`.
pub fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a number, accepting a decimal comma (`"4,5"`).
pub fn parse_number(value: Option<&str>) -> Option<f64> {
    let normalized = value?.replacen(',', ".", 1);
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse an RFC 3339 timestamp, a `YYYY-MM-DDTHH:MM` local input or a plain
/// `YYYY-MM-DD` date (midnight UTC). Anything else is `None`.
pub fn parse_date(value: Option<&str>) -> Option<Timestamp> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Checkbox semantics: `true`, `on`, `1` and `yes` (any case) are set.
pub fn parse_bool(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.trim().to_lowercase().as_str(),
            "true" | "on" | "1" | "yes"
        )
    })
}

/// Parse a JSON field, falling back to `key: value` lines.
///
/// A JSON object or array is taken as-is. Otherwise each non-blank line
/// becomes a map entry; a single line without `:` becomes `{"value": line}`
/// and unkeyed lines among several become `entry_N`.
pub fn parse_json_field(value: Option<&str>) -> Option<Value> {
    let text = value?.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(parsed @ (Value::Object(_) | Value::Array(_))) = serde_json::from_str::<Value>(text)
    {
        return Some(parsed);
    }

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut record = Map::new();
    match lines.as_slice() {
        [] => return None,
        [line] => match line.split_once(':') {
            Some((key, rest)) => {
                record.insert(key.trim().to_string(), Value::String(rest.trim().to_string()));
            }
            None => {
                record.insert("value".to_string(), Value::String(line.to_string()));
            }
        },
        lines => {
            for line in lines {
                match line.split_once(':') {
                    Some((key, rest)) => {
                        record.insert(key.trim().to_string(), Value::String(rest.trim().to_string()));
                    }
                    None => {
                        let key = format!("entry_{}", record.len() + 1);
                        record.insert(key, Value::String(line.to_string()));
                    }
                }
            }
        }
    }
    Some(Value::Object(record))
}

/// Split a list field on newlines, `,`, `;` and `|`.
pub fn parse_list_field(value: Option<&str>) -> Vec<String> {
    value
        .map(|text| {
            text.split(FORM_LIST_DELIMITERS)
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Check that every requested id names an existing row.
///
/// Returns a [`FieldError`] for `field` listing the unknown ids in request
/// order, or `None` when all of them exist.
pub fn unknown_ids_error(
    field: &str,
    requested: &[DbId],
    existing: impl IntoIterator<Item = DbId>,
) -> Option<FieldError> {
    let existing: HashSet<DbId> = existing.into_iter().collect();
    let mut seen = HashSet::new();
    let unknown: Vec<DbId> = requested
        .iter()
        .copied()
        .filter(|id| !existing.contains(id) && seen.insert(*id))
        .collect();
    if unknown.is_empty() {
        return None;
    }
    let listed = unknown
        .iter()
        .map(DbId::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Some(FieldError::new(field, format!("Unknown id(s): {listed}")))
}

/// Key for a custom source label: lowercased, whitespace runs replaced by `_`.
pub fn custom_source_key(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn parse_choice<T: Default>(
    value: Option<&str>,
    field: &str,
    parse: fn(&str) -> Result<T, CoreError>,
    errors: &mut Vec<FieldError>,
) -> T {
    match value {
        None => T::default(),
        Some(raw) => parse(raw).unwrap_or_else(|err| {
            let message = match err {
                CoreError::Validation(message) => message,
                other => other.to_string(),
            };
            errors.push(FieldError::new(field, message));
            T::default()
        }),
    }
}

fn check_slug(slug: Option<&str>, field: &str, errors: &mut Vec<FieldError>) {
    if let Some(Err(CoreError::Validation(message))) = slug.map(validate_slug) {
        errors.push(FieldError::new(field, message));
    }
}

fn finish<T>(draft: T, mut errors: Vec<FieldError>) -> Result<T, CoreError> {
    if errors.is_empty() {
        return Ok(draft);
    }
    errors.sort_by(|a, b| a.field.cmp(&b.field));
    Err(CoreError::InvalidFields(errors))
}

// ---------------------------------------------------------------------------
// Tool form
// ---------------------------------------------------------------------------

/// Raw tool form as submitted by the admin UI.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ToolForm {
    #[validate(required(message = "Slug is required"))]
    pub slug: Option<String>,
    #[validate(required(message = "Name is required"))]
    pub name: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub pricing_model: Option<String>,
    #[validate(url(message = "Affiliate URL must be a valid URL"))]
    pub affiliate_url: Option<String>,
    #[validate(
        required(message = "Logo URL is required"),
        url(message = "Logo URL must be a valid URL")
    )]
    pub logo_url: Option<String>,
    #[validate(
        required(message = "Thumbnail URL is required"),
        url(message = "Thumbnail URL must be a valid URL")
    )]
    pub thumbnail_url: Option<String>,
    pub use_case: Option<String>,
    pub platform: Option<String>,
    pub cta_label: Option<String>,

    pub avv_dpa: Option<String>,
    pub avv_dpa_details: Option<String>,
    pub avv_dpa_statuses: Option<String>,
    pub hosting_region: Option<String>,
    pub hosting_region_details: Option<String>,
    pub hosting_regions: Option<String>,
    pub subprocessors: Option<String>,
    pub risk_level: Option<String>,
    pub risk_level_details: Option<String>,

    pub gdpr_score: Option<String>,
    pub rating_overall: Option<String>,
    pub rating_gdpr: Option<String>,
    pub community_rating: Option<String>,
    pub last_checked_at: Option<String>,

    pub data_types: Option<String>,
    pub data_type_notes: Option<String>,
    pub security_measures: Option<String>,
    pub security_notes: Option<String>,
    pub social_proof: Option<String>,
    pub feature_flags: Option<String>,

    #[validate(url(message = "Privacy policy source must be a valid URL"))]
    pub sources_privacy: Option<String>,
    #[validate(url(message = "DPA source must be a valid URL"))]
    pub sources_dpa: Option<String>,
    #[validate(url(message = "Security source must be a valid URL"))]
    pub sources_security: Option<String>,
    pub sources_custom_label: Option<String>,
    #[validate(url(message = "Custom source must be a valid URL"))]
    pub sources_custom_url: Option<String>,

    pub is_featured: Option<String>,
    pub is_trending: Option<String>,
    pub is_new: Option<String>,
    pub partner_offer: Option<String>,
    pub is_recommended: Option<String>,

    pub category_ids: Vec<DbId>,
    pub tag_ids: Vec<DbId>,
}

/// A validated tool ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDraft {
    pub slug: String,
    pub name: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub pricing_model: Option<String>,
    pub affiliate_url: Option<String>,
    pub logo_url: String,
    pub thumbnail_url: String,
    pub use_case: Option<String>,
    pub platform: Option<String>,
    pub cta_label: Option<String>,
    pub avv_dpa: AvvStatus,
    pub avv_dpa_details: Option<String>,
    pub avv_dpa_statuses: Vec<String>,
    pub hosting_region: HostingRegion,
    pub hosting_region_details: Option<String>,
    pub hosting_regions: Vec<String>,
    pub subprocessors: SubprocessorStatus,
    pub risk_level: RiskLevel,
    pub risk_level_details: Option<String>,
    pub gdpr_score: Option<f64>,
    pub rating_overall: Option<f64>,
    pub rating_gdpr: Option<f64>,
    pub community_rating: Option<f64>,
    pub last_checked_at: Option<Timestamp>,
    pub data_types: Option<Value>,
    pub data_type_notes: Option<String>,
    pub security_measures: Option<Value>,
    pub security_notes: Option<String>,
    pub social_proof: Option<Value>,
    pub sources: Option<Value>,
    pub feature_flags: Vec<String>,
    pub is_featured: bool,
    pub is_trending: bool,
    pub is_new: bool,
    pub partner_offer: bool,
    pub is_recommended: bool,
    pub category_ids: Vec<DbId>,
    pub tag_ids: Vec<DbId>,
}

impl ToolForm {
    /// Trim every string field, turning blanks into `None`.
    pub fn normalized(self) -> Self {
        Self {
            slug: clean(self.slug),
            name: clean(self.name),
            short_description: clean(self.short_description),
            description: clean(self.description),
            summary: clean(self.summary),
            pricing_model: clean(self.pricing_model),
            affiliate_url: clean(self.affiliate_url),
            logo_url: clean(self.logo_url),
            thumbnail_url: clean(self.thumbnail_url),
            use_case: clean(self.use_case),
            platform: clean(self.platform),
            cta_label: clean(self.cta_label),
            avv_dpa: clean(self.avv_dpa),
            avv_dpa_details: clean(self.avv_dpa_details),
            avv_dpa_statuses: clean(self.avv_dpa_statuses),
            hosting_region: clean(self.hosting_region),
            hosting_region_details: clean(self.hosting_region_details),
            hosting_regions: clean(self.hosting_regions),
            subprocessors: clean(self.subprocessors),
            risk_level: clean(self.risk_level),
            risk_level_details: clean(self.risk_level_details),
            gdpr_score: clean(self.gdpr_score),
            rating_overall: clean(self.rating_overall),
            rating_gdpr: clean(self.rating_gdpr),
            community_rating: clean(self.community_rating),
            last_checked_at: clean(self.last_checked_at),
            data_types: clean(self.data_types),
            data_type_notes: clean(self.data_type_notes),
            security_measures: clean(self.security_measures),
            security_notes: clean(self.security_notes),
            social_proof: clean(self.social_proof),
            feature_flags: clean(self.feature_flags),
            sources_privacy: clean(self.sources_privacy),
            sources_dpa: clean(self.sources_dpa),
            sources_security: clean(self.sources_security),
            sources_custom_label: clean(self.sources_custom_label),
            sources_custom_url: clean(self.sources_custom_url),
            is_featured: clean(self.is_featured),
            is_trending: clean(self.is_trending),
            is_new: clean(self.is_new),
            partner_offer: clean(self.partner_offer),
            is_recommended: clean(self.is_recommended),
            category_ids: self.category_ids,
            tag_ids: self.tag_ids,
        }
    }

    /// The `sources` map: known links plus one optional custom label/url pair.
    fn sources(&self) -> Option<Value> {
        let mut sources = Map::new();
        let known = [
            ("privacy_policy", &self.sources_privacy),
            ("dpa", &self.sources_dpa),
            ("security", &self.sources_security),
        ];
        for (key, url) in known {
            if let Some(url) = url {
                sources.insert(key.to_string(), Value::String(url.clone()));
            }
        }
        if let (Some(label), Some(url)) = (&self.sources_custom_label, &self.sources_custom_url) {
            sources.insert(custom_source_key(label), Value::String(url.clone()));
        }
        (!sources.is_empty()).then_some(Value::Object(sources))
    }

    /// Normalize, validate and convert into a [`ToolDraft`].
    ///
    /// All field problems are reported together as
    /// [`CoreError::InvalidFields`].
    pub fn into_draft(self) -> Result<ToolDraft, CoreError> {
        let form = self.normalized();
        let mut errors = match form.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_errors(&e),
        };
        check_slug(form.slug.as_deref(), "slug", &mut errors);

        let avv_dpa = parse_choice(form.avv_dpa.as_deref(), "avv_dpa", AvvStatus::parse, &mut errors);
        let hosting_region = parse_choice(
            form.hosting_region.as_deref(),
            "hosting_region",
            HostingRegion::parse,
            &mut errors,
        );
        let subprocessors = parse_choice(
            form.subprocessors.as_deref(),
            "subprocessors",
            SubprocessorStatus::parse,
            &mut errors,
        );
        let risk_level = parse_choice(
            form.risk_level.as_deref(),
            "risk_level",
            RiskLevel::parse,
            &mut errors,
        );
        let sources = form.sources();

        let draft = ToolDraft {
            slug: form.slug.unwrap_or_default(),
            name: form.name.unwrap_or_default(),
            short_description: form.short_description,
            description: form.description,
            summary: form.summary,
            pricing_model: form.pricing_model,
            affiliate_url: form.affiliate_url,
            logo_url: form.logo_url.unwrap_or_default(),
            thumbnail_url: form.thumbnail_url.unwrap_or_default(),
            use_case: form.use_case,
            platform: form.platform,
            cta_label: form.cta_label,
            avv_dpa,
            avv_dpa_details: form.avv_dpa_details,
            avv_dpa_statuses: parse_list_field(form.avv_dpa_statuses.as_deref()),
            hosting_region,
            hosting_region_details: form.hosting_region_details,
            hosting_regions: parse_list_field(form.hosting_regions.as_deref()),
            subprocessors,
            risk_level,
            risk_level_details: form.risk_level_details,
            gdpr_score: parse_number(form.gdpr_score.as_deref()),
            rating_overall: parse_number(form.rating_overall.as_deref()),
            rating_gdpr: parse_number(form.rating_gdpr.as_deref()),
            community_rating: parse_number(form.community_rating.as_deref()),
            last_checked_at: parse_date(form.last_checked_at.as_deref()),
            data_types: parse_json_field(form.data_types.as_deref()),
            data_type_notes: form.data_type_notes,
            security_measures: parse_json_field(form.security_measures.as_deref()),
            security_notes: form.security_notes,
            social_proof: parse_json_field(form.social_proof.as_deref()),
            sources,
            feature_flags: parse_list_field(form.feature_flags.as_deref()),
            is_featured: parse_bool(form.is_featured.as_deref()),
            is_trending: parse_bool(form.is_trending.as_deref()),
            is_new: parse_bool(form.is_new.as_deref()),
            partner_offer: parse_bool(form.partner_offer.as_deref()),
            is_recommended: parse_bool(form.is_recommended.as_deref()),
            category_ids: form.category_ids,
            tag_ids: form.tag_ids,
        };
        finish(draft, errors)
    }
}

// ---------------------------------------------------------------------------
// News form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewsForm {
    #[validate(required(message = "Slug is required"))]
    pub slug: Option<String>,
    #[validate(required(message = "Title is required"))]
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
    pub published_at: Option<String>,
    #[validate(
        required(message = "Source URL is required"),
        url(message = "Source URL must be a valid URL")
    )]
    pub source_url: Option<String>,
    pub tag_ids: Vec<DbId>,
}

/// A validated news item ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsDraft {
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub published_at: Timestamp,
    pub sources: Value,
    pub tag_ids: Vec<DbId>,
}

impl NewsForm {
    pub fn normalized(self) -> Self {
        Self {
            slug: clean(self.slug),
            title: clean(self.title),
            excerpt: clean(self.excerpt),
            content: clean(self.content),
            image_url: clean(self.image_url),
            published_at: clean(self.published_at),
            source_url: clean(self.source_url),
            tag_ids: self.tag_ids,
        }
    }

    /// Normalize, validate and convert. Content falls back to the excerpt and
    /// the publication date to now.
    pub fn into_draft(self) -> Result<NewsDraft, CoreError> {
        let form = self.normalized();
        let mut errors = match form.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_errors(&e),
        };
        check_slug(form.slug.as_deref(), "slug", &mut errors);

        let source_url = form.source_url.unwrap_or_default();
        let content = form
            .content
            .or_else(|| form.excerpt.clone())
            .unwrap_or_default();

        let draft = NewsDraft {
            slug: form.slug.unwrap_or_default(),
            title: form.title.unwrap_or_default(),
            excerpt: form.excerpt,
            content,
            image_url: form.image_url,
            published_at: parse_date(form.published_at.as_deref()).unwrap_or_else(Utc::now),
            sources: serde_json::json!({ "primary": source_url }),
            tag_ids: form.tag_ids,
        };
        finish(draft, errors)
    }
}
