//! Enumerated compliance columns on tools and the tag scope column.
//!
//! Each enum round-trips through the lowercase string stored in the
//! database. Parsing is case-insensitive and rejects unknown values with a
//! message listing the accepted ones.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Yes / no / unknown statuses (AVV/DPA, subprocessors)
// ---------------------------------------------------------------------------

/// Whether a data-processing agreement (AVV/DPA) is available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvvStatus {
    Yes,
    No,
    #[default]
    Unknown,
}

impl AvvStatus {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "unknown" => Ok(Self::Unknown),
            _ => Err(CoreError::Validation(format!(
                "Invalid AVV/DPA status '{s}'. Must be one of: yes, no, unknown"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Unknown => "unknown",
        }
    }
}

/// Whether the vendor discloses use of subprocessors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubprocessorStatus {
    Yes,
    No,
    #[default]
    Unknown,
}

impl SubprocessorStatus {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "unknown" => Ok(Self::Unknown),
            _ => Err(CoreError::Validation(format!(
                "Invalid subprocessors value '{s}'. Must be one of: yes, no, unknown"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Unknown => "unknown",
        }
    }
}

// ---------------------------------------------------------------------------
// Hosting region
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostingRegion {
    Eu,
    Usa,
    #[default]
    Unknown,
}

impl HostingRegion {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_lowercase().as_str() {
            "eu" => Ok(Self::Eu),
            "usa" => Ok(Self::Usa),
            "unknown" => Ok(Self::Unknown),
            _ => Err(CoreError::Validation(format!(
                "Invalid hosting region '{s}'. Must be one of: eu, usa, unknown"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eu => "eu",
            Self::Usa => "usa",
            Self::Unknown => "unknown",
        }
    }
}

// ---------------------------------------------------------------------------
// Risk level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(CoreError::Validation(format!(
                "Invalid risk level '{s}'. Must be one of: low, medium, high"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

// ---------------------------------------------------------------------------
// Tag scope
// ---------------------------------------------------------------------------

pub const SCOPE_TOOL: &str = "tool";
pub const SCOPE_NEWS: &str = "news";
pub const SCOPE_BOTH: &str = "both";

/// Which listings a tag is offered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagScope {
    Tool,
    News,
    Both,
}

impl TagScope {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_lowercase().as_str() {
            SCOPE_TOOL => Ok(Self::Tool),
            SCOPE_NEWS => Ok(Self::News),
            SCOPE_BOTH => Ok(Self::Both),
            _ => Err(CoreError::Validation(format!(
                "Invalid tag scope '{s}'. Must be one of: tool, news, both"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tool => SCOPE_TOOL,
            Self::News => SCOPE_NEWS,
            Self::Both => SCOPE_BOTH,
        }
    }

    /// Scopes whose tags are offered as tool filters.
    pub fn tool_filter_scopes() -> [&'static str; 2] {
        [SCOPE_TOOL, SCOPE_BOTH]
    }
}

/// Human label for a stored status value (`"yes"` -> `"Yes"`, `"eu-central"` -> `"Eu Central"`).
pub fn format_status_value(value: &str) -> String {
    match value.trim().to_lowercase().as_str() {
        "yes" => "Yes".to_string(),
        "no" => "No".to_string(),
        "unknown" => "Unclear".to_string(),
        _ => value
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// First non-blank value of a multi-status column, else the scalar column.
fn first_status<'a>(statuses: &'a [String], fallback: &'a str) -> &'a str {
    statuses
        .iter()
        .map(|status| status.trim())
        .find(|status| !status.is_empty())
        .unwrap_or(fallback)
}

/// AVV/DPA label: the first entry of `avv_dpa_statuses` when present.
pub fn avv_dpa_label(statuses: &[String], avv_dpa: &str) -> String {
    format_status_value(first_status(statuses, avv_dpa))
}

/// Hosting label: every entry of `hosting_regions` joined by `", "`, else
/// the scalar `hosting_region`.
pub fn hosting_region_label(regions: &[String], hosting_region: &str) -> String {
    let labels: Vec<String> = regions
        .iter()
        .map(|region| region.trim())
        .filter(|region| !region.is_empty())
        .map(format_status_value)
        .collect();
    if labels.is_empty() {
        format_status_value(hosting_region)
    } else {
        labels.join(", ")
    }
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
