//! In-memory filtering and pagination of hydrated tools.
//!
//! Every clause of a [`ToolFilter`] is optional and the clauses are ANDed.
//! Filtering is a pure function of the input list and the filter, so the
//! same request always yields the same page.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::relations::split_delimited;

/// Boolean badge columns a listing can be narrowed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureFlag {
    Featured,
    Trending,
    New,
    Partner,
    Recommended,
}

impl FeatureFlag {
    pub const ALL: [FeatureFlag; 5] = [
        FeatureFlag::Featured,
        FeatureFlag::Trending,
        FeatureFlag::New,
        FeatureFlag::Partner,
        FeatureFlag::Recommended,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FeatureFlag::Featured => "featured",
            FeatureFlag::Trending => "trending",
            FeatureFlag::New => "new",
            FeatureFlag::Partner => "partner",
            FeatureFlag::Recommended => "recommended",
        }
    }
}

impl FromStr for FeatureFlag {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        FeatureFlag::ALL
            .into_iter()
            .find(|flag| flag.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown feature flag '{value}'. Must be one of: featured, trending, new, partner, recommended"
                )
            })
    }
}

/// What the filter engine needs to know about a listed entity.
pub trait Filterable {
    fn name(&self) -> &str;
    fn short_description(&self) -> Option<&str>;
    fn description(&self) -> Option<&str>;
    fn category_slugs(&self) -> impl Iterator<Item = &str>;
    fn tag_slugs(&self) -> impl Iterator<Item = &str>;
    fn pricing_model(&self) -> Option<&str>;
    fn has_flag(&self, flag: FeatureFlag) -> bool;
}

/// Optional, independently combinable listing clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolFilter {
    /// Case-insensitive substring of name, short description or description.
    pub search: Option<String>,
    /// Matches when any category slug is in this set.
    pub categories: Vec<String>,
    /// Matches when any tag slug is in this set.
    pub tags: Vec<String>,
    /// Matches when any value is a substring of any pricing-model token.
    pub pricing_models: Vec<String>,
    /// Every flag must be set.
    pub feature_flags: Vec<FeatureFlag>,
}

impl ToolFilter {
    /// `true` when at least one clause constrains the result.
    pub fn has_active_clauses(&self) -> bool {
        self.search.as_deref().is_some_and(|s| !s.is_empty())
            || !self.categories.is_empty()
            || !self.tags.is_empty()
            || !self.pricing_models.is_empty()
            || !self.feature_flags.is_empty()
    }

    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        self.matches_search(item)
            && (self.categories.is_empty()
                || matches_any_slug(item.category_slugs(), &self.categories))
            && (self.tags.is_empty() || matches_any_slug(item.tag_slugs(), &self.tags))
            && self.matches_pricing(item)
            && self.feature_flags.iter().all(|flag| item.has_flag(*flag))
    }

    fn matches_search<T: Filterable>(&self, item: &T) -> bool {
        let term = match self.search.as_deref() {
            Some(term) if !term.is_empty() => term.to_lowercase(),
            _ => return true,
        };
        let contains = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(&term));
        contains(Some(item.name())) || contains(item.short_description()) || contains(item.description())
    }

    fn matches_pricing<T: Filterable>(&self, item: &T) -> bool {
        if self.pricing_models.is_empty() {
            return true;
        }
        let tokens: Vec<String> = split_pricing_model(item.pricing_model())
            .into_iter()
            .map(|token| token.to_lowercase())
            .collect();
        self.pricing_models.iter().any(|wanted| {
            let wanted = wanted.to_lowercase();
            tokens.iter().any(|token| token.contains(&wanted))
        })
    }
}

/// `true` when any of `slugs` is in `wanted`.
pub fn matches_any_slug<'a>(mut slugs: impl Iterator<Item = &'a str>, wanted: &[String]) -> bool {
    slugs.any(|slug| wanted.iter().any(|w| w == slug))
}

/// Split a free-text pricing model (`"Freemium, Enterprise"`) into trimmed tokens.
pub fn split_pricing_model(pricing_model: Option<&str>) -> Vec<String> {
    pricing_model.map(split_delimited).unwrap_or_default()
}

/// Keep the items matching every active clause, preserving input order.
pub fn apply_filter<T: Filterable>(items: Vec<T>, filter: &ToolFilter) -> Vec<T> {
    if !filter.has_active_clauses() {
        return items;
    }
    items.into_iter().filter(|item| filter.matches(item)).collect()
}

/// 1-indexed page slicing. No limit (or a zero limit) returns everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn limited(limit: u32) -> Self {
        Self {
            page: Some(1),
            limit: Some(limit),
        }
    }
}

/// Slice `items` to the requested page. Pages below 1 are treated as page 1.
pub fn paginate<T>(items: Vec<T>, pagination: Pagination) -> Vec<T> {
    let limit = match pagination.limit {
        Some(limit) if limit > 0 => limit as usize,
        _ => return items,
    };
    let page = pagination.page.unwrap_or(1).max(1) as usize;
    let start = (page - 1).saturating_mul(limit);
    items.into_iter().skip(start).take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Item {
        name: String,
        short: Option<String>,
        long: Option<String>,
        categories: Vec<String>,
        tags: Vec<String>,
        pricing: Option<String>,
        flags: Vec<FeatureFlag>,
    }

    impl Filterable for Item {
        fn name(&self) -> &str {
            &self.name
        }
        fn short_description(&self) -> Option<&str> {
            self.short.as_deref()
        }
        fn description(&self) -> Option<&str> {
            self.long.as_deref()
        }
        fn category_slugs(&self) -> impl Iterator<Item = &str> {
            self.categories.iter().map(String::as_str)
        }
        fn tag_slugs(&self) -> impl Iterator<Item = &str> {
            self.tags.iter().map(String::as_str)
        }
        fn pricing_model(&self) -> Option<&str> {
            self.pricing.as_deref()
        }
        fn has_flag(&self, flag: FeatureFlag) -> bool {
            self.flags.contains(&flag)
        }
    }

    fn item(name: &str) -> Item {
        Item {
            name: name.into(),
            ..Default::default()
        }
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Vec<Item> {
        vec![
            Item {
                categories: strings(&["writing"]),
                tags: strings(&["gpt"]),
                pricing: Some("Freemium, Enterprise".into()),
                flags: vec![FeatureFlag::Featured, FeatureFlag::New],
                short: Some("Writes blog posts".into()),
                ..item("Alpha")
            },
            Item {
                categories: strings(&["coding"]),
                tags: strings(&["gpt", "ide"]),
                pricing: Some("Paid".into()),
                flags: vec![FeatureFlag::Featured],
                long: Some("An AI pair programmer".into()),
                ..item("Beta")
            },
            Item {
                pricing: Some("Open Source / Free".into()),
                ..item("Gamma")
            },
        ]
    }

    #[test]
    fn empty_filter_is_identity() {
        let input = sample();
        assert_eq!(apply_filter(input.clone(), &ToolFilter::default()), input);

        let blank_search = ToolFilter {
            search: Some(String::new()),
            ..Default::default()
        };
        assert!(!blank_search.has_active_clauses());
        assert_eq!(apply_filter(input.clone(), &blank_search), input);
    }

    #[test]
    fn category_filter_selects_members() {
        let input = vec![
            Item {
                categories: strings(&["writing"]),
                ..item("Alpha")
            },
            Item {
                categories: strings(&["coding"]),
                ..item("Beta")
            },
        ];
        let filter = ToolFilter {
            categories: strings(&["writing"]),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(input, &filter)), vec!["Alpha"]);
    }

    #[test]
    fn tag_filter_is_or_within_clause() {
        let filter = ToolFilter {
            tags: strings(&["ide", "missing"]),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(sample(), &filter)), vec!["Beta"]);
    }

    #[test]
    fn search_covers_name_and_descriptions_case_insensitively() {
        let by_name = ToolFilter {
            search: Some("GAMMA".into()),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(sample(), &by_name)), vec!["Gamma"]);

        let by_short = ToolFilter {
            search: Some("blog".into()),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(sample(), &by_short)), vec!["Alpha"]);

        let by_long = ToolFilter {
            search: Some("pair PROGRAMMER".into()),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(sample(), &by_long)), vec!["Beta"]);
    }

    #[test]
    fn pricing_matches_substring_of_any_token() {
        let filter = ToolFilter {
            pricing_models: strings(&["free"]),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(sample(), &filter)), vec!["Alpha", "Gamma"]);
    }

    #[test]
    fn pricing_clause_excludes_tools_without_pricing() {
        let filter = ToolFilter {
            pricing_models: strings(&["paid"]),
            ..Default::default()
        };
        let mut input = sample();
        input.push(item("Delta"));
        assert_eq!(names(&apply_filter(input, &filter)), vec!["Beta"]);
    }

    #[test]
    fn feature_flags_are_and_within_clause() {
        let featured = ToolFilter {
            feature_flags: vec![FeatureFlag::Featured],
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(sample(), &featured)), vec!["Alpha", "Beta"]);

        let featured_and_new = ToolFilter {
            feature_flags: vec![FeatureFlag::Featured, FeatureFlag::New],
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(sample(), &featured_and_new)), vec!["Alpha"]);
    }

    #[test]
    fn clauses_are_anded() {
        let filter = ToolFilter {
            tags: strings(&["gpt"]),
            pricing_models: strings(&["paid"]),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(sample(), &filter)), vec!["Beta"]);
    }

    #[test]
    fn filtering_is_deterministic() {
        let filter = ToolFilter {
            search: Some("a".into()),
            feature_flags: vec![FeatureFlag::Featured],
            ..Default::default()
        };
        assert_eq!(apply_filter(sample(), &filter), apply_filter(sample(), &filter));
    }

    #[test]
    fn split_pricing_model_handles_all_delimiters() {
        assert_eq!(
            split_pricing_model(Some("Free; Pro | Team/Enterprise ,")),
            strings(&["Free", "Pro", "Team", "Enterprise"])
        );
        assert!(split_pricing_model(None).is_empty());
    }

    #[test]
    fn paginate_slices_one_indexed_pages() {
        let items: Vec<u32> = (1..=7).collect();
        let page = |page, limit| {
            paginate(
                items.clone(),
                Pagination {
                    page: Some(page),
                    limit: Some(limit),
                },
            )
        };
        assert_eq!(page(1, 3), vec![1, 2, 3]);
        assert_eq!(page(3, 3), vec![7]);
        assert!(page(4, 3).is_empty());
        assert_eq!(page(0, 3), vec![1, 2, 3]);
    }

    #[test]
    fn paginate_without_limit_returns_everything() {
        let items = vec![1, 2, 3];
        assert_eq!(paginate(items.clone(), Pagination::default()), items);
        assert_eq!(
            paginate(
                items.clone(),
                Pagination {
                    page: Some(2),
                    limit: Some(0)
                }
            ),
            items
        );
    }

    #[test]
    fn feature_flag_parsing() {
        assert_eq!("Trending".parse::<FeatureFlag>(), Ok(FeatureFlag::Trending));
        assert!("sparkly".parse::<FeatureFlag>().is_err());
    }
}
