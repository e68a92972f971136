//! Slug generation and validation.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::CoreError;

static NON_ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("static slug pattern is valid"));

/// Combining diacritical marks block (U+0300..U+036F).
fn is_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Convert a display name into a URL-safe slug.
///
/// Decomposes to NFD and drops the combining marks (so `"Übersetzung"`
/// becomes `"ubersetzung"`), lowercases, collapses every run of characters
/// outside `[a-z0-9]` into a single hyphen and trims hyphens at both ends.
/// May return an empty string.
pub fn slugify(value: &str) -> String {
    let stripped: String = value.nfd().filter(|c| !is_diacritic(*c)).collect();
    let lowered = stripped.to_lowercase();
    NON_ALNUM_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Validate a slug (non-empty, only lowercase alphanumeric + hyphens).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_basic_name() {
        assert_eq!(slugify("Text Generation"), "text-generation");
    }

    #[test]
    fn slug_strips_diacritics() {
        assert_eq!(slugify("Übersetzung & Café"), "ubersetzung-cafe");
        assert_eq!(slugify("Crème brûlée"), "creme-brulee");
    }

    #[test]
    fn slug_collapses_runs_and_trims() {
        assert_eq!(slugify("  --AI // Writing--  "), "ai-writing");
        assert_eq!(slugify("a___b"), "a-b");
    }

    #[test]
    fn slug_of_symbols_is_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn validate_accepts_generated_slugs() {
        assert!(validate_slug(&slugify("Deep Learning 101")).is_ok());
    }

    #[test]
    fn validate_rejects_empty_and_uppercase() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Hello-World").is_err());
        assert!(validate_slug("with space").is_err());
    }
}
