//! Affiliate redirect target resolution.

/// Where `/out/{slug}` sends the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// No tool or no usable affiliate URL.
    SiteRoot,
    Affiliate(String),
}

impl RedirectTarget {
    pub fn location(&self) -> &str {
        match self {
            RedirectTarget::SiteRoot => "/",
            RedirectTarget::Affiliate(url) => url,
        }
    }

    pub fn is_affiliate(&self) -> bool {
        matches!(self, RedirectTarget::Affiliate(_))
    }
}

/// Resolve a stored affiliate URL. Blank URLs go to the site root and URLs
/// not starting with `http` get an `https://` prefix.
pub fn resolve_target(affiliate_url: Option<&str>) -> RedirectTarget {
    match affiliate_url.map(str::trim).filter(|url| !url.is_empty()) {
        None => RedirectTarget::SiteRoot,
        Some(url) if url.starts_with("http") => RedirectTarget::Affiliate(url.to_string()),
        Some(url) => RedirectTarget::Affiliate(format!("https://{url}")),
    }
}
