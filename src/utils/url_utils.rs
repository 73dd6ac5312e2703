//! URL normalization and crawl-scope filtering.
//!
//! Everything downstream operates on the normalized form of a URL: fragment
//! removed and trailing slashes stripped, so addresses that differ only in
//! those components collapse to a single frontier entry.

use url::Url;

/// File extensions that never yield harvestable text (documents, images,
/// archives). Matched against the final path segment of a candidate link.
pub const BLOCKED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "jpg", "jpeg", "png", "gif", "svg", "webp",
    "zip", "rar", "7z", "tar", "gz",
];

/// Normalize a URL string for deduplication.
///
/// `https://x.test/p#frag` and `https://x.test/p/` both become
/// `https://x.test/p`.
#[must_use]
pub fn normalize_url(url: &str) -> String {
    let without_fragment = url.split('#').next().unwrap_or(url);
    without_fragment.trim_end_matches('/').to_string()
}

/// Resolve a possibly-relative href against the page it appeared on.
#[must_use]
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    base.join(href).ok()
}

/// True when the URL uses a scheme the crawler can fetch. Rendered pages
/// routinely carry `mailto:`, `javascript:` and `data:` hrefs; none of them
/// name an HTTP resource.
#[must_use]
pub fn is_fetchable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// True when the URL's host contains the seed domain.
#[must_use]
pub fn in_scope(url: &Url, seed_host: &str) -> bool {
    url.host_str().is_some_and(|host| host.contains(seed_host))
}

/// True when the final path segment ends in a blocked extension.
#[must_use]
pub fn has_blocked_extension(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    let Some(file_name) = path.rsplit('/').next() else {
        return false;
    };
    match file_name.rsplit_once('.') {
        Some((_, extension)) => BLOCKED_EXTENSIONS.contains(&extension),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_fragment_and_trailing_slash() {
        assert_eq!(normalize_url("https://x.test/p#frag"), "https://x.test/p");
        assert_eq!(normalize_url("https://x.test/p/"), "https://x.test/p");
        assert_eq!(normalize_url("https://x.test/p/#a"), "https://x.test/p");
        assert_eq!(normalize_url("https://x.test/p"), "https://x.test/p");
    }

    #[test]
    fn scope_uses_substring_containment() {
        let seed_host = "example.test";
        let same = Url::parse("https://example.test/page").unwrap();
        let sub = Url::parse("https://ar.example.test/page").unwrap();
        let other = Url::parse("https://other.test/page").unwrap();
        assert!(in_scope(&same, seed_host));
        assert!(in_scope(&sub, seed_host));
        assert!(!in_scope(&other, seed_host));
    }

    #[test]
    fn blocked_extensions_are_detected_on_the_path() {
        let pdf = Url::parse("https://x.test/report.pdf").unwrap();
        let archive = Url::parse("https://x.test/dump.tar.gz").unwrap();
        let upper = Url::parse("https://x.test/scan.JPG").unwrap();
        let page = Url::parse("https://x.test/article").unwrap();
        let dotted_query = Url::parse("https://x.test/article?file=x.pdf").unwrap();
        assert!(has_blocked_extension(&pdf));
        assert!(has_blocked_extension(&archive));
        assert!(has_blocked_extension(&upper));
        assert!(!has_blocked_extension(&page));
        assert!(!has_blocked_extension(&dotted_query));
    }

    #[test]
    fn non_http_schemes_are_not_fetchable() {
        assert!(is_fetchable(&Url::parse("https://x.test/p").unwrap()));
        assert!(is_fetchable(&Url::parse("http://x.test/p").unwrap()));
        assert!(!is_fetchable(&Url::parse("mailto:someone@x.test").unwrap()));
        assert!(!is_fetchable(&Url::parse("javascript:void(0)").unwrap()));
    }

    #[test]
    fn relative_links_resolve_against_the_page() {
        let base = Url::parse("https://x.test/section/page").unwrap();
        let resolved = resolve_link(&base, "/b").unwrap();
        assert_eq!(resolved.as_str(), "https://x.test/b");
        let sibling = resolve_link(&base, "other").unwrap();
        assert_eq!(sibling.as_str(), "https://x.test/section/other");
    }
}
