//! Shared URL helpers used by the crawl engine.

pub mod url_utils;

pub use url_utils::{has_blocked_extension, in_scope, is_fetchable, normalize_url, resolve_link};
