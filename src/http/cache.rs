//! HTTP cache control module
//!
//! `ETag` generation, conditional request matching and `Cache-Control` values.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Quoted `ETag` for `content`, e.g. `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Whether `If-None-Match` matches `etag` (list or `*`), i.e. 304 applies
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .map(str::trim)
            .any(|e| e == etag || e == "*" || e.strip_prefix("W/") == Some(etag))
    })
}

/// Cache policy for a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Public cache with max-age in seconds
    Public(u32),
    /// Always revalidate with the server
    NoCache,
}

impl CachePolicy {
    /// Dashboard pages change whenever the pipeline runs, so a zero max-age
    /// means revalidate every time.
    pub const fn for_max_age(max_age: u32) -> Self {
        if max_age == 0 {
            Self::NoCache
        } else {
            Self::Public(max_age)
        }
    }

    pub fn to_header_value(self) -> String {
        match self {
            Self::Public(max_age) => format!("public, max-age={max_age}"),
            Self::NoCache => "no-cache".to_string(),
        }
    }
}
