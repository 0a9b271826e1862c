//! URL splitting utilities shared by the parser and the matcher
//!
//! All functions are **pure** and borrow from their input (zero-copy).

pub mod query;
pub use query::{parse_query, RawQuery};

/// Strips one leading and one trailing `/`
///
/// # Examples
///
/// ```
/// use trailmark_router::path::trim_slashes;
///
/// assert_eq!(trim_slashes("/users/"), "users");
/// assert_eq!(trim_slashes("//users"), "/users");
/// assert_eq!(trim_slashes("/"), "");
/// assert_eq!(trim_slashes(""), "");
/// ```
pub fn trim_slashes(value: &str) -> &str {
    let value = value.strip_prefix('/').unwrap_or(value);
    value.strip_suffix('/').unwrap_or(value)
}

/// Splits a URL into its path and query string at the first `?`
///
/// A `#fragment` is never part of either.
///
/// # Examples
///
/// ```
/// use trailmark_router::path::split_url;
///
/// assert_eq!(split_url("/search?q=rust#top"), ("/search", Some("q=rust")));
/// assert_eq!(split_url("/about"), ("/about", None));
/// ```
pub fn split_url(url: &str) -> (&str, Option<&str>) {
    let url = url.split_once('#').map(|(url, _)| url).unwrap_or(url);
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Splits a URL path into raw (undecoded) segments
///
/// `""` and `/` have no segments. Empty segments between slashes are kept.
///
/// # Examples
///
/// ```
/// use trailmark_router::path::split_path;
///
/// assert_eq!(split_path("/root/a/"), vec!["root", "a"]);
/// assert_eq!(split_path("/a//b"), vec!["a", "", "b"]);
/// assert!(split_path("/").is_empty());
/// ```
pub fn split_path(path: &str) -> Vec<&str> {
    let trimmed = trim_slashes(path);
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}
