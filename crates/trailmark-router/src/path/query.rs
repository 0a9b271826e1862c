//! Query string parsing
//!
//! Keys are percent-decoded; values stay raw so typed coercion decides how to decode them.

use std::collections::HashMap;

use crate::param::decode;

/// Raw query values keyed by decoded name
///
/// Repeated keys accumulate into one comma-joined value (`a=1&a=2` → `"1,2"`), which is
/// exactly what array coercion splits apart again.
pub type RawQuery = HashMap<String, String>;

/// Parses a query string (without the leading `?`)
///
/// A key with no `=` has an empty value.
///
/// # Examples
///
/// ```
/// use trailmark_router::path::parse_query;
///
/// let query = parse_query("queryParam=first&queryParam=second&flag");
/// assert_eq!(query["queryParam"], "first,second");
/// assert_eq!(query["flag"], "");
/// ```
pub fn parse_query(query: &str) -> RawQuery {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .fold(RawQuery::new(), |mut accumulated, (key, value)| {
            accumulated
                .entry(decode(key))
                .and_modify(|existing| {
                    existing.push(',');
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
            accumulated
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("&&").is_empty());
    }

    #[test]
    fn test_keys_are_decoded_values_are_raw() {
        let query = parse_query("a%2Fb=c%2Fd");
        assert_eq!(query["a/b"], "c%2Fd");
    }

    #[test]
    fn test_value_keeps_later_equals_signs() {
        let query = parse_query("expr=a=b");
        assert_eq!(query["expr"], "a=b");
    }

    #[test]
    fn test_repeated_keys_accumulate() {
        let query = parse_query("a=1&b=x&a=2&a=3");
        assert_eq!(query["a"], "1,2,3");
        assert_eq!(query["b"], "x");
    }
}
