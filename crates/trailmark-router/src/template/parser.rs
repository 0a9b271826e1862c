//! Template string parsing
//!
//! Pure functional parser: template string → [`RouteTemplate`].
//!
//! # Grammar
//!
//! ```text
//! template := path ['?' query] | path '[?' query ']'
//! path     := segment ('/' segment)*
//! segment  := constant | ':' name [':' type]
//! query    := param ('&' param)* ['[&' optParam ('&' optParam)* ']']
//! param    := name [':' type]
//! ```
//!
//! Unknown types and empty parameter names are rejected. Any other malformed shape
//! parses on a best-effort basis.

use crate::error::{Result, RouterError};
use crate::path::trim_slashes;
use crate::ParameterType;

use super::segment::{PathSegment, QueryParameterSpec, RouteTemplate};

impl RouteTemplate {
    /// Parses a template string
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmark_router::{ParameterType, PathSegment, RouteTemplate};
    ///
    /// let template = RouteTemplate::parse("root/:page:number").unwrap();
    /// assert_eq!(
    ///     template.path_segments[1],
    ///     PathSegment::Parameter { name: "page".into(), parameter_type: ParameterType::Number }
    /// );
    ///
    /// // Root templates have no path segments
    /// assert!(RouteTemplate::parse("").unwrap().is_root());
    /// assert!(RouteTemplate::parse("/").unwrap().is_root());
    ///
    /// // A query block that is entirely optional
    /// let template = RouteTemplate::parse("root[?sort]").unwrap();
    /// assert!(template.query_parameters[0].is_optional);
    /// ```
    pub fn parse(template: &str) -> Result<RouteTemplate> {
        let trimmed = trim_slashes(template);
        let rewritten = trimmed.replace("[?", "?[");
        let (path, query) = match rewritten.split_once('?') {
            // `root/?q` and `root/[?q]` end their path with a slash
            Some((path, query)) => (path.strip_suffix('/').unwrap_or(path), Some(query)),
            None => (rewritten.as_str(), None),
        };

        let path_segments = parse_path(template, path)?;
        let query_parameters = match query {
            Some(query) => parse_query(template, query)?,
            None => Vec::new(),
        };

        Ok(RouteTemplate {
            source: template.to_string(),
            path_segments,
            query_parameters,
        })
    }
}

/// Parses the path part; an empty path is the root
fn parse_path(template: &str, path: &str) -> Result<Vec<PathSegment>> {
    if path.is_empty() {
        return Ok(Vec::new());
    }
    path.split('/')
        .map(|segment| classify_segment(template, segment))
        .collect()
}

/// Classifies one path segment (pure function)
///
/// `:name[:type]` is a parameter, anything else (including `""`) a constant.
pub fn classify_segment(template: &str, segment: &str) -> Result<PathSegment> {
    match segment.strip_prefix(':') {
        Some(param) => {
            let (name, parameter_type) = parse_param_with_type(template, param)?;
            Ok(PathSegment::Parameter {
                name,
                parameter_type,
            })
        }
        None => Ok(PathSegment::Constant(segment.to_string())),
    }
}

/// Parses `name` or `name:type` into its parts (pure function)
///
/// The type defaults to `string`.
pub fn parse_param_with_type(template: &str, param: &str) -> Result<(String, ParameterType)> {
    let (name, parameter_type) = match param.split_once(':') {
        Some((name, type_name)) => {
            let parameter_type =
                type_name
                    .parse::<ParameterType>()
                    .map_err(|unknown| RouterError::UnknownParameterType {
                        template: template.to_string(),
                        type_name: unknown.0,
                    })?;
            (name, parameter_type)
        }
        None => (param, ParameterType::String),
    };

    if name.is_empty() {
        return Err(RouterError::EmptyParameterName {
            template: template.to_string(),
        });
    }
    Ok((name.to_string(), parameter_type))
}

/// Parses the query part into required parameters followed by optional ones
fn parse_query(template: &str, query: &str) -> Result<Vec<QueryParameterSpec>> {
    let mut rewritten = query.replace("[&", "&[");
    if rewritten.starts_with('[') {
        rewritten.insert(0, '&');
    }

    let (required, optional) = match rewritten.split_once("&[") {
        Some((required, optional)) => (required, Some(optional)),
        None => (rewritten.as_str(), None),
    };

    let required = parse_query_params(template, required, false)?;
    let optional = match optional {
        Some(optional) => {
            let optional = optional.strip_suffix(']').unwrap_or(optional);
            parse_query_params(template, optional, true)?
        }
        None => Vec::new(),
    };

    Ok(required.into_iter().chain(optional).collect())
}

fn parse_query_params(
    template: &str,
    params: &str,
    is_optional: bool,
) -> Result<Vec<QueryParameterSpec>> {
    params
        .split('&')
        .map(strip_stray_brackets)
        .filter(|param| !param.is_empty())
        .map(|param| {
            let (name, parameter_type) = parse_param_with_type(template, param)?;
            Ok(QueryParameterSpec {
                name,
                parameter_type,
                is_optional,
            })
        })
        .collect()
}

/// Removes brackets left over from repeated optional blocks (`a[&b][&c]`)
///
/// A trailing `[]` belongs to an array type and is kept.
fn strip_stray_brackets(param: &str) -> &str {
    let param = param.trim_start_matches('[');
    match param.strip_suffix(']') {
        Some(stripped) if !param.ends_with("[]") => stripped,
        _ => param,
    }
}
