//! Href generation
//!
//! Renders the canonical URL of a template for a set of parameter values.
//! The output is what [`crate::RouteTree::find`] parses back, apart from two known gaps:
//!
//! - falsy query values (`0`, `false`, `""`) are omitted, so they come back as absent
//! - array path parameters are joined with `,` before encoding, so their commas are encoded
//!   and the segment no longer splits into elements on the way back

use crate::error::{Result, RouterError};
use crate::param::{encode, Parameters};
use crate::{PathSegment, RouteTemplate};

/// Renders `/path?query` for `template`
///
/// Every path parameter needs a value. Query parameters are rendered in declaration order
/// when their value is truthy; array elements are encoded one by one and joined with `,`.
/// A root template renders an empty path.
///
/// # Examples
///
/// ```
/// use trailmark_router::{href, Parameters, ParameterValue, RouteTemplate};
///
/// let template = RouteTemplate::parse("root/:name?tags:string[][&page:number]").unwrap();
/// let mut parameters = Parameters::new();
/// parameters.insert("name".into(), ParameterValue::String("a b".into()));
/// parameters.insert("tags".into(), ParameterValue::StringArray(vec!["x".into(), "y".into()]));
/// parameters.insert("page".into(), ParameterValue::Number(0));
///
/// assert_eq!(href(&template, &parameters).unwrap(), "/root/a%20b?tags=x,y");
/// ```
pub fn href(template: &RouteTemplate, parameters: &Parameters) -> Result<String> {
    let path = render_path(template, parameters)?;
    let query = render_query(template, parameters);

    if query.is_empty() {
        Ok(path)
    } else {
        Ok(format!("{}?{}", path, query))
    }
}

fn render_path(template: &RouteTemplate, parameters: &Parameters) -> Result<String> {
    if template.is_root() {
        return Ok(String::new());
    }

    let segments = template
        .path_segments
        .iter()
        .map(|segment| match segment {
            PathSegment::Constant(value) => Ok(encode(value)),
            PathSegment::Parameter { name, .. } => parameters
                .get(name)
                .map(|value| encode(&value.to_string()))
                .ok_or_else(|| RouterError::MissingPathParameter {
                    template: template.source.clone(),
                    name: name.clone(),
                }),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(format!("/{}", segments.join("/")))
}

fn render_query(template: &RouteTemplate, parameters: &Parameters) -> String {
    template
        .query_parameters
        .iter()
        .filter_map(|spec| {
            let value = parameters.get(&spec.name).filter(|value| value.is_truthy())?;
            let rendered = value
                .elements()
                .iter()
                .map(|element| encode(element))
                .collect::<Vec<_>>()
                .join(",");
            Some(format!("{}={}", encode(&spec.name), rendered))
        })
        .collect::<Vec<_>>()
        .join("&")
}
