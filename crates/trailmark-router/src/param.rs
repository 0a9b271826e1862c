//! Parameter types, typed values and raw-token coercion
//!
//! All functions are **pure**: same input → same output, no side effects.
//! Raw tokens are the undecoded strings found in a URL path segment or query value.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Accepted spelling of a number token
///
/// Looser than the coercion: decimals pass validation and are truncated by [`coerce`].
static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+(\.\d+)?$").expect("number pattern is a valid regex"));

/// Parameter values bound by a match or fed to href generation, keyed by parameter name
pub type Parameters = HashMap<String, ParameterValue>;

/// Declared type of a path or query parameter
///
/// # Examples
///
/// ```
/// use trailmark_router::ParameterType;
///
/// let ty: ParameterType = "number[]".parse().unwrap();
/// assert_eq!(ty, ParameterType::NumberArray);
/// assert_eq!(ty.to_string(), "number[]");
/// assert!("float".parse::<ParameterType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterType {
    #[default]
    String,
    Number,
    Boolean,
    StringArray,
    NumberArray,
    BooleanArray,
}

impl ParameterType {
    /// Element type of an array type, `None` for scalars
    pub fn element_type(self) -> Option<ParameterType> {
        match self {
            ParameterType::StringArray => Some(ParameterType::String),
            ParameterType::NumberArray => Some(ParameterType::Number),
            ParameterType::BooleanArray => Some(ParameterType::Boolean),
            ParameterType::String | ParameterType::Number | ParameterType::Boolean => None,
        }
    }

    /// Template spelling of this type
    pub fn as_str(self) -> &'static str {
        match self {
            ParameterType::String => "string",
            ParameterType::Number => "number",
            ParameterType::Boolean => "boolean",
            ParameterType::StringArray => "string[]",
            ParameterType::NumberArray => "number[]",
            ParameterType::BooleanArray => "boolean[]",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a template names a type outside the six supported spellings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownParameterType(pub String);

impl FromStr for ParameterType {
    type Err = UnknownParameterType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(ParameterType::String),
            "number" => Ok(ParameterType::Number),
            "boolean" => Ok(ParameterType::Boolean),
            "string[]" => Ok(ParameterType::StringArray),
            "number[]" => Ok(ParameterType::NumberArray),
            "boolean[]" => Ok(ParameterType::BooleanArray),
            other => Err(UnknownParameterType(other.to_string())),
        }
    }
}

/// A typed parameter value
///
/// Serializes untagged, so `{"id": 3, "tags": ["a", "b"]}` maps straight onto [`Parameters`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Boolean(bool),
    Number(i64),
    String(String),
    BooleanArray(Vec<bool>),
    NumberArray(Vec<i64>),
    StringArray(Vec<String>),
}

impl ParameterValue {
    /// Whether href generation renders this value as a query parameter
    ///
    /// `0`, `false` and `""` are falsy. Arrays are always truthy, even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            ParameterValue::String(s) => !s.is_empty(),
            ParameterValue::Number(n) => *n != 0,
            ParameterValue::Boolean(b) => *b,
            ParameterValue::StringArray(_)
            | ParameterValue::NumberArray(_)
            | ParameterValue::BooleanArray(_) => true,
        }
    }

    /// Unencoded string form of each element; scalars yield a single element
    pub fn elements(&self) -> Vec<String> {
        match self {
            ParameterValue::String(s) => vec![s.clone()],
            ParameterValue::Number(n) => vec![n.to_string()],
            ParameterValue::Boolean(b) => vec![b.to_string()],
            ParameterValue::StringArray(values) => values.clone(),
            ParameterValue::NumberArray(values) => values.iter().map(i64::to_string).collect(),
            ParameterValue::BooleanArray(values) => values.iter().map(bool::to_string).collect(),
        }
    }
}

/// Elements joined with `,`, unencoded
impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.elements().join(","))
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::String(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Number(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Boolean(value)
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(values: Vec<String>) -> Self {
        ParameterValue::StringArray(values)
    }
}

impl From<Vec<i64>> for ParameterValue {
    fn from(values: Vec<i64>) -> Self {
        ParameterValue::NumberArray(values)
    }
}

impl From<Vec<bool>> for ParameterValue {
    fn from(values: Vec<bool>) -> Self {
        ParameterValue::BooleanArray(values)
    }
}

// ============================================================================
// Validation and coercion
// ============================================================================

/// Checks whether a raw token can be coerced to `parameter_type`
///
/// An absent or empty token is always well-formed: it stands for the type's default.
/// Array tokens are split on `,` and every element must be well-formed on its own.
///
/// # Examples
///
/// ```
/// use trailmark_router::{is_well_formed, ParameterType};
///
/// assert!(is_well_formed(None, ParameterType::Number));
/// assert!(is_well_formed(Some(""), ParameterType::Boolean));
/// assert!(is_well_formed(Some("-12"), ParameterType::Number));
/// assert!(is_well_formed(Some("1,2,3"), ParameterType::NumberArray));
/// assert!(!is_well_formed(Some("1,x"), ParameterType::NumberArray));
/// assert!(!is_well_formed(Some("yes"), ParameterType::Boolean));
/// ```
pub fn is_well_formed(raw: Option<&str>, parameter_type: ParameterType) -> bool {
    let raw = match raw {
        None | Some("") => return true,
        Some(raw) => raw,
    };

    match parameter_type.element_type() {
        Some(element_type) => raw
            .split(',')
            .all(|element| is_well_formed(Some(element), element_type)),
        None => is_scalar_well_formed(raw, parameter_type),
    }
}

fn is_scalar_well_formed(raw: &str, parameter_type: ParameterType) -> bool {
    match parameter_type {
        ParameterType::String => true,
        ParameterType::Number => NUMBER_PATTERN.is_match(raw) && parse_integer_part(raw).is_some(),
        ParameterType::Boolean => raw == "true" || raw == "false",
        ParameterType::StringArray | ParameterType::NumberArray | ParameterType::BooleanArray => {
            unreachable!("array types are validated element-wise")
        }
    }
}

/// Converts a raw token into a typed value
///
/// Callers check [`is_well_formed`] first; a malformed number coerces to `0`.
///
/// - `string`: percent-decoded, `""` stays `""`
/// - `number`: `""` → `0`, otherwise the integer part (`"1.9"` → `1`)
/// - `boolean`: `""` → `true` (presence), otherwise `raw == "true"`
/// - arrays: `""` → `[]`, otherwise split on `,` and coerce each element
///
/// # Examples
///
/// ```
/// use trailmark_router::{coerce, ParameterType, ParameterValue};
///
/// assert_eq!(coerce("a%20b", ParameterType::String), ParameterValue::String("a b".into()));
/// assert_eq!(coerce("", ParameterType::Boolean), ParameterValue::Boolean(true));
/// assert_eq!(coerce("3.7", ParameterType::Number), ParameterValue::Number(3));
/// assert_eq!(coerce("1,2", ParameterType::NumberArray), ParameterValue::NumberArray(vec![1, 2]));
/// ```
pub fn coerce(raw: &str, parameter_type: ParameterType) -> ParameterValue {
    match parameter_type {
        ParameterType::String => ParameterValue::String(coerce_string(raw)),
        ParameterType::Number => ParameterValue::Number(coerce_number(raw)),
        ParameterType::Boolean => ParameterValue::Boolean(coerce_boolean(raw)),
        ParameterType::StringArray => {
            ParameterValue::StringArray(split_elements(raw).map(coerce_string).collect())
        }
        ParameterType::NumberArray => {
            ParameterValue::NumberArray(split_elements(raw).map(coerce_number).collect())
        }
        ParameterType::BooleanArray => {
            ParameterValue::BooleanArray(split_elements(raw).map(coerce_boolean).collect())
        }
    }
}

/// Empty raw array → no elements
fn split_elements(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').filter(move |_| !raw.is_empty())
}

fn coerce_string(raw: &str) -> String {
    decode(raw)
}

fn coerce_number(raw: &str) -> i64 {
    parse_integer_part(raw).unwrap_or(0)
}

fn coerce_boolean(raw: &str) -> bool {
    raw.is_empty() || raw == "true"
}

/// Integer part of a number token, sign included
fn parse_integer_part(raw: &str) -> Option<i64> {
    if raw.is_empty() {
        return Some(0);
    }
    let integer = raw.split_once('.').map(|(integer, _)| integer).unwrap_or(raw);
    integer.parse::<i64>().ok()
}

/// Percent-decodes a URL token, keeping the raw text when it is not valid UTF-8
pub fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Percent-encodes a URL token (`encodeURIComponent` character set)
pub fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
