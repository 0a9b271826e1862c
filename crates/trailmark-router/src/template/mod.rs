//! Route template module
//!
//! Contains the template data model and its parser. All functions are pure:
//! a template string always parses to the same [`RouteTemplate`].

pub mod parser;
pub mod segment;

pub use parser::{classify_segment, parse_param_with_type};
pub use segment::{PathSegment, QueryParameterSpec, RouteTemplate};
