//! Integration tests for trailmark-router
//!
//! Tests are organized by feature area and cover:
//! - Round trips through href generation and matching
//! - Idempotent registration
//! - Conflict detection
//! - Precedence between query signatures
//! - Query accumulation and percent-encoding

use pretty_assertions::assert_eq;
use rstest::rstest;
use trailmark_router::*;

fn parameters(values: &[(&str, ParameterValue)]) -> Parameters {
    values
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Registers `template` alone, renders it and matches the result back
fn round_trip(template: &str, values: &Parameters) -> (String, RouteMatch) {
    let route_id = RouteId::new(1);
    let tree = RouteTree::new().insert(route_id, template).unwrap();
    let parsed = RouteTemplate::parse(template).unwrap();
    let url = href(&parsed, values).unwrap();
    let found = tree.find(&url).unwrap_or_else(|| panic!("'{}' did not match '{}'", url, template));
    assert_eq!(found.route_id, route_id);
    (url, found)
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_round_trip_typed_path() {
    let values = parameters(&[
        ("stringParam", ParameterValue::String("a".to_string())),
        ("numberParam", ParameterValue::Number(1)),
        ("booleanParam", ParameterValue::Boolean(false)),
    ]);
    let (url, found) = round_trip(
        "root/:stringParam/intermediate/:numberParam:number/:booleanParam:boolean",
        &values,
    );
    assert_eq!(url, "/root/a/intermediate/1/false");
    assert_eq!(found.parameters, values);
}

#[test]
fn test_round_trip_query_string_array() {
    let values = parameters(&[(
        "param",
        ParameterValue::StringArray(strings(&["a", "b", "charlie"])),
    )]);
    let (url, found) = round_trip("root?param:string[]", &values);
    assert_eq!(url, "/root?param=a,b,charlie");
    assert_eq!(found.parameters, values);
}

#[test]
fn test_round_trip_omitted_optional() {
    let values = parameters(&[("requiredParam", ParameterValue::String("value".to_string()))]);
    let (url, found) = round_trip("root/nested?requiredParam[&optionalParam]", &values);
    assert_eq!(url, "/root/nested?requiredParam=value");
    assert_eq!(found.parameters, values);
}

#[rstest]
#[case("", "")]
#[case("", "/")]
#[case("/", "")]
#[case("/", "/")]
fn test_root_templates_match_root_urls(#[case] template: &str, #[case] url: &str) {
    let tree = RouteTree::new().insert(RouteId::new(1), template).unwrap();
    let found = tree.find(url).unwrap();
    assert_eq!(found.route_id, RouteId::new(1));
    assert!(found.parameters.is_empty());
}

#[rstest]
#[case("root/?q", "/root?q=x")]
#[case("root/[?q]", "/root?q=x")]
#[case("/root/:id/?q", "/root/7?q=x")]
fn test_slash_before_query_round_trips(#[case] template: &str, #[case] expected: &str) {
    let mut values = parameters(&[("q", ParameterValue::String("x".to_string()))]);
    if template.contains(":id") {
        values.insert("id".to_string(), ParameterValue::String("7".to_string()));
    }
    let (url, found) = round_trip(template, &values);
    assert_eq!(url, expected);
    assert_eq!(found.parameters, values);
}

#[rstest]
#[case("items/:ids:number[]?tags:string[]", &[("ids", ParameterValue::NumberArray(vec![4])), ("tags", ParameterValue::StringArray(strings(&["x", "y"])))])]
#[case("flags?on:boolean[]", &[("on", ParameterValue::BooleanArray(vec![true, false, true]))])]
#[case("n?values:number[]", &[("values", ParameterValue::NumberArray(vec![-3, 0, 12]))])]
#[case("page/:n:number?q[&sort:boolean]", &[("n", ParameterValue::Number(-9)), ("q", ParameterValue::String("some text".to_string())), ("sort", ParameterValue::Boolean(true))])]
fn test_round_trip_shapes(#[case] template: &str, #[case] values: &[(&str, ParameterValue)]) {
    let values = parameters(values);
    let (_, found) = round_trip(template, &values);
    assert_eq!(found.parameters, values);
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_idempotent_registration() {
    let first = RouteTree::new()
        .insert(RouteId::new(1), "root/:id?q")
        .unwrap();
    let second = first.insert(RouteId::new(1), "root/:id?q").unwrap();
    assert!(RouteTree::ptr_eq(&first, &second));
}

#[rstest]
#[case("root/:nested/child?stringParam", "root/:nested/child?stringParam[&numberParam:number]")]
#[case("root/:nested/child?stringParam[&numberParam:number]", "root/:nested/child?stringParam")]
#[case("root/:a", "root/:b:number")]
#[case("root?x", "root?x")]
fn test_conflicting_templates(#[case] first: &str, #[case] second: &str) {
    let tree = RouteTree::new().insert(RouteId::new(1), first).unwrap();
    let err = tree.insert(RouteId::new(2), second).unwrap_err();
    assert_eq!(
        err,
        RouterError::TemplateConflict {
            existing: first.to_string(),
            incoming: second.to_string(),
        }
    );
    assert!(err.to_string().contains(first));
    assert!(err.to_string().contains(second));
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_disjoint_required_query_sets() {
    let tree = RouteTree::new()
        .insert(RouteId::new(1), "root/:nested/child?stringParam")
        .unwrap()
        .insert(RouteId::new(2), "root/:nested/child?numberParam:number")
        .unwrap();

    let found = tree.find("/root/x/child?stringParam=s").unwrap();
    assert_eq!(found.route_id, RouteId::new(1));
    assert_eq!(found.parameters["nested"], ParameterValue::String("x".to_string()));

    let found = tree.find("/root/x/child?numberParam=5").unwrap();
    assert_eq!(found.route_id, RouteId::new(2));
    assert_eq!(found.parameters["numberParam"], ParameterValue::Number(5));

    assert!(tree.find("/root/x/child").is_none());
    assert!(tree.find("/root/x/child?numberParam=five").is_none());
}

#[test]
fn test_path_only_route_beside_query_routes_on_other_paths() {
    let tree = RouteTree::new()
        .insert(RouteId::new(1), "docs")
        .unwrap()
        .insert(RouteId::new(2), "docs/:page?version:number")
        .unwrap();

    assert_eq!(tree.find("/docs").unwrap().route_id, RouteId::new(1));
    assert_eq!(tree.find("/docs/intro?version=2").unwrap().route_id, RouteId::new(2));
    assert!(tree.find("/docs/intro").is_none());
}

// ============================================================================
// Query parsing and encoding
// ============================================================================

#[test]
fn test_repeated_query_keys_accumulate() {
    let tree = RouteTree::new()
        .insert(RouteId::new(1), "root?queryParam:string[]")
        .unwrap();
    let found = tree.find("/root?queryParam=first&queryParam=second").unwrap();
    assert_eq!(
        found.parameters["queryParam"],
        ParameterValue::StringArray(strings(&["first", "second"]))
    );
}

#[rstest]
#[case("a/b")]
#[case("x=y")]
#[case("why?")]
#[case("one,two")]
#[case("all /=?, together & more")]
fn test_reserved_characters_round_trip(#[case] value: &str) {
    let values = parameters(&[
        ("segment", ParameterValue::String(value.to_string())),
        ("query", ParameterValue::String(value.to_string())),
    ]);
    let (_, found) = round_trip("files/:segment?query", &values);
    assert_eq!(found.parameters, values);
}

#[test]
fn test_reserved_characters_in_query_names() {
    let values = parameters(&[("we/ird=name", ParameterValue::String("v".to_string()))]);
    let (url, found) = round_trip("r?we/ird=name", &values);
    assert_eq!(url, "/r?we%2Fird%3Dname=v");
    assert_eq!(found.parameters, values);
}

#[test]
fn test_query_array_elements_with_commas_round_trip() {
    let values = parameters(&[("tags", ParameterValue::StringArray(strings(&["a,b", "c"])))]);
    let (_, found) = round_trip("r?tags:string[]", &values);
    assert_eq!(found.parameters, values);
}

#[test]
fn test_path_array_does_not_split_back() {
    let values = parameters(&[("tags", ParameterValue::StringArray(strings(&["a", "b"])))]);
    let (url, found) = round_trip("t/:tags:string[]", &values);
    assert_eq!(url, "/t/a%2Cb");
    assert_eq!(
        found.parameters["tags"],
        ParameterValue::StringArray(strings(&["a,b"]))
    );
}

#[test]
fn test_falsy_query_values_fall_back_to_defaults() {
    let values = parameters(&[
        ("flag", ParameterValue::Boolean(false)),
        ("count", ParameterValue::Number(0)),
    ]);
    let (url, found) = round_trip("r[?flag:boolean&count:number]", &values);
    assert_eq!(url, "/r");
    assert!(found.parameters.is_empty());
}

#[test]
fn test_presence_only_boolean_is_true() {
    let tree = RouteTree::new().insert(RouteId::new(1), "r?flag:boolean").unwrap();
    assert_eq!(
        tree.find("/r?flag").unwrap().parameters["flag"],
        ParameterValue::Boolean(true)
    );
}

#[test]
fn test_decimal_number_truncates() {
    let tree = RouteTree::new().insert(RouteId::new(1), "r/:n:number").unwrap();
    assert_eq!(
        tree.find("/r/2.75").unwrap().parameters["n"],
        ParameterValue::Number(2)
    );
}
