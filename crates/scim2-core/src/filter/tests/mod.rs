
use crate::{
    filter::{
        ComparisonFilter, Filter, FilterError, FilterKind, FilterVisitor, UnsupportedFilter,
        matcher, render,
    },
    path::AttributePath,
};
use serde_json::json;
use std::hash::{DefaultHasher, Hash, Hasher};

fn path(s: &str) -> AttributePath {
    AttributePath::new(s).unwrap()
}

fn hash_of(filter: &Filter) -> u64 {
    let mut hasher = DefaultHasher::new();
    filter.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn same_kind_same_tuple_is_equal_and_hashes_identically() {
    let a = Filter::gt(path("meta.created"), json!("2023-07-25T08:00:00.000Z"));
    let b = Filter::gt(path("meta.created"), json!("2023-07-25T08:00:00.000Z"));

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn changing_the_comparison_value_breaks_equality() {
    let a = Filter::gt(path("meta.created"), json!("2023-07-25T08:00:00.000Z"));
    let b = Filter::gt(path("meta.created"), json!("2024-01-01T00:00:00.000Z"));

    assert_ne!(a, b);
}

#[test]
fn equality_never_crosses_operator_kinds() {
    let gt = Filter::gt(path("meta.created"), json!("2023-07-25T08:00:00.000Z"));
    let ge = Filter::ge(path("meta.created"), json!("2023-07-25T08:00:00.000Z"));

    assert_ne!(gt, ge);
    assert_ne!(gt.kind(), ge.kind());
    // The shared payload itself is equal; only the variant tag differs.
    assert_eq!(gt.comparison(), ge.comparison());
}

#[test]
fn kind_reports_the_scim_operator_token() {
    let cases = [
        (Filter::eq(path("a"), json!(1)), "eq"),
        (Filter::ne(path("a"), json!(1)), "ne"),
        (Filter::co(path("a"), json!(1)), "co"),
        (Filter::sw(path("a"), json!(1)), "sw"),
        (Filter::ew(path("a"), json!(1)), "ew"),
        (Filter::gt(path("a"), json!(1)), "gt"),
        (Filter::ge(path("a"), json!(1)), "ge"),
        (Filter::lt(path("a"), json!(1)), "lt"),
        (Filter::le(path("a"), json!(1)), "le"),
    ];

    for (filter, token) in cases {
        assert_eq!(filter.kind().token(), token);
    }
}

#[test]
fn null_is_a_legitimate_comparison_value() {
    let a = Filter::eq(path("nickName"), json!(null));
    let b = Filter::eq(path("nickName"), json!(null));

    assert_eq!(a, b);
    assert!(matcher::matches(&a, &json!({ "nickName": null })).unwrap());
}

///
/// GreaterThanOnly
///
/// Visitor that only understands `gt`, to exercise the fail-closed
/// defaults on every other variant.
///

struct GreaterThanOnly;

impl FilterVisitor for GreaterThanOnly {
    type Output = String;
    type Error = FilterError;

    fn visit_greater_than(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<String, FilterError> {
        Ok(filter.attribute_path().to_string())
    }
}

#[test]
fn dispatch_reaches_the_matching_visit_method() {
    let filter = Filter::gt(path("meta.created"), json!("2023-07-25T08:00:00.000Z"));

    let out = filter.accept(&mut GreaterThanOnly, &mut ()).unwrap();
    assert_eq!(out, "meta.created");
}

#[test]
fn unhandled_variants_fail_closed() {
    let filter = Filter::lt(path("meta.created"), json!("2023-07-25T08:00:00.000Z"));

    let err = filter.accept(&mut GreaterThanOnly, &mut ()).unwrap_err();
    assert_eq!(
        err,
        FilterError::Unsupported(UnsupportedFilter::new(FilterKind::LessThan))
    );
}

#[test]
fn renders_scim_filter_text() {
    let filter = Filter::gt(path("meta.created"), json!("2023-07-25T08:00:00.000Z"));

    assert_eq!(
        render::render(&filter).unwrap(),
        "meta.created gt \"2023-07-25T08:00:00.000Z\""
    );
}

#[test]
fn renders_non_string_literals_bare() {
    assert_eq!(
        render::render(&Filter::ge(path("loginCount"), json!(3))).unwrap(),
        "loginCount ge 3"
    );
    assert_eq!(
        render::render(&Filter::eq(path("active"), json!(true))).unwrap(),
        "active eq true"
    );
}

fn user() -> serde_json::Value {
    json!({
        "userName": "Kratos",
        "active": true,
        "loginCount": 9,
        "meta": { "created": "2023-07-25T08:00:00.000Z" },
    })
}

#[test]
fn matcher_resolves_nested_paths() {
    let after = Filter::gt(path("meta.created"), json!("2023-01-01T00:00:00.000Z"));
    let before = Filter::lt(path("meta.created"), json!("2023-01-01T00:00:00.000Z"));

    assert!(matcher::matches(&after, &user()).unwrap());
    assert!(!matcher::matches(&before, &user()).unwrap());
}

#[test]
fn matcher_orders_numbers_numerically() {
    assert!(matcher::matches(&Filter::ge(path("loginCount"), json!(9)), &user()).unwrap());
    assert!(!matcher::matches(&Filter::gt(path("loginCount"), json!(9)), &user()).unwrap());
    assert!(matcher::matches(&Filter::le(path("loginCount"), json!(9.5)), &user()).unwrap());
}

#[test]
fn matcher_substring_operators_are_string_only() {
    assert!(matcher::matches(&Filter::co(path("userName"), json!("rat")), &user()).unwrap());
    assert!(matcher::matches(&Filter::sw(path("userName"), json!("Kra")), &user()).unwrap());
    assert!(matcher::matches(&Filter::ew(path("userName"), json!("tos")), &user()).unwrap());
    // Non-string attribute: fails the match rather than erroring.
    assert!(!matcher::matches(&Filter::co(path("loginCount"), json!("9")), &user()).unwrap());
}

#[test]
fn matcher_is_case_sensitive() {
    assert!(!matcher::matches(&Filter::eq(path("userName"), json!("kratos")), &user()).unwrap());
}

#[test]
fn missing_attribute_fails_the_match() {
    let filter = Filter::eq(path("displayName"), json!("Kratos"));

    assert!(!matcher::matches(&filter, &user()).unwrap());
}

#[test]
fn type_mismatched_ordering_fails_the_match() {
    let filter = Filter::gt(path("active"), json!(true));

    assert!(!matcher::matches(&filter, &user()).unwrap());
}
