use crate::filter::{ComparisonFilter, Filter, FilterError, FilterVisitor};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;

/// Evaluate a filter node against an in-memory JSON resource.
pub fn matches(filter: &Filter, resource: &JsonValue) -> Result<bool, FilterError> {
    filter.accept(&mut ResourceMatcher::new(resource), &mut ())
}

///
/// ResourceMatcher
///
/// In-memory matcher consumer of the visitor protocol. The attribute path
/// is resolved segment-by-segment through JSON objects; a missing
/// attribute or a type-mismatched comparison fails the match (`false`), it
/// does not error. Ordering is defined for numbers (as f64) and strings
/// (lexicographic, which covers ISO-8601 timestamps); the substring
/// operators apply to strings only. Matching is case-sensitive.
///

#[derive(Clone, Copy, Debug)]
pub struct ResourceMatcher<'a> {
    resource: &'a JsonValue,
}

impl<'a> ResourceMatcher<'a> {
    #[must_use]
    pub const fn new(resource: &'a JsonValue) -> Self {
        Self { resource }
    }

    /// Resolve the filter's attribute path against the resource.
    fn attribute(&self, filter: &ComparisonFilter) -> Option<&'a JsonValue> {
        let mut current = self.resource;
        for segment in filter.attribute_path().segments() {
            current = current.as_object()?.get(segment)?;
        }

        Some(current)
    }

    // Evaluate an attribute predicate only when the attribute is present.
    fn on_present(&self, filter: &ComparisonFilter, f: impl FnOnce(&JsonValue) -> bool) -> bool {
        match self.attribute(filter) {
            Some(value) => f(value),
            None => false,
        }
    }

    fn ordered(&self, filter: &ComparisonFilter, accept: impl Fn(Ordering) -> bool) -> bool {
        self.on_present(filter, |value| {
            compare_values(value, filter.comparison_value()).is_some_and(accept)
        })
    }

    fn on_str(&self, filter: &ComparisonFilter, accept: impl Fn(&str, &str) -> bool) -> bool {
        self.on_present(filter, |value| {
            match (value.as_str(), filter.comparison_value().as_str()) {
                (Some(attribute), Some(literal)) => accept(attribute, literal),
                _ => false,
            }
        })
    }
}

/// Total order over comparable JSON scalars, `None` where the filter
/// grammar defines no ordering (mixed types, booleans, nulls, composites).
fn compare_values(a: &JsonValue, b: &JsonValue) -> Option<Ordering> {
    match (a, b) {
        (JsonValue::Number(x), JsonValue::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (JsonValue::String(x), JsonValue::String(y)) => Some(x.as_str().cmp(y.as_str())),
        _ => None,
    }
}

impl FilterVisitor for ResourceMatcher<'_> {
    type Output = bool;
    type Error = FilterError;

    fn visit_equal(&mut self, filter: &ComparisonFilter, _: &mut ()) -> Result<bool, FilterError> {
        Ok(self.on_present(filter, |value| value == filter.comparison_value()))
    }

    fn visit_not_equal(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<bool, FilterError> {
        Ok(self.on_present(filter, |value| value != filter.comparison_value()))
    }

    fn visit_contains(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<bool, FilterError> {
        Ok(self.on_str(filter, |attribute, literal| attribute.contains(literal)))
    }

    fn visit_starts_with(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<bool, FilterError> {
        Ok(self.on_str(filter, |attribute, literal| attribute.starts_with(literal)))
    }

    fn visit_ends_with(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<bool, FilterError> {
        Ok(self.on_str(filter, |attribute, literal| attribute.ends_with(literal)))
    }

    fn visit_greater_than(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<bool, FilterError> {
        Ok(self.ordered(filter, Ordering::is_gt))
    }

    fn visit_greater_or_equal(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<bool, FilterError> {
        Ok(self.ordered(filter, Ordering::is_ge))
    }

    fn visit_less_than(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<bool, FilterError> {
        Ok(self.ordered(filter, Ordering::is_lt))
    }

    fn visit_less_or_equal(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<bool, FilterError> {
        Ok(self.ordered(filter, Ordering::is_le))
    }
}
