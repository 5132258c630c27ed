use crate::filter::{ComparisonFilter, Filter, FilterError, FilterKind, FilterVisitor};

/// Render a filter node as SCIM filter text.
pub fn render(filter: &Filter) -> Result<String, FilterError> {
    filter.accept(&mut FilterRenderer, &mut ())
}

///
/// FilterRenderer
///
/// Serializes a filter node to SCIM filter text, e.g.
/// `meta.created gt "2023-07-25T08:00:00.000Z"`. The comparison value is
/// rendered as a JSON literal (strings quoted, numbers and booleans bare),
/// which is exactly the literal grammar of the filter language.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct FilterRenderer;

impl FilterRenderer {
    fn line(kind: FilterKind, filter: &ComparisonFilter) -> String {
        format!(
            "{} {kind} {}",
            filter.attribute_path(),
            filter.comparison_value()
        )
    }
}

impl FilterVisitor for FilterRenderer {
    type Output = String;
    type Error = FilterError;

    fn visit_equal(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<String, FilterError> {
        Ok(Self::line(FilterKind::Equal, filter))
    }

    fn visit_not_equal(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<String, FilterError> {
        Ok(Self::line(FilterKind::NotEqual, filter))
    }

    fn visit_contains(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<String, FilterError> {
        Ok(Self::line(FilterKind::Contains, filter))
    }

    fn visit_starts_with(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<String, FilterError> {
        Ok(Self::line(FilterKind::StartsWith, filter))
    }

    fn visit_ends_with(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<String, FilterError> {
        Ok(Self::line(FilterKind::EndsWith, filter))
    }

    fn visit_greater_than(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<String, FilterError> {
        Ok(Self::line(FilterKind::GreaterThan, filter))
    }

    fn visit_greater_or_equal(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<String, FilterError> {
        Ok(Self::line(FilterKind::GreaterOrEqual, filter))
    }

    fn visit_less_than(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<String, FilterError> {
        Ok(Self::line(FilterKind::LessThan, filter))
    }

    fn visit_less_or_equal(
        &mut self,
        filter: &ComparisonFilter,
        _: &mut (),
    ) -> Result<String, FilterError> {
        Ok(Self::line(FilterKind::LessOrEqual, filter))
    }
}
