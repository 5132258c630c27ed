use crate::filter::{ComparisonFilter, FilterKind};
use thiserror::Error as ThisError;

///
/// UnsupportedFilter
///
/// A visitor was dispatched a node variant it does not handle. Visitors
/// fail closed: an unhandled variant is a protocol-level failure returned
/// to the caller of the dispatch, never a silently skipped node.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unsupported filter type '{kind}'")]
pub struct UnsupportedFilter {
    pub kind: FilterKind,
}

impl UnsupportedFilter {
    #[must_use]
    pub const fn new(kind: FilterKind) -> Self {
        Self { kind }
    }
}

///
/// FilterVisitor
///
/// Double-dispatch contract over the filter tree. Consumers (renderers,
/// matchers, query translators) implement the variants they understand;
/// every method defaults to failing closed with [`UnsupportedFilter`], so
/// new node variants do not break visitors that do not care about them.
///
/// `P` is caller-supplied traversal state threaded through the dispatch.
///

pub trait FilterVisitor<P = ()> {
    type Output;
    type Error: From<UnsupportedFilter>;

    fn visit_equal(
        &mut self,
        filter: &ComparisonFilter,
        param: &mut P,
    ) -> Result<Self::Output, Self::Error> {
        let _ = (filter, param);
        Err(UnsupportedFilter::new(FilterKind::Equal).into())
    }

    fn visit_not_equal(
        &mut self,
        filter: &ComparisonFilter,
        param: &mut P,
    ) -> Result<Self::Output, Self::Error> {
        let _ = (filter, param);
        Err(UnsupportedFilter::new(FilterKind::NotEqual).into())
    }

    fn visit_contains(
        &mut self,
        filter: &ComparisonFilter,
        param: &mut P,
    ) -> Result<Self::Output, Self::Error> {
        let _ = (filter, param);
        Err(UnsupportedFilter::new(FilterKind::Contains).into())
    }

    fn visit_starts_with(
        &mut self,
        filter: &ComparisonFilter,
        param: &mut P,
    ) -> Result<Self::Output, Self::Error> {
        let _ = (filter, param);
        Err(UnsupportedFilter::new(FilterKind::StartsWith).into())
    }

    fn visit_ends_with(
        &mut self,
        filter: &ComparisonFilter,
        param: &mut P,
    ) -> Result<Self::Output, Self::Error> {
        let _ = (filter, param);
        Err(UnsupportedFilter::new(FilterKind::EndsWith).into())
    }

    fn visit_greater_than(
        &mut self,
        filter: &ComparisonFilter,
        param: &mut P,
    ) -> Result<Self::Output, Self::Error> {
        let _ = (filter, param);
        Err(UnsupportedFilter::new(FilterKind::GreaterThan).into())
    }

    fn visit_greater_or_equal(
        &mut self,
        filter: &ComparisonFilter,
        param: &mut P,
    ) -> Result<Self::Output, Self::Error> {
        let _ = (filter, param);
        Err(UnsupportedFilter::new(FilterKind::GreaterOrEqual).into())
    }

    fn visit_less_than(
        &mut self,
        filter: &ComparisonFilter,
        param: &mut P,
    ) -> Result<Self::Output, Self::Error> {
        let _ = (filter, param);
        Err(UnsupportedFilter::new(FilterKind::LessThan).into())
    }

    fn visit_less_or_equal(
        &mut self,
        filter: &ComparisonFilter,
        param: &mut P,
    ) -> Result<Self::Output, Self::Error> {
        let _ = (filter, param);
        Err(UnsupportedFilter::new(FilterKind::LessOrEqual).into())
    }
}
