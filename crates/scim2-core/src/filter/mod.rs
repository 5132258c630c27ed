pub mod matcher;
pub mod render;
pub mod visitor;

#[cfg(test)]
mod tests;

pub use matcher::ResourceMatcher;
pub use render::FilterRenderer;
pub use visitor::{FilterVisitor, UnsupportedFilter};

use crate::{error::ErrorClass, path::AttributePath};
use serde_json::Value as JsonValue;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Filter AST
///
/// Pure representation of SCIM comparison filters. This layer carries no
/// grammar, schema validation, or matching semantics. All interpretation
/// happens in visitors behind the [`FilterVisitor`] dispatch protocol:
///
/// - rendering to filter text
/// - in-memory resource matching
/// - whatever translators the host plugs in (SQL, LDAP, ...)
///

///
/// FilterKind
///
/// Operator discriminant. `Display` renders the SCIM operator token.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum FilterKind {
    Equal = 0x01,
    NotEqual = 0x02,
    Contains = 0x03,
    StartsWith = 0x04,
    EndsWith = 0x05,
    GreaterThan = 0x06,
    GreaterOrEqual = 0x07,
    LessThan = 0x08,
    LessOrEqual = 0x09,
}

impl FilterKind {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// The operator token as it appears in SCIM filter text.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Equal => "eq",
            Self::NotEqual => "ne",
            Self::Contains => "co",
            Self::StartsWith => "sw",
            Self::EndsWith => "ew",
            Self::GreaterThan => "gt",
            Self::GreaterOrEqual => "ge",
            Self::LessThan => "lt",
            Self::LessOrEqual => "le",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

///
/// ComparisonFilter
///
/// The (attribute path, literal value) pair every comparison variant
/// carries. Immutable; equality and hashing are structural over the pair.
/// The operator kind deliberately lives in the [`Filter`] variant tag, not
/// here, so identical pairs under different operators never compare equal.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ComparisonFilter {
    attribute_path: AttributePath,
    comparison_value: JsonValue,
}

impl ComparisonFilter {
    /// Construct a comparison payload. JSON `null` is a legitimate
    /// comparison value; it is a value in this model, not an absent field.
    #[must_use]
    pub fn new(attribute_path: AttributePath, comparison_value: impl Into<JsonValue>) -> Self {
        Self {
            attribute_path,
            comparison_value: comparison_value.into(),
        }
    }

    #[must_use]
    pub const fn attribute_path(&self) -> &AttributePath {
        &self.attribute_path
    }

    #[must_use]
    pub const fn comparison_value(&self) -> &JsonValue {
        &self.comparison_value
    }
}

///
/// Filter
///
/// One variant per comparison operator, each carrying a
/// [`ComparisonFilter`] payload. Keeping the operator in the variant tag
/// makes dispatch static per node and keeps cross-operator equality false
/// by construction.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Filter {
    Equal(ComparisonFilter),
    NotEqual(ComparisonFilter),
    Contains(ComparisonFilter),
    StartsWith(ComparisonFilter),
    EndsWith(ComparisonFilter),
    GreaterThan(ComparisonFilter),
    GreaterOrEqual(ComparisonFilter),
    LessThan(ComparisonFilter),
    LessOrEqual(ComparisonFilter),
}

impl Filter {
    #[must_use]
    pub fn eq(path: AttributePath, value: impl Into<JsonValue>) -> Self {
        Self::Equal(ComparisonFilter::new(path, value))
    }

    #[must_use]
    pub fn ne(path: AttributePath, value: impl Into<JsonValue>) -> Self {
        Self::NotEqual(ComparisonFilter::new(path, value))
    }

    #[must_use]
    pub fn co(path: AttributePath, value: impl Into<JsonValue>) -> Self {
        Self::Contains(ComparisonFilter::new(path, value))
    }

    #[must_use]
    pub fn sw(path: AttributePath, value: impl Into<JsonValue>) -> Self {
        Self::StartsWith(ComparisonFilter::new(path, value))
    }

    #[must_use]
    pub fn ew(path: AttributePath, value: impl Into<JsonValue>) -> Self {
        Self::EndsWith(ComparisonFilter::new(path, value))
    }

    #[must_use]
    pub fn gt(path: AttributePath, value: impl Into<JsonValue>) -> Self {
        Self::GreaterThan(ComparisonFilter::new(path, value))
    }

    #[must_use]
    pub fn ge(path: AttributePath, value: impl Into<JsonValue>) -> Self {
        Self::GreaterOrEqual(ComparisonFilter::new(path, value))
    }

    #[must_use]
    pub fn lt(path: AttributePath, value: impl Into<JsonValue>) -> Self {
        Self::LessThan(ComparisonFilter::new(path, value))
    }

    #[must_use]
    pub fn le(path: AttributePath, value: impl Into<JsonValue>) -> Self {
        Self::LessOrEqual(ComparisonFilter::new(path, value))
    }

    /// Operator discriminant of this node.
    #[must_use]
    pub const fn kind(&self) -> FilterKind {
        match self {
            Self::Equal(_) => FilterKind::Equal,
            Self::NotEqual(_) => FilterKind::NotEqual,
            Self::Contains(_) => FilterKind::Contains,
            Self::StartsWith(_) => FilterKind::StartsWith,
            Self::EndsWith(_) => FilterKind::EndsWith,
            Self::GreaterThan(_) => FilterKind::GreaterThan,
            Self::GreaterOrEqual(_) => FilterKind::GreaterOrEqual,
            Self::LessThan(_) => FilterKind::LessThan,
            Self::LessOrEqual(_) => FilterKind::LessOrEqual,
        }
    }

    /// The comparison payload, independent of operator kind.
    #[must_use]
    pub const fn comparison(&self) -> &ComparisonFilter {
        match self {
            Self::Equal(f)
            | Self::NotEqual(f)
            | Self::Contains(f)
            | Self::StartsWith(f)
            | Self::EndsWith(f)
            | Self::GreaterThan(f)
            | Self::GreaterOrEqual(f)
            | Self::LessThan(f)
            | Self::LessOrEqual(f) => f,
        }
    }

    /// Double dispatch: invoke the visitor method matching this node's
    /// variant. Dispatch failures surface as the visitor's error; they are
    /// never swallowed here.
    pub fn accept<P, V>(&self, visitor: &mut V, param: &mut P) -> Result<V::Output, V::Error>
    where
        V: FilterVisitor<P>,
    {
        match self {
            Self::Equal(f) => visitor.visit_equal(f, param),
            Self::NotEqual(f) => visitor.visit_not_equal(f, param),
            Self::Contains(f) => visitor.visit_contains(f, param),
            Self::StartsWith(f) => visitor.visit_starts_with(f, param),
            Self::EndsWith(f) => visitor.visit_ends_with(f, param),
            Self::GreaterThan(f) => visitor.visit_greater_than(f, param),
            Self::GreaterOrEqual(f) => visitor.visit_greater_or_equal(f, param),
            Self::LessThan(f) => visitor.visit_less_than(f, param),
            Self::LessOrEqual(f) => visitor.visit_less_or_equal(f, param),
        }
    }
}

///
/// FilterError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FilterError {
    #[error("attribute path must not be empty")]
    EmptyAttributePath,

    #[error(transparent)]
    Unsupported(#[from] UnsupportedFilter),
}

impl FilterError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::EmptyAttributePath => ErrorClass::InvalidArgument,
            Self::Unsupported(_) => ErrorClass::Unsupported,
        }
    }
}
