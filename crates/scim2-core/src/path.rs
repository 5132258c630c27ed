use crate::filter::FilterError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

///
/// AttributePath
///
/// The attribute a comparison filter targets, e.g. `userName` or
/// `meta.created`. The full SCIM path grammar (value filters, schema URN
/// prefixes) lives in the external parser; this type only guarantees the
/// path is non-empty and exposes its dotted segments to consumers that
/// resolve it against a resource.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct AttributePath(String);

impl AttributePath {
    /// Construct a path, rejecting the empty string.
    pub fn new(path: impl Into<String>) -> Result<Self, FilterError> {
        let path = path.into();
        if path.is_empty() {
            return Err(FilterError::EmptyAttributePath);
        }

        Ok(Self(path))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dotted sub-attribute segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AttributePath {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
