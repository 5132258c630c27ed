use crate::{
    bulk::{BulkError, WireError},
    filter::FilterError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// ErrorClass
///
/// Coarse classification of a structural failure. Stable across error
/// variants so callers can branch on the class without matching every
/// concrete error.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// A factory or constructor was handed an argument it must reject.
    InvalidArgument,

    /// An operation was requested in a state that cannot support it.
    InvalidState,

    /// A dispatch target does not support the node it was handed.
    Unsupported,

    /// Wire input that cannot be mapped onto the in-memory model.
    Malformed,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidArgument => "invalid_argument",
            Self::InvalidState => "invalid_state",
            Self::Unsupported => "unsupported",
            Self::Malformed => "malformed",
        };
        write!(f, "{label}")
    }
}

///
/// Error
///
/// Crate-level error. Each concern keeps its own error enum next to its
/// module; this wrapper exists so seams that cut across concerns (the
/// executor trait, integration callers) have one type to name.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Bulk(#[from] BulkError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Wire(#[from] WireError),
}

impl Error {
    /// Classification of the underlying failure.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Bulk(err) => err.class(),
            Self::Filter(err) => err.class(),
            Self::Wire(err) => err.class(),
        }
    }
}
