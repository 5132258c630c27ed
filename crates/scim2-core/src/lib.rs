//! Core data model for the SCIM 2 protocol: bulk update batches, the
//! comparison-filter expression tree, and the visitor protocol exported via
//! the `prelude`.
//!
//! This crate is a plain value/aggregate library. It performs no network
//! calls, parses no raw filter text, and persists nothing; executing a bulk
//! request and resolving its forward references is the job of an external
//! executor plugged in behind [`bulk::BulkExecutor`].

// public exports are one module level down
pub mod bulk;
pub mod error;
pub mod filter;
pub mod path;

pub use error::Error;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, wire projections, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        bulk::{BulkExecutor, BulkOperation, BulkRequest, BulkTarget, Method},
        filter::{ComparisonFilter, Filter, FilterKind, FilterVisitor},
        path::AttributePath,
    };
}
