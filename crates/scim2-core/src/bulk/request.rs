use crate::bulk::BulkOperation;
use std::slice;

///
/// BulkRequest
///
/// An ordered batch of [`BulkOperation`]s plus a failure-count threshold.
///
/// Insertion order is execution-intent order: a bulk reference resolves
/// only to operations earlier in the sequence. The aggregate carries no
/// execution state: dispatching operations, tracking per-operation
/// outcomes, and honoring the failure count at run time all belong to the
/// [`BulkExecutor`] plugged in through [`apply`](Self::apply).
///
/// Single-writer during assembly; once handed to an executor the batch
/// should be treated as complete and not mutated further.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BulkRequest {
    operations: Vec<BulkOperation>,
    failure_count: Option<u32>,
}

impl BulkRequest {
    /// Create an empty batch with an unbounded failure count.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            operations: Vec::new(),
            failure_count: None,
        }
    }

    /// Create a pre-populated batch in the given order.
    #[must_use]
    pub fn from_operations(operations: impl IntoIterator<Item = BulkOperation>) -> Self {
        Self {
            operations: operations.into_iter().collect(),
            failure_count: None,
        }
    }

    /// Append one operation.
    pub fn push(&mut self, operation: BulkOperation) -> &mut Self {
        self.operations.push(operation);
        self
    }

    /// Append operations in argument order. Absent entries are silently
    /// dropped, never stored as holes; an absent sequence is simply the
    /// empty iterator.
    pub fn append(&mut self, operations: impl IntoIterator<Item = Option<BulkOperation>>) -> &mut Self {
        self.operations.extend(operations.into_iter().flatten());
        self
    }

    /// Ordered read view over the batch.
    #[must_use]
    pub fn operations(&self) -> &[BulkOperation] {
        &self.operations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Set the number of failed operations an executor should tolerate
    /// before aborting the remainder of the batch. `None` means unbounded;
    /// negative inputs clamp to zero. Normalization, not an error.
    pub fn set_failure_count(&mut self, failure_count: Option<i64>) -> &mut Self {
        self.failure_count = failure_count.map(|count| u32::try_from(count.max(0)).unwrap_or(u32::MAX));
        self
    }

    /// The failure threshold, `None` when unbounded.
    #[must_use]
    pub const fn failure_count(&self) -> Option<u32> {
        self.failure_count
    }

    /// Hand the batch to an executor strategy. The aggregate itself never
    /// dispatches anything; this is the extension seam only.
    pub fn apply<X>(&self, executor: &mut X) -> Result<X::Outcome, X::Error>
    where
        X: BulkExecutor,
    {
        executor.execute(self)
    }
}

impl<'a> IntoIterator for &'a BulkRequest {
    type Item = &'a BulkOperation;
    type IntoIter = slice::Iter<'a, BulkOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

///
/// BulkExecutor
///
/// Strategy seam for the external executor that dispatches a batch over a
/// transport. Resolving forward references against earlier operations,
/// per-operation retry policy, and failure-count enforcement are all this
/// contract, not the aggregate's.
///

pub trait BulkExecutor {
    type Outcome;
    type Error;

    fn execute(&mut self, request: &BulkRequest) -> Result<Self::Outcome, Self::Error>;
}
