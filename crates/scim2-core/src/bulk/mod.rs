pub mod operation;
pub mod request;
pub mod wire;

pub use operation::{BULK_ID_PREFIX, BulkError, BulkOperation, BulkTarget, Method};
pub use request::{BulkExecutor, BulkRequest};
pub use wire::{BULK_REQUEST_SCHEMA_URI, WireError};
