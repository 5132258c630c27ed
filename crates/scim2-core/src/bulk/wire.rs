use crate::{
    bulk::{BulkError, BulkOperation, BulkRequest, BulkTarget, Method},
    error::ErrorClass,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use serde_json::Value as JsonValue;
use thiserror::Error as ThisError;

/// Schema URI carried by every bulk request on the wire.
pub const BULK_REQUEST_SCHEMA_URI: &str = "urn:ietf:params:scim:schemas:core:2.0:BulkRequest";

///
/// Wire projections
///
/// Serialization goes through transient projection structs rather than the
/// model types themselves, so that rendering is side-effect-free and the
/// in-memory helper fields the wire must not see (an external id on a
/// PUT/PATCH/DELETE target, the bulk-reference prefix) are suppressed by
/// construction rather than by mutate-and-restore tricks.
///

///
/// WireError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum WireError {
    #[error("bulk request is missing schema '{BULK_REQUEST_SCHEMA_URI}'")]
    UnexpectedSchema,

    #[error("'data' is not allowed for a DELETE bulk operation")]
    UnexpectedData,

    #[error(transparent)]
    Invalid(#[from] BulkError),
}

impl WireError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnexpectedSchema | Self::UnexpectedData => ErrorClass::Malformed,
            Self::Invalid(err) => err.class(),
        }
    }
}

///
/// BulkOperationWire
///
/// `{"method", "path", "bulkId"?, "version"?, "data"?}`. `bulkId` carries
/// the bare forward-reference token, present only when the target is a
/// bulk reference. An external id never appears here: for PUT, PATCH and
/// DELETE the wire carries it embedded in `path`, so it is a contextual
/// helper field, not part of the operation's own wire contract.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct BulkOperationWire {
    method: Method,
    path: String,
    #[serde(rename = "bulkId", default, skip_serializing_if = "Option::is_none")]
    bulk_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl From<&BulkOperation> for BulkOperationWire {
    fn from(operation: &BulkOperation) -> Self {
        let bulk_id = match operation.target() {
            Some(BulkTarget::BulkRef(token)) => Some(token.clone()),
            Some(BulkTarget::ExternalId(_)) | None => None,
        };

        Self {
            method: operation.method(),
            path: operation.path().to_string(),
            bulk_id,
            version: operation.version().map(ToString::to_string),
            data: operation.data().cloned(),
        }
    }
}

impl BulkOperationWire {
    /// Rebuild the model, re-validating the method/payload invariant
    /// table. Nothing partially constructed is ever returned.
    fn into_operation(self) -> Result<BulkOperation, WireError> {
        let Self {
            method,
            path,
            bulk_id,
            version,
            data,
        } = self;

        if path.is_empty() {
            return Err(BulkError::EmptyPath.into());
        }
        match (method, &data) {
            (Method::Delete, Some(_)) => return Err(WireError::UnexpectedData),
            (Method::Delete, None) => {}
            (method, None) => return Err(BulkError::MissingData(method).into()),
            (method, Some(data)) if data.is_null() => {
                return Err(BulkError::MissingData(method).into());
            }
            _ => {}
        }

        Ok(BulkOperation::new(
            method,
            path,
            bulk_id.map(BulkTarget::BulkRef),
            version,
            data,
        ))
    }
}

impl Serialize for BulkOperation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        BulkOperationWire::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BulkOperation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BulkOperationWire::deserialize(deserializer)?
            .into_operation()
            .map_err(D::Error::custom)
    }
}

///
/// BulkRequestWire
///
/// `{"schemas": [...], "failureCount"?, "Operations": [...]}`.
/// `failureCount` is a request-only field and appears only when bounded.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct BulkRequestWire {
    schemas: Vec<String>,
    #[serde(
        rename = "failureCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    failure_count: Option<i64>,
    #[serde(rename = "Operations", default)]
    operations: Vec<BulkOperationWire>,
}

impl From<&BulkRequest> for BulkRequestWire {
    fn from(request: &BulkRequest) -> Self {
        Self {
            schemas: vec![BULK_REQUEST_SCHEMA_URI.to_string()],
            failure_count: request.failure_count().map(i64::from),
            operations: request
                .operations()
                .iter()
                .map(BulkOperationWire::from)
                .collect(),
        }
    }
}

impl BulkRequestWire {
    fn into_request(self) -> Result<BulkRequest, WireError> {
        if !self.schemas.iter().any(|uri| uri == BULK_REQUEST_SCHEMA_URI) {
            return Err(WireError::UnexpectedSchema);
        }

        let mut request = BulkRequest::new();
        for wire in self.operations {
            request.push(wire.into_operation()?);
        }
        // Wire values normalize like the setter: negatives clamp to zero.
        request.set_failure_count(self.failure_count);

        Ok(request)
    }
}

impl Serialize for BulkRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        BulkRequestWire::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BulkRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BulkRequestWire::deserialize(deserializer)?
            .into_request()
            .map_err(D::Error::custom)
    }
}
