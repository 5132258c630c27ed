use crate::error::ErrorClass;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use thiserror::Error as ThisError;

/// Textual marker distinguishing a batch-local forward reference from a
/// real resource id wherever the two share a string field. In-memory the
/// distinction is the [`BulkTarget`] variant tag; the prefix only appears
/// when a target is rendered as a single string, never on the wire.
pub const BULK_ID_PREFIX: &str = "bulkId:";

///
/// Method
///
/// HTTP operation type of a bulk operation. GET is intentionally absent:
/// bulk operations only express mutations.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        };
        write!(f, "{label}")
    }
}

///
/// BulkTarget
///
/// The resource a bulk operation addresses. Encodes the external-id /
/// bulk-reference exclusivity in the variant tag so "both set" and
/// "neither cleared" states are unrepresentable.
///
/// A bulk reference is a batch-local forward-reference token: it names a
/// resource created by an earlier POST in the same batch, before any
/// backing store has assigned it a real id. Resolution (substituting the
/// created id) is the external executor's job.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum BulkTarget {
    /// Identifier of a resource presumed to already exist.
    ExternalId(String),

    /// Batch-local forward-reference token, stored bare (no prefix).
    BulkRef(String),
}

impl BulkTarget {
    /// Classify a possibly-prefixed id string. `bulkId:qwerty` becomes a
    /// bulk reference with the bare token `qwerty`; anything else is an
    /// external id.
    #[must_use]
    pub fn from_id(id: impl Into<String>) -> Self {
        let id = id.into();
        match id.strip_prefix(BULK_ID_PREFIX) {
            Some(token) => Self::BulkRef(token.to_string()),
            None => Self::ExternalId(id),
        }
    }

    /// The bare token, whichever variant is set.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::ExternalId(id) | Self::BulkRef(id) => id,
        }
    }

    #[must_use]
    pub const fn is_bulk_ref(&self) -> bool {
        matches!(self, Self::BulkRef(_))
    }
}

impl fmt::Display for BulkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExternalId(id) => write!(f, "{id}"),
            Self::BulkRef(token) => write!(f, "{BULK_ID_PREFIX}{token}"),
        }
    }
}

///
/// BulkError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum BulkError {
    #[error("'data' is required for a {0} bulk operation")]
    MissingData(Method),

    #[error("'path' must not be empty")]
    EmptyPath,

    #[error("resource id must not be empty for a {0} bulk operation")]
    EmptyId(Method),

    #[error("no external id is set; nothing to reinterpret as a bulk reference")]
    NoExternalId,
}

impl BulkError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingData(_) | Self::EmptyPath | Self::EmptyId(_) => {
                ErrorClass::InvalidArgument
            }
            Self::NoExternalId => ErrorClass::InvalidState,
        }
    }
}

///
/// BulkOperation
///
/// A single requested mutation inside a bulk request.
///
/// `method`, `path` and `data` are fixed at construction; the target and
/// version are configured through builder-style mutators that consume and
/// return the value, so a configured operation can be shared across a
/// batch without aliasing surprises. The invariant table:
///
/// | method | data      | target                         |
/// |--------|-----------|--------------------------------|
/// | POST   | required  | none; may acquire a bulk ref   |
/// | PUT    | required  | external id or bulk ref        |
/// | PATCH  | required  | external id or bulk ref        |
/// | DELETE | forbidden | optional; may be a bulk ref    |
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BulkOperation {
    method: Method,
    path: String,
    target: Option<BulkTarget>,
    version: Option<String>,
    data: Option<JsonValue>,
}

impl BulkOperation {
    pub(crate) const fn new(
        method: Method,
        path: String,
        target: Option<BulkTarget>,
        version: Option<String>,
        data: Option<JsonValue>,
    ) -> Self {
        Self {
            method,
            path,
            target,
            version,
            data,
        }
    }

    fn require_path(path: &str) -> Result<(), BulkError> {
        if path.is_empty() {
            return Err(BulkError::EmptyPath);
        }

        Ok(())
    }

    fn require_data(method: Method, data: &JsonValue) -> Result<(), BulkError> {
        if data.is_null() {
            return Err(BulkError::MissingData(method));
        }

        Ok(())
    }

    /// Create a POST operation.
    ///
    /// POST operations take no resource id: the id is assigned by the
    /// service provider and cannot be known beforehand. To let later
    /// operations in the same batch reference the created resource, attach
    /// a bulk reference:
    ///
    /// ```ignore
    /// let op = BulkOperation::post("/Users", data)?.with_bulk_ref(Some("qwerty"));
    /// ```
    pub fn post(path: impl Into<String>, data: impl Into<JsonValue>) -> Result<Self, BulkError> {
        let (path, data) = (path.into(), data.into());
        Self::require_path(&path)?;
        Self::require_data(Method::Post, &data)?;

        Ok(Self::new(Method::Post, path, None, None, Some(data)))
    }

    /// Create a PUT operation targeting `id`.
    ///
    /// If `id` is itself a batch-local forward reference, call
    /// [`into_bulk_ref`](Self::into_bulk_ref) on the result.
    pub fn put(
        path: impl Into<String>,
        id: impl Into<String>,
        data: impl Into<JsonValue>,
    ) -> Result<Self, BulkError> {
        Self::update(Method::Put, path.into(), id.into(), data.into())
    }

    /// Create a PATCH operation targeting `id`.
    ///
    /// If `id` is itself a batch-local forward reference, call
    /// [`into_bulk_ref`](Self::into_bulk_ref) on the result.
    pub fn patch(
        path: impl Into<String>,
        id: impl Into<String>,
        data: impl Into<JsonValue>,
    ) -> Result<Self, BulkError> {
        Self::update(Method::Patch, path.into(), id.into(), data.into())
    }

    fn update(
        method: Method,
        path: String,
        id: String,
        data: JsonValue,
    ) -> Result<Self, BulkError> {
        Self::require_path(&path)?;
        Self::require_data(method, &data)?;
        if id.is_empty() {
            return Err(BulkError::EmptyId(method));
        }

        Ok(Self::new(
            method,
            path,
            Some(BulkTarget::ExternalId(id)),
            None,
            Some(data),
        ))
    }

    /// Create a DELETE operation. The payload is structurally absent; the
    /// id is optional and, like PUT/PATCH ids, may later be reinterpreted
    /// as a bulk reference.
    pub fn delete(path: impl Into<String>, id: Option<String>) -> Result<Self, BulkError> {
        let path = path.into();
        Self::require_path(&path)?;
        if matches!(&id, Some(id) if id.is_empty()) {
            return Err(BulkError::EmptyId(Method::Delete));
        }

        Ok(Self::new(
            Method::Delete,
            path,
            id.map(BulkTarget::ExternalId),
            None,
            None,
        ))
    }

    /// Attach a bulk reference, replacing any external id. `None` is a
    /// no-op and leaves the current target untouched. The token is stored
    /// bare; a `bulkId:` prefix supplied by the caller is stripped.
    #[must_use]
    pub fn with_bulk_ref(mut self, token: Option<impl Into<String>>) -> Self {
        if let Some(token) = token {
            self.target = Some(BulkTarget::from_id(token.into()).into_bulk_ref());
        }

        self
    }

    /// Reinterpret the current external id as a bulk reference. Intended
    /// for PUT/PATCH/DELETE operations whose target was itself created
    /// earlier in the batch. Fails when no external id is set, including
    /// when the target is already a bulk reference.
    pub fn into_bulk_ref(mut self) -> Result<Self, BulkError> {
        match self.target {
            Some(BulkTarget::ExternalId(id)) => {
                self.target = Some(BulkTarget::from_id(id).into_bulk_ref());
                Ok(self)
            }
            Some(BulkTarget::BulkRef(_)) | None => Err(BulkError::NoExternalId),
        }
    }

    /// Set or clear the optimistic-concurrency token. No validation; the
    /// token is opaque to this model.
    #[must_use]
    pub fn with_version(mut self, version: Option<impl Into<String>>) -> Self {
        self.version = version.map(Into::into);
        self
    }

    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn target(&self) -> Option<&BulkTarget> {
        self.target.as_ref()
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    #[must_use]
    pub const fn data(&self) -> Option<&JsonValue> {
        self.data.as_ref()
    }

    /// The bare token of whichever target variant is set. The single read
    /// accessor an executor uses to learn what resource this operation
    /// addresses; [`target`](Self::target) exposes the variant for
    /// executors deciding between a store lookup and a batch-local
    /// substitution.
    #[must_use]
    pub fn effective_id(&self) -> Option<&str> {
        self.target.as_ref().map(BulkTarget::id)
    }
}

impl BulkTarget {
    // Reinterpret any variant as a bulk reference, keeping the bare token.
    fn into_bulk_ref(self) -> Self {
        match self {
            Self::ExternalId(id) => Self::BulkRef(id),
            bulk_ref @ Self::BulkRef(_) => bulk_ref,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;
    use serde_json::json;

    fn user_data() -> JsonValue {
        json!({
            "schemas": ["urn:ietf:params:scim:schemas:core:2.0:User"],
            "userName": "Kratos"
        })
    }

    #[test]
    fn post_requires_data() {
        let err = BulkOperation::post("/Users", JsonValue::Null).unwrap_err();

        assert_eq!(err, BulkError::MissingData(Method::Post));
        assert_eq!(err.class(), ErrorClass::InvalidArgument);
    }

    #[test]
    fn put_and_patch_require_data() {
        for (method, result) in [
            (
                Method::Put,
                BulkOperation::put("/Users", "42", JsonValue::Null),
            ),
            (
                Method::Patch,
                BulkOperation::patch("/Users", "42", JsonValue::Null),
            ),
        ] {
            assert_eq!(result.unwrap_err(), BulkError::MissingData(method));
        }
    }

    #[test]
    fn update_factories_require_an_id() {
        let err = BulkOperation::put("/Users", "", user_data()).unwrap_err();

        assert_eq!(err, BulkError::EmptyId(Method::Put));
    }

    #[test]
    fn factories_require_a_path() {
        let err = BulkOperation::post("", user_data()).unwrap_err();

        assert_eq!(err, BulkError::EmptyPath);
    }

    #[test]
    fn delete_carries_no_data() {
        let op = BulkOperation::delete("/Users/42", Some("42".to_string())).unwrap();

        assert_eq!(op.method(), Method::Delete);
        assert_eq!(op.data(), None);
        assert_eq!(op.effective_id(), Some("42"));
    }

    #[test]
    fn delete_id_is_optional() {
        let op = BulkOperation::delete("/Users/42", None).unwrap();

        assert_eq!(op.effective_id(), None);
    }

    #[test]
    fn bulk_ref_none_is_a_no_op() {
        let op = BulkOperation::put("/Users", "42", user_data())
            .unwrap()
            .with_bulk_ref(None::<String>);

        assert_eq!(op.effective_id(), Some("42"));
        assert_eq!(op.target(), Some(&BulkTarget::ExternalId("42".to_string())));
    }

    #[test]
    fn bulk_ref_replaces_external_id() {
        let op = BulkOperation::put("/Users", "42", user_data())
            .unwrap()
            .with_bulk_ref(Some("qwerty"));

        assert_eq!(op.effective_id(), Some("qwerty"));
        assert_eq!(
            op.target(),
            Some(&BulkTarget::BulkRef("qwerty".to_string()))
        );
    }

    #[test]
    fn bulk_ref_token_is_stored_bare() {
        let op = BulkOperation::post("/Users", user_data())
            .unwrap()
            .with_bulk_ref(Some("bulkId:qwerty"));

        assert_eq!(op.effective_id(), Some("qwerty"));
        assert_eq!(op.target().unwrap().to_string(), "bulkId:qwerty");
    }

    #[test]
    fn into_bulk_ref_moves_the_external_id() {
        let op = BulkOperation::put("/Users", "42", user_data())
            .unwrap()
            .into_bulk_ref()
            .unwrap();

        assert_eq!(op.target(), Some(&BulkTarget::BulkRef("42".to_string())));
        assert_eq!(op.effective_id(), Some("42"));
    }

    #[test]
    fn into_bulk_ref_strips_a_caller_supplied_prefix() {
        let op = BulkOperation::delete("/Users/x", Some("bulkId:asdf".to_string()))
            .unwrap()
            .into_bulk_ref()
            .unwrap();

        assert_eq!(op.target(), Some(&BulkTarget::BulkRef("asdf".to_string())));
    }

    #[test]
    fn into_bulk_ref_requires_an_external_id() {
        let err = BulkOperation::post("/Users", user_data())
            .unwrap()
            .into_bulk_ref()
            .unwrap_err();

        assert_eq!(err, BulkError::NoExternalId);
        assert_eq!(err.class(), ErrorClass::InvalidState);

        // A second reinterpretation fails too: the external id is gone.
        let err = BulkOperation::put("/Users", "42", user_data())
            .unwrap()
            .into_bulk_ref()
            .unwrap()
            .into_bulk_ref()
            .unwrap_err();

        assert_eq!(err, BulkError::NoExternalId);
    }

    #[test]
    fn version_sets_and_clears() {
        let op = BulkOperation::post("/Users", user_data())
            .unwrap()
            .with_version(Some("W/\"e180ee84f0671b1\""));
        assert_eq!(op.version(), Some("W/\"e180ee84f0671b1\""));

        let op = op.with_version(None::<String>);
        assert_eq!(op.version(), None);
    }

    #[test]
    fn target_renders_with_the_prefix_only_for_bulk_refs() {
        assert_eq!(BulkTarget::from_id("42").to_string(), "42");
        assert_eq!(
            BulkTarget::from_id("bulkId:qwerty"),
            BulkTarget::BulkRef("qwerty".to_string())
        );
        assert_eq!(
            BulkTarget::BulkRef("qwerty".to_string()).to_string(),
            "bulkId:qwerty"
        );
    }
}
