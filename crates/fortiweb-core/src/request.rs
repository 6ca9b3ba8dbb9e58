//! Request descriptors and the typed/raw request split.
//!
//! Every operation is reduced to a [`RequestDescriptor`] before anything is
//! sent. Typed requests implement [`ResourceRequest`] and get their path and
//! body assembled from fields; [`RawRequest`] carries a caller-built JSON
//! document through untouched. Both are [`ApplianceRequest`]s and go through
//! the same [`submit`] routine.

use tracing::debug;

use crate::body::JsonFields;
use crate::error::Result;
use crate::transport::{RawResponse, Transport};
use crate::types::ResourceKind;

/// HTTP methods used by the appliance API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Read
    Get,
    /// Create
    Post,
    /// Delete
    Delete,
}

impl HttpMethod {
    /// Method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// One request, fully resolved: method, path and optional JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the API prefix
    pub path: String,
    /// JSON body, if any
    pub body: Option<String>,
}

impl RequestDescriptor {
    /// Describe a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    /// Describe a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body.into()),
        }
    }

    /// Describe a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Delete,
            path: path.into(),
            body: None,
        }
    }

    /// Execute the request. The response is returned whatever its status.
    pub async fn send(self, transport: &dyn Transport) -> Result<RawResponse> {
        debug!(method = self.method.as_str(), path = %self.path, "Sending FortiWeb request");

        match self.method {
            HttpMethod::Get => transport.get(&self.path).await,
            HttpMethod::Post => {
                transport
                    .post(&self.path, self.body.unwrap_or_default())
                    .await
            }
            HttpMethod::Delete => transport.delete(&self.path).await,
        }
    }
}

/// Anything that can be turned into a request descriptor.
pub trait ApplianceRequest {
    /// Resolve the request. Fails before any I/O if the body cannot be encoded.
    fn descriptor(&self) -> Result<RequestDescriptor>;
}

/// A typed create request for one resource kind.
pub trait ResourceRequest {
    /// Kind of object the request creates.
    const KIND: ResourceKind;

    /// Name of the parent object for nested kinds.
    fn parent(&self) -> Option<&str> {
        None
    }

    /// Assemble the request body.
    fn fields(&self) -> Result<JsonFields>;
}

impl<T> ApplianceRequest for T
where
    T: ResourceRequest,
{
    fn descriptor(&self) -> Result<RequestDescriptor> {
        let body = self.fields()?.to_json()?;
        let path = T::KIND.create_path(self.parent())?;
        Ok(RequestDescriptor::post(path, body))
    }
}

/// A pre-built JSON document sent exactly as given.
///
/// No validation or name sanitization is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawJson(String);

impl RawJson {
    /// Wrap JSON text.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    /// The wrapped text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<serde_json::Value> for RawJson {
    fn from(value: serde_json::Value) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RawJson {
    fn from(body: String) -> Self {
        Self(body)
    }
}

impl From<&str> for RawJson {
    fn from(body: &str) -> Self {
        Self(body.to_string())
    }
}

/// Create request with a caller-built body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    kind: ResourceKind,
    parent: Option<String>,
    body: RawJson,
}

impl RawRequest {
    /// Create a raw request for a flat resource kind.
    #[must_use]
    pub fn new(kind: ResourceKind, body: RawJson) -> Self {
        Self {
            kind,
            parent: None,
            body,
        }
    }

    /// Set the parent object name, used verbatim in the path.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

impl ApplianceRequest for RawRequest {
    fn descriptor(&self) -> Result<RequestDescriptor> {
        let path = self.kind.create_path_verbatim(self.parent.as_deref())?;
        Ok(RequestDescriptor::post(path, self.body.as_str()))
    }
}

/// Delete request for a named object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    kind: ResourceKind,
    name: String,
}

impl DeleteRequest {
    /// Delete the object `name` of the given kind.
    #[must_use]
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl ApplianceRequest for DeleteRequest {
    fn descriptor(&self) -> Result<RequestDescriptor> {
        Ok(RequestDescriptor::delete(self.kind.delete_path(&self.name)?))
    }
}

/// Resolve, send and interpret a request.
///
/// Succeeds only when the appliance answers 200.
pub async fn submit<R>(transport: &dyn Transport, request: &R) -> Result<RawResponse>
where
    R: ApplianceRequest + ?Sized,
{
    let descriptor = request.descriptor()?;
    descriptor.send(transport).await?.into_result()
}
