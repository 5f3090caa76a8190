use std::fmt;

use dto_core::{ApiObject, FieldSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Broad class of an API error; decides whether a request may be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    InvalidRequest,
    Authentication,
    NotFound,
    Conflict,
    RateLimited,
    Api,
}

impl ApiErrorKind {
    /// Whether the same request can succeed if sent again later.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Conflict | Self::RateLimited | Self::Api)
    }
}

/// One invalid parameter in a rejected request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorDetail {
    pub field: String,
    pub issue: String,
}

impl ApiObject for ErrorDetail {
    const TYPE_NAME: &'static str = "ErrorDetail";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::json("field", "field"),
        FieldSpec::json("issue", "issue"),
    ];
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub kind: ApiErrorKind,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,
}

impl ApiObject for ApiError {
    const TYPE_NAME: &'static str = "ApiError";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::json("kind", "type"),
        FieldSpec::json("code", "code"),
        FieldSpec::json("message", "message"),
        FieldSpec::json("details", "details"),
        FieldSpec::json("request_id", "request_id"),
        FieldSpec::json("doc_url", "doc_url"),
    ];
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(request_id) = &self.request_id {
            write!(f, " (request {request_id})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}
