//! Transport-agnostic error payload.
//!
//! Storage and domain failures are expressed with this type; inbound
//! adapters map it to HTTP statuses or RPC error envelopes. The code set
//! mirrors the failure categories the service can actually produce.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::BannerRepositoryError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// A backing store could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the service.
    InternalError,
}

/// Error payload returned by the service core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "not_found")]
    code: ErrorCode,
    #[schema(example = "no banner found with id 7")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    details: Option<Value>,
}

impl Error {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details, when attached.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<BannerRepositoryError> for Error {
    fn from(err: BannerRepositoryError) -> Self {
        match err {
            BannerRepositoryError::NotFound { .. } => Self::not_found(err.to_string()),
            BannerRepositoryError::Connection { .. } => Self::unavailable(err.to_string()),
            BannerRepositoryError::Query { .. } => Self::internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn constructors_set_code_and_message() {
        let err = Error::not_found("no banner found with id 3");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "no banner found with id 3");
        assert!(err.details().is_none());
    }

    #[rstest]
    fn details_are_attached_and_serialised() {
        let err = Error::invalid_request("bad").with_details(json!({ "field": "message" }));
        let value = serde_json::to_value(&err).expect("serialises");
        assert_eq!(value["code"], "invalid_request");
        assert_eq!(value["details"]["field"], "message");
    }

    #[rstest]
    fn details_are_omitted_when_absent() {
        let value = serde_json::to_value(Error::internal("boom")).expect("serialises");
        assert!(value.get("details").is_none());
    }

    #[rstest]
    #[case(BannerRepositoryError::not_found(9), ErrorCode::NotFound)]
    #[case(BannerRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(BannerRepositoryError::query("syntax"), ErrorCode::InternalError)]
    fn repository_errors_map_to_codes(
        #[case] source: BannerRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let err = Error::from(source);
        assert_eq!(err.code(), expected);
    }
}
