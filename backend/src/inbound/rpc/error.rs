//! Twirp error envelope.
//!
//! RPC failures are answered with the Twirp JSON error shape
//! (`{"code": "...", "msg": "..."}`) and the HTTP status the code dictates.
//! Storage errors map onto Twirp codes here; handlers only ever deal in
//! typed errors.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use crate::domain::ports::BannerRepositoryError;

/// Subset of Twirp error codes this service produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwirpErrorCode {
    /// The request body could not be decoded.
    Malformed,
    /// A request argument failed validation.
    InvalidArgument,
    /// The requested entity does not exist.
    NotFound,
    /// A backing store could not be reached; safe to retry.
    Unavailable,
    /// Something unexpected broke inside the service.
    Internal,
}

impl TwirpErrorCode {
    /// HTTP status the Twirp protocol mandates for this code.
    pub fn status(self) -> StatusCode {
        match self {
            Self::Malformed | Self::InvalidArgument => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A Twirp wire error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwirpError {
    code: TwirpErrorCode,
    msg: String,
}

impl TwirpError {
    /// Create an error with the given code and message.
    pub fn new(code: TwirpErrorCode, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
        }
    }

    /// The wire code.
    pub fn code(&self) -> TwirpErrorCode {
        self.code
    }

    /// The wire message.
    pub fn msg(&self) -> &str {
        self.msg.as_str()
    }

    /// Invalid-argument error for a required field that was not provided.
    pub fn required_argument(argument: &str) -> Self {
        Self::new(
            TwirpErrorCode::InvalidArgument,
            format!("{argument} is required"),
        )
    }

    /// Malformed-body error, produced when request JSON fails to decode.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::new(TwirpErrorCode::Malformed, msg)
    }

    /// Internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(TwirpErrorCode::Internal, msg)
    }
}

impl std::fmt::Display for TwirpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl std::error::Error for TwirpError {}

impl ResponseError for TwirpError {
    fn status_code(&self) -> StatusCode {
        self.code.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

impl From<BannerRepositoryError> for TwirpError {
    fn from(err: BannerRepositoryError) -> Self {
        let code = match err {
            BannerRepositoryError::NotFound { .. } => TwirpErrorCode::NotFound,
            BannerRepositoryError::Connection { .. } => TwirpErrorCode::Unavailable,
            BannerRepositoryError::Query { .. } => TwirpErrorCode::Internal,
        };
        Self::new(code, err.to_string())
    }
}
