use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const UNKNOWN_MESSAGE: &str = "Encountered an unexpected error";

/// Stable error codes written into the JSON body of a rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthErrorCode {
    #[serde(rename = "E_AUTHORIZATION_REQUIRED")]
    Required,
    #[serde(rename = "E_AUTHORIZATION_INVALID_FORMAT")]
    InvalidFormat,
    #[serde(rename = "E_AUTHORIZATION_INVALID_TYPE")]
    InvalidType,
    #[serde(rename = "E_AUTHORIZATION_INVALID_TOKEN")]
    InvalidToken,
    #[serde(rename = "E_UNKNOWN", other)]
    Unknown,
}

impl AuthErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthErrorCode::Required => "E_AUTHORIZATION_REQUIRED",
            AuthErrorCode::InvalidFormat => "E_AUTHORIZATION_INVALID_FORMAT",
            AuthErrorCode::InvalidType => "E_AUTHORIZATION_INVALID_TYPE",
            AuthErrorCode::InvalidToken => "E_AUTHORIZATION_INVALID_TOKEN",
            AuthErrorCode::Unknown => "E_UNKNOWN",
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthErrorCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "E_AUTHORIZATION_REQUIRED" => AuthErrorCode::Required,
            "E_AUTHORIZATION_INVALID_FORMAT" => AuthErrorCode::InvalidFormat,
            "E_AUTHORIZATION_INVALID_TYPE" => AuthErrorCode::InvalidType,
            "E_AUTHORIZATION_INVALID_TOKEN" => AuthErrorCode::InvalidToken,
            _ => AuthErrorCode::Unknown,
        })
    }
}

/// Loosely typed error fields, e.g. a JSON body read back from a 401 response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    pub status: Option<u16>,
    pub code: Option<AuthErrorCode>,
    pub message: Option<String>,
}

/// A rejected `Authorization` header.
///
/// Serializes to `{"status": 401, "code": "E_...", "message": "..."}` and
/// displays as `[AuthorizationHeaderError (E_...) message]`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(from = "ErrorPayload")]
#[error("[AuthorizationHeaderError ({code}) {message}]")]
pub struct AuthError {
    status: u16,
    code: AuthErrorCode,
    message: String,
}

impl AuthError {
    fn unauthorized(code: AuthErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED.as_u16(),
            code,
            message: message.into(),
        }
    }

    pub fn required() -> Self {
        Self::unauthorized(
            AuthErrorCode::Required,
            "No Authorization header is present.",
        )
    }

    pub fn invalid_format() -> Self {
        Self::unauthorized(
            AuthErrorCode::InvalidFormat,
            "Formats should be `Authorization: <type> <token>`.",
        )
    }

    pub fn invalid_type(scheme: &str) -> Self {
        Self::unauthorized(
            AuthErrorCode::InvalidType,
            format!("Authorization of type {scheme} was expected."),
        )
    }

    pub fn invalid_token() -> Self {
        Self::unauthorized(AuthErrorCode::InvalidToken, "Token provided is invalid.")
    }

    /// Builds an error from partial fields. Missing, zero or empty values fall
    /// back to `500 E_UNKNOWN`.
    pub fn from_payload(payload: ErrorPayload) -> Self {
        Self {
            status: payload
                .status
                .filter(|s| *s != 0)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR.as_u16()),
            code: payload.code.unwrap_or(AuthErrorCode::Unknown),
            message: payload
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| UNKNOWN_MESSAGE.to_string()),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn code(&self) -> AuthErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for AuthError {
    fn default() -> Self {
        Self::from_payload(ErrorPayload::default())
    }
}

impl From<ErrorPayload> for AuthError {
    fn from(payload: ErrorPayload) -> Self {
        Self::from_payload(payload)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
