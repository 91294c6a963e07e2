//! Admission response types.
//!
//! [`AdmissionResponse`] is the canonical decision record. Denied responses
//! always carry a client-error code and a message; allowed responses carry
//! the success status and whatever warnings the validator produced.

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Reason token for a plain validation failure.
pub const REASON_FORBIDDEN: &str = "Forbidden";
/// Reason token for a request whose objects could not be decoded.
pub const REASON_BAD_REQUEST: &str = "BadRequest";
/// Reason token for a field-level validation failure.
pub const REASON_INVALID: &str = "Invalid";

/// Machine-readable outcome attached to every response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub code: u16,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl Status {
    pub fn new(code: StatusCode, reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.as_u16(),
            reason: reason.into(),
            message: message.into(),
        }
    }

    /// 200 with no reason or message.
    pub fn success() -> Self {
        Self::new(StatusCode::OK, "", "")
    }

    pub fn is_success(&self) -> bool {
        StatusCode::from_u16(self.code)
            .map(|code| code.is_success())
            .unwrap_or(false)
    }
}

/// The allow/deny decision returned for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionResponse {
    pub uid: String,
    pub allowed: bool,
    pub result: Status,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AdmissionResponse {
    /// Build a response from an explicit status, with no warnings.
    pub fn from_status(allowed: bool, status: Status) -> Self {
        Self {
            uid: String::new(),
            allowed,
            result: status,
            warnings: Vec::new(),
        }
    }

    /// Admit the request.
    pub fn allowed() -> Self {
        Self::from_status(true, Status::success())
    }

    /// Deny the request as forbidden with the given message.
    pub fn denied(message: impl Into<String>) -> Self {
        Self::from_status(
            false,
            Status::new(StatusCode::FORBIDDEN, REASON_FORBIDDEN, message),
        )
    }

    /// Deny the request because it could not be processed at all.
    pub fn errored(
        code: StatusCode,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::from_status(false, Status::new(code, reason, message))
    }

    /// Deny a malformed request (400).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::errored(StatusCode::BAD_REQUEST, REASON_BAD_REQUEST, message)
    }

    /// Append warnings, keeping their order and any duplicates.
    pub fn with_warnings<I, S>(mut self, warnings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.warnings.extend(warnings.into_iter().map(Into::into));
        self
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }
}
