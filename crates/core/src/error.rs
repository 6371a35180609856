//! Client error model.
//!
//! Keep this focused on the failures the UI has to distinguish: local
//! validation, transport problems, cancelled requests, and server
//! rejections. Rendering concerns belong elsewhere.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the client layers.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// A form field (or the request as a whole) failed local validation.
    /// Reported before any network call is made.
    #[error("validation failed: {message}")]
    Validation {
        /// Field identifier when the failure is attributable to one field.
        field: Option<FieldId>,
        message: String,
    },

    /// The request never reached the server (network down, DNS, timeout).
    #[error("could not reach server: {0}")]
    Transport(String),

    /// The request was superseded and cancelled. Treated as a no-op by
    /// callers, never surfaced to the user.
    #[error("request superseded")]
    Aborted,

    /// The server answered with a non-2xx status or an `{ok: false}` body.
    /// `message` is shown verbatim to the user.
    #[error("server rejected request ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Identifies the form field a validation error belongs to, so the UI can
/// attach the message inline instead of showing a generic banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Quantity,
    HardwareType,
    LicenseName,
    InventoryNo,
    PrinterNo,
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            message: message.into(),
        }
    }

    pub fn field(field: FieldId, message: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Cancelled requests are swallowed at call sites, not reported.
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// The text a banner/toast should display for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Transport(_) => "Sunucuya ulaşılamadı.".to_string(),
            Self::Aborted => String::new(),
            Self::Server { message, .. } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_carry_their_field() {
        let err = ClientError::field(FieldId::Quantity, "quantity exceeds stock");
        match err {
            ClientError::Validation { field, .. } => assert_eq!(field, Some(FieldId::Quantity)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn aborts_are_not_user_visible() {
        assert!(ClientError::Aborted.is_abort());
        assert_eq!(ClientError::Aborted.user_message(), "");
    }

    #[test]
    fn transport_errors_get_a_generic_message() {
        let err = ClientError::transport("dns failure");
        assert_eq!(err.user_message(), "Sunucuya ulaşılamadı.");
    }
}
