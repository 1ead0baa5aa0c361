// SPDX-License-Identifier: MPL-2.0
//! Error taxonomy for the gallery pipeline.
//!
//! Three families, mirroring where a failure originates:
//!
//! - [`Error::Validation`]: client-side, field-scoped; never reaches the network.
//! - [`Error::Network`]: transport failure, no HTTP response was obtained.
//! - [`Error::Server`]: the backend answered with an HTTP error status.
//!
//! No component retries internally; a failure is terminal for that attempt
//! and requires a new explicit user action.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A form field failed validation before any network call was attempted.
    Validation {
        /// Name of the offending field (`"image"`, `"title"`, `"description"`).
        field: &'static str,
        /// Human-readable reason the rule rejected the value.
        reason: String,
    },

    /// The request never produced an HTTP response (DNS, TLS, connection reset, decode).
    Network(String),

    /// The backend responded with status >= 400.
    Server {
        /// HTTP status code.
        status: u16,
        /// Detail extracted from the response body, possibly empty.
        detail: String,
    },
}

impl Error {
    /// Returns `true` for client-side validation failures.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Returns the field name for validation errors, `None` otherwise.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation { field, reason } => {
                write!(f, "Invalid {field}: {reason}")
            }
            Error::Network(msg) => write!(f, "Network error: {msg}"),
            Error::Server { status, detail } => {
                if detail.is_empty() {
                    write!(f, "Server error: HTTP {status}")
                } else {
                    write!(f, "Server error: HTTP {status}: {detail}")
                }
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_validation_error() {
        let err = Error::Validation {
            field: "title",
            reason: "must be at least 2 characters".to_string(),
        };
        assert_eq!(format!("{err}"), "Invalid title: must be at least 2 characters");
    }

    #[test]
    fn display_formats_network_error() {
        let err = Error::Network("connection refused".to_string());
        assert_eq!(format!("{err}"), "Network error: connection refused");
    }

    #[test]
    fn display_formats_server_error_with_detail() {
        let err = Error::Server {
            status: 500,
            detail: "database unavailable".to_string(),
        };
        assert_eq!(format!("{err}"), "Server error: HTTP 500: database unavailable");
    }

    #[test]
    fn display_omits_empty_server_detail() {
        let err = Error::Server {
            status: 404,
            detail: String::new(),
        };
        assert_eq!(format!("{err}"), "Server error: HTTP 404");
    }

    #[test]
    fn field_accessor_only_for_validation() {
        let err = Error::Validation {
            field: "image",
            reason: "required".to_string(),
        };
        assert!(err.is_validation());
        assert_eq!(err.field(), Some("image"));

        let err = Error::Network("timeout".to_string());
        assert!(!err.is_validation());
        assert_eq!(err.field(), None);
    }
}
