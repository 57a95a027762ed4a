//! Error types for Grafana API operations.
//!
//! Errors are categorized so the retry loop can tell transient transport
//! failures apart from answers the server will keep giving no matter how
//! often the request is repeated.

use std::fmt;

/// Result type alias for Grafana API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of API errors for retry logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport failures, rate limiting and server-side errors (retryable).
    Network,
    /// Dashboard does not exist.
    NotFound,
    /// Credential rejected or lacking permission.
    Auth,
    /// Version or identifier conflict at the destination.
    Conflict,
    /// Response body could not be decoded.
    Format,
    /// Other/unknown errors.
    Other,
}

impl ErrorCategory {
    /// Whether this error category is typically transient and worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network)
    }

    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Network connectivity issue",
            Self::NotFound => "Dashboard not found",
            Self::Auth => "Authentication failed",
            Self::Conflict => "Dashboard conflict",
            Self::Format => "Invalid API response",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check that the Grafana instance is reachable and try again",
            Self::NotFound => "Verify the dashboard uid is correct",
            Self::Auth => "Check that the API key is valid and has editor permissions",
            Self::Conflict => "Re-run with --overwrite true to replace the existing version",
            Self::Format => "Verify the url points at a Grafana instance",
            Self::Other => "Check the error details for more information",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur while talking to the Grafana API.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// HTTP request failed at the transport level or with an unexpected status.
    #[error("HTTP request failed: {message}")]
    Http {
        /// Error message.
        message: String,
        /// HTTP status code if available.
        status: Option<u16>,
    },

    /// Dashboard with the given uid does not exist.
    #[error("dashboard not found: {uid}")]
    NotFound {
        /// Requested dashboard uid.
        uid: String,
    },

    /// The API key was rejected.
    #[error("unauthorized (HTTP {status})")]
    Unauthorized {
        /// HTTP status code (401 or 403).
        status: u16,
    },

    /// The save was refused because of a version or identifier conflict.
    #[error("dashboard conflict: {message}")]
    Conflict {
        /// Error message.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("invalid API response: {0}")]
    InvalidResponse(String),

    /// Base URL is unusable.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an HTTP error.
    pub fn http(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Http {
            message: message.into(),
            status,
        }
    }

    /// Map an HTTP status to an error, using `uid` to name the dashboard
    /// involved.
    #[must_use]
    pub fn from_status(status: u16, uid: &str) -> Self {
        match status {
            401 | 403 => Self::Unauthorized { status },
            404 => Self::NotFound {
                uid: uid.to_string(),
            },
            412 => Self::Conflict {
                message: format!("dashboard {uid} was changed by someone else or already exists"),
            },
            _ => Self::http(format!("HTTP {status}"), Some(status)),
        }
    }

    /// Convert a transport error, classifying status codes against `uid`.
    #[must_use]
    pub fn from_ureq(err: ureq::Error, uid: &str) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::from_status(code, uid),
            other => other.into(),
        }
    }

    /// Get the error category for retry logic.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Http { status, .. } => match status {
                None | Some(429 | 500..=599) => ErrorCategory::Network,
                Some(_) => ErrorCategory::Other,
            },
            Error::NotFound { .. } => ErrorCategory::NotFound,
            Error::Unauthorized { .. } => ErrorCategory::Auth,
            Error::Conflict { .. } => ErrorCategory::Conflict,
            Error::InvalidResponse(_) => ErrorCategory::Format,
            Error::InvalidUrl(_) | Error::Other(_) => ErrorCategory::Other,
        }
    }

    /// Whether this error is typically transient and worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::Http {
                message: format!("HTTP {code}"),
                status: Some(code),
            },
            // Only connection-level failures are worth another attempt
            ureq::Error::Io(_)
            | ureq::Error::Timeout(_)
            | ureq::Error::HostNotFound
            | ureq::Error::ConnectionFailed => Self::Http {
                message: err.to_string(),
                status: None,
            },
            ureq::Error::BadUri(uri) => Self::InvalidUrl(uri),
            ureq::Error::BodyExceedsLimit(limit) => {
                Self::InvalidResponse(format!("response body exceeds {limit} bytes"))
            }
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}
