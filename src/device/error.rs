//! Device request failures and their conversational rendering.

use thiserror::Error;

/// A failed device API call.
///
/// The `Display` output is the exact text handed back to the model, so each
/// variant names its failure category up front.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    #[error("HTTP error occurred: {status} - Response: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Connection error occurred: {0}")]
    Connection(String),

    #[error("Timeout error occurred: {0}")]
    Timeout(String),

    #[error("An unexpected error occurred: {0}")]
    Request(String),

    /// The body is handed back as-is; the decode failure itself is only logged.
    #[error("Raw response content: {body}")]
    Decode { body: String },
}

impl DeviceError {
    /// Classify a transport-level reqwest failure.
    pub fn from_transport(err: reqwest::Error) -> Self {
        let detail = err.to_string();
        if err.is_timeout() {
            Self::Timeout(detail)
        } else if err.is_connect() {
            Self::Connection(detail)
        } else {
            Self::Request(detail)
        }
    }

    /// Short category label, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::HttpStatus { .. } => "http_status",
            Self::Connection(_) => "connection",
            Self::Timeout(_) => "timeout",
            Self::Request(_) => "request",
            Self::Decode { .. } => "decode",
        }
    }
}
