//! Error types for the Grokipedia client
//!
//! Every failure a caller can observe is one of four classified kinds. The
//! classifier functions below turn raw HTTP outcomes into those kinds and are
//! the only place that decides what is worth retrying.

use reqwest::StatusCode;
use thiserror::Error;

use crate::client::Operation;

// == Grokipedia Error Enum ==
/// Classified error returned by every client operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrokipediaError {
    /// The requested resource does not exist
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// The upstream service is throttling requests
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The upstream service answered with a failure, or with a body that
    /// could not be understood
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    /// No response reached the client
    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl GrokipediaError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Rate limiting, transport failures and 5xx server errors are transient.
    /// Not-found, other 4xx statuses and undecodable bodies are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            GrokipediaError::NotFound { .. } => false,
            GrokipediaError::RateLimited => true,
            GrokipediaError::Api { status, .. } => status.is_some_and(|s| s >= 500),
            GrokipediaError::Transport { .. } => true,
        }
    }

    /// HTTP status behind the error, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            GrokipediaError::NotFound { .. } => None,
            GrokipediaError::RateLimited => Some(StatusCode::TOO_MANY_REQUESTS.as_u16()),
            GrokipediaError::Api { status, .. } => *status,
            GrokipediaError::Transport { .. } => None,
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        GrokipediaError::NotFound {
            resource: resource.into(),
        }
    }
}

// == Classifier ==
/// Classifies a non-success HTTP status.
///
/// `resource` names what was asked for (a slug, or the operation itself when
/// there is no more specific subject) and is reported by `NotFound`.
pub fn classify_status(status: StatusCode, operation: Operation, resource: &str) -> GrokipediaError {
    match status {
        StatusCode::NOT_FOUND => GrokipediaError::not_found(resource),
        StatusCode::TOO_MANY_REQUESTS => GrokipediaError::RateLimited,
        other => GrokipediaError::Api {
            message: format!("{}: {}", operation, describe_status(other)),
            status: Some(other.as_u16()),
        },
    }
}

/// Classifies a failure raised by the HTTP stack before a response arrived.
pub fn classify_transport(error: &reqwest::Error, operation: Operation) -> GrokipediaError {
    let kind = if error.is_timeout() {
        "request timed out"
    } else if error.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    GrokipediaError::Transport {
        message: format!("{}: {}: {}", operation, kind, error),
    }
}

/// Classifies a response body that is not valid JSON of the expected shape.
pub fn classify_decode(error: &serde_json::Error, operation: Operation) -> GrokipediaError {
    GrokipediaError::Api {
        message: format!("{}: invalid response body: {}", operation, error),
        status: None,
    }
}

fn describe_status(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

// == Result Type Alias ==
/// Convenience Result type for client operations.
pub type Result<T> = std::result::Result<T, GrokipediaError>;
