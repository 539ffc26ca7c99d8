use std::path::PathBuf;

use thiserror::Error;

/// Message shown to callers for any upstream failure. Which service failed is
/// only visible in the logs.
pub const UPSTREAM_UNAVAILABLE: &str = "Failed to fetch weather data from upstream";

/// Rejected coordinate input. Raised before any network call is made.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("Latitude and Longitude are required")]
    Missing,

    #[error("{name} must be a finite number, got '{value}'")]
    NotANumber { name: &'static str, value: String },
}

/// Failure talking to (or understanding) one of the upstream services.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {service} failed")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} responded with status {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode {service} response")]
    Decode {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed {service} response: {reason}")]
    Malformed {
        service: &'static str,
        reason: String,
    },
}

impl UpstreamError {
    /// The single classification exposed to HTTP and tool callers.
    pub fn user_message(&self) -> &'static str {
        UPSTREAM_UNAVAILABLE
    }
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("'{value}' is not a valid {kind}")]
    InvalidValue { kind: &'static str, value: String },

    #[error("failed to access preference file '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse preference file '{0}'")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("failed to serialize preferences")]
    Serialize(#[from] toml::ser::Error),
}
