//! Error types for the updater
//!
//! Every stage of a run reports failures through [`Error`]. None of them are
//! retried; they travel unchanged up to the binary, which logs and exits.

use crate::traits::HostedZone;
use thiserror::Error;

/// Result type alias for updater operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the updater
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure while talking to the IP-echo endpoint
    #[error("Network error: {0}")]
    Network(String),

    /// The IP-echo endpoint answered with something other than 200
    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// The response body could not be read
    #[error("I/O error: {0}")]
    Io(String),

    /// The response body is not an IPv4 address
    #[error("Invalid public IPv4 address: {0:?}")]
    InvalidAddress(String),

    /// The DNS provider client could not be configured or authenticated
    #[error("Authentication configuration error: {0}")]
    AuthConfiguration(String),

    /// No hosted zone carries the requested name
    #[error("Hosted zone not found: {name} (visible zones: {})", describe_zones(.available))]
    ZoneNotFound {
        /// Normalized zone name that was searched for
        name: String,
        /// Every zone returned by the provider
        available: Vec<HostedZone>,
    },

    /// More than one hosted zone carries the requested name
    #[error("Hosted zone name is ambiguous: {name} (candidates: {})", describe_zones(.candidates))]
    AmbiguousZone {
        /// Normalized zone name that was searched for
        name: String,
        /// Zones sharing that name
        candidates: Vec<HostedZone>,
    },

    /// A DNS provider API call failed or was rejected
    #[error("Provider error ({provider}) during {operation}: {message}")]
    ProviderApi {
        /// Provider name
        provider: String,
        /// API operation that failed
        operation: String,
        /// Error message
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an unexpected status error
    pub fn unexpected_status(status: u16, url: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            url: url.into(),
        }
    }

    /// Create an I/O error
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Create an authentication configuration error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::AuthConfiguration(msg.into())
    }

    /// Create a provider API error
    pub fn provider_api(
        provider: impl Into<String>,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ProviderApi {
            provider: provider.into(),
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

fn describe_zones(zones: &[HostedZone]) -> String {
    if zones.is_empty() {
        return "none".to_string();
    }

    zones
        .iter()
        .map(|zone| {
            let visibility = if zone.private_zone { "private" } else { "public" };
            format!("{} [{}, {}]", zone.name, zone.id, visibility)
        })
        .collect::<Vec<_>>()
        .join(", ")
}
