use thiserror::Error;

// Error message prefixes
const MSG_FAILED_TO_PREFIX: &str = "Failed to";
const MSG_INVALID_PREFIX: &str = "Invalid";
const MSG_MISSING_PREFIX: &str = "Missing";

/// Result type for the `mcsm_mcp` crate
pub type Result<T, E = Error> = std::result::Result<T, error_stack::Report<E>>;

// Internal error types for detailed error categorization
#[derive(Debug, Error)]
pub enum Error {
    #[error("MCSManager request failed: {0}")]
    Network(String),

    #[error("MCSManager request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("MCSManager returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Unable to decode MCSManager response: {0}")]
    Decode(String),

    #[error("MCSManager reported status {status:?}, expected \"200\"")]
    ApplicationStatus { status: Option<String> },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    General(String),
}

impl Error {
    // Builder methods for common patterns

    /// Create a "Failed to X" network error
    pub fn failed_to(action: &str, details: impl std::fmt::Display) -> Self {
        Self::Network(format!("{MSG_FAILED_TO_PREFIX} {action}: {details}"))
    }

    /// Create an "Invalid X" error
    pub fn invalid(what: &str, details: impl std::fmt::Display) -> Self {
        Self::InvalidArgument(format!("{MSG_INVALID_PREFIX} {what}: {details}"))
    }

    /// Create a "Missing X" configuration error
    pub fn missing(what: &str) -> Self {
        Self::Configuration(format!("{MSG_MISSING_PREFIX} {what}"))
    }

    /// Transport-level failures: anything raised before an application envelope was read
    pub const fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout { .. } | Self::HttpStatus { .. } | Self::Decode(_)
        )
    }

    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
