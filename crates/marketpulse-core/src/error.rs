//! Shared error type across marketpulse crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Operation conflicts with current state (e.g. publisher already running).
    Conflict,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Conflict => "CONFLICT",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MarketError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("publisher already running")]
    AlreadyRunning,
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MarketError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MarketError::BadRequest(_) => ClientCode::BadRequest,
            MarketError::AlreadyRunning => ClientCode::Conflict,
            MarketError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            MarketError::Internal(_) => ClientCode::Internal,
        }
    }
}
