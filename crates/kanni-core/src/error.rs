//! Shared error type across kanni crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request or config.
    BadRequest,
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
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, KanniError>;

/// Unified error type used by core and gateway.
///
/// The metrics store itself never fails; these variants come from config
/// loading, event decoding and tip planning.
#[derive(Debug, Error)]
pub enum KanniError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl KanniError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            KanniError::BadRequest(_) => ClientCode::BadRequest,
            KanniError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            KanniError::Internal(_) => ClientCode::Internal,
        }
    }
}
