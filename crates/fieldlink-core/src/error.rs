//! Shared error type across FieldLink crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Credential missing, invalid, or expired.
    Unauthenticated,
    /// Role not permitted for the operation.
    Forbidden,
    /// Rate limited.
    RateLimited,
    /// Asset id is neither "all" nor a canonical UUID.
    InvalidAssetId,
    /// Intent forbidden or not on the allowlist.
    InvalidIntent,
    /// Payload exceeds depth, key-count, or byte bounds.
    PayloadTooLarge,
    /// Audit ledger write failed; the command must not appear to succeed.
    AuditWriteFailed,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Unauthenticated => "UNAUTHENTICATED",
            ClientCode::Forbidden => "FORBIDDEN",
            ClientCode::RateLimited => "RATE_LIMITED",
            ClientCode::InvalidAssetId => "INVALID_ASSET_ID",
            ClientCode::InvalidIntent => "INVALID_INTENT",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::AuditWriteFailed => "AUDIT_WRITE_FAILED",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FieldLinkError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum FieldLinkError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("forbidden")]
    Forbidden,
    #[error("rate limited")]
    RateLimited,
    #[error("invalid asset id")]
    InvalidAssetId,
    #[error("invalid or disallowed intent")]
    InvalidIntent,
    #[error("payload too large: {0}")]
    PayloadTooLarge(&'static str),
    #[error("audit write failed: {0}")]
    AuditWriteFailed(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl FieldLinkError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            FieldLinkError::BadRequest(_) => ClientCode::BadRequest,
            FieldLinkError::Unauthenticated => ClientCode::Unauthenticated,
            FieldLinkError::Forbidden => ClientCode::Forbidden,
            FieldLinkError::RateLimited => ClientCode::RateLimited,
            FieldLinkError::InvalidAssetId => ClientCode::InvalidAssetId,
            FieldLinkError::InvalidIntent => ClientCode::InvalidIntent,
            FieldLinkError::PayloadTooLarge(_) => ClientCode::PayloadTooLarge,
            FieldLinkError::AuditWriteFailed(_) => ClientCode::AuditWriteFailed,
            FieldLinkError::Internal(_) => ClientCode::Internal,
        }
    }
}
