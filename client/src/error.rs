//! Error types for the booking-client flows.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Error taxonomy for the client flows.
///
/// Organized by recovery path: validation errors are fixed by editing the
/// form, network and timeout errors by retrying, and an expired session by
/// logging in again. No error is fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    // ═══════════════════════════════════════════════════════════
    // Validation Errors
    // ═══════════════════════════════════════════════════════════
    /// A form field failed validation.
    #[error("{message}")]
    Validation {
        /// Field identifier the message refers to
        field: String,
        /// User-facing message (pt-BR)
        message: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Network Errors
    // ═══════════════════════════════════════════════════════════
    /// A backend call failed.
    #[error("Network error: {message}")]
    Network {
        /// HTTP status, when the server answered
        status: Option<u16>,
        /// Raw backend message (pattern-matched for friendlier text)
        message: String,
    },

    /// An operation exceeded its fixed deadline.
    ///
    /// Distinct from [`ClientError::Network`]: the underlying request was
    /// abandoned, not aborted, and its late result is discarded.
    #[error("Operation timed out: {operation}")]
    Timeout {
        /// Name of the operation that timed out
        operation: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Domain Conditions
    // ═══════════════════════════════════════════════════════════
    /// The backend reported nothing to return (e.g. no completed
    /// appointments in the selected export period).
    #[error("Not found: {what}")]
    NotFound {
        /// What was missing
        what: String,
    },

    /// Postal-code lookup did not recognize the CEP.
    #[error("CEP not found")]
    CepNotFound,

    /// Persisting or sharing a file failed.
    #[error("Share failed: {0}")]
    Share(String),

    // ═══════════════════════════════════════════════════════════
    // Auth
    // ═══════════════════════════════════════════════════════════
    /// Session has expired; the user must log in again.
    #[error("Session has expired")]
    SessionExpired,
}

impl ClientError {
    /// Returns `true` if the user can retry the operation as-is.
    ///
    /// # Examples
    ///
    /// ```
    /// # use inkbook_client::ClientError;
    /// assert!(ClientError::CepNotFound.is_recoverable());
    /// assert!(!ClientError::SessionExpired.is_recoverable());
    /// ```
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::SessionExpired)
    }

    /// Returns `true` if this error must force the logged-out transition.
    #[must_use]
    pub const fn forces_logout(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

/// Map a raw backend auth/password error string to friendlier text.
///
/// The backend surfaces English validation strings for credential
/// problems; the client pattern-matches the known ones and falls back to a
/// generic message otherwise.
#[must_use]
pub fn friendly_auth_message(raw: &str) -> Option<&'static str> {
    let lower = raw.to_lowercase();

    if lower.contains("current password") || lower.contains("senha atual") {
        return Some("Senha atual incorreta.");
    }
    if lower.contains("already registered")
        || lower.contains("already exists")
        || lower.contains("já cadastrado")
    {
        return Some("E-mail ou CPF já cadastrado.");
    }
    if lower.contains("invalid credentials") || lower.contains("bad credentials") {
        return Some("E-mail ou senha inválidos.");
    }

    None
}
