//! # Register Error Types
//!
//! Error types for the register coordination layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                                  │
//! │                                                                         │
//! │  ReconcileError / CatalogError (cashup-core)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RegisterError (this module) ← adds session and config context          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller (drill binary, till UI host) displays the message               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use cashup_core::{CatalogError, ReconcileError};

use crate::session::SessionStatus;

/// Result type alias for register operations.
pub type RegisterResult<T> = Result<T, RegisterError>;

/// Register error type covering catalog, reconciliation, session, and
/// configuration failures.
#[derive(Debug, Error)]
pub enum RegisterError {
    // =========================================================================
    // Engine Errors
    // =========================================================================
    /// The reconciliation engine rejected the submission.
    ///
    /// ## When This Occurs
    /// - Declared balance missing or non-positive
    /// - Declared and counted amounts disagree
    /// - Count sheet is entirely zero
    #[error("Reconciliation failed: {0}")]
    Reconcile(#[from] ReconcileError),

    /// The denomination catalog is unusable.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    // =========================================================================
    // Session Errors
    // =========================================================================
    /// A register session is already open.
    ///
    /// ## When This Occurs
    /// - Opening the till while the previous session was never closed
    #[error("A register session is already open: {id}")]
    SessionAlreadyOpen { id: String },

    /// No session exists with the given id.
    #[error("Register session not found: {id}")]
    SessionNotFound { id: String },

    /// The session is in the wrong status for the requested transition.
    ///
    /// ## When This Occurs
    /// - Closing a session that is already closed
    #[error("Register session {id} is already {status}")]
    InvalidSessionStatus { id: String, status: SessionStatus },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid register configuration.
    #[error("Invalid register configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for RegisterError {
    fn from(err: std::io::Error) -> Self {
        RegisterError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for RegisterError {
    fn from(err: toml::de::Error) -> Self {
        RegisterError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl RegisterError {
    /// Returns true if the operator can fix the input and submit again.
    ///
    /// ## Fixable Errors
    /// - Engine rejections (edit the count sheet, retype the declared total)
    ///
    /// ## Non-Fixable Errors
    /// - Session status conflicts (need a different transition, not a retype)
    /// - Catalog and configuration problems (need an administrator)
    pub fn is_operator_fixable(&self) -> bool {
        matches!(self, RegisterError::Reconcile(_))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            RegisterError::InvalidConfig(_) | RegisterError::ConfigLoadFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashup_core::Money;

    #[test]
    fn test_engine_rejections_are_operator_fixable() {
        let err = RegisterError::from(ReconcileError::MissingDeclaredBalance);
        assert!(err.is_operator_fixable());

        let err = RegisterError::SessionAlreadyOpen {
            id: "abc-123".into(),
        };
        assert!(!err.is_operator_fixable());
    }

    #[test]
    fn test_config_errors() {
        assert!(RegisterError::InvalidConfig("bad tolerance".into()).is_config_error());
        assert!(RegisterError::ConfigLoadFailed("missing file".into()).is_config_error());
        assert!(!RegisterError::SessionNotFound { id: "x".into() }.is_config_error());
    }

    #[test]
    fn test_unbalanced_message_survives_wrapping() {
        let inner = ReconcileError::Unbalanced {
            declared: Money::parse("13000").unwrap(),
            calculated: Money::parse("10000").unwrap(),
        };
        let err = RegisterError::from(inner);

        let message = err.to_string();
        assert!(message.contains("13000.00"));
        assert!(message.contains("10000.00"));
    }

    #[test]
    fn test_session_status_cited_in_message() {
        let err = RegisterError::InvalidSessionStatus {
            id: "abc-123".into(),
            status: SessionStatus::Closed,
        };
        assert_eq!(
            err.to_string(),
            "Register session abc-123 is already closed"
        );
    }
}
