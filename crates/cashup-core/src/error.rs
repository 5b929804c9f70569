//! # Error Types
//!
//! Domain-specific error types for cashup-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cashup-core errors (this file)                                        │
//! │  ├── MoneyError       - Amount parsing failures                        │
//! │  ├── ReconcileError   - Submission rejection reasons                   │
//! │  └── CatalogError     - Denomination definition problems               │
//! │                                                                         │
//! │  cashup-register errors (separate crate)                               │
//! │  └── RegisterError    - Session/gateway/config failures                │
//! │                                                                         │
//! │  Flow: MoneyError → ReconcileError → RegisterError → Caller            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (amounts, denomination ids)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;
use crate::types::DenominationId;

// =============================================================================
// Money Error
// =============================================================================

/// Monetary amount parsing errors.
///
/// Amounts enter the system as operator-typed strings and as NUMERIC columns
/// rendered to strings by the backing store. Anything that does not parse as
/// a plain decimal is rejected here, before any arithmetic runs.
#[derive(Debug, Error)]
pub enum MoneyError {
    /// Input is not a plain decimal number.
    #[error("Invalid money amount: '{input}'")]
    InvalidAmount { input: String },
}

// =============================================================================
// Reconcile Error
// =============================================================================

/// Reconciliation submission rejections.
///
/// These are the only three reasons a count submission can fail. Every one is
/// returned as a value; the engine never panics, logs, or retries. Display is
/// the caller's concern.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The declared balance is missing or unusable.
    ///
    /// ## When This Occurs
    /// - The declared balance field was left empty
    /// - The input does not parse as a decimal number
    /// - The parsed amount is zero or negative
    ///
    /// Raised by the boundary parser before any total is computed, so a
    /// blank declaration never reaches the summation step.
    #[error("Declared balance is required")]
    MissingDeclaredBalance,

    /// The declared balance disagrees with the counted total.
    ///
    /// ## When This Occurs
    /// - |declared − counted| ≥ the balance tolerance (0.01 by default)
    ///
    /// ## User Workflow
    /// ```text
    /// Count drawer: 2 × Rs 5000 = 10000.00
    ///      │
    ///      ▼
    /// Declare balance: 13000
    ///      │
    ///      ▼
    /// Unbalanced { declared: 13000.00, calculated: 10000.00 }
    ///      │
    ///      ▼
    /// UI shows: "Declared balance 13000.00 does not match counted total 10000.00"
    /// ```
    #[error("Declared balance {declared} does not match counted total {calculated}")]
    Unbalanced { declared: Money, calculated: Money },

    /// Every denomination quantity is zero.
    ///
    /// ## When This Occurs
    /// - The operator declared a balance but entered no counts at all
    ///
    /// Checked after the balance comparison, so an all-zero count sheet with
    /// a nonzero declaration surfaces as `Unbalanced` first.
    #[error("At least one denomination count is required")]
    NoDenominationsEntered,
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Denomination catalog definition errors.
///
/// The catalog is reference data seeded upstream; these errors flag a broken
/// seed or configuration, not operator mistakes.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog contains no denominations at all.
    #[error("Denomination catalog is empty")]
    Empty,

    /// Two catalog entries share the same id.
    #[error("Duplicate denomination id: {id}")]
    DuplicateId { id: DenominationId },

    /// A denomination has a zero or negative face value.
    #[error("Denomination {id} must have a positive face value, got {value}")]
    NonPositiveValue { id: DenominationId, value: Money },

    /// A denomination has an empty display name.
    #[error("Denomination {id} has a blank name")]
    BlankName { id: DenominationId },
}

// =============================================================================
// Register Mode Parse Error
// =============================================================================

/// Failure to parse a register mode from text.
///
/// Seen when a mode arrives as a CLI flag or an API path segment.
#[derive(Debug, Error)]
#[error("Unknown register mode: '{input}'. Valid options: opening, closing")]
pub struct ParseRegisterModeError {
    pub input: String,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with ReconcileError.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Unit Tests
// =============================================================================
