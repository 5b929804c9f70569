//! # cashup-core: Pure Reconciliation Logic for Cashup
//!
//! This crate is the **heart** of Cashup. It decides whether a till's
//! declared balance agrees with its counted drawer, as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cashup Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Till UI (count sheet)                         │   │
//! │  │    denomination rows ──► live difference ──► submit             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               cashup-register (Coordination Layer)              │   │
//! │  │     catalog, session open/close, config, logging, drill bin     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ cashup-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ reconcile │  │ validation│  │   │
//! │  │   │ Denomina- │  │   Money   │  │ evaluate  │  │  parsing  │  │   │
//! │  │   │ tion, ... │  │ (Decimal) │  │  decide   │  │  clamping │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Session store (external service)                │   │
//! │  │           receives breakdown JSON via the gateway trait         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Denomination, DenominationCounts, Breakdown, etc.)
//! - [`money`] - Money type over exact decimals (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary parsing and catalog validation
//! - [`reconcile`] - The decision engine: totals, evaluation, attempts
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, clock, and logging are FORBIDDEN here
//! 3. **Exact Decimals**: Amounts keep every digit the operator typed; nothing
//!    is rounded until it is formatted for the wire
//! 4. **Explicit Errors**: Rejections are typed values, never strings or panics
//! 5. **One-Shot Attempts**: Deciding a reconciliation attempt consumes it;
//!    retries are new attempts built from the edited count sheet
//!
//! ## Example Usage
//!
//! ```rust
//! use cashup_core::{
//!     calculated_total, evaluate, Denomination, DenominationCounts, DenominationKind, Money,
//! };
//!
//! let catalog = vec![Denomination {
//!     id: 1,
//!     name: "Rs 5000 note".to_string(),
//!     value: Money::parse("5000").unwrap(),
//!     kind: DenominationKind::Note,
//!     sort_order: 1,
//! }];
//!
//! // Two notes counted in the drawer
//! let counts: DenominationCounts = [(1, 2)].into_iter().collect();
//! let calculated = calculated_total(&catalog, &counts);
//!
//! let evaluation = evaluate(Money::parse("10000").unwrap(), calculated);
//! assert!(evaluation.is_balanced);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod reconcile;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cashup_core::Money` instead of
// `use cashup_core::money::Money`

pub use error::{
    CatalogError, CatalogResult, MoneyError, ParseRegisterModeError, ReconcileError,
    ReconcileResult,
};
pub use money::Money;
pub use reconcile::{
    calculated_total, default_tolerance, evaluate, evaluate_with_tolerance, validate_submission,
    Evaluation, Reconciliation, ReconciliationAttempt,
};
pub use types::*;
