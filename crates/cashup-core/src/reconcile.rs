//! # Reconciliation Engine
//!
//! The decision core: does the declared balance agree with the counted
//! drawer, and if so, what breakdown gets submitted?
//!
//! ## Decision Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Reconciliation Decision                            │
//! │                                                                         │
//! │  declared input ──► parse_declared_balance ──► declared: Money ───┐     │
//! │                                                                   │     │
//! │  counts + catalog ──► calculated_total ──► calculated: Money ─────┤     │
//! │                       (notes only)                                │     │
//! │                                                                   ▼     │
//! │                                    evaluate: |declared − calculated|    │
//! │                                    is_balanced = difference < 0.01      │
//! │                                                                   │     │
//! │                                                                   ▼     │
//! │                                    validate_submission, in order:       │
//! │                                    1. declared must be positive         │
//! │                                    2. evaluation must be balanced       │
//! │                                    3. some quantity must be > 0         │
//! │                                                                   │     │
//! │                              ┌────────────────────────────────────┤     │
//! │                              ▼                                    ▼     │
//! │                    Breakdown (note lines,              ReconcileError   │
//! │                    qty > 0, 2dp amounts)               (typed value)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure: no logging, no retries, no escalation. A
//! rejection is a returned value and nothing else.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ReconcileError, ReconcileResult};
use crate::money::Money;
use crate::types::{Breakdown, BreakdownLine, Denomination, DenominationCounts, RegisterMode};
use crate::validation::parse_declared_balance;

// =============================================================================
// Tolerance
// =============================================================================

/// Default balance tolerance: one minor currency unit (0.01).
///
/// ## Why a tolerance at all?
/// Balances round-trip through NUMERIC columns and operator-typed decimals,
/// which can disagree below a cent without any cash actually missing. At or
/// above one minor unit the drawer really is off. The comparison is strict
/// (`difference < tolerance`), so a difference of exactly 0.01 is unbalanced.
pub fn default_tolerance() -> Money {
    Money::from_decimal(Decimal::new(1, 2))
}

// =============================================================================
// Calculated Total
// =============================================================================

/// Sums the counted drawer value over note denominations.
///
/// Coins are skipped entirely: a coin row may carry a quantity, but it
/// contributes nothing here and never appears in a breakdown. Denominations
/// with no entry on the count sheet contribute zero. There are no error
/// conditions.
///
/// ## Example
/// ```rust
/// use cashup_core::money::Money;
/// use cashup_core::reconcile::calculated_total;
/// use cashup_core::types::{Denomination, DenominationCounts, DenominationKind};
///
/// let catalog = vec![Denomination {
///     id: 1,
///     name: "Rs 5000 note".to_string(),
///     value: Money::parse("5000").unwrap(),
///     kind: DenominationKind::Note,
///     sort_order: 1,
/// }];
/// let counts: DenominationCounts = [(1, 2)].into_iter().collect();
///
/// assert_eq!(calculated_total(&catalog, &counts).to_string(), "10000.00");
/// ```
pub fn calculated_total(catalog: &[Denomination], counts: &DenominationCounts) -> Money {
    catalog
        .iter()
        .filter(|denomination| denomination.is_note())
        .map(|denomination| denomination.value.times(counts.get(denomination.id)))
        .sum()
}

// =============================================================================
// Evaluation
// =============================================================================

/// The live comparison between declared and counted amounts.
///
/// Recomputed on every count-sheet edit; the UI keeps the submit action
/// disabled while `is_balanced` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// `|declared − calculated|`, exact.
    pub difference: Money,

    /// Whether the difference is strictly below the tolerance.
    pub is_balanced: bool,
}

/// Compares declared and counted amounts at the default tolerance.
///
/// Pure and idempotent: identical inputs always give identical results.
pub fn evaluate(declared: Money, calculated: Money) -> Evaluation {
    evaluate_with_tolerance(declared, calculated, default_tolerance())
}

/// Compares declared and counted amounts at an explicit tolerance.
///
/// The check is symmetric (`|declared − calculated|`) and strict: a
/// difference equal to the tolerance is unbalanced.
pub fn evaluate_with_tolerance(declared: Money, calculated: Money, tolerance: Money) -> Evaluation {
    let difference = (declared - calculated).abs();

    Evaluation {
        difference,
        is_balanced: difference < tolerance,
    }
}

// =============================================================================
// Submission Validation
// =============================================================================

/// Validates a count submission and assembles its breakdown.
///
/// ## Check Order
/// 1. `MissingDeclaredBalance` — declared amount is zero or negative
/// 2. `Unbalanced` — the evaluation says the amounts disagree
/// 3. `NoDenominationsEntered` — every quantity on the sheet is zero
///
/// The all-zero guard runs last, so an untouched sheet with a declared
/// balance of 100 reports "100.00 does not match 0.00" rather than the
/// blanket no-counts message. It still exists independently: a declaration
/// tiny enough to balance against an empty drawer must not slip through.
///
/// On success, returns the breakdown of counted note denominations in
/// catalog order, zero-quantity rows omitted, amounts pinned to two decimal
/// places.
pub fn validate_submission(
    declared: Money,
    calculated: Money,
    counts: &DenominationCounts,
    catalog: &[Denomination],
    evaluation: Evaluation,
) -> ReconcileResult<Breakdown> {
    if !declared.is_positive() {
        return Err(ReconcileError::MissingDeclaredBalance);
    }

    if !evaluation.is_balanced {
        return Err(ReconcileError::Unbalanced {
            declared,
            calculated,
        });
    }

    if counts.is_all_zero() {
        return Err(ReconcileError::NoDenominationsEntered);
    }

    Ok(build_breakdown(catalog, counts))
}

/// Assembles the wire breakdown: note denominations with quantity > 0, in
/// the order the catalog lists them.
fn build_breakdown(catalog: &[Denomination], counts: &DenominationCounts) -> Breakdown {
    let mut lines = Vec::new();

    for denomination in catalog.iter().filter(|d| d.is_note()) {
        let quantity = counts.get(denomination.id);
        if quantity > 0 {
            lines.push(BreakdownLine::new(denomination, quantity));
        }
    }

    Breakdown::new(lines)
}

// =============================================================================
// Reconciliation Attempt
// =============================================================================

/// One submission attempt against a till, from raw input to a decision.
///
/// ## Attempt Lifecycle
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                      Attempt Lifecycle                                  │
/// │                                                                         │
/// │        ReconciliationAttempt (undecided)                                │
/// │                │                                                        │
/// │                │ decide(catalog)      ← consumes the attempt            │
/// │                ▼                                                        │
/// │        ┌───────┴────────┐                                               │
/// │        ▼                ▼                                               │
/// │    Accepted          Rejected                                           │
/// │  (Reconciliation)  (ReconcileError)                                     │
/// │                                                                         │
/// │  A decided attempt is gone either way. Retrying after a rejection       │
/// │  means building a fresh attempt from the edited count sheet; no         │
/// │  attempt is ever decided twice.                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// The attempt holds the raw declared input, not a parsed amount: parsing is
/// part of the decision, so a blank declaration rejects before any total is
/// computed.
#[derive(Debug, Clone)]
pub struct ReconciliationAttempt {
    mode: RegisterMode,
    declared_input: String,
    counts: DenominationCounts,
    tolerance: Money,
}

impl ReconciliationAttempt {
    /// Builds an undecided attempt at the default tolerance.
    pub fn new(
        mode: RegisterMode,
        declared_input: impl Into<String>,
        counts: DenominationCounts,
    ) -> Self {
        ReconciliationAttempt {
            mode,
            declared_input: declared_input.into(),
            counts,
            tolerance: default_tolerance(),
        }
    }

    /// Overrides the balance tolerance for this attempt.
    pub fn with_tolerance(mut self, tolerance: Money) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The till transition this attempt belongs to.
    pub fn mode(&self) -> RegisterMode {
        self.mode
    }

    /// The tolerance this attempt will be decided at.
    pub fn tolerance(&self) -> Money {
        self.tolerance
    }

    /// Live evaluation for the count sheet, without deciding the attempt.
    ///
    /// A declaration that does not parse is measured as zero here, matching
    /// what the operator sees while the field is still blank. The strict
    /// checks only run on [`decide`](Self::decide).
    pub fn preview(&self, catalog: &[Denomination]) -> Evaluation {
        let declared = Money::parse(&self.declared_input).unwrap_or_else(|_| Money::zero());
        let calculated = calculated_total(catalog, &self.counts);

        evaluate_with_tolerance(declared, calculated, self.tolerance)
    }

    /// Decides the attempt, consuming it.
    ///
    /// Parses the declared balance first (a blank or garbage declaration
    /// rejects before any total is computed), then totals the notes,
    /// evaluates the balance, and validates the submission.
    pub fn decide(self, catalog: &[Denomination]) -> ReconcileResult<Reconciliation> {
        let declared = parse_declared_balance(&self.declared_input)?;
        let calculated = calculated_total(catalog, &self.counts);
        let evaluation = evaluate_with_tolerance(declared, calculated, self.tolerance);

        let breakdown =
            validate_submission(declared, calculated, &self.counts, catalog, evaluation)?;

        Ok(Reconciliation {
            mode: self.mode,
            declared,
            calculated,
            difference: evaluation.difference,
            breakdown,
        })
    }
}

// =============================================================================
// Reconciliation
// =============================================================================

/// An accepted reconciliation: the context a session transition is built
/// from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    /// Which till transition was reconciled.
    pub mode: RegisterMode,

    /// The parsed declared balance, exact.
    pub declared: Money,

    /// The counted note total.
    pub calculated: Money,

    /// `|declared − calculated|` at acceptance time (below tolerance).
    pub difference: Money,

    /// The itemised lines to submit.
    pub breakdown: Breakdown,
}

// =============================================================================
// Unit Tests
// =============================================================================
