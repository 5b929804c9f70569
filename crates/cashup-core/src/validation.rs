//! # Validation Module
//!
//! Boundary normalization for count-sheet input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Count Sheet UI                                               │
//! │  ├── Numeric input widgets, immediate feedback                         │
//! │  └── Clears stale rejection messages on edit                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (boundary normalization)                         │
//! │  ├── Declared balance: parsed and sign-checked BEFORE any total        │
//! │  ├── Quantities: clamped to unsigned integers (never an error)         │
//! │  └── Catalog rows: structural checks on reference data                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Upstream Store                                               │
//! │  ├── NOT NULL / CHECK constraints on session rows                      │
//! │  └── NUMERIC columns for balances                                      │
//! │                                                                         │
//! │  Raw text never reaches the summation step: it becomes Money or u32    │
//! │  here, or the attempt is rejected here.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cashup_core::validation::{parse_declared_balance, quantity_from_input};
//!
//! let declared = parse_declared_balance("13000").unwrap();
//! assert_eq!(declared.to_string(), "13000.00");
//!
//! // Quantities clamp instead of failing
//! assert_eq!(quantity_from_input("3"), 3);
//! assert_eq!(quantity_from_input("not a number"), 0);
//! ```

use crate::error::{CatalogError, CatalogResult, ReconcileError, ReconcileResult};
use crate::money::Money;
use crate::types::Denomination;

use std::collections::BTreeSet;

// =============================================================================
// Operator Input
// =============================================================================

/// Parses the declared balance typed by the operator.
///
/// ## Rules
/// - Whitespace-only or empty input → `MissingDeclaredBalance`
/// - Input that does not parse as a decimal → `MissingDeclaredBalance`
/// - Zero or negative amounts → `MissingDeclaredBalance`
///
/// Runs before any total is computed, so a blank declaration short-circuits
/// the whole attempt.
///
/// ## Example
/// ```rust
/// use cashup_core::validation::parse_declared_balance;
///
/// assert!(parse_declared_balance("13000").is_ok());
/// assert!(parse_declared_balance("").is_err());
/// assert!(parse_declared_balance("0").is_err());
/// ```
pub fn parse_declared_balance(raw: &str) -> ReconcileResult<Money> {
    let declared =
        Money::parse(raw).map_err(|_| ReconcileError::MissingDeclaredBalance)?;

    if !declared.is_positive() {
        return Err(ReconcileError::MissingDeclaredBalance);
    }

    Ok(declared)
}

/// Normalizes one quantity field from the count sheet.
///
/// Quantities are forgiving where the declared balance is strict: a cleared
/// field, a negative number, or garbage all read as zero. Entering nothing
/// for a denomination must never block the submission on its own.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Count Sheet: Rs 5000 note                                              │
/// │                                                                         │
/// │  Operator types: "2"   → 2                                              │
/// │  Operator types: ""    → 0  (field left blank)                          │
/// │  Operator types: "-3"  → 0  (clamped)                                   │
/// │  Operator types: "two" → 0  (clamped)                                   │
/// │                                                                         │
/// │  The all-zero guard in validate_submission catches sheets where         │
/// │  every field ended up as 0.                                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn quantity_from_input(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a single denomination definition.
///
/// ## Rules
/// - Name must not be blank
/// - Face value must be positive
pub fn validate_denomination(denomination: &Denomination) -> CatalogResult<()> {
    if denomination.name.trim().is_empty() {
        return Err(CatalogError::BlankName {
            id: denomination.id,
        });
    }

    if !denomination.value.is_positive() {
        return Err(CatalogError::NonPositiveValue {
            id: denomination.id,
            value: denomination.value,
        });
    }

    Ok(())
}

/// Validates a full denomination catalog.
///
/// ## Rules
/// - Must contain at least one denomination
/// - Every entry passes [`validate_denomination`]
/// - Ids must be unique
pub fn validate_catalog(denominations: &[Denomination]) -> CatalogResult<()> {
    if denominations.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = BTreeSet::new();
    for denomination in denominations {
        validate_denomination(denomination)?;

        if !seen.insert(denomination.id) {
            return Err(CatalogError::DuplicateId {
                id: denomination.id,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DenominationKind;

    fn note(id: i64, value: &str) -> Denomination {
        Denomination {
            id,
            name: format!("Rs {} note", value),
            value: Money::parse(value).unwrap(),
            kind: DenominationKind::Note,
            sort_order: id as i32,
        }
    }

    #[test]
    fn test_parse_declared_balance_accepts_positive_amounts() {
        assert_eq!(
            parse_declared_balance("13000").unwrap(),
            Money::parse("13000").unwrap()
        );
        assert_eq!(
            parse_declared_balance(" 42.5 ").unwrap(),
            Money::parse("42.5").unwrap()
        );
        // Sub-cent digits survive parsing
        assert_eq!(
            parse_declared_balance("99.994").unwrap().amount().to_string(),
            "99.994"
        );
    }

    #[test]
    fn test_parse_declared_balance_rejects_missing_input() {
        for raw in ["", "   ", "abc", "12abc", "Rs 100"] {
            let err = parse_declared_balance(raw).unwrap_err();
            assert!(
                matches!(err, ReconcileError::MissingDeclaredBalance),
                "expected missing-balance rejection for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_parse_declared_balance_rejects_non_positive_amounts() {
        for raw in ["0", "0.00", "-5", "-0.01"] {
            let err = parse_declared_balance(raw).unwrap_err();
            assert!(
                matches!(err, ReconcileError::MissingDeclaredBalance),
                "expected missing-balance rejection for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_quantity_from_input_parses_and_clamps() {
        assert_eq!(quantity_from_input("3"), 3);
        assert_eq!(quantity_from_input(" 12 "), 12);
        assert_eq!(quantity_from_input("500"), 500);

        assert_eq!(quantity_from_input(""), 0);
        assert_eq!(quantity_from_input("  "), 0);
        assert_eq!(quantity_from_input("-3"), 0);
        assert_eq!(quantity_from_input("2.5"), 0);
        assert_eq!(quantity_from_input("two"), 0);
        assert_eq!(quantity_from_input("999999999999"), 0);
    }

    #[test]
    fn test_validate_denomination() {
        assert!(validate_denomination(&note(1, "5000")).is_ok());

        let blank = Denomination {
            name: "   ".to_string(),
            ..note(2, "1000")
        };
        assert!(matches!(
            validate_denomination(&blank),
            Err(CatalogError::BlankName { id: 2 })
        ));

        let zero_value = Denomination {
            value: Money::zero(),
            ..note(3, "1")
        };
        assert!(matches!(
            validate_denomination(&zero_value),
            Err(CatalogError::NonPositiveValue { id: 3, .. })
        ));
    }

    #[test]
    fn test_validate_catalog() {
        assert!(validate_catalog(&[note(1, "5000"), note(2, "1000")]).is_ok());

        assert!(matches!(validate_catalog(&[]), Err(CatalogError::Empty)));

        let duplicated = [note(1, "5000"), note(1, "1000")];
        assert!(matches!(
            validate_catalog(&duplicated),
            Err(CatalogError::DuplicateId { id: 1 })
        ));
    }
}
