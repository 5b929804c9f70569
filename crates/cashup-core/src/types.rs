//! # Domain Types
//!
//! Core domain types for till denomination reconciliation.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │  Denomination   │   │DenominationCounts│   │ BreakdownLine   │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  id (i64)       │   │  id → quantity   │   │  denominationId │      │
//! │  │  name           │   │  missing = 0     │   │  quantity       │      │
//! │  │  value (Money)  │   │  (ephemeral)     │   │  amount (2dp)   │      │
//! │  │  kind, sort     │   └──────────────────┘   └─────────────────┘      │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │DenominationKind │   │  RegisterMode   │   │   Breakdown     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Note           │   │  Opening        │   │  note lines,    │       │
//! │  │  Coin           │   │  Closing        │   │  qty > 0 only   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Denomination ids are relational serial keys assigned upstream where the
//! catalog is seeded. This crate treats them as opaque `i64` values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ParseRegisterModeError;
use crate::money::Money;

/// Upstream serial key of a denomination row.
pub type DenominationId = i64;

// =============================================================================
// Denomination Kind
// =============================================================================

/// Physical kind of a denomination.
///
/// Only notes participate in drawer totals; see
/// [`crate::reconcile::calculated_total`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenominationKind {
    /// Banknote (counted into the drawer total).
    Note,
    /// Coin (counted for reference, excluded from the total).
    Coin,
}

// =============================================================================
// Denomination
// =============================================================================

/// A single denomination definition from the catalog.
///
/// Reference data: defined once by upstream seed/configuration and read-only
/// to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Denomination {
    /// Unique catalog id.
    pub id: DenominationId,

    /// Display label shown on the count sheet ("Rs 5000 note").
    pub name: String,

    /// Face value. Must be positive.
    pub value: Money,

    /// Note or coin.
    pub kind: DenominationKind,

    /// Display and aggregation ordering hint (ascending).
    pub sort_order: i32,
}

impl Denomination {
    /// Checks whether this denomination is a banknote.
    #[inline]
    pub fn is_note(&self) -> bool {
        self.kind == DenominationKind::Note
    }

    /// Checks whether this denomination is a coin.
    #[inline]
    pub fn is_coin(&self) -> bool {
        self.kind == DenominationKind::Coin
    }
}

// =============================================================================
// Register Mode
// =============================================================================

/// Which till transition a reconciliation belongs to.
///
/// ## Mode Behavior
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Register Mode Behavior                            │
/// │                                                                         │
/// │  OPENING                            │  CLOSING                          │
/// │  ────────                           │  ────────                         │
/// │  • Count the float before trading   │  • Count the drawer at end of day │
/// │  • Accepted count opens a session   │  • Accepted count closes it       │
/// │                                                                         │
/// │  The arithmetic is identical in both modes; the mode decides which      │
/// │  session transition the accepted submission is sent to.                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterMode {
    /// Count the opening float; a till session starts here.
    #[default]
    Opening,

    /// Count the closing drawer.
    Closing,
}

impl std::fmt::Display for RegisterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisterMode::Opening => write!(f, "opening"),
            RegisterMode::Closing => write!(f, "closing"),
        }
    }
}

impl std::str::FromStr for RegisterMode {
    type Err = ParseRegisterModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "opening" | "open" => Ok(RegisterMode::Opening),
            "closing" | "close" => Ok(RegisterMode::Closing),
            other => Err(ParseRegisterModeError {
                input: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Denomination Counts
// =============================================================================

/// Operator-entered quantities per denomination.
///
/// Ephemeral count-sheet state: built fresh for every reconciliation attempt,
/// never persisted. Quantities are unsigned by construction; raw text input
/// is clamped through [`crate::validation::quantity_from_input`] before it
/// gets here.
///
/// A denomination with no entry reads as quantity 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenominationCounts(BTreeMap<DenominationId, u32>);

impl DenominationCounts {
    /// Creates an empty count sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the quantity for one denomination, replacing any prior entry.
    pub fn set(&mut self, id: DenominationId, quantity: u32) {
        self.0.insert(id, quantity);
    }

    /// Returns the entered quantity for a denomination (0 when absent).
    pub fn get(&self, id: DenominationId) -> u32 {
        self.0.get(&id).copied().unwrap_or(0)
    }

    /// Checks whether every entered quantity is zero.
    ///
    /// An empty sheet counts as all-zero: nothing was entered.
    pub fn is_all_zero(&self) -> bool {
        self.0.values().all(|quantity| *quantity == 0)
    }

    /// Number of denominations with an entry (including explicit zeros).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks whether the sheet has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in ascending denomination-id order.
    pub fn iter(&self) -> impl Iterator<Item = (DenominationId, u32)> + '_ {
        self.0.iter().map(|(id, quantity)| (*id, *quantity))
    }
}

impl FromIterator<(DenominationId, u32)> for DenominationCounts {
    fn from_iter<I: IntoIterator<Item = (DenominationId, u32)>>(iter: I) -> Self {
        DenominationCounts(iter.into_iter().collect())
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// One line of an accepted submission: a counted note denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownLine {
    /// Catalog id of the counted denomination.
    pub denomination_id: DenominationId,

    /// Counted quantity (always > 0 in a breakdown).
    pub quantity: u32,

    /// Line amount: quantity × face value, pinned to two decimal places so
    /// the serialized string survives store-and-reparse without drift.
    pub amount: Money,
}

impl BreakdownLine {
    /// Builds the line for one counted denomination.
    pub fn new(denomination: &Denomination, quantity: u32) -> Self {
        BreakdownLine {
            denomination_id: denomination.id,
            quantity,
            amount: denomination.value.times(quantity).rounded(),
        }
    }
}

/// The itemised payload of an accepted submission.
///
/// Holds note denominations with quantity > 0, in catalog order. Serializes
/// as a plain JSON array (the `denominationBreakdown` field of the wire
/// payload).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown(Vec<BreakdownLine>);

impl Breakdown {
    /// Wraps already-filtered lines.
    pub fn new(lines: Vec<BreakdownLine>) -> Self {
        Breakdown(lines)
    }

    /// Returns the lines in catalog order.
    pub fn lines(&self) -> &[BreakdownLine] {
        &self.0
    }

    /// Sums the line amounts.
    pub fn total(&self) -> Money {
        self.0.iter().map(|line| line.amount).sum()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks whether the breakdown has no lines.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn note(id: DenominationId, value: &str, sort_order: i32) -> Denomination {
        Denomination {
            id,
            name: format!("Rs {} note", value),
            value: Money::parse(value).unwrap(),
            kind: DenominationKind::Note,
            sort_order,
        }
    }

    #[test]
    fn test_counts_default_to_zero() {
        let counts = DenominationCounts::new();
        assert_eq!(counts.get(42), 0);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_counts_set_and_get() {
        let mut counts = DenominationCounts::new();
        counts.set(1, 2);
        counts.set(2, 3);
        counts.set(1, 5); // replaces

        assert_eq!(counts.get(1), 5);
        assert_eq!(counts.get(2), 3);
        assert_eq!(counts.get(3), 0);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_counts_all_zero() {
        let mut counts = DenominationCounts::new();
        assert!(counts.is_all_zero()); // nothing entered

        counts.set(1, 0);
        counts.set(2, 0);
        assert!(counts.is_all_zero()); // explicit zeros

        counts.set(2, 1);
        assert!(!counts.is_all_zero());
    }

    #[test]
    fn test_counts_from_iter() {
        let counts: DenominationCounts = [(1, 2), (2, 3), (3, 500)].into_iter().collect();
        assert_eq!(counts.get(1), 2);
        assert_eq!(counts.get(3), 500);
        assert_eq!(counts.iter().count(), 3);
    }

    #[test]
    fn test_register_mode_display_and_parse() {
        assert_eq!(RegisterMode::Opening.to_string(), "opening");
        assert_eq!(RegisterMode::Closing.to_string(), "closing");

        assert_eq!("opening".parse::<RegisterMode>().unwrap(), RegisterMode::Opening);
        assert_eq!("CLOSE".parse::<RegisterMode>().unwrap(), RegisterMode::Closing);
        assert!("midday".parse::<RegisterMode>().is_err());
    }

    #[test]
    fn test_register_mode_default() {
        assert_eq!(RegisterMode::default(), RegisterMode::Opening);
    }

    #[test]
    fn test_denomination_kind_checks() {
        let five_thousand = note(1, "5000", 1);
        assert!(five_thousand.is_note());
        assert!(!five_thousand.is_coin());

        let coin = Denomination {
            kind: DenominationKind::Coin,
            ..note(3, "1", 9)
        };
        assert!(coin.is_coin());
    }

    #[test]
    fn test_breakdown_line_wire_shape() {
        let line = BreakdownLine::new(&note(1, "5000", 1), 2);
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(
            value,
            json!({
                "denominationId": 1,
                "quantity": 2,
                "amount": "10000.00",
            })
        );
    }

    #[test]
    fn test_breakdown_total_and_array_form() {
        let breakdown = Breakdown::new(vec![
            BreakdownLine::new(&note(1, "5000", 1), 2),
            BreakdownLine::new(&note(2, "1000", 2), 3),
        ]);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown.total(), Money::parse("13000").unwrap());

        let value = serde_json::to_value(&breakdown).unwrap();
        assert!(value.is_array());
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_denomination_wire_shape_uses_camel_case() {
        let value = serde_json::to_value(note(1, "5000", 1)).unwrap();
        assert!(value.get("sortOrder").is_some());
        assert!(value.get("sort_order").is_none());
    }
}
