//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  WHY NOT INTEGER CENTS HERE?                                            │
//! │    Declared balances are operator-typed strings ("99.994").             │
//! │    The balance check is |declared − counted| < 0.01, so sub-cent        │
//! │    digits must survive all the way to the comparison.                   │
//! │    99.994 as cents is 9999 or 10000 — either way the 0.006             │
//! │    difference is gone before we can measure it.                         │
//! │                                                                         │
//! │  OUR SOLUTION: Exact Decimals (rust_decimal)                            │
//! │    Parse the string once at the boundary, keep every digit,             │
//! │    round only for display and wire amounts.                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cashup_core::money::Money;
//!
//! // Parse from boundary input (the only way raw text becomes Money)
//! let declared = Money::parse("99.994").unwrap();
//! let counted = Money::parse("100").unwrap();
//!
//! // Exact arithmetic
//! let difference = (counted - declared).abs();
//! assert!(difference < Money::parse("0.01").unwrap());
//!
//! // Display is always two decimal places
//! assert_eq!(counted.to_string(), "100.00");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::error::MoneyError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents an exact decimal monetary value.
///
/// ## Design Decisions
/// - **Decimal (signed)**: Keeps operator-typed sub-cent digits, allows
///   negative intermediate differences
/// - **Single field tuple struct**: Zero-cost abstraction over `Decimal`
/// - **String serde**: Serializes as a plain decimal string, matching how the
///   backing store renders NUMERIC columns
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Denomination.value ──► quantity × value ──► calculated total           │
/// │                                                                         │
/// │  "declared balance" input ──► Money::parse ──► balance evaluation       │
/// │                                                                         │
/// │  BreakdownLine.amount ──► Serialized as "10000.00" on the wire          │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(Decimal);

impl Money {
    /// Parses a Money value from boundary text (form input, NUMERIC column).
    ///
    /// Leading and trailing whitespace is ignored. Anything that is not a
    /// plain decimal number is rejected; there is no partial-prefix parsing.
    ///
    /// ## Example
    /// ```rust
    /// use cashup_core::money::Money;
    ///
    /// assert!(Money::parse("13000").is_ok());
    /// assert!(Money::parse(" 42.50 ").is_ok());
    /// assert!(Money::parse("").is_err());
    /// assert!(Money::parse("12abc").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let trimmed = input.trim();
        Decimal::from_str(trimmed)
            .map(Money)
            .map_err(|_| MoneyError::InvalidAmount {
                input: input.to_string(),
            })
    }

    /// Wraps an already-exact decimal value.
    #[inline]
    pub fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the exact inner decimal.
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use cashup_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert!(zero.is_zero());
    /// ```
    #[inline]
    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    ///
    /// ## Example
    /// ```rust
    /// use cashup_core::money::Money;
    ///
    /// let shortfall = Money::parse("-5.50").unwrap();
    /// assert_eq!(shortfall.abs().to_string(), "5.50");
    /// ```
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a face value by a counted quantity.
    ///
    /// ## Example
    /// ```rust
    /// use cashup_core::money::Money;
    ///
    /// let note = Money::parse("5000").unwrap();
    /// assert_eq!(note.times(2).to_string(), "10000.00");
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Denomination: Rs 5000 note
    /// Counted: 2
    ///      │
    ///      ▼
    /// times(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line amount: 10000.00
    /// ```
    #[inline]
    pub fn times(&self, quantity: u32) -> Self {
        Money(self.0 * Decimal::from(quantity))
    }

    /// Rounds to two decimal places and pins the scale there.
    ///
    /// Uses banker's rounding (round half to even), the convention the rest
    /// of the ecosystem expects for financial amounts. The pinned scale is
    /// what makes `5000` render and serialize as `"5000.00"`, so breakdown
    /// amounts survive a store-and-reparse round trip without drift.
    pub fn rounded(&self) -> Self {
        let mut amount = self.0.round_dp(2);
        amount.rescale(2);
        Money(amount)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money at exactly two decimal places.
///
/// ## Note
/// This is the presentation form used in rejection messages and logs.
/// Currency symbols and localization are the caller's concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rounded().0)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a counted quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, quantity: u32) -> Self {
        self.times(quantity)
    }
}

/// Summation over line amounts.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
