//! # Canonical Decimals
//!
//! A decimal value as a *(cohort, quantum)* pair:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  "1.50"  →  cohort = 3/2 (the mathematical value)                   │
//! │             quantum = -2  (two fractional digits)                   │
//! │                                                                     │
//! │  "1.5"   →  cohort = 3/2                                            │
//! │             quantum = -1                                            │
//! │                                                                     │
//! │  Same number, different members of the same cohort. The quantum is  │
//! │  what makes "1.50" print as "1.50" and not "1.5".                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cohort carries the exact mathematical value; the quantum carries
//! the precision with which it was measured. Keeping them separate means
//! arithmetic never has to reverse-engineer trailing zeros out of a
//! coefficient.
//!
//! Zero is explicit here: [`Cohort`] is a three-way sum type with signed
//! zero variants, so every consumer is forced by the compiler to decide
//! what `-0` means for its operation.

use num_bigint::BigInt;

use crate::error::{DecimalResult, SyntaxError};
use crate::rational::{scan_literal, Rational};

// =============================================================================
// Cohort
// =============================================================================

/// The mathematical value of a decimal, with signed zero made explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cohort {
    PositiveZero,
    NegativeZero,
    /// Any nonzero value, held exactly.
    NonZero(Rational),
}

impl Cohort {
    pub fn is_zero(&self) -> bool {
        !matches!(self, Cohort::NonZero(_))
    }

    /// True for negative zero and negative nonzero values.
    pub fn is_negative(&self) -> bool {
        match self {
            Cohort::PositiveZero => false,
            Cohort::NegativeZero => true,
            Cohort::NonZero(r) => r.is_negative(),
        }
    }

    pub fn negated(&self) -> Cohort {
        match self {
            Cohort::PositiveZero => Cohort::NegativeZero,
            Cohort::NegativeZero => Cohort::PositiveZero,
            Cohort::NonZero(r) => Cohort::NonZero(r.neg()),
        }
    }

    /// Lifts the zero sentinel into a signed-zero cohort: `None` becomes
    /// a zero whose sign is `negative_zero`.
    pub(crate) fn from_sentinel(value: Option<Rational>, negative_zero: bool) -> Cohort {
        match value {
            Some(r) => Cohort::NonZero(r),
            None if negative_zero => Cohort::NegativeZero,
            None => Cohort::PositiveZero,
        }
    }
}

// =============================================================================
// Decimal
// =============================================================================

/// A canonical decimal: an exact value at an explicit precision.
///
/// Unlike [`crate::Decimal128`], a `Decimal` is unbounded in both digits
/// and quantum; it is the intermediate form between parsed text and the
/// 34-digit clamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    cohort: Cohort,
    quantum: i64,
}

impl Decimal {
    pub fn new(cohort: Cohort, quantum: i64) -> Self {
        Self { cohort, quantum }
    }

    /// Parses a decimal literal into its canonical *(cohort, quantum)*
    /// form. The quantum records exactly the fractional digits and
    /// exponent the text carried: `"1.50"` gets quantum −2, `"1.5e1"`
    /// gets 0.
    pub fn parse(s: &str) -> DecimalResult<Self> {
        if s.is_empty() {
            return Err(SyntaxError::EmptyLiteral.into());
        }
        let scan = scan_literal(s)?;
        let quantum = scan.exponent - scan.fraction.len() as i64;
        let all_zero = scan
            .integer
            .bytes()
            .chain(scan.fraction.bytes())
            .all(|b| b == b'0');
        let cohort = if all_zero {
            if scan.negative {
                Cohort::NegativeZero
            } else {
                Cohort::PositiveZero
            }
        } else {
            Cohort::NonZero(Rational::from_scan(&scan)?)
        };
        Ok(Self { cohort, quantum })
    }

    pub fn cohort(&self) -> &Cohort {
        &self.cohort
    }

    pub fn quantum(&self) -> i64 {
        self.quantum
    }

    /// The nonzero value, or `None` for either zero.
    pub fn rational(&self) -> Option<&Rational> {
        match &self.cohort {
            Cohort::NonZero(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.cohort.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.cohort.is_negative()
    }

    pub fn negated(&self) -> Decimal {
        Decimal {
            cohort: self.cohort.negated(),
            quantum: self.quantum,
        }
    }

    /// The integer coefficient: `cohort × 10^(−quantum)`.
    ///
    /// The constructors maintain that the cohort is always an integer
    /// multiple of `10^quantum`, so this conversion is exact.
    pub fn coefficient(&self) -> BigInt {
        match &self.cohort {
            Cohort::PositiveZero | Cohort::NegativeZero => BigInt::from(0),
            Cohort::NonZero(r) => {
                let scaled = r.scale10(-self.quantum);
                debug_assert!(scaled.is_integral());
                scaled.trunc()
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tracks_quantum() {
        let d = Decimal::parse("1.50").unwrap();
        assert_eq!(d.quantum(), -2);
        assert_eq!(d.coefficient(), BigInt::from(150));

        let d = Decimal::parse("1.5").unwrap();
        assert_eq!(d.quantum(), -1);
        assert_eq!(d.coefficient(), BigInt::from(15));

        let d = Decimal::parse("1.5e1").unwrap();
        assert_eq!(d.quantum(), 0);
        assert_eq!(d.coefficient(), BigInt::from(15));

        let d = Decimal::parse("42").unwrap();
        assert_eq!(d.quantum(), 0);
        assert_eq!(d.coefficient(), BigInt::from(42));
    }

    #[test]
    fn test_parse_signed_zero() {
        let d = Decimal::parse("0.00").unwrap();
        assert_eq!(d.cohort(), &Cohort::PositiveZero);
        assert_eq!(d.quantum(), -2);
        assert!(!d.is_negative());

        let d = Decimal::parse("-0.00").unwrap();
        assert_eq!(d.cohort(), &Cohort::NegativeZero);
        assert!(d.is_negative());
        assert!(d.is_zero());

        let d = Decimal::parse("0e5").unwrap();
        assert_eq!(d.cohort(), &Cohort::PositiveZero);
        assert_eq!(d.quantum(), 5);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Decimal::parse("").is_err());
        assert!(Decimal::parse("abc").is_err());
        assert!(Decimal::parse("1.").is_err());
        assert!(Decimal::parse("1.2.3").is_err());
    }

    #[test]
    fn test_negated_flips_zero_sign() {
        let d = Decimal::parse("0").unwrap().negated();
        assert_eq!(d.cohort(), &Cohort::NegativeZero);
        let d = d.negated();
        assert_eq!(d.cohort(), &Cohort::PositiveZero);

        let d = Decimal::parse("1.5").unwrap().negated();
        assert!(d.is_negative());
        assert_eq!(d.coefficient(), BigInt::from(-15));
    }

    #[test]
    fn test_cohort_sentinel_lift() {
        assert_eq!(Cohort::from_sentinel(None, false), Cohort::PositiveZero);
        assert_eq!(Cohort::from_sentinel(None, true), Cohort::NegativeZero);
        let r = Rational::new(BigInt::from(1), BigInt::from(2)).unwrap();
        assert!(matches!(
            Cohort::from_sentinel(Some(r), true),
            Cohort::NonZero(_)
        ));
    }
}
