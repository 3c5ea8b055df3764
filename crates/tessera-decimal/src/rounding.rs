//! # Rounding Modes
//!
//! The named rounding modes accepted across the engine, plus the single
//! exact integer-rounding routine every layer shares. Rounding is always
//! performed on exact integer quotients — never on floating-point
//! intermediates — so a mode's behavior is identical at every precision.

use std::cmp::Ordering;
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::RangeError;

// =============================================================================
// Rounding Mode
// =============================================================================

/// How to resolve digits that cannot be kept.
///
/// The [`FromStr`] impl accepts the external API names (`"ceil"`,
/// `"floor"`, `"trunc"`, `"halfEven"`, `"halfExpand"`); an unknown name
/// is a [`RangeError`], matching the engine's two-error contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    /// Toward positive infinity.
    Ceil,
    /// Toward negative infinity.
    Floor,
    /// Toward zero.
    Trunc,
    /// To nearest; ties resolved toward the even digit. The IEEE
    /// 754-2008 default, and the default everywhere in this engine.
    ///
    /// ## Why Half-Even?
    /// Always rounding ties up introduces a systematic positive bias.
    /// Over millions of order lines, ties-to-even alternates and the
    /// bias cancels — required for financial compliance in most
    /// jurisdictions.
    #[default]
    HalfEven,
    /// To nearest; ties resolved away from zero ("schoolbook" rounding).
    HalfExpand,
}

impl FromStr for RoundingMode {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ceil" => Ok(RoundingMode::Ceil),
            "floor" => Ok(RoundingMode::Floor),
            "trunc" => Ok(RoundingMode::Trunc),
            "halfEven" => Ok(RoundingMode::HalfEven),
            "halfExpand" => Ok(RoundingMode::HalfExpand),
            other => Err(RangeError::UnknownRoundingMode {
                mode: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Exact Integer Rounding
// =============================================================================

/// Rounds `numerator / denominator` to an integer under `mode`.
///
/// `denominator` must be positive; the sign of the quotient rides on the
/// numerator, matching the [`crate::Rational`] normalization convention.
pub(crate) fn round_quotient(
    numerator: &BigInt,
    denominator: &BigInt,
    mode: RoundingMode,
) -> BigInt {
    let (quotient, remainder) = numerator.div_rem(denominator);
    if remainder.is_zero() {
        return quotient;
    }

    let negative = remainder.is_negative();
    let away = if negative {
        &quotient - BigInt::one()
    } else {
        &quotient + BigInt::one()
    };

    match mode {
        RoundingMode::Trunc => quotient,
        RoundingMode::Floor => {
            if negative {
                away
            } else {
                quotient
            }
        }
        RoundingMode::Ceil => {
            if negative {
                quotient
            } else {
                away
            }
        }
        RoundingMode::HalfEven | RoundingMode::HalfExpand => {
            let doubled = remainder.abs() * BigInt::from(2);
            match doubled.cmp(denominator) {
                Ordering::Less => quotient,
                Ordering::Greater => away,
                Ordering::Equal => {
                    if mode == RoundingMode::HalfExpand || quotient.is_odd() {
                        away
                    } else {
                        quotient
                    }
                }
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

    fn round(n: i64, d: i64, mode: RoundingMode) -> i64 {
        let result = round_quotient(&BigInt::from(n), &BigInt::from(d), mode);
        i64::try_from(result).expect("test quotients fit in i64")
    }

    #[test]
    fn test_exact_quotient_ignores_mode() {
        for mode in [
            RoundingMode::Ceil,
            RoundingMode::Floor,
            RoundingMode::Trunc,
            RoundingMode::HalfEven,
            RoundingMode::HalfExpand,
        ] {
            assert_eq!(round(10, 2, mode), 5);
            assert_eq!(round(-10, 2, mode), -5);
        }
    }

    #[test]
    fn test_directed_modes() {
        // 7/2 = 3.5, -7/2 = -3.5
        assert_eq!(round(7, 2, RoundingMode::Trunc), 3);
        assert_eq!(round(-7, 2, RoundingMode::Trunc), -3);
        assert_eq!(round(7, 2, RoundingMode::Floor), 3);
        assert_eq!(round(-7, 2, RoundingMode::Floor), -4);
        assert_eq!(round(7, 2, RoundingMode::Ceil), 4);
        assert_eq!(round(-7, 2, RoundingMode::Ceil), -3);
    }

    #[test]
    fn test_half_even_ties_go_to_even() {
        // 0.5 → 0, 1.5 → 2, 2.5 → 2, 3.5 → 4
        assert_eq!(round(1, 2, RoundingMode::HalfEven), 0);
        assert_eq!(round(3, 2, RoundingMode::HalfEven), 2);
        assert_eq!(round(5, 2, RoundingMode::HalfEven), 2);
        assert_eq!(round(7, 2, RoundingMode::HalfEven), 4);
        // Symmetric for negatives
        assert_eq!(round(-1, 2, RoundingMode::HalfEven), 0);
        assert_eq!(round(-5, 2, RoundingMode::HalfEven), -2);
    }

    #[test]
    fn test_half_expand_ties_go_away_from_zero() {
        assert_eq!(round(1, 2, RoundingMode::HalfExpand), 1);
        assert_eq!(round(5, 2, RoundingMode::HalfExpand), 3);
        assert_eq!(round(-1, 2, RoundingMode::HalfExpand), -1);
        assert_eq!(round(-5, 2, RoundingMode::HalfExpand), -3);
    }

    #[test]
    fn test_non_tie_nearest() {
        // 0.4 → 0, 0.6 → 1 in both nearest modes
        for mode in [RoundingMode::HalfEven, RoundingMode::HalfExpand] {
            assert_eq!(round(2, 5, mode), 0);
            assert_eq!(round(3, 5, mode), 1);
            assert_eq!(round(-3, 5, mode), -1);
        }
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("halfEven".parse::<RoundingMode>(), Ok(RoundingMode::HalfEven));
        assert_eq!("trunc".parse::<RoundingMode>(), Ok(RoundingMode::Trunc));
        assert!(matches!(
            "nearest".parse::<RoundingMode>(),
            Err(RangeError::UnknownRoundingMode { .. })
        ));
    }

    #[test]
    fn test_default_is_half_even() {
        assert_eq!(RoundingMode::default(), RoundingMode::HalfEven);
    }
}
