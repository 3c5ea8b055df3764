//! # Exact Rational Arithmetic
//!
//! The substrate for all decimal math: an exact fraction over
//! arbitrary-precision integers, with no floating-point intermediate
//! anywhere.
//!
//! ## The Floating Point Problem
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  In binary floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  These values are money. We keep every value as an exact fraction   │
//! │  of big integers and only ever round once, explicitly, at a named   │
//! │  precision under a named mode.                                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - A `Rational` is **never zero-valued**. Zero is modeled one layer up
//!   (as a signed cohort sentinel), which keeps sign-of-zero handling
//!   exhaustive and compiler-checked. Operations that can produce zero
//!   (`add`, `sub`, `round`) return `Option<Rational>` with `None` as
//!   the zero sentinel.
//! - The denominator is always positive and nonzero; the sign rides on
//!   the numerator.
//! - Fractions are reduced to lowest terms at construction.
//! - Instances are immutable: every operation returns a new value.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;

use crate::error::{DecimalResult, RangeError, SyntaxError};
use crate::rounding::{round_quotient, RoundingMode};

/// Upper bound on digits emitted by [`Rational::to_exact_string`] for a
/// non-terminating expansion. Every value that reaches rendering inside
/// the Decimal128 layer is a ratio of decimal powers and terminates well
/// before this; the bound only guards direct use on values like 1/3.
pub(crate) const EXACT_EXPANSION_LIMIT: usize = 6400;

// =============================================================================
// Helpers shared across the numeric layers
// =============================================================================

/// `10^exp` as a big integer, computed by integer exponentiation.
pub(crate) fn pow10(exp: u64) -> BigInt {
    num_traits::pow(BigInt::from(10), exp as usize)
}

/// Number of decimal digits in `n`'s magnitude (`0` counts as one digit).
pub(crate) fn digit_count(n: &BigInt) -> usize {
    n.magnitude().to_str_radix(10).len()
}

// =============================================================================
// Scanned Literal
// =============================================================================

/// The decomposition of a decimal literal produced by [`scan_literal`]:
/// one explicit character scan instead of layered regular expressions, so
/// acceptance behavior is visible in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScannedLiteral<'a> {
    pub negative: bool,
    pub integer: &'a str,
    pub fraction: &'a str,
    pub exponent: i64,
}

/// Scans `[+|-]?(digits[.digits]?|.digits)([eE][+-]?digits)?`.
///
/// Underscore separators are the caller's concern (stripped one layer
/// up); this scanner sees pure literals. Rejects the empty string, a
/// bare sign, a bare `.`, a trailing `.` with no fraction digits, and
/// any non-digit in the mantissa or exponent.
pub(crate) fn scan_literal(s: &str) -> Result<ScannedLiteral<'_>, SyntaxError> {
    let malformed = || SyntaxError::MalformedLiteral {
        input: s.to_string(),
    };

    let (negative, rest) = match s.as_bytes().first() {
        Some(&b'+') => (false, &s[1..]),
        Some(&b'-') => (true, &s[1..]),
        _ => (false, s),
    };

    let (mantissa, exponent) = match rest.find(['e', 'E']) {
        None => (rest, 0i64),
        Some(idx) => {
            let exp_text = &rest[idx + 1..];
            let exp_digits = exp_text.strip_prefix(['+', '-']).unwrap_or(exp_text);
            if exp_digits.is_empty() || !exp_digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            let value: i64 = exp_text.parse().map_err(|_| malformed())?;
            (&rest[..idx], value)
        }
    };

    let (integer, fraction) = match mantissa.split_once('.') {
        None => (mantissa, ""),
        Some((integer, fraction)) => {
            if fraction.is_empty() {
                return Err(malformed());
            }
            (integer, fraction)
        }
    };

    if integer.is_empty() && fraction.is_empty() {
        return Err(malformed());
    }
    if !integer.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(malformed());
    }

    Ok(ScannedLiteral {
        negative,
        integer,
        fraction,
        exponent,
    })
}

// =============================================================================
// Rational
// =============================================================================

/// An exact, nonzero rational number.
///
/// ## Example
/// ```rust
/// use num_bigint::BigInt;
/// use tessera_decimal::Rational;
///
/// let half = Rational::new(BigInt::from(1), BigInt::from(2)).unwrap();
/// assert_eq!(half.to_fixed(2), "0.50");
///
/// // Zero construction is a range error: zero lives one layer up.
/// assert!(Rational::new(BigInt::from(0), BigInt::from(2)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rational {
    numerator: BigInt,
    denominator: BigInt,
}

impl Rational {
    /// Creates a reduced rational from a numerator/denominator pair.
    ///
    /// ## Errors
    /// - [`RangeError::ZeroDenominator`] when `denominator` is zero
    /// - [`RangeError::ZeroRational`] when `numerator` is zero
    pub fn new(numerator: BigInt, denominator: BigInt) -> Result<Self, RangeError> {
        if denominator.is_zero() {
            return Err(RangeError::ZeroDenominator);
        }
        if numerator.is_zero() {
            return Err(RangeError::ZeroRational);
        }
        Ok(Self::reduced(numerator, denominator))
    }

    /// `coefficient × 10^exponent` as an exact fraction, or `None` for a
    /// zero coefficient.
    pub(crate) fn from_coefficient(coefficient: BigInt, exponent: i64) -> Option<Self> {
        if coefficient.is_zero() {
            return None;
        }
        Some(Self::reduced(coefficient, BigInt::one()).scale10(exponent))
    }

    /// Normalizes sign onto the numerator and reduces by the gcd.
    /// Callers guarantee both arguments are nonzero.
    fn reduced(mut numerator: BigInt, mut denominator: BigInt) -> Self {
        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }
        let divisor = numerator.gcd(&denominator);
        Self {
            numerator: numerator / &divisor,
            denominator: denominator / divisor,
        }
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    /// True when the value is an exact integer (denominator one).
    pub fn is_integral(&self) -> bool {
        self.denominator.is_one()
    }

    /// The integer part, truncated toward zero.
    pub fn trunc(&self) -> BigInt {
        let (quotient, _) = self.numerator.div_rem(&self.denominator);
        quotient
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Exact sum; `None` is the zero sentinel.
    pub fn add(&self, other: &Rational) -> Option<Rational> {
        let numerator =
            &self.numerator * &other.denominator + &other.numerator * &self.denominator;
        if numerator.is_zero() {
            return None;
        }
        Some(Self::reduced(
            numerator,
            &self.denominator * &other.denominator,
        ))
    }

    /// Exact difference; `None` is the zero sentinel.
    pub fn sub(&self, other: &Rational) -> Option<Rational> {
        self.add(&other.neg())
    }

    /// Exact product. Nonzero factors always produce a nonzero product,
    /// so this is total.
    pub fn mul(&self, other: &Rational) -> Rational {
        Self::reduced(
            &self.numerator * &other.numerator,
            &self.denominator * &other.denominator,
        )
    }

    pub fn neg(&self) -> Rational {
        Rational {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }

    pub fn abs(&self) -> Rational {
        Rational {
            numerator: self.numerator.abs(),
            denominator: self.denominator.clone(),
        }
    }

    /// Exact multiplication by `10^n`, implemented as a
    /// numerator/denominator adjustment — never through floating
    /// multiplication.
    pub fn scale10(&self, n: i64) -> Rational {
        if n >= 0 {
            Self::reduced(
                &self.numerator * pow10(n as u64),
                self.denominator.clone(),
            )
        } else {
            Self::reduced(
                self.numerator.clone(),
                &self.denominator * pow10(n.unsigned_abs()),
            )
        }
    }

    /// Exact rounding to `digits` decimal places under `mode`. Negative
    /// `digits` rounds to the left of the decimal point (tens,
    /// hundreds, ...). `None` is the zero sentinel.
    pub fn round(&self, digits: i64, mode: RoundingMode) -> Option<Rational> {
        let scaled = self.scale10(digits);
        let rounded = round_quotient(&scaled.numerator, &scaled.denominator, mode);
        Self::from_coefficient(rounded, -digits)
    }

    /// `floor(log10(|self|))`: the power of ten of the leading
    /// significant digit. Computed from digit counts with a single
    /// exact-comparison correction.
    pub(crate) fn floor_log10(&self) -> i64 {
        let numerator_digits = digit_count(&self.numerator) as i64;
        let denominator_digits = digit_count(&self.denominator) as i64;
        let mut exponent = numerator_digits - denominator_digits;
        let scaled = self.abs().scale10(-exponent);
        let ten = BigInt::from(10);
        if scaled.numerator >= &scaled.denominator * &ten {
            exponent += 1;
        } else if scaled.numerator < scaled.denominator {
            exponent -= 1;
        }
        exponent
    }

    // =========================================================================
    // Rendering and Parsing
    // =========================================================================

    /// Renders with exactly `digits` fractional digits, truncating any
    /// further expansion. Callers that need a rounded rendering round
    /// first and then call this on the exact result.
    pub fn to_fixed(&self, digits: u32) -> String {
        let mut out = String::new();
        if self.is_negative() {
            out.push('-');
        }
        let magnitude = self.numerator.abs();
        let (integer, mut remainder) = magnitude.div_rem(&self.denominator);
        out.push_str(&integer.to_string());
        if digits > 0 {
            let ten = BigInt::from(10);
            out.push('.');
            for _ in 0..digits {
                remainder *= &ten;
                let (digit, next) = remainder.div_rem(&self.denominator);
                out.push_str(&digit.to_string());
                remainder = next;
            }
        }
        out
    }

    /// The full exact decimal expansion where the expansion terminates;
    /// otherwise a bounded expansion truncated at
    /// [`EXACT_EXPANSION_LIMIT`] fractional digits.
    pub fn to_exact_string(&self) -> String {
        let mut out = String::new();
        if self.is_negative() {
            out.push('-');
        }
        let magnitude = self.numerator.abs();
        let (integer, mut remainder) = magnitude.div_rem(&self.denominator);
        out.push_str(&integer.to_string());
        if remainder.is_zero() {
            return out;
        }
        let ten = BigInt::from(10);
        out.push('.');
        let mut emitted = 0usize;
        while !remainder.is_zero() && emitted < EXACT_EXPANSION_LIMIT {
            remainder *= &ten;
            let (digit, next) = remainder.div_rem(&self.denominator);
            out.push_str(&digit.to_string());
            remainder = next;
            emitted += 1;
        }
        out
    }

    /// Parses a plain decimal/exponential literal into an exact
    /// fraction.
    ///
    /// Precondition: the input is already free of underscore and
    /// whitespace edge cases (handled one layer up). A zero-valued
    /// literal is a caller error — zero forms are detected before
    /// delegation to this layer — and surfaces as
    /// [`RangeError::ZeroRational`].
    pub fn from_decimal_literal(s: &str) -> DecimalResult<Rational> {
        let scan = scan_literal(s)?;
        Self::from_scan(&scan)
    }

    /// Builds the exact fraction for an already-scanned literal.
    pub(crate) fn from_scan(scan: &ScannedLiteral<'_>) -> DecimalResult<Rational> {
        let mut digits = String::with_capacity(scan.integer.len() + scan.fraction.len());
        digits.push_str(scan.integer);
        digits.push_str(scan.fraction);
        let coefficient: BigInt = digits.parse().map_err(|_| SyntaxError::MalformedLiteral {
            input: digits.clone(),
        })?;
        let signed = if scan.negative {
            -coefficient
        } else {
            coefficient
        };
        let quantum = scan.exponent.saturating_sub(scan.fraction.len() as i64);
        Self::from_coefficient(signed, quantum).ok_or_else(|| RangeError::ZeroRational.into())
    }
}

// =============================================================================
// Ordering
// =============================================================================

impl Ord for Rational {
    /// Exact three-way comparison by cross-multiplication. Denominators
    /// are positive by invariant, so the comparison direction is
    /// preserved.
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
