//! # Decimal128
//!
//! The public numeric type: all arithmetic, comparison, and textual I/O
//! flow through it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Decimal128                                 │
//! │                                                                     │
//! │   NaN ──────────┐                                                   │
//! │   ±Infinity ────┼── tagged special values                           │
//! │   Finite ───────┘     │                                             │
//! │                       ▼                                             │
//! │                 Decimal (cohort, quantum)                           │
//! │                       │                                             │
//! │                       ▼                                             │
//! │                 Rational (exact BigInt fraction)                    │
//! │                                                                     │
//! │   IEEE 754-2008 Decimal128 envelope, emulated exactly:              │
//! │     • 34 significant digits                                         │
//! │     • quantum ∈ [-6176, 6111]                                       │
//! │   Every constructor and operation funnels its result through one    │
//! │   clamp/round step that enforces the envelope (half-even).          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation is a total function over the four-way tag: no
//! arithmetic on well-formed operands ever errors. Errors exist only at
//! the text boundary (syntax) and on domain-restricted queries
//! (mantissa of zero, normality of NaN, ...).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::decimal::{Cohort, Decimal};
use crate::error::{DecimalResult, RangeError, SyntaxError};
use crate::rational::{digit_count, scan_literal, Rational};
use crate::rounding::{round_quotient, RoundingMode};

// =============================================================================
// Representation
// =============================================================================

#[derive(Debug, Clone)]
enum Repr {
    Nan,
    Infinity { negative: bool },
    Finite(Decimal),
}

/// An IEEE 754-2008 Decimal128 value, emulated in exact
/// arbitrary-precision arithmetic. Immutable; every operation returns a
/// new value.
///
/// ## Example
/// ```rust
/// use tessera_decimal::Decimal128;
///
/// let a: Decimal128 = "0.1".parse().unwrap();
/// let b: Decimal128 = "0.2".parse().unwrap();
/// assert_eq!(a.add(&b).to_string(), "0.3"); // not 0.30000000000000004
/// ```
#[derive(Debug, Clone)]
pub struct Decimal128 {
    repr: Repr,
}

impl Decimal128 {
    /// Coefficient width of the IEEE Decimal128 format.
    pub const MAX_SIGNIFICANT_DIGITS: u32 = 34;
    /// Smallest representable quantum.
    pub const EXPONENT_MIN: i64 = -6176;
    /// Largest representable quantum.
    pub const EXPONENT_MAX: i64 = 6111;
    /// Lower edge of the normal range; below this, values are subnormal.
    pub const NORMAL_EXPONENT_MIN: i64 = -6143;
    /// Upper edge of the normal range.
    pub const NORMAL_EXPONENT_MAX: i64 = 6144;

    // =========================================================================
    // Construction
    // =========================================================================

    pub fn nan() -> Self {
        Self { repr: Repr::Nan }
    }

    pub fn infinity() -> Self {
        Self {
            repr: Repr::Infinity { negative: false },
        }
    }

    pub fn neg_infinity() -> Self {
        Self {
            repr: Repr::Infinity { negative: true },
        }
    }

    fn infinity_signed(negative: bool) -> Self {
        Self {
            repr: Repr::Infinity { negative },
        }
    }

    fn finite(d: Decimal) -> Self {
        Self {
            repr: Repr::Finite(d),
        }
    }

    /// Lifts a canonical [`Decimal`] into the Decimal128 envelope,
    /// clamping as needed.
    pub fn from_decimal(d: Decimal) -> Self {
        Self::adjusted(d)
    }

    /// Converts a native float through its exact shortest decimal string
    /// form, distinguishing `-0`. The only place floating point touches
    /// this engine, and it is lossy by the nature of the source type.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::nan();
        }
        if value.is_infinite() {
            return Self::infinity_signed(value < 0.0);
        }
        if value == 0.0 {
            let cohort = if value.is_sign_negative() {
                Cohort::NegativeZero
            } else {
                Cohort::PositiveZero
            };
            return Self::finite(Decimal::new(cohort, 0));
        }
        let text = format!("{value}");
        Self::parse_clamped(&text).unwrap_or_else(|_| Self::nan())
    }

    /// Parses a plain/exponential literal and clamps it into the
    /// envelope. The special literals and underscore stripping are
    /// handled by [`FromStr`] before delegation here.
    ///
    /// Values whose magnitude is far outside the representable range
    /// are resolved from the scanned digit counts alone, so a literal
    /// like `1e-999999999` never materializes its power of ten.
    fn parse_clamped(s: &str) -> DecimalResult<Self> {
        let scan = scan_literal(s)?;
        let quantum = scan.exponent.saturating_sub(scan.fraction.len() as i64);

        // Coefficient digit count with leading zeros stripped.
        let mut seen_nonzero = false;
        let mut significant = 0i64;
        for b in scan.integer.bytes().chain(scan.fraction.bytes()) {
            if b != b'0' {
                seen_nonzero = true;
            }
            if seen_nonzero {
                significant += 1;
            }
        }

        let signed_zero = || {
            if scan.negative {
                Cohort::NegativeZero
            } else {
                Cohort::PositiveZero
            }
        };

        if significant == 0 {
            return Ok(Self::adjusted(Decimal::new(signed_zero(), quantum)));
        }

        let magnitude = quantum.saturating_add(significant - 1);
        if magnitude > Self::EXPONENT_MAX + Self::MAX_SIGNIFICANT_DIGITS as i64 {
            return Ok(Self::infinity_signed(scan.negative));
        }
        if magnitude < Self::EXPONENT_MIN - 2 {
            // Below half the smallest subnormal ulp: rounds to zero.
            return Ok(Self::finite(Decimal::new(signed_zero(), Self::EXPONENT_MIN)));
        }

        let value = Rational::from_scan(&scan)?;
        Ok(Self::adjusted(Decimal::new(Cohort::NonZero(value), quantum)))
    }

    // =========================================================================
    // Envelope Clamping
    // =========================================================================

    /// The clamp/round step every finite value passes through: values
    /// already inside the envelope are untouched; values whose integer
    /// part alone exceeds 34 digits overflow to signed infinity;
    /// everything else is rounded to 34 significant digits (half-even)
    /// with the quantum re-derived, flooring the quantum at
    /// [`Self::EXPONENT_MIN`] for subnormals.
    fn adjusted(d: Decimal) -> Self {
        let quantum = d.quantum();
        match d.cohort() {
            Cohort::PositiveZero | Cohort::NegativeZero => {
                let clamped = quantum.clamp(Self::EXPONENT_MIN, Self::EXPONENT_MAX);
                Self::finite(Decimal::new(d.cohort().clone(), clamped))
            }
            // Clamping is written once, for non-negative values; negative
            // operands recurse through their negation.
            Cohort::NonZero(r) if r.is_negative() => {
                Self::adjusted_positive(&r.abs(), quantum).negate()
            }
            Cohort::NonZero(r) => Self::adjusted_positive(r, quantum),
        }
    }

    fn adjusted_positive(value: &Rational, quantum: i64) -> Self {
        if (Self::EXPONENT_MIN..=Self::EXPONENT_MAX).contains(&quantum) {
            let coefficient = value.scale10(-quantum);
            debug_assert!(coefficient.is_integral());
            if digit_count(&coefficient.trunc()) <= Self::MAX_SIGNIFICANT_DIGITS as usize {
                return Self::finite(Decimal::new(Cohort::NonZero(value.clone()), quantum));
            }
        }

        if digit_count(&value.trunc()) > Self::MAX_SIGNIFICANT_DIGITS as usize {
            return Self::infinity();
        }

        let leading = value.floor_log10();
        let mut target =
            (leading - (Self::MAX_SIGNIFICANT_DIGITS as i64 - 1)).max(Self::EXPONENT_MIN);
        let scaled = value.scale10(-target);
        let mut coefficient =
            round_quotient(scaled.numerator(), scaled.denominator(), RoundingMode::HalfEven);
        if digit_count(&coefficient) > Self::MAX_SIGNIFICANT_DIGITS as usize {
            // Rounding carried into a new leading digit (999…9 → 1000…0);
            // the extra digit is a trailing zero, absorbed by the quantum.
            coefficient = coefficient / BigInt::from(10);
            target += 1;
        }
        let cohort = Cohort::from_sentinel(Rational::from_coefficient(coefficient, target), false);
        Self::finite(Decimal::new(cohort, target))
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    pub fn is_nan(&self) -> bool {
        matches!(self.repr, Repr::Nan)
    }

    pub fn is_finite(&self) -> bool {
        matches!(self.repr, Repr::Finite(_))
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self.repr, Repr::Infinity { .. })
    }

    /// True for finite zero of either sign.
    pub fn is_zero(&self) -> bool {
        matches!(&self.repr, Repr::Finite(d) if d.is_zero())
    }

    /// Sign query; NaN has no sign and reports `false`.
    pub fn is_negative(&self) -> bool {
        match &self.repr {
            Repr::Nan => false,
            Repr::Infinity { negative } => *negative,
            Repr::Finite(d) => d.is_negative(),
        }
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// IEEE addition. The result quantum is the minimum of the operand
    /// quanta (preferred-quantum rule), then clamped.
    pub fn add(&self, other: &Decimal128) -> Decimal128 {
        match (&self.repr, &other.repr) {
            (Repr::Nan, _) | (_, Repr::Nan) => Self::nan(),
            (Repr::Infinity { negative: a }, Repr::Infinity { negative: b }) => {
                if a == b {
                    self.clone()
                } else {
                    // +Infinity + -Infinity has no value
                    Self::nan()
                }
            }
            (Repr::Infinity { .. }, _) => self.clone(),
            (_, Repr::Infinity { .. }) => other.clone(),
            (Repr::Finite(x), Repr::Finite(y)) => {
                let quantum = x.quantum().min(y.quantum());
                let sum = match (x.rational(), y.rational()) {
                    (None, None) => None,
                    (Some(a), None) => Some(a.clone()),
                    (None, Some(b)) => Some(b.clone()),
                    (Some(a), Some(b)) => a.add(b),
                };
                // An exact-zero sum is negative only when both operands
                // carried a negative sign.
                let negative_zero = x.is_negative() && y.is_negative();
                let cohort = Cohort::from_sentinel(sum, negative_zero);
                Self::adjusted(Decimal::new(cohort, quantum))
            }
        }
    }

    pub fn subtract(&self, other: &Decimal128) -> Decimal128 {
        self.add(&other.negate())
    }

    /// IEEE multiplication. The result quantum is the sum of the operand
    /// quanta — a zero result keeps that quantum too, it is not simply
    /// `"0"`.
    pub fn multiply(&self, other: &Decimal128) -> Decimal128 {
        match (&self.repr, &other.repr) {
            (Repr::Nan, _) | (_, Repr::Nan) => Self::nan(),
            (Repr::Infinity { negative: a }, Repr::Infinity { negative: b }) => {
                Self::infinity_signed(a ^ b)
            }
            (Repr::Infinity { negative }, Repr::Finite(d))
            | (Repr::Finite(d), Repr::Infinity { negative }) => {
                if d.is_zero() {
                    // 0 × ±Infinity has no value
                    Self::nan()
                } else {
                    Self::infinity_signed(negative ^ d.is_negative())
                }
            }
            (Repr::Finite(x), Repr::Finite(y)) => {
                let quantum = x.quantum().saturating_add(y.quantum());
                match (x.rational(), y.rational()) {
                    (Some(a), Some(b)) => {
                        Self::adjusted(Decimal::new(Cohort::NonZero(a.mul(b)), quantum))
                    }
                    _ => {
                        let cohort = if x.is_negative() ^ y.is_negative() {
                            Cohort::NegativeZero
                        } else {
                            Cohort::PositiveZero
                        };
                        Self::adjusted(Decimal::new(cohort, quantum))
                    }
                }
            }
        }
    }

    /// IEEE division, computed by explicit long division over the
    /// coefficients.
    ///
    /// Division by a finite zero — including `0 / 0` — yields NaN, never
    /// a signed infinity. An infinite divisor absorbs a finite dividend
    /// to a signed zero.
    ///
    /// The long-division loop scales dividend/divisor by powers of ten
    /// (tracked in `adjust`) until the leading digits align, then emits
    /// one quotient digit per step. Termination: the remainder is
    /// exactly zero with `adjust >= 0`, or the result has reached 34
    /// digits. This is where repeating expansions get truncated, so the
    /// rule is load-bearing: `1/3` stops after exactly 34 threes.
    pub fn divide(&self, other: &Decimal128) -> Decimal128 {
        match (&self.repr, &other.repr) {
            (Repr::Nan, _) | (_, Repr::Nan) => Self::nan(),
            (_, Repr::Finite(y)) if y.is_zero() => Self::nan(),
            (Repr::Infinity { .. }, Repr::Infinity { .. }) => Self::nan(),
            (Repr::Infinity { negative }, Repr::Finite(y)) => {
                Self::infinity_signed(negative ^ y.is_negative())
            }
            (Repr::Finite(x), Repr::Infinity { negative }) => {
                let cohort = if x.is_negative() ^ negative {
                    Cohort::NegativeZero
                } else {
                    Cohort::PositiveZero
                };
                Self::finite(Decimal::new(cohort, 0))
            }
            (Repr::Finite(x), Repr::Finite(y)) => {
                let negative = x.is_negative() ^ y.is_negative();
                if x.is_zero() {
                    let quantum = x
                        .quantum()
                        .saturating_sub(y.quantum())
                        .clamp(Self::EXPONENT_MIN, Self::EXPONENT_MAX);
                    let cohort = if negative {
                        Cohort::NegativeZero
                    } else {
                        Cohort::PositiveZero
                    };
                    return Self::finite(Decimal::new(cohort, quantum));
                }

                let ten = BigInt::from(10);
                let mut dividend = x.coefficient().abs();
                let mut divisor = y.coefficient().abs();
                let mut adjust: i64 = 0;

                while dividend < divisor {
                    dividend *= &ten;
                    adjust += 1;
                }
                while dividend >= &divisor * &ten {
                    divisor *= &ten;
                    adjust -= 1;
                }

                let mut result = BigInt::zero();
                loop {
                    let (digit, remainder) = dividend.div_rem(&divisor);
                    result = result * &ten + digit;
                    if (remainder.is_zero() && adjust >= 0)
                        || digit_count(&result) >= Self::MAX_SIGNIFICANT_DIGITS as usize
                    {
                        break;
                    }
                    dividend = remainder * &ten;
                    adjust += 1;
                }

                let exponent = x.quantum() - (y.quantum().saturating_add(adjust));
                if negative {
                    result = -result;
                }
                let cohort =
                    Cohort::from_sentinel(Rational::from_coefficient(result, exponent), negative);
                Self::adjusted(Decimal::new(cohort, exponent))
            }
        }
    }

    /// `self - other × trunc(self / other)`, computed on absolute values
    /// with the dividend's sign restored afterward.
    pub fn remainder(&self, other: &Decimal128) -> Decimal128 {
        match (&self.repr, &other.repr) {
            (Repr::Nan, _) | (_, Repr::Nan) => Self::nan(),
            (_, Repr::Finite(y)) if y.is_zero() => Self::nan(),
            (Repr::Infinity { .. }, _) => Self::nan(),
            (Repr::Finite(_), Repr::Infinity { .. }) => self.clone(),
            (Repr::Finite(_), Repr::Finite(_)) => {
                let a = self.abs();
                let b = other.abs();
                let quotient = a.divide(&b).round(0, RoundingMode::Trunc);
                let remainder = a.subtract(&b.multiply(&quotient));
                if self.is_negative() {
                    remainder.negate()
                } else {
                    remainder
                }
            }
        }
    }

    /// Rounds to `digits` fractional digits. A quantum already coarser
    /// than the target is kept; a zero cohort keeps its sign.
    pub fn round(&self, digits: u32, mode: RoundingMode) -> Decimal128 {
        match &self.repr {
            Repr::Nan => Self::nan(),
            Repr::Infinity { .. } => self.clone(),
            Repr::Finite(d) => {
                let target = d.quantum().max(-(digits as i64));
                match d.rational() {
                    None => Self::finite(Decimal::new(d.cohort().clone(), target)),
                    Some(_) if target == d.quantum() => self.clone(),
                    Some(r) => {
                        let cohort =
                            Cohort::from_sentinel(r.round(-target, mode), r.is_negative());
                        Self::adjusted(Decimal::new(cohort, target))
                    }
                }
            }
        }
    }

    pub fn negate(&self) -> Decimal128 {
        match &self.repr {
            Repr::Nan => Self::nan(),
            Repr::Infinity { negative } => Self::infinity_signed(!negative),
            Repr::Finite(d) => Self::finite(d.negated()),
        }
    }

    pub fn abs(&self) -> Decimal128 {
        if self.is_negative() {
            self.negate()
        } else {
            self.clone()
        }
    }

    /// Exact multiplication by `10^n`; the building block for
    /// mantissa/exponent decomposition. Results leaving the envelope
    /// clamp to signed infinity or signed zero like any other operation.
    pub fn scale10(&self, n: i64) -> Decimal128 {
        match &self.repr {
            Repr::Nan => Self::nan(),
            Repr::Infinity { .. } => self.clone(),
            Repr::Finite(d) => {
                let quantum = d.quantum().saturating_add(n);
                match d.rational() {
                    None => Self::adjusted(Decimal::new(d.cohort().clone(), quantum)),
                    Some(r) => {
                        // Resolve hopeless magnitudes from digit counts
                        // before materializing a gigantic power of ten.
                        let leading = r.floor_log10().saturating_add(n);
                        if leading > Self::EXPONENT_MAX + Self::MAX_SIGNIFICANT_DIGITS as i64 {
                            return Self::infinity_signed(r.is_negative());
                        }
                        if leading < Self::EXPONENT_MIN - 2 {
                            let cohort = if r.is_negative() {
                                Cohort::NegativeZero
                            } else {
                                Cohort::PositiveZero
                            };
                            return Self::finite(Decimal::new(cohort, Self::EXPONENT_MIN));
                        }
                        Self::adjusted(Decimal::new(Cohort::NonZero(r.scale10(n)), quantum))
                    }
                }
            }
        }
    }

    // =========================================================================
    // Decomposition
    // =========================================================================

    fn nonzero_rational(&self) -> Result<&Rational, RangeError> {
        match &self.repr {
            Repr::Finite(d) => d.rational().ok_or(RangeError::NoDecomposition),
            _ => Err(RangeError::NoDecomposition),
        }
    }

    /// The `e` of the normalized `m × 10^e` form, `1 <= |m| < 10`.
    ///
    /// ## Errors
    /// [`RangeError::NoDecomposition`] on zero, NaN, or an infinity.
    pub fn exponent(&self) -> Result<i64, RangeError> {
        Ok(self.nonzero_rational()?.abs().floor_log10())
    }

    /// The `m` of the normalized `m × 10^e` form.
    pub fn mantissa(&self) -> Result<Decimal128, RangeError> {
        let e = self.exponent()?;
        Ok(self.scale10(-e))
    }

    /// Whether the normalized exponent lies in the Decimal128 normal
    /// range `[-6143, 6144]`.
    ///
    /// ## Errors
    /// [`RangeError::NormalityUndefined`] on zero, NaN, or an infinity.
    pub fn is_normal(&self) -> Result<bool, RangeError> {
        let e = self
            .nonzero_rational()
            .map_err(|_| RangeError::NormalityUndefined)?
            .abs()
            .floor_log10();
        Ok((Self::NORMAL_EXPONENT_MIN..=Self::NORMAL_EXPONENT_MAX).contains(&e))
    }

    pub fn is_subnormal(&self) -> Result<bool, RangeError> {
        let e = self
            .nonzero_rational()
            .map_err(|_| RangeError::NormalityUndefined)?
            .abs()
            .floor_log10();
        Ok(e < Self::NORMAL_EXPONENT_MIN)
    }

    /// Exact integer conversion.
    ///
    /// ## Errors
    /// [`RangeError::NotAnInteger`] on NaN, an infinity, or any value
    /// with a fractional part.
    pub fn to_bigint(&self) -> Result<BigInt, RangeError> {
        match &self.repr {
            Repr::Finite(d) => match d.rational() {
                None => Ok(BigInt::zero()),
                Some(r) if r.is_integral() => Ok(r.trunc()),
                Some(_) => Err(RangeError::NotAnInteger {
                    value: self.to_string(),
                }),
            },
            _ => Err(RangeError::NotAnInteger {
                value: self.to_string(),
            }),
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// The full decimal form at the value's own quantum, trailing zeros
    /// preserved: the `"1.50"`-stays-`"1.50"` rendering, and the exact
    /// inverse of parsing for every finite value.
    pub fn to_fixed_exact(&self) -> String {
        match &self.repr {
            Repr::Nan => "NaN".to_string(),
            Repr::Infinity { negative } => infinity_literal(*negative).to_string(),
            Repr::Finite(d) => {
                let fraction_digits = if d.quantum() < 0 {
                    (-d.quantum()) as u32
                } else {
                    0
                };
                match d.rational() {
                    None => zero_fixed(d.is_negative(), fraction_digits),
                    Some(r) if fraction_digits > 0 => r.to_fixed(fraction_digits),
                    Some(r) => r.to_exact_string(),
                }
            }
        }
    }

    /// Exactly `digits` fractional digits, rounding half-even first and
    /// padding with zeros as needed.
    pub fn to_fixed(&self, digits: u32) -> String {
        match &self.repr {
            Repr::Nan => "NaN".to_string(),
            Repr::Infinity { negative } => infinity_literal(*negative).to_string(),
            Repr::Finite(d) => match d.rational() {
                None => zero_fixed(d.is_negative(), digits),
                Some(r) => match r.round(digits as i64, RoundingMode::HalfEven) {
                    None => zero_fixed(r.is_negative(), digits),
                    Some(rounded) => rounded.to_fixed(digits),
                },
            },
        }
    }

    /// Exactly `digits` significant digits, switching to exponential
    /// form when the integer part alone would need more digits than
    /// requested.
    ///
    /// ## Errors
    /// [`RangeError::PrecisionOutOfRange`] when `digits` is zero.
    pub fn to_precision(&self, digits: u32) -> Result<String, RangeError> {
        if digits == 0 {
            return Err(RangeError::PrecisionOutOfRange);
        }
        match &self.repr {
            Repr::Nan => Ok("NaN".to_string()),
            Repr::Infinity { negative } => Ok(infinity_literal(*negative).to_string()),
            Repr::Finite(d) => match d.rational() {
                None => Ok(zero_fixed(d.is_negative(), digits - 1)),
                Some(r) => {
                    let leading = r.abs().floor_log10();
                    let places = digits as i64 - 1 - leading;
                    let rounded = match r.round(places, RoundingMode::HalfEven) {
                        Some(v) => v,
                        // A nonzero value never rounds away at its own
                        // leading-digit precision.
                        None => r.clone(),
                    };
                    // Rounding may have carried into a new leading digit.
                    let leading = rounded.abs().floor_log10();
                    if leading + 1 > digits as i64 {
                        Ok(exponential_string(&rounded, digits - 1))
                    } else {
                        Ok(rounded.to_fixed((digits as i64 - 1 - leading) as u32))
                    }
                }
            },
        }
    }

    /// Mantissa-times-power-of-ten form with `digits` fractional digits
    /// in the mantissa, e.g. `1.23e+2`.
    pub fn to_exponential(&self, digits: u32) -> String {
        match &self.repr {
            Repr::Nan => "NaN".to_string(),
            Repr::Infinity { negative } => infinity_literal(*negative).to_string(),
            Repr::Finite(d) => match d.rational() {
                None => {
                    let mut out = zero_fixed(d.is_negative(), digits);
                    out.push_str("e+0");
                    out
                }
                Some(r) => exponential_string(r, digits),
            },
        }
    }
}

// =============================================================================
// Rendering Helpers
// =============================================================================

fn infinity_literal(negative: bool) -> &'static str {
    if negative {
        "-Infinity"
    } else {
        "Infinity"
    }
}

fn zero_fixed(negative: bool, digits: u32) -> String {
    let mut out = String::with_capacity(2 + digits as usize);
    if negative {
        out.push('-');
    }
    out.push('0');
    if digits > 0 {
        out.push('.');
        for _ in 0..digits {
            out.push('0');
        }
    }
    out
}

/// `m.mmm…e±x` for a nonzero value, with `fraction_digits` mantissa
/// fraction digits rounded half-even.
fn exponential_string(value: &Rational, fraction_digits: u32) -> String {
    let mut exponent = value.abs().floor_log10();
    let mut mantissa = value.scale10(-exponent);
    if let Some(rounded) = mantissa.round(fraction_digits as i64, RoundingMode::HalfEven) {
        mantissa = rounded;
    }
    // 9.99… can round up to 10; renormalize.
    if mantissa.abs().floor_log10() >= 1 {
        mantissa = mantissa.scale10(-1);
        exponent += 1;
    }
    format!(
        "{}e{}{}",
        mantissa.to_fixed(fraction_digits),
        if exponent < 0 { '-' } else { '+' },
        exponent.abs()
    )
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl FromStr for Decimal128 {
    type Err = crate::error::DecimalError;

    /// Accepts plain and exponential decimal literals with an optional
    /// leading `+`, underscores as insignificant digit separators, and
    /// the case-sensitive literals `NaN`, `Infinity`, `-Infinity`.
    fn from_str(s: &str) -> DecimalResult<Self> {
        match s {
            "" => Err(SyntaxError::EmptyLiteral.into()),
            "NaN" => Ok(Self::nan()),
            "Infinity" | "+Infinity" => Ok(Self::infinity()),
            "-Infinity" => Ok(Self::neg_infinity()),
            _ if s.contains('_') => Self::parse_clamped(&s.replace('_', "")),
            _ => Self::parse_clamped(s),
        }
    }
}

impl fmt::Display for Decimal128 {
    /// Shortest form: trailing fractional zeros trimmed. Use
    /// [`Decimal128::to_fixed_exact`] to preserve them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full = self.to_fixed_exact();
        if full.contains('.') {
            f.write_str(full.trim_end_matches('0').trim_end_matches('.'))
        } else {
            f.write_str(&full)
        }
    }
}

impl PartialEq for Decimal128 {
    /// Value equality: quanta are ignored (`1.5 == 1.50`), positive and
    /// negative zero are equal, NaN is equal to nothing.
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Decimal128 {
    /// `None` iff either operand is NaN; otherwise the total order
    /// `-Infinity < negative < zero < positive < Infinity`.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (&self.repr, &other.repr) {
            (Repr::Nan, _) | (_, Repr::Nan) => None,
            (Repr::Infinity { negative: a }, Repr::Infinity { negative: b }) => Some(b.cmp(a)),
            (Repr::Infinity { negative }, _) => Some(if *negative {
                Ordering::Less
            } else {
                Ordering::Greater
            }),
            (_, Repr::Infinity { negative }) => Some(if *negative {
                Ordering::Greater
            } else {
                Ordering::Less
            }),
            (Repr::Finite(x), Repr::Finite(y)) => match (x.rational(), y.rational()) {
                (None, None) => Some(Ordering::Equal),
                (Some(r), None) => Some(if r.is_negative() {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }),
                (None, Some(r)) => Some(if r.is_negative() {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }),
                (Some(a), Some(b)) => Some(a.cmp(b)),
            },
        }
    }
}

impl From<BigInt> for Decimal128 {
    fn from(value: BigInt) -> Self {
        let cohort = Cohort::from_sentinel(Rational::from_coefficient(value, 0), false);
        Self::adjusted(Decimal::new(cohort, 0))
    }
}

impl From<i64> for Decimal128 {
    fn from(value: i64) -> Self {
        BigInt::from(value).into()
    }
}

impl Serialize for Decimal128 {
    /// Serializes through the exact string form (quantum preserved), so
    /// `"1.50"` survives a round trip as `"1.50"`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_fixed_exact())
    }
}

impl<'de> Deserialize<'de> for Decimal128 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
