//! # Error Types
//!
//! The decimal engine distinguishes exactly two kinds of failure:
//!
//! - [`SyntaxError`]: malformed input text. Raised at construction from a
//!   string and never recoverable — the caller must not have produced this
//!   input in the first place.
//! - [`RangeError`]: a well-formed value used outside an operation's domain
//!   (unrecognized rounding-mode name, mantissa of zero, NaN to exact
//!   integer, ...). These indicate a programming error in the calling
//!   layer, not a data-quality issue.
//!
//! No arithmetic operation on well-formed numeric operands ever errors:
//! every NaN/Infinity/finite combination has a defined IEEE 754-2008
//! result. Errors are not retried; they propagate to the caller, which is
//! responsible for translating them into a user-facing validation failure.

use thiserror::Error;

// =============================================================================
// Syntax Error
// =============================================================================

/// Malformed decimal input text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// Empty input where a decimal literal was required.
    #[error("empty decimal literal")]
    EmptyLiteral,

    /// Input that does not conform to the decimal literal grammar:
    /// a lone `.`, a lone `-`, `-.`, doubled signs, stray characters.
    #[error("cannot parse '{input}' as a decimal number")]
    MalformedLiteral { input: String },
}

// =============================================================================
// Range Error
// =============================================================================

/// A well-formed value used outside an operation's domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Rounding-mode name not in the accepted set.
    #[error("unrecognized rounding mode: '{mode}'")]
    UnknownRoundingMode { mode: String },

    /// Attempted to construct a zero-valued rational. Zero is modeled
    /// one layer up, as a cohort sentinel.
    #[error("rational numbers cannot be zero-valued")]
    ZeroRational,

    /// Attempted to construct a rational with a zero denominator.
    #[error("rational denominators cannot be zero")]
    ZeroDenominator,

    /// Mantissa/exponent decomposition requested for a value that has
    /// none (zero, NaN, or an infinity).
    #[error("mantissa and exponent are not defined for zero, NaN, or Infinity")]
    NoDecomposition,

    /// Normality query on a value for which normality is undefined.
    #[error("normality is not defined for zero, NaN, or Infinity")]
    NormalityUndefined,

    /// Exact integer conversion of NaN, an infinity, or a value with a
    /// fractional part.
    #[error("cannot convert {value} to an exact integer")]
    NotAnInteger { value: String },

    /// `to_precision` requires at least one significant digit.
    #[error("precision must be at least one significant digit")]
    PrecisionOutOfRange,
}

// =============================================================================
// Umbrella Error
// =============================================================================

/// Either of the engine's two error kinds, for entry points that can
/// raise both (string construction feeds both grammar and invariant
/// checks).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Convenience type alias for Results with DecimalError.
pub type DecimalResult<T> = Result<T, DecimalError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_messages() {
        assert_eq!(SyntaxError::EmptyLiteral.to_string(), "empty decimal literal");
        let err = SyntaxError::MalformedLiteral {
            input: "-.".to_string(),
        };
        assert_eq!(err.to_string(), "cannot parse '-.' as a decimal number");
    }

    #[test]
    fn test_range_error_messages() {
        let err = RangeError::UnknownRoundingMode {
            mode: "nearest".to_string(),
        };
        assert_eq!(err.to_string(), "unrecognized rounding mode: 'nearest'");
        assert_eq!(
            RangeError::NoDecomposition.to_string(),
            "mantissa and exponent are not defined for zero, NaN, or Infinity"
        );
    }

    #[test]
    fn test_errors_convert_to_umbrella() {
        let err: DecimalError = SyntaxError::EmptyLiteral.into();
        assert!(matches!(err, DecimalError::Syntax(_)));

        let err: DecimalError = RangeError::PrecisionOutOfRange.into();
        assert!(matches!(err, DecimalError::Range(_)));
    }
}
