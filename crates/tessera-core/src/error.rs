//! # Core Error Types
//!
//! The domain layer's single error enum. Decimal-engine failures pass
//! through transparently; the remaining variants are domain validation
//! failures raised before any arithmetic runs.

use thiserror::Error;

use tessera_decimal::{DecimalError, RangeError, SyntaxError};

// =============================================================================
// Core Error
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A failure surfaced by the decimal engine (syntax or range).
    #[error(transparent)]
    Decimal(#[from] DecimalError),

    /// An order line quantity that is not a plain unsigned decimal.
    #[error("invalid quantity '{value}': {reason}")]
    InvalidQuantity { value: String, reason: String },

    /// An order line price that does not denote a finite amount.
    #[error("invalid price '{value}': {reason}")]
    InvalidPrice { value: String, reason: String },

    /// A quantity whose whole-unit count exceeds the per-line card limit.
    #[error("quantity '{requested}' exceeds the per-line limit of {max} whole units")]
    QuantityTooLarge { requested: String, max: u64 },
}

impl From<SyntaxError> for CoreError {
    fn from(err: SyntaxError) -> Self {
        CoreError::Decimal(err.into())
    }
}

impl From<RangeError> for CoreError {
    fn from(err: RangeError) -> Self {
        CoreError::Decimal(err.into())
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_errors_pass_through() {
        let err: CoreError = RangeError::PrecisionOutOfRange.into();
        assert!(matches!(err, CoreError::Decimal(_)));
        assert_eq!(
            err.to_string(),
            "precision must be at least one significant digit"
        );
    }

    #[test]
    fn test_domain_error_messages() {
        let err = CoreError::QuantityTooLarge {
            requested: "50000".to_string(),
            max: 10_000,
        };
        assert_eq!(
            err.to_string(),
            "quantity '50000' exceeds the per-line limit of 10000 whole units"
        );
    }
}
