//! # Monetary Data Service
//!
//! The one precision policy for the whole domain. Every currency and
//! quantity computation in Tessera goes through this stateless façade;
//! no caller builds a Decimal128 arithmetic chain directly.
//!
//! ## The Two Precisions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  INTERNAL: 34 significant digits                                    │
//! │    Every intermediate total is renormalized to the full working     │
//! │    precision after each fold step, so rounding error never          │
//! │    compounds across multi-step order totals.                        │
//! │                                                                     │
//! │  EXTERNAL: 2 digits (currency) / 3 digits (quantity)                │
//! │    Precision is discarded exactly once, at the outermost            │
//! │    serialization boundary, via to_fixed_digits — never during an    │
//! │    intermediate computation.                                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values cross this boundary as decimal strings in both directions; the
//! REST and persistence layers never see a Decimal128 value directly.

use tessera_decimal::Decimal128;

use crate::error::CoreResult;

/// Fractional digits shown for currency fields at the display boundary.
pub const CURRENCY_DISPLAY_DIGITS: u32 = 2;

/// Fractional digits shown for quantity fields at the display boundary.
pub const QUANTITY_DISPLAY_DIGITS: u32 = 3;

/// The internal working precision, in significant digits.
const WORKING_PRECISION_DIGITS: u32 = Decimal128::MAX_SIGNIFICANT_DIGITS;

const ADD_IDENTITY: &str = "0.00";
const MULTIPLY_IDENTITY: &str = "1";

// =============================================================================
// Monetary Data Service
// =============================================================================

/// Stateless monetary arithmetic façade. One shared instance is injected
/// into whatever layer needs monetary computation or fixed-digit
/// rendering.
///
/// ## Example
/// ```rust
/// use tessera_core::MonetaryDataService;
///
/// let money = MonetaryDataService::new();
/// let total = money.add(&["1.65", "2.36"]).unwrap();
/// assert_eq!(money.to_fixed_digits(&total, 2).unwrap(), "4.01");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MonetaryDataService;

impl MonetaryDataService {
    pub fn new() -> Self {
        Self
    }

    /// Sums decimal strings by a left fold over Decimal128 addition,
    /// starting from `"0.00"`, renormalizing the running total to 34
    /// significant digits after every step.
    pub fn add(&self, values: &[&str]) -> CoreResult<String> {
        let mut total: Decimal128 = ADD_IDENTITY.parse()?;
        for value in values {
            let term: Decimal128 = value.parse()?;
            total = self.renormalized(&total.add(&term))?;
        }
        Ok(total.to_precision(WORKING_PRECISION_DIGITS)?)
    }

    /// Multiplies decimal strings by a left fold over Decimal128
    /// multiplication, starting from `"1"`, with the same per-step
    /// renormalization as [`MonetaryDataService::add`].
    pub fn multiply(&self, values: &[&str]) -> CoreResult<String> {
        let mut product: Decimal128 = MULTIPLY_IDENTITY.parse()?;
        for value in values {
            let factor: Decimal128 = value.parse()?;
            product = self.renormalized(&product.multiply(&factor))?;
        }
        Ok(product.to_precision(WORKING_PRECISION_DIGITS)?)
    }

    /// Display-boundary conversion to a fixed number of fractional
    /// digits (half-even). The only place precision is intentionally
    /// discarded; it must happen exactly once, at the outermost
    /// serialization layer.
    pub fn to_fixed_digits(&self, value: &str, digits: u32) -> CoreResult<String> {
        let parsed: Decimal128 = value.parse()?;
        Ok(parsed.to_fixed(digits))
    }

    /// Re-establishes the 34-significant-digit working precision on a
    /// value that will feed further arithmetic.
    pub fn to_precision_34_digits(&self, value: &str) -> CoreResult<String> {
        let parsed: Decimal128 = value.parse()?;
        Ok(parsed.to_precision(WORKING_PRECISION_DIGITS)?)
    }

    fn renormalized(&self, value: &Decimal128) -> CoreResult<Decimal128> {
        Ok(value.to_precision(WORKING_PRECISION_DIGITS)?.parse()?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn money() -> MonetaryDataService {
        MonetaryDataService::new()
    }

    #[test]
    fn test_add_folds_exactly() {
        let total = money().add(&["1.65", "2.36"]).unwrap();
        assert_eq!(money().to_fixed_digits(&total, 2).unwrap(), "4.01");

        let total = money().add(&["0.1", "0.2"]).unwrap();
        assert_eq!(money().to_fixed_digits(&total, 1).unwrap(), "0.3");
    }

    #[test]
    fn test_add_of_nothing_is_the_identity() {
        let total = money().add(&[]).unwrap();
        assert_eq!(money().to_fixed_digits(&total, 2).unwrap(), "0.00");
    }

    #[test]
    fn test_multiply_folds_exactly() {
        let product = money().multiply(&["1.65", "2.300"]).unwrap();
        assert_eq!(money().to_fixed_digits(&product, 2).unwrap(), "3.80");
        assert_eq!(
            money().to_fixed_digits(&product, 3).unwrap(),
            "3.795"
        );
    }

    #[test]
    fn test_results_carry_working_precision() {
        // 34 significant digits: "1.65" becomes 1.65 followed by 31 zeros.
        let product = money().multiply(&["1.65", "1"]).unwrap();
        assert_eq!(product, format!("1.65{}", "0".repeat(31)));
        assert_eq!(product.len(), 35); // 34 digits + decimal point
    }

    #[test]
    fn test_to_fixed_digits_rounds_half_even() {
        assert_eq!(money().to_fixed_digits("2.675", 2).unwrap(), "2.68");
        assert_eq!(money().to_fixed_digits("2.665", 2).unwrap(), "2.66");
        assert_eq!(money().to_fixed_digits("5", 3).unwrap(), "5.000");
    }

    #[test]
    fn test_invalid_input_propagates() {
        assert!(money().add(&["1.0", "not-a-number"]).is_err());
        assert!(money().multiply(&["1..2"]).is_err());
        assert!(money().to_fixed_digits("", 2).is_err());
    }
}
