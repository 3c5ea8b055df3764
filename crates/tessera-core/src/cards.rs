//! # Card Splitting
//!
//! Turns an order's product lines into per-unit "cards" without losing
//! or inventing money.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Order line: 2.300 kg @ 1.65                                        │
//! │                                                                     │
//! │        ┌──────────────┬──────────────┬──────────────────┐           │
//! │        │ Card 1       │ Card 2       │ Card 3           │           │
//! │        │ qty  1.000   │ qty  1.000   │ qty  0.300       │           │
//! │        │ price 1.65…  │ price 1.65…  │ price 0.495…     │           │
//! │        └──────────────┴──────────────┴──────────────────┘           │
//! │                                                                     │
//! │  Conservation: Σ card price = line price × line quantity, exactly.  │
//! │  The quantity string is split on its decimal point; arithmetic      │
//! │  never re-derives the parts from a rounded value.                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Whole-unit cards precede the fractional remainder card, and lines are
//! processed in input order, so output is deterministic apart from the
//! generated ids.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::monetary::MonetaryDataService;

/// Hard ceiling on whole units a single order line may split into.
/// Guards the card table (and this loop) against a mistyped quantity
/// like "100000" fanning out into a hundred thousand rows.
pub const MAX_UNITS_PER_LINE: u64 = 10_000;

const UNIT_QUANTITY: &str = "1.000";

// =============================================================================
// Records
// =============================================================================

/// A resolved order line: the product reference plus the exact decimal
/// `price` and `quantity` strings the order was placed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub order_id: String,
    pub name: String,
    /// Unit price as a decimal string, e.g. `"1.65"`.
    pub price: String,
    /// Ordered quantity as a plain unsigned decimal string, e.g. `"2.300"`.
    pub quantity: String,
}

/// One physical unit (or fractional remainder) derived from an order
/// line. Created once per order-processing request, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub product_id: String,
    pub order_id: String,
    pub name: String,
    /// This card's share of the line total, at working precision.
    pub price: String,
    /// `"1.000"` for whole units, `"0.<digits>"` for the remainder, both
    /// at working precision.
    pub quantity: String,
}

// =============================================================================
// Splitting
// =============================================================================

/// Splits every order line into whole-unit cards plus at most one
/// fractional-remainder card.
///
/// For a line with quantity `"2.300"`: two cards with quantity `1.000`
/// and price `unit × 1`, then one card with quantity `0.300` and price
/// `unit × 0.300`. Zero-valued parts emit nothing.
///
/// ## Errors
/// - [`CoreError::InvalidQuantity`] for a quantity that is not a plain
///   unsigned decimal
/// - [`CoreError::InvalidPrice`] for a price that is not a finite amount
/// - [`CoreError::QuantityTooLarge`] when the whole-unit count exceeds
///   [`MAX_UNITS_PER_LINE`]
pub fn split_order_lines(
    money: &MonetaryDataService,
    lines: &[OrderLine],
) -> CoreResult<Vec<Card>> {
    let mut cards = Vec::new();
    for line in lines {
        split_line(money, line, &mut cards)?;
    }
    Ok(cards)
}

fn split_line(
    money: &MonetaryDataService,
    line: &OrderLine,
    cards: &mut Vec<Card>,
) -> CoreResult<()> {
    let (whole_text, fraction_text) = validated_quantity_parts(&line.quantity)?;
    validate_price(&line.price)?;

    let whole: u64 = whole_text
        .parse()
        .map_err(|_| CoreError::QuantityTooLarge {
            requested: line.quantity.clone(),
            max: MAX_UNITS_PER_LINE,
        })?;
    if whole > MAX_UNITS_PER_LINE {
        return Err(CoreError::QuantityTooLarge {
            requested: line.quantity.clone(),
            max: MAX_UNITS_PER_LINE,
        });
    }

    if whole > 0 {
        let unit_quantity = money.to_precision_34_digits(UNIT_QUANTITY)?;
        let unit_price = money.multiply(&[line.price.as_str(), "1"])?;
        for _ in 0..whole {
            cards.push(card_for(line, unit_price.clone(), unit_quantity.clone()));
        }
    }

    if fraction_text.bytes().any(|b| b != b'0') {
        let fractional_quantity = format!("0.{fraction_text}");
        let quantity = money.to_precision_34_digits(&fractional_quantity)?;
        let price = money.multiply(&[line.price.as_str(), fractional_quantity.as_str()])?;
        cards.push(card_for(line, price, quantity));
    }

    Ok(())
}

fn card_for(line: &OrderLine, price: String, quantity: String) -> Card {
    Card {
        id: Uuid::new_v4().to_string(),
        product_id: line.product_id.clone(),
        order_id: line.order_id.clone(),
        name: line.name.clone(),
        price,
        quantity,
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Splits a quantity into its whole/fraction digit runs, accepting only
/// the plain grammar `digits[.digits]` — no sign, no exponent, no
/// underscores. The splitting algorithm works on the digit text
/// directly, so anything fancier must be rejected here.
fn validated_quantity_parts(quantity: &str) -> CoreResult<(&str, &str)> {
    let invalid = |reason: &str| CoreError::InvalidQuantity {
        value: quantity.to_string(),
        reason: reason.to_string(),
    };

    let (whole, fraction) = match quantity.split_once('.') {
        None => (quantity, ""),
        Some((whole, fraction)) => (whole, fraction),
    };
    if whole.is_empty() {
        return Err(invalid("missing integer part"));
    }
    if quantity.contains('.') && fraction.is_empty() {
        return Err(invalid("missing fractional digits after the decimal point"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid("expected an unsigned plain decimal"));
    }
    Ok((whole, fraction))
}

fn validate_price(price: &str) -> CoreResult<()> {
    use tessera_decimal::Decimal128;

    let parsed: Decimal128 = price.parse().map_err(|_| CoreError::InvalidPrice {
        value: price.to_string(),
        reason: "not a decimal literal".to_string(),
    })?;
    if !parsed.is_finite() {
        return Err(CoreError::InvalidPrice {
            value: price.to_string(),
            reason: "not a finite amount".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
