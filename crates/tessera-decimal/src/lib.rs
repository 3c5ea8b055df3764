//! # Tessera Decimal - Exact Decimal Arithmetic
//!
//! The arbitrary-precision decimal engine every monetary value in
//! Tessera flows through. Pure calculation: no I/O, no floating-point
//! intermediates, no global state.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       tessera-decimal                               │
//! │                                                                     │
//! │  ┌────────────┐   public type: NaN / ±Infinity / Finite, IEEE       │
//! │  │ Decimal128 │   754-2008 Decimal128 envelope (34 digits,          │
//! │  └─────┬──────┘   quantum ∈ [-6176, 6111])                          │
//! │        │                                                            │
//! │  ┌─────┴──────┐   canonical (cohort, quantum) pair; signed zero     │
//! │  │  Decimal   │   is an explicit sum-type variant                   │
//! │  └─────┬──────┘                                                     │
//! │        │                                                            │
//! │  ┌─────┴──────┐   exact nonzero fraction over BigInt; the only      │
//! │  │  Rational  │   place arithmetic actually happens                 │
//! │  └────────────┘                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use tessera_decimal::Decimal128;
//!
//! let price: Decimal128 = "1.20".parse().unwrap();
//! let two: Decimal128 = "2".parse().unwrap();
//! assert_eq!(price.multiply(&two).to_fixed_exact(), "2.40");
//! ```

mod decimal;
mod decimal128;
mod error;
mod rational;
mod rounding;

pub use decimal::{Cohort, Decimal};
pub use decimal128::Decimal128;
pub use error::{DecimalError, DecimalResult, RangeError, SyntaxError};
pub use rational::Rational;
pub use rounding::RoundingMode;
