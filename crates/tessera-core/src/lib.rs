//! # Tessera Core - Pure Domain Logic
//!
//! The monetary policy layer of the order/ticketing service: the single
//! precision policy every currency and quantity computation goes
//! through, and the order → card splitting algorithm built on it.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         tessera-core                                │
//! │                                                                     │
//! │  ┌─────────────────────┐      ┌──────────────────────────────┐      │
//! │  │ MonetaryDataService │◄─────│ split_order_lines            │      │
//! │  │ add / multiply /    │      │ OrderLine → per-unit Cards,  │      │
//! │  │ fixed-digit render  │      │ money conserved exactly      │      │
//! │  └──────────┬──────────┘      └──────────────────────────────┘      │
//! │             │ decimal strings                                       │
//! │             ▼                                                       │
//! │      tessera-decimal (Decimal128)                                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Golden Rule: NO I/O
//! This crate performs pure calculations only. The REST and persistence
//! layers call in through decimal strings and serde records; nothing
//! here touches a database, the network, or the clock.

mod cards;
mod error;
mod monetary;

pub use cards::{split_order_lines, Card, OrderLine, MAX_UNITS_PER_LINE};
pub use error::{CoreError, CoreResult};
pub use monetary::{MonetaryDataService, CURRENCY_DISPLAY_DIGITS, QUANTITY_DISPLAY_DIGITS};
