//! # devis
//!
//! Totals engine and catalog price reconciliation for construction-business
//! quotes (devis) and invoices (factures).
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Every amount is rounded to cents, half away from zero, at the point it is
//! computed.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use devis::core::*;
//! use rust_decimal_macros::dec;
//!
//! let quote = QuoteBuilder::new("DEV-2024-001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .add_line(LineBuilder::new("1", "Pose carrelage", dec!(20), "m2", dec!(5)).vat_rate(dec!(20)).build())
//!     .add_line(LineBuilder::new("2", "Isolation combles", dec!(10), "m2", dec!(20)).vat_rate(dec!(10)).build())
//!     .discount(Discount::percentage(dec!(10)))
//!     .build()
//!     .unwrap();
//!
//! let totals = quote.totals.unwrap();
//! assert_eq!(totals.base.total_ht, dec!(270.00));
//! assert_eq!(totals.base.total_ttc, dec!(306.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Line, discount, VAT breakdown, deposit and totals computation, builders, numbering |
//! | `estimation` (default) | Estimator payload parsing, name normalization, catalog matching, enrichment |
//! | `levenshtein` (default) | Edit-distance similarity; without it a character-overlap fallback is used |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "estimation")]
pub mod estimation;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
