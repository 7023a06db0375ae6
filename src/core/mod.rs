//! Quote and invoice types, totals computation, checks, and numbering.
//!
//! The calculation functions are pure and total: missing values count as
//! zero and no input makes them fail. Builders wrap them for callers that
//! want a complete document with its totals attached.

mod builder;
mod calc;
mod checks;
mod error;
mod numbering;
mod totals;
mod types;
pub mod vat_rates;

pub use builder::*;
pub use calc::*;
pub use checks::*;
pub use error::*;
pub use numbering::*;
pub use totals::*;
pub use types::*;
pub use vat_rates::is_known_vat_rate;
