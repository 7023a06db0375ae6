//! French VAT rates (taux de TVA) applicable to construction work.
//!
//! - 20%: standard rate (new construction, supplies sold alone)
//! - 10%: intermediate rate (renovation of housing over two years old)
//! - 5.5%: reduced rate (energy renovation work)
//! - 2.1%: special rate (rarely used, kept for completeness)
//! - 0%: exempt or reverse-charge subcontracting (autoliquidation)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Known rates, ascending.
pub const KNOWN_VAT_RATES: [Decimal; 5] = [dec!(0), dec!(2.1), dec!(5.5), dec!(10), dec!(20)];

/// Standard rate applied when a caller has nothing more specific.
pub const STANDARD_VAT_RATE: Decimal = dec!(20);

/// Check whether `rate` is one of the known French VAT rates.
///
/// Comparison is numeric, so `20`, `20.0` and `20.00` are all known.
pub fn is_known_vat_rate(rate: Decimal) -> bool {
    KNOWN_VAT_RATES.contains(&rate)
}
