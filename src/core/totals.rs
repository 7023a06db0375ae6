use rust_decimal::Decimal;

use super::calc::{deposit_amount, discount_amount, round_cents, subtotal_ht, vat_breakdown};
use super::types::*;

/// Compute the totals shared by quotes and invoices.
///
/// Travel costs are added to the HT total after the discount and are not
/// subject to VAT: the breakdown only covers the lines.
pub fn calculate_totals(lines: &[Line], discount: &Discount, travel_costs: Decimal) -> Totals {
    let subtotal_ht = round_cents(subtotal_ht(lines));
    let discount_amount = discount_amount(subtotal_ht, discount);

    let mut total_ht = round_cents(subtotal_ht - discount_amount);
    let travel_costs = if travel_costs > Decimal::ZERO {
        total_ht = round_cents(total_ht + travel_costs);
        round_cents(travel_costs)
    } else {
        round_cents(Decimal::ZERO)
    };

    let vat_breakdown = vat_breakdown(lines, discount_amount);
    let total_tva = round_cents(vat_breakdown.iter().map(|b| b.vat_amount).sum());
    let total_ttc = round_cents(total_ht + total_tva);

    Totals {
        subtotal_ht,
        discount_amount,
        travel_costs,
        total_ht,
        vat_breakdown,
        total_tva,
        total_ttc,
    }
}

/// Compute quote totals, including the requested deposit and what remains.
pub fn quote_totals(
    lines: &[Line],
    discount: &Discount,
    deposit: &Deposit,
    travel_costs: Decimal,
) -> QuoteTotals {
    let base = calculate_totals(lines, discount, travel_costs);
    let deposit_amount = deposit_amount(base.total_ht, base.total_ttc, deposit);
    let remaining_amount = round_cents(base.total_ttc - deposit_amount);
    QuoteTotals {
        base,
        deposit_amount,
        remaining_amount,
    }
}

/// Compute invoice totals. `deposits_paid` is a TTC amount already collected.
///
/// The remaining amount is not clamped: deposits larger than the total
/// produce a negative value.
pub fn invoice_totals(
    lines: &[Line],
    discount: &Discount,
    deposits_paid: Decimal,
    travel_costs: Decimal,
) -> InvoiceTotals {
    let base = calculate_totals(lines, discount, travel_costs);
    let deposits_paid = round_cents(deposits_paid);
    let remaining_amount = round_cents(base.total_ttc - deposits_paid);
    InvoiceTotals {
        base,
        deposits_paid,
        remaining_amount,
    }
}

fn refresh_line_amounts(lines: &mut [Line]) {
    for line in lines {
        line.amounts = Some(line.calculate());
    }
}

impl Quote {
    /// Recompute line amounts and totals after an edit.
    pub fn recalculate(&mut self) {
        refresh_line_amounts(&mut self.lines);
        self.totals = Some(quote_totals(
            &self.lines,
            &self.discount,
            &self.deposit,
            self.travel_costs,
        ));
    }
}

impl Invoice {
    /// Recompute line amounts and totals after an edit.
    pub fn recalculate(&mut self) {
        refresh_line_amounts(&mut self.lines);
        self.totals = Some(invoice_totals(
            &self.lines,
            &self.discount,
            self.deposits_paid,
            self.travel_costs,
        ));
    }
}
