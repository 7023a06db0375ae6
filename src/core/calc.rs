use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::types::*;

/// Round to cents using half-away-from-zero (commercial rounding).
///
/// The result always carries two decimal places, so `100` becomes `100.00`.
pub fn round_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

fn percent_of(base: Decimal, percent: Decimal) -> Decimal {
    base * percent / dec!(100)
}

/// Compute the HT, TVA and TTC amounts of one line.
///
/// Each amount is rounded independently: TVA is computed from the rounded
/// HT, and TTC from the rounded HT and TVA.
pub fn compute_line(quantity: Decimal, unit_price_ht: Decimal, vat_rate: Decimal) -> LineAmounts {
    let total_ht = round_cents(quantity * unit_price_ht);
    let total_tva = round_cents(percent_of(total_ht, vat_rate));
    let total_ttc = round_cents(total_ht + total_tva);
    LineAmounts {
        total_ht,
        total_tva,
        total_ttc,
    }
}

/// Sum of the HT amounts of all lines.
pub fn subtotal_ht(lines: &[Line]) -> Decimal {
    lines.iter().map(|l| l.calculate().total_ht).sum()
}

/// Global discount amount for a subtotal.
///
/// Not clamped: a fixed discount larger than the subtotal is returned as is.
pub fn discount_amount(subtotal_ht: Decimal, discount: &Discount) -> Decimal {
    if !discount.enabled || discount.value.is_zero() {
        return round_cents(Decimal::ZERO);
    }
    match discount.kind {
        AdjustmentKind::Percentage => round_cents(percent_of(subtotal_ht, discount.value)),
        AdjustmentKind::FixedAmount => round_cents(discount.value),
    }
}

/// Group lines by VAT rate and allocate the discount across the groups.
///
/// Each rate group receives a share of `discount_amount` proportional to its
/// part of the subtotal. Base and VAT are rounded per bucket, so the sum of
/// bucket VAT may drift from a directly computed total by up to one cent per
/// bucket. Buckets come out in first-seen rate order.
pub fn vat_breakdown(lines: &[Line], discount_amount: Decimal) -> Vec<VatBucket> {
    let mut groups: IndexMap<Decimal, Decimal> = IndexMap::new();
    for line in lines {
        *groups.entry(line.vat_rate).or_insert(Decimal::ZERO) += line.calculate().total_ht;
    }

    let subtotal: Decimal = groups.values().copied().sum();

    groups
        .into_iter()
        .map(|(rate, group_ht)| {
            let proportion = if subtotal.is_zero() {
                Decimal::ZERO
            } else {
                group_ht / subtotal
            };
            let base_ht = round_cents(group_ht - discount_amount * proportion);
            VatBucket {
                rate,
                base_ht,
                vat_amount: round_cents(percent_of(base_ht, rate)),
            }
        })
        .collect()
}

/// Deposit amount for a quote.
///
/// Not clamped against the total: a fixed deposit may exceed it.
pub fn deposit_amount(total_ht: Decimal, total_ttc: Decimal, deposit: &Deposit) -> Decimal {
    if !deposit.enabled || deposit.value.is_zero() {
        return round_cents(Decimal::ZERO);
    }
    let base = match deposit.base {
        DepositBase::Ht => total_ht,
        DepositBase::Ttc => total_ttc,
    };
    match deposit.kind {
        AdjustmentKind::Percentage => round_cents(percent_of(base, deposit.value)),
        AdjustmentKind::FixedAmount => round_cents(deposit.value),
    }
}

/// Per-lot HT/TVA/TTC sums, in first-seen lot order.
///
/// Amounts are before the global discount. Lines without a lot are grouped
/// under `lot_id: None`.
pub fn lot_subtotals(lines: &[Line]) -> Vec<LotSubtotal> {
    let mut groups: IndexMap<Option<&str>, LineAmounts> = IndexMap::new();
    for line in lines {
        let amounts = line.calculate();
        let entry = groups
            .entry(line.lot_id.as_deref())
            .or_insert(LineAmounts {
                total_ht: Decimal::ZERO,
                total_tva: Decimal::ZERO,
                total_ttc: Decimal::ZERO,
            });
        entry.total_ht += amounts.total_ht;
        entry.total_tva += amounts.total_tva;
        entry.total_ttc += amounts.total_ttc;
    }

    groups
        .into_iter()
        .map(|(lot_id, sums)| LotSubtotal {
            lot_id: lot_id.map(String::from),
            total_ht: round_cents(sums.total_ht),
            total_tva: round_cents(sums.total_tva),
            total_ttc: round_cents(sums.total_ttc),
        })
        .collect()
}
