use rust_decimal::Decimal;

use super::error::TotalsWarning;
use super::types::*;
use super::vat_rates::is_known_vat_rate;

/// Check a quote for amounts the engine deliberately leaves unclamped.
/// Returns all findings (not just the first). Totals are recomputed if
/// missing.
pub fn check_quote(quote: &Quote) -> Vec<TotalsWarning> {
    let totals = match &quote.totals {
        Some(t) => t.clone(),
        None => super::totals::quote_totals(
            &quote.lines,
            &quote.discount,
            &quote.deposit,
            quote.travel_costs,
        ),
    };

    let mut warnings = Vec::new();
    check_lines(&quote.lines, &mut warnings);
    check_totals(&totals.base, &mut warnings);

    if totals.deposit_amount > Decimal::ZERO && totals.deposit_amount > totals.base.total_ttc {
        warnings.push(TotalsWarning::new(
            "totals.deposit_amount",
            format!(
                "deposit {} exceeds total TTC {}",
                totals.deposit_amount, totals.base.total_ttc
            ),
            "DEPOSIT-EXCEEDS-TOTAL",
        ));
    }
    if totals.remaining_amount < Decimal::ZERO {
        warnings.push(TotalsWarning::new(
            "totals.remaining_amount",
            format!("remaining amount {} is negative", totals.remaining_amount),
            "NEGATIVE-REMAINING",
        ));
    }

    warnings
}

/// Check an invoice for amounts the engine deliberately leaves unclamped.
pub fn check_invoice(invoice: &Invoice) -> Vec<TotalsWarning> {
    let totals = match &invoice.totals {
        Some(t) => t.clone(),
        None => super::totals::invoice_totals(
            &invoice.lines,
            &invoice.discount,
            invoice.deposits_paid,
            invoice.travel_costs,
        ),
    };

    let mut warnings = Vec::new();
    check_lines(&invoice.lines, &mut warnings);
    check_totals(&totals.base, &mut warnings);

    if totals.remaining_amount < Decimal::ZERO {
        warnings.push(TotalsWarning::new(
            "totals.remaining_amount",
            format!(
                "deposits paid {} exceed total TTC {}",
                totals.deposits_paid, totals.base.total_ttc
            ),
            "NEGATIVE-REMAINING",
        ));
    }

    warnings
}

fn check_lines(lines: &[Line], warnings: &mut Vec<TotalsWarning>) {
    for (i, line) in lines.iter().enumerate() {
        if !is_known_vat_rate(line.vat_rate) {
            warnings.push(TotalsWarning::new(
                format!("lines[{i}].vat_rate"),
                format!("VAT rate {}% is not a known French rate", line.vat_rate),
                "UNKNOWN-VAT-RATE",
            ));
        }
        if line.quantity < Decimal::ZERO {
            warnings.push(TotalsWarning::new(
                format!("lines[{i}].quantity"),
                format!("quantity {} is negative", line.quantity),
                "NEGATIVE-QUANTITY",
            ));
        }
        if line.unit_price_ht < Decimal::ZERO {
            warnings.push(TotalsWarning::new(
                format!("lines[{i}].unit_price_ht"),
                format!("unit price {} is negative", line.unit_price_ht),
                "NEGATIVE-PRICE",
            ));
        }
        // Stored amounts may be stale after an edit without recalculate()
        if let Some(a) = &line.amounts {
            if a.total_ttc != a.total_ht + a.total_tva {
                warnings.push(TotalsWarning::new(
                    format!("lines[{i}].amounts.total_ttc"),
                    format!(
                        "total TTC {} does not match HT {} + TVA {}",
                        a.total_ttc, a.total_ht, a.total_tva
                    ),
                    "LINE-TTC-MISMATCH",
                ));
            }
        }
    }
}

fn check_totals(totals: &Totals, warnings: &mut Vec<TotalsWarning>) {
    if totals.discount_amount > totals.subtotal_ht {
        warnings.push(TotalsWarning::new(
            "totals.discount_amount",
            format!(
                "discount {} exceeds subtotal HT {}",
                totals.discount_amount, totals.subtotal_ht
            ),
            "DISCOUNT-EXCEEDS-SUBTOTAL",
        ));
    }
    if totals.total_ht < Decimal::ZERO {
        warnings.push(TotalsWarning::new(
            "totals.total_ht",
            format!("total HT {} is negative", totals.total_ht),
            "NEGATIVE-TOTAL",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn test_line() -> Line {
        LineBuilder::new("1", "Pose parquet", dec!(10), "m2", dec!(40))
            .vat_rate(dec!(10))
            .build()
    }

    #[test]
    fn clean_quote_has_no_warnings() {
        let quote = QuoteBuilder::new("DEV-001", test_date())
            .add_line(test_line())
            .deposit(Deposit::percentage(dec!(30), DepositBase::Ttc))
            .build()
            .unwrap();
        assert!(check_quote(&quote).is_empty());
    }

    #[test]
    fn oversized_discount_flagged() {
        let quote = QuoteBuilder::new("DEV-001", test_date())
            .add_line(test_line())
            .discount(Discount::fixed_amount(dec!(500)))
            .build()
            .unwrap();
        let codes: Vec<_> = check_quote(&quote).iter().map(|w| w.code).collect();
        assert!(codes.contains(&"DISCOUNT-EXCEEDS-SUBTOTAL"));
        assert!(codes.contains(&"NEGATIVE-TOTAL"));
    }

    #[test]
    fn oversized_deposit_flagged() {
        let quote = QuoteBuilder::new("DEV-001", test_date())
            .add_line(test_line())
            .deposit(Deposit::fixed_amount(dec!(1000)))
            .build()
            .unwrap();
        let codes: Vec<_> = check_quote(&quote).iter().map(|w| w.code).collect();
        assert_eq!(codes, vec!["DEPOSIT-EXCEEDS-TOTAL", "NEGATIVE-REMAINING"]);
    }

    #[test]
    fn unknown_rate_flagged() {
        let line = LineBuilder::new("1", "Import", dec!(1), "u", dec!(10))
            .vat_rate(dec!(19))
            .build();
        let quote = QuoteBuilder::new("DEV-001", test_date())
            .add_line(line)
            .build()
            .unwrap();
        let warnings = check_quote(&quote);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "lines[0].vat_rate");
        assert!(warnings[0].to_string().starts_with("[UNKNOWN-VAT-RATE]"));
    }

    #[test]
    fn overpaid_invoice_flagged() {
        let invoice = InvoiceBuilder::new("FAC-001", test_date())
            .add_line(test_line())
            .deposits_paid(dec!(1000))
            .build()
            .unwrap();
        let warnings = check_invoice(&invoice);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "NEGATIVE-REMAINING");
    }

    #[test]
    fn stale_line_amounts_flagged() {
        let mut quote = QuoteBuilder::new("DEV-001", test_date())
            .add_line(test_line())
            .build()
            .unwrap();
        if let Some(a) = quote.lines[0].amounts.as_mut() {
            a.total_tva = dec!(1);
        }
        let codes: Vec<_> = check_quote(&quote).iter().map(|w| w.code).collect();
        assert_eq!(codes, vec!["LINE-TTC-MISMATCH"]);
    }
}
