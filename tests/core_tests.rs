use chrono::NaiveDate;
use devis::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn line(id: &str, designation: &str, quantity: Decimal, price: Decimal, rate: Decimal) -> Line {
    LineBuilder::new(id, designation, quantity, "u", price)
        .vat_rate(rate)
        .build()
}

// --- Two-rate quote with a percentage discount ---

fn two_rate_quote() -> Quote {
    QuoteBuilder::new("DEV-2024-001", date(2024, 6, 15))
        .add_line(line("1", "Fourniture et pose faïence", dec!(1), dec!(100), dec!(20)))
        .add_line(line("2", "Isolation des combles", dec!(1), dec!(200), dec!(10)))
        .discount(Discount::percentage(dec!(10)))
        .build()
        .unwrap()
}

#[test]
fn two_rates_with_percentage_discount() {
    let quote = two_rate_quote();
    let totals = quote.totals.as_ref().unwrap();

    assert_eq!(totals.base.subtotal_ht, dec!(300.00));
    assert_eq!(totals.base.discount_amount, dec!(30.00));
    assert_eq!(totals.base.total_ht, dec!(270.00));

    let vat_20 = &totals.base.vat_breakdown[0];
    assert_eq!(vat_20.rate, dec!(20));
    assert_eq!(vat_20.base_ht, dec!(90.00));
    assert_eq!(vat_20.vat_amount, dec!(18.00));

    let vat_10 = &totals.base.vat_breakdown[1];
    assert_eq!(vat_10.rate, dec!(10));
    assert_eq!(vat_10.base_ht, dec!(180.00));
    assert_eq!(vat_10.vat_amount, dec!(18.00));

    assert_eq!(totals.base.total_tva, dec!(36.00));
    assert_eq!(totals.base.total_ttc, dec!(306.00));
    assert_eq!(totals.deposit_amount, Decimal::ZERO);
    assert_eq!(totals.remaining_amount, dec!(306.00));
}

#[test]
fn totals_output_contract() {
    let quote = two_rate_quote();
    insta::assert_json_snapshot!(quote.totals.unwrap(), @r#"
    {
      "subtotalHT": "300.00",
      "discountAmount": "30.00",
      "travelCosts": "0.00",
      "totalHT": "270.00",
      "vatBreakdown": [
        {
          "rate": "20",
          "baseHT": "90.00",
          "vatAmount": "18.00"
        },
        {
          "rate": "10",
          "baseHT": "180.00",
          "vatAmount": "18.00"
        }
      ],
      "totalTVA": "36.00",
      "totalTTC": "306.00",
      "depositAmount": "0.00",
      "remainingAmount": "306.00"
    }
    "#);
}

// --- Deposits ---

#[test]
fn deposit_thirty_percent_of_ttc() {
    // 1000 HT at 20% → 1200 TTC
    let quote = QuoteBuilder::new("DEV-2024-002", date(2024, 6, 15))
        .add_line(line("1", "Rénovation salle de bain", dec!(1), dec!(1000), dec!(20)))
        .deposit(Deposit::percentage(dec!(30), DepositBase::Ttc))
        .build()
        .unwrap();
    let totals = quote.totals.unwrap();

    assert_eq!(totals.base.total_ttc, dec!(1200.00));
    assert_eq!(totals.deposit_amount, dec!(360.00));
    assert_eq!(totals.remaining_amount, dec!(840.00));
}

#[test]
fn deposit_on_ht_after_discount_and_travel() {
    let quote = QuoteBuilder::new("DEV-2024-003", date(2024, 6, 15))
        .add_line(line("1", "Maçonnerie", dec!(8), dec!(250), dec!(20)))
        .discount(Discount::fixed_amount(dec!(100)))
        .travel_costs(dec!(60))
        .deposit(Deposit::percentage(dec!(40), DepositBase::Ht))
        .build()
        .unwrap();
    let totals = quote.totals.unwrap();

    // 2000 − 100 + 60 travel
    assert_eq!(totals.base.total_ht, dec!(1960.00));
    // VAT on 1900 only
    assert_eq!(totals.base.total_tva, dec!(380.00));
    assert_eq!(totals.base.total_ttc, dec!(2340.00));
    assert_eq!(totals.deposit_amount, dec!(784.00));
    assert_eq!(totals.remaining_amount, dec!(1556.00));
}

// --- Invoices ---

#[test]
fn invoice_with_deposits_paid() {
    let invoice = InvoiceBuilder::new("FAC-2024-001", date(2024, 9, 1))
        .due_date(date(2024, 10, 1))
        .add_line(line("1", "Pose menuiseries", dec!(3), dec!(450), dec!(10)))
        .deposits_paid(dec!(400))
        .build()
        .unwrap();
    let totals = invoice.totals.unwrap();

    assert_eq!(totals.base.total_ht, dec!(1350.00));
    assert_eq!(totals.base.total_tva, dec!(135.00));
    assert_eq!(totals.base.total_ttc, dec!(1485.00));
    assert_eq!(totals.deposits_paid, dec!(400.00));
    assert_eq!(totals.remaining_amount, dec!(1085.00));
}

#[test]
fn quote_to_invoice_flow() {
    let mut seq = DocumentNumberSequence::for_kind(DocumentKind::Invoice, 2024);
    let quote = QuoteBuilder::new("DEV-2024-010", date(2024, 5, 2))
        .validity_date(date(2024, 6, 2))
        .add_lot(Lot {
            id: "elec".into(),
            name: "Électricité".into(),
        })
        .add_line(
            LineBuilder::new("1", "Tableau électrique", dec!(1), "u", dec!(850))
                .lot("elec")
                .build(),
        )
        .add_line(LineBuilder::new("2", "Évacuation gravats", dec!(1), "forfait", dec!(150)).build())
        .deposit(Deposit::fixed_amount(dec!(300)))
        .build()
        .unwrap();

    let number = seq.next_for_date(date(2024, 9, 30)).unwrap();
    let invoice = InvoiceBuilder::from_quote(&quote, number, date(2024, 9, 30))
        .build()
        .unwrap();

    assert_eq!(invoice.number, "FAC-2024-001");
    assert_eq!(invoice.quote_reference.as_deref(), Some("DEV-2024-010"));
    assert_eq!(invoice.lots.len(), 1);
    let totals = invoice.totals.unwrap();
    assert_eq!(totals.base.total_ttc, dec!(1200.00));
    assert_eq!(totals.deposits_paid, dec!(300.00));
    assert_eq!(totals.remaining_amount, dec!(900.00));
}

// --- Lots ---

#[test]
fn lot_subtotals_for_quote() {
    let quote = QuoteBuilder::new("DEV-2024-004", date(2024, 6, 15))
        .add_lot(Lot {
            id: "plomberie".into(),
            name: "Plomberie".into(),
        })
        .add_lot(Lot {
            id: "peinture".into(),
            name: "Peinture".into(),
        })
        .add_line(
            LineBuilder::new("1", "Chauffe-eau", dec!(1), "u", dec!(600))
                .vat_rate(dec!(10))
                .lot("plomberie")
                .build(),
        )
        .add_line(
            LineBuilder::new("2", "Peinture murs", dec!(45), "m2", dec!(18))
                .vat_rate(dec!(10))
                .lot("peinture")
                .build(),
        )
        .add_line(
            LineBuilder::new("3", "Robinetterie", dec!(2), "u", dec!(75))
                .vat_rate(dec!(10))
                .lot("plomberie")
                .build(),
        )
        .build()
        .unwrap();

    let lots = lot_subtotals(&quote.lines);
    assert_eq!(lots.len(), 2);
    assert_eq!(lots[0].lot_id.as_deref(), Some("plomberie"));
    assert_eq!(lots[0].total_ht, dec!(750.00));
    assert_eq!(lots[1].lot_id.as_deref(), Some("peinture"));
    assert_eq!(lots[1].total_ttc, dec!(891.00));
}

// --- Recalculation after edits ---

#[test]
fn recalculate_after_edit() {
    let mut quote = two_rate_quote();
    quote.lines[1].quantity = dec!(2);
    quote.discount = Discount::none();
    quote.recalculate();

    let totals = quote.totals.unwrap();
    assert_eq!(totals.base.subtotal_ht, dec!(500.00));
    assert_eq!(totals.base.total_tva, dec!(60.00));
    assert_eq!(quote.lines[1].amounts.unwrap().total_ttc, dec!(440.00));
}

// --- JSON line input from the application ---

#[test]
fn lines_from_json_default_missing_numbers() {
    let lines: Vec<Line> = serde_json::from_value(serde_json::json!([
        { "id": "1", "designation": "Dépose", "vatRate": "5.5" },
        { "id": "2", "quantity": 2, "unitPriceHT": "12.50", "vatRate": 20, "lotId": null }
    ]))
    .unwrap();

    assert_eq!(lines[0].quantity, Decimal::ZERO);
    assert_eq!(lines[0].unit_price_ht, Decimal::ZERO);
    assert_eq!(lines[0].vat_rate, dec!(5.5));
    assert_eq!(lines[1].calculate().total_ttc, dec!(30.00));

    let totals = quote_totals(&lines, &Discount::none(), &Deposit::none(), Decimal::ZERO);
    assert_eq!(totals.base.total_ht, dec!(25.00));
    assert_eq!(totals.base.vat_breakdown.len(), 2);
}

#[test]
fn discount_and_deposit_from_json() {
    let discount: Discount =
        serde_json::from_str(r#"{ "enabled": true, "type": "fixed_amount", "value": "15" }"#).unwrap();
    let deposit: Deposit = serde_json::from_str(
        r#"{ "enabled": true, "type": "percentage", "value": 30, "base": "HT" }"#,
    )
    .unwrap();

    assert_eq!(discount, Discount::fixed_amount(dec!(15)));
    assert_eq!(deposit, Deposit::percentage(dec!(30), DepositBase::Ht));
}
