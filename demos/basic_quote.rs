use chrono::NaiveDate;
use devis::core::*;
use rust_decimal_macros::dec;

fn main() {
    // Bathroom renovation: two lots, two VAT rates, a discount and a deposit
    let quote = QuoteBuilder::new("DEV-2024-042", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .validity_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
        .add_lot(Lot {
            id: "plomberie".into(),
            name: "Plomberie".into(),
        })
        .add_lot(Lot {
            id: "carrelage".into(),
            name: "Carrelage".into(),
        })
        .add_line(
            LineBuilder::new("1", "Receveur de douche extra-plat", dec!(1), "u", dec!(420))
                .vat_rate(dec!(10))
                .lot("plomberie")
                .build(),
        )
        .add_line(
            LineBuilder::new("2", "Mitigeur thermostatique", dec!(1), "u", dec!(185.50))
                .vat_rate(dec!(10))
                .lot("plomberie")
                .build(),
        )
        .add_line(
            LineBuilder::new("3", "Faïence murale posée", dec!(18.5), "m2", dec!(62))
                .vat_rate(dec!(10))
                .lot("carrelage")
                .build(),
        )
        .add_line(
            LineBuilder::new("4", "Pompe à chaleur air/eau", dec!(1), "u", dec!(3200))
                .vat_rate(dec!(5.5))
                .build(),
        )
        .discount(Discount::percentage(dec!(5)))
        .deposit(Deposit::percentage(dec!(30), DepositBase::Ttc))
        .travel_costs(dec!(45))
        .build()
        .expect("quote should be valid");

    let totals = quote.totals.as_ref().unwrap();
    println!("Devis:    {}", quote.number);
    println!("Date:     {}", quote.issue_date);
    println!("---");
    for line in &quote.lines {
        let amounts = line.amounts.unwrap();
        println!(
            "  {} {} {} @ {} HT ({}%) = {} TTC",
            line.quantity, line.unit, line.designation, line.unit_price_ht, line.vat_rate, amounts.total_ttc
        );
    }
    println!("---");
    for lot in lot_subtotals(&quote.lines) {
        let name = lot.lot_id.as_deref().unwrap_or("(hors lot)");
        println!("  Lot {name}: {} HT", lot.total_ht);
    }
    println!("---");
    println!("Sous-total HT: {}", totals.base.subtotal_ht);
    println!("Remise:        {}", totals.base.discount_amount);
    println!("Déplacement:   {}", totals.base.travel_costs);
    println!("Total HT:      {}", totals.base.total_ht);
    for bucket in &totals.base.vat_breakdown {
        println!("  TVA {}% sur {}: {}", bucket.rate, bucket.base_ht, bucket.vat_amount);
    }
    println!("Total TVA:     {}", totals.base.total_tva);
    println!("Total TTC:     {}", totals.base.total_ttc);
    println!("Acompte:       {}", totals.deposit_amount);
    println!("Reste à payer: {}", totals.remaining_amount);

    for warning in check_quote(&quote) {
        println!("  Attention: {warning}");
    }

    // Invoice the job once done, deducting the deposit
    let mut numbers = DocumentNumberSequence::for_kind(DocumentKind::Invoice, 2024);
    let invoice_date = NaiveDate::from_ymd_opt(2024, 9, 20).unwrap();
    let invoice = InvoiceBuilder::from_quote(&quote, numbers.next_number(), invoice_date)
        .due_date(NaiveDate::from_ymd_opt(2024, 10, 20).unwrap())
        .build()
        .expect("invoice should be valid");

    let totals = invoice.totals.as_ref().unwrap();
    println!("\nFacture:  {} (devis {})", invoice.number, quote.number);
    println!("Total TTC:       {}", totals.base.total_ttc);
    println!("Acomptes versés: {}", totals.deposits_paid);
    println!("Reste dû:        {}", totals.remaining_amount);
}
