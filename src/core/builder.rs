use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::DevisError;
use super::types::*;
use super::vat_rates::STANDARD_VAT_RATE;

/// Maximum number of lines on one document.
pub const MAX_LINES: usize = 10_000;

/// Maximum length of a document number.
pub const MAX_NUMBER_LEN: usize = 200;

/// Builder for quotes.
///
/// ```
/// use devis::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let quote = QuoteBuilder::new("DEV-2024-001", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
///     .add_lot(Lot { id: "gros-oeuvre".into(), name: "Gros œuvre".into() })
///     .add_line(LineBuilder::new("1", "Dalle béton", dec!(12), "m2", dec!(85))
///         .vat_rate(dec!(10))
///         .lot("gros-oeuvre")
///         .build())
///     .deposit(Deposit::percentage(dec!(30), DepositBase::Ttc))
///     .build()
///     .unwrap();
///
/// assert_eq!(quote.totals.unwrap().deposit_amount, dec!(336.60));
/// ```
pub struct QuoteBuilder {
    number: String,
    issue_date: NaiveDate,
    validity_date: Option<NaiveDate>,
    lots: Vec<Lot>,
    lines: Vec<Line>,
    discount: Discount,
    deposit: Deposit,
    travel_costs: Decimal,
}

impl QuoteBuilder {
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            issue_date,
            validity_date: None,
            lots: Vec::new(),
            lines: Vec::new(),
            discount: Discount::none(),
            deposit: Deposit::none(),
            travel_costs: Decimal::ZERO,
        }
    }

    pub fn validity_date(mut self, date: NaiveDate) -> Self {
        self.validity_date = Some(date);
        self
    }

    pub fn add_lot(mut self, lot: Lot) -> Self {
        self.lots.push(lot);
        self
    }

    pub fn add_line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    pub fn lines(mut self, lines: impl IntoIterator<Item = Line>) -> Self {
        self.lines.extend(lines);
        self
    }

    pub fn discount(mut self, discount: Discount) -> Self {
        self.discount = discount;
        self
    }

    pub fn deposit(mut self, deposit: Deposit) -> Self {
        self.deposit = deposit;
        self
    }

    pub fn travel_costs(mut self, amount: Decimal) -> Self {
        self.travel_costs = amount;
        self
    }

    /// Build the quote and calculate its totals.
    ///
    /// An empty quote is valid and has zero totals. Unclamped amounts are
    /// not errors here; see [`check_quote`](super::check_quote).
    pub fn build(self) -> Result<Quote, DevisError> {
        check_document(&self.number, &self.lots, &self.lines)?;

        let mut quote = Quote {
            number: self.number,
            issue_date: self.issue_date,
            validity_date: self.validity_date,
            lots: self.lots,
            lines: self.lines,
            discount: self.discount,
            deposit: self.deposit,
            travel_costs: self.travel_costs,
            totals: None,
        };
        quote.recalculate();
        Ok(quote)
    }
}

/// Builder for invoices.
pub struct InvoiceBuilder {
    number: String,
    issue_date: NaiveDate,
    due_date: Option<NaiveDate>,
    quote_reference: Option<String>,
    lots: Vec<Lot>,
    lines: Vec<Line>,
    discount: Discount,
    deposits_paid: Decimal,
    travel_costs: Decimal,
}

impl InvoiceBuilder {
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            issue_date,
            due_date: None,
            quote_reference: None,
            lots: Vec::new(),
            lines: Vec::new(),
            discount: Discount::none(),
            deposits_paid: Decimal::ZERO,
            travel_costs: Decimal::ZERO,
        }
    }

    /// Start an invoice that settles `quote`.
    ///
    /// Lines, lots, discount and travel costs are carried over, and the
    /// quote's deposit amount is recorded as already paid.
    pub fn from_quote(quote: &Quote, number: impl Into<String>, issue_date: NaiveDate) -> Self {
        let deposit = quote
            .totals
            .as_ref()
            .map(|t| t.deposit_amount)
            .unwrap_or_else(|| {
                super::totals::quote_totals(
                    &quote.lines,
                    &quote.discount,
                    &quote.deposit,
                    quote.travel_costs,
                )
                .deposit_amount
            });

        Self {
            number: number.into(),
            issue_date,
            due_date: None,
            quote_reference: Some(quote.number.clone()),
            lots: quote.lots.clone(),
            lines: quote.lines.clone(),
            discount: quote.discount,
            deposits_paid: deposit,
            travel_costs: quote.travel_costs,
        }
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn quote_reference(mut self, reference: impl Into<String>) -> Self {
        self.quote_reference = Some(reference.into());
        self
    }

    pub fn add_lot(mut self, lot: Lot) -> Self {
        self.lots.push(lot);
        self
    }

    pub fn add_line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    pub fn lines(mut self, lines: impl IntoIterator<Item = Line>) -> Self {
        self.lines.extend(lines);
        self
    }

    pub fn discount(mut self, discount: Discount) -> Self {
        self.discount = discount;
        self
    }

    pub fn deposits_paid(mut self, amount: Decimal) -> Self {
        self.deposits_paid = amount;
        self
    }

    pub fn travel_costs(mut self, amount: Decimal) -> Self {
        self.travel_costs = amount;
        self
    }

    /// Build the invoice and calculate its totals.
    pub fn build(self) -> Result<Invoice, DevisError> {
        check_document(&self.number, &self.lots, &self.lines)?;

        let mut invoice = Invoice {
            number: self.number,
            issue_date: self.issue_date,
            due_date: self.due_date,
            quote_reference: self.quote_reference,
            lots: self.lots,
            lines: self.lines,
            discount: self.discount,
            deposits_paid: self.deposits_paid,
            travel_costs: self.travel_costs,
            totals: None,
        };
        invoice.recalculate();
        Ok(invoice)
    }
}

fn check_document(number: &str, lots: &[Lot], lines: &[Line]) -> Result<(), DevisError> {
    if number.trim().is_empty() {
        return Err(DevisError::Builder("document number must not be empty".into()));
    }
    if number.len() > MAX_NUMBER_LEN {
        return Err(DevisError::Builder(format!(
            "document number cannot exceed {MAX_NUMBER_LEN} characters"
        )));
    }
    if lines.len() > MAX_LINES {
        return Err(DevisError::Builder(format!(
            "document cannot have more than {MAX_LINES} lines"
        )));
    }

    for (i, lot) in lots.iter().enumerate() {
        if lots[..i].iter().any(|l| l.id == lot.id) {
            return Err(DevisError::Builder(format!("duplicate lot id '{}'", lot.id)));
        }
    }
    for line in lines {
        if let Some(lot_id) = &line.lot_id {
            if !lots.iter().any(|l| &l.id == lot_id) {
                return Err(DevisError::Builder(format!(
                    "line '{}' references unknown lot '{lot_id}'",
                    line.id
                )));
            }
        }
    }
    Ok(())
}

/// Builder for Line.
pub struct LineBuilder {
    id: String,
    designation: String,
    quantity: Decimal,
    unit: String,
    unit_price_ht: Decimal,
    vat_rate: Decimal,
    lot_id: Option<String>,
}

impl LineBuilder {
    pub fn new(
        id: impl Into<String>,
        designation: impl Into<String>,
        quantity: Decimal,
        unit: impl Into<String>,
        unit_price_ht: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            designation: designation.into(),
            quantity,
            unit: unit.into(),
            unit_price_ht,
            vat_rate: STANDARD_VAT_RATE,
            lot_id: None,
        }
    }

    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.vat_rate = rate;
        self
    }

    pub fn lot(mut self, lot_id: impl Into<String>) -> Self {
        self.lot_id = Some(lot_id.into());
        self
    }

    pub fn build(self) -> Line {
        Line {
            id: self.id,
            designation: self.designation,
            quantity: self.quantity,
            unit: self.unit,
            unit_price_ht: self.unit_price_ht,
            vat_rate: self.vat_rate,
            lot_id: self.lot_id,
            amounts: None,
        }
    }
}
