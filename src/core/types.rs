use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quote (devis): a priced proposal sent to a client before work starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Quote number (e.g. "DEV-2024-001").
    pub number: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Date until which the quoted prices hold.
    pub validity_date: Option<NaiveDate>,
    /// Named groupings of lines.
    pub lots: Vec<Lot>,
    /// Priced lines.
    pub lines: Vec<Line>,
    /// Global discount on the subtotal HT.
    pub discount: Discount,
    /// Deposit (acompte) requested on signature.
    pub deposit: Deposit,
    /// VAT-exempt travel costs added after the discount.
    pub travel_costs: Decimal,
    /// Calculated totals (set by `recalculate()`).
    pub totals: Option<QuoteTotals>,
}

/// Invoice (facture): a request for payment, possibly after deposits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Invoice number (e.g. "FAC-2024-001").
    pub number: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// Number of the quote this invoice settles, if any.
    pub quote_reference: Option<String>,
    /// Named groupings of lines.
    pub lots: Vec<Lot>,
    /// Priced lines.
    pub lines: Vec<Line>,
    /// Global discount on the subtotal HT.
    pub discount: Discount,
    /// Deposits already collected, as a TTC amount.
    pub deposits_paid: Decimal,
    /// VAT-exempt travel costs added after the discount.
    pub travel_costs: Decimal,
    /// Calculated totals (set by `recalculate()`).
    pub totals: Option<InvoiceTotals>,
}

/// A named grouping of lines (e.g. "Plomberie", "Électricité").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lot {
    pub id: String,
    pub name: String,
}

/// A priced line of a quote or invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Line identifier.
    pub id: String,
    /// Work or supply description.
    #[serde(default)]
    pub designation: String,
    /// Quantity; missing counts as zero.
    #[serde(default)]
    pub quantity: Decimal,
    /// Unit of measure as typed by the user ("m2", "u", "h", "forfait").
    #[serde(default)]
    pub unit: String,
    /// Unit price before tax; missing counts as zero.
    #[serde(default, rename = "unitPriceHT")]
    pub unit_price_ht: Decimal,
    /// VAT rate in percent (e.g. 5.5, 10, 20).
    pub vat_rate: Decimal,
    /// Lot this line belongs to.
    #[serde(default)]
    pub lot_id: Option<String>,
    /// Calculated amounts (set by `recalculate()`).
    #[serde(default)]
    pub amounts: Option<LineAmounts>,
}

impl Line {
    /// Compute this line's amounts from its quantity, price and rate.
    pub fn calculate(&self) -> LineAmounts {
        super::calc::compute_line(self.quantity, self.unit_price_ht, self.vat_rate)
    }
}

/// HT/TVA/TTC amounts of a single line, each rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAmounts {
    #[serde(rename = "totalHT")]
    pub total_ht: Decimal,
    #[serde(rename = "totalTVA")]
    pub total_tva: Decimal,
    #[serde(rename = "totalTTC")]
    pub total_ttc: Decimal,
}

/// Whether an adjustment is a percentage of a base or a fixed amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    #[default]
    Percentage,
    FixedAmount,
}

/// Global discount applied to the subtotal HT of all lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    pub value: Decimal,
}

impl Discount {
    /// No discount.
    pub fn none() -> Self {
        Self::default()
    }

    /// Discount of `value` percent of the subtotal HT.
    pub fn percentage(value: Decimal) -> Self {
        Self {
            enabled: true,
            kind: AdjustmentKind::Percentage,
            value,
        }
    }

    /// Discount of a fixed HT amount.
    pub fn fixed_amount(value: Decimal) -> Self {
        Self {
            enabled: true,
            kind: AdjustmentKind::FixedAmount,
            value,
        }
    }
}

/// Base amount a percentage deposit is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepositBase {
    #[serde(rename = "HT")]
    Ht,
    #[default]
    #[serde(rename = "TTC")]
    Ttc,
}

/// Deposit (acompte) requested on a quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    pub value: Decimal,
    pub base: DepositBase,
}

impl Deposit {
    /// No deposit.
    pub fn none() -> Self {
        Self::default()
    }

    /// Deposit of `value` percent of the HT or TTC total.
    pub fn percentage(value: Decimal, base: DepositBase) -> Self {
        Self {
            enabled: true,
            kind: AdjustmentKind::Percentage,
            value,
            base,
        }
    }

    /// Deposit of a fixed amount.
    pub fn fixed_amount(value: Decimal) -> Self {
        Self {
            enabled: true,
            kind: AdjustmentKind::FixedAmount,
            value,
            base: DepositBase::Ttc,
        }
    }
}

/// Base and tax for one distinct rate, after discount allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatBucket {
    pub rate: Decimal,
    #[serde(rename = "baseHT")]
    pub base_ht: Decimal,
    pub vat_amount: Decimal,
}

/// Totals shared by quotes and invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of all line HT amounts.
    #[serde(rename = "subtotalHT")]
    pub subtotal_ht: Decimal,
    /// Global discount amount.
    pub discount_amount: Decimal,
    /// Travel costs included in `total_ht` (zero when none).
    pub travel_costs: Decimal,
    /// subtotal − discount + travel costs.
    #[serde(rename = "totalHT")]
    pub total_ht: Decimal,
    /// Per-rate VAT, first-seen rate order.
    pub vat_breakdown: Vec<VatBucket>,
    /// Sum of bucket VAT amounts.
    #[serde(rename = "totalTVA")]
    pub total_tva: Decimal,
    /// total HT + total TVA.
    #[serde(rename = "totalTTC")]
    pub total_ttc: Decimal,
}

/// Quote totals: shared totals plus the requested deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    #[serde(flatten)]
    pub base: Totals,
    pub deposit_amount: Decimal,
    /// total TTC − deposit amount.
    pub remaining_amount: Decimal,
}

/// Invoice totals: shared totals plus deposits already collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    #[serde(flatten)]
    pub base: Totals,
    pub deposits_paid: Decimal,
    /// total TTC − deposits paid. Not clamped at zero.
    pub remaining_amount: Decimal,
}

/// HT/TVA/TTC sums of the lines of one lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotSubtotal {
    /// `None` groups lines that belong to no lot.
    pub lot_id: Option<String>,
    #[serde(rename = "totalHT")]
    pub total_ht: Decimal,
    #[serde(rename = "totalTVA")]
    pub total_tva: Decimal,
    #[serde(rename = "totalTTC")]
    pub total_ttc: Decimal,
}
