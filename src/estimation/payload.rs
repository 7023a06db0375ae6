//! Estimator and catalog payloads.
//!
//! The estimator output is untrusted JSON: numbers may arrive as strings
//! with a comma decimal separator, fields may be missing, and unknown fields
//! must survive a round trip. Everything is coerced once, here, into strict
//! types; only a payload whose collections are the wrong shape is rejected.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::core::DevisError;

/// A material in the user's priced catalog. Read-only for this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMaterial {
    #[serde(deserialize_with = "loose_string")]
    pub id: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub name: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub category: String,
    #[serde(
        default,
        deserialize_with = "loose_decimal",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub unit_price: Decimal,
    #[serde(default, deserialize_with = "loose_string")]
    pub unit: String,
}

/// AI estimate of the materials, labour and costs for a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// `materiaux`
    #[serde(rename = "materiaux", default)]
    pub materials: Vec<EstimationMaterial>,
    /// `detailsCouts`
    #[serde(rename = "detailsCouts", default, skip_serializing_if = "Option::is_none")]
    pub cost_details: Option<CostDetails>,
    /// Pass-through fields (`tempsRealisation`, `nombreOuvriers`,
    /// `recommandations`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One estimated material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimationMaterial {
    /// `nom`
    #[serde(rename = "nom", default, deserialize_with = "loose_string")]
    pub name: String,
    /// `quantite`: number or locale string such as "12,5".
    #[serde(
        rename = "quantite",
        default,
        deserialize_with = "loose_decimal",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub quantity: Decimal,
    /// `unite`
    #[serde(rename = "unite", default, deserialize_with = "loose_string")]
    pub unit: String,
    /// `prixUnitaire`: estimator guess, or catalog price once matched.
    #[serde(
        rename = "prixUnitaire",
        default,
        deserialize_with = "loose_decimal_opt",
        serialize_with = "rust_decimal::serde::float_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_price: Option<Decimal>,
    /// `prixTotal`: estimator guess, or quantity × catalog price once matched.
    #[serde(
        rename = "prixTotal",
        default,
        deserialize_with = "loose_decimal_opt",
        serialize_with = "rust_decimal::serde::float_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_price: Option<Decimal>,
    /// `prixReel`: whether the prices come from the catalog.
    #[serde(
        rename = "prixReel",
        default,
        deserialize_with = "loose_bool_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub real_price: Option<bool>,
    /// `materialId`: matched catalog entry.
    #[serde(
        rename = "materialId",
        default,
        deserialize_with = "loose_string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub material_id: Option<String>,
    /// Match confidence in `[0, 1]`.
    #[serde(
        default,
        deserialize_with = "loose_f64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<f64>,
    /// `needsAdding`: no confident catalog match; the user should add it.
    #[serde(
        rename = "needsAdding",
        default,
        deserialize_with = "loose_bool_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub needs_adding: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cost breakdown of an estimate. Only the materials component is
/// recomputed; labour, transport, tooling and waste pass through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostDetails {
    /// `materiaux`
    #[serde(
        rename = "materiaux",
        default,
        deserialize_with = "loose_decimal_opt",
        serialize_with = "rust_decimal::serde::float_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub materials: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Estimate {
    /// Parse an estimator response body.
    pub fn from_json_str(s: &str) -> Result<Self, DevisError> {
        let value: Value = serde_json::from_str(s).map_err(|e| malformed(format!("estimate: {e}")))?;
        parse_estimate(&value)
    }
}

/// Parse an estimator payload.
///
/// Fails only if the payload is not an object, `materiaux` is present but
/// not an array, or one of its entries is not an object. A missing
/// `materiaux` is an estimate without materials.
pub fn parse_estimate(value: &Value) -> Result<Estimate, DevisError> {
    let Some(object) = value.as_object() else {
        return Err(malformed(format!(
            "estimate must be an object, got {}",
            kind_of(value)
        )));
    };

    match object.get("materiaux") {
        None | Some(Value::Null) => {}
        Some(Value::Array(entries)) => {
            if let Some((i, entry)) = entries.iter().enumerate().find(|(_, e)| !e.is_object()) {
                return Err(malformed(format!(
                    "materiaux[{i}] must be an object, got {}",
                    kind_of(entry)
                )));
            }
        }
        Some(other) => {
            return Err(malformed(format!(
                "materiaux must be an array, got {}",
                kind_of(other)
            )));
        }
    }

    if let Some(details) = object.get("detailsCouts") {
        if !details.is_object() && !details.is_null() {
            return Err(malformed(format!(
                "detailsCouts must be an object, got {}",
                kind_of(details)
            )));
        }
    }

    Estimate::deserialize(value).map_err(|e| malformed(format!("estimate: {e}")))
}

/// Parse a catalog: an array of `{id, name, category, unitPrice, unit}`.
pub fn parse_catalog(value: &Value) -> Result<Vec<CatalogMaterial>, DevisError> {
    let Some(entries) = value.as_array() else {
        return Err(malformed(format!(
            "catalog must be an array, got {}",
            kind_of(value)
        )));
    };

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if !entry.is_object() {
                return Err(malformed(format!(
                    "catalog[{i}] must be an object, got {}",
                    kind_of(entry)
                )));
            }
            CatalogMaterial::deserialize(entry).map_err(|e| malformed(format!("catalog[{i}]: {e}")))
        })
        .collect()
}

fn malformed(message: String) -> DevisError {
    tracing::warn!(%message, "rejecting malformed input");
    DevisError::MalformedInput(message)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse a number the way a French user or estimator writes it.
///
/// Accepts a comma or a dot as decimal separator and ignores spaces used as
/// thousands separators. When both separators appear, the last one is the
/// decimal separator. Trailing text such as a unit or currency sign is
/// ignored. Anything without a leading number gives zero.
///
/// ```
/// use devis::estimation::parse_locale_decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_locale_decimal("12,5"), dec!(12.5));
/// assert_eq!(parse_locale_decimal("1 234,50 €"), dec!(1234.50));
/// assert_eq!(parse_locale_decimal("1.234,50"), dec!(1234.50));
/// assert_eq!(parse_locale_decimal("environ"), dec!(0));
/// ```
pub fn parse_locale_decimal(s: &str) -> Decimal {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();

    let last_comma = compact.rfind(',');
    let last_dot = compact.rfind('.');
    let canonical: String = match (last_comma, last_dot) {
        (Some(c), Some(d)) if c > d => compact.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => compact.replace(',', ""),
        (Some(_), None) => compact.replace(',', "."),
        _ => compact,
    };

    let prefix = numeric_prefix(&canonical);
    Decimal::from_str(prefix)
        .or_else(|_| Decimal::from_scientific(prefix))
        .unwrap_or(Decimal::ZERO)
}

/// Longest leading `[+-]?digits[.digits]` slice.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            end = frac_end;
        }
    }
    if end == digits_start {
        return "";
    }
    &s[..end]
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let text = n.to_string();
            Some(
                Decimal::from_str(&text)
                    .or_else(|_| Decimal::from_scientific(&text))
                    .unwrap_or(Decimal::ZERO),
            )
        }
        Value::String(s) => Some(parse_locale_decimal(s)),
        Value::Bool(_) => Some(Decimal::ZERO),
        _ => None,
    }
}

fn loose_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(decimal_from_value)
        .unwrap_or(Decimal::ZERO))
}

fn loose_decimal_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Decimal>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}

fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(loose_string_opt(deserializer)?.unwrap_or_default())
}

fn loose_string_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn loose_bool_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn loose_f64_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    })
}
