use rust_decimal::Decimal;
use serde_json::Value;

use super::matcher::CatalogMatcher;
use super::payload::{CatalogMaterial, Estimate, parse_catalog, parse_estimate};
use super::similarity::SimilarityScorer;
use crate::core::{DevisError, Line, round_cents};

/// Replace estimated prices with catalog prices where a confident match
/// exists, then recompute the materials total of the cost breakdown.
///
/// Matched materials get `prixReel = true`, the catalog id, the confidence,
/// the catalog unit price and `quantite × unit price` as total. Unmatched
/// materials get `prixReel = false` and `needsAdding = true`, and keep the
/// estimator's prices. Enriching an already enriched estimate changes
/// nothing. If the materials total overflows, `detailsCouts.materiaux` is
/// left unset.
pub fn enrich_estimate(estimate: Estimate, catalog: &[CatalogMaterial]) -> Estimate {
    enrich_estimate_with(estimate, catalog, SimilarityScorer::shared())
}

/// [`enrich_estimate`] with an explicit scorer.
pub fn enrich_estimate_with(
    mut estimate: Estimate,
    catalog: &[CatalogMaterial],
    scorer: &SimilarityScorer,
) -> Estimate {
    let matcher = CatalogMatcher::with_scorer(catalog, scorer);
    let mut matched = 0usize;

    for material in &mut estimate.materials {
        match matcher.best_match(material) {
            Some(m) => {
                tracing::debug!(
                    material = %material.name,
                    catalog_id = %m.material.id,
                    confidence = m.confidence,
                    "matched catalog price"
                );
                material.real_price = Some(true);
                material.needs_adding = Some(false);
                material.material_id = Some(m.material.id.clone());
                material.confidence = Some(m.confidence);
                material.unit_price = Some(m.material.unit_price);
                material.total_price = Some(m.computed_price);
                matched += 1;
            }
            None => {
                tracing::debug!(material = %material.name, "no confident catalog match");
                material.real_price = Some(false);
                material.needs_adding = Some(true);
                material.material_id = None;
                material.confidence = None;
            }
        }
    }

    let total = materials_total(&estimate);
    if total.is_none() {
        tracing::warn!("materials total overflows");
    }
    estimate.cost_details.get_or_insert_with(Default::default).materials = total;

    tracing::info!(
        materials = estimate.materials.len(),
        matched,
        needs_adding = estimate.materials.len() - matched,
        materials_total = ?total,
        "estimate enriched"
    );
    estimate
}

/// Sum of the materials' `prixTotal`; materials without one count as zero.
///
/// `None` when the sum does not fit in a `Decimal`.
pub fn materials_total(estimate: &Estimate) -> Option<Decimal> {
    estimate
        .materials
        .iter()
        .filter_map(|m| m.total_price)
        .try_fold(Decimal::ZERO, |sum, price| sum.checked_add(price))
}

/// Enrich a raw estimator payload against a raw catalog.
///
/// Both inputs are parsed once; fields this crate does not know pass
/// through unchanged. Amounts too large to total are `MalformedInput`.
pub fn enrich_estimate_json(estimate: &Value, catalog: &Value) -> Result<Value, DevisError> {
    let catalog = parse_catalog(catalog)?;
    let estimate = parse_estimate(estimate)?;
    let enriched = enrich_estimate(estimate, &catalog);
    if enriched.cost_details.as_ref().and_then(|d| d.materials).is_none() {
        return Err(DevisError::MalformedInput(
            "materiaux: prices too large to total".into(),
        ));
    }
    serde_json::to_value(&enriched)
        .map_err(|e| DevisError::MalformedInput(format!("estimate: {e}")))
}

/// Turn an estimate's materials into quote lines at `vat_rate`.
///
/// The unit price is `prixUnitaire` when present, otherwise `prixTotal`
/// spread over the quantity (rounded to cents), otherwise zero.
pub fn estimate_lines(estimate: &Estimate, vat_rate: Decimal) -> Vec<Line> {
    estimate
        .materials
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let unit_price_ht = match (m.unit_price, m.total_price) {
                (Some(price), _) => price,
                (None, Some(total)) => total
                    .checked_div(m.quantity)
                    .map(round_cents)
                    .unwrap_or(Decimal::ZERO),
                _ => Decimal::ZERO,
            };
            Line {
                id: format!("mat-{}", i + 1),
                designation: m.name.clone(),
                quantity: m.quantity,
                unit: m.unit.clone(),
                unit_price_ht,
                vat_rate,
                lot_id: None,
                amounts: None,
            }
        })
        .collect()
}
