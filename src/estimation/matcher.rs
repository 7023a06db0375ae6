use rust_decimal::Decimal;
use serde::Serialize;

use super::normalize::normalize_name;
use super::payload::{CatalogMaterial, EstimationMaterial};
use super::similarity::SimilarityScorer;

/// Minimum combined score for a catalog entry to replace an estimated price.
pub const CONFIDENCE_THRESHOLD: f64 = 0.70;

/// Weight of the name similarity in the combined score.
pub const NAME_WEIGHT: f64 = 0.8;

/// Weight of the unit agreement in the combined score.
pub const UNIT_WEIGHT: f64 = 0.2;

/// A confident catalog match for one estimated material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialMatch<'a> {
    pub material: &'a CatalogMaterial,
    /// Combined name/unit score in `[CONFIDENCE_THRESHOLD, 1]`.
    pub confidence: f64,
    /// Estimated quantity × catalog unit price, unrounded.
    pub computed_price: Decimal,
}

/// Matches estimated materials against a catalog whose names and units are
/// normalized once up front.
#[derive(Debug)]
pub struct CatalogMatcher<'a> {
    catalog: &'a [CatalogMaterial],
    keys: Vec<(String, String)>,
    scorer: &'a SimilarityScorer,
}

impl<'a> CatalogMatcher<'a> {
    /// Matcher using the shared scorer.
    pub fn new(catalog: &'a [CatalogMaterial]) -> Self {
        Self::with_scorer(catalog, SimilarityScorer::shared())
    }

    pub fn with_scorer(catalog: &'a [CatalogMaterial], scorer: &'a SimilarityScorer) -> Self {
        let keys = catalog
            .iter()
            .map(|m| (normalize_name(&m.name), m.unit.to_lowercase()))
            .collect();
        Self {
            catalog,
            keys,
            scorer,
        }
    }

    /// Best catalog entry for `estimated`, if its combined score reaches
    /// [`CONFIDENCE_THRESHOLD`].
    ///
    /// Combined score = `NAME_WEIGHT × name similarity + UNIT_WEIGHT × unit
    /// agreement`, units compared case-insensitively. On equal scores the
    /// entry seen first in catalog order wins. A match whose computed price
    /// would overflow is dropped.
    pub fn best_match(&self, estimated: &EstimationMaterial) -> Option<MaterialMatch<'a>> {
        let name = normalize_name(&estimated.name);
        let unit = estimated.unit.to_lowercase();

        let mut best: Option<(usize, f64)> = None;
        for (i, (entry_name, entry_unit)) in self.keys.iter().enumerate() {
            let name_score = self.scorer.score_normalized(&name, entry_name);
            let unit_score = if &unit == entry_unit { 1.0 } else { 0.0 };
            let total = NAME_WEIGHT * name_score + UNIT_WEIGHT * unit_score;

            if best.is_none_or(|(_, score)| total > score) {
                best = Some((i, total));
            }
        }

        let (index, confidence) = best?;
        if confidence < CONFIDENCE_THRESHOLD {
            return None;
        }

        let material = &self.catalog[index];
        let Some(computed_price) = estimated.quantity.checked_mul(material.unit_price) else {
            tracing::warn!(
                material = %estimated.name,
                catalog_id = %material.id,
                "computed price overflows, keeping estimated price"
            );
            return None;
        };
        Some(MaterialMatch {
            material,
            confidence,
            computed_price,
        })
    }
}

/// Best catalog entry for one estimated material, using the shared scorer.
pub fn find_best_match<'a>(
    estimated: &EstimationMaterial,
    catalog: &'a [CatalogMaterial],
) -> Option<MaterialMatch<'a>> {
    CatalogMatcher::new(catalog).best_match(estimated)
}
