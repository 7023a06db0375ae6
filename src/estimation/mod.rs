//! Catalog price reconciliation for AI-estimated materials.
//!
//! The external estimator returns materials with guessed prices. This module
//! matches each material name against the user's priced catalog and, when
//! the match is confident enough, replaces the guess with the real price.
//!
//! # Example
//!
//! ```
//! use devis::estimation::*;
//! use serde_json::json;
//!
//! let catalog = parse_catalog(&json!([
//!     { "id": "m1", "name": "Ciment Portland", "category": "Liants", "unitPrice": 0.8, "unit": "kg" }
//! ])).unwrap();
//! let estimate = parse_estimate(&json!({
//!     "materiaux": [{ "nom": "ciment portland", "quantite": "50", "unite": "kg", "prixTotal": 55 }],
//!     "tempsRealisation": "3 jours"
//! })).unwrap();
//!
//! let enriched = enrich_estimate(estimate, &catalog);
//! assert_eq!(enriched.materials[0].real_price, Some(true));
//! assert_eq!(enriched.materials[0].total_price, Some(rust_decimal_macros::dec!(40)));
//! ```

mod enrich;
mod matcher;
mod normalize;
mod payload;
mod similarity;

pub use enrich::{enrich_estimate, enrich_estimate_json, enrich_estimate_with, estimate_lines, materials_total};
pub use matcher::{
    CONFIDENCE_THRESHOLD, CatalogMatcher, MaterialMatch, NAME_WEIGHT, UNIT_WEIGHT, find_best_match,
};
pub use normalize::normalize_name;
pub use payload::{
    CatalogMaterial, CostDetails, Estimate, EstimationMaterial, parse_catalog, parse_estimate,
    parse_locale_decimal,
};
#[cfg(feature = "levenshtein")]
pub use similarity::EditDistance;
pub use similarity::{
    CharacterOverlap, EXACT_SCORE, SUBSTRING_SCORE, SimilarityScorer, SimilarityStrategy,
    similarity,
};
