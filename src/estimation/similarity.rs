//! Name similarity scoring with a pluggable fuzzy strategy.
//!
//! Exact and substring rules are shared; only the fuzzy fallback differs
//! between strategies. The strategy is chosen once, when the scorer is
//! built, from the compiled features.

use std::sync::OnceLock;

use super::normalize::normalize_name;

/// Score for normalized names that are equal.
pub const EXACT_SCORE: f64 = 1.0;

/// Score when one normalized name contains the other.
pub const SUBSTRING_SCORE: f64 = 0.9;

/// Fuzzy similarity between two normalized, non-empty, distinct names.
pub trait SimilarityStrategy: Send + Sync + std::fmt::Debug {
    /// Similarity in `[0, 1]`.
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Normalized Levenshtein similarity: `(max_len - distance) / max_len`,
/// lengths counted in chars.
#[cfg(feature = "levenshtein")]
#[derive(Debug, Default, Clone, Copy)]
pub struct EditDistance;

#[cfg(feature = "levenshtein")]
impl SimilarityStrategy for EditDistance {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            return 0.0;
        }
        let distance = strsim::levenshtein(a, b);
        (max_len.saturating_sub(distance) as f64 / max_len as f64).max(0.0)
    }
}

/// Fraction of the shorter name's characters that also occur somewhere in
/// the longer one. Coarser than edit distance, needs no extra dependency.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharacterOverlap;

impl SimilarityStrategy for CharacterOverlap {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let (shorter, longer) = if a.chars().count() <= b.chars().count() {
            (a, b)
        } else {
            (b, a)
        };
        let len = shorter.chars().count();
        if len == 0 {
            return 0.0;
        }
        let shared = shorter.chars().filter(|c| longer.contains(*c)).count();
        shared as f64 / len as f64
    }
}

/// Scores raw material names against each other.
#[derive(Debug)]
pub struct SimilarityScorer {
    strategy: Box<dyn SimilarityStrategy>,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::detect()
    }
}

impl SimilarityScorer {
    /// Build a scorer with the most precise strategy compiled in.
    pub fn detect() -> Self {
        #[cfg(feature = "levenshtein")]
        let strategy: Box<dyn SimilarityStrategy> = Box::new(EditDistance);
        #[cfg(not(feature = "levenshtein"))]
        let strategy: Box<dyn SimilarityStrategy> = Box::new(CharacterOverlap);

        tracing::debug!(strategy = ?strategy, "similarity strategy selected");
        Self { strategy }
    }

    /// Build a scorer with an explicit strategy.
    pub fn with_strategy(strategy: impl SimilarityStrategy + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }

    /// Process-wide scorer, detected on first use.
    pub fn shared() -> &'static SimilarityScorer {
        static SHARED: OnceLock<SimilarityScorer> = OnceLock::new();
        SHARED.get_or_init(Self::detect)
    }

    /// Similarity of two raw names in `[0, 1]`.
    pub fn score(&self, a: &str, b: &str) -> f64 {
        self.score_normalized(&normalize_name(a), &normalize_name(b))
    }

    /// Similarity of two names already passed through [`normalize_name`].
    ///
    /// An empty name scores 0 against anything, including another empty
    /// name, so blank estimator entries never match.
    pub fn score_normalized(&self, a: &str, b: &str) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        if a == b {
            return EXACT_SCORE;
        }
        if a.contains(b) || b.contains(a) {
            return SUBSTRING_SCORE;
        }
        self.strategy.similarity(a, b)
    }
}

/// Similarity of two raw names using the shared scorer.
pub fn similarity(a: &str, b: &str) -> f64 {
    SimilarityScorer::shared().score(a, b)
}
