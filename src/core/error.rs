use thiserror::Error;

/// Errors that can occur while building documents or reading external input.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DevisError {
    /// Catalog or estimate input is not a well-formed collection.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Document number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),
}

/// A non-fatal finding about computed totals, with field path and message.
///
/// The engine never clamps amounts; callers decide what to do with these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsWarning {
    /// Dot-separated path to the offending field (e.g. "totals.total_ht").
    pub field: String,
    /// Human-readable description.
    pub message: String,
    /// Stable warning code (e.g. "DISCOUNT-EXCEEDS-SUBTOTAL").
    pub code: &'static str,
}

impl std::fmt::Display for TotalsWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.field, self.message)
    }
}

impl TotalsWarning {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }
}
