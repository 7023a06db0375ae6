use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::DevisError;

/// Kind of document a number sequence issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Devis, numbered "DEV-{year}-{seq}".
    Quote,
    /// Facture, numbered "FAC-{year}-{seq}".
    Invoice,
}

impl DocumentKind {
    /// Default number prefix for this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Quote => "DEV-",
            Self::Invoice => "FAC-",
        }
    }
}

/// Sequential document number generator.
///
/// Generates numbers in the format `{prefix}{year}-{sequential}`,
/// e.g. "DEV-2024-001", "FAC-2024-014". Invoices must be numbered without
/// gaps within a year; the sequence resets to 1 when the year changes.
#[derive(Debug, Clone)]
pub struct DocumentNumberSequence {
    prefix: String,
    year: i32,
    next: u64,
    zero_pad: usize,
}

impl DocumentNumberSequence {
    /// Create a sequence starting at 1 with a custom prefix.
    pub fn new(prefix: impl Into<String>, year: i32) -> Self {
        Self::starting_at(prefix, year, 1)
    }

    /// Create a sequence starting at 1 with the default prefix for `kind`.
    pub fn for_kind(kind: DocumentKind, year: i32) -> Self {
        Self::new(kind.prefix(), year)
    }

    /// Create a sequence continuing from a given number, e.g. the last
    /// number the caller's storage has on record plus one.
    pub fn starting_at(prefix: impl Into<String>, year: i32, next: u64) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            next,
            zero_pad: 3,
        }
    }

    /// Set zero-padding width (default: 3, so "001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    fn format(&self, seq: u64) -> String {
        format!(
            "{}{}-{:0>width$}",
            self.prefix,
            self.year,
            seq,
            width = self.zero_pad
        )
    }

    /// Issue the next number.
    pub fn next_number(&mut self) -> String {
        let number = self.format(self.next);
        self.next += 1;
        number
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        self.format(self.next)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Issue the next number for a document dated `date`, moving to a new
    /// year first if needed. Dates from an earlier year are rejected.
    pub fn next_for_date(&mut self, date: NaiveDate) -> Result<String, DevisError> {
        match date.year() {
            y if y > self.year => self.advance_year(y)?,
            y if y < self.year => {
                return Err(DevisError::Numbering(format!(
                    "document dated {date} is before the current sequence year {}",
                    self.year
                )));
            }
            _ => {}
        }
        Ok(self.next_number())
    }

    /// Advance to a new year, resetting the counter to 1.
    pub fn advance_year(&mut self, new_year: i32) -> Result<(), DevisError> {
        if new_year <= self.year {
            return Err(DevisError::Numbering(format!(
                "new year {new_year} must be greater than current year {}",
                self.year
            )));
        }
        self.year = new_year;
        self.next = 1;
        Ok(())
    }

    /// Parse the sequential part of a number issued by this sequence's
    /// prefix and year. Returns `None` for foreign numbers.
    pub fn parse_sequence(&self, number: &str) -> Option<u64> {
        number
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix(&self.year.to_string())?
            .strip_prefix('-')?
            .parse()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_numbering() {
        let mut seq = DocumentNumberSequence::for_kind(DocumentKind::Quote, 2024);
        assert_eq!(seq.next_number(), "DEV-2024-001");
        assert_eq!(seq.next_number(), "DEV-2024-002");
    }

    #[test]
    fn invoice_prefix() {
        let mut seq = DocumentNumberSequence::for_kind(DocumentKind::Invoice, 2025);
        assert_eq!(seq.next_number(), "FAC-2025-001");
    }

    #[test]
    fn peek_does_not_consume() {
        let mut seq = DocumentNumberSequence::new("DEV-", 2024);
        assert_eq!(seq.peek(), "DEV-2024-001");
        assert_eq!(seq.next_number(), "DEV-2024-001");
        assert_eq!(seq.peek(), "DEV-2024-002");
    }

    #[test]
    fn starting_at_and_padding() {
        let mut seq = DocumentNumberSequence::starting_at("F", 2024, 42).with_padding(5);
        assert_eq!(seq.next_number(), "F2024-00042");
    }

    #[test]
    fn year_advance_rejects_past() {
        let mut seq = DocumentNumberSequence::new("FAC-", 2024);
        assert!(seq.advance_year(2023).is_err());
        assert!(seq.advance_year(2024).is_err());
        seq.advance_year(2025).unwrap();
        assert_eq!(seq.next_number(), "FAC-2025-001");
    }

    #[test]
    fn next_for_date_moves_year() {
        let mut seq = DocumentNumberSequence::new("FAC-", 2024);
        seq.next_number();

        let jan = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert_eq!(seq.next_for_date(jan).unwrap(), "FAC-2025-001");
        assert_eq!(seq.next_for_date(jan).unwrap(), "FAC-2025-002");

        let old = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert!(matches!(
            seq.next_for_date(old),
            Err(DevisError::Numbering(_))
        ));
    }

    #[test]
    fn parse_sequence() {
        let seq = DocumentNumberSequence::new("DEV-", 2024);
        assert_eq!(seq.parse_sequence("DEV-2024-017"), Some(17));
        assert_eq!(seq.parse_sequence("FAC-2024-017"), None);
        assert_eq!(seq.parse_sequence("DEV-2023-017"), None);
        assert_eq!(seq.parse_sequence("DEV-2024-x"), None);
    }
}
