//! Human-readable document numbering.
//!
//! Format: `{PREFIX}-{year}-{NNNN}`, e.g. `QT-2026-0001`, `INV-2026-0042`.
//! Suffixes come from a monotonic per-kind, per-year counter; uniqueness
//! across process restarts is a persistence concern, and the repository
//! layer reports a duplicate claim as a retryable conflict.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Which document family a number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Quote,
    Invoice,
}

impl DocumentKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            DocumentKind::Quote => "QT",
            DocumentKind::Invoice => "INV",
        }
    }
}

/// Format a document number from its parts. Sequence values are
/// zero-padded to 4 digits and widen naturally past 9999.
pub fn format_number(kind: DocumentKind, year: i32, sequence: u32) -> String {
    format!("{}-{}-{:04}", kind.prefix(), year, sequence)
}

/// Monotonic number source, counted per kind and per calendar year.
///
/// The counter restarts at 0001 when the year rolls over. One sequence
/// instance is expected per deployment; the caller owns synchronization.
#[derive(Debug, Default, Clone)]
pub struct DocumentSequence {
    counters: HashMap<(DocumentKind, i32), u32>,
}

impl DocumentSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next number for `kind` in the year of `now`.
    pub fn next(&mut self, kind: DocumentKind, now: DateTime<Utc>) -> String {
        let year = now.year();
        let counter = self.counters.entry((kind, year)).or_insert(0);
        *counter += 1;
        format_number(kind, year, *counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_year(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn formats_with_four_digit_padding() {
        assert_eq!(format_number(DocumentKind::Quote, 2026, 1), "QT-2026-0001");
        assert_eq!(format_number(DocumentKind::Invoice, 2026, 42), "INV-2026-0042");
    }

    #[test]
    fn widens_past_four_digits_without_truncation() {
        assert_eq!(
            format_number(DocumentKind::Invoice, 2026, 10_000),
            "INV-2026-10000"
        );
    }

    #[test]
    fn sequence_is_monotonic_within_a_year() {
        let mut seq = DocumentSequence::new();
        assert_eq!(seq.next(DocumentKind::Quote, at_year(2026)), "QT-2026-0001");
        assert_eq!(seq.next(DocumentKind::Quote, at_year(2026)), "QT-2026-0002");
        assert_eq!(seq.next(DocumentKind::Quote, at_year(2026)), "QT-2026-0003");
    }

    #[test]
    fn kinds_count_independently() {
        let mut seq = DocumentSequence::new();
        seq.next(DocumentKind::Quote, at_year(2026));
        assert_eq!(seq.next(DocumentKind::Invoice, at_year(2026)), "INV-2026-0001");
    }

    #[test]
    fn counter_restarts_on_year_rollover() {
        let mut seq = DocumentSequence::new();
        seq.next(DocumentKind::Quote, at_year(2026));
        seq.next(DocumentKind::Quote, at_year(2026));
        assert_eq!(seq.next(DocumentKind::Quote, at_year(2027)), "QT-2027-0001");
        // The old year's counter is untouched.
        assert_eq!(seq.next(DocumentKind::Quote, at_year(2026)), "QT-2026-0003");
    }
}
