//! Batch aggregation: map the parser over records, collect parallel
//! lists, and compute attribution warnings.

use tracing::{debug, info};

use crate::error::{BatchError, KvittoError, Result};
use crate::models::{OnError, RawEmail, ReceiptBatch};
use crate::normalize::normalize;
use crate::receipt::ReceiptParser;

/// Batch extractor over a configured parser.
pub struct BatchExtractor {
    parser: ReceiptParser,
    on_error: OnError,
}

impl BatchExtractor {
    /// Create a batch extractor with the default skip-and-continue
    /// policy.
    pub fn new(parser: ReceiptParser) -> Self {
        Self {
            parser,
            on_error: OnError::Skip,
        }
    }

    /// Set the rejection policy.
    pub fn with_on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }

    /// Extract a batch from already-normalized records.
    ///
    /// Rejected records (no cost/currency pair) are skipped silently or
    /// abort per the configured policy. Errors when zero records are
    /// accepted, or on a parallel-length violation (logic defect).
    pub fn extract(&self, emails: &[RawEmail]) -> Result<ReceiptBatch> {
        let mut batch = ReceiptBatch::default();

        for (index, email) in emails.iter().enumerate() {
            let receipt = self.parser.parse(email);

            if !receipt.is_accepted() {
                if self.on_error == OnError::Fail {
                    let missing = if receipt.cost.is_none() {
                        "cost"
                    } else {
                        "currency"
                    };
                    return Err(BatchError::Rejected {
                        index,
                        missing: missing.to_string(),
                    }
                    .into());
                }
                debug!(index, id = email.id.as_deref().unwrap_or("-"), "record rejected");
                continue;
            }

            batch.push(receipt);
        }

        batch.check_lengths().map_err(KvittoError::Batch)?;

        if batch.is_empty() {
            return Err(BatchError::Empty.into());
        }

        self.collect_warnings(&mut batch);

        info!(
            accepted = batch.len(),
            total = emails.len(),
            unattributed = batch.warnings.unattributed,
            "batch extraction complete"
        );

        Ok(batch)
    }

    /// Extract a batch straight from a raw input blob.
    pub fn extract_from_str(&self, input: &str) -> Result<ReceiptBatch> {
        let emails = normalize(input, self.on_error)?;
        self.extract(&emails)
    }

    fn collect_warnings(&self, batch: &mut ReceiptBatch) {
        let roster = self.parser.roster();
        let mut unknown: Vec<String> = Vec::new();

        for passenger in batch.passengers.iter().flatten() {
            if !roster.contains(passenger) && !unknown.iter().any(|n| n == passenger) {
                unknown.push(passenger.clone());
            }
        }

        batch.warnings.unattributed =
            batch.passengers.iter().filter(|p| p.is_none()).count();
        batch.warnings.unknown_names = unknown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtractMode;
    use crate::receipt::Roster;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn extractor() -> BatchExtractor {
        BatchExtractor::new(ReceiptParser::new(Roster::new([
            "Fredrik", "Viggo", "Leona",
        ])))
    }

    fn email(body: &str) -> RawEmail {
        RawEmail::from_body(body)
    }

    #[test]
    fn test_lists_stay_parallel_and_match_accepted_count() {
        let emails = vec![
            email("Totalt 123,45 kr 5 juli 2025\n\nTack för att du reser, Fredrik"),
            email("no receipt here"),
            email("Avbokningsavgift 25,00 kr"),
        ];

        let batch = extractor().extract(&emails).unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.dates.len(), 2);
        assert_eq!(batch.passengers.len(), 2);
        assert_eq!(batch.currencies.len(), 2);
        assert_eq!(batch.costs[0], Decimal::from_str("123.45").unwrap());
        assert_eq!(batch.costs[1], Decimal::from_str("25.00").unwrap());
    }

    #[test]
    fn test_encounter_order_preserved() {
        let emails = vec![
            email("Totalt 10,00 kr\nTack för att du reser, Viggo"),
            email("Totalt 20,00 kr\nTack för att du reser, Leona"),
        ];

        let batch = extractor().extract(&emails).unwrap();
        assert_eq!(batch.passengers[0].as_deref(), Some("Viggo"));
        assert_eq!(batch.passengers[1].as_deref(), Some("Leona"));
    }

    #[test]
    fn test_zero_accepted_is_an_error() {
        let emails = vec![email("nothing"), email("to see")];
        let err = extractor().extract(&emails).unwrap_err();
        assert!(matches!(err, KvittoError::Batch(BatchError::Empty)));
    }

    #[test]
    fn test_fail_policy_rejects_incomplete_record() {
        let emails = vec![
            email("Totalt 10,00 kr\nTack för att du reser, Viggo"),
            email("nothing"),
        ];

        let err = extractor()
            .with_on_error(OnError::Fail)
            .extract(&emails)
            .unwrap_err();
        assert!(matches!(
            err,
            KvittoError::Batch(BatchError::Rejected { index: 1, .. })
        ));
    }

    #[test]
    fn test_warnings_surface_attribution_gaps() {
        let emails = vec![
            email("Avbokningsavgift 25,00 kr"),
            email("Totalt 10,00 kr\nTack för att du reser, Astrid"),
            email("Totalt 12,00 kr\nTack för att du reser, Astrid"),
            email("Totalt 14,00 kr\nTack för att du reser, Viggo"),
        ];

        let batch = extractor().extract(&emails).unwrap();
        assert_eq!(batch.warnings.unattributed, 1);
        assert_eq!(batch.warnings.unknown_names, vec!["Astrid".to_string()]);
    }

    #[test]
    fn test_end_to_end_marker_blob_with_bad_fragment() {
        let input = "Value #1:\n\n{\"body\": \"Totalt 123,45 kr 5 juli 2025\\n\\nTack f\u{00f6}r att du reser, Fredrik\"}\n\nValue #2:\n\n{\"body\": \"Totalt 9,00 kr\" garbage";

        let batch = extractor().extract_from_str(input).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.passengers[0].as_deref(), Some("Fredrik"));
        assert_eq!(
            batch.dates[0].unwrap().format("%Y-%m-%d").to_string(),
            "2025-07-05"
        );
    }

    #[test]
    fn test_strict_parser_in_batch() {
        let parser = ReceiptParser::new(Roster::new(["Fredrik"])).with_mode(ExtractMode::Strict);
        let emails = vec![
            email("Totalt 10,00 kr\nTack för att du reser, Fredrik"),
            email("Avbokningsavgift 25,00 kr"),
        ];

        let batch = BatchExtractor::new(parser).extract(&emails).unwrap();
        assert_eq!(batch.len(), 1);
    }
}
