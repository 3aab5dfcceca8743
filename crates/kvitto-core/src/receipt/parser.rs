//! Configurable receipt parser over the rule-based extractors.

use tracing::debug;

use crate::models::{ExtractMode, ExtractedReceipt, RawEmail};

use super::rules::{
    amounts::extract_charge, dates::extract_date, passengers::extract_passenger,
    patterns::CANCELLATION_KEYWORD, Roster,
};

/// Receipt parser: one configurable extractor instead of parallel
/// lenient/strict implementations.
pub struct ReceiptParser {
    roster: Roster,
    mode: ExtractMode,
    max_body_len: usize,
}

impl ReceiptParser {
    /// Create a parser with the default lenient mode.
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            mode: ExtractMode::Lenient,
            max_body_len: 0,
        }
    }

    /// Set the pattern matching mode.
    pub fn with_mode(mut self, mode: ExtractMode) -> Self {
        self.mode = mode;
        self
    }

    /// Cap the body length considered for matching (0 = unlimited).
    pub fn with_max_body_len(mut self, max_body_len: usize) -> Self {
        self.max_body_len = max_body_len;
        self
    }

    /// The roster this parser disambiguates against.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Extract all fields from a single email. Pure and infallible:
    /// fields that cannot be extracted are simply absent.
    pub fn parse(&self, email: &RawEmail) -> ExtractedReceipt {
        let body = self.capped_body(&email.body);

        let charge = extract_charge(body, self.mode);
        let date = extract_date(body, self.mode);
        let passenger = extract_passenger(body, &self.roster, self.mode);
        let is_cancellation = body.contains(CANCELLATION_KEYWORD);

        let (cost, currency) = match charge {
            Some(c) => (Some(c.cost), Some(c.currency)),
            None => (None, None),
        };

        debug!(
            id = email.id.as_deref().unwrap_or("-"),
            cost = ?cost,
            currency = currency.as_deref().unwrap_or("-"),
            passenger = passenger.as_deref().unwrap_or("-"),
            is_cancellation,
            "parsed receipt"
        );

        ExtractedReceipt {
            id: email.id.clone(),
            subject: email.subject.clone(),
            cost,
            currency,
            date,
            passenger,
            is_cancellation,
        }
    }

    fn capped_body<'a>(&self, body: &'a str) -> &'a str {
        if self.max_body_len == 0 || body.len() <= self.max_body_len {
            return body;
        }
        // Back off to the nearest char boundary.
        let mut end = self.max_body_len;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        &body[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const FULL_RECEIPT: &str = "\
Här är ditt kvitto från Uber

Totalt 123,45 kr 5 juli 2025

Tack för att du reser, Fredrik";

    const CANCELLATION_RECEIPT: &str = "\
Här är ditt kvitto

Avbokningsavgift 25,00 kr";

    fn parser() -> ReceiptParser {
        ReceiptParser::new(Roster::new(["Fredrik", "Viggo", "Leona"]))
    }

    #[test]
    fn test_full_receipt() {
        let receipt = parser().parse(&RawEmail::from_body(FULL_RECEIPT));

        assert_eq!(receipt.cost, Some(Decimal::from_str("123.45").unwrap()));
        assert_eq!(receipt.currency.as_deref(), Some("kr"));
        assert_eq!(receipt.date, NaiveDate::from_ymd_opt(2025, 7, 5));
        assert_eq!(receipt.passenger.as_deref(), Some("Fredrik"));
        assert!(!receipt.is_cancellation);
        assert!(receipt.is_accepted());
    }

    #[test]
    fn test_cancellation_receipt_still_accepted() {
        let receipt = parser().parse(&RawEmail::from_body(CANCELLATION_RECEIPT));

        assert_eq!(receipt.cost, Some(Decimal::from_str("25.00").unwrap()));
        assert_eq!(receipt.currency.as_deref(), Some("kr"));
        assert_eq!(receipt.date, None);
        assert_eq!(receipt.passenger, None);
        assert!(receipt.is_cancellation);
        assert!(receipt.is_accepted());
    }

    #[test]
    fn test_empty_body_rejected() {
        let receipt = parser().parse(&RawEmail::from_body(""));
        assert!(!receipt.is_accepted());
    }

    #[test]
    fn test_strict_mode_skips_fallbacks() {
        let parser = parser().with_mode(ExtractMode::Strict);
        let receipt = parser.parse(&RawEmail::from_body(CANCELLATION_RECEIPT));
        assert!(!receipt.is_accepted());
        assert!(receipt.is_cancellation);
    }

    #[test]
    fn test_body_cap_respects_char_boundaries() {
        let parser = parser().with_max_body_len(9);
        // "å" is two bytes; a naive slice at 9 would split one.
        let receipt = parser.parse(&RawEmail::from_body("ååååå Totalt 123,45 kr"));
        assert!(!receipt.is_accepted());
    }

    #[test]
    fn test_metadata_passthrough() {
        let email = RawEmail {
            id: Some("msg-1".to_string()),
            subject: Some("Ditt kvitto".to_string()),
            date: None,
            body: FULL_RECEIPT.to_string(),
        };
        let receipt = parser().parse(&email);
        assert_eq!(receipt.id.as_deref(), Some("msg-1"));
        assert_eq!(receipt.subject.as_deref(), Some("Ditt kvitto"));
    }
}
