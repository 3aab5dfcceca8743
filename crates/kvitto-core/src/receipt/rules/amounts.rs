//! Cost and currency extraction from receipt charge lines.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::ExtractMode;

use super::patterns::{AMOUNT_RELAXED, CHARGE_LINE, TOTAL_LINE};
use super::{ExtractionMatch, FieldExtractor};

/// Charged amount with its currency token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charge {
    /// Amount with `,` decimal separator normalized to `.`.
    pub cost: Decimal,
    /// Currency token as printed ("kr", "US$", ...).
    pub currency: String,
}

/// Charge line extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Charge>;

    fn extract(&self, text: &str, mode: ExtractMode) -> Option<Self::Output> {
        // Keyword-anchored charge line first. In strict mode only the
        // "Totalt" label counts and there is no fallback.
        let primary = match mode {
            ExtractMode::Lenient => CHARGE_LINE.captures(text).map(|caps| {
                let m = caps.get(0).unwrap();
                (m, caps[2].to_string(), caps[3].to_string())
            }),
            ExtractMode::Strict => TOTAL_LINE.captures(text).map(|caps| {
                let m = caps.get(0).unwrap();
                (m, caps[1].to_string(), caps[2].to_string())
            }),
        };

        if let Some((m, amount, currency)) = primary {
            // A labeled line whose amount does not parse yields no
            // charge at all rather than falling through to the relaxed
            // scan, which would pick an unrelated number.
            let cost = parse_amount(&amount)?;
            return Some(
                ExtractionMatch::new(Charge { cost, currency }, m.as_str())
                    .with_position(m.start(), m.end()),
            );
        }

        if mode == ExtractMode::Strict {
            return None;
        }

        // Relaxed fallback: first number + currency-looking token in
        // document order.
        let caps = AMOUNT_RELAXED.captures(text)?;
        let cost = parse_amount(&caps[1])?;
        let m = caps.get(0).unwrap();
        Some(
            ExtractionMatch::new(
                Charge {
                    cost,
                    currency: caps[2].to_string(),
                },
                m.as_str(),
            )
            .with_position(m.start(), m.end()),
        )
    }
}

/// Extract the charge from body text.
pub fn extract_charge(text: &str, mode: ExtractMode) -> Option<Charge> {
    AmountExtractor::new().extract(text, mode).map(|m| m.value)
}

/// Parse an amount string using either `.` or `,` as the decimal
/// separator (e.g. "123,45" and "123.45" both yield 123.45).
pub fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.replace(',', ".")).ok()
}
