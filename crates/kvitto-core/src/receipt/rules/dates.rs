//! Swedish date extraction and ISO normalization.

use chrono::NaiveDate;

use crate::models::ExtractMode;

use super::patterns::{CHARGE_DATE, DATE_ANYWHERE, TOTAL_DATE};
use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str, mode: ExtractMode) -> Option<Self::Output> {
        // Prefer the date trailing the charge line.
        let anchored = match mode {
            ExtractMode::Lenient => CHARGE_DATE.captures(text),
            ExtractMode::Strict => TOTAL_DATE.captures(text),
        };

        // An anchored match wins even when its token fails to convert;
        // the anywhere-scan only runs when no anchored date exists.
        if let Some(caps) = anchored {
            let m = caps.get(1).unwrap();
            return parse_swedish_date(m.as_str()).map(|date| {
                ExtractionMatch::new(date, m.as_str()).with_position(m.start(), m.end())
            });
        }

        if mode == ExtractMode::Strict {
            return None;
        }

        // Fallback: first Swedish long date anywhere in the body.
        let caps = DATE_ANYWHERE.captures(text)?;
        let m = caps.get(1).unwrap();
        parse_swedish_date(m.as_str())
            .map(|date| ExtractionMatch::new(date, m.as_str()).with_position(m.start(), m.end()))
    }
}

/// Extract the ride date from body text.
pub fn extract_date(text: &str, mode: ExtractMode) -> Option<NaiveDate> {
    DateExtractor::new().extract(text, mode).map(|m| m.value)
}

/// Parse a Swedish long date like "5 juli 2025".
///
/// Anything other than exactly three whitespace-separated parts, an
/// unrecognized month name, or an impossible calendar day yields None.
pub fn parse_swedish_date(date_str: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = date_str.split_whitespace().collect();
    if parts.len() != 3 {
        return None;
    }

    let day: u32 = parts[0].parse().ok()?;
    let month = swedish_month_to_number(parts[1])?;
    let year: i32 = parts[2].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Map a Swedish month name (case-insensitive) to its number.
pub fn swedish_month_to_number(month: &str) -> Option<u32> {
    match month.to_lowercase().as_str() {
        "januari" => Some(1),
        "februari" => Some(2),
        "mars" => Some(3),
        "april" => Some(4),
        "maj" => Some(5),
        "juni" => Some(6),
        "juli" => Some(7),
        "augusti" => Some(8),
        "september" => Some(9),
        "oktober" => Some(10),
        "november" => Some(11),
        "december" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_swedish_date() {
        assert_eq!(parse_swedish_date("5 juli 2025"), Some(ymd(2025, 7, 5)));
        assert_eq!(
            parse_swedish_date("31 december 1999"),
            Some(ymd(1999, 12, 31))
        );
        assert_eq!(parse_swedish_date("7 Februari 2025"), Some(ymd(2025, 2, 7)));
    }

    #[test]
    fn test_iso_rendering_zero_pads() {
        let date = parse_swedish_date("5 juli 2025").unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2025-07-05");
    }

    #[test]
    fn test_unrecognized_month_is_absent_not_error() {
        assert_eq!(parse_swedish_date("5 juillet 2025"), None);
    }

    #[test]
    fn test_wrong_part_count_is_absent() {
        assert_eq!(parse_swedish_date("juli 2025"), None);
        assert_eq!(parse_swedish_date("den 5 juli 2025"), None);
    }

    #[test]
    fn test_impossible_day_is_absent() {
        assert_eq!(parse_swedish_date("31 februari 2025"), None);
    }

    #[test]
    fn test_date_after_charge_line_preferred() {
        let text = "Kvitto 1 januari 2020\nTotalt 123,45 kr 5 juli 2025";
        assert_eq!(
            extract_date(text, ExtractMode::Lenient),
            Some(ymd(2025, 7, 5))
        );
    }

    #[test]
    fn test_anchored_bad_month_does_not_fall_back() {
        let text = "Resa den 5 juli 2025\nTotalt 10,00 kr 5 jully 2025";
        assert_eq!(extract_date(text, ExtractMode::Lenient), None);
    }

    #[test]
    fn test_fallback_scans_whole_body() {
        let text = "Din resa den 5 juli 2025 är klar";
        assert_eq!(
            extract_date(text, ExtractMode::Lenient),
            Some(ymd(2025, 7, 5))
        );
        assert_eq!(extract_date(text, ExtractMode::Strict), None);
    }
}
