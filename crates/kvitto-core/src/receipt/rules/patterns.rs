//! Common regex patterns for Swedish ride-receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Charge line patterns ("Totalt" = total, "Avbokningsavgift" = cancellation fee)
    pub static ref CHARGE_LINE: Regex = Regex::new(
        r"(Totalt|Avbokningsavgift)\s+([\d\.,]+)\s+([A-Za-z$€£]+)"
    ).unwrap();

    pub static ref TOTAL_LINE: Regex = Regex::new(
        r"Totalt\s+([\d\.,]+)\s+([A-Za-z$€£]+)"
    ).unwrap();

    // Relaxed fallback: any number followed by a currency-looking token
    pub static ref AMOUNT_RELAXED: Regex = Regex::new(
        r"(\d+[\.,]?\d*)\s*([A-Za-z$€£]+)"
    ).unwrap();

    // Swedish long date following the charge line ("5 juli 2025")
    pub static ref CHARGE_DATE: Regex = Regex::new(
        r"(?:Totalt|Avbokningsavgift)\s+[\d\.,]+\s+[A-Za-z$€£]+\s+(\d{1,2}\s+[a-zA-ZåäöÅÄÖ]+\s+\d{4})"
    ).unwrap();

    pub static ref TOTAL_DATE: Regex = Regex::new(
        r"Totalt\s+[\d\.,]+\s+[A-Za-z$€£]+\s+(\d{1,2}\s+[a-zA-ZåäöÅÄÖ]+\s+\d{4})"
    ).unwrap();

    pub static ref DATE_ANYWHERE: Regex = Regex::new(
        r"(\d{1,2}\s+[a-zA-ZåäöÅÄÖ]+\s+\d{4})"
    ).unwrap();

    // Greeting phrases that name the passenger
    pub static ref GREETING: Regex = Regex::new(
        r"(?:Tack för att du reser,|Vi ses en annan gång,)\s+([A-Za-zåäöÅÄÖ]+)"
    ).unwrap();

    pub static ref GREETING_STRICT: Regex = Regex::new(
        r"Tack för att du reser,\s+([A-Za-zåäöÅÄÖ]+)"
    ).unwrap();

    // Generic name captures, checked against the roster afterwards
    pub static ref NAME_THANKS: Regex = Regex::new(
        r"Tack\s+([A-Za-zåäöÅÄÖ]+)!"
    ).unwrap();

    pub static ref NAME_AFTER_RIDE_PHRASE: Regex = Regex::new(
        r"(?:reser|åker|färd|resa).*?,\s+([A-Za-zåäöÅÄÖ]+)"
    ).unwrap();

    pub static ref NAME_POSSESSIVE: Regex = Regex::new(
        r"([A-Za-zåäöÅÄÖ]+)s\s+(?:resa|tur)"
    ).unwrap();

    // Marker line between concatenated JSON fragments
    pub static ref VALUE_MARKER: Regex = Regex::new(
        r"\n\nValue #\d+:\n\n"
    ).unwrap();
}

/// Cancellation-fee keyword.
pub const CANCELLATION_KEYWORD: &str = "Avbokningsavgift";
