//! Rule-based field extractors for Swedish ride receipts.

pub mod amounts;
pub mod dates;
pub mod passengers;
pub mod patterns;

pub use amounts::{extract_charge, parse_amount, AmountExtractor, Charge};
pub use dates::{extract_date, swedish_month_to_number, DateExtractor};
pub use passengers::{extract_passenger, PassengerExtractor, Roster};
pub use patterns::*;

use crate::models::ExtractMode;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from body text.
    fn extract(&self, text: &str, mode: ExtractMode) -> Option<Self::Output>;
}

/// A matched field with its source span.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
