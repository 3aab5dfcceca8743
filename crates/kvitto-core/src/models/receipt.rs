//! Extracted receipt models and the parallel-list batch output.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BatchError;

/// Fields extracted from a single receipt email.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedReceipt {
    /// Provider message id (passthrough).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Email subject line (passthrough).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Charged amount.
    pub cost: Option<Decimal>,

    /// Currency token as it appears in the receipt ("kr", "US$", ...).
    pub currency: Option<String>,

    /// Ride date.
    pub date: Option<NaiveDate>,

    /// Passenger name, canonicalized against the roster where possible.
    pub passenger: Option<String>,

    /// True when the charge line is a cancellation fee.
    pub is_cancellation: bool,
}

impl ExtractedReceipt {
    /// A receipt is accepted into the batch output only when both cost
    /// and currency were extracted. Date and passenger may be absent
    /// (typical for cancellation receipts).
    pub fn is_accepted(&self) -> bool {
        self.cost.is_some() && self.currency.is_some()
    }
}

/// Batch output: four parallel lists in one-to-one correspondence by
/// index, plus warnings the caller would otherwise have to recompute.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceiptBatch {
    /// Ride dates (absent for cancellations without a date line).
    pub dates: Vec<Option<NaiveDate>>,

    /// Passenger names (absent when no pattern matched).
    pub passengers: Vec<Option<String>>,

    /// Charged amounts.
    pub costs: Vec<Decimal>,

    /// Currency tokens.
    pub currencies: Vec<String>,

    /// Attribution warnings computed during aggregation.
    pub warnings: BatchWarnings,
}

impl ReceiptBatch {
    /// Number of accepted receipts.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// True when no receipt was accepted.
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Append an accepted receipt to all four lists atomically.
    ///
    /// Callers must only pass receipts for which `is_accepted()` holds.
    pub(crate) fn push(&mut self, receipt: ExtractedReceipt) {
        debug_assert!(receipt.is_accepted());
        self.dates.push(receipt.date);
        self.passengers.push(receipt.passenger);
        self.costs.push(receipt.cost.unwrap_or_default());
        self.currencies.push(receipt.currency.unwrap_or_default());
    }

    /// Verify the parallel-length invariant.
    pub fn check_lengths(&self) -> Result<(), BatchError> {
        let n = self.costs.len();
        if self.dates.len() != n || self.passengers.len() != n || self.currencies.len() != n {
            return Err(BatchError::LengthMismatch {
                dates: self.dates.len(),
                passengers: self.passengers.len(),
                costs: self.costs.len(),
                currencies: self.currencies.len(),
            });
        }
        Ok(())
    }
}

/// Attribution warnings for a processed batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchWarnings {
    /// Accepted receipts with no passenger name.
    pub unattributed: usize,

    /// Passenger names that are not in the roster, first-seen order,
    /// deduplicated.
    pub unknown_names: Vec<String>,
}
