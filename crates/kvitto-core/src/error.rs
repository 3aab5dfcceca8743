//! Error types for the kvitto-core library.

use thiserror::Error;

/// Main error type for the kvitto library.
#[derive(Error, Debug)]
pub enum KvittoError {
    /// Input normalization error.
    #[error("normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    /// Batch aggregation error.
    #[error("batch error: {0}")]
    Batch(#[from] BatchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to input normalization.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The input could not be interpreted as JSON or marker-delimited text.
    #[error("failed to parse email data: {0}")]
    Unparsable(String),

    /// A fragment failed to decode and the on-error policy is Fail.
    #[error("fragment {index} failed to decode: {reason}")]
    BadFragment { index: usize, reason: String },
}

/// Errors related to batch aggregation.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The parallel output sequences ended up with different lengths.
    ///
    /// Unreachable by construction since acceptance appends to all four
    /// sequences atomically; raised anyway to signal a logic defect.
    #[error(
        "inconsistent list lengths: dates={dates}, passengers={passengers}, \
         costs={costs}, currencies={currencies}"
    )]
    LengthMismatch {
        dates: usize,
        passengers: usize,
        costs: usize,
        currencies: usize,
    },

    /// No record yielded both a cost and a currency.
    #[error("no valid receipts were extracted from the provided data")]
    Empty,

    /// A record was rejected and the on-error policy is Fail.
    #[error("record {index} rejected: missing {missing}")]
    Rejected { index: usize, missing: String },
}

/// Result type for the kvitto library.
pub type Result<T> = std::result::Result<T, KvittoError>;
