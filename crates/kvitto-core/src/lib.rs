//! Core library for ride-receipt email extraction.
//!
//! This crate provides:
//! - Input normalization (JSON arrays, single objects, or marker-
//!   delimited text blobs of concatenated JSON fragments)
//! - Rule-based field extraction from Swedish Uber receipt bodies
//!   (cost, currency, ride date, passenger name)
//! - Batch aggregation into four parallel lists with attribution
//!   warnings

pub mod batch;
pub mod error;
pub mod models;
pub mod normalize;
pub mod receipt;

pub use batch::BatchExtractor;
pub use error::{BatchError, KvittoError, NormalizeError, Result};
pub use models::{
    BatchWarnings, ExtractMode, ExtractedReceipt, ExtractionConfig, KvittoConfig, OnError,
    RawEmail, ReceiptBatch,
};
pub use normalize::normalize;
pub use receipt::{ReceiptParser, Roster};
