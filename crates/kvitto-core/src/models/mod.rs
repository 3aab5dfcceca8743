//! Data models for emails, extracted receipts, and configuration.

pub mod config;
pub mod email;
pub mod receipt;

pub use config::{ExtractMode, ExtractionConfig, KvittoConfig, OnError};
pub use email::RawEmail;
pub use receipt::{BatchWarnings, ExtractedReceipt, ReceiptBatch};
