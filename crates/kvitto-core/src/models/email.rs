//! Raw email input model.

use serde::{Deserialize, Serialize};

/// A single raw email record as delivered by the mail export.
///
/// Only `body` is used for extraction; the remaining fields are
/// passthrough metadata. Unknown keys in the source JSON are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEmail {
    /// Provider message id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Email subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Provider timestamp, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Receipt body text (sole extraction input).
    pub body: String,
}

impl RawEmail {
    /// Create a record from body text alone.
    pub fn from_body(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }
}
