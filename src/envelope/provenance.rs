//! Provenance marker
//!
//! Every container carries a fixed, non-secret marker naming the system
//! that produced it. It is a format-compatibility gate only and proves
//! nothing about integrity or authenticity.

use serde::{Deserialize, Serialize};

use crate::error::{SealError, SealResult};

/// Company name every container must declare
pub const COMPANY: &str = "Allpasoft";

/// Marker version written into new containers
pub const MARKER_VERSION: &str = "1.0.0";

/// Descriptive signature string written into new containers
pub const SIGNATURE_TEXT: &str = "Made with 💚 by Allpasoft - Secure File Encryption";

/// The `signature` object of a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceMarker {
    pub company: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub signature: String,
}

impl ProvenanceMarker {
    /// The marker stamped on containers produced at `timestamp_ms`
    pub fn current(timestamp_ms: i64) -> Self {
        Self {
            company: COMPANY.to_string(),
            version: MARKER_VERSION.to_string(),
            timestamp: timestamp_ms,
            signature: SIGNATURE_TEXT.to_string(),
        }
    }
}

/// Check the `signature` field of a parsed container document
///
/// Only the company is compared. Version and timestamp are informational
/// so containers from other producer versions stay readable.
pub fn verify_document(document: &serde_json::Value) -> SealResult<()> {
    let company = document
        .get("signature")
        .and_then(|s| s.get("company"))
        .and_then(|c| c.as_str());

    match company {
        Some(c) if c == COMPANY => Ok(()),
        Some(other) => Err(SealError::UnrecognizedFormat(format!(
            "container was produced by '{}'",
            other
        ))),
        None => Err(SealError::UnrecognizedFormat(
            "container has no provenance marker".to_string(),
        )),
    }
}
