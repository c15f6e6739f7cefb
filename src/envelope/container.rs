//! Container record and its wire form
//!
//! A container is serialized as `base64(json_document)`, with the JSON
//! field names kept in camelCase so containers stay interchangeable with
//! other producers of the same format.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::crypto::{CipherScheme, EncryptedData};
use crate::error::{SealError, SealResult};

use super::provenance::{self, ProvenanceMarker};

fn is_legacy_scheme(scheme: &CipherScheme) -> bool {
    *scheme == CipherScheme::Aes256Cbc
}

/// An encrypted file plus everything needed to restore it
///
/// Containers are immutable once produced; decoding only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Ciphertext, base64 encoded
    pub data: String,
    /// Key derivation salt, stored in clear
    pub salt: String,
    /// IV / nonce, hex encoded
    pub iv: String,
    pub original_name: String,
    pub original_size: u64,
    /// Creation time in epoch milliseconds
    pub timestamp: i64,
    #[serde(default)]
    pub mime_type: String,
    pub signature: ProvenanceMarker,
    /// Absent for legacy CBC containers
    #[serde(default, skip_serializing_if = "is_legacy_scheme")]
    pub cipher: CipherScheme,
}

impl Container {
    /// The ciphertext and IV as the cipher layer expects them
    pub fn encrypted_data(&self) -> EncryptedData {
        EncryptedData {
            iv: self.iv.clone(),
            ciphertext: self.data.clone(),
        }
    }

    /// Render the container as its base64(JSON) text blob
    pub fn to_blob(&self) -> SealResult<String> {
        let json = serde_json::to_string(self)
            .map_err(|e| SealError::EncodeFailed(format!("Failed to serialize container: {}", e)))?;
        Ok(STANDARD.encode(json.as_bytes()))
    }

    /// Parse a text blob back into a container
    ///
    /// Surrounding whitespace is ignored. Base64 and JSON failures are
    /// [`SealError::MalformedContainer`]; a missing or foreign provenance
    /// marker is [`SealError::UnrecognizedFormat`].
    pub fn from_blob(blob: &[u8]) -> SealResult<Self> {
        let document = parse_document(blob)?;
        provenance::verify_document(&document)?;

        serde_json::from_value(document)
            .map_err(|e| SealError::MalformedContainer(format!("Invalid container fields: {}", e)))
    }
}

/// Base64-decode a blob and parse the JSON document inside it
fn parse_document(blob: &[u8]) -> SealResult<serde_json::Value> {
    let trimmed = blob.trim_ascii();

    let json = STANDARD
        .decode(trimmed)
        .map_err(|e| SealError::MalformedContainer(format!("Invalid base64: {}", e)))?;

    let document: serde_json::Value = serde_json::from_slice(&json)
        .map_err(|e| SealError::MalformedContainer(format!("Invalid JSON document: {}", e)))?;

    if !document.is_object() {
        return Err(SealError::MalformedContainer(
            "Container document is not a JSON object".to_string(),
        ));
    }

    Ok(document)
}
