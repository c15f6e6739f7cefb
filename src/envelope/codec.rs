//! Envelope codec
//!
//! `encode` turns file bytes, metadata and a passphrase into a serialized
//! container; `decode` reverses it. The codec is stateless: it performs no
//! I/O, reads no environment and keeps nothing between calls. Key material
//! lives only for the duration of a call and is zeroed on drop.

use chrono::Utc;
use serde::Serialize;
use tracing::debug;
use zeroize::Zeroize;

use crate::crypto::{self, derive_key, generate_salt, CipherScheme};
use crate::error::{SealError, SealResult};

use super::container::Container;
use super::provenance::ProvenanceMarker;

/// Salt-mixing secret used when the deployment provides none
///
/// This value is public; relying on it is a disclosed weakness.
pub const DEFAULT_SALT_SECRET: &str = "fileseal-public-salt";

/// Suffix appended to produced container filenames
pub const DEFAULT_SUFFIX: &str = ".encrypted";

/// Metadata describing the plaintext file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileMeta {
    /// Metadata for `bytes` under the given name and MIME type
    pub fn for_bytes(name: impl Into<String>, bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            mime_type: mime_type.into(),
        }
    }
}

/// Per-call encode configuration
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Deployment secret mixed into the salt
    pub salt_secret: String,
    pub scheme: CipherScheme,
    /// Appended to the original name to form the container filename
    pub suffix: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            salt_secret: DEFAULT_SALT_SECRET.to_string(),
            scheme: CipherScheme::default(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

/// Output of a successful encode
#[derive(Debug, Clone)]
pub struct EncodedContainer {
    /// The serialized container text
    pub data: String,
    /// Suggested filename for the container
    pub filename: String,
    pub original_name: String,
    pub timestamp: i64,
    /// Length of the serialized container in bytes
    pub file_size: u64,
}

/// Metadata recovered from a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerMeta {
    pub original_name: String,
    pub original_size: u64,
    pub mime_type: String,
    pub timestamp: i64,
}

impl From<&Container> for ContainerMeta {
    fn from(container: &Container) -> Self {
        Self {
            original_name: container.original_name.clone(),
            original_size: container.original_size,
            mime_type: container.mime_type.clone(),
            timestamp: container.timestamp,
        }
    }
}

/// Output of a successful decode
#[derive(Debug, Clone)]
pub struct DecodedFile {
    pub bytes: Vec<u8>,
    pub meta: ContainerMeta,
}

/// Everything readable from a container without the passphrase
#[derive(Debug, Clone, Serialize)]
pub struct ContainerInfo {
    pub meta: ContainerMeta,
    pub scheme: CipherScheme,
    pub authenticated: bool,
    pub marker: ProvenanceMarker,
}

/// Container filename for an original file name
pub fn encrypted_filename(original_name: &str, suffix: &str) -> String {
    format!("{}{}", original_name, suffix)
}

/// Encrypt file bytes into a serialized container
pub fn encode(
    bytes: &[u8],
    meta: &FileMeta,
    passphrase: &str,
    options: &EncodeOptions,
) -> SealResult<EncodedContainer> {
    if meta.size != bytes.len() as u64 {
        return Err(SealError::EncodeFailed(format!(
            "Metadata size {} does not match input length {}",
            meta.size,
            bytes.len()
        )));
    }

    debug!(
        name = %meta.name,
        size = meta.size,
        scheme = %options.scheme,
        "encoding container"
    );

    let timestamp = Utc::now().timestamp_millis();
    let salt = generate_salt(&options.salt_secret, &meta.name, meta.size, timestamp);
    let key = derive_key(passphrase, &salt);

    let encrypted = crypto::encrypt(bytes, &key, options.scheme)?;
    drop(key);

    let container = Container {
        data: encrypted.ciphertext,
        salt,
        iv: encrypted.iv,
        original_name: meta.name.clone(),
        original_size: meta.size,
        timestamp,
        mime_type: meta.mime_type.clone(),
        signature: ProvenanceMarker::current(timestamp),
        cipher: options.scheme,
    };

    let data = container.to_blob()?;
    let file_size = data.len() as u64;

    debug!(container_size = file_size, "container encoded");

    Ok(EncodedContainer {
        data,
        filename: encrypted_filename(&meta.name, &options.suffix),
        original_name: meta.name.clone(),
        timestamp,
        file_size,
    })
}

/// Decrypt a serialized container
///
/// A wrong passphrase and a damaged ciphertext both yield
/// [`SealError::DecryptionFailed`]. For legacy CBC containers tampering is
/// not reliably detected; see [`CipherScheme::is_authenticated`].
pub fn decode(blob: &[u8], passphrase: &str) -> SealResult<DecodedFile> {
    let container = Container::from_blob(blob)?;

    debug!(
        name = %container.original_name,
        size = container.original_size,
        scheme = %container.cipher,
        "decoding container"
    );

    let key = derive_key(passphrase, &container.salt);
    let mut bytes = crypto::decrypt(&container.encrypted_data(), &key, container.cipher)?;
    drop(key);

    // PKCS#7 padding can validate by chance under a wrong key; the
    // recorded size catches almost all of those cases. This failure must
    // look exactly like a padding failure to the caller.
    if bytes.len() as u64 != container.original_size {
        debug!("decrypted length does not match recorded size");
        bytes.zeroize();
        return Err(SealError::DecryptionFailed);
    }

    Ok(DecodedFile {
        bytes,
        meta: ContainerMeta::from(&container),
    })
}

/// Read a container's metadata without decrypting it
pub fn inspect(blob: &[u8]) -> SealResult<ContainerInfo> {
    let container = Container::from_blob(blob)?;
    Ok(ContainerInfo {
        meta: ContainerMeta::from(&container),
        scheme: container.cipher,
        authenticated: container.cipher.is_authenticated(),
        marker: container.signature,
    })
}
