//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! The iteration count and key size are protocol constants. They are not
//! stored in the container, so changing either one makes every existing
//! container undecryptable.

use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// Derived key size in bytes (AES-256)
pub const KEY_SIZE: usize = 32;

/// Random bytes mixed into every salt
const SALT_ENTROPY_SIZE: usize = 16;

/// A derived encryption key, zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive an encryption key from a passphrase and a container salt
///
/// The salt is used as its UTF-8 text, exactly as it appears in the
/// container. Same inputs always give the same key.
pub fn derive_key(passphrase: &str, salt: &str) -> DerivedKey {
    let mut key = [0u8; KEY_SIZE];
    pbkdf2::pbkdf2_hmac::<Sha256>(
        passphrase.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ITERATIONS,
        &mut key,
    );
    DerivedKey { key }
}

/// Generate a fresh salt for one encode call
///
/// The salt is the hex SHA-256 of the deployment secret, the file identity,
/// the timestamp and 16 bytes from the OS random source. The random part
/// alone makes it unique; the rest keeps concurrent encodes of the same file
/// apart even under a weak random source.
pub fn generate_salt(secret: &str, name: &str, size: u64, timestamp_ms: i64) -> String {
    let mut entropy = [0u8; SALT_ENTROPY_SIZE];
    OsRng.fill_bytes(&mut entropy);

    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(name.as_bytes());
    hasher.update(size.to_string().as_bytes());
    hasher.update(timestamp_ms.to_string().as_bytes());
    hasher.update(entropy);
    entropy.zeroize();

    hex::encode(hasher.finalize())
}
