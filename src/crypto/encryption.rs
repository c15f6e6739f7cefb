//! Symmetric encryption of file bytes
//!
//! Two schemes are supported. `Aes256Cbc` (PKCS#7 padding, 16-byte IV) is
//! the legacy container format and carries no integrity protection.
//! `Aes256Gcm` (12-byte nonce) is the authenticated alternative and keeps the
//! same container field layout.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{SealError, SealResult};

use super::DerivedKey;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// CBC initialization vector size in bytes (AES block size)
pub const CBC_IV_SIZE: usize = 16;

/// GCM nonce size in bytes (96 bits)
pub const GCM_NONCE_SIZE: usize = 12;

/// Cipher mode used for a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CipherScheme {
    /// AES-256-CBC with PKCS#7 padding
    #[default]
    #[serde(rename = "aes-256-cbc")]
    Aes256Cbc,
    /// AES-256-GCM
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
}

impl CipherScheme {
    /// Size of the IV / nonce this scheme expects
    pub fn iv_size(self) -> usize {
        match self {
            Self::Aes256Cbc => CBC_IV_SIZE,
            Self::Aes256Gcm => GCM_NONCE_SIZE,
        }
    }

    /// Whether tampering with the ciphertext is reliably detected
    pub fn is_authenticated(self) -> bool {
        matches!(self, Self::Aes256Gcm)
    }

    /// Canonical name, as stored in the container
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aes256Cbc => "aes-256-cbc",
            Self::Aes256Gcm => "aes-256-gcm",
        }
    }
}

impl std::fmt::Display for CipherScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CipherScheme {
    type Err = SealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aes-256-cbc" | "cbc" => Ok(Self::Aes256Cbc),
            "aes-256-gcm" | "gcm" => Ok(Self::Aes256Gcm),
            other => Err(SealError::Validation(format!(
                "Unknown cipher scheme: {}",
                other
            ))),
        }
    }
}

/// Ciphertext and IV in their textual container encodings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedData {
    /// The IV / nonce (hex encoded)
    pub iv: String,
    /// The ciphertext (base64 encoded)
    pub ciphertext: String,
}

impl EncryptedData {
    fn new(iv: &[u8], ciphertext: &[u8]) -> Self {
        Self {
            iv: hex::encode(iv),
            ciphertext: STANDARD.encode(ciphertext),
        }
    }

    /// Decode the IV from hex, checking its size against the scheme
    fn decode_iv(&self, scheme: CipherScheme) -> SealResult<Vec<u8>> {
        let iv = hex::decode(self.iv.trim())
            .map_err(|e| SealError::MalformedContainer(format!("Invalid iv encoding: {}", e)))?;
        if iv.len() != scheme.iv_size() {
            return Err(SealError::MalformedContainer(format!(
                "Invalid iv size: expected {}, got {}",
                scheme.iv_size(),
                iv.len()
            )));
        }
        Ok(iv)
    }

    /// Decode the ciphertext from base64
    ///
    /// A damaged ciphertext is indistinguishable from a wrong key.
    fn decode_ciphertext(&self) -> SealResult<Vec<u8>> {
        STANDARD
            .decode(self.ciphertext.trim())
            .map_err(|_| SealError::DecryptionFailed)
    }
}

/// Generate a fresh random IV / nonce sized for the scheme
pub fn generate_iv(scheme: CipherScheme) -> Vec<u8> {
    let mut iv = vec![0u8; scheme.iv_size()];
    OsRng.fill_bytes(&mut iv);
    iv
}

/// Encrypt plaintext under the given key with a fresh IV
pub fn encrypt(
    plaintext: &[u8],
    key: &DerivedKey,
    scheme: CipherScheme,
) -> SealResult<EncryptedData> {
    let iv = generate_iv(scheme);

    let ciphertext = match scheme {
        CipherScheme::Aes256Cbc => Aes256CbcEnc::new_from_slices(key.as_bytes(), &iv)
            .map_err(|e| SealError::EncodeFailed(format!("Failed to create cipher: {}", e)))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        CipherScheme::Aes256Gcm => {
            let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
                .map_err(|e| SealError::EncodeFailed(format!("Failed to create cipher: {}", e)))?;
            cipher
                .encrypt(Nonce::from_slice(&iv), plaintext)
                .map_err(|_| SealError::EncodeFailed("Encryption failed".to_string()))?
        }
    };

    Ok(EncryptedData::new(&iv, &ciphertext))
}

/// Decrypt ciphertext under the given key
///
/// Padding errors, authentication failures and undecodable ciphertext all
/// surface as [`SealError::DecryptionFailed`].
pub fn decrypt(
    encrypted: &EncryptedData,
    key: &DerivedKey,
    scheme: CipherScheme,
) -> SealResult<Vec<u8>> {
    let iv = encrypted.decode_iv(scheme)?;
    let ciphertext = encrypted.decode_ciphertext()?;

    match scheme {
        CipherScheme::Aes256Cbc => Aes256CbcDec::new_from_slices(key.as_bytes(), &iv)
            .map_err(|_| SealError::DecryptionFailed)?
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| SealError::DecryptionFailed),
        CipherScheme::Aes256Gcm => {
            let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
                .map_err(|_| SealError::DecryptionFailed)?;
            cipher
                .decrypt(Nonce::from_slice(&iv), ciphertext.as_ref())
                .map_err(|_| SealError::DecryptionFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key_derivation::derive_key;

    fn test_key() -> DerivedKey {
        derive_key("test_passphrase", "test_salt")
    }

    #[test]
    fn test_encrypt_decrypt_cbc() {
        let key = test_key();
        let plaintext = b"Hello, World!";

        let encrypted = encrypt(plaintext, &key, CipherScheme::Aes256Cbc).unwrap();
        let decrypted = decrypt(&encrypted, &key, CipherScheme::Aes256Cbc).unwrap();

        assert_eq!(plaintext, decrypted.as_slice());
    }

    #[test]
    fn test_encrypt_decrypt_gcm() {
        let key = test_key();
        let plaintext = b"Hello, World!";

        let encrypted = encrypt(plaintext, &key, CipherScheme::Aes256Gcm).unwrap();
        let decrypted = decrypt(&encrypted, &key, CipherScheme::Aes256Gcm).unwrap();

        assert_eq!(plaintext, decrypted.as_slice());
    }

    #[test]
    fn test_iv_sizes() {
        let key = test_key();
        let cbc = encrypt(b"x", &key, CipherScheme::Aes256Cbc).unwrap();
        let gcm = encrypt(b"x", &key, CipherScheme::Aes256Gcm).unwrap();
        assert_eq!(cbc.iv.len(), CBC_IV_SIZE * 2);
        assert_eq!(gcm.iv.len(), GCM_NONCE_SIZE * 2);
    }

    #[test]
    fn test_cbc_pads_to_block() {
        let key = test_key();
        let encrypted = encrypt(&[7u8; 16], &key, CipherScheme::Aes256Cbc).unwrap();
        let raw = STANDARD.decode(&encrypted.ciphertext).unwrap();
        // A full block of plaintext gains a full block of padding
        assert_eq!(raw.len(), 32);
    }

    #[test]
    fn test_different_ivs() {
        let key = test_key();
        let plaintext = b"Hello, World!";

        let encrypted1 = encrypt(plaintext, &key, CipherScheme::Aes256Cbc).unwrap();
        let encrypted2 = encrypt(plaintext, &key, CipherScheme::Aes256Cbc).unwrap();

        assert_ne!(encrypted1.iv, encrypted2.iv);
        assert_ne!(encrypted1.ciphertext, encrypted2.ciphertext);
    }

    #[test]
    fn test_wrong_key_fails_gcm() {
        let key1 = test_key();
        let key2 = derive_key("different_passphrase", "test_salt");

        let encrypted = encrypt(b"Hello, World!", &key1, CipherScheme::Aes256Gcm).unwrap();
        let result = decrypt(&encrypted, &key2, CipherScheme::Aes256Gcm);
        assert!(matches!(result, Err(SealError::DecryptionFailed)));
    }

    #[test]
    fn test_tampered_ciphertext_fails_gcm() {
        let key = test_key();
        let mut encrypted = encrypt(b"Hello, World!", &key, CipherScheme::Aes256Gcm).unwrap();

        let mut ciphertext = STANDARD.decode(&encrypted.ciphertext).unwrap();
        ciphertext[0] ^= 0xFF;
        encrypted.ciphertext = STANDARD.encode(&ciphertext);

        let result = decrypt(&encrypted, &key, CipherScheme::Aes256Gcm);
        assert!(matches!(result, Err(SealError::DecryptionFailed)));
    }

    #[test]
    fn test_bad_iv_is_malformed() {
        let key = test_key();
        let mut encrypted = encrypt(b"data", &key, CipherScheme::Aes256Cbc).unwrap();
        encrypted.iv = "abcd".to_string();

        let result = decrypt(&encrypted, &key, CipherScheme::Aes256Cbc);
        assert!(matches!(result, Err(SealError::MalformedContainer(_))));

        encrypted.iv = "not hex at all".to_string();
        let result = decrypt(&encrypted, &key, CipherScheme::Aes256Cbc);
        assert!(matches!(result, Err(SealError::MalformedContainer(_))));
    }

    #[test]
    fn test_bad_ciphertext_encoding_is_decryption_failure() {
        let key = test_key();
        let mut encrypted = encrypt(b"data", &key, CipherScheme::Aes256Cbc).unwrap();
        encrypted.ciphertext = "***".to_string();

        let result = decrypt(&encrypted, &key, CipherScheme::Aes256Cbc);
        assert!(matches!(result, Err(SealError::DecryptionFailed)));
    }

    #[test]
    fn test_empty_plaintext() {
        let key = test_key();

        for scheme in [CipherScheme::Aes256Cbc, CipherScheme::Aes256Gcm] {
            let encrypted = encrypt(b"", &key, scheme).unwrap();
            let decrypted = decrypt(&encrypted, &key, scheme).unwrap();
            assert!(decrypted.is_empty());
        }
    }

    #[test]
    fn test_large_plaintext() {
        let key = test_key();
        let plaintext: Vec<u8> = (0..10000).map(|i| (i % 256) as u8).collect();

        let encrypted = encrypt(&plaintext, &key, CipherScheme::Aes256Cbc).unwrap();
        let decrypted = decrypt(&encrypted, &key, CipherScheme::Aes256Cbc).unwrap();

        assert_eq!(plaintext, decrypted);
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("gcm".parse::<CipherScheme>().unwrap(), CipherScheme::Aes256Gcm);
        assert_eq!(
            "AES-256-CBC".parse::<CipherScheme>().unwrap(),
            CipherScheme::Aes256Cbc
        );
        assert!("rot13".parse::<CipherScheme>().is_err());
    }

    #[test]
    fn test_scheme_serde_names() {
        let json = serde_json::to_string(&CipherScheme::Aes256Gcm).unwrap();
        assert_eq!(json, "\"aes-256-gcm\"");
    }
}
