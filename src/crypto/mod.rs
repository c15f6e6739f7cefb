//! Cryptographic functions for fileseal
//!
//! Provides PBKDF2 key derivation, AES-256 encryption in CBC or GCM mode,
//! zeroizing passphrase storage and the passphrase advisory helpers.

pub mod encryption;
pub mod key_derivation;
pub mod passphrase;
pub mod secure_memory;

pub use encryption::{decrypt, encrypt, generate_iv, CipherScheme, EncryptedData};
pub use key_derivation::{derive_key, generate_salt, DerivedKey, KEY_SIZE, PBKDF2_ITERATIONS};
pub use passphrase::{score_passphrase, suggest_passphrase, PassphraseStrength};
pub use secure_memory::SecureString;
