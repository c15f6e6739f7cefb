//! fileseal - passphrase-based file encryption
//!
//! This library turns a file and a passphrase into a single self-describing
//! container and back. The container is `base64(json)` holding the
//! ciphertext, the key derivation salt, the IV, the original file metadata
//! and a provenance marker.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `envelope`: The codec (`encode` / `decode`) and the container format
//! - `crypto`: Key derivation, ciphers, secure memory, passphrase helpers
//! - `storage`: Caller-side file I/O with atomic writes
//! - `config`: Settings and path management
//! - `error`: Custom error types
//! - `cli`: Command handlers for the `fileseal` binary
//!
//! # Example
//!
//! ```rust
//! use fileseal::envelope::{decode, encode, EncodeOptions, FileMeta};
//!
//! let bytes = b"hello";
//! let meta = FileMeta::for_bytes("hello.txt", bytes, "text/plain");
//! let encoded = encode(bytes, &meta, "Tr0ub4dor&3-horse", &EncodeOptions::default())?;
//!
//! let decoded = decode(encoded.data.as_bytes(), "Tr0ub4dor&3-horse")?;
//! assert_eq!(decoded.bytes, bytes);
//! assert_eq!(decoded.meta.original_name, "hello.txt");
//! # Ok::<(), fileseal::SealError>(())
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod logging;
pub mod storage;

pub use envelope::{decode, encode, inspect};
pub use error::{SealError, SealResult};
