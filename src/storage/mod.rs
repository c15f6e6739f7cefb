//! Storage layer for fileseal
//!
//! Caller-side I/O around the codec: reading inputs, atomic output writes,
//! output naming and MIME type inference.

pub mod file_io;
pub mod mime;

pub use file_io::{file_name_of, read_input, sanitize_file_name, write_bytes_atomic};
pub use mime::guess_mime_type;
