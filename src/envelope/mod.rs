//! The envelope codec
//!
//! Packages encrypted file bytes together with the metadata needed to
//! restore them into a single self-describing text container.

pub mod codec;
pub mod container;
pub mod provenance;

pub use codec::{
    decode, encode, encrypted_filename, inspect, ContainerInfo, ContainerMeta, DecodedFile,
    EncodeOptions, EncodedContainer, FileMeta, DEFAULT_SALT_SECRET, DEFAULT_SUFFIX,
};
pub use container::Container;
pub use provenance::ProvenanceMarker;
