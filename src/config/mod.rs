//! Configuration module for fileseal
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - User settings persistence
//! - Environment overrides for the salt-mixing secret

pub mod paths;
pub mod settings;

pub use paths::FilesealPaths;
pub use settings::{SecretSource, Settings};
