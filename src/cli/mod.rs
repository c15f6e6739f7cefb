//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the envelope codec.

pub mod config;
pub mod passphrase;
pub mod seal;

pub use config::{handle_config_command, ConfigCommands};
pub use passphrase::{handle_check_passphrase, handle_suggest, CheckPassphraseArgs};
pub use seal::{
    handle_decrypt, handle_encrypt, handle_inspect, DecryptArgs, EncryptArgs, InspectArgs,
};
