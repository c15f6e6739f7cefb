//! Encrypt, decrypt and inspect commands
//!
//! The CLI is the codec's caller: it reads files, obtains the passphrase,
//! and writes results. The codec itself never touches the filesystem.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Args;
use tracing::{info, warn};

use crate::config::{SecretSource, Settings};
use crate::crypto::{score_passphrase, SecureString};
use crate::envelope::{self, FileMeta};
use crate::error::{SealError, SealResult};
use crate::storage::{file_name_of, guess_mime_type, read_input, sanitize_file_name, write_bytes_atomic};

/// Arguments for `fileseal encrypt`
#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// File to encrypt
    pub file: PathBuf,

    /// Output path (default: <FILE> plus the configured suffix)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Use AES-256-GCM, which detects tampering
    #[arg(short, long)]
    pub authenticated: bool,

    /// Overwrite the output file if it exists
    #[arg(short, long)]
    pub force: bool,

    /// Read the passphrase from this environment variable instead of prompting
    #[arg(long, value_name = "VAR")]
    pub passphrase_env: Option<String>,
}

/// Arguments for `fileseal decrypt`
#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// Container to decrypt
    pub file: PathBuf,

    /// Output path (default: the original name, next to the container)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it exists
    #[arg(short, long)]
    pub force: bool,

    /// Read the passphrase from this environment variable instead of prompting
    #[arg(long, value_name = "VAR")]
    pub passphrase_env: Option<String>,
}

/// Arguments for `fileseal inspect`
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Container to inspect
    pub file: PathBuf,
}

/// Handle `fileseal encrypt`
pub fn handle_encrypt(settings: &Settings, args: EncryptArgs) -> SealResult<()> {
    let bytes = read_input(&args.file)?;
    let name = file_name_of(&args.file)?;
    let meta = FileMeta::for_bytes(name.as_str(), &bytes, guess_mime_type(&name));

    let passphrase = match &args.passphrase_env {
        Some(var) => passphrase_from_env(var)?,
        None => prompt_new_passphrase()?,
    };
    print_strength_advisory(&passphrase);

    let (salt_secret, source) = settings.resolve_salt_secret();
    if source == SecretSource::Default {
        warn!("no salt secret configured; falling back to the public default");
    }

    let options = settings.encode_options(salt_secret, args.authenticated);
    let encoded = envelope::encode(&bytes, &meta, &passphrase, &options)?;

    let output = args
        .output
        .unwrap_or_else(|| sibling_path(&args.file, &encoded.filename));
    write_bytes_atomic(&output, encoded.data.as_bytes(), args.force)?;

    info!(output = %output.display(), scheme = %options.scheme, "container written");

    println!("Encrypted {} ({} bytes)", meta.name, meta.size);
    println!("Container: {} ({} bytes)", output.display(), encoded.file_size);
    println!("Cipher:    {}", options.scheme);
    if !options.scheme.is_authenticated() {
        println!("Note: this container is not tamper-evident. Use --authenticated for AES-256-GCM.");
    }

    Ok(())
}

/// Handle `fileseal decrypt`
pub fn handle_decrypt(args: DecryptArgs) -> SealResult<()> {
    let blob = read_input(&args.file)?;

    // Reject foreign files before asking for a passphrase
    envelope::inspect(&blob)?;

    let passphrase = match &args.passphrase_env {
        Some(var) => passphrase_from_env(var)?,
        None => prompt_passphrase("Enter passphrase: ")?,
    };

    let decoded = envelope::decode(&blob, &passphrase)?;

    let output = args.output.unwrap_or_else(|| {
        sibling_path(&args.file, &sanitize_file_name(&decoded.meta.original_name))
    });
    write_bytes_atomic(&output, &decoded.bytes, args.force)?;

    info!(output = %output.display(), size = decoded.bytes.len(), "file restored");

    println!("Decrypted {}", decoded.meta.original_name);
    println!("Written to: {} ({} bytes)", output.display(), decoded.bytes.len());
    if !decoded.meta.mime_type.is_empty() {
        println!("Type:       {}", decoded.meta.mime_type);
    }
    println!("Encrypted:  {}", format_timestamp(decoded.meta.timestamp));

    Ok(())
}

/// Handle `fileseal inspect`
pub fn handle_inspect(args: InspectArgs) -> SealResult<()> {
    let blob = read_input(&args.file)?;
    let info = envelope::inspect(&blob)?;

    println!("Container: {}", args.file.display());
    println!("==========");
    println!("Original name: {}", info.meta.original_name);
    println!("Original size: {} bytes", info.meta.original_size);
    println!(
        "MIME type:     {}",
        if info.meta.mime_type.is_empty() {
            "(unknown)"
        } else {
            info.meta.mime_type.as_str()
        }
    );
    println!("Encrypted at:  {}", format_timestamp(info.meta.timestamp));
    println!(
        "Cipher:        {}{}",
        info.scheme,
        if info.authenticated { " (authenticated)" } else { "" }
    );
    println!("Producer:      {} {}", info.marker.company, info.marker.version);

    Ok(())
}

/// Path for `name` in the same directory as `path`
fn sibling_path(path: &Path, name: &str) -> PathBuf {
    match path.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

fn print_strength_advisory(passphrase: &str) {
    let strength = score_passphrase(passphrase);
    if strength.is_valid {
        return;
    }

    println!("Warning: weak passphrase (score {}/100)", strength.score);
    for hint in &strength.feedback {
        println!("  - {}", hint);
    }
}

/// Read a passphrase from the named environment variable
fn passphrase_from_env(var: &str) -> SealResult<SecureString> {
    let value = std::env::var(var).map_err(|_| {
        SealError::Validation(format!("Environment variable {} is not set", var))
    })?;
    non_empty(SecureString::new(value))
}

/// Prompt for a new passphrase with confirmation
fn prompt_new_passphrase() -> SealResult<SecureString> {
    loop {
        let pass1 = prompt_passphrase("Enter passphrase: ")?;
        let pass2 = prompt_passphrase("Confirm passphrase: ")?;

        if pass1 != pass2 {
            println!("Passphrases do not match. Please try again.");
            continue;
        }

        return Ok(pass1);
    }
}

/// Prompt for a passphrase (hidden input)
fn prompt_passphrase(prompt: &str) -> SealResult<SecureString> {
    let value = rpassword::prompt_password(prompt)
        .map_err(|e| SealError::InputReadFailed(format!("Failed to read passphrase: {}", e)))?;
    non_empty(SecureString::new(value))
}

fn non_empty(passphrase: SecureString) -> SealResult<SecureString> {
    if passphrase.is_empty() {
        return Err(SealError::Validation("Passphrase must not be empty".to_string()));
    }
    Ok(passphrase)
}
