//! Passphrase advisory commands

use clap::Args;

use crate::crypto::{score_passphrase, suggest_passphrase, SecureString};
use crate::error::{SealError, SealResult};

/// Arguments for `fileseal check-passphrase`
#[derive(Args, Debug)]
pub struct CheckPassphraseArgs {
    /// Passphrase to score (prompted for when omitted)
    pub passphrase: Option<String>,
}

/// Handle `fileseal check-passphrase`
pub fn handle_check_passphrase(args: CheckPassphraseArgs) -> SealResult<()> {
    let passphrase = match args.passphrase {
        Some(value) => SecureString::new(value),
        None => rpassword::prompt_password("Passphrase to check: ")
            .map(SecureString::new)
            .map_err(|e| {
                SealError::InputReadFailed(format!("Failed to read passphrase: {}", e))
            })?,
    };

    let strength = score_passphrase(&passphrase);

    println!("Score: {}/100", strength.score);
    println!(
        "Strength: {}",
        if strength.is_valid { "acceptable" } else { "weak" }
    );
    for hint in &strength.feedback {
        println!("  - {}", hint);
    }

    Ok(())
}

/// Handle `fileseal suggest`
pub fn handle_suggest() -> SealResult<()> {
    println!("{}", suggest_passphrase());
    Ok(())
}
