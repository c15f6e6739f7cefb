//! Configuration commands

use clap::Subcommand;

use crate::config::{FilesealPaths, Settings};
use crate::crypto::{CipherScheme, SecureString};
use crate::error::{SealError, SealResult};

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,

    /// Print the path of the settings file
    Path,

    /// Store a salt-mixing secret in the settings file
    SetSecret {
        /// The secret (prompted for when omitted)
        secret: Option<String>,
    },

    /// Remove the stored salt-mixing secret
    ClearSecret,

    /// Set the cipher used when `encrypt --authenticated` is not given
    SetCipher {
        /// aes-256-cbc (cbc) or aes-256-gcm (gcm)
        scheme: CipherScheme,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &FilesealPaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> SealResult<()> {
    match cmd {
        ConfigCommands::Show => {
            let (_, source) = settings.resolve_salt_secret();

            println!("fileseal Configuration");
            println!("======================");
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Salt secret:      {}", source);
            println!("Default cipher:   {}", settings.default_scheme);
            println!("Container suffix: {}", settings.encrypted_suffix);
            println!("Log level:        {}", settings.log_level);
        }
        ConfigCommands::Path => {
            println!("{}", paths.settings_file().display());
        }
        ConfigCommands::SetSecret { secret } => {
            let secret = match secret {
                Some(value) => SecureString::new(value),
                None => rpassword::prompt_password("Salt secret: ")
                    .map(SecureString::new)
                    .map_err(|e| {
                        SealError::InputReadFailed(format!("Failed to read secret: {}", e))
                    })?,
            };
            if secret.is_empty() {
                return Err(SealError::Validation("Secret must not be empty".to_string()));
            }

            settings.salt_secret = Some(secret.as_str().to_string());
            settings.save(paths)?;
            println!("Salt secret saved to {}", paths.settings_file().display());
        }
        ConfigCommands::ClearSecret => {
            settings.salt_secret = None;
            settings.save(paths)?;
            println!("Salt secret removed. The public default will be used.");
        }
        ConfigCommands::SetCipher { scheme } => {
            settings.default_scheme = scheme;
            settings.save(paths)?;
            println!("Default cipher set to {}", scheme);
            if !scheme.is_authenticated() {
                println!("Note: {} containers are not tamper-evident.", scheme);
            }
        }
    }

    Ok(())
}
