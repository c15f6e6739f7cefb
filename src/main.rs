use anyhow::Result;
use clap::{Parser, Subcommand};

use fileseal::cli::{
    handle_check_passphrase, handle_config_command, handle_decrypt, handle_encrypt,
    handle_inspect, handle_suggest, CheckPassphraseArgs, ConfigCommands, DecryptArgs,
    EncryptArgs, InspectArgs,
};
use fileseal::config::{FilesealPaths, Settings};

#[derive(Parser)]
#[command(
    name = "fileseal",
    author = "Allpasoft",
    version,
    about = "Protect files with a passphrase",
    long_about = "fileseal encrypts a file with a passphrase into a single self-describing \
                  container and restores it later. Containers carry the salt, IV and \
                  file metadata needed to decrypt them; the passphrase is never stored."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file into a container
    #[command(alias = "enc")]
    Encrypt(EncryptArgs),

    /// Restore a file from a container
    #[command(alias = "dec")]
    Decrypt(DecryptArgs),

    /// Show container metadata without decrypting
    Inspect(InspectArgs),

    /// Score a passphrase
    CheckPassphrase(CheckPassphraseArgs),

    /// Suggest a strong random passphrase
    Suggest,

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FilesealPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let log_level = if cli.verbose {
        "debug"
    } else {
        settings.log_level.as_str()
    };
    fileseal::logging::init(log_level)?;

    match cli.command {
        Some(Commands::Encrypt(args)) => handle_encrypt(&settings, args)?,
        Some(Commands::Decrypt(args)) => handle_decrypt(args)?,
        Some(Commands::Inspect(args)) => handle_inspect(args)?,
        Some(Commands::CheckPassphrase(args)) => handle_check_passphrase(args)?,
        Some(Commands::Suggest) => handle_suggest()?,
        Some(Commands::Config(cmd)) => handle_config_command(&paths, &mut settings, cmd)?,
        None => {
            println!("fileseal - passphrase file encryption");
            println!();
            println!("Run 'fileseal --help' for usage information.");
        }
    }

    Ok(())
}
