//! User settings for fileseal
//!
//! Holds the deployment salt-mixing secret, the container filename suffix,
//! the default cipher scheme and the log level.

use serde::{Deserialize, Serialize};

use super::paths::FilesealPaths;
use crate::crypto::CipherScheme;
use crate::envelope::{EncodeOptions, DEFAULT_SALT_SECRET, DEFAULT_SUFFIX};
use crate::error::SealError;

/// Environment variable overriding the configured salt secret
pub const SALT_SECRET_ENV: &str = "FILESEAL_SALT_SECRET";

/// Where the effective salt secret came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    Environment,
    Settings,
    /// The public fallback value
    Default,
}

impl std::fmt::Display for SecretSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Environment => write!(f, "environment ({})", SALT_SECRET_ENV),
            Self::Settings => write!(f, "settings file"),
            Self::Default => write!(f, "public default"),
        }
    }
}

/// User settings for fileseal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Deployment secret mixed into every salt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt_secret: Option<String>,

    /// Suffix appended to container filenames
    #[serde(default = "default_suffix")]
    pub encrypted_suffix: String,

    /// Cipher scheme used when `--authenticated` is not given
    #[serde(default)]
    pub default_scheme: CipherScheme,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            salt_secret: None,
            encrypted_suffix: default_suffix(),
            default_scheme: CipherScheme::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FilesealPaths) -> Result<Self, SealError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| SealError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SealError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FilesealPaths) -> Result<(), SealError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SealError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SealError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Resolve the salt secret, preferring the environment value
    pub fn resolve_salt_secret_with(&self, env_value: Option<String>) -> (String, SecretSource) {
        match (env_value.filter(|v| !v.is_empty()), &self.salt_secret) {
            (Some(value), _) => (value, SecretSource::Environment),
            (None, Some(value)) if !value.is_empty() => (value.clone(), SecretSource::Settings),
            _ => (DEFAULT_SALT_SECRET.to_string(), SecretSource::Default),
        }
    }

    /// Resolve the salt secret from the process environment and settings
    pub fn resolve_salt_secret(&self) -> (String, SecretSource) {
        self.resolve_salt_secret_with(std::env::var(SALT_SECRET_ENV).ok())
    }

    /// Build codec options from these settings
    pub fn encode_options(&self, salt_secret: String, authenticated: bool) -> EncodeOptions {
        EncodeOptions {
            salt_secret,
            scheme: if authenticated {
                CipherScheme::Aes256Gcm
            } else {
                self.default_scheme
            },
            suffix: self.encrypted_suffix.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.encrypted_suffix, ".encrypted");
        assert_eq!(settings.default_scheme, CipherScheme::Aes256Cbc);
        assert!(settings.salt_secret.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FilesealPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.salt_secret = Some("deployment-secret".to_string());
        settings.default_scheme = CipherScheme::Aes256Gcm;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.salt_secret.as_deref(), Some("deployment-secret"));
        assert_eq!(loaded.default_scheme, CipherScheme::Aes256Gcm);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FilesealPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.log_level, "warn");
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_load_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FilesealPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        let result = Settings::load_or_create(&paths);
        assert!(matches!(result, Err(SealError::Config(_))));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"salt_secret":"x"}"#).unwrap();
        assert_eq!(settings.encrypted_suffix, ".encrypted");
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_salt_secret_precedence() {
        let mut settings = Settings::default();

        let (value, source) = settings.resolve_salt_secret_with(None);
        assert_eq!(value, DEFAULT_SALT_SECRET);
        assert_eq!(source, SecretSource::Default);

        settings.salt_secret = Some("from-file".to_string());
        let (value, source) = settings.resolve_salt_secret_with(None);
        assert_eq!(value, "from-file");
        assert_eq!(source, SecretSource::Settings);

        let (value, source) = settings.resolve_salt_secret_with(Some("from-env".to_string()));
        assert_eq!(value, "from-env");
        assert_eq!(source, SecretSource::Environment);

        let (_, source) = settings.resolve_salt_secret_with(Some(String::new()));
        assert_eq!(source, SecretSource::Settings);
    }

    #[test]
    fn test_encode_options() {
        let settings = Settings::default();
        let options = settings.encode_options("s".to_string(), true);
        assert_eq!(options.scheme, CipherScheme::Aes256Gcm);
        assert_eq!(options.suffix, ".encrypted");

        let options = settings.encode_options("s".to_string(), false);
        assert_eq!(options.scheme, CipherScheme::Aes256Cbc);
    }
}
