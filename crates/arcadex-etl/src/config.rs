use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use toml_edit::{value, DocumentMut};

use arcadex_auth::{KeyError, ProvisionedSecrets, TotpSecret, Verifier};

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_REQUEST_DELAY_MS: u64 = 500;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration for arcadex.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (ARCADEX_* prefix)
/// 3. Config file (~/.config/arcadex/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the catalog API. Songs are posted to `{api_base_url}/api/Songs`.
    ///
    /// Can be set via:
    /// - ENV: ARCADEX_API_BASE_URL
    /// - Config: api_base_url = "..."
    pub api_base_url: String,

    /// Base32 shared secret for time-based codes.
    pub totp_secret: Option<String>,

    /// Raw base64 SubjectPublicKeyInfo used to check signed challenges.
    pub rsa_public_key: Option<String>,

    /// Where `keygen` stores the private key.
    ///
    /// Default: ~/.config/arcadex/privkey.pem
    pub private_key_path: PathBuf,

    /// Pause between consecutive import requests.
    pub request_delay_ms: u64,

    /// HTTP timeout of the catalog client.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            totp_secret: None,
            rsa_public_key: None,
            private_key_path: default_private_key_path(),
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url)
            .field("totp_secret", &redacted(self.totp_secret.as_deref()))
            .field("rsa_public_key", &self.rsa_public_key.is_some())
            .field("private_key_path", &self.private_key_path)
            .field("request_delay_ms", &self.request_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn redacted(secret: Option<&str>) -> &'static str {
    match secret {
        Some(_) => "<redacted>",
        None => "<unset>",
    }
}

/// The stored credential material a [`Verifier`] is built from.
#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    pub totp_secret: Option<&'a str>,
    pub rsa_public_key: Option<&'a str>,
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("totp_secret", &redacted(self.totp_secret))
            .field("rsa_public_key", &self.rsa_public_key.is_some())
            .finish()
    }
}

impl Credentials<'_> {
    /// Decode the stored material into a verifier.
    pub fn verifier(&self) -> Result<Verifier, KeyError> {
        Verifier::from_stored(self.totp_secret, self.rsa_public_key)
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/arcadex/config.toml
    /// Reads environment variables with ARCADEX_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from an explicit config file path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("arcadex");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Stored credential material, read-only.
    pub fn credentials(&self) -> Credentials<'_> {
        Credentials {
            totp_secret: self.totp_secret.as_deref(),
            rsa_public_key: self.rsa_public_key.as_deref(),
        }
    }

    /// Build the verifier for inbound tokens.
    pub fn verifier(&self) -> Result<Verifier, KeyError> {
        self.credentials().verifier()
    }

    /// The shared secret, if one is configured and non-empty.
    pub fn totp_secret(&self) -> Result<Option<TotpSecret>, KeyError> {
        self.totp_secret
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(TotpSecret::from_base32)
            .transpose()
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("arcadex")
}

/// Get the default private key path.
///
/// Returns: ~/.config/arcadex/privkey.pem (or platform equivalent)
pub fn default_private_key_path() -> PathBuf {
    config_dir().join("privkey.pem")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/arcadex/config.toml
/// - macOS: ~/Library/Application Support/arcadex/config.toml
/// - Windows: %APPDATA%\arcadex\config.toml
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Arcadex Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (ARCADEX_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Root of the catalog API; songs are posted to <api_base_url>/api/Songs
#
# Can also be set via:
# - Environment: ARCADEX_API_BASE_URL=https://catalog.example.com
api_base_url = "http://localhost:5000"

# Credential material, written once by `arcadex keygen`.
#
# totp_secret is the Base32 shared secret for six-digit codes.
# rsa_public_key is the base64 public key that checks signed challenges.
#totp_secret = ""
#rsa_public_key = ""

# Where `arcadex keygen` stores the private key
#
# Default: privkey.pem in the platform config directory
# (~/.config/arcadex/privkey.pem on Linux), even when --config-file
# points elsewhere
#private_key_path = "/path/to/privkey.pem"

# Pause between consecutive import requests, in milliseconds
request_delay_ms = 500

# HTTP timeout of the catalog client, in seconds
request_timeout_secs = 30
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}

pub fn ensure_config_file_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

/// Set top-level string keys in a TOML config file, keeping its comments.
///
/// The file is created if it does not exist.
pub fn set_values(config_path: &Path, values: &[(&str, &str)]) -> Result<()> {
    let existing = if config_path.exists() {
        std::fs::read_to_string(config_path).context("Failed to read config file")?
    } else {
        String::new()
    };

    let mut doc: DocumentMut = existing
        .parse()
        .context("Failed to parse config file")?;
    for (key, val) in values {
        doc[*key] = value(*val);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    std::fs::write(config_path, doc.to_string()).context("Failed to write config file")?;
    Ok(())
}

/// Persist freshly provisioned secrets.
///
/// The public material goes into the config file and the private key into
/// its own file. Refuses to replace existing credentials unless `force`.
pub fn store_secrets(
    config: &Config,
    config_path: &Path,
    secrets: &ProvisionedSecrets,
    force: bool,
) -> Result<()> {
    let has_credentials = [&config.totp_secret, &config.rsa_public_key]
        .iter()
        .any(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()));
    if !force && (has_credentials || config.private_key_path.exists()) {
        anyhow::bail!(
            "Credentials are already provisioned in {}; pass --force to replace them",
            config_path.display()
        );
    }

    write_private_key(&config.private_key_path, &secrets.rsa_private_key)?;
    set_values(
        config_path,
        &[
            ("totp_secret", secrets.totp_secret.as_str()),
            ("rsa_public_key", secrets.rsa_public_key.as_str()),
        ],
    )?;

    log::info!(
        "Stored credentials in {} (private key: {})",
        config_path.display(),
        config.private_key_path.display()
    );
    Ok(())
}

fn write_private_key(path: &Path, key: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create key directory")?;
    }
    std::fs::write(path, key).context("Failed to write private key")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .context("Failed to restrict private key permissions")?;
    }
    Ok(())
}

/// Read back the private key written by [`store_secrets`].
pub fn load_private_key(path: &Path) -> Result<String> {
    let key = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read private key at {}", path.display()))?;
    Ok(key.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn secrets() -> ProvisionedSecrets {
        ProvisionedSecrets {
            totp_secret: "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ".to_string(),
            rsa_public_key: "cHVibGlj".to_string(),
            rsa_private_key: "cHJpdmF0ZQ==".to_string(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.request_delay(), Duration::from_millis(500));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.totp_secret.is_none());
        assert!(config.private_key_path.ends_with("privkey.pem"));
    }

    #[test]
    fn test_default_private_key_path_ignores_config_location() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        ensure_config_file_at(&path).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.private_key_path, default_private_key_path());
        assert_eq!(
            default_private_key_path().parent(),
            config_file_path().parent()
        );
        assert!(example_config().contains("~/.config/arcadex/privkey.pem"));
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_example_config_parses() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert!(ensure_config_file_at(&path).unwrap());
        assert!(!ensure_config_file_at(&path).unwrap());

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.request_delay_ms, 500);
        assert!(config.totp_secret.is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config {
            totp_secret: Some("GEZDGNBVGY3TQOJQ".to_string()),
            ..Config::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("GEZDGNBVGY3TQOJQ"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_totp_secret_blank_is_unset() {
        let config = Config {
            totp_secret: Some("  ".to_string()),
            ..Config::default()
        };
        assert!(config.totp_secret().unwrap().is_none());

        let config = Config {
            totp_secret: Some("GEZDGNBVGY3TQOJQ".to_string()),
            ..Config::default()
        };
        assert!(config.totp_secret().unwrap().is_some());
    }

    #[test]
    fn test_set_values_preserves_comments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# keep me\napi_base_url = \"http://x\"\n").unwrap();

        set_values(&path, &[("totp_secret", "ABC")]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("# keep me"));
        assert!(text.contains("api_base_url = \"http://x\""));
        assert!(text.contains("totp_secret = \"ABC\""));
    }

    #[test]
    fn test_store_secrets_writes_once() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        let config = Config {
            private_key_path: dir.path().join("keys").join("privkey.pem"),
            ..Config::default()
        };

        store_secrets(&config, &config_path, &secrets(), false).unwrap();
        assert_eq!(
            load_private_key(&config.private_key_path).unwrap(),
            "cHJpdmF0ZQ=="
        );

        let stored = Config::load_from(&config_path).unwrap();
        assert_eq!(
            stored.totp_secret.as_deref(),
            Some("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ")
        );
        assert_eq!(stored.rsa_public_key.as_deref(), Some("cHVibGlj"));

        // A second provisioning must be forced
        let reloaded = Config {
            private_key_path: config.private_key_path.clone(),
            ..stored
        };
        assert!(store_secrets(&reloaded, &config_path, &secrets(), false).is_err());
        assert!(store_secrets(&reloaded, &config_path, &secrets(), true).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_private_key_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let key_path = dir.path().join("privkey.pem");
        write_private_key(&key_path, "secret").unwrap();

        let mode = std::fs::metadata(&key_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
