//! Configuration file management.
//!
//! Reads and validates `~/.config/blueprint/config.toml`. The loaded
//! [`Config`] is passed by reference to whatever needs it; nothing here is
//! process-global.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result, StoreError};

/// User configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub gpg: GpgConfig,
    #[serde(default)]
    pub tools: Tools,
    #[serde(default)]
    pub process: ProcessConfig,
    #[serde(default)]
    pub paths: Paths,
    /// User profiles keyed by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, Profile>,
    /// Profile whose `gpg_key` is the last-resort recipient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user_profile: Option<String>,
}

/// `[gpg]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GpgConfig {
    /// Default encryption recipient (fingerprint, key id or email).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// `[tools]` section: executable names or paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tools {
    pub gpg: String,
    pub vault_password: String,
    pub ansible_vault: String,
    pub transcoder: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            gpg: constants::DEFAULT_GPG.to_string(),
            vault_password: constants::DEFAULT_VAULT_PASSWORD.to_string(),
            ansible_vault: constants::DEFAULT_ANSIBLE_VAULT.to_string(),
            transcoder: constants::DEFAULT_TRANSCODER.to_string(),
        }
    }
}

/// `[process]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessConfig {
    /// Seconds before an external tool is killed. `0` disables the limit.
    pub timeout_secs: u64,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `[paths]` section. Unset entries fall back to locations under HOME.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Paths {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_dir: Option<PathBuf>,
}

/// A user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub useremail: String,
    pub fullname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpg_key: Option<String>,
}

/// Where an encryption recipient came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientSource {
    /// `--recipient` or `BP_GPG_KEY`.
    Override,
    /// `[gpg] key`.
    Config,
    /// `gpg_key` of the default profile.
    Profile,
}

impl std::fmt::Display for RecipientSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipientSource::Override => write!(f, "override"),
            RecipientSource::Config => write!(f, "[gpg] key"),
            RecipientSource::Profile => write!(f, "default profile"),
        }
    }
}

impl Config {
    /// Default config location (`~/.config/blueprint/config.toml`).
    pub fn default_path() -> Result<PathBuf> {
        let home = home_dir()?;
        Ok(home
            .join(".config")
            .join(constants::APP_DIR)
            .join(constants::CONFIG_FILE))
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` or `ConfigError::Parse` if the file exists
    /// but cannot be read or parsed, and `ConfigError::InvalidValue` if it
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(path, &contents)?;

        debug!(profiles = config.profiles.len(), "config loaded");
        Ok(config)
    }

    /// Parse and validate configuration text. `path` is used for messages.
    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration contents.
    ///
    /// Checks:
    /// - `default_user_profile` names an existing profile
    /// - Profile emails look like `local@domain`
    /// - No tool is configured as an empty string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on the first failed check.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.default_user_profile {
            if !self.profiles.contains_key(name) {
                return Err(invalid(
                    "default_user_profile",
                    format!("no profile named '{}'", name),
                ));
            }
        }

        for (name, profile) in &self.profiles {
            if !looks_like_email(&profile.useremail) {
                return Err(invalid(
                    format!("profiles.{}.useremail", name),
                    format!("not an email address: {}", profile.useremail),
                ));
            }
        }

        let tools = [
            ("tools.gpg", &self.tools.gpg),
            ("tools.vault_password", &self.tools.vault_password),
            ("tools.ansible_vault", &self.tools.ansible_vault),
            ("tools.transcoder", &self.tools.transcoder),
        ];
        for (field, value) in tools {
            if value.trim().is_empty() {
                return Err(invalid(field, "cannot be empty".to_string()));
            }
        }

        Ok(())
    }

    /// Process timeout, or `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        match self.process.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// The default user profile, if one is configured.
    pub fn default_profile(&self) -> Option<&Profile> {
        self.default_user_profile
            .as_ref()
            .and_then(|name| self.profiles.get(name))
    }

    /// Directory of the GPG at-rest store.
    pub fn store_dir(&self, home: &Path) -> PathBuf {
        self.paths
            .store_dir
            .clone()
            .unwrap_or_else(|| home.join(constants::STORE_DIR))
    }

    /// Directory of the legacy ansible-vault secrets.
    pub fn reveal_dir(&self, home: &Path) -> PathBuf {
        self.paths
            .reveal_dir
            .clone()
            .unwrap_or_else(|| home.join(constants::REVEAL_DIR))
    }

    /// Resolve the GPG recipient for encryption.
    ///
    /// Precedence: `explicit` (argument or `BP_GPG_KEY`), then `[gpg] key`,
    /// then the default profile's `gpg_key`. Blank values count as absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::KeyNotConfigured` if none is set.
    pub fn recipient(&self, explicit: Option<&str>) -> Result<(String, RecipientSource)> {
        let candidates = [
            (explicit, RecipientSource::Override),
            (self.gpg.key.as_deref(), RecipientSource::Config),
            (
                self.default_profile().and_then(|p| p.gpg_key.as_deref()),
                RecipientSource::Profile,
            ),
        ];

        candidates
            .into_iter()
            .find_map(|(key, source)| {
                key.map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(|k| (k.to_string(), source))
            })
            .ok_or_else(|| StoreError::KeyNotConfigured.into())
    }
}

/// The current user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| ConfigError::NoHomeDir.into())
}

fn invalid(field: impl Into<String>, reason: String) -> crate::error::Error {
    ConfigError::InvalidValue {
        field: field.into(),
        reason,
    }
    .into()
}

fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !s.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
