//! Constants used throughout bpkit.
//!
//! Centralizes magic strings and default configuration values.

/// Application directory name under `~/.config`.
pub const APP_DIR: &str = "blueprint";

/// Configuration file name inside the application directory.
pub const CONFIG_FILE: &str = "config.toml";

/// GPG at-rest store relative to HOME (~/.config/blueprint/secrets).
pub const STORE_DIR: &str = ".config/blueprint/secrets";

/// Legacy ansible-vault secrets relative to HOME (~/.blueprint/secrets).
pub const REVEAL_DIR: &str = ".blueprint/secrets";

/// Extension of armored ciphertext files.
pub const ARMOR_EXT: &str = "asc";

/// Secret file stem used when no name is given.
pub const DEFAULT_SECRET: &str = "secrets";

/// Vault password reference used when no name is given.
pub const DEFAULT_VAULT_REF: &str = "vault";

/// Environment variable overriding the default GPG recipient.
pub const GPG_KEY_ENV: &str = "BP_GPG_KEY";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "BP_CONFIG";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "BP_LOG";

/// Default executables.
pub const DEFAULT_GPG: &str = "gpg";
pub const DEFAULT_VAULT_PASSWORD: &str = "vaultpy";
pub const DEFAULT_ANSIBLE_VAULT: &str = "ansible-vault";
pub const DEFAULT_TRANSCODER: &str = "yj";

/// Default timeout for a single external process, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default generated password length.
pub const DEFAULT_PASSWORD_LENGTH: usize = 32;
