//! Error types for bpkit.
//!
//! Every failure is terminal for the current invocation. Errors are grouped
//! by concern and each kind maps to its own exit code, so the binary (or any
//! embedding caller) can tell them apart without string matching.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Reveal(#[from] RevealError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to determine home directory")]
    NoHomeDir,

    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// External process errors.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("executable not found: {name}")]
    ExecutableNotFound {
        name: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed ({}): {}", describe_code(.code), .stderr.trim())]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{program} timed out after {}s", .timeout.as_secs())]
    Timeout { program: String, timeout: Duration },

    #[error("i/o with {program} failed: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the ansible-vault reveal flow.
#[derive(Error, Debug)]
pub enum RevealError {
    #[error("vault file not found: {}", .0.display())]
    VaultFileNotFound(PathBuf),

    #[error("secret file not found: {}", .0.display())]
    SecretFileNotFound(PathBuf),

    #[error("error getting vault password: {}", .stderr.trim())]
    VaultPassword { stderr: String },

    #[error("error from ansible-vault: {}", .stderr.trim())]
    VaultDecrypt { stderr: String },

    #[error("error from transcoder: {}", .stderr.trim())]
    Transcode { stderr: String },

    #[error("secret is not valid JSON: {0}")]
    InvalidSecretFormat(#[source] serde_json::Error),
}

/// Errors from the GPG at-rest store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("GPG key not configured")]
    KeyNotConfigured,

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("invalid secret name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("failed to create {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Password generation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password length must be at least 1")]
    InvalidLength,

    #[error("at least one character set must be selected")]
    EmptyCharacterPool,
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl Error {
    /// Process exit code for this error kind.
    ///
    /// Codes are stable and unique per kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io(_) => 1,
            Error::Config(e) => match e {
                ConfigError::NoHomeDir => 10,
                ConfigError::Read { .. } => 11,
                ConfigError::Parse { .. } => 12,
                ConfigError::InvalidValue { .. } => 13,
            },
            Error::Process(e) => match e {
                ProcessError::ExecutableNotFound { .. } => 20,
                ProcessError::Spawn { .. } => 21,
                ProcessError::Failed { .. } => 22,
                ProcessError::Timeout { .. } => 23,
                ProcessError::Io { .. } => 24,
            },
            Error::Reveal(e) => match e {
                RevealError::VaultFileNotFound(_) => 30,
                RevealError::SecretFileNotFound(_) => 31,
                RevealError::VaultPassword { .. } => 32,
                RevealError::VaultDecrypt { .. } => 33,
                RevealError::Transcode { .. } => 34,
                RevealError::InvalidSecretFormat(_) => 35,
            },
            Error::Store(e) => match e {
                StoreError::KeyNotConfigured => 40,
                StoreError::FileNotFound(_) => 41,
                StoreError::InvalidName { .. } => 42,
                StoreError::CreateDir { .. } => 43,
                StoreError::Write { .. } => 44,
            },
            Error::Password(e) => match e {
                PasswordError::InvalidLength => 50,
                PasswordError::EmptyCharacterPool => 51,
            },
        }
    }

    /// A short follow-up suggestion for the user, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::Store(StoreError::KeyNotConfigured) => {
                Some("pass --recipient, set BP_GPG_KEY, or add [gpg] key to the config")
            }
            Error::Process(ProcessError::ExecutableNotFound { .. }) => {
                Some("install the tool or point [tools] in the config at it")
            }
            Error::Process(ProcessError::Timeout { .. }) => {
                Some("raise [process] timeout_secs in the config")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
