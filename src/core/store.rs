//! GPG encryption at rest.
//!
//! Secrets live as ASCII-armored files in `~/.config/blueprint/secrets/`.
//! Plaintext only ever moves through memory: it is piped into gpg on
//! stdin and read back from gpg's stdout.
//!
//! ## Requirements
//!
//! - `gpg` must be installed (or `[tools] gpg` pointed at a compatible binary)
//! - The recipient's public key must be in the keyring for encryption
//! - The matching private key must be available for decryption

use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::constants;
use crate::core::paths;
use crate::core::process::Runner;
use crate::core::validation::validate_name;
use crate::error::{Result, StoreError};

/// Directory of GPG-armored secrets.
pub struct GpgStore<R> {
    runner: R,
    dir: PathBuf,
    gpg: String,
}

impl<R: Runner> GpgStore<R> {
    /// A store in `dir` that encrypts with the executable `gpg`.
    pub fn new(runner: R, dir: impl Into<PathBuf>, gpg: impl Into<String>) -> Self {
        Self {
            runner,
            dir: dir.into(),
            gpg: gpg.into(),
        }
    }

    /// Store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the armored file for `name`. A trailing `.asc` is ignored.
    pub fn path_for(&self, name: &str) -> PathBuf {
        paths::armored_path(&self.dir, paths::normalize_name(name))
    }

    /// Encrypt `plaintext` for `recipient` and write it to `<dir>/<name>.asc`.
    ///
    /// Creates the store directory if needed. Returns the written path.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::KeyNotConfigured` for a blank recipient,
    /// `StoreError::InvalidName` for an unusable name, and `ProcessError` if
    /// gpg is missing or fails.
    pub fn encrypt(&self, name: &str, recipient: &str, plaintext: &[u8]) -> Result<PathBuf> {
        let name = paths::normalize_name(name);
        validate_name(name)?;
        if recipient.trim().is_empty() {
            return Err(StoreError::KeyNotConfigured.into());
        }

        fs::create_dir_all(&self.dir).map_err(|source| StoreError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let gpg = self.runner.resolve(&self.gpg)?;
        debug!(name, recipient, "encrypting");
        trace!(plaintext_len = plaintext.len(), "encrypting with gpg");

        let args = [
            OsStr::new("-e"),
            OsStr::new("-r"),
            OsStr::new(recipient),
            OsStr::new("--armor"),
        ];
        let output = self.runner.run(&gpg, &args, Some(plaintext))?.check(&gpg)?;

        let path = paths::armored_path(&self.dir, name);
        write_private(&path, &output.stdout).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), ciphertext_len = output.stdout.len(), "encrypted");
        Ok(path)
    }

    /// Decrypt `<dir>/<name>.asc` and return the plaintext.
    ///
    /// `name` may carry the `.asc` extension. Nothing is written to disk.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::FileNotFound` if there is no such secret and
    /// `ProcessError` if gpg is missing or fails.
    pub fn decrypt(&self, name: &str) -> Result<Zeroizing<Vec<u8>>> {
        let name = paths::normalize_name(name);
        validate_name(name)?;

        let path = paths::armored_path(&self.dir, name);
        if !path.exists() {
            return Err(StoreError::FileNotFound(path).into());
        }

        let ciphertext = fs::read(&path)?;
        let gpg = self.runner.resolve(&self.gpg)?;
        debug!(path = %path.display(), "decrypting");

        let args = [OsStr::new("--quiet"), OsStr::new("-d")];
        let output = self
            .runner
            .run(&gpg, &args, Some(&ciphertext))?
            .check(&gpg)?;

        trace!(plaintext_len = output.stdout.len(), "decrypted with gpg");
        Ok(output.stdout)
    }

    /// Names of stored secrets, sorted, without the `.asc` extension.
    ///
    /// Every listed name decrypts to its file: a stem that itself ends in
    /// `.asc` is listed with the extension kept. A missing store directory
    /// holds no secrets.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension() != Some(OsStr::new(constants::ARMOR_EXT)) {
                continue;
            }
            let (Some(stem), Some(file)) = (path.file_stem(), path.file_name()) else {
                continue;
            };
            let stem = stem.to_string_lossy();
            if paths::normalize_name(&stem) == stem {
                names.push(stem.into_owned());
            } else {
                names.push(file.to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Write `contents` to `path`, readable only by the owner on Unix.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}
