//! Legacy ansible-vault reveal flow.
//!
//! ```text
//! resolve -> validate -> fetch password -> decrypt -> transcode -> parse
//! ```
//!
//! Stages run strictly in order, one child process at a time, each feeding
//! its captured stdout to the next. A failing stage aborts the run before
//! the next one starts. Intermediate data stays in memory.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::config::Tools;
use crate::core::paths::SecretPaths;
use crate::core::process::{ProcessOutput, Runner};
use crate::error::{Result, RevealError};

/// The revealed secret: a JSON tree.
pub type StructuredSecret = serde_json::Value;

/// Pipeline stage, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    Validate,
    FetchPassword,
    Decrypt,
    Transcode,
    Parse,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Resolve => "resolve",
            Stage::Validate => "validate",
            Stage::FetchPassword => "fetch-password",
            Stage::Decrypt => "decrypt",
            Stage::Transcode => "transcode",
            Stage::Parse => "parse",
        };
        f.write_str(s)
    }
}

/// Absolute paths of the three tools, resolved before anything runs.
struct Executables {
    vault_password: PathBuf,
    ansible_vault: PathBuf,
    transcoder: PathBuf,
}

/// Reveals YAML secrets encrypted with ansible-vault.
pub struct SecretPipeline<R> {
    runner: R,
    dir: PathBuf,
    tools: Tools,
}

impl<R: Runner> SecretPipeline<R> {
    /// A pipeline reading secrets from `dir` using `tools`.
    pub fn new(runner: R, dir: impl Into<PathBuf>, tools: Tools) -> Self {
        Self {
            runner,
            dir: dir.into(),
            tools,
        }
    }

    /// Reveal the secret set `name` (`""` for the default set).
    ///
    /// # Errors
    ///
    /// - `RevealError::VaultFileNotFound` / `SecretFileNotFound` before any
    ///   process is spawned
    /// - `ProcessError::ExecutableNotFound` if a tool is missing, also before
    ///   any spawn
    /// - `RevealError::VaultPassword`, `VaultDecrypt`, `Transcode` when the
    ///   corresponding tool exits non-zero
    /// - `RevealError::InvalidSecretFormat` if the result is not JSON
    pub fn reveal(&self, name: &str) -> Result<StructuredSecret> {
        debug!(stage = %Stage::Resolve, name, "reveal");
        let paths = SecretPaths::resolve(&self.dir, name);

        debug!(
            stage = %Stage::Validate,
            vault_file = %paths.vault_file.display(),
            secret_file = %paths.secret_file.display()
        );
        if !paths.vault_file.exists() {
            return Err(RevealError::VaultFileNotFound(paths.vault_file).into());
        }
        if !paths.secret_file.exists() {
            return Err(RevealError::SecretFileNotFound(paths.secret_file).into());
        }
        let exe = self.resolve_tools()?;

        let decrypted = {
            let credential = self.fetch_password(&exe.vault_password, &paths.vault_ref)?;
            self.decrypt(&exe.ansible_vault, &paths.secret_file, &credential)?
        };

        let json = self.transcode(&exe.transcoder, &decrypted)?;
        drop(decrypted);

        debug!(stage = %Stage::Parse, json_len = json.len());
        serde_json::from_slice(&json).map_err(|e| RevealError::InvalidSecretFormat(e).into())
    }

    fn resolve_tools(&self) -> Result<Executables> {
        Ok(Executables {
            vault_password: self.runner.resolve(&self.tools.vault_password)?,
            ansible_vault: self.runner.resolve(&self.tools.ansible_vault)?,
            transcoder: self.runner.resolve(&self.tools.transcoder)?,
        })
    }

    /// Run `<vault_password> -d <vault_ref>` and return its trimmed stdout.
    fn fetch_password(&self, exe: &Path, vault_ref: &str) -> Result<Zeroizing<Vec<u8>>> {
        debug!(stage = %Stage::FetchPassword, vault_ref);

        let output = self
            .runner
            .run(exe, &[OsStr::new("-d"), OsStr::new(vault_ref)], None)?;
        if !output.success() {
            return Err(RevealError::VaultPassword {
                stderr: output.stderr_text(),
            }
            .into());
        }

        Ok(trim_end(output))
    }

    /// Run `<ansible_vault> view <secret_file> --vault-password-file /dev/stdin`.
    fn decrypt(
        &self,
        exe: &Path,
        secret_file: &Path,
        credential: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        debug!(stage = %Stage::Decrypt);

        let args = [
            OsStr::new("view"),
            secret_file.as_os_str(),
            OsStr::new("--vault-password-file"),
            OsStr::new("/dev/stdin"),
        ];
        let output = self.runner.run(exe, &args, Some(credential))?;
        if !output.success() {
            return Err(RevealError::VaultDecrypt {
                stderr: output.stderr_text(),
            }
            .into());
        }

        trace!(payload_len = output.stdout.len(), "decrypted");
        Ok(output.stdout)
    }

    /// Pipe the decrypted YAML through the transcoder to get JSON text.
    fn transcode(&self, exe: &Path, yaml: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        debug!(stage = %Stage::Transcode);

        let output = self.runner.run(exe, &[], Some(yaml))?;
        if !output.success() {
            return Err(RevealError::Transcode {
                stderr: output.stderr_text(),
            }
            .into());
        }

        Ok(output.stdout)
    }
}

/// Stdout with trailing whitespace removed.
fn trim_end(output: ProcessOutput) -> Zeroizing<Vec<u8>> {
    let mut stdout = output.stdout;
    let end = stdout
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    stdout.truncate(end);
    stdout
}
