//! On-disk locations of secrets.
//!
//! Pure path construction. Nothing here touches the filesystem.

use std::path::{Path, PathBuf};

use crate::core::constants;

/// Locations used by one run of the reveal flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretPaths {
    /// `<dir>/{name or "secrets"}.yaml`
    pub secret_file: PathBuf,
    /// Logical vault password name, without extension.
    pub vault_ref: String,
    /// `<dir>/<vault_ref>.asc`
    pub vault_file: PathBuf,
}

impl SecretPaths {
    /// Resolve the secret and vault files for an optional name.
    ///
    /// An empty name selects the default unnamed secret set.
    pub fn resolve(dir: &Path, name: &str) -> Self {
        let (stem, vault_ref) = if name.is_empty() {
            (
                constants::DEFAULT_SECRET.to_string(),
                constants::DEFAULT_VAULT_REF.to_string(),
            )
        } else {
            (name.to_string(), format!("{}.vault", name))
        };

        Self {
            secret_file: dir.join(format!("{}.yaml", stem)),
            vault_file: dir.join(format!("{}.{}", vault_ref, constants::ARMOR_EXT)),
            vault_ref,
        }
    }
}

/// Normalize a secret identifier by dropping one trailing `.asc`.
///
/// Only the exact suffix is removed, once:
///
/// - `"foo"` and `"foo.asc"` both become `"foo"`
/// - `"foo.asc.asc"` becomes `"foo.asc"`
/// - `".asc"` and `""` become `""`
/// - `"basic"` is left alone
pub fn normalize_name(name: &str) -> &str {
    name.strip_suffix(".asc").unwrap_or(name)
}

/// Path of the armored file for an already normalized `name` inside `dir`.
pub fn armored_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, constants::ARMOR_EXT))
}
