//! Input validation for bpkit operations.

use crate::error::{Result, StoreError};

/// Validate a secret name used as a file stem.
///
/// Names must be non-empty single path components:
/// - No `/` or `\`
/// - Not `.` or `..`
/// - No NUL bytes
///
/// # Errors
///
/// Returns `StoreError::InvalidName` if the name is rejected.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name cannot be empty"
    } else if name.contains('/') || name.contains('\\') {
        "name cannot contain path separators"
    } else if name == "." || name == ".." {
        "name cannot be a relative directory"
    } else if name.contains('\0') {
        "name cannot contain NUL"
    } else {
        return Ok(());
    };

    Err(StoreError::InvalidName {
        name: name.to_string(),
        reason,
    }
    .into())
}
