//! Random password generation.
//!
//! Every character is drawn independently and uniformly from the selected
//! character classes using the operating system's CSPRNG (`OsRng`). Do not
//! swap in a seeded or thread-local generator here.

use rand::rngs::OsRng;
use rand::Rng;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::error::{PasswordError, Result};

/// Which character classes a generated password may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub length: usize,
    /// ASCII letters, upper and lower case.
    pub letters: bool,
    /// ASCII digits.
    pub digits: bool,
    /// ASCII punctuation.
    pub symbols: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: constants::DEFAULT_PASSWORD_LENGTH,
            letters: true,
            digits: true,
            symbols: true,
        }
    }
}

impl PasswordPolicy {
    /// The union of the selected classes, in ASCII order.
    pub fn pool(&self) -> Vec<u8> {
        (b'!'..=b'~')
            .filter(|c| {
                (self.letters && c.is_ascii_alphabetic())
                    || (self.digits && c.is_ascii_digit())
                    || (self.symbols && c.is_ascii_punctuation())
            })
            .collect()
    }
}

/// Generate a password according to `policy`.
///
/// # Errors
///
/// Returns `PasswordError::InvalidLength` for a zero length and
/// `PasswordError::EmptyCharacterPool` when every class is disabled.
pub fn generate(policy: &PasswordPolicy) -> Result<Zeroizing<String>> {
    if policy.length < 1 {
        return Err(PasswordError::InvalidLength.into());
    }

    let pool = policy.pool();
    if pool.is_empty() {
        return Err(PasswordError::EmptyCharacterPool.into());
    }

    let mut rng = OsRng;
    let mut password = Zeroizing::new(String::with_capacity(policy.length));
    for _ in 0..policy.length {
        password.push(char::from(pool[rng.gen_range(0..pool.len())]));
    }

    Ok(password)
}
