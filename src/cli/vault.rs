//! Vault commands.
//!
//! Implements password generation, GPG encrypt/decrypt/list, and the
//! ansible-vault secrets reveal.

use std::io::{self, Read, Write};

use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::{output, Context};
use crate::core::config::Config;
use crate::core::password::{self, PasswordPolicy};
use crate::core::pipeline::SecretPipeline;
use crate::core::process::System;
use crate::core::store::GpgStore;
use crate::core::validation::validate_name;
use crate::error::Result;

/// Generate a password and print it.
pub fn gen_pass(policy: &PasswordPolicy) -> Result<()> {
    let password = password::generate(policy)?;
    println!("{}", password.as_str());
    Ok(())
}

/// Encrypt stdin into the store.
pub fn encrypt(ctx: &Context, name: &str, recipient: Option<&str>) -> Result<()> {
    let config = ctx.config()?;
    let (recipient, source) = config.recipient(recipient)?;
    debug!(%source, "recipient resolved");

    let mut plaintext = Zeroizing::new(Vec::new());
    io::stdin().read_to_end(&mut plaintext)?;

    let path = store(ctx, &config)?.encrypt(name, &recipient, &plaintext)?;
    output::success(&format!(
        "Encrypted and saved to {}",
        output::path(path.display())
    ));
    Ok(())
}

/// Decrypt a stored secret to stdout.
pub fn decrypt(ctx: &Context, name: &str) -> Result<()> {
    let config = ctx.config()?;
    let plaintext = store(ctx, &config)?.decrypt(name)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&plaintext)?;
    stdout.flush()?;
    Ok(())
}

/// List stored secret names, one per line.
pub fn list(ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    let names = store(ctx, &config)?.list()?;

    if names.is_empty() {
        output::dimmed("no secrets stored");
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

/// Reveal an ansible-vault secret set as JSON.
pub fn secrets(ctx: &Context, name: &str, compact: bool) -> Result<()> {
    if !name.is_empty() {
        validate_name(name)?;
    }

    let config = ctx.config()?;
    let pipeline = SecretPipeline::new(
        System::new(config.timeout()),
        config.reveal_dir(&ctx.home()?),
        config.tools.clone(),
    );
    let secret = pipeline.reveal(name)?;

    if compact {
        println!("{}", secret);
    } else {
        println!("{:#}", secret);
    }
    Ok(())
}

fn store(ctx: &Context, config: &Config) -> Result<GpgStore<System>> {
    Ok(GpgStore::new(
        System::new(config.timeout()),
        config.store_dir(&ctx.home()?),
        config.tools.gpg.clone(),
    ))
}
