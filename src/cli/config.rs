//! Config command.

use crate::cli::{output, Context};
use crate::core::constants;
use crate::core::process::{Runner, System};
use crate::error::Result;

/// Validate the config and show what it resolves to.
pub fn check(ctx: &Context) -> Result<()> {
    let path = ctx.config_path()?;
    let config = ctx.config()?;
    let home = ctx.home()?;
    let runner = System::new(config.timeout());

    output::header("Configuration");
    let state = if path.exists() { "" } else { " (missing, using defaults)" };
    output::kv("file:       ", format!("{}{}", path.display(), state));
    output::kv("store:      ", config.store_dir(&home).display());
    output::kv("reveal:     ", config.reveal_dir(&home).display());
    output::kv(
        "timeout:    ",
        match config.timeout() {
            Some(t) => format!("{}s", t.as_secs()),
            None => "none".to_string(),
        },
    );

    let env_key = std::env::var(constants::GPG_KEY_ENV).ok();
    match config.recipient(env_key.as_deref()) {
        Ok((key, source)) => output::kv("recipient:  ", format!("{} ({})", key, source)),
        Err(e) => output::warn(&format!("recipient: {}", e)),
    }

    println!();
    output::header("Tools");
    let tools = [
        ("gpg:           ", &config.tools.gpg),
        ("vault_password:", &config.tools.vault_password),
        ("ansible_vault: ", &config.tools.ansible_vault),
        ("transcoder:    ", &config.tools.transcoder),
    ];
    for (label, tool) in tools {
        match runner.resolve(tool) {
            Ok(resolved) => output::kv(label, resolved.display()),
            Err(_) => output::warn(&format!("{} {} not found", label.trim(), tool)),
        }
    }

    Ok(())
}
