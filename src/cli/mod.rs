//! Command-line interface.

pub mod completions;
pub mod config;
pub mod output;
pub mod vault;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::{home_dir, Config};
use crate::core::constants;
use crate::core::password::PasswordPolicy;
use crate::error::Result;

/// Blueprint kit: a personal secrets vault.
#[derive(Parser)]
#[command(
    name = "bp",
    about = "Personal secrets vault over GnuPG and ansible-vault",
    version
)]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ~/.config/blueprint/config.toml)
    #[arg(long, global = true, env = constants::CONFIG_ENV, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Vault operations for secret management
    Vault {
        #[command(subcommand)]
        action: VaultAction,
    },

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Vault subcommands.
#[derive(Subcommand)]
pub enum VaultAction {
    /// Generate cryptographic artifacts
    Gen {
        #[command(subcommand)]
        what: GenAction,
    },

    /// Encrypt stdin with GPG into the secrets directory
    Encrypt {
        /// Secret name (saved as <name>.asc)
        name: String,
        /// GPG recipient key (default: [gpg] key from config)
        #[arg(short, long, env = constants::GPG_KEY_ENV)]
        recipient: Option<String>,
    },

    /// Decrypt a stored secret to stdout
    Decrypt {
        /// Secret name, with or without .asc
        name: String,
    },

    /// List stored secrets
    List,

    /// Reveal an ansible-vault secret set as JSON
    Secrets {
        /// Secret set name (default: the unnamed set)
        name: Option<String>,
        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },
}

/// `vault gen` subcommands.
#[derive(Subcommand)]
pub enum GenAction {
    /// Generate a cryptographically secure random password
    Pass {
        /// Length of the password
        #[arg(short, long, default_value_t = constants::DEFAULT_PASSWORD_LENGTH)]
        length: usize,
        /// Exclude letters from password
        #[arg(long)]
        no_letters: bool,
        /// Exclude digits from password
        #[arg(long)]
        no_digits: bool,
        /// Exclude symbols from password
        #[arg(long)]
        no_symbols: bool,
    },
}

/// `config` subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Validate the config and show resolved settings
    Check,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Settings shared by command handlers.
pub struct Context {
    config_path: Option<PathBuf>,
}

impl Context {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    /// Path of the config file in effect.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Config::default_path(),
        }
    }

    /// Load and validate the configuration.
    pub fn config(&self) -> Result<Config> {
        Config::load(&self.config_path()?)
    }

    pub fn home(&self) -> Result<PathBuf> {
        home_dir()
    }
}

/// Execute a command.
///
/// # Errors
///
/// Returns error if the command execution fails.
pub fn execute(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Vault { action } => match action {
            VaultAction::Gen {
                what:
                    GenAction::Pass {
                        length,
                        no_letters,
                        no_digits,
                        no_symbols,
                    },
            } => vault::gen_pass(&PasswordPolicy {
                length,
                letters: !no_letters,
                digits: !no_digits,
                symbols: !no_symbols,
            }),
            VaultAction::Encrypt { name, recipient } => {
                vault::encrypt(ctx, &name, recipient.as_deref())
            }
            VaultAction::Decrypt { name } => vault::decrypt(ctx, &name),
            VaultAction::List => vault::list(ctx),
            VaultAction::Secrets { name, compact } => {
                vault::secrets(ctx, name.as_deref().unwrap_or_default(), compact)
            }
        },
        Command::Config { action } => match action {
            ConfigAction::Check => config::check(ctx),
        },
        Command::Completions { shell } => completions::execute(shell),
    }
}
