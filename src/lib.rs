//! bpkit - Blueprint kit, a personal secrets vault.
//!
//! A thin layer over trusted external tools: GnuPG for encryption at rest,
//! and a legacy ansible-vault pipeline for YAML secrets.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── vault         # gen pass, encrypt, decrypt, list, secrets
//! │   ├── config        # config check
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # config.toml loading and validation
//!     ├── paths         # Secret file locations, name normalization
//!     ├── process       # Runner trait, system runner with timeouts
//!     ├── pipeline      # vault password -> ansible-vault -> yj -> JSON
//!     ├── store         # GPG encrypt/decrypt at rest
//!     ├── password      # CSPRNG password generation
//!     └── validation    # Secret name validation
//! ```
//!
//! # Example
//!
//! ```no_run
//! use bpkit::core::config::{home_dir, Config};
//! use bpkit::core::pipeline::SecretPipeline;
//! use bpkit::core::process::System;
//!
//! # fn main() -> bpkit::error::Result<()> {
//! let config = Config::load(&Config::default_path()?)?;
//! let runner = System::new(config.timeout());
//! let pipeline = SecretPipeline::new(runner, config.reveal_dir(&home_dir()?), config.tools.clone());
//! let secret = pipeline.reveal("db")?;
//! println!("{}", secret);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
