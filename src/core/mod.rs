//! Core library components.
//!
//! Reusable logic for path resolution, external process execution, the
//! ansible-vault reveal flow, GPG encryption at rest, and password
//! generation. Nothing here prints or exits.

pub mod config;
pub mod constants;
pub mod password;
pub mod paths;
pub mod pipeline;
pub mod process;
pub mod store;
pub mod validation;
