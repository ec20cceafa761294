//! Configuration layer.
//!
//! This module provides:
//! - Setting sources ([`EnvSource`], [`ProcessEnv`], [`Layered`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated per-provider configs ([`ContentConfig`], [`EmailConfig`],
//!   [`PaymentConfig`], [`DataStoreConfig`])
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values and variable names ([`defaults`])
//!
//! # Priority
//!
//! Settings are resolved with the following priority (highest to lowest):
//!
//! 1. **Process environment** - non-empty variables win
//! 2. **TOML config file** - the section key mirroring the variable
//! 3. **Built-in defaults** - only for optional settings
//!
//! # Fail-fast resolution
//!
//! A config is resolved once, by the caller's composition root, and then
//! passed to its client. Resolution collects every missing required
//! variable for that provider and fails with a single
//! [`ConfigError::MissingVariables`]; no client is built and no request is
//! sent.

mod cli;
pub mod defaults;
mod env;
mod error;
mod provider;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;

pub use cli::{Cli, Command};
pub use env::{EnvSource, Layered, ProcessEnv};
pub use error::ConfigError;
pub use provider::Provider;
pub use self::toml::{TomlConfig, default_config_template};
pub use validated::{
    ContentConfig, DataStoreConfig, EmailConfig, PaymentConfig, write_default_config,
};
