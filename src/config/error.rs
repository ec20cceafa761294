//! Error types for configuration resolution.

use std::path::PathBuf;

use thiserror::Error;

use super::Provider;

/// Error type for configuration operations.
///
/// Raised before any request is built; a failed resolution never yields a
/// partially-populated config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required settings are absent or empty.
    #[error(
        "Missing required environment variable{} for {provider}: {}",
        plural_suffix(.variables),
        join_names(.variables)
    )]
    MissingVariables {
        /// Provider whose settings were being resolved
        provider: Provider,
        /// Every missing variable, in declaration order
        variables: Vec<&'static str>,
    },

    /// A setting that must be a URL is not a usable one.
    #[error("Invalid URL in {variable} '{value}': {reason}")]
    InvalidUrl {
        /// Name of the setting
        variable: &'static str,
        /// The rejected value
        value: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A credential contains characters that cannot appear in an HTTP header.
    #[error("{variable} contains characters not allowed in an HTTP header")]
    InvalidHeaderValue {
        /// Name of the setting
        variable: &'static str,
    },

    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

fn plural_suffix(names: &[&str]) -> &'static str {
    if names.len() == 1 { "" } else { "s" }
}

fn join_names(names: &[&str]) -> String {
    names.join(", ")
}

impl ConfigError {
    /// Returns the missing variable names, if this is a missing-settings error.
    #[must_use]
    pub fn missing_variables(&self) -> &[&'static str] {
        match self {
            Self::MissingVariables { variables, .. } => variables,
            _ => &[],
        }
    }
}
