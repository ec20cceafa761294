//! TOML configuration file parsing.
//!
//! The file mirrors the environment variables section by section, so it
//! can stand in for (or sit beneath) the process environment.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;
use super::defaults::var;
use super::env::EnvSource;

/// Root configuration structure from TOML file.
///
/// All fields are optional; presence is enforced at resolution time.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Content-delivery settings
    #[serde(default)]
    pub content: ContentSection,

    /// Email settings
    #[serde(default)]
    pub email: EmailSection,

    /// Payment settings
    #[serde(default)]
    pub payment: PaymentSection,

    /// Data-store settings
    #[serde(default)]
    pub store: StoreSection,
}

/// `[content]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentSection {
    /// `CONTENTFUL_SPACE_ID`
    pub space_id: Option<String>,
    /// `CONTENTFUL_ACCESS_TOKEN`
    pub access_token: Option<String>,
    /// `CONTENTFUL_ENVIRONMENT`
    pub environment: Option<String>,
}

/// `[email]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmailSection {
    /// `RESEND_API_KEY`
    pub api_key: Option<String>,
    /// `RESEND_FROM_EMAIL`
    pub from_email: Option<String>,
}

/// `[payment]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentSection {
    /// `STRIPE_SECRET_KEY`
    pub secret_key: Option<String>,
    /// `PUBLIC_STRIPE_PUBLISHABLE_KEY`
    pub publishable_key: Option<String>,
    /// `STRIPE_WEBHOOK_SECRET`
    pub webhook_secret: Option<String>,
}

/// `[store]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// `SUPABASE_URL`
    pub url: Option<String>,
    /// `SUPABASE_ANON_KEY`
    pub anon_key: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

impl EnvSource for TomlConfig {
    fn var(&self, name: &str) -> Option<String> {
        let value = match name {
            var::CONTENTFUL_SPACE_ID => &self.content.space_id,
            var::CONTENTFUL_ACCESS_TOKEN => &self.content.access_token,
            var::CONTENTFUL_ENVIRONMENT => &self.content.environment,
            var::RESEND_API_KEY => &self.email.api_key,
            var::RESEND_FROM_EMAIL => &self.email.from_email,
            var::STRIPE_SECRET_KEY => &self.payment.secret_key,
            var::STRIPE_PUBLISHABLE_KEY => &self.payment.publishable_key,
            var::STRIPE_WEBHOOK_SECRET => &self.payment.webhook_secret,
            var::SUPABASE_URL => &self.store.url,
            var::SUPABASE_ANON_KEY => &self.store.anon_key,
            _ => return None,
        };
        value.clone()
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# beatstore configuration file
#
# Every key mirrors an environment variable. Environment variables take
# precedence over values in this file.

[content]
# CONTENTFUL_SPACE_ID (required for content commands)
# space_id = "your-space-id"

# CONTENTFUL_ACCESS_TOKEN (required for content commands)
# access_token = "your-delivery-token"

# CONTENTFUL_ENVIRONMENT (default: "master")
# environment = "master"

[email]
# RESEND_API_KEY (required for email commands)
# api_key = "re_..."

# RESEND_FROM_EMAIL (default: "audio@russabuss.com")
# from_email = "audio@russabuss.com"

[payment]
# STRIPE_SECRET_KEY (required for payment commands)
# secret_key = "sk_test_..."

# PUBLIC_STRIPE_PUBLISHABLE_KEY (required for payment commands)
# publishable_key = "pk_test_..."

# STRIPE_WEBHOOK_SECRET (required for payment commands)
# webhook_secret = "whsec_..."

[store]
# SUPABASE_URL (required for store commands)
# url = "https://your-project.supabase.co"

# SUPABASE_ANON_KEY (required for store commands)
# anon_key = "eyJ..."
"#
    .to_string()
}
