//! Validated per-provider configuration.
//!
//! Each config is resolved once by the composition root and handed to its
//! client. Resolution reads every required setting, collects all that are
//! missing, and fails atomically.

use std::fmt;
use std::path::Path;

use http::HeaderValue;
use url::Url;

use super::defaults::{self, var};
use super::env::EnvSource;
use super::error::ConfigError;
use super::Provider;

const REDACTED: &str = "<redacted>";

/// Pseudo-variable name reported when an overridden API origin is rejected.
const BASE_URL: &str = "base_url";

/// Collects settings for one provider and remembers which were missing.
struct Resolver<'a, E: ?Sized> {
    env: &'a E,
    provider: Provider,
    missing: Vec<&'static str>,
}

impl<'a, E: EnvSource + ?Sized> Resolver<'a, E> {
    const fn new(env: &'a E, provider: Provider) -> Self {
        Self {
            env,
            provider,
            missing: Vec::new(),
        }
    }

    fn required(&mut self, name: &'static str) -> String {
        self.env.non_empty(name).unwrap_or_else(|| {
            self.missing.push(name);
            String::new()
        })
    }

    fn optional(&self, name: &'static str, default: &str) -> String {
        self.env
            .non_empty(name)
            .unwrap_or_else(|| default.to_string())
    }

    fn finish(self) -> Result<(), ConfigError> {
        if self.missing.is_empty() {
            return Ok(());
        }
        Err(ConfigError::MissingVariables {
            provider: self.provider,
            variables: self.missing,
        })
    }
}

/// Builds a header value from a credential, marked sensitive so it is
/// never printed by `Debug` or HTTP-level logging.
fn sensitive_header(variable: &'static str, value: &str) -> Result<HeaderValue, ConfigError> {
    let mut header =
        HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidHeaderValue { variable })?;
    header.set_sensitive(true);
    Ok(header)
}

fn bearer(variable: &'static str, token: &str) -> Result<HeaderValue, ConfigError> {
    sensitive_header(variable, &format!("Bearer {token}"))
}

fn parse_base_url(variable: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        variable,
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    check_base_url(variable, url)
}

fn check_base_url(variable: &'static str, url: Url) -> Result<Url, ConfigError> {
    let reason = if !matches!(url.scheme(), "http" | "https") {
        format!("scheme must be http or https, got '{}'", url.scheme())
    } else if url.cannot_be_a_base() {
        "URL cannot be used as a base".to_string()
    } else {
        return Ok(url);
    };
    Err(ConfigError::InvalidUrl {
        variable,
        value: url.to_string(),
        reason,
    })
}

fn static_url(value: &str) -> Url {
    Url::parse(value).unwrap_or_else(|e| unreachable!("built-in URL '{value}' is invalid: {e}"))
}

/// Content-delivery settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ContentConfig {
    space_id: String,
    access_token: String,
    environment: String,
    base_url: Url,
}

impl ContentConfig {
    /// Resolves the content-delivery settings from `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVariables`] naming `CONTENTFUL_SPACE_ID`
    /// and/or `CONTENTFUL_ACCESS_TOKEN` when absent.
    pub fn resolve<E: EnvSource + ?Sized>(env: &E) -> Result<Self, ConfigError> {
        let mut r = Resolver::new(env, Provider::Contentful);
        let space_id = r.required(var::CONTENTFUL_SPACE_ID);
        let access_token = r.required(var::CONTENTFUL_ACCESS_TOKEN);
        let environment = r.optional(var::CONTENTFUL_ENVIRONMENT, defaults::CONTENTFUL_ENVIRONMENT);
        r.finish()?;

        Ok(Self {
            space_id,
            access_token,
            environment,
            base_url: static_url(defaults::CONTENTFUL_CDN_BASE),
        })
    }

    /// Points the client at another API origin (e.g. the preview API).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] unless `base_url` is an absolute
    /// http(s) URL.
    pub fn with_base_url(mut self, base_url: Url) -> Result<Self, ConfigError> {
        self.base_url = check_base_url(BASE_URL, base_url)?;
        Ok(self)
    }

    /// Space identifier.
    #[must_use]
    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    /// Environment segment.
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// API origin.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeaderValue`] if the token is not header-safe.
    pub fn authorization(&self) -> Result<HeaderValue, ConfigError> {
        bearer(var::CONTENTFUL_ACCESS_TOKEN, &self.access_token)
    }
}

impl fmt::Debug for ContentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentConfig")
            .field("space_id", &self.space_id)
            .field("access_token", &REDACTED)
            .field("environment", &self.environment)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// Transactional-email settings.
#[derive(Clone, PartialEq, Eq)]
pub struct EmailConfig {
    api_key: String,
    from_email: String,
    base_url: Url,
}

impl EmailConfig {
    /// Resolves the email settings from `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVariables`] naming `RESEND_API_KEY` when absent.
    pub fn resolve<E: EnvSource + ?Sized>(env: &E) -> Result<Self, ConfigError> {
        let mut r = Resolver::new(env, Provider::Resend);
        let api_key = r.required(var::RESEND_API_KEY);
        let from_email = r.optional(var::RESEND_FROM_EMAIL, defaults::FROM_EMAIL);
        r.finish()?;

        Ok(Self {
            api_key,
            from_email,
            base_url: static_url(defaults::RESEND_API_BASE),
        })
    }

    /// Points the client at another API origin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] unless `base_url` is an absolute
    /// http(s) URL.
    pub fn with_base_url(mut self, base_url: Url) -> Result<Self, ConfigError> {
        self.base_url = check_base_url(BASE_URL, base_url)?;
        Ok(self)
    }

    /// Sender used when a message does not override it.
    #[must_use]
    pub fn from_email(&self) -> &str {
        &self.from_email
    }

    /// API origin.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeaderValue`] if the key is not header-safe.
    pub fn authorization(&self) -> Result<HeaderValue, ConfigError> {
        bearer(var::RESEND_API_KEY, &self.api_key)
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_key", &REDACTED)
            .field("from_email", &self.from_email)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// Payment settings.
#[derive(Clone, PartialEq, Eq)]
pub struct PaymentConfig {
    secret_key: String,
    publishable_key: String,
    webhook_secret: String,
    base_url: Url,
}

impl PaymentConfig {
    /// Resolves the payment settings from `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVariables`] naming every absent secret.
    pub fn resolve<E: EnvSource + ?Sized>(env: &E) -> Result<Self, ConfigError> {
        let mut r = Resolver::new(env, Provider::Stripe);
        let secret_key = r.required(var::STRIPE_SECRET_KEY);
        let publishable_key = r.required(var::STRIPE_PUBLISHABLE_KEY);
        let webhook_secret = r.required(var::STRIPE_WEBHOOK_SECRET);
        r.finish()?;

        Ok(Self {
            secret_key,
            publishable_key,
            webhook_secret,
            base_url: static_url(defaults::STRIPE_API_BASE),
        })
    }

    /// Points the client at another API origin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] unless `base_url` is an absolute
    /// http(s) URL.
    pub fn with_base_url(mut self, base_url: Url) -> Result<Self, ConfigError> {
        self.base_url = check_base_url(BASE_URL, base_url)?;
        Ok(self)
    }

    /// Publishable key, safe to hand to browsers.
    #[must_use]
    pub fn publishable_key(&self) -> &str {
        &self.publishable_key
    }

    /// Webhook signing secret.
    #[must_use]
    pub(crate) fn webhook_secret(&self) -> &[u8] {
        self.webhook_secret.as_bytes()
    }

    /// API origin.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeaderValue`] if the key is not header-safe.
    pub fn authorization(&self) -> Result<HeaderValue, ConfigError> {
        bearer(var::STRIPE_SECRET_KEY, &self.secret_key)
    }
}

impl fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("secret_key", &REDACTED)
            .field("publishable_key", &self.publishable_key)
            .field("webhook_secret", &REDACTED)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// REST table-store settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DataStoreConfig {
    project_url: Url,
    anon_key: String,
}

impl DataStoreConfig {
    /// Resolves the data-store settings from `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVariables`] naming `SUPABASE_URL` and/or
    /// `SUPABASE_ANON_KEY` when absent, or [`ConfigError::InvalidUrl`] when
    /// the project URL is not an absolute http(s) URL.
    pub fn resolve<E: EnvSource + ?Sized>(env: &E) -> Result<Self, ConfigError> {
        let mut r = Resolver::new(env, Provider::Supabase);
        let project_url = r.required(var::SUPABASE_URL);
        let anon_key = r.required(var::SUPABASE_ANON_KEY);
        r.finish()?;

        Ok(Self {
            project_url: parse_base_url(var::SUPABASE_URL, &project_url)?,
            anon_key,
        })
    }

    /// Project URL.
    #[must_use]
    pub const fn project_url(&self) -> &Url {
        &self.project_url
    }

    /// `apikey` header value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeaderValue`] if the key is not header-safe.
    pub fn api_key_header(&self) -> Result<HeaderValue, ConfigError> {
        sensitive_header(var::SUPABASE_ANON_KEY, &self.anon_key)
    }

    /// `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeaderValue`] if the key is not header-safe.
    pub fn authorization(&self) -> Result<HeaderValue, ConfigError> {
        bearer(var::SUPABASE_ANON_KEY, &self.anon_key)
    }
}

impl fmt::Debug for DataStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataStoreConfig")
            .field("project_url", &self.project_url.as_str())
            .field("anon_key", &REDACTED)
            .finish()
    }
}

/// Writes the commented configuration template to `path`.
///
/// # Errors
///
/// Returns [`ConfigError::FileWrite`] if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
