//! Default values and well-known names for configuration.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

/// Names of the settings read from the environment (or the config file).
pub mod var {
    /// Content-delivery space identifier (required).
    pub const CONTENTFUL_SPACE_ID: &str = "CONTENTFUL_SPACE_ID";
    /// Content-delivery access token (required).
    pub const CONTENTFUL_ACCESS_TOKEN: &str = "CONTENTFUL_ACCESS_TOKEN";
    /// Content-delivery environment segment (optional).
    pub const CONTENTFUL_ENVIRONMENT: &str = "CONTENTFUL_ENVIRONMENT";

    /// Email API key (required).
    pub const RESEND_API_KEY: &str = "RESEND_API_KEY";
    /// Default sender address (optional).
    pub const RESEND_FROM_EMAIL: &str = "RESEND_FROM_EMAIL";

    /// Payment secret key (required).
    pub const STRIPE_SECRET_KEY: &str = "STRIPE_SECRET_KEY";
    /// Payment publishable key (required).
    pub const STRIPE_PUBLISHABLE_KEY: &str = "PUBLIC_STRIPE_PUBLISHABLE_KEY";
    /// Payment webhook signing secret (required).
    pub const STRIPE_WEBHOOK_SECRET: &str = "STRIPE_WEBHOOK_SECRET";

    /// Data-store project URL (required).
    pub const SUPABASE_URL: &str = "SUPABASE_URL";
    /// Data-store anonymous key (required).
    pub const SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
}

/// Default content-delivery environment.
pub const CONTENTFUL_ENVIRONMENT: &str = "master";

/// Default sender address for outgoing email.
pub const FROM_EMAIL: &str = "audio@russabuss.com";

/// The studio operator's inbox: contact notifications go here and
/// purchase confirmations use it as reply-to.
pub const OPERATOR_EMAIL: &str = "audio@russabuss.com";

/// Currency applied to line items that do not name one.
pub const CURRENCY: &str = "usd";

/// Content-delivery API origin.
pub const CONTENTFUL_CDN_BASE: &str = "https://cdn.contentful.com";

/// Email API origin.
pub const RESEND_API_BASE: &str = "https://api.resend.com";

/// Payment API origin.
pub const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Hosted checkout page prefix; the session id is appended as a path segment.
pub const STRIPE_CHECKOUT_PAY_URL: &str = "https://checkout.stripe.com/c/pay";

/// Maximum age (either direction) of a webhook signature timestamp, in seconds.
pub const WEBHOOK_TOLERANCE_SECS: u64 = 300;

/// Default path written by `beatstore init`.
pub const CONFIG_FILE: &str = "beatstore.toml";
