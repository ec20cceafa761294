//! CLI argument parsing using clap.
//!
//! Defines the operator command-line interface: one subcommand per client
//! operation, plus `init` for writing a configuration template.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// beatstore: service clients for the studio storefront
///
/// Runs a single content, email, payment or data-store operation and
/// prints the JSON result. Credentials come from the environment, or from
/// a config file passed with --config.
#[derive(Debug, Parser)]
#[command(name = "beatstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (environment variables take precedence)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Send email and checkout requests to the real providers instead of
    /// the offline stub
    #[arg(long, global = true)]
    pub live: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for beatstore
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Fetch a single content entry by id
    Entry {
        /// Entry identifier
        id: String,
    },

    /// Fetch one page of content entries
    Entries {
        /// Query parameter passed through verbatim (repeatable)
        #[arg(long = "query", short = 'q', value_name = "K=V", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
    },

    /// Read rows from a data-store table
    Select {
        /// Table name
        table: String,

        /// Query parameter (repeatable), e.g. available=eq.true
        #[arg(long = "query", short = 'q', value_name = "K=V", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
    },

    /// Insert a row into a data-store table
    Insert {
        /// Table name
        table: String,

        /// Row as a JSON document
        json: String,
    },

    /// Send an email
    SendEmail {
        /// Recipient address
        #[arg(long)]
        to: String,

        /// Subject line
        #[arg(long)]
        subject: String,

        /// HTML body
        #[arg(long)]
        html: Option<String>,

        /// Plain-text body
        #[arg(long)]
        text: Option<String>,

        /// Sender override
        #[arg(long)]
        from: Option<String>,

        /// Reply-to address
        #[arg(long = "reply-to")]
        reply_to: Option<String>,
    },

    /// Send a purchase confirmation to a customer
    PurchaseConfirmation {
        /// Customer address
        #[arg(long)]
        to: String,

        /// Product name
        #[arg(long)]
        product: String,

        /// License type (e.g. MP3, WAV, Stems)
        #[arg(long)]
        license: String,

        /// Amount paid, in cents
        #[arg(long = "amount-cents")]
        amount_cents: u64,

        /// Download link for the purchased files
        #[arg(long = "download-url")]
        download_url: String,
    },

    /// Forward a contact-form submission to the studio inbox
    ContactNotification {
        /// Submitter first name
        #[arg(long = "first-name")]
        first_name: String,

        /// Submitter last name
        #[arg(long = "last-name")]
        last_name: String,

        /// Submitter address
        #[arg(long)]
        email: String,

        /// Requested service (repeatable)
        #[arg(long = "service")]
        services: Vec<String>,

        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Create a checkout session
    Checkout {
        /// Line item as NAME=AMOUNT_CENTS (repeatable)
        #[arg(long = "item", value_name = "NAME=CENTS", value_parser = parse_line_item)]
        items: Vec<(String, u64)>,

        /// Redirect URL after payment
        #[arg(long = "success-url")]
        success_url: String,

        /// Redirect URL when the customer cancels
        #[arg(long = "cancel-url")]
        cancel_url: String,

        /// Pre-filled customer address
        #[arg(long = "customer-email")]
        customer_email: Option<String>,

        /// Metadata entry (repeatable)
        #[arg(long = "metadata", value_name = "K=V", value_parser = parse_key_value)]
        metadata: Vec<(String, String)>,
    },

    /// Verify a webhook payload against its signature header
    VerifyWebhook {
        /// File holding the raw request body
        #[arg(long)]
        payload: PathBuf,

        /// Value of the signature header
        #[arg(long)]
        signature: String,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}

/// Parses `KEY=VALUE`; the value may itself contain `=`.
///
/// # Errors
///
/// Returns a message when there is no `=` or the key is empty.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parses `NAME=AMOUNT_CENTS`; the name may contain `=`.
///
/// # Errors
///
/// Returns a message when the amount is missing or not a non-negative integer.
pub fn parse_line_item(s: &str) -> Result<(String, u64), String> {
    let (name, amount) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=AMOUNT_CENTS, got '{s}'"))?;
    let amount = amount
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid amount in '{s}': {e}"))?;
    Ok((name.trim().to_string(), amount))
}
