//! Command execution logic.
//!
//! This module resolves the configuration each command needs, builds the
//! matching client, performs exactly one operation and returns its result
//! as JSON.

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use beatstore_clients::config::{Cli, Command, ConfigError, EnvSource};
use beatstore_clients::content::ContentClient;
use beatstore_clients::email::{ContactForm, EmailClient, EmailMessage, Purchase};
use beatstore_clients::error::ServiceError;
use beatstore_clients::payment::{CheckoutRequest, LineItem, PaymentClient};
use beatstore_clients::store::DataStoreClient;
use beatstore_clients::transport::{QueryParams, ReqwestTransport, StubTransport, Transport};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// A client operation failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Failed to read an input file.
    #[error("Failed to read '{}': {source}", path.display())]
    ReadInput {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A JSON argument could not be parsed.
    #[error("Invalid JSON argument: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The command was handled before execution.
    #[error("Command '{0}' is not executed by the runner")]
    NotExecutable(&'static str),

    /// The result could not be serialized.
    #[error("Failed to serialize result: {0}")]
    Output(#[source] serde_json::Error),
}

impl RunError {
    /// Returns the configuration error behind this failure, if any.
    pub const fn config_error(&self) -> Option<&ConfigError> {
        match self {
            Self::Service(ServiceError::Configuration(e)) => Some(e),
            _ => None,
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, RunError> {
    serde_json::to_value(value).map_err(RunError::Output)
}

fn query_params(pairs: &[(String, String)]) -> QueryParams {
    pairs.iter().cloned().collect()
}

/// Executes the command selected on the command line.
///
/// Content and data-store commands always use the live transport. Email
/// and checkout commands use the offline stub unless `--live` was given.
///
/// # Errors
///
/// Returns the failure of the selected operation.
#[cfg(not(tarpaulin_include))]
pub async fn execute<E: EnvSource + ?Sized>(cli: &Cli, env: &E) -> Result<Value, RunError> {
    let live = ReqwestTransport::new();
    if cli.live {
        dispatch(&cli.command, env, &live, &live).await
    } else {
        dispatch(&cli.command, env, &live, &StubTransport::new()).await
    }
}

/// Routes `command` to its client.
///
/// `reads` carries content and data-store requests; `sends` carries email
/// and checkout requests.
async fn dispatch<E, R, S>(
    command: &Command,
    env: &E,
    reads: &R,
    sends: &S,
) -> Result<Value, RunError>
where
    E: EnvSource + ?Sized,
    R: Transport,
    S: Transport,
{
    match command {
        Command::Init { .. } => Err(RunError::NotExecutable("init")),
        Command::Entry { .. } | Command::Entries { .. } => run_content(command, env, reads).await,
        Command::Select { .. } | Command::Insert { .. } => run_store(command, env, reads).await,
        Command::SendEmail { .. }
        | Command::PurchaseConfirmation { .. }
        | Command::ContactNotification { .. } => run_email(command, env, sends).await,
        Command::Checkout { .. } | Command::VerifyWebhook { .. } => {
            run_payment(command, env, sends).await
        }
    }
}

async fn run_content<E, T>(command: &Command, env: &E, transport: &T) -> Result<Value, RunError>
where
    E: EnvSource + ?Sized,
    T: Transport,
{
    let client = ContentClient::from_env(transport, env)?;
    match command {
        Command::Entry { id } => Ok(client.get_entry(id).await?),
        Command::Entries { query } => Ok(client.get_entries(&query_params(query)).await?),
        _ => Err(RunError::NotExecutable("content")),
    }
}

async fn run_store<E, T>(command: &Command, env: &E, transport: &T) -> Result<Value, RunError>
where
    E: EnvSource + ?Sized,
    T: Transport,
{
    let client = DataStoreClient::from_env(transport, env)?;
    match command {
        Command::Select { table, query } => Ok(client.select(table, &query_params(query)).await?),
        Command::Insert { table, json } => {
            let row: Value = serde_json::from_str(json).map_err(RunError::InvalidJson)?;
            Ok(client.insert(table, &row).await?)
        }
        _ => Err(RunError::NotExecutable("store")),
    }
}

async fn run_email<E, T>(command: &Command, env: &E, transport: &T) -> Result<Value, RunError>
where
    E: EnvSource + ?Sized,
    T: Transport,
{
    let client = EmailClient::from_env(transport, env)?;
    let receipt = match command {
        Command::SendEmail {
            to,
            subject,
            html,
            text,
            from,
            reply_to,
        } => {
            let message = EmailMessage {
                to: to.clone(),
                subject: subject.clone(),
                html: html.clone(),
                text: text.clone(),
                from: from.clone(),
                reply_to: reply_to.clone(),
                ..EmailMessage::default()
            };
            client.send_email(&message).await?
        }
        Command::PurchaseConfirmation {
            to,
            product,
            license,
            amount_cents,
            download_url,
        } => {
            let purchase = Purchase {
                product_name: product.clone(),
                license_type: license.clone(),
                amount_cents: *amount_cents,
                download_url: download_url.clone(),
            };
            client.send_purchase_confirmation(to, &purchase).await?
        }
        Command::ContactNotification {
            first_name,
            last_name,
            email,
            services,
            notes,
        } => {
            let form = ContactForm {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                email: email.clone(),
                services: services.clone(),
                notes: notes.clone(),
            };
            client.send_contact_notification(&form).await?
        }
        _ => return Err(RunError::NotExecutable("email")),
    };
    to_json(&receipt)
}

async fn run_payment<E, T>(command: &Command, env: &E, transport: &T) -> Result<Value, RunError>
where
    E: EnvSource + ?Sized,
    T: Transport,
{
    let client = PaymentClient::from_env(transport, env)?;
    match command {
        Command::Checkout {
            items,
            success_url,
            cancel_url,
            customer_email,
            metadata,
        } => {
            let request = CheckoutRequest {
                line_items: items
                    .iter()
                    .map(|(name, amount)| LineItem::new(name.as_str(), *amount))
                    .collect(),
                success_url: success_url.clone(),
                cancel_url: cancel_url.clone(),
                customer_email: customer_email.clone(),
                metadata: metadata.iter().cloned().collect(),
            };
            to_json(&client.create_checkout_session(&request).await?)
        }
        Command::VerifyWebhook { payload, signature } => {
            let body = std::fs::read(payload).map_err(|source| RunError::ReadInput {
                path: payload.clone(),
                source,
            })?;
            Ok(client.verify_webhook_signature(&body, signature)?)
        }
        _ => Err(RunError::NotExecutable("payment")),
    }
}
