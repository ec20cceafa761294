//! Transactional-email API client.

use serde::Deserialize;

use crate::config::{EmailConfig, EnvSource, Provider, defaults};
use crate::error::{ServiceError, ServiceResult};
use crate::transport::{HttpRequest, Transport, endpoint, exchange};

use super::{ContactForm, EmailMessage, EmailReceipt, Purchase};

/// Acknowledgement body returned by the send endpoint.
#[derive(Debug, Deserialize)]
struct Accepted {
    id: String,
}

/// Client for the transactional-email API.
///
/// Messages are validated locally before any request is built. Run it
/// over [`StubTransport`](crate::transport::StubTransport) to exercise
/// the full path without sending mail.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use beatstore_clients::email::{EmailClient, EmailMessage};
/// use beatstore_clients::transport::StubTransport;
///
/// let env = HashMap::from([("RESEND_API_KEY".to_string(), "re_test".to_string())]);
/// let client = EmailClient::from_env(StubTransport::new(), &env).unwrap();
///
/// let request = client
///     .send_request(&EmailMessage::new("fan@example.com", "Hello").with_text("Hi"))
///     .unwrap();
/// assert_eq!(request.url.as_str(), "https://api.resend.com/emails");
/// ```
#[derive(Debug)]
pub struct EmailClient<T> {
    transport: T,
    config: EmailConfig,
}

impl<T> EmailClient<T> {
    /// Creates a client from an already-resolved config.
    #[must_use]
    pub const fn new(transport: T, config: EmailConfig) -> Self {
        Self { transport, config }
    }

    /// Resolves [`EmailConfig`] from `env` and creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] when the API key is missing.
    pub fn from_env<E: EnvSource + ?Sized>(transport: T, env: &E) -> ServiceResult<Self> {
        Ok(Self::new(transport, EmailConfig::resolve(env)?))
    }

    /// Returns the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &EmailConfig {
        &self.config
    }

    /// Sender used for `message`.
    fn sender<'a>(&'a self, message: &'a EmailMessage) -> &'a str {
        message
            .sender_override()
            .unwrap_or_else(|| self.config.from_email())
    }

    /// Validates `message` and builds the send request.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] for the first violated message
    /// rule and [`ServiceError::Configuration`] if the key is not header-safe.
    pub fn send_request(&self, message: &EmailMessage) -> ServiceResult<HttpRequest> {
        message.validate()?;

        let url = endpoint(self.config.base_url(), &["emails"]);
        let payload = message.payload(self.sender(message));
        let request = HttpRequest::post(url)
            .with_header(http::header::AUTHORIZATION, self.config.authorization()?)
            .with_json(&payload)
            .map_err(|e| ServiceError::validation("message", e.to_string()))?;
        Ok(request)
    }
}

fn render_error(e: &handlebars::RenderError) -> ServiceError {
    ServiceError::validation("html", format!("Failed to render email template: {e}"))
}

impl<T: Transport> EmailClient<T> {
    /// Sends one email.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] before any request when the
    /// message is incomplete, otherwise the classified failure of the
    /// exchange.
    pub async fn send_email(&self, message: &EmailMessage) -> ServiceResult<EmailReceipt> {
        let request = self.send_request(message)?;
        let accepted: Accepted = exchange(&self.transport, Provider::Resend, request).await?;

        tracing::info!(id = %accepted.id, "Email queued");
        Ok(EmailReceipt {
            id: accepted.id,
            from: self.sender(message).to_string(),
            to: message.to.clone(),
            status: "queued".to_string(),
        })
    }

    /// Sends the purchase confirmation for `purchase` to `to`.
    ///
    /// Replies go to the studio inbox.
    ///
    /// # Errors
    ///
    /// See [`send_email`](Self::send_email).
    pub async fn send_purchase_confirmation(
        &self,
        to: &str,
        purchase: &Purchase,
    ) -> ServiceResult<EmailReceipt> {
        let html = purchase.render_html().map_err(|e| render_error(&e))?;
        let message = EmailMessage::new(to, purchase.subject())
            .with_html(html)
            .with_reply_to(defaults::OPERATOR_EMAIL);
        self.send_email(&message).await
    }

    /// Forwards a contact-form submission to the studio inbox.
    ///
    /// Replies go to the submitter.
    ///
    /// # Errors
    ///
    /// See [`send_email`](Self::send_email).
    pub async fn send_contact_notification(
        &self,
        form: &ContactForm,
    ) -> ServiceResult<EmailReceipt> {
        let html = form.render_html().map_err(|e| render_error(&e))?;
        let message = EmailMessage::new(defaults::OPERATOR_EMAIL, form.subject())
            .with_html(html)
            .with_reply_to(form.email.as_str());
        self.send_email(&message).await
    }
}
