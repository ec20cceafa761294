//! Payment API client.

use serde_json::Value;

use crate::config::{EnvSource, PaymentConfig, Provider, defaults};
use crate::error::{ServiceError, ServiceResult};
use crate::time::{Clock, SystemClock};
use crate::transport::{HttpRequest, Transport, endpoint, exchange};

use super::signature::{self, SignatureError};
use super::{CheckoutRequest, CheckoutSession};

fn rejected(error: &SignatureError) -> ServiceError {
    ServiceError::validation("signature", error.to_string())
}

/// Client for checkout sessions and webhook verification.
///
/// # Type Parameters
///
/// - `T`: The transport implementation
/// - `C`: The clock used for webhook timestamps (defaults to [`SystemClock`])
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use beatstore_clients::payment::PaymentClient;
/// use beatstore_clients::transport::StubTransport;
///
/// let env: HashMap<String, String> = [
///     ("STRIPE_SECRET_KEY", "sk_test"),
///     ("PUBLIC_STRIPE_PUBLISHABLE_KEY", "pk_test"),
///     ("STRIPE_WEBHOOK_SECRET", "whsec_test"),
/// ]
/// .into_iter()
/// .map(|(k, v)| (k.to_string(), v.to_string()))
/// .collect();
///
/// let client = PaymentClient::from_env(StubTransport::new(), &env).unwrap();
/// let header = client.sign_webhook_payload(br#"{"type":"ping"}"#, 1_700_000_000).unwrap();
/// assert!(header.starts_with("t=1700000000,v1="));
/// ```
#[derive(Debug)]
pub struct PaymentClient<T, C = SystemClock> {
    transport: T,
    config: PaymentConfig,
    clock: C,
    tolerance_secs: u64,
}

impl<T> PaymentClient<T, SystemClock> {
    /// Creates a client from an already-resolved config.
    #[must_use]
    pub const fn new(transport: T, config: PaymentConfig) -> Self {
        Self {
            transport,
            config,
            clock: SystemClock,
            tolerance_secs: defaults::WEBHOOK_TOLERANCE_SECS,
        }
    }

    /// Resolves [`PaymentConfig`] from `env` and creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] naming every missing secret.
    pub fn from_env<E: EnvSource + ?Sized>(transport: T, env: &E) -> ServiceResult<Self> {
        Ok(Self::new(transport, PaymentConfig::resolve(env)?))
    }
}

impl<T, C> PaymentClient<T, C> {
    /// Sets the clock used for webhook timestamps.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> PaymentClient<T, C2> {
        PaymentClient {
            transport: self.transport,
            config: self.config,
            clock,
            tolerance_secs: self.tolerance_secs,
        }
    }

    /// Sets how far a webhook timestamp may be from now, in seconds.
    #[must_use]
    pub const fn with_tolerance_secs(mut self, tolerance_secs: u64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Returns the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &PaymentConfig {
        &self.config
    }

    /// Validates `request` and builds the form-encoded session request.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] for the first violated rule and
    /// [`ServiceError::Configuration`] if the key is not header-safe.
    pub fn checkout_request(&self, request: &CheckoutRequest) -> ServiceResult<HttpRequest> {
        request.validate()?;

        let url = endpoint(self.config.base_url(), &["v1", "checkout", "sessions"]);
        let fields = request.form_fields();
        Ok(HttpRequest::post(url)
            .with_header(http::header::AUTHORIZATION, self.config.authorization()?)
            .with_form(fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))))
    }

    /// Produces a signature header for `payload` as the provider would.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] if the secret cannot key the MAC.
    pub fn sign_webhook_payload(&self, payload: &[u8], timestamp: u64) -> ServiceResult<String> {
        signature::sign(self.config.webhook_secret(), timestamp, payload)
            .map_err(|e| rejected(&e))
    }
}

impl<T, C: Clock> PaymentClient<T, C> {
    /// Verifies a webhook delivery and returns the parsed event.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] when the signature is missing,
    /// malformed, does not match, or is outside the timestamp tolerance, and
    /// [`ServiceError::Decode`] when a verified payload is not JSON.
    pub fn verify_webhook_signature(
        &self,
        payload: &[u8],
        header: &str,
    ) -> ServiceResult<Value> {
        let now = self.clock.unix_secs();
        signature::verify(
            self.config.webhook_secret(),
            payload,
            header,
            now,
            self.tolerance_secs,
        )
        .map_err(|e| {
            tracing::warn!(error = %e, "Webhook signature rejected");
            rejected(&e)
        })?;

        serde_json::from_slice(payload).map_err(|source| ServiceError::Decode {
            provider: Provider::Stripe,
            source,
        })
    }
}

impl<T: Transport, C> PaymentClient<T, C> {
    /// Creates a checkout session.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] before any request when the
    /// request is incomplete, otherwise the classified failure of the
    /// exchange.
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> ServiceResult<CheckoutSession> {
        let http_request = self.checkout_request(request)?;
        let session: CheckoutSession =
            exchange(&self.transport, Provider::Stripe, http_request).await?;

        tracing::info!(id = %session.id, status = %session.status, "Checkout session created");
        Ok(session)
    }
}
