//! Offline transport that emulates the email and checkout providers.

use serde_json::json;

use crate::config::defaults;
use crate::time::{Clock, SystemClock};

use super::{HttpRequest, HttpResponse, Transport, TransportError};

/// Transport that answers without touching the network.
///
/// It recognises the email-send and checkout-session endpoints and
/// synthesizes provider-shaped responses with time-based identifiers:
///
/// | Request | Response body |
/// |---|---|
/// | `POST {email api}/emails` | `{"id": "email_stub_{unix_millis}"}` |
/// | `POST {payment api}/v1/checkout/sessions` | `{"id": "cs_test_stub_{unix_millis}", "url": ".../c/pay/{id}", "status": "open"}` |
///
/// Anything else is answered with `404 Not Found`.
#[derive(Debug, Clone, Default)]
pub struct StubTransport<C = SystemClock> {
    clock: C,
}

impl StubTransport<SystemClock> {
    /// Creates a stub transport using the system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> StubTransport<C> {
    /// Creates a stub transport reading time from `clock`.
    #[must_use]
    pub const fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    fn route(&self, req: &HttpRequest) -> HttpResponse {
        let target = (req.method.as_str(), req.url.origin().ascii_serialization(), req.url.path());
        let millis = self.clock.unix_millis();

        match target {
            ("POST", origin, "/emails") if origin == defaults::RESEND_API_BASE => {
                let id = format!("email_stub_{millis}");
                tracing::info!(%id, "Email send short-circuited by stub transport");
                HttpResponse::json(http::StatusCode::OK, &json!({ "id": id }))
            }
            ("POST", origin, "/v1/checkout/sessions") if origin == defaults::STRIPE_API_BASE => {
                let id = format!("cs_test_stub_{millis}");
                tracing::info!(%id, "Checkout session short-circuited by stub transport");
                HttpResponse::json(
                    http::StatusCode::OK,
                    &json!({
                        "id": id,
                        "object": "checkout.session",
                        "url": format!("{}/{id}", defaults::STRIPE_CHECKOUT_PAY_URL),
                        "status": "open",
                    }),
                )
            }
            _ => {
                tracing::debug!(method = %req.method, url = %req.url, "Stub transport has no route");
                HttpResponse::json(
                    http::StatusCode::NOT_FOUND,
                    &json!({ "error": format!("no stub route for {} {}", req.method, req.url) }),
                )
            }
        }
    }
}

impl<C: Clock> Transport for StubTransport<C> {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        Ok(self.route(&req))
    }
}
