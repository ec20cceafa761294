//! Classification of transport outcomes into success or failure.

use serde::de::DeserializeOwned;

use crate::config::Provider;
use crate::error::{ServiceError, ServiceResult};

use super::{HttpRequest, HttpResponse, Transport, TransportError};

/// Sends `req` once through `transport` and classifies the outcome.
///
/// # Errors
///
/// See [`classify`].
pub async fn exchange<T, R>(transport: &T, provider: Provider, req: HttpRequest) -> ServiceResult<R>
where
    T: Transport,
    R: DeserializeOwned,
{
    tracing::debug!(%provider, method = %req.method, url = %req.url, "Sending request");
    classify(provider, transport.send(req).await)
}

/// Classifies the outcome of one exchange with `provider`.
///
/// - no response → [`ServiceError::Network`]
/// - non-2xx status → [`ServiceError::Provider`]
/// - 2xx with an undecodable body → [`ServiceError::Decode`]
///
/// A `204 No Content` response decodes as if the body were JSON `null`.
///
/// # Errors
///
/// Returns the classified failure as described above.
pub fn classify<T: DeserializeOwned>(
    provider: Provider,
    outcome: Result<HttpResponse, TransportError>,
) -> ServiceResult<T> {
    let response = outcome.map_err(|source| {
        tracing::warn!(%provider, error = %source, "No response received");
        ServiceError::Network { provider, source }
    })?;

    if !response.is_success() {
        let reason = response
            .status
            .canonical_reason()
            .unwrap_or("Unknown Status")
            .to_string();
        tracing::warn!(
            %provider,
            status = response.status.as_u16(),
            %reason,
            "Provider returned non-success status"
        );
        return Err(ServiceError::Provider {
            provider,
            status: response.status,
            reason,
            body: response.body_text().map(ToString::to_string),
        });
    }

    let body: &[u8] = if response.status == http::StatusCode::NO_CONTENT {
        b"null"
    } else {
        &response.body
    };

    serde_json::from_slice(body).map_err(|source| ServiceError::Decode { provider, source })
}
