//! Shared test fixtures for transport-backed clients.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::{HttpRequest, HttpResponse, Transport, TransportError};

/// Mock transport that records requests and replays queued outcomes.
///
/// Once the queue is exhausted every call answers `200 {}`.
#[derive(Debug, Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new(outcomes: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn json(status: http::StatusCode, body: serde_json::Value) -> Self {
        Self::new(vec![Ok(HttpResponse::json(status, &body))])
    }

    pub fn raw(status: http::StatusCode, body: &[u8]) -> Self {
        Self::new(vec![Ok(HttpResponse::new(
            status,
            http::HeaderMap::new(),
            body.to_vec(),
        ))])
    }

    pub fn failing(error: TransportError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for MockTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(req);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(HttpResponse::json(
                    http::StatusCode::OK,
                    &serde_json::json!({}),
                ))
            })
    }
}
