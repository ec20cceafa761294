//! Tests for HTTP request/response types.

use super::{HttpRequest, HttpResponse, QueryParams, Transport, TransportError, endpoint};

fn base_url() -> url::Url {
    url::Url::parse("https://example.com/rest/v1/beats").unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn new_creates_request_with_method_and_url() {
        let req = HttpRequest::new(http::Method::PATCH, base_url());

        assert_eq!(req.method, http::Method::PATCH);
        assert_eq!(req.url, base_url());
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn get_and_post_set_method() {
        assert_eq!(HttpRequest::get(base_url()).method, http::Method::GET);
        assert_eq!(HttpRequest::post(base_url()).method, http::Method::POST);
    }

    #[test]
    fn with_header_appends_multiple_values_for_same_name() {
        let req = HttpRequest::get(base_url())
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("text/html"),
            )
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            );

        assert_eq!(req.headers.get_all(http::header::ACCEPT).iter().count(), 2);
    }

    #[test]
    fn with_query_empty_params_leaves_no_question_mark() {
        let req = HttpRequest::get(base_url()).with_query(&QueryParams::new());

        assert_eq!(req.url.as_str(), "https://example.com/rest/v1/beats");
        assert!(req.url.query().is_none());
    }

    #[test]
    fn with_query_appends_params_in_insertion_order() {
        let params = QueryParams::new()
            .with("select", "*")
            .with("available", "true");
        let req = HttpRequest::get(base_url()).with_query(&params);

        assert_eq!(
            req.url.as_str(),
            "https://example.com/rest/v1/beats?select=*&available=true"
        );
    }

    #[test]
    fn with_json_sets_body_and_content_type() {
        let req = HttpRequest::post(base_url())
            .with_json(&serde_json::json!({ "title": "Midnight Trap" }))
            .unwrap();

        assert_eq!(
            req.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(req.body_text(), Some(r#"{"title":"Midnight Trap"}"#));
    }

    #[test]
    fn with_form_encodes_pairs() {
        let req = HttpRequest::post(base_url()).with_form([("a", "1 2"), ("b[c]", "x&y")]);

        assert_eq!(
            req.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(req.body_text(), Some("a=1+2&b%5Bc%5D=x%26y"));
    }

    #[test]
    fn body_text_is_none_without_body() {
        assert!(HttpRequest::get(base_url()).body_text().is_none());
    }

    #[test]
    fn clone_compares_equal() {
        let req1 = HttpRequest::post(base_url()).with_body(b"original".to_vec());
        let req2 = req1.clone();

        assert_eq!(req1, req2);
    }
}

mod http_response {
    use super::*;

    #[test]
    fn is_success_returns_true_for_2xx() {
        for status in [
            http::StatusCode::OK,
            http::StatusCode::CREATED,
            http::StatusCode::NO_CONTENT,
        ] {
            let resp = HttpResponse::new(status, http::HeaderMap::new(), vec![]);
            assert!(resp.is_success(), "Expected {status} to be success");
        }
    }

    #[test]
    fn is_success_returns_false_for_non_2xx() {
        for status in [
            http::StatusCode::BAD_REQUEST,
            http::StatusCode::UNAUTHORIZED,
            http::StatusCode::NOT_FOUND,
            http::StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let resp = HttpResponse::new(status, http::HeaderMap::new(), vec![]);
            assert!(!resp.is_success(), "Expected {status} to not be success");
        }
    }

    #[test]
    fn json_sets_content_type_and_body() {
        let resp = HttpResponse::json(http::StatusCode::OK, &serde_json::json!({ "id": "x" }));

        assert_eq!(
            resp.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(resp.body_text(), Some(r#"{"id":"x"}"#));
    }

    #[test]
    fn body_text_returns_none_for_invalid_utf8() {
        let resp = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), vec![0xFF, 0xFE]);

        assert!(resp.body_text().is_none());
    }
}

mod transport_error {
    use super::*;
    use std::error::Error;

    #[test]
    fn connection_error_preserves_source() {
        let source = std::io::Error::other("network unavailable");
        let error = TransportError::Connection(Box::new(source));

        assert!(error.to_string().contains("Connection error"));
        assert!(
            error
                .source()
                .unwrap()
                .to_string()
                .contains("network unavailable")
        );
    }

    #[test]
    fn timeout_displays_message() {
        assert_eq!(TransportError::Timeout.to_string(), "Request timed out");
        assert!(TransportError::Timeout.source().is_none());
    }

    #[test]
    fn invalid_url_displays_message() {
        let error = TransportError::InvalidUrl("missing scheme".to_string());

        assert!(error.to_string().contains("Invalid URL"));
        assert!(error.to_string().contains("missing scheme"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransportError>();
    }
}

mod endpoint_building {
    use super::*;

    #[test]
    fn appends_segments_to_bare_origin() {
        let base = url::Url::parse("https://api.resend.com").unwrap();

        assert_eq!(
            endpoint(&base, &["emails"]).as_str(),
            "https://api.resend.com/emails"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_not_doubled() {
        let with_slash = url::Url::parse("https://proj.supabase.co/").unwrap();
        let without = url::Url::parse("https://proj.supabase.co").unwrap();

        assert_eq!(
            endpoint(&with_slash, &["rest", "v1", "beats"]),
            endpoint(&without, &["rest", "v1", "beats"])
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let base = url::Url::parse("http://localhost:54321/proxy/").unwrap();

        assert_eq!(
            endpoint(&base, &["rest", "v1", "beats"]).path(),
            "/proxy/rest/v1/beats"
        );
    }

    #[test]
    fn segments_are_percent_encoded() {
        let base = url::Url::parse("https://cdn.example.com").unwrap();

        assert_eq!(
            endpoint(&base, &["entries", "a/b?c"]).path(),
            "/entries/a%2Fb%3Fc"
        );
    }
}

mod transport_trait {
    use super::*;
    use crate::transport::test_fixtures::MockTransport;
    use std::sync::Arc;

    #[tokio::test]
    async fn reference_forwards_to_inner_transport() {
        let transport = MockTransport::json(http::StatusCode::CREATED, serde_json::json!([]));

        let borrowed: &MockTransport = &transport;

        let response = Transport::send(&borrowed, HttpRequest::get(base_url()))
            .await
            .unwrap();

        assert_eq!(response.status, http::StatusCode::CREATED);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn arc_forwards_to_inner_transport() {
        let transport = Arc::new(MockTransport::failing(TransportError::Timeout));

        let result = transport.send(HttpRequest::get(base_url())).await;

        assert!(matches!(result, Err(TransportError::Timeout)));
        assert_eq!(transport.calls(), 1);
        assert_eq!(transport.last_request().url, base_url());
    }
}
