//! Tests for `DataStoreClient`.

use std::collections::HashMap;

use serde_json::json;

use super::{DataStoreClient, QueryOptions};
use crate::error::ErrorKind;
use crate::transport::test_fixtures::MockTransport;
use crate::transport::{QueryParams, TransportError};

fn env() -> HashMap<String, String> {
    [
        ("SUPABASE_URL", "https://proj.supabase.co"),
        ("SUPABASE_ANON_KEY", "anon-key"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn client(transport: &MockTransport) -> DataStoreClient<&MockTransport> {
    DataStoreClient::from_env(transport, &env()).unwrap()
}

#[test]
fn missing_settings_fail_before_any_request() {
    let transport = MockTransport::default();

    let err = DataStoreClient::from_env(&transport, &HashMap::<String, String>::new()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("SUPABASE_URL"));
    assert!(err.to_string().contains("SUPABASE_ANON_KEY"));
    assert_eq!(transport.calls(), 0);
}

mod select {
    use super::*;

    #[tokio::test]
    async fn empty_query_has_no_question_mark() {
        let transport = MockTransport::json(http::StatusCode::OK, json!([]));
        let client = client(&transport);

        let rows = client.select("beats", &QueryParams::new()).await.unwrap();

        assert_eq!(rows, json!([]));
        let request = transport.last_request();
        assert_eq!(request.method, http::Method::GET);
        assert_eq!(request.url.as_str(), "https://proj.supabase.co/rest/v1/beats");
    }

    #[tokio::test]
    async fn query_is_appended() {
        let transport = MockTransport::default();
        let client = client(&transport);

        client
            .select("beats", &QueryParams::new().with("available", "true"))
            .await
            .unwrap();

        assert_eq!(
            transport.last_request().url.as_str(),
            "https://proj.supabase.co/rest/v1/beats?available=true"
        );
    }

    #[tokio::test]
    async fn sends_key_headers_without_prefer() {
        let transport = MockTransport::default();
        let client = client(&transport);

        client.select("beats", &QueryParams::new()).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.headers.get("apikey").unwrap(), "anon-key");
        assert_eq!(
            request.headers.get(http::header::AUTHORIZATION).unwrap(),
            "Bearer anon-key"
        );
        assert_eq!(
            request.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert!(request.headers.get("prefer").is_none());
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn project_url_with_trailing_slash_is_normalized() {
        let mut vars = env();
        vars.insert(
            "SUPABASE_URL".to_string(),
            "https://proj.supabase.co/".to_string(),
        );
        let transport = MockTransport::default();
        let client = DataStoreClient::from_env(&transport, &vars).unwrap();

        client.select("beats", &QueryParams::new()).await.unwrap();

        assert_eq!(transport.last_request().url.path(), "/rest/v1/beats");
    }

    #[tokio::test]
    async fn empty_table_is_rejected_without_request() {
        let transport = MockTransport::default();
        let client = client(&transport);

        let err = client.select("", &QueryParams::new()).await.unwrap_err();

        assert_eq!(err.field(), Some("table"));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn unauthorized_is_provider_error() {
        let transport = MockTransport::json(
            http::StatusCode::UNAUTHORIZED,
            json!({"message": "Invalid API key"}),
        );
        let client = client(&transport);

        let err = client.select("beats", &QueryParams::new()).await.unwrap_err();

        assert_eq!(err.to_string(), "Supabase API error: 401 Unauthorized");
    }

    #[tokio::test]
    async fn connection_failure_is_network_error() {
        let transport = MockTransport::failing(TransportError::Connection("refused".into()));
        let client = client(&transport);

        let err = client.select("beats", &QueryParams::new()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
    }
}

mod insert {
    use super::*;

    #[tokio::test]
    async fn posts_json_body_with_prefer_header() {
        let transport = MockTransport::json(
            http::StatusCode::CREATED,
            json!([{"id": 1, "email": "a@b.co"}]),
        );
        let client = client(&transport);
        let row = json!({"email": "a@b.co"});

        let stored = client.insert("contacts", &row).await.unwrap();

        assert_eq!(stored[0]["id"], 1);
        let request = transport.last_request();
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(
            request.url.as_str(),
            "https://proj.supabase.co/rest/v1/contacts"
        );
        assert_eq!(
            request.headers.get("prefer").unwrap(),
            "return=representation"
        );
        let body: serde_json::Value =
            serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, row);
    }

    #[tokio::test]
    async fn no_content_response_decodes_as_null() {
        let transport = MockTransport::raw(http::StatusCode::NO_CONTENT, b"");
        let client = client(&transport);

        let stored = client.insert("contacts", &json!({})).await.unwrap();

        assert!(stored.is_null());
    }
}

mod query {
    use super::*;

    #[tokio::test]
    async fn patch_carries_body_and_filters_but_no_prefer() {
        let transport = MockTransport::default();
        let client = client(&transport);
        let options = QueryOptions {
            method: http::Method::PATCH,
            query: QueryParams::new().with("id", "eq.7"),
            body: Some(json!({"available": false})),
        };

        client.query("beats", &options).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, http::Method::PATCH);
        assert_eq!(request.url.query(), Some("id=eq.7"));
        assert!(request.headers.get("prefer").is_none());
        assert_eq!(request.body_text(), Some(r#"{"available":false}"#));
    }

    #[test]
    fn default_options_are_plain_get() {
        let options = QueryOptions::default();

        assert_eq!(options.method, http::Method::GET);
        assert!(options.query.is_empty());
        assert!(options.body.is_none());
    }
}
