// Integration tests for DynatraceClient against a mock event API
//
// Run with: cargo test -p dtclient --test send_event_test

use dtclient::{ClientConfig, DynatraceClient, ErrorKind, EventData, EventResponse, EventSubmitter};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_TOKEN: &str = "dt0c01.test-token";

const VALID_EVENT: &str = r#"{
    "eventType": "MARKED_FOR_TERMINATION",
    "start": 20,
    "end": 20,
    "description": "K8s node was marked unschedulable. Node is likely being drained",
    "attachRules": {
        "entityIds": [ "HOST-CA78D78BBC6687D3" ]
    },
    "source": "OneAgent Operator"
}"#;

const EVENT_WITHOUT_TYPE: &str = r#"{
    "start": 20,
    "end": 20,
    "description": "K8s node was marked unschedulable. Node is likely being drained",
    "attachRules": {
        "entityIds": [ "HOST-CA78D78BBC6687D3" ]
    },
    "source": "OneAgent Operator"
}"#;

const EVENT_WITH_EXTRA_KEYS: &str = r#"{
    "eventType": "MARKED_FOR_TERMINATION",
    "start": 20,
    "end": 20,
    "description": "K8s node was marked unschedulable. Node is likely being drained",
    "attachRules": {
        "entityIds": [ "HOST-CA78D78BBC6687D3" ]
    },
    "source": "OneAgent Operator",
    "cat": "potato"
}"#;

fn stored_response() -> Value {
    json!({
        "storedEventIds": [42],
        "storedIds": ["42"],
        "storedCorrelationIds": []
    })
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("dtclient=debug")
        .with_test_writer()
        .try_init();
}

fn client_for(server: &MockServer) -> DynatraceClient {
    DynatraceClient::new(ClientConfig::new(server.uri(), API_TOKEN)).unwrap()
}

/// Mount the ingestion handler: POST gets the stored ids, anything else 405
async fn mount_event_api(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_response()))
        .mount(server)
        .await;

    Mock::given(path("/v1/events"))
        .respond_with(ResponseTemplate::new(405).set_body_json(json!({
            "error": { "code": 405, "message": "Method Not Allowed" }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_send_valid_event() {
    init_tracing();
    let server = MockServer::start().await;
    let expected_body: Value = serde_json::from_str(VALID_EVENT).unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/events"))
        .and(header("Authorization", "Api-Token dt0c01.test-token"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_response()))
        .expect(1)
        .mount(&server)
        .await;

    let event = EventData::decode(VALID_EVENT.as_bytes()).unwrap();
    let response = client_for(&server).send_event(&event).await.unwrap();

    assert_eq!(
        response,
        EventResponse {
            stored_event_ids: vec![42],
            stored_ids: vec!["42".to_string()],
            stored_correlation_ids: vec![],
        }
    );
}

#[tokio::test]
async fn test_send_event_without_type_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_response()))
        .expect(0)
        .mount(&server)
        .await;

    let event = EventData::decode(EVENT_WITHOUT_TYPE.as_bytes()).unwrap();
    let err = client_for(&server).send_event(&event).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("no eventType set"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_send_event_with_extra_keys() {
    let server = MockServer::start().await;
    mount_event_api(&server).await;

    let event = EventData::decode(EVENT_WITH_EXTRA_KEYS.as_bytes()).unwrap();
    let response = client_for(&server).send_event(&event).await.unwrap();

    assert_eq!(response.stored_event_ids, vec![42]);
    assert_eq!(response.stored_ids, vec!["42".to_string()]);
    assert!(response.stored_correlation_ids.is_empty());

    // The unknown key never reaches the wire
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(sent.get("cat").is_none());
    assert_eq!(sent, serde_json::from_str::<Value>(VALID_EVENT).unwrap());
}

#[tokio::test]
async fn test_method_not_allowed_is_transport_error() {
    init_tracing();
    let server = MockServer::start().await;

    // Handler that only accepts PUT; every other method gets 405
    Mock::given(method("PUT"))
        .and(path("/v1/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_response()))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(path("/v1/events"))
        .respond_with(ResponseTemplate::new(405).set_body_json(json!({
            "error": { "code": 405, "message": "Method Not Allowed" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let event = EventData::decode(VALID_EVENT.as_bytes()).unwrap();
    let err = client_for(&server).send_event(&event).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.http_status(), Some(405));
    assert!(err.to_string().contains("Method Not Allowed"));
}

#[tokio::test]
async fn test_error_envelope_without_message_uses_reason_phrase() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400 }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_event(&EventData::new("CUSTOM_INFO"))
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), Some(400));
    assert_eq!(err.to_string(), "Transport error (HTTP 400): Bad Request");
}

#[tokio::test]
async fn test_non_ok_status_ignores_body() {
    let server = MockServer::start().await;

    // A 201 carrying a well-formed acknowledgment is still a failure
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(stored_response()))
        .mount(&server)
        .await;

    let event = EventData::new("CUSTOM_INFO");
    let err = client_for(&server).send_event(&event).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.http_status(), Some(201));
}

#[tokio::test]
async fn test_server_error_without_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let event = EventData::new("CUSTOM_INFO");
    let err = client_for(&server).send_event(&event).await.unwrap_err();

    assert_eq!(err.http_status(), Some(503));
    assert!(err.to_string().contains("Service Unavailable"));
}

#[tokio::test]
async fn test_malformed_response_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"storedEventIds\": [42"))
        .mount(&server)
        .await;

    let event = EventData::new("CUSTOM_INFO");
    let err = client_for(&server).send_event(&event).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_unexpected_response_shape_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let event = EventData::new("CUSTOM_INFO");
    let err = client_for(&server).send_event(&event).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Bind then drop a listener so the port is closed
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = DynatraceClient::new(ClientConfig::new(format!("http://{}", addr), API_TOKEN))
        .unwrap();

    let err = client
        .send_event(&EventData::new("CUSTOM_INFO"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.http_status(), None);
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(stored_response())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri(), API_TOKEN).with_timeout(Duration::from_millis(100));
    let client = DynatraceClient::new(config).unwrap();

    let err = client
        .send_event(&EventData::new("CUSTOM_INFO"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn test_concurrent_sends_share_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_response()))
        .expect(4)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut handles = Vec::new();
    for i in 0..4 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let event = EventData::new("CUSTOM_INFO").with_entity_id(format!("HOST-{}", i));
            client.send_event(&event).await
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/e/tenant/api/v1/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_response()))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(format!("{}/e/tenant/api/", server.uri()), API_TOKEN);
    let client = DynatraceClient::new(config).unwrap();

    assert!(client.send_event(&EventData::new("CUSTOM_INFO")).await.is_ok());
}
