// Integration tests for `HaClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hassfly_api::{Error, HaClient, ServiceCallResponse, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, HaClient) {
    let server = MockServer::start().await;
    let client = HaClient::new(
        &server.uri(),
        &SecretString::from("test-token".to_owned()),
        &TransportConfig::default(),
    )
    .expect("client construction");
    (server, client)
}

fn entity_json(id: &str, state: &str) -> serde_json::Value {
    json!({
        "entity_id": id,
        "state": state,
        "attributes": {"friendly_name": "Kitchen"},
        "last_changed": "2025-05-01T10:00:00+00:00",
        "last_updated": "2025-05-01T10:00:00+00:00",
    })
}

// ── Construction validation ─────────────────────────────────────────

#[test]
fn empty_server_url_is_a_configuration_error() {
    let err = HaClient::new(
        "",
        &SecretString::from("token".to_owned()),
        &TransportConfig::default(),
    )
    .expect_err("empty URL must fail");
    assert!(matches!(err, Error::Configuration { .. }), "got {err:?}");
}

#[test]
fn empty_token_fails_before_any_network_call() {
    // No server is running anywhere near this URL; construction must
    // fail on validation alone.
    let err = HaClient::new(
        "http://127.0.0.1:1",
        &SecretString::from(String::new()),
        &TransportConfig::default(),
    )
    .expect_err("empty token must fail");
    assert!(matches!(err, Error::Configuration { .. }), "got {err:?}");
}

#[test]
fn unparseable_server_url_is_rejected() {
    let err = HaClient::new(
        "not a url",
        &SecretString::from("token".to_owned()),
        &TransportConfig::default(),
    )
    .expect_err("bad URL must fail");
    assert!(matches!(err, Error::InvalidUrl(_)), "got {err:?}");
}

// ── States ──────────────────────────────────────────────────────────

#[tokio::test]
async fn get_states_sends_bearer_token_and_decodes() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/states"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            entity_json("light.kitchen", "on"),
            entity_json("switch.garage", "off"),
        ])))
        .mount(&server)
        .await;

    let resp = client.get_states().await.expect("get_states");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.payload.len(), 2);
    assert_eq!(resp.payload[0].entity_id, "light.kitchen");
    assert_eq!(resp.payload[0].domain(), "light");
}

#[tokio::test]
async fn get_state_fetches_a_single_entity() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/states/light.kitchen"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entity_json("light.kitchen", "on")))
        .mount(&server)
        .await;

    let resp = client.get_state("light.kitchen").await.expect("get_state");
    assert_eq!(resp.payload.state, "on");
    assert_eq!(resp.payload.friendly_name(), Some("Kitchen"));
}

#[tokio::test]
async fn get_state_rejects_empty_id_without_io() {
    let (_server, client) = setup().await;
    let err = client.get_state("").await.expect_err("empty id");
    assert!(matches!(err, Error::Configuration { .. }), "got {err:?}");
}

#[tokio::test]
async fn missing_entity_maps_to_api_error_with_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/states/light.gone"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Entity not found."})),
        )
        .mount(&server)
        .await;

    let err = client.get_state("light.gone").await.expect_err("404");
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Entity not found.");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

// ── Service calls ───────────────────────────────────────────────────

#[tokio::test]
async fn call_service_passes_bare_array_shape_through() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/services/light/toggle"))
        .and(body_json(json!({"entity_id": "light.kitchen"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([entity_json("light.kitchen", "on")])),
        )
        .mount(&server)
        .await;

    let resp = client
        .call_service("light", "toggle", "light.kitchen")
        .await
        .expect("call_service");

    assert!(matches!(resp.payload, ServiceCallResponse::Changed(_)));
    assert_eq!(resp.payload.changed_states().len(), 1);
    assert_eq!(resp.payload.changed_states()[0].state, "on");
}

#[tokio::test]
async fn call_service_passes_wrapped_shape_through() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/services/climate/toggle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "changed_states": [entity_json("climate.living", "heat")],
            "service_response": {"temperature": 21.5},
        })))
        .mount(&server)
        .await;

    let resp = client
        .call_service("climate", "toggle", "climate.living")
        .await
        .expect("call_service");

    assert_eq!(resp.payload.changed_states().len(), 1);
    assert_eq!(
        resp.payload.service_response(),
        Some(&json!({"temperature": 21.5}))
    );
}

// ── Failure modes ───────────────────────────────────────────────────

#[tokio::test]
async fn server_error_carries_the_observed_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/states"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.get_states().await.expect_err("500");
    assert_eq!(err.status(), Some(500));
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/states"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
        .mount(&server)
        .await;

    let err = client.get_states().await.expect_err("401");
    assert!(err.is_auth(), "got {err:?}");
}

#[tokio::test]
async fn garbage_body_on_success_is_a_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/states"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client.get_states().await.expect_err("garbage body");
    match err {
        Error::Deserialization { body, .. } => assert!(body.contains("not json")),
        other => panic!("expected Deserialization error, got {other:?}"),
    }
}

// ── Templates ───────────────────────────────────────────────────────

#[tokio::test]
async fn render_template_returns_plain_text() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/template"))
        .and(body_json(json!({"template": "{{ states('sun.sun') }}"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("above_horizon"))
        .mount(&server)
        .await;

    let resp = client
        .render_template("{{ states('sun.sun') }}")
        .await
        .expect("render_template");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.payload, "above_horizon");
}
