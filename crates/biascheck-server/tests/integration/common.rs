use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use biascheck_client::{HttpTransport, HttpTransportConfig, SelectorExtractor};
use biascheck_core::{PageAnalyzer, ProviderConfig};
use biascheck_server::routes;
use biascheck_server::state::AppState;

pub const TEST_TOKEN: &str = "test-secret-token";

/// App state whose providers all point at `server`.
pub fn state_for(server: &MockServer, config: ProviderConfig) -> AppState {
    let transport = HttpTransport::with_config(
        HttpTransportConfig::default().with_base_url(&server.uri()),
    )
    .unwrap();
    AppState::new(
        PageAnalyzer::new(SelectorExtractor::new().unwrap(), transport),
        config,
    )
}

pub fn app(state: AppState) -> Router {
    routes::router(Arc::new(state))
}

pub fn article() -> String {
    "防衛費の増額を巡り、政府と野党の間で財源の在り方について激しい議論が続いている。"
        .repeat(3)
}

/// HTML page with three article paragraphs inside a known body container.
pub fn article_page() -> String {
    let paragraphs: String = (0..3).map(|_| format!("<p>{}</p>", article())).collect();
    format!(r#"<html><body><div class="article-body">{paragraphs}</div></body></html>"#)
}

pub async fn mount_openai_reply(server: &MockServer, reply: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": reply}}]
        })))
        .mount(server)
        .await;
}

/// Fails the test if any provider request is made.
pub async fn forbid_provider_calls(server: &MockServer) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::put(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn assert_close(value: &Value, expected: f64) {
    let actual = value.as_f64().unwrap();
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}
