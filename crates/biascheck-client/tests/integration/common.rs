use biascheck_client::{HttpTransport, HttpTransportConfig};
use wiremock::MockServer;

pub const REPLY: &str = r#"{"left": 0.6, "center": 0.1, "right": 0.1}"#;

/// Transport whose three providers all point at `server`.
pub fn transport_for(server: &MockServer) -> HttpTransport {
    HttpTransport::with_config(HttpTransportConfig::default().with_base_url(&server.uri()))
        .unwrap()
}

pub fn article() -> String {
    "憲法改正をめぐる議論が国会で続いている。与党は早期の発議を目指す一方、野党は慎重な審議を求めている。"
        .repeat(4)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}
