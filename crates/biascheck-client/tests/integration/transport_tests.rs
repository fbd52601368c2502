use std::time::Duration;

use biascheck_client::{HttpTransport, HttpTransportConfig, SelectorExtractor};
use biascheck_core::models::Provider;
use biascheck_core::traits::Transport;
use biascheck_core::{BiasError, Classifier, PageAnalyzer, PageOutcome, ProviderConfig};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::common::{REPLY, article, assert_close, transport_for};

// ---------------------------------------------------------------------------
// OpenAI
// ---------------------------------------------------------------------------

#[tokio::test]
async fn openai_request_shape_and_reply_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.0,
            "max_tokens": 100
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": format!("  {REPLY}\n")}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = transport_for(&server)
        .complete(Provider::OpenAi, "sk-test", "prompt")
        .await
        .unwrap();

    assert_eq!(reply, REPLY);
}

#[tokio::test]
async fn openai_error_uses_embedded_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Incorrect API key provided: sk-bad",
                "type": "invalid_request_error"
            }
        })))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .complete(Provider::OpenAi, "sk-bad", "prompt")
        .await
        .unwrap_err();

    match err {
        BiasError::TransportFailure { status, message } => {
            assert_eq!(status, Some(401));
            assert_eq!(message, "Incorrect API key provided: sk-bad");
        }
        other => panic!("expected TransportFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn openai_error_without_body_uses_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .complete(Provider::OpenAi, "sk-test", "prompt")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "OpenAI API error: 502");
    assert_eq!(err.status_code(), Some(502));
}

#[tokio::test]
async fn openai_empty_choices_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .complete(Provider::OpenAi, "sk-test", "prompt")
        .await
        .unwrap_err();

    assert!(matches!(err, BiasError::MalformedReply(ref p) if p == "OpenAI"));
}

#[tokio::test]
async fn slow_provider_hits_transport_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"choices": [{"message": {"content": REPLY}}]}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = HttpTransportConfig::default()
        .with_base_url(&server.uri())
        .with_timeout(Duration::from_millis(200));
    let transport = HttpTransport::with_config(config).unwrap();

    let err = transport
        .complete(Provider::OpenAi, "sk-test", "prompt")
        .await
        .unwrap_err();

    assert!(matches!(err, BiasError::Timeout(_)));
}

// ---------------------------------------------------------------------------
// Gemini
// ---------------------------------------------------------------------------

#[tokio::test]
async fn gemini_request_shape_and_reply_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(query_param("key", "g-key"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "prompt"}]}],
            "generationConfig": {"temperature": 0.0, "maxOutputTokens": 100}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": REPLY}], "role": "model"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = transport_for(&server)
        .complete(Provider::Gemini, "g-key", "prompt")
        .await
        .unwrap();

    assert_eq!(reply, REPLY);
}

#[tokio::test]
async fn gemini_missing_parts_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        })))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .complete(Provider::Gemini, "g-key", "prompt")
        .await
        .unwrap_err();

    assert!(matches!(err, BiasError::MalformedReply(ref p) if p == "Gemini"));
}

#[tokio::test]
async fn gemini_error_uses_embedded_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
        })))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .complete(Provider::Gemini, "bad", "prompt")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "API key not valid.");
    assert_eq!(err.status_code(), Some(400));
}

// ---------------------------------------------------------------------------
// Claude
// ---------------------------------------------------------------------------

#[tokio::test]
async fn claude_request_shape_and_reply_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("x-api-key", "sk-ant"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-3-5-haiku-20241022",
            "max_tokens": 100,
            "messages": [{"role": "user", "content": "prompt"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": REPLY}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = transport_for(&server)
        .complete(Provider::Claude, "sk-ant", "prompt")
        .await
        .unwrap();

    assert_eq!(reply, REPLY);
}

#[tokio::test]
async fn claude_empty_content_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .complete(Provider::Claude, "sk-ant", "prompt")
        .await
        .unwrap_err();

    assert!(matches!(err, BiasError::MalformedReply(ref p) if p == "Claude"));
}

#[tokio::test]
async fn claude_overloaded_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_json(json!({
            "type": "error",
            "error": {"type": "overloaded_error", "message": "Overloaded"}
        })))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .complete(Provider::Claude, "sk-ant", "prompt")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Overloaded");
    assert_eq!(err.status_code(), Some(529));
}

// ---------------------------------------------------------------------------
// End to end through the classifier
// ---------------------------------------------------------------------------

#[tokio::test]
async fn classifier_normalizes_provider_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": format!("分析結果: {REPLY}")}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = Classifier::new(transport_for(&server));
    let config = ProviderConfig::single(Provider::Claude, "sk-ant");

    let dist = classifier.classify(&article(), &config).await.unwrap();

    assert_close(dist.left, 0.75);
    assert_close(dist.center, 0.125);
    assert_close(dist.right, 0.125);
}

#[tokio::test]
async fn classifier_precondition_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let classifier = Classifier::new(transport_for(&server));
    let config = ProviderConfig::single(Provider::OpenAi, "sk-test");

    let err = classifier.classify("短い", &config).await.unwrap_err();

    assert!(matches!(err, BiasError::ShortInput { .. }));
}

#[tokio::test]
async fn page_analyzer_extracts_and_scores() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": r#"{"left": 0.1, "center": 0.2, "right": 0.7}"#}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let paragraphs: String = (0..4).map(|_| format!("<p>{}</p>", article())).collect();
    let html = format!(
        r#"<html><body><nav><p>ランキング</p></nav>
        <div class="article-body">{paragraphs}</div></body></html>"#
    );

    let analyzer = PageAnalyzer::new(SelectorExtractor::new()?, transport_for(&server));
    let config = ProviderConfig::single(Provider::OpenAi, "sk-test");

    let outcome = analyzer
        .analyze(&html, "https://news.example.jp/politics/1", &config)
        .await?;

    match outcome {
        PageOutcome::Scored(record) => {
            assert_eq!(record.url, "https://news.example.jp/politics/1");
            assert_close(record.distribution.right, 0.7);
        }
        other => panic!("expected Scored, got {other:?}"),
    }
    Ok(())
}
