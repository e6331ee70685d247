mod harness;

use harness::config::TEST_KEY;
use harness::mock_provider::{MockProvider, canned_audio, canned_error};
use harness::server::TestServer;
use serde_json::json;
use voxgate_config::ProviderKey;

const SPEAK: &str = "/tools/text-to-speech";

async fn server_for(mock: &MockProvider) -> TestServer {
    let base = mock.base_url();
    TestServer::start_with(|config| config.with_mock_providers(&base)).await.unwrap()
}

#[tokio::test]
async fn playht_request_is_wrapped_in_envelope() {
    let mock = MockProvider::start().await.unwrap();
    let server = server_for(&mock).await;

    let (status, body) = server
        .post_json(SPEAK, &json!({ "provider": "playht", "text": "hello", "voice": "v1" }))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "ok": true, "provider": "playht", "raw": canned_audio() }));

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].provider, "playht");
    assert_eq!(requests[0].authorization.as_deref(), Some(format!("Bearer {TEST_KEY}").as_str()));
    assert_eq!(requests[0].body, json!({ "voice": "v1", "content": "hello" }));
}

#[tokio::test]
async fn each_provider_gets_its_own_body_and_auth() {
    let mock = MockProvider::start().await.unwrap();
    let server = server_for(&mock).await;

    for provider in ["uberduck", "resemble", "anyvoice", "fishaudio"] {
        let (status, body) = server
            .post_json(SPEAK, &json!({ "provider": provider, "text": "hi", "voice_id": "v2" }))
            .await;

        assert_eq!(status, 200, "{provider}: {body}");
        assert_eq!(body["provider"], provider);
    }

    let requests = mock.requests();
    assert_eq!(requests.len(), 4);

    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Basic dGVzdC1rZXk6dGVzdC1zZWNyZXQ=")
    );
    assert_eq!(requests[0].body, json!({ "voice": "v2", "speech": "hi" }));

    assert_eq!(
        requests[1].authorization.as_deref(),
        Some(format!("Token token={TEST_KEY}").as_str())
    );
    assert_eq!(requests[1].body, json!({ "audio": { "voice": "v2", "text": "hi" } }));

    for request in &requests[2..] {
        assert_eq!(request.authorization.as_deref(), Some(format!("Bearer {TEST_KEY}").as_str()));
        assert_eq!(request.body, json!({ "voice_id": "v2", "text": "hi" }));
    }
}

#[tokio::test]
async fn provider_key_is_case_insensitive() {
    let mock = MockProvider::start().await.unwrap();
    let server = server_for(&mock).await;

    let (status, body) = server.post_json(SPEAK, &json!({ "provider": "PlayHT", "text": "hi" })).await;

    assert_eq!(status, 200);
    assert_eq!(body["provider"], "playht");
    assert_eq!(mock.requests()[0].body, json!({ "content": "hi" }));
}

#[tokio::test]
async fn missing_fields_are_rejected_without_outbound_call() {
    let mock = MockProvider::start().await.unwrap();
    let server = server_for(&mock).await;

    for body in [json!({ "text": "hi" }), json!({ "provider": "playht" }), json!({})] {
        let (status, response) = server.post_json(SPEAK, &body).await;

        assert_eq!(status, 400);
        assert_eq!(response, json!({ "error": "provider and text are required" }));
    }

    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn unknown_provider_is_rejected() {
    let mock = MockProvider::start().await.unwrap();
    let server = server_for(&mock).await;

    let (status, body) = server
        .post_json(SPEAK, &json!({ "provider": "nonexistent", "text": "hi" }))
        .await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "provider not supported" }));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn provider_failure_surfaces_raw_payload() {
    let mock = MockProvider::start_failing().await.unwrap();
    let server = server_for(&mock).await;

    let (status, body) = server.post_json(SPEAK, &json!({ "provider": "fishaudio", "text": "hi" })).await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": canned_error() }));
}

#[tokio::test]
async fn query_speech_uses_default_provider() {
    let mock = MockProvider::start().await.unwrap();
    let base = mock.base_url();
    let server = TestServer::start_with(|config| {
        config
            .with_mock_providers(&base)
            .with_default_provider(ProviderKey::Anyvoice)
    })
    .await
    .unwrap();

    let (status, body) = server.get_json("/api/tts", &[("text", "hola")]).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "audio": canned_audio() }));
    assert_eq!(mock.requests()[0].provider, "anyvoice");

    let (status, body) = server.get_json("/api/tts", &[]).await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "text is required" }));
}
