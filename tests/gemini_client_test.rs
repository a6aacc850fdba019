#![cfg(feature = "gemini")]

use serde_json::json;
use shoot_caption::*;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new("test-key").with_base_url(format!("{}/v1beta", server.uri()))
}

#[tokio::test]
async fn test_complete_returns_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-flash-preview:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "{\"title\":" }, { "text": " \"Hi\"}" }] },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server)
        .complete("hello", DEFAULT_MODEL)
        .await
        .unwrap();

    assert_eq!(text, "{\"title\": \"Hi\"}");
}

#[tokio::test]
async fn test_api_error_includes_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("RESOURCE_EXHAUSTED"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete("hello", "gemini-3-flash-preview")
        .await
        .unwrap_err();

    match err {
        CaptionError::ProviderError { message } => {
            assert!(message.contains("429"));
            assert!(message.contains("RESOURCE_EXHAUSTED"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_no_candidates_yields_empty_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "promptFeedback": {} })))
        .mount(&server)
        .await;

    let text = client_for(&server).complete("hello", DEFAULT_MODEL).await.unwrap();
    assert_eq!(text, "");
}

#[tokio::test]
async fn test_pipeline_over_http() {
    let server = MockServer::start().await;
    let model_reply = "```json\n{\"slug_words\": [\"river\", \"ferry\"], \"title\": \"River Ferry\", \
        \"shortDescription\": \"commuters board the ferry.\", \
        \"longDescription\": \"The ferry runs every twenty minutes\", \
        \"keywords\": \"ferry; commuters; Ferry\"}\n```";
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": model_reply }] } }]
        })))
        .mount(&server)
        .await;

    let pipeline = CaptionPipeline::new(client_for(&server), PipelineConfig::default());
    let mut host = MemoryHost::new("Morning commuters on the river ferry.");

    let output = pipeline.run(&mut host, None).await.unwrap();

    assert_eq!(output.slug, "RiverFerry");
    assert!(output
        .caption
        .contains(": commuters board the ferry on {iptcmonthname} {day0}"));
    assert_eq!(output.keywords, "ferry, commuters");
    assert_eq!(host.active_note(), Some(output.to_string().as_str()));
}
