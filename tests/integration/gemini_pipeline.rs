//! End-to-end pipeline against a mocked Gemini endpoint.

use crate::integration::test_utils::bean_and_soul;
use serde_json::{json, Value};
use sitedraft::asset::{GeneratedAsset, FALLBACK_HERO_IMAGE_URL};
use sitedraft::orchestrator::GenerationOrchestrator;
use sitedraft::provider::ProviderConfig;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEXT_PATH: &str = "/models/gemini-3-flash-preview:generateContent";
const IMAGE_PATH: &str = "/models/gemini-2.5-flash-image:generateContent";

fn config_for(server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        api_key: Some("integration-key".to_string()),
        endpoint: Some(server.uri()),
        ..ProviderConfig::default()
    }
}

fn draft_reply() -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": serde_json::to_string(&bean_and_soul()).unwrap() }]
            },
            "finishReason": "STOP"
        }]
    })
}

async fn mount_draft(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(header("x-goog-api-key", "integration-key"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{
                "text": "Generate a professional website concept for: A luxury coffee brand called 'Bean & Soul'. Focus on modern SaaS/Business aesthetics."
            }]}],
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(draft_reply()))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn both_stages_succeed_against_gemini() {
    let server = MockServer::start().await;
    mount_draft(&server).await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{
                "text": "High quality, 4k resolution, modern minimalist photography for a website hero section. Subject: Dark moody espresso bar, brass fittings, morning light"
            }]}],
            "generationConfig": {
                "responseModalities": ["IMAGE"],
                "imageConfig": { "aspectRatio": "16:9" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "Here is your hero image." },
                    { "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" } }
                ]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = GenerationOrchestrator::from_config(&config_for(&server)).unwrap();
    let asset = orchestrator
        .generate("  A luxury coffee brand called 'Bean & Soul'  ")
        .await
        .unwrap();

    match asset {
        GeneratedAsset::Success { draft, hero_image } => {
            assert_eq!(draft, bean_and_soul());
            assert_eq!(hero_image.src(), "data:image/png;base64,iVBORw0KGgo=");
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn image_server_error_falls_back_to_placeholder() {
    let server = MockServer::start().await;
    mount_draft(&server).await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 500, "message": "Internal error encountered.", "status": "INTERNAL" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = GenerationOrchestrator::from_config(&config_for(&server)).unwrap();
    let asset = orchestrator
        .generate("A luxury coffee brand called 'Bean & Soul'")
        .await
        .unwrap();

    assert_eq!(asset.draft().unwrap().business_name, "Bean & Soul");
    assert_eq!(asset.hero_image().unwrap().src(), FALLBACK_HERO_IMAGE_URL);
    assert!(asset.error().is_none());
}

#[tokio::test]
async fn image_reply_without_image_part_falls_back_to_placeholder() {
    let server = MockServer::start().await;
    mount_draft(&server).await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "I can't draw that." }] } }]
        })))
        .mount(&server)
        .await;

    let orchestrator = GenerationOrchestrator::from_config(&config_for(&server)).unwrap();
    let asset = orchestrator
        .generate("A luxury coffee brand called 'Bean & Soul'")
        .await
        .unwrap();
    assert!(asset.hero_image().unwrap().is_placeholder());
}

#[tokio::test]
async fn malformed_draft_fails_without_calling_image_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"businessName\": \"Bean & Soul\"}" }] } }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = GenerationOrchestrator::from_config(&config_for(&server)).unwrap();
    let asset = orchestrator.generate("coffee").await.unwrap();

    assert!(asset.error().is_some());
    assert!(asset.draft().is_none());
    assert!(!asset.is_loading());
}

#[tokio::test]
async fn invalid_key_surfaces_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let orchestrator = GenerationOrchestrator::from_config(&config_for(&server)).unwrap();
    let asset = orchestrator.generate("coffee").await.unwrap();
    assert_eq!(
        asset.error(),
        Some("API key not valid. Please pass a valid API key.")
    );
}
