//! `sitedraft generate` through the route table against a mocked Gemini endpoint.

use crate::integration::test_utils::{bean_and_soul, with_xdg_env};
use serde_json::json;
use sitedraft::cli::{Commands, RunContext};
use sitedraft::error::ApiError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Starts a mock server on its own runtime; the route table builds its own.
fn start_server(draft_status: u16) -> (tokio::runtime::Runtime, MockServer) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        let draft_body = json!({
            "candidates": [{ "content": { "parts": [{
                "text": serde_json::to_string(&bean_and_soul()).unwrap()
            }]}}]
        });
        let draft_response = if draft_status == 200 {
            ResponseTemplate::new(200).set_body_json(draft_body)
        } else {
            ResponseTemplate::new(draft_status).set_body_json(json!({
                "error": { "message": "Quota exceeded for this project." }
            }))
        };
        Mock::given(method("POST"))
            .and(path("/models/gemini-3-flash-preview:generateContent"))
            .respond_with(draft_response)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash-image:generateContent"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        server
    });
    (runtime, server)
}

fn context_for(workspace: &TempDir, server: &MockServer) -> RunContext {
    let config_file = workspace.path().join("mock.toml");
    std::fs::write(
        &config_file,
        format!(
            "[provider]\napi_key = \"cli-key\"\nendpoint = \"{}\"\n",
            server.uri()
        ),
    )
    .unwrap();
    RunContext::new(workspace.path().to_path_buf(), Some(config_file)).unwrap()
}

fn generate(prompt: &str, format: &str, output: Option<std::path::PathBuf>) -> Commands {
    Commands::Generate {
        prompt: prompt.split_whitespace().map(str::to_string).collect(),
        format: format.to_string(),
        output,
    }
}

#[test]
fn generate_json_reports_placeholder_when_image_fails() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let (_runtime, server) = start_server(200);
        let workspace = TempDir::new().unwrap();
        let context = context_for(&workspace, &server);

        let out = context
            .execute(&generate("A luxury coffee brand called 'Bean & Soul'", "json", None))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["state"], "success");
        assert_eq!(value["draft"]["businessName"], "Bean & Soul");
        assert_eq!(value["heroImage"]["kind"], "placeholder");
        assert_eq!(value["heroImage"]["src"], "https://picsum.photos/1200/800");
    });
}

#[test]
fn generate_writes_output_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let (_runtime, server) = start_server(200);
        let workspace = TempDir::new().unwrap();
        let context = context_for(&workspace, &server);
        let output = workspace.path().join("draft.txt");

        let out = context
            .execute(&generate("coffee roastery", "text", Some(output.clone())))
            .unwrap();
        assert!(out.starts_with("Wrote draft to "));
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("Bean & Soul\n"));
        assert!(!written.contains("\u{1b}["));
    });
}

#[test]
fn failed_generation_is_an_error_exit() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let (_runtime, server) = start_server(429);
        let workspace = TempDir::new().unwrap();
        let context = context_for(&workspace, &server);

        match context.execute(&generate("coffee roastery", "text", None)) {
            Err(ApiError::GenerationFailed(msg)) => {
                assert_eq!(msg, "Quota exceeded for this project.")
            }
            other => panic!("expected failed generation, got {other:?}"),
        }
    });
}

#[test]
fn missing_api_key_is_reported_before_any_request() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let saved: Vec<_> = ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .map(|name| (*name, std::env::var(name).ok()))
            .collect();
        for (name, _) in &saved {
            std::env::remove_var(name);
        }

        let workspace = TempDir::new().unwrap();
        let context = RunContext::new(workspace.path().to_path_buf(), None).unwrap();
        let result = context.execute(&generate("coffee roastery", "text", None));

        for (name, value) in saved {
            if let Some(value) = value {
                std::env::set_var(name, value);
            }
        }
        assert!(matches!(result, Err(ApiError::ProviderNotConfigured(_))));
    });
}
