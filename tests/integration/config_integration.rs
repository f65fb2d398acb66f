//! Configuration layering with isolated XDG directories.

use crate::integration::test_utils::{with_xdg_env, write_global_config};
use sitedraft::cli::RunContext;
use sitedraft::config::{ConfigLoader, ProviderType, WORKSPACE_CONFIG_FILE};
use tempfile::TempDir;

#[test]
fn defaults_apply_without_any_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let workspace = TempDir::new().unwrap();
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.provider.provider_type, ProviderType::Gemini);
        assert_eq!(config.provider.text_model, "gemini-3-flash-preview");
        assert_eq!(config.provider.image_model, "gemini-2.5-flash-image");
        assert_eq!(config.provider.request_timeout_secs, 120);
        assert_eq!(config.logging.output, "stderr");
    });
}

#[test]
fn layers_merge_in_precedence_order() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_global_config(
            &test_dir,
            r#"
[provider]
provider_type = "openai"
request_timeout_secs = 60

[logging]
level = "warn"
"#,
        );

        let workspace = TempDir::new().unwrap();
        std::fs::write(
            workspace.path().join(WORKSPACE_CONFIG_FILE),
            r#"
[provider]
image_model = "gpt-image-1"
request_timeout_secs = 90
"#,
        )
        .unwrap();

        std::env::set_var("SITEDRAFT__LOGGING__LEVEL", "trace");
        let config = ConfigLoader::load(workspace.path());
        std::env::remove_var("SITEDRAFT__LOGGING__LEVEL");
        let config = config.unwrap();

        assert_eq!(config.provider.provider_type, ProviderType::OpenAI);
        // Unset model follows the provider type chosen in the global file.
        assert_eq!(config.provider.text_model, "gpt-4o-mini");
        assert_eq!(config.provider.image_model, "gpt-image-1");
        assert_eq!(config.provider.request_timeout_secs, 90);
        assert_eq!(config.logging.level, "trace");
    });
}

#[test]
fn explicit_config_file_replaces_file_layers() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_global_config(&test_dir, "[provider]\ntext_model = \"from-global\"\n");

        let workspace = TempDir::new().unwrap();
        std::fs::write(
            workspace.path().join(WORKSPACE_CONFIG_FILE),
            "[provider]\nimage_model = \"from-workspace\"\n",
        )
        .unwrap();
        let explicit = workspace.path().join("explicit.toml");
        std::fs::write(&explicit, "[provider]\nendpoint = \"http://127.0.0.1:9/v1beta\"\n")
            .unwrap();

        let context =
            RunContext::new(workspace.path().to_path_buf(), Some(explicit.clone())).unwrap();
        let provider = &context.config().provider;
        assert_eq!(provider.text_model, "gemini-3-flash-preview");
        assert_eq!(provider.image_model, "gemini-2.5-flash-image");
        assert_eq!(provider.resolved_endpoint(), "http://127.0.0.1:9/v1beta");
    });
}

#[test]
fn malformed_workspace_file_is_a_config_error() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let workspace = TempDir::new().unwrap();
        std::fs::write(
            workspace.path().join(WORKSPACE_CONFIG_FILE),
            "[provider]\nrequest_timeout_secs = \"soon\"\n",
        )
        .unwrap();

        let err = ConfigLoader::load(workspace.path()).unwrap_err();
        assert!(matches!(err, sitedraft::error::ApiError::ConfigError(_)));
    });
}

#[test]
fn init_template_loads_back_to_defaults() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let workspace = TempDir::new().unwrap();
        let path = ConfigLoader::write_workspace_template(workspace.path(), false).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("[provider]"));
        assert!(body.contains("[logging]"));
        assert!(!body.contains("api_key"));

        let loaded = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(loaded, sitedraft::config::SiteDraftConfig::default());
    });
}
