//! Orchestrator lifecycle with scripted providers: state sequence, fallback, re-generation.

use crate::integration::test_utils::{bean_and_soul, ScriptedImage, ScriptedText};
use sitedraft::asset::{GeneratedAsset, HeroImage, Phase, FALLBACK_HERO_IMAGE_URL};
use sitedraft::error::{ApiError, GENERIC_FAILURE_MESSAGE};
use sitedraft::orchestrator::GenerationOrchestrator;
use std::sync::Arc;

fn orchestrator(
    text: Arc<ScriptedText>,
    image: Arc<ScriptedImage>,
) -> GenerationOrchestrator {
    GenerationOrchestrator::new(text, image)
}

#[tokio::test]
async fn bean_and_soul_generates_copy_and_image() {
    let text = Arc::new(ScriptedText::new(vec![Ok(bean_and_soul())]));
    let image = Arc::new(ScriptedImage::new(vec![Ok(HeroImage::from_base64_png(
        "iVBORw0KGgo=",
    ))]));
    let orchestrator = orchestrator(text.clone(), image.clone());

    let asset = orchestrator
        .generate("A luxury coffee brand called 'Bean & Soul'")
        .await
        .unwrap();

    let draft = asset.draft().unwrap();
    assert_eq!(draft.business_name, "Bean & Soul");
    assert_eq!(draft.sections.len(), 2);
    assert_eq!(draft.sections[0].features, vec!["Ethiopia Guji", "Colombia Huila"]);
    assert_eq!(
        asset.hero_image().unwrap().src(),
        "data:image/png;base64,iVBORw0KGgo="
    );
    assert!(!asset.is_loading());
    assert!(asset.error().is_none());

    assert_eq!(
        text.prompts.lock().unwrap().as_slice(),
        ["A luxury coffee brand called 'Bean & Soul'"]
    );
    assert_eq!(
        image.prompts.lock().unwrap().as_slice(),
        [bean_and_soul().image_prompt]
    );
    assert_eq!(orchestrator.snapshot(), asset);
}

#[tokio::test]
async fn image_failure_keeps_draft_and_uses_placeholder() {
    let text = Arc::new(ScriptedText::new(vec![Ok(bean_and_soul())]));
    let image = Arc::new(ScriptedImage::new(vec![Err(ApiError::ProviderRateLimit(
        "Resource has been exhausted".to_string(),
    ))]));
    let orchestrator = orchestrator(text, image);

    let asset = orchestrator.generate("coffee roastery").await.unwrap();

    assert_eq!(asset.phase(), Phase::Success);
    assert_eq!(asset.draft().unwrap(), &bean_and_soul());
    assert_eq!(asset.hero_image().unwrap().src(), FALLBACK_HERO_IMAGE_URL);
    assert!(asset.error().is_none());
}

#[tokio::test]
async fn text_failure_reports_message_and_skips_image_stage() {
    let text = Arc::new(ScriptedText::new(vec![Err(ApiError::ProviderAuthFailed(
        "API key not valid. Please pass a valid API key.".to_string(),
    ))]));
    let image = Arc::new(ScriptedImage::new(vec![]));
    let orchestrator = orchestrator(text, image.clone());

    let asset = orchestrator.generate("coffee roastery").await.unwrap();

    assert_eq!(
        asset.error(),
        Some("API key not valid. Please pass a valid API key.")
    );
    assert!(asset.draft().is_none());
    assert!(asset.hero_image().is_none());
    assert_eq!(image.calls(), 0);
}

#[tokio::test]
async fn messageless_text_failure_uses_generic_message() {
    let text = Arc::new(ScriptedText::new(vec![Err(ApiError::ProviderError(
        String::new(),
    ))]));
    let orchestrator = orchestrator(text, Arc::new(ScriptedImage::new(vec![])));

    let asset = orchestrator.generate("coffee roastery").await.unwrap();
    assert_eq!(asset.error(), Some(GENERIC_FAILURE_MESSAGE));
}

#[tokio::test]
async fn empty_prompt_never_reaches_providers() {
    let text = Arc::new(ScriptedText::new(vec![Ok(bean_and_soul())]));
    let image = Arc::new(ScriptedImage::new(vec![]));
    let orchestrator = orchestrator(text.clone(), image.clone());

    let err = orchestrator.generate(" \n\t ").await.unwrap_err();
    assert!(matches!(err, ApiError::EmptyPrompt));
    assert_eq!(orchestrator.snapshot(), GeneratedAsset::Idle);
    assert!(text.prompts.lock().unwrap().is_empty());
    assert_eq!(image.calls(), 0);
}

#[tokio::test]
async fn regeneration_after_failure_leaves_no_residue() {
    let text = Arc::new(ScriptedText::new(vec![
        Err(ApiError::ProviderRequestFailed("upstream timeout".to_string())),
        Ok(bean_and_soul()),
    ]));
    let image = Arc::new(ScriptedImage::new(vec![Ok(HeroImage::Url(
        "https://cdn.example/hero.png".to_string(),
    ))]));
    let orchestrator = orchestrator(text, image);

    let first = orchestrator.generate("coffee roastery").await.unwrap();
    assert_eq!(first.error(), Some("upstream timeout"));

    let mut updates = orchestrator.subscribe();
    let second = orchestrator.generate("coffee roastery").await.unwrap();
    assert!(second.error().is_none());
    assert_eq!(
        second.hero_image(),
        Some(&HeroImage::Url("https://cdn.example/hero.png".to_string()))
    );
    assert!(updates.has_changed().unwrap());
    assert_eq!(*updates.borrow_and_update(), second);
}

#[tokio::test]
async fn regeneration_after_success_replaces_previous_result() {
    let mut renamed = bean_and_soul();
    renamed.business_name = "Leaf & Loaf".to_string();
    let text = Arc::new(ScriptedText::new(vec![
        Ok(bean_and_soul()),
        Err(ApiError::ProviderModelNotFound("models/gone".to_string())),
        Ok(renamed.clone()),
    ]));
    let image = Arc::new(ScriptedImage::new(vec![
        Ok(HeroImage::Url("https://cdn.example/one.png".to_string())),
        Err(ApiError::ImageMissing("Failed to generate image".to_string())),
    ]));
    let orchestrator = orchestrator(text, image);

    assert!(orchestrator.generate("first").await.unwrap().hero_image().is_some());

    let failed = orchestrator.generate("second").await.unwrap();
    assert!(failed.draft().is_none());
    assert!(failed.hero_image().is_none());

    let third = orchestrator.generate("third").await.unwrap();
    assert_eq!(third.draft().unwrap().business_name, "Leaf & Loaf");
    assert!(third.hero_image().unwrap().is_placeholder());
    assert!(third.error().is_none());
}
