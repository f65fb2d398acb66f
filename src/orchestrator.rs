//! Generation Orchestrator
//!
//! Drives one generation through its two stages and publishes every state
//! transition on a watch channel. The orchestrator is the only writer of
//! [`GeneratedAsset`]; any number of observers may subscribe.
//!
//! Stage one (text) is fatal on failure. Stage two (image) is best effort: a
//! failure is logged and replaced with [`HeroImage::Placeholder`], and the
//! generation still succeeds. Neither stage is retried.
//!
//! While a generation is in flight, further calls are rejected with
//! [`ApiError::GenerationInProgress`] and leave the running one untouched.

use crate::asset::{GeneratedAsset, HeroImage};
use crate::draft::GenerationRequest;
use crate::error::ApiError;
use crate::provider::{
    ImageGenerationProvider, ProviderClients, ProviderConfig, ProviderFactory,
    TextGenerationProvider,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Error recorded when a generation is dropped before the text stage resolves.
pub const CANCELLED_MESSAGE: &str = "Generation was cancelled.";

pub struct GenerationOrchestrator {
    text: Arc<dyn TextGenerationProvider>,
    image: Arc<dyn ImageGenerationProvider>,
    state: watch::Sender<GeneratedAsset>,
    in_flight: AtomicBool,
}

impl GenerationOrchestrator {
    pub fn new(
        text: Arc<dyn TextGenerationProvider>,
        image: Arc<dyn ImageGenerationProvider>,
    ) -> Self {
        let (state, _) = watch::channel(GeneratedAsset::Idle);
        Self {
            text,
            image,
            state,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn from_clients(clients: ProviderClients) -> Self {
        Self::new(clients.text, clients.image)
    }

    /// Build both provider clients from configuration.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ApiError> {
        Ok(Self::from_clients(ProviderFactory::create(config)?))
    }

    /// Receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<GeneratedAsset> {
        self.state.subscribe()
    }

    /// Current state.
    pub fn snapshot(&self) -> GeneratedAsset {
        self.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run both stages for `prompt` and return the terminal state.
    ///
    /// `Err` is only returned at the boundary (empty prompt, generation already
    /// running) and in that case state is not touched. Provider failures are
    /// reported through the returned [`GeneratedAsset`].
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedAsset, ApiError> {
        let request = GenerationRequest::new(prompt)?;
        let _guard = InFlightGuard::acquire(&self.in_flight, &self.state)?;

        info!(
            prompt_len = request.prompt().len(),
            text_provider = self.text.provider_name(),
            image_provider = self.image.provider_name(),
            "Starting website generation"
        );
        self.publish(GeneratedAsset::LoadingText);

        let draft = match self.text.generate_draft(&request).await {
            Ok(draft) => draft,
            Err(err) => {
                error!(
                    provider = self.text.provider_name(),
                    model = self.text.model_name(),
                    error = %err,
                    "Text generation failed"
                );
                let failed = GeneratedAsset::Failed {
                    error: err.user_message(),
                };
                self.publish(failed.clone());
                return Ok(failed);
            }
        };

        info!(
            business_name = %draft.business_name,
            sections = draft.sections.len(),
            "Website draft generated"
        );
        self.publish(GeneratedAsset::LoadingImage {
            draft: draft.clone(),
        });

        let hero_image = match self.image.generate_image(&draft.image_prompt).await {
            Ok(image) => {
                info!(model = self.image.model_name(), "Hero image generated");
                image
            }
            Err(err) => {
                warn!(
                    provider = self.image.provider_name(),
                    model = self.image.model_name(),
                    error = %err,
                    "Image generation failed, using placeholder"
                );
                HeroImage::Placeholder
            }
        };

        let success = GeneratedAsset::Success { draft, hero_image };
        self.publish(success.clone());
        Ok(success)
    }

    fn publish(&self, asset: GeneratedAsset) {
        debug!(phase = asset.phase().as_str(), "Publishing generation state");
        self.state.send_replace(asset);
    }
}

/// Holds the in-flight flag for one generation.
///
/// On drop it clears the flag and, if the generation never reached a terminal
/// state (the future was dropped), settles the state so nothing stays loading.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
    state: &'a watch::Sender<GeneratedAsset>,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(
        flag: &'a AtomicBool,
        state: &'a watch::Sender<GeneratedAsset>,
    ) -> Result<Self, ApiError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ApiError::GenerationInProgress)?;
        Ok(Self { flag, state })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|asset| {
            let settled = match std::mem::take(asset) {
                GeneratedAsset::LoadingText => GeneratedAsset::Failed {
                    error: CANCELLED_MESSAGE.to_string(),
                },
                GeneratedAsset::LoadingImage { draft } => GeneratedAsset::Success {
                    draft,
                    hero_image: HeroImage::Placeholder,
                },
                terminal => {
                    *asset = terminal;
                    return false;
                }
            };
            warn!(phase = settled.phase().as_str(), "Generation dropped before completion");
            *asset = settled;
            true
        });
        self.flag.store(false, Ordering::Release);
    }
}
