//! Tier selection.

use crate::advanced::AdvancedInsightsService;
use crate::baseline::BaselineInsightsService;
use crate::service::InsightsService;
use cuppa_core::InsightsConfig;
use cuppa_flavor::{FlavorExtractor, LanguageModel, OllamaTastingClient, VectorWordEmbedding, WordEmbedding};
use std::sync::Arc;
use tracing::{info, warn};

/// Builds the insights service for this session.
pub struct InsightsServiceFactory;

impl InsightsServiceFactory {
    /// Choose a tier.
    ///
    /// The advanced tier is used only when enabled in `config` and `model`
    /// reports itself available. Availability is checked once, here.
    pub async fn make_service(
        config: &InsightsConfig,
        embedding: Option<Arc<dyn WordEmbedding>>,
        model: Option<Arc<dyn LanguageModel>>,
    ) -> Arc<dyn InsightsService> {
        let mut extractor = FlavorExtractor::new().with_config(&config.embedding);
        if let Some(embedding) = embedding {
            extractor = extractor.with_embedding(embedding);
        }
        let baseline = BaselineInsightsService::new(extractor);

        let model = match model {
            Some(model) if config.advanced.enabled => model,
            _ => {
                info!("Using baseline insights tier");
                return Arc::new(baseline);
            }
        };

        if !model.is_available().await {
            warn!("Language model unavailable, using baseline insights tier");
            return Arc::new(baseline);
        }

        info!("Using advanced insights tier ({})", config.advanced.model);
        Arc::new(AdvancedInsightsService::new(
            model,
            baseline,
            config.advanced.timeout(),
        ))
    }

    /// Build the embedding and model client described by `config`, then
    /// choose a tier.
    pub async fn from_config(config: &InsightsConfig) -> Arc<dyn InsightsService> {
        let embedding = config.embedding.path.as_deref().and_then(|path| {
            match VectorWordEmbedding::load(path) {
                Ok(embedding) => {
                    info!("Loaded {} word vectors from {}", embedding.len(), path.display());
                    Some(Arc::new(embedding) as Arc<dyn WordEmbedding>)
                }
                Err(e) => {
                    warn!("Failed to load word vectors from {}: {}", path.display(), e);
                    None
                }
            }
        });

        let model = config
            .advanced
            .enabled
            .then(|| Arc::new(OllamaTastingClient::from_config(&config.advanced)) as Arc<dyn LanguageModel>);

        Self::make_service(config, embedding, model).await
    }
}
