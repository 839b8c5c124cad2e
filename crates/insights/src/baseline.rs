//! Baseline tier: lexical and embedding flavor matching.

use crate::service::{InsightsService, InsightsTier};
use async_trait::async_trait;
use cuppa_analysis::{PatternAnalyzer, SuggestionEngine};
use cuppa_core::{BrewMethod, BrewPattern, BrewRecord, BrewSuggestion, CoffeeBean, ExtractedFlavor};
use cuppa_flavor::FlavorExtractor;
use std::sync::Arc;
use tracing::{debug, warn};

/// Always-available insights service.
pub struct BaselineInsightsService {
    extractor: Arc<FlavorExtractor>,
    analyzer: PatternAnalyzer,
    engine: SuggestionEngine,
}

impl BaselineInsightsService {
    /// Create a service around an extractor.
    pub fn new(extractor: FlavorExtractor) -> Self {
        Self {
            extractor: Arc::new(extractor),
            analyzer: PatternAnalyzer::new(),
            engine: SuggestionEngine::new(),
        }
    }
}

impl Default for BaselineInsightsService {
    fn default() -> Self {
        Self::new(FlavorExtractor::new())
    }
}

#[async_trait]
impl InsightsService for BaselineInsightsService {
    fn tier(&self) -> InsightsTier {
        InsightsTier::Baseline
    }

    async fn extract_flavors(&self, text: &str) -> Vec<ExtractedFlavor> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let extractor = Arc::clone(&self.extractor);
        let text = text.to_string();
        match tokio::task::spawn_blocking(move || extractor.extract(&text)).await {
            Ok(flavors) => {
                debug!("Baseline extraction found {} flavors", flavors.len());
                flavors
            }
            Err(e) => {
                warn!("Flavor extraction task failed: {}", e);
                Vec::new()
            }
        }
    }

    fn analyze_patterns(&self, history: &[BrewRecord]) -> Vec<BrewPattern> {
        self.analyzer.analyze_patterns(history)
    }

    fn suggest_parameters(
        &self,
        bean: &CoffeeBean,
        method: &BrewMethod,
        history: &[BrewRecord],
    ) -> Option<BrewSuggestion> {
        self.engine.suggest(bean, method, history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuppa_core::{BeanId, ExtractionSource, MethodCategory, MethodId};

    #[tokio::test]
    async fn test_extract_flavors() {
        let service = BaselineInsightsService::default();
        let flavors = service.extract_flavors("Bright lemon with a honey finish").await;

        let ids: Vec<&str> = flavors.iter().map(|f| f.id.as_str()).collect();
        assert!(ids.contains(&"fruity.citrus.lemon"));
        assert!(ids.contains(&"sweet.brown-sugar.honey"));
        assert!(flavors.iter().all(|f| f.source == ExtractionSource::LexicalMatch));
    }

    #[tokio::test]
    async fn test_blank_text_yields_nothing() {
        let service = BaselineInsightsService::default();
        assert!(service.extract_flavors("").await.is_empty());
        assert!(service.extract_flavors("   \n\t").await.is_empty());
    }

    #[tokio::test]
    async fn test_extraction_is_repeatable() {
        let service = BaselineInsightsService::default();
        let text = "dark chocolate tasting notes, some cherry";
        assert_eq!(
            service.extract_flavors(text).await,
            service.extract_flavors(text).await
        );
    }

    #[test]
    fn test_empty_history() {
        let service = BaselineInsightsService::default();
        let bean = CoffeeBean::new(BeanId::new(), "Kenya");
        let method = BrewMethod::new(MethodId::new(), "Aeropress", MethodCategory::Immersion);

        assert_eq!(service.tier(), InsightsTier::Baseline);
        assert!(service.analyze_patterns(&[]).is_empty());
        assert!(service.suggest_parameters(&bean, &method, &[]).is_none());
    }
}
