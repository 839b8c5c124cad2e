//! Advanced tier: flavor extraction through a language model.

use crate::baseline::BaselineInsightsService;
use crate::service::{InsightsService, InsightsTier};
use async_trait::async_trait;
use cuppa_core::{BrewMethod, BrewPattern, BrewRecord, BrewSuggestion, CoffeeBean, ExtractedFlavor};
use cuppa_flavor::{DescriptorMapper, LanguageModel, ModelError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Insights service backed by a language model.
///
/// Every extraction that errors or times out is served by the baseline
/// tier instead. Patterns and suggestions are the same in both tiers.
pub struct AdvancedInsightsService {
    model: Arc<dyn LanguageModel>,
    baseline: BaselineInsightsService,
    mapper: DescriptorMapper,
    timeout: Duration,
}

impl AdvancedInsightsService {
    /// Create a service.
    pub fn new(
        model: Arc<dyn LanguageModel>,
        baseline: BaselineInsightsService,
        timeout: Duration,
    ) -> Self {
        Self {
            model,
            baseline,
            mapper: DescriptorMapper::new(),
            timeout,
        }
    }

    async fn extract_with_model(&self, text: &str) -> Result<Vec<ExtractedFlavor>, ModelError> {
        let analysis = tokio::time::timeout(self.timeout, self.model.analyze_tasting(text))
            .await
            .map_err(|_| {
                ModelError::Unavailable(format!("no answer within {:?}", self.timeout))
            })??;

        debug!(
            "Model returned {} descriptors ({} sentiment)",
            analysis.descriptors.len(),
            analysis.sentiment
        );
        Ok(self.mapper.map(&analysis.descriptors))
    }
}

#[async_trait]
impl InsightsService for AdvancedInsightsService {
    fn tier(&self) -> InsightsTier {
        InsightsTier::Advanced
    }

    async fn extract_flavors(&self, text: &str) -> Vec<ExtractedFlavor> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        match self.extract_with_model(text).await {
            Ok(flavors) => flavors,
            Err(e) => {
                warn!("Advanced extraction failed, using baseline: {}", e);
                self.baseline.extract_flavors(text).await
            }
        }
    }

    fn analyze_patterns(&self, history: &[BrewRecord]) -> Vec<BrewPattern> {
        self.baseline.analyze_patterns(history)
    }

    fn suggest_parameters(
        &self,
        bean: &CoffeeBean,
        method: &BrewMethod,
        history: &[BrewRecord],
    ) -> Option<BrewSuggestion> {
        self.baseline.suggest_parameters(bean, method, history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuppa_core::ExtractionSource;
    use cuppa_flavor::TastingAnalysis;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted model double.
    enum Script {
        Answer(Vec<&'static str>),
        Fail,
        Malformed,
        Hang,
    }

    struct MockModel {
        script: Script,
        calls: AtomicUsize,
    }

    impl MockModel {
        fn new(script: Script) -> Arc<Self> {
            Arc::new(Self {
                script,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl LanguageModel for MockModel {
        async fn is_available(&self) -> bool {
            true
        }

        async fn analyze_tasting(&self, _text: &str) -> Result<TastingAnalysis, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.script {
                Script::Answer(descriptors) => Ok(TastingAnalysis {
                    descriptors: descriptors.iter().map(|d| d.to_string()).collect(),
                    sentiment: "positive".to_string(),
                    summary: String::new(),
                }),
                Script::Fail => Err(ModelError::Status {
                    status: 500,
                    body: "boom".to_string(),
                }),
                Script::Malformed => Err(ModelError::Malformed("not json".to_string())),
                Script::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Err(ModelError::Unavailable("unreachable".to_string()))
                }
            }
        }
    }

    fn service(model: Arc<MockModel>) -> AdvancedInsightsService {
        AdvancedInsightsService::new(
            model,
            BaselineInsightsService::default(),
            Duration::from_millis(50),
        )
    }

    #[tokio::test]
    async fn test_model_descriptors_are_mapped() {
        let service = service(MockModel::new(Script::Answer(vec!["Blueberry", "ripe peach"])));
        let flavors = service.extract_flavors("jammy and sweet").await;

        assert_eq!(service.tier(), InsightsTier::Advanced);
        assert_eq!(flavors.len(), 2);
        assert_eq!(flavors[0].id, "fruity.berry.blueberry");
        assert_eq!(flavors[0].confidence, 0.9);
        assert_eq!(flavors[1].id, "fruity.other-fruit.peach");
        assert_eq!(flavors[1].confidence, 0.8);
        assert!(flavors.iter().all(|f| f.source == ExtractionSource::LanguageModel));
    }

    #[tokio::test]
    async fn test_model_error_falls_back_to_baseline() {
        for script in [Script::Fail, Script::Malformed] {
            let service = service(MockModel::new(script));
            let flavors = service.extract_flavors("lemon and honey").await;

            assert_eq!(flavors.len(), 2);
            assert!(flavors.iter().all(|f| f.source == ExtractionSource::LexicalMatch));
        }
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_baseline() {
        let service = service(MockModel::new(Script::Hang));
        let flavors = service.extract_flavors("cherry").await;

        assert_eq!(flavors.len(), 1);
        assert_eq!(flavors[0].id, "fruity.other-fruit.cherry");
        assert_eq!(flavors[0].source, ExtractionSource::LexicalMatch);
    }

    #[tokio::test]
    async fn test_blank_text_skips_model() {
        let model = MockModel::new(Script::Answer(vec!["Honey"]));
        let service = service(model.clone());

        assert!(service.extract_flavors("  ").await.is_empty());
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unmatched_descriptors_do_not_fall_back() {
        let service = service(MockModel::new(Script::Answer(vec!["durian"])));
        assert!(service.extract_flavors("lemon").await.is_empty());
    }
}
