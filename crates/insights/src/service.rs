//! Insights service trait.

use async_trait::async_trait;
use cuppa_core::{BrewMethod, BrewPattern, BrewRecord, BrewSuggestion, CoffeeBean, ExtractedFlavor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which implementation serves flavor extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightsTier {
    /// Lexical and embedding matching
    Baseline,
    /// Language model, falling back to baseline per call
    Advanced,
}

impl fmt::Display for InsightsTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baseline => write!(f, "baseline"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

/// Insights over a brew journal.
///
/// Failures never reach the caller: an operation that cannot produce a
/// result returns an empty list or `None`.
#[async_trait]
pub trait InsightsService: Send + Sync {
    /// Tier this service runs.
    fn tier(&self) -> InsightsTier;

    /// Extract flavors from tasting notes, best first.
    async fn extract_flavors(&self, text: &str) -> Vec<ExtractedFlavor>;

    /// Mine recurring habits from a brew history.
    fn analyze_patterns(&self, history: &[BrewRecord]) -> Vec<BrewPattern>;

    /// Recommend parameters for a bean and method.
    fn suggest_parameters(
        &self,
        bean: &CoffeeBean,
        method: &BrewMethod,
        history: &[BrewRecord],
    ) -> Option<BrewSuggestion>;
}
