//! Result types produced by the insights engine.
//!
//! All of these are created fresh for each call and handed to the caller.

use crate::{format_brew_time, MethodCategory, PatternId};
use serde::{Deserialize, Serialize};

/// Where an extracted flavor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    /// Direct or bigram vocabulary hit
    LexicalMatch,
    /// Nearest neighbour in a word embedding space
    EmbeddingMatch,
    /// Descriptor returned by a language model
    LanguageModel,
}

/// A flavor found in free text.
///
/// Two flavors are equal when their ids are equal, whatever their
/// confidence or source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedFlavor {
    /// Flavor wheel node id, or a synthetic id for unmatched words
    pub id: String,
    /// Display name
    pub name: String,
    /// 0.0 to 1.0
    pub confidence: f64,
    /// Extraction stage that produced this match
    pub source: ExtractionSource,
}

impl ExtractedFlavor {
    /// Create a new extracted flavor. Confidence is clamped to 0.0..=1.0.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        confidence: f64,
        source: ExtractionSource,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            confidence: confidence.clamp(0.0, 1.0),
            source,
        }
    }
}

impl PartialEq for ExtractedFlavor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ExtractedFlavor {}

impl std::hash::Hash for ExtractedFlavor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Kind of mined brewing habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    /// Preferred grind setting for an origin
    GrindPreference,
    /// Best ratio for a method
    RatioOptimal,
    /// Most used method
    MethodFavorite,
    /// Most brewed origin
    OriginTrend,
}

impl PatternCategory {
    /// Presentation rank, lower first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::GrindPreference => 0,
            Self::RatioOptimal => 1,
            Self::MethodFavorite => 2,
            Self::OriginTrend => 3,
        }
    }
}

/// A recurring habit found in the brew history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrewPattern {
    /// Pattern ID, fresh per analysis
    pub id: PatternId,
    /// e.g. "Grind for Ethiopia"
    pub title: String,
    /// e.g. "Your best Ethiopia brews use grind setting ~15"
    pub description: String,
    /// Pattern kind
    pub category: PatternCategory,
    /// Number of brews backing the pattern
    pub support: usize,
}

impl BrewPattern {
    /// Create a pattern with a fresh id.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: PatternCategory,
        support: usize,
    ) -> Self {
        Self {
            id: PatternId::new(),
            title: title.into(),
            description: description.into(),
            category,
            support,
        }
    }
}

/// How much history backs a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionConfidence {
    /// 5 or more brews
    High,
    /// 2 to 4 brews
    Medium,
    /// A single brew
    Low,
}

impl SuggestionConfidence {
    /// Bucket a pool size.
    pub fn from_count(count: usize) -> Self {
        match count {
            0 | 1 => Self::Low,
            2..=4 => Self::Medium,
            _ => Self::High,
        }
    }
}

/// Recommended brew parameters for a bean/method pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrewSuggestion {
    /// Dose (g)
    pub dose: f64,
    /// Water (g), `None` if never recorded for this pair
    pub water_amount: Option<f64>,
    /// Yield (g), `None` if never recorded for this pair
    pub yield_amount: Option<f64>,
    /// Water temperature
    pub water_temperature: f64,
    /// Grinder setting, `None` if never recorded for this pair
    pub grinder_setting: Option<f64>,
    /// Brew time in seconds
    pub brew_time: f64,
    /// Support bucket
    pub confidence: SuggestionConfidence,
    /// Number of brews the suggestion is based on
    pub based_on_count: usize,
}

impl BrewSuggestion {
    /// Suggested ratio for a method category, if the needed amounts exist.
    pub fn ratio(&self, category: MethodCategory) -> Option<f64> {
        if self.dose <= 0.0 {
            return None;
        }
        let liquid = match category {
            MethodCategory::Espresso => self.yield_amount?,
            _ => self.water_amount?,
        };
        (liquid > 0.0).then(|| liquid / self.dose)
    }

    /// Suggested brew time as `m:ss`.
    pub fn brew_time_formatted(&self) -> String {
        format_brew_time(self.brew_time)
    }
}
