//! Cuppa core data models.
//!
//! This crate defines the value types exchanged with the insights engine,
//! the flavor wheel vocabulary, and the engine configuration.

#![warn(missing_docs)]

// Core identities
mod id;

// Journal views
mod brew;

// Vocabulary
mod flavor;
mod tags;

// Engine results and settings
mod insight;
mod config;

// Re-exports
pub use id::*;

pub use brew::{format_brew_time, BrewMethod, BrewRecord, CoffeeBean, MethodCategory};
pub use flavor::{FlavorNode, FlavorTaxonomy, Leaves};
pub use tags::{decode_flavor_tags, encode_flavor_tags, resolve_tag_names, FlavorTag, CUSTOM_TAG_PREFIX};
pub use insight::{
    BrewPattern, BrewSuggestion, ExtractedFlavor, ExtractionSource, PatternCategory,
    SuggestionConfidence,
};
pub use config::{ConfigError, EmbeddingConfig, InsightsConfig, LanguageModelConfig};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
