//! Brew history analysis - habits and parameter suggestions.

#![warn(missing_docs, unused_crate_dependencies)]

mod analyzer;
mod engine;
mod stats;

pub use analyzer::PatternAnalyzer;
pub use engine::SuggestionEngine;
pub use stats::{weighted_mean, MIN_GOOD_RATING};
