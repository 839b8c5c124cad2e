//! Flavor extraction (baseline and advanced tiers)
//!
//! Turns free-text tasting notes into flavor wheel matches.

#![warn(missing_docs)]

pub mod embedding;
pub mod extractor;
pub mod mapper;
pub mod model;
pub mod tagger;

pub use embedding::{EmbeddingError, VectorWordEmbedding, WordEmbedding};
pub use extractor::{rank_flavors, FlavorExtractor};
pub use mapper::DescriptorMapper;
pub use model::{LanguageModel, ModelError, OllamaTastingClient, TastingAnalysis};
pub use tagger::{HeuristicTagger, LexicalClass, TaggedWord, WordTagger};
