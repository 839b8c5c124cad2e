//! Baseline flavor extraction from free-text tasting notes.
//!
//! The pipeline runs over the noun/adjective candidates of the text:
//! bigrams against multi-word descriptors, then single words, then
//! embedding neighbours of words the vocabulary does not know. A node id
//! claimed by an earlier stage is never emitted again by a later one.

use crate::embedding::WordEmbedding;
use crate::tagger::{HeuristicTagger, WordTagger};
use cuppa_core::{EmbeddingConfig, ExtractedFlavor, ExtractionSource, FlavorNode, FlavorTaxonomy};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Extracts flavor wheel descriptors from text.
#[derive(Clone)]
pub struct FlavorExtractor {
    /// Lowercased word or name -> leaf
    vocabulary: HashMap<String, &'static FlavorNode>,

    /// Candidate word source
    tagger: Arc<dyn WordTagger>,

    /// Fuzzy matching, skipped when absent
    embedding: Option<Arc<dyn WordEmbedding>>,

    /// Neighbours considered per word
    max_neighbors: usize,

    /// Neighbours at or beyond this distance are ignored
    max_distance: f64,
}

impl FlavorExtractor {
    /// Create an extractor with the heuristic tagger and no embedding.
    pub fn new() -> Self {
        let defaults = EmbeddingConfig::default();
        Self {
            vocabulary: build_vocabulary(),
            tagger: Arc::new(HeuristicTagger::new()),
            embedding: None,
            max_neighbors: defaults.max_neighbors,
            max_distance: defaults.max_distance,
        }
    }

    /// Use a different tagger.
    pub fn with_tagger(mut self, tagger: Arc<dyn WordTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    /// Enable fuzzy matching through an embedding.
    pub fn with_embedding(mut self, embedding: Arc<dyn WordEmbedding>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Apply neighbour count and distance limits.
    pub fn with_config(mut self, config: &EmbeddingConfig) -> Self {
        self.max_neighbors = config.max_neighbors;
        self.max_distance = config.max_distance;
        self
    }

    /// Whether the fuzzy pass can run.
    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }

    /// Leaf id a lowercased word or name resolves to.
    pub fn vocabulary_id(&self, word: &str) -> Option<&'static str> {
        self.vocabulary.get(word).map(|node| node.id)
    }

    /// Extract flavors from `text`, best first, one entry per id.
    pub fn extract(&self, text: &str) -> Vec<ExtractedFlavor> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let candidates: Vec<String> = self
            .tagger
            .candidate_words(text)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect();

        let mut results = Vec::new();
        let mut claimed: HashSet<&'static str> = HashSet::new();

        // Bigrams, for multi-word descriptors
        for pair in candidates.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            if let Some(node) = self.vocabulary.get(&bigram) {
                if claimed.insert(node.id) {
                    results.push(lexical_match(node));
                }
            }
        }

        // Single words
        for word in &candidates {
            if let Some(node) = self.vocabulary.get(word) {
                if claimed.insert(node.id) {
                    results.push(lexical_match(node));
                }
            }
        }

        if let Some(embedding) = &self.embedding {
            self.fuzzy_pass(embedding.as_ref(), &candidates, &mut claimed, &mut results);
        }

        debug!(
            "Extracted {} flavors from {} candidate words",
            results.len(),
            candidates.len()
        );
        rank_flavors(results)
    }

    fn fuzzy_pass(
        &self,
        embedding: &dyn WordEmbedding,
        candidates: &[String],
        claimed: &mut HashSet<&'static str>,
        results: &mut Vec<ExtractedFlavor>,
    ) {
        for word in candidates {
            if self.vocabulary.contains_key(word) {
                continue;
            }

            let neighbors = match embedding.neighbors(word, self.max_neighbors) {
                Ok(neighbors) => neighbors,
                Err(e) => {
                    warn!("Embedding lookup failed, skipping fuzzy matching: {}", e);
                    return;
                }
            };

            for (neighbor, distance) in neighbors {
                // Unknown words come back with distances near 2.0
                if distance >= self.max_distance {
                    continue;
                }
                let Some(node) = self.vocabulary.get(&neighbor.to_lowercase()) else {
                    continue;
                };
                if claimed.insert(node.id) {
                    results.push(ExtractedFlavor::new(
                        node.id,
                        node.name,
                        (1.0 - distance).max(0.0),
                        ExtractionSource::EmbeddingMatch,
                    ));
                }
            }
        }
    }
}

impl Default for FlavorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn lexical_match(node: &FlavorNode) -> ExtractedFlavor {
    ExtractedFlavor::new(node.id, node.name, 1.0, ExtractionSource::LexicalMatch)
}

/// Build the word -> leaf lookup.
///
/// Every leaf's full lowercased name maps to it. Words of a multi-word name
/// also map to it unless the word is already taken: the first declared
/// leaf keeps a shared word ("dark" stays with Dark Green, declared before
/// Dark Chocolate). A full name always overrides a single-word entry.
fn build_vocabulary() -> HashMap<String, &'static FlavorNode> {
    let mut vocabulary = HashMap::new();

    for leaf in FlavorTaxonomy::flatten_leaves() {
        let lowered = leaf.name.to_lowercase();
        let words: Vec<&str> = lowered.split(' ').filter(|w| !w.is_empty()).collect();

        if words.len() > 1 {
            for word in &words {
                vocabulary.entry(word.to_string()).or_insert(leaf);
            }
        }
        vocabulary.insert(lowered, leaf);
    }

    vocabulary
}

/// Deduplicate by id, keeping the highest confidence, and sort.
///
/// Order is confidence descending, then flavor wheel declaration order,
/// then id for anything outside the wheel.
pub fn rank_flavors(flavors: Vec<ExtractedFlavor>) -> Vec<ExtractedFlavor> {
    let mut best: HashMap<String, ExtractedFlavor> = HashMap::new();
    for flavor in flavors {
        match best.get(&flavor.id) {
            Some(existing) if existing.confidence >= flavor.confidence => {}
            _ => {
                best.insert(flavor.id.clone(), flavor);
            }
        }
    }

    let order: HashMap<&'static str, usize> = FlavorTaxonomy::flatten_leaves()
        .enumerate()
        .map(|(i, leaf)| (leaf.id, i))
        .collect();
    let position = |id: &str| order.get(id).copied().unwrap_or(usize::MAX);

    let mut ranked: Vec<ExtractedFlavor> = best.into_values().collect();
    ranked.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| position(&a.id).cmp(&position(&b.id)))
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked
}
