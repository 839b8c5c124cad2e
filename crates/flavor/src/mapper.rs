//! Maps free-text descriptors onto flavor wheel leaves.

use crate::extractor::rank_flavors;
use cuppa_core::{ExtractedFlavor, ExtractionSource, FlavorNode, FlavorTaxonomy};
use std::collections::{HashMap, HashSet};

const EXACT_CONFIDENCE: f64 = 0.9;
const PARTIAL_CONFIDENCE: f64 = 0.8;

/// Resolves descriptors returned by a language model to wheel leaves.
#[derive(Debug, Clone)]
pub struct DescriptorMapper {
    /// Leaves with their lowercased names, in declaration order
    leaves: Vec<(String, &'static FlavorNode)>,

    /// Lowercased name -> leaf
    exact: HashMap<String, &'static FlavorNode>,
}

impl DescriptorMapper {
    /// Create a mapper over the whole wheel.
    pub fn new() -> Self {
        let leaves: Vec<(String, &'static FlavorNode)> = FlavorTaxonomy::flatten_leaves()
            .map(|leaf| (leaf.name.to_lowercase(), leaf))
            .collect();

        let mut exact = HashMap::new();
        for (name, leaf) in &leaves {
            exact.entry(name.clone()).or_insert(*leaf);
        }

        Self { leaves, exact }
    }

    /// Map descriptors to flavors.
    ///
    /// An exact name match scores 0.9. Otherwise the first leaf, in wheel
    /// order, whose name contains the descriptor or is contained in it
    /// scores 0.8. Descriptors that match nothing are dropped.
    pub fn map(&self, descriptors: &[String]) -> Vec<ExtractedFlavor> {
        let mut results = Vec::new();
        let mut claimed: HashSet<&'static str> = HashSet::new();

        for descriptor in descriptors {
            let lowered = descriptor.trim().to_lowercase();
            if lowered.is_empty() {
                continue;
            }

            let (node, confidence) = match self.exact.get(&lowered) {
                Some(node) => (*node, EXACT_CONFIDENCE),
                None => match self.partial_match(&lowered) {
                    Some(node) => (node, PARTIAL_CONFIDENCE),
                    None => continue,
                },
            };

            if claimed.insert(node.id) {
                results.push(ExtractedFlavor::new(
                    node.id,
                    node.name,
                    confidence,
                    ExtractionSource::LanguageModel,
                ));
            }
        }

        rank_flavors(results)
    }

    fn partial_match(&self, lowered: &str) -> Option<&'static FlavorNode> {
        self.leaves
            .iter()
            .find(|(name, _)| name.contains(lowered) || lowered.contains(name.as_str()))
            .map(|(_, leaf)| *leaf)
    }
}

impl Default for DescriptorMapper {
    fn default() -> Self {
        Self::new()
    }
}
