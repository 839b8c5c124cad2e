//! Word embeddings for fuzzy flavor matching.
//!
//! Words that are not flavor wheel names can still be close to one in a
//! pretrained embedding space ("berries" is near "blueberry"). Distances
//! are cosine distances, `1 - cos`, so they range from 0.0 to 2.0.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use tracing::debug;

/// Errors from loading or querying an embedding.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A vector line could not be parsed
    #[error("line {line}: {reason}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// A vector has the wrong number of components
    #[error("expected dimension {expected}, found {found}")]
    Dimension {
        /// Dimension of the space
        expected: usize,
        /// Dimension of the offending vector
        found: usize,
    },

    /// The provider failed to answer a lookup
    #[error("lookup failed: {0}")]
    Lookup(String),
}

/// A nearest-neighbour lookup over a word embedding space.
pub trait WordEmbedding: Send + Sync {
    /// Up to `max_count` nearest words to `word`, closest first, as
    /// `(word, distance)`. Unknown words have no neighbours.
    fn neighbors(&self, word: &str, max_count: usize) -> Result<Vec<(String, f64)>, EmbeddingError>;
}

/// In-memory embedding space for small vocabularies.
#[derive(Debug, Clone, Default)]
pub struct VectorWordEmbedding {
    /// Words in insertion order
    words: Vec<String>,

    /// Vectors, parallel to `words`
    vectors: Vec<Vec<f32>>,

    /// Word -> position
    index: HashMap<String, usize>,

    /// Dimension of the space, fixed by the first vector
    dimension: usize,
}

impl VectorWordEmbedding {
    /// Create an empty embedding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a word vector. Words are stored lowercased.
    pub fn insert(&mut self, word: &str, vector: Vec<f32>) -> Result<(), EmbeddingError> {
        if self.words.is_empty() {
            self.dimension = vector.len();
        } else if vector.len() != self.dimension {
            return Err(EmbeddingError::Dimension {
                expected: self.dimension,
                found: vector.len(),
            });
        }

        let word = word.to_lowercase();
        match self.index.get(&word) {
            Some(&i) => self.vectors[i] = vector,
            None => {
                self.index.insert(word.clone(), self.words.len());
                self.words.push(word);
                self.vectors.push(vector);
            }
        }
        Ok(())
    }

    /// Read a text vector file: one `word v1 v2 ...` per line. A leading
    /// `count dimension` header line is skipped; blank lines are ignored.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, EmbeddingError> {
        let mut embedding = Self::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };
            let rest: Vec<&str> = parts.collect();

            if i == 0 && rest.len() == 1 && word.parse::<usize>().is_ok() && rest[0].parse::<usize>().is_ok() {
                continue;
            }

            let vector = rest
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| EmbeddingError::Parse {
                    line: i + 1,
                    reason: e.to_string(),
                })?;

            if vector.is_empty() {
                return Err(EmbeddingError::Parse {
                    line: i + 1,
                    reason: format!("no vector for '{}'", word),
                });
            }

            embedding.insert(word, vector)?;
        }

        debug!(
            "Loaded {} word vectors (dimension {})",
            embedding.len(),
            embedding.dimension
        );
        Ok(embedding)
    }

    /// Load a text vector file.
    pub fn load(path: &Path) -> Result<Self, EmbeddingError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the embedding has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Dimension of the space, 0 while empty.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

impl WordEmbedding for VectorWordEmbedding {
    fn neighbors(&self, word: &str, max_count: usize) -> Result<Vec<(String, f64)>, EmbeddingError> {
        let Some(&query_index) = self.index.get(&word.to_lowercase()) else {
            return Ok(Vec::new());
        };
        let query = &self.vectors[query_index];

        let mut scored: Vec<(String, f64)> = self
            .words
            .iter()
            .zip(self.vectors.iter())
            .enumerate()
            .filter(|(i, _)| *i != query_index)
            .map(|(_, (w, v))| (w.clone(), 1.0 - f64::from(cosine_similarity(query, v))))
            .collect();

        scored.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(max_count);
        Ok(scored)
    }
}

/// Calculate cosine similarity between two vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
