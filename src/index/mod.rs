//! In-memory vector index with deterministic ordering
//!
//! The index exclusively owns the stored papers and their embeddings. Reads
//! and writes go through a reader-writer lock, so a `query` never observes a
//! partially applied `upsert` and independent queries run in parallel.

pub mod snapshot;

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Paper, ScoredPaper};

/// Similarity metric, fixed when the index is created. Changing the metric of
/// a populated index would require re-embedding the corpus, so there is no
/// setter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// Cosine similarity over L2-normalized vectors
    #[default]
    Cosine,
    /// Raw inner product
    InnerProduct,
}

struct IndexEntry {
    paper: Paper,
    vector: Vec<f32>,
}

/// Entries keep their slot for the lifetime of the index; the slot doubles as
/// the insertion-order tie-break key.
struct IndexInner {
    entries: Vec<IndexEntry>,
    slots: HashMap<String, usize>,
}

/// Vector index over the paper corpus
pub struct VectorIndex {
    dimensions: usize,
    metric: SimilarityMetric,
    inner: RwLock<IndexInner>,
}

impl VectorIndex {
    /// Create an empty index for the given embedding dimensionality
    pub fn new(dimensions: usize, metric: SimilarityMetric) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::config("index dimensionality must be positive"));
        }
        Ok(Self {
            dimensions,
            metric,
            inner: RwLock::new(IndexInner {
                entries: Vec::new(),
                slots: HashMap::new(),
            }),
        })
    }

    /// Configured embedding dimensionality
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Configured similarity metric
    pub fn metric(&self) -> SimilarityMetric {
        self.metric
    }

    /// Number of papers stored
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert or replace a paper with its embedding. Idempotent on id:
    /// re-upserting an existing id replaces the entry in place and keeps its
    /// original insertion slot, so tie-break order is stable across updates.
    pub fn upsert(&self, paper: Paper, mut embedding: Vec<f32>) -> Result<()> {
        self.check_dimensions(&embedding)?;
        if self.metric == SimilarityMetric::Cosine {
            l2_normalize(&mut embedding);
        }

        let mut inner = self.inner.write();
        match inner.slots.get(&paper.id).copied() {
            Some(slot) => {
                inner.entries[slot] = IndexEntry {
                    paper,
                    vector: embedding,
                };
            }
            None => {
                let slot = inner.entries.len();
                inner.slots.insert(paper.id.clone(), slot);
                inner.entries.push(IndexEntry {
                    paper,
                    vector: embedding,
                });
            }
        }
        Ok(())
    }

    /// Return the `top_k` nearest papers by the configured metric, sorted by
    /// descending score with ties broken by insertion order. Returns fewer
    /// than `top_k` results when the index holds fewer papers; under-fill is
    /// not an error.
    pub fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<ScoredPaper>> {
        self.check_dimensions(embedding)?;

        let query_vector = match self.metric {
            SimilarityMetric::Cosine => {
                let mut v = embedding.to_vec();
                l2_normalize(&mut v);
                v
            }
            SimilarityMetric::InnerProduct => embedding.to_vec(),
        };

        let inner = self.inner.read();
        let mut scored: Vec<(usize, f32)> = inner
            .entries
            .iter()
            .enumerate()
            .map(|(slot, entry)| (slot, dot(&query_vector, &entry.vector)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(slot, score)| ScoredPaper::from_paper(&inner.entries[slot].paper, score))
            .collect())
    }

    fn check_dimensions(&self, embedding: &[f32]) -> Result<()> {
        if embedding.len() != self.dimensions {
            return Err(Error::index(format!(
                "embedding dimensionality {} does not match index dimensionality {}",
                embedding.len(),
                self.dimensions
            )));
        }
        Ok(())
    }
}

const EPSILON: f32 = 1e-10;

/// Normalize a vector to unit length. Zero vectors are left untouched.
fn l2_normalize(vector: &mut [f32]) {
    let magnitude: f32 = vector.iter().map(|&x| x * x).sum::<f32>().sqrt();
    if magnitude > EPSILON {
        for x in vector.iter_mut() {
            *x /= magnitude;
        }
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaperMetadata;

    fn paper(id: &str) -> Paper {
        Paper::new(id, format!("Title: {id}\nAbstract: body of {id}."), PaperMetadata::default())
    }

    fn index_with(vectors: &[(&str, Vec<f32>)]) -> VectorIndex {
        let index = VectorIndex::new(vectors[0].1.len(), SimilarityMetric::Cosine).unwrap();
        for (id, v) in vectors {
            index.upsert(paper(id), v.clone()).unwrap();
        }
        index
    }

    #[test]
    fn returns_min_of_top_k_and_size() {
        let index = index_with(&[
            ("a", vec![1.0, 0.0]),
            ("b", vec![0.0, 1.0]),
            ("c", vec![1.0, 1.0]),
        ]);
        let results = index.query(&[1.0, 0.0], 5).unwrap();
        assert_eq!(results.len(), 3);
        let results = index.query(&[1.0, 0.0], 2).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn results_sorted_by_descending_score() {
        let index = index_with(&[
            ("far", vec![0.0, 1.0]),
            ("near", vec![1.0, 0.05]),
            ("mid", vec![1.0, 1.0]),
        ]);
        let results = index.query(&[1.0, 0.0], 3).unwrap();
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(results[0].id, "near");
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let index = index_with(&[
            ("second", vec![1.0, 0.0]),
            ("third", vec![1.0, 0.0]),
            ("first", vec![1.0, 0.0]),
        ]);
        let results = index.query(&[1.0, 0.0], 3).unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["second", "third", "first"]);
    }

    #[test]
    fn repeated_queries_are_deterministic() {
        let index = index_with(&[
            ("a", vec![0.9, 0.1]),
            ("b", vec![0.8, 0.2]),
            ("c", vec![0.7, 0.3]),
        ]);
        let first = index.query(&[1.0, 0.0], 3).unwrap();
        let second = index.query(&[1.0, 0.0], 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn upsert_is_idempotent_on_id() {
        let index = index_with(&[("a", vec![1.0, 0.0]), ("b", vec![0.0, 1.0])]);
        index.upsert(paper("a"), vec![0.0, 1.0]).unwrap();
        assert_eq!(index.len(), 2);

        // "a" keeps its original slot, so on a tie with "b" it still ranks first
        let results = index.query(&[0.0, 1.0], 2).unwrap();
        assert_eq!(results[0].id, "a");
    }

    #[test]
    fn upsert_is_immediately_visible() {
        let index = index_with(&[("a", vec![1.0, 0.0])]);
        index.upsert(paper("fresh"), vec![0.0, 1.0]).unwrap();
        let results = index.query(&[0.0, 1.0], 1).unwrap();
        assert_eq!(results[0].id, "fresh");
    }

    #[test]
    fn dimension_mismatch_is_an_index_error() {
        let index = index_with(&[("a", vec![1.0, 0.0])]);
        let err = index.query(&[1.0, 0.0, 0.0], 1).unwrap_err();
        assert!(matches!(err, Error::Index(_)));

        let err = index.upsert(paper("b"), vec![1.0]).unwrap_err();
        assert!(matches!(err, Error::Index(_)));
    }

    #[test]
    fn empty_index_underfills_without_error() {
        let index = VectorIndex::new(2, SimilarityMetric::Cosine).unwrap();
        let results = index.query(&[1.0, 0.0], 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn cosine_scores_ignore_magnitude() {
        let index = index_with(&[("a", vec![10.0, 0.0])]);
        let results = index.query(&[0.1, 0.0], 1).unwrap();
        assert!((results[0].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn inner_product_keeps_magnitude() {
        let index = VectorIndex::new(2, SimilarityMetric::InnerProduct).unwrap();
        index.upsert(paper("small"), vec![1.0, 0.0]).unwrap();
        index.upsert(paper("large"), vec![3.0, 0.0]).unwrap();
        let results = index.query(&[1.0, 0.0], 2).unwrap();
        assert_eq!(results[0].id, "large");
        assert!((results[0].score - 3.0).abs() < 1e-6);
    }
}
