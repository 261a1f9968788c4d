use std::cmp::Ordering;

use ndarray::{Array1, ArrayView1};

use super::catalog::{IntentLabel, LabelCatalog};
use super::error::{NluError, Result};

/// Similarity function applied between utterance and label embeddings.
///
/// Dot product rewards embedding magnitude as well as direction; cosine
/// normalizes both sides first and is insensitive to magnitude. The variant
/// is fixed at build time from `use_dot_product`, so callers never branch on
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Similarity {
    DotProduct,
    Cosine,
}

impl Similarity {
    pub fn compute(&self, a: &ArrayView1<f32>, b: &ArrayView1<f32>) -> f32 {
        match self {
            Similarity::DotProduct => a.dot(b),
            Similarity::Cosine => l2_normalize(a).dot(&l2_normalize(b)),
        }
    }
}

fn l2_normalize(vec: &ArrayView1<f32>) -> Array1<f32> {
    let norm: f32 = vec.iter().map(|&x| x * x).sum::<f32>().sqrt();
    if norm > 1e-10 {
        vec / norm
    } else {
        Array1::zeros(vec.len())
    }
}

/// One scored catalog intent. A full scoring pass yields exactly one entry
/// per catalog intent, in descending score order.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentScore<'c> {
    pub label: &'c IntentLabel,
    pub score: f32,
}

/// Scores an utterance embedding against every intent label in the catalog.
#[derive(Debug, Clone, Copy)]
pub struct IntentScorer {
    similarity: Similarity,
}

impl IntentScorer {
    pub fn new(similarity: Similarity) -> Self {
        Self { similarity }
    }

    pub fn similarity(&self) -> Similarity {
        self.similarity
    }

    /// Returns one `IntentScore` per catalog intent, ordered descending by
    /// score; ties keep catalog declaration order (stable sort).
    ///
    /// # Errors
    /// - `DimensionMismatch` if the utterance embedding's length differs
    ///   from the catalog dimension
    pub fn score<'c>(
        &self,
        utterance_embedding: &Array1<f32>,
        catalog: &'c LabelCatalog,
    ) -> Result<Vec<IntentScore<'c>>> {
        if utterance_embedding.len() != catalog.dimension() {
            return Err(NluError::DimensionMismatch {
                expected: catalog.dimension(),
                actual: utterance_embedding.len(),
            });
        }

        let mut scores: Vec<IntentScore<'c>> = catalog
            .intents()
            .iter()
            .map(|label| IntentScore {
                label,
                score: self
                    .similarity
                    .compute(&utterance_embedding.view(), &label.embedding.view()),
            })
            .collect();

        // Stable sort keeps declaration order for equal scores.
        scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        Ok(scores)
    }
}
