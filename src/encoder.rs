use std::collections::HashMap;

use ndarray::Array1;

use crate::resolver::{EntityLabel, Result};

/// Maps text to a fixed-size embedding vector.
///
/// Implemented by the external model runtime; used both for utterances at
/// request time and for intent label strings at catalog load. Implementations
/// must be deterministic within a process lifetime so that cached label
/// embeddings stay consistent with utterance embeddings.
pub trait Encoder: Send + Sync {
    fn encode(&self, text: &str) -> Result<Array1<f32>>;
}

/// Maps an utterance's token sequence to per-token entity-tag scores.
///
/// Returns one score vector per entity type, aligned with the input tokens.
/// Types absent from the map simply produce no spans. Scores for different
/// entity types are independent: the source domain allows overlapping tag
/// namespaces, so the same token may score highly for several types at once.
pub trait TokenTagger: Send + Sync {
    fn tag_tokens(&self, tokens: &[String]) -> Result<HashMap<EntityLabel, Vec<f32>>>;
}
