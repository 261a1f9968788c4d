mod error;

pub mod builder;
mod catalog;
mod intent;
mod resolver;
mod scorer;
mod spans;

pub use builder::ResolverBuilder;
pub use catalog::{EntityLabel, IntentKind, IntentLabel, LabelCatalog};
pub use error::{NluError, Result};
pub use intent::{IntentCandidate, IntentDecision, IntentResolver};
pub use resolver::{tokenize, ResolutionResult, Resolver};
pub use scorer::{IntentScore, IntentScorer, Similarity};
pub use spans::{EntitySpan, SpanDecoder};

/// Information about the current configuration of a resolver
#[derive(Debug, Clone)]
pub struct ResolverInfo {
    /// Number of intents in the label catalog
    pub num_intents: usize,
    /// Number of entity types in the label catalog
    pub num_entities: usize,
    /// Required embedding dimension
    pub embedding_dimension: usize,
    /// Similarity function used for intent scoring
    pub similarity: Similarity,
    /// Minimum top score to accept any intent
    pub intent_threshold: f32,
    /// Maximum score gap below which candidates are ambiguous
    pub ambiguous_threshold: f32,
    /// Per-token inclusion cutoff for entity spans
    pub entities_threshold: f32,
}
