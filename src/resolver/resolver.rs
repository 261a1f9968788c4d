use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use super::builder::ResolverBuilder;
use super::catalog::LabelCatalog;
use super::error::Result;
use super::intent::{IntentCandidate, IntentDecision, IntentResolver};
use super::scorer::IntentScorer;
use super::spans::{EntitySpan, SpanDecoder};
use crate::encoder::{Encoder, TokenTagger};

/// The externally visible output of one resolution, immutable once
/// constructed and ready for JSON serialization.
///
/// An `Unknown` intent may still carry entity spans: slot extraction runs
/// independently of intent acceptance and stays useful under intent
/// uncertainty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub utterance_id: String,
    pub input: String,
    pub intent: IntentDecision,
    pub entities: Vec<EntitySpan>,
}

/// Splits an utterance into the token sequence handed to the tagger.
///
/// Entity span indices refer to positions in this sequence, so callers that
/// map spans back to text must tokenize the same way.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Resolves utterances into intent decisions and entity spans.
///
/// # Thread Safety
///
/// The resolve path is synchronous, pure, and stateless per request: the
/// catalog is read-only after construction and collaborators are shared
/// behind `Arc`, so one `Resolver` serves concurrent requests without
/// locking.
///
/// ```rust
/// # use std::collections::HashMap;
/// # use std::sync::Arc;
/// # use std::thread;
/// # use ndarray::Array1;
/// # use wernicke::{EntityLabel, Encoder, NluConfig, Resolver, TokenTagger};
/// # struct ZeroEncoder;
/// # impl Encoder for ZeroEncoder {
/// #     fn encode(&self, _text: &str) -> wernicke::Result<Array1<f32>> {
/// #         Ok(Array1::zeros(128))
/// #     }
/// # }
/// # struct SilentTagger;
/// # impl TokenTagger for SilentTagger {
/// #     fn tag_tokens(&self, _tokens: &[String]) -> wernicke::Result<HashMap<EntityLabel, Vec<f32>>> {
/// #         Ok(HashMap::new())
/// #     }
/// # }
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = NluConfig {
///     intents: vec!["flight".into()],
///     entities: vec!["city_name".into()],
///     ..NluConfig::default()
/// };
/// let resolver = Arc::new(
///     Resolver::builder()
///         .with_config(config)
///         .with_encoder(Arc::new(ZeroEncoder))
///         .with_tagger(Arc::new(SilentTagger))
///         .build()?,
/// );
///
/// let resolver_clone = Arc::clone(&resolver);
/// thread::spawn(move || {
///     resolver_clone.resolve("flights to boston", "utt-1").unwrap();
/// });
/// # Ok(())
/// # }
/// ```
pub struct Resolver {
    pub(super) catalog: Arc<LabelCatalog>,
    pub(super) encoder: Arc<dyn Encoder>,
    pub(super) tagger: Arc<dyn TokenTagger>,
    pub(super) scorer: IntentScorer,
    pub(super) intent_resolver: IntentResolver,
    pub(super) span_decoder: SpanDecoder,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Resolver>();
    }
};

impl Resolver {
    /// Creates a new ResolverBuilder for fluent construction
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// The shared label catalog this resolver scores against.
    pub fn catalog(&self) -> &LabelCatalog {
        &self.catalog
    }

    /// Returns information about the resolver's current configuration
    pub fn info(&self) -> super::ResolverInfo {
        super::ResolverInfo {
            num_intents: self.catalog.intents().len(),
            num_entities: self.catalog.entities().len(),
            embedding_dimension: self.catalog.dimension(),
            similarity: self.scorer.similarity(),
            intent_threshold: self.intent_resolver.intent_threshold(),
            ambiguous_threshold: self.intent_resolver.ambiguous_threshold(),
            entities_threshold: self.span_decoder.threshold(),
        }
    }

    /// Resolves one utterance into the final structured result.
    ///
    /// Empty or whitespace-only input is a valid degenerate case, not a
    /// fault: it resolves to `Unknown` with no entity spans.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the encoder's utterance embedding does not
    ///   match the catalog dimension
    /// - `Encoder` / `Tagger` if a collaborator fails
    pub fn resolve(&self, text: &str, utterance_id: impl Into<String>) -> Result<ResolutionResult> {
        let utterance_id = utterance_id.into();

        if text.trim().is_empty() {
            debug!("Utterance '{}' is empty; resolving to unknown", utterance_id);
            return Ok(aggregate(
                IntentDecision::Unknown,
                vec![],
                utterance_id,
                text,
            ));
        }

        let embedding = self.encoder.encode(text)?;
        let ranked = self.scorer.score(&embedding, &self.catalog)?;
        let intent = self.intent_resolver.resolve(&ranked);

        let tokens = tokenize(text);
        let token_scores = self.tagger.tag_tokens(&tokens)?;
        let entities = self.span_decoder.decode(&self.catalog, &token_scores);

        debug!(
            "Utterance '{}': {:?}, {} entity span(s)",
            utterance_id,
            intent,
            entities.len()
        );
        Ok(aggregate(intent, entities, utterance_id, text))
    }

    /// Returns every catalog intent with its similarity score for the given
    /// text, ordered descending, without applying any thresholds.
    pub fn rank_intents(&self, text: &str) -> Result<Vec<IntentCandidate>> {
        let embedding = self.encoder.encode(text)?;
        let ranked = self.scorer.score(&embedding, &self.catalog)?;
        Ok(ranked
            .into_iter()
            .map(|entry| IntentCandidate {
                intent: entry.label.name.clone(),
                score: entry.score,
            })
            .collect())
    }
}

/// Combines the two independent decisions into the final result. Pure
/// combination: no additional thresholding happens here.
fn aggregate(
    intent: IntentDecision,
    entities: Vec<EntitySpan>,
    utterance_id: String,
    input: &str,
) -> ResolutionResult {
    ResolutionResult {
        utterance_id,
        input: input.to_string(),
        intent,
        entities,
    }
}
