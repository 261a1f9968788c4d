//! Intent and slot resolution for closed-domain natural-language queries.
//!
//! An utterance and a fixed catalog of intent labels are mapped into a
//! shared vector space by an external encoder; intents are ranked by vector
//! similarity and calibrated thresholds decide between a single intent, a
//! compound intent, an ambiguous candidate set, or no intent at all. Entity
//! spans are decoded independently from per-token tag scores, so slot
//! information survives even when no intent clears the threshold.
//!
//! Model inference stays outside this crate: implement [`Encoder`] and
//! [`TokenTagger`] over your model runtime and inject them at build time.
//!
//! # Basic Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use ndarray::Array1;
//! use wernicke::{Encoder, EntityLabel, IntentDecision, NluConfig, Resolver, TokenTagger};
//!
//! // Stand-ins for the trained model runtime.
//! struct TableEncoder(HashMap<String, Vec<f32>>);
//! impl Encoder for TableEncoder {
//!     fn encode(&self, text: &str) -> wernicke::Result<Array1<f32>> {
//!         let values = self.0.get(text).cloned().unwrap_or_else(|| vec![0.0; 2]);
//!         Ok(Array1::from_vec(values))
//!     }
//! }
//! struct SilentTagger;
//! impl TokenTagger for SilentTagger {
//!     fn tag_tokens(&self, _tokens: &[String]) -> wernicke::Result<HashMap<EntityLabel, Vec<f32>>> {
//!         Ok(HashMap::new())
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let encoder = TableEncoder(HashMap::from([
//!     ("flight".to_string(), vec![1.0, 0.0]),
//!     ("airfare".to_string(), vec![0.0, 1.0]),
//!     ("show me flights to boston".to_string(), vec![0.9, 0.2]),
//! ]));
//!
//! let config = NluConfig {
//!     intents: vec!["flight".into(), "airfare".into()],
//!     entities: vec!["city_name".into()],
//!     embedding_dimension: 2,
//!     ..NluConfig::default()
//! };
//!
//! let resolver = Resolver::builder()
//!     .with_config(config)
//!     .with_encoder(Arc::new(encoder))
//!     .with_tagger(Arc::new(SilentTagger))
//!     .build()?;
//!
//! let result = resolver.resolve("show me flights to boston", "utt-1")?;
//! assert!(matches!(result.intent, IntentDecision::Single { .. }));
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The resolve path is stateless per request and the catalog is immutable
//! after construction, so a `Resolver` can be shared across threads via
//! `Arc` without locking; see [`Resolver`] for an example.

pub mod config;
pub mod encoder;
pub mod resolver;
#[cfg(test)]
pub mod testutils;

pub use config::NluConfig;
pub use encoder::{Encoder, TokenTagger};
pub use resolver::{
    tokenize, EntityLabel, EntitySpan, IntentCandidate, IntentDecision, IntentKind, IntentLabel,
    IntentResolver, IntentScore, IntentScorer, LabelCatalog, NluError, ResolutionResult, Resolver,
    ResolverBuilder, ResolverInfo, Result, Similarity, SpanDecoder,
};

pub fn init_logger() {
    env_logger::init();
}
