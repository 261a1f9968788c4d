use std::sync::Arc;

use log::info;

use super::catalog::LabelCatalog;
use super::error::{NluError, Result};
use super::intent::IntentResolver;
use super::resolver::Resolver;
use super::scorer::{IntentScorer, Similarity};
use super::spans::SpanDecoder;
use crate::config::NluConfig;
use crate::encoder::{Encoder, TokenTagger};

/// A builder for constructing a Resolver with a fluent interface.
///
/// The catalog is built exactly once here, before the resolver is published:
/// every intent label is embedded through the encoder and cached, so no
/// request ever observes a partially-built or re-embedded catalog.
#[derive(Default)]
pub struct ResolverBuilder {
    config: Option<NluConfig>,
    encoder: Option<Arc<dyn Encoder>>,
    tagger: Option<Arc<dyn TokenTagger>>,
}

impl ResolverBuilder {
    /// Creates a new empty ResolverBuilder instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the catalog configuration (labels, dimension, thresholds)
    pub fn with_config(mut self, config: NluConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the embedding collaborator used for utterances and labels
    pub fn with_encoder(mut self, encoder: Arc<dyn Encoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Sets the per-token entity scoring collaborator
    pub fn with_tagger(mut self, tagger: Arc<dyn TokenTagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    /// Builds and returns the final Resolver instance
    ///
    /// # Errors
    /// - `Build` if the configuration, encoder, or tagger is missing
    /// - `Config` if the configuration fails validation
    /// - `DimensionMismatch` / `Encoder` if catalog embedding fails
    pub fn build(self) -> Result<Resolver> {
        let config = self
            .config
            .ok_or_else(|| NluError::Build("Configuration must be set".into()))?;
        let encoder = self
            .encoder
            .ok_or_else(|| NluError::Build("Encoder must be set".into()))?;
        let tagger = self
            .tagger
            .ok_or_else(|| NluError::Build("Token tagger must be set".into()))?;

        let catalog = Arc::new(LabelCatalog::load(&config, encoder.as_ref())?);
        info!(
            "Label catalog loaded: {} intents, {} entities, dimension {}",
            catalog.intents().len(),
            catalog.entities().len(),
            catalog.dimension()
        );

        let similarity = if config.use_dot_product {
            Similarity::DotProduct
        } else {
            Similarity::Cosine
        };

        Ok(Resolver {
            catalog,
            encoder,
            tagger,
            scorer: IntentScorer::new(similarity),
            intent_resolver: IntentResolver::new(
                config.intent_threshold,
                config.ambiguous_threshold,
            ),
            span_decoder: SpanDecoder::new(config.entities_threshold),
        })
    }
}
