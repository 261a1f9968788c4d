use std::fmt;

use log::debug;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::{NluError, Result};
use crate::config::NluConfig;
use crate::encoder::Encoder;

/// Conjunction used by compound catalog entries ("flight and airfare").
const COMPOUND_SEPARATOR: &str = " and ";

/// An entity type name known to the catalog.
///
/// Also serves as the key of the tagger's per-token score map, so it hashes
/// and compares by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityLabel(String);

impl EntityLabel {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityLabel {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Whether a catalog intent denotes one semantic intent or a conjunction of
/// several. Compound entries are atomic labels at scoring time; the
/// constituents are only used when a winning compound label is decomposed.
#[derive(Debug, Clone, PartialEq)]
pub enum IntentKind {
    Single,
    Compound(Vec<String>),
}

impl IntentKind {
    /// Parses the label kind from its catalog name.
    pub fn parse(name: &str) -> Self {
        let parts: Vec<&str> = name.split(COMPOUND_SEPARATOR).collect();
        if parts.len() > 1 {
            IntentKind::Compound(parts.into_iter().map(str::to_string).collect())
        } else {
            IntentKind::Single
        }
    }
}

/// An intent known to the catalog, with its precomputed label embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentLabel {
    pub name: String,
    pub kind: IntentKind,
    pub embedding: Array1<f32>,
}

/// Immutable registry of the intent and entity labels the resolver can
/// produce, with one cached embedding per intent label.
///
/// Built once at startup and shared read-only afterwards; label embeddings
/// are stable for the process lifetime, so every request scores against the
/// same vectors.
#[derive(Debug, Clone)]
pub struct LabelCatalog {
    intents: Vec<IntentLabel>,
    entities: Vec<EntityLabel>,
    dimension: usize,
}

impl LabelCatalog {
    /// Builds the catalog from configuration, encoding each intent label
    /// exactly once.
    ///
    /// # Errors
    /// - `Config` if the intent/entity lists are empty or contain duplicates
    /// - `DimensionMismatch` if the encoder produces an embedding whose
    ///   length differs from `config.embedding_dimension`
    /// - `Encoder` if a label string cannot be embedded
    pub fn load(config: &NluConfig, encoder: &dyn Encoder) -> Result<Self> {
        config.validate()?;

        let mut intents = Vec::with_capacity(config.intents.len());
        for name in &config.intents {
            let embedding = encoder.encode(name)?;
            if embedding.len() != config.embedding_dimension {
                return Err(NluError::DimensionMismatch {
                    expected: config.embedding_dimension,
                    actual: embedding.len(),
                });
            }
            let kind = IntentKind::parse(name);
            if let IntentKind::Compound(parts) = &kind {
                debug!("Compound intent '{}' decomposes into {:?}", name, parts);
            }
            intents.push(IntentLabel {
                name: name.clone(),
                kind,
                embedding,
            });
        }

        let entities = config.entities.iter().map(EntityLabel::new).collect();

        Ok(Self {
            intents,
            entities,
            dimension: config.embedding_dimension,
        })
    }

    /// Intent labels in declaration order.
    pub fn intents(&self) -> &[IntentLabel] {
        &self.intents
    }

    /// Entity type labels in declaration order.
    pub fn entities(&self) -> &[EntityLabel] {
        &self.entities
    }

    /// Required embedding dimension for this catalog.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}
