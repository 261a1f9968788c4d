use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::resolver::{NluError, Result};

fn default_embedding_dimension() -> usize {
    128
}

fn default_use_dot_product() -> bool {
    true
}

fn default_intent_threshold() -> f32 {
    0.7
}

fn default_ambiguous_threshold() -> f32 {
    0.2
}

fn default_entities_threshold() -> f32 {
    0.5
}

/// The tunable contract of the resolution core.
///
/// `entities` and `intents` define catalog membership in declaration order;
/// the remaining fields calibrate scoring and decisioning. Thresholds are
/// injected into the resolver at build time so they can be retuned without
/// touching decision logic.
///
/// # Example
/// ```
/// use wernicke::NluConfig;
///
/// let config = NluConfig {
///     intents: vec!["flight".into(), "airfare".into()],
///     entities: vec!["city_name".into()],
///     ..NluConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NluConfig {
    /// Ordered entity type names; defines the `EntityLabel` catalog.
    pub entities: Vec<String>,
    /// Ordered intent names; compound intents use an `" and "` conjunction
    /// (e.g. "flight and airfare") and are decomposed at catalog load.
    pub intents: Vec<String>,
    /// Required dimension for all embeddings; mismatch is a hard error.
    #[serde(default = "default_embedding_dimension")]
    pub embedding_dimension: usize,
    /// Selects dot-product similarity when true, cosine otherwise.
    #[serde(default = "default_use_dot_product")]
    pub use_dot_product: bool,
    /// Minimum top score to accept any intent at all.
    #[serde(default = "default_intent_threshold")]
    pub intent_threshold: f32,
    /// Maximum score gap below which the top candidates are ambiguous.
    #[serde(default = "default_ambiguous_threshold")]
    pub ambiguous_threshold: f32,
    /// Per-token inclusion cutoff for entity span decoding.
    #[serde(default = "default_entities_threshold")]
    pub entities_threshold: f32,
}

impl Default for NluConfig {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            intents: Vec::new(),
            embedding_dimension: default_embedding_dimension(),
            use_dot_product: default_use_dot_product(),
            intent_threshold: default_intent_threshold(),
            ambiguous_threshold: default_ambiguous_threshold(),
            entities_threshold: default_entities_threshold(),
        }
    }
}

impl NluConfig {
    /// Loads a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| NluError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: NluConfig = serde_json::from_str(&contents)
            .map_err(|e| NluError::Config(format!("Invalid config file {}: {}", path.display(), e)))?;
        info!(
            "Loaded configuration from {}: {} intents, {} entities",
            path.display(),
            config.intents.len(),
            config.entities.len()
        );
        Ok(config)
    }

    /// Validates the configuration according to the following rules:
    /// - Intent and entity lists must be non-empty and duplicate-free
    /// - Embedding dimension must be nonzero
    /// - All thresholds must lie within [0, 1]
    pub fn validate(&self) -> Result<()> {
        if self.intents.is_empty() {
            return Err(NluError::Config("Intent list cannot be empty".into()));
        }
        if self.entities.is_empty() {
            return Err(NluError::Config("Entity list cannot be empty".into()));
        }
        if let Some(dup) = first_duplicate(&self.intents) {
            return Err(NluError::Config(format!("Duplicate intent name: '{}'", dup)));
        }
        if let Some(dup) = first_duplicate(&self.entities) {
            return Err(NluError::Config(format!("Duplicate entity name: '{}'", dup)));
        }
        if self.embedding_dimension == 0 {
            return Err(NluError::Config("Embedding dimension must be nonzero".into()));
        }
        for (name, value) in [
            ("intent_threshold", self.intent_threshold),
            ("ambiguous_threshold", self.ambiguous_threshold),
            ("entities_threshold", self.entities_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(NluError::Config(format!(
                    "{} must lie within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

fn first_duplicate(names: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    names.iter().find(|name| !seen.insert(name.as_str())).map(|s| s.as_str())
}
