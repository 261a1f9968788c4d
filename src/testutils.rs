use std::collections::HashMap;
use std::iter::FromIterator;
use std::sync::Mutex;

use ndarray::Array1;

use crate::encoder::{Encoder, TokenTagger};
use crate::resolver::{EntityLabel, NluError, Result};

pub fn assert_epsilon_eq_array1(a: &Array1<f32>, b: &Array1<f32>, epsilon: f32) {
    assert_eq!(a.dim(), b.dim());
    for (index, elem_a) in a.indexed_iter() {
        assert!(epsilon_eq(*elem_a, b[index], epsilon))
    }
}

pub fn epsilon_eq(a: f32, b: f32, epsilon: f32) -> bool {
    let diff = a - b;
    diff < epsilon && diff > -epsilon
}

/// Encoder returning canned embeddings keyed by input text, counting calls
/// so tests can assert the label-caching invariant.
#[derive(Default)]
pub struct MockedEncoder {
    mocked_outputs: HashMap<String, Vec<f32>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl MockedEncoder {
    /// Number of times `encode` was invoked with this exact text.
    pub fn encode_count(&self, text: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(text)
            .copied()
            .unwrap_or(0)
    }
}

impl Encoder for MockedEncoder {
    fn encode(&self, text: &str) -> Result<Array1<f32>> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(text.to_string())
            .or_insert(0) += 1;
        self.mocked_outputs
            .get(text)
            .map(|values| Array1::from_vec(values.clone()))
            .ok_or_else(|| NluError::Encoder(format!("No mocked embedding for '{}'", text)))
    }
}

impl FromIterator<(String, Vec<f32>)> for MockedEncoder {
    fn from_iter<T: IntoIterator<Item = (String, Vec<f32>)>>(iter: T) -> Self {
        Self {
            mocked_outputs: HashMap::from_iter(iter),
            calls: Mutex::new(HashMap::new()),
        }
    }
}

/// Tagger returning canned per-token scores keyed by the space-joined token
/// sequence; unknown inputs yield an empty score map.
#[derive(Default)]
pub struct MockedTagger {
    mocked_outputs: HashMap<String, HashMap<EntityLabel, Vec<f32>>>,
}

impl TokenTagger for MockedTagger {
    fn tag_tokens(&self, tokens: &[String]) -> Result<HashMap<EntityLabel, Vec<f32>>> {
        Ok(self
            .mocked_outputs
            .get(&tokens.join(" "))
            .cloned()
            .unwrap_or_default())
    }
}

impl FromIterator<(String, HashMap<EntityLabel, Vec<f32>>)> for MockedTagger {
    fn from_iter<T: IntoIterator<Item = (String, HashMap<EntityLabel, Vec<f32>>)>>(
        iter: T,
    ) -> Self {
        Self {
            mocked_outputs: HashMap::from_iter(iter),
        }
    }
}
