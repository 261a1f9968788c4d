use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::catalog::{EntityLabel, LabelCatalog};

/// A typed span over the utterance's tokens, end-inclusive.
///
/// Spans of the same type never overlap; spans of different types may, since
/// entity tag namespaces are independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub entity: EntityLabel,
    pub start: usize,
    pub end: usize,
    pub confidence: f32,
}

/// Turns per-token, per-type scores into discrete entity spans.
///
/// For each entity type independently, tokens scoring at or above the
/// threshold are marked, maximal contiguous runs of marked tokens merge into
/// one span, and the span confidence is the mean score over the run.
#[derive(Debug, Clone, Copy)]
pub struct SpanDecoder {
    threshold: f32,
}

impl SpanDecoder {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Decodes spans for every catalog entity type, in catalog declaration
    /// order; within a type, spans come out in token order. Types absent
    /// from the score map produce no spans. An empty token sequence yields
    /// an empty span sequence.
    pub fn decode(
        &self,
        catalog: &LabelCatalog,
        token_scores: &HashMap<EntityLabel, Vec<f32>>,
    ) -> Vec<EntitySpan> {
        let mut spans = Vec::new();
        for entity in catalog.entities() {
            if let Some(scores) = token_scores.get(entity) {
                self.decode_type(entity, scores, &mut spans);
            }
        }
        spans
    }

    fn decode_type(&self, entity: &EntityLabel, scores: &[f32], spans: &mut Vec<EntitySpan>) {
        let mut run_start: Option<usize> = None;
        let mut run_sum = 0.0;

        for (index, &score) in scores.iter().enumerate() {
            if score >= self.threshold {
                if run_start.is_none() {
                    run_start = Some(index);
                    run_sum = 0.0;
                }
                run_sum += score;
            } else if let Some(start) = run_start.take() {
                spans.push(self.span(entity, start, index - 1, run_sum));
            }
        }
        if let Some(start) = run_start {
            spans.push(self.span(entity, start, scores.len() - 1, run_sum));
        }
    }

    fn span(&self, entity: &EntityLabel, start: usize, end: usize, sum: f32) -> EntitySpan {
        EntitySpan {
            entity: entity.clone(),
            start,
            end,
            confidence: sum / (end - start + 1) as f32,
        }
    }
}
