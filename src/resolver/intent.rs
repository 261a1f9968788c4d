use serde::{Deserialize, Serialize};

use super::catalog::IntentKind;
use super::scorer::IntentScore;

/// A named intent with its similarity score, as carried inside decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentCandidate {
    pub intent: String,
    pub score: f32,
}

/// Outcome of intent resolution over a ranked score list.
///
/// `Unknown` and `Ambiguous` are first-class decision states, not errors:
/// callers are expected to branch on them the same way they branch on a
/// confident decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntentDecision {
    /// A single intent won by a clear margin.
    Single { intent: String, score: f32 },
    /// The winning catalog label is a conjunction; its constituents are
    /// reported as a set.
    Compound { intents: Vec<String>, score: f32 },
    /// Two or more candidates scored too close to pick a winner. Candidates
    /// are every entry within the ambiguity gap of the top score, in
    /// descending order.
    Ambiguous { candidates: Vec<IntentCandidate> },
    /// The top score did not clear the acceptance threshold.
    Unknown,
}

/// Applies calibrated thresholds to a ranked score list.
///
/// The checks run in a fixed priority order: the unknown check first, then
/// ambiguity, then compound-label decomposition. Reordering them changes the
/// semantics, so `resolve` is written as one explicit decision ladder.
#[derive(Debug, Clone, Copy)]
pub struct IntentResolver {
    intent_threshold: f32,
    ambiguous_threshold: f32,
}

impl IntentResolver {
    pub fn new(intent_threshold: f32, ambiguous_threshold: f32) -> Self {
        Self {
            intent_threshold,
            ambiguous_threshold,
        }
    }

    pub fn intent_threshold(&self) -> f32 {
        self.intent_threshold
    }

    pub fn ambiguous_threshold(&self) -> f32 {
        self.ambiguous_threshold
    }

    /// Decides the output intent set for a score list ordered descending.
    pub fn resolve(&self, scores: &[IntentScore]) -> IntentDecision {
        let top = match scores.first() {
            Some(top) => top,
            None => return IntentDecision::Unknown,
        };

        if top.score < self.intent_threshold {
            return IntentDecision::Unknown;
        }

        // A catalog with a single intent has no runner-up; the gap is
        // infinite and the ambiguity branch cannot fire.
        let gap = scores
            .get(1)
            .map(|second| top.score - second.score)
            .unwrap_or(f32::INFINITY);

        if gap < self.ambiguous_threshold {
            let candidates = scores
                .iter()
                .take_while(|entry| top.score - entry.score <= self.ambiguous_threshold)
                .map(|entry| IntentCandidate {
                    intent: entry.label.name.clone(),
                    score: entry.score,
                })
                .collect();
            return IntentDecision::Ambiguous { candidates };
        }

        match &top.label.kind {
            IntentKind::Single => IntentDecision::Single {
                intent: top.label.name.clone(),
                score: top.score,
            },
            IntentKind::Compound(parts) => IntentDecision::Compound {
                intents: parts.clone(),
                score: top.score,
            },
        }
    }
}
