use super::{RawScore, ScoringStrategy};
use crate::error::Result;
use crate::models::{Candidate, UserProfile};
use async_trait::async_trait;
use tracing::debug;

/// Case-insensitive substring containment. A candidate
/// survives with raw score 1.0 when its description contains any
/// profile term; everything else is filtered out, not just ranked low.
#[derive(Debug, Default)]
pub struct LexicalScorer;

impl LexicalScorer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScoringStrategy for LexicalScorer {
    async fn score(
        &self,
        profile: &UserProfile,
        candidates: &[Candidate],
    ) -> Result<Vec<RawScore>> {
        let terms = profile.terms();
        let lowered: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();

        let mut scores = Vec::new();
        for (index, candidate) in candidates.iter().enumerate() {
            let description = candidate.description.to_lowercase();
            let matched: Vec<&str> = terms
                .iter()
                .zip(&lowered)
                .filter(|(_, low)| description.contains(low.as_str()))
                .map(|(term, _)| term.as_str())
                .collect();

            if !matched.is_empty() {
                scores.push(RawScore {
                    index,
                    raw_score: 1.0,
                    explanation: format!("Matched terms: {}", matched.join(", ")),
                });
            }
        }

        debug!(
            candidates = candidates.len(),
            survivors = scores.len(),
            "lexical containment pass complete"
        );
        Ok(scores)
    }

    fn name(&self) -> &'static str {
        "lexical"
    }
}
