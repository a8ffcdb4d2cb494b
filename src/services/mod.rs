pub mod loader;
pub mod normalizer;
pub mod presenter;
pub mod profile;
pub mod scoring;

pub use loader::load_candidates_csv;
pub use profile::ProfileForm;
pub use scoring::{
    LexicalScorer, LlmProvider, OpenAiProvider, RemoteScorer, ScoringStrategy, TfIdfScorer,
    WeightedScorer,
};

use crate::error::Result;
use crate::models::{Candidate, RankedResult, UserProfile};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// One-way pipeline: scorer feeds the normalizer, the normalizer feeds
/// the presenter. Stateless across invocations; each submission is a
/// single batch computation.
pub struct RankingPipeline {
    strategy: Arc<dyn ScoringStrategy>,
    top_k: usize,
}

impl RankingPipeline {
    pub fn new(strategy: Arc<dyn ScoringStrategy>, top_k: usize) -> Self {
        Self { strategy, top_k }
    }

    /// Run one ranking batch. An empty candidate set or an empty
    /// surviving set yields an empty result, not an error.
    pub async fn rank(
        &self,
        profile: &UserProfile,
        candidates: &[Candidate],
    ) -> Result<RankedResult> {
        let run_id = Uuid::new_v4();
        info!(
            run_id = %run_id,
            strategy = self.strategy.name(),
            candidates = candidates.len(),
            "starting ranking run"
        );

        let raw_scores = self.strategy.score(profile, candidates).await?;
        let survivors = raw_scores.len();

        let mut entries = normalizer::normalize_and_rank(candidates, raw_scores);
        entries.truncate(self.top_k);

        info!(
            run_id = %run_id,
            survivors,
            returned = entries.len(),
            "ranking run complete"
        );
        Ok(RankedResult { entries })
    }
}
