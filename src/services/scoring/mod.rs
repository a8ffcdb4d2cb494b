// ============================================
// Scoring strategies
// ============================================
//
// Four interchangeable strategies share one contract: map a profile and
// a candidate slice to raw relevance scores plus an explanation per
// surviving candidate. Strategies never mutate their inputs; filtering
// policy is per strategy (lexical and weighted drop zero scores, the
// vector and remote strategies keep everything).

pub mod lexical;
pub mod remote;
pub mod tfidf;
pub mod weighted;

pub use lexical::LexicalScorer;
pub use remote::{LlmProvider, OpenAiProvider, RemoteScorer};
pub use tfidf::TfIdfScorer;
pub use weighted::WeightedScorer;

use crate::error::Result;
use crate::models::{Candidate, UserProfile};
use async_trait::async_trait;

/// Raw relevance score for one candidate, identified by its index into
/// the input slice. Scores come back in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawScore {
    pub index: usize,
    pub raw_score: f64,
    pub explanation: String,
}

#[async_trait]
pub trait ScoringStrategy: Send + Sync {
    /// Score the candidates against the profile. Pure with respect to
    /// its inputs; the lexical and weighted strategies return only
    /// candidates with a positive score.
    async fn score(
        &self,
        profile: &UserProfile,
        candidates: &[Candidate],
    ) -> Result<Vec<RawScore>>;

    fn name(&self) -> &'static str;
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::Candidate;
    use crate::services::ProfileForm;

    pub fn candidate(title: &str, description: &str, full_text: &str) -> Candidate {
        Candidate {
            title: title.to_string(),
            description: description.to_string(),
            full_text: full_text.to_string(),
            url: format!("http://example.com/{}", title.to_lowercase()),
            author: "N/A".to_string(),
            publisher: "N/A".to_string(),
            image: String::new(),
        }
    }

    pub fn sports_hobbyist() -> crate::models::UserProfile {
        ProfileForm {
            role: "Hobbyist".to_string(),
            categories: vec!["Sports".to_string()],
            sub_interests: vec!["marathon".to_string()],
            ..Default::default()
        }
        .build()
    }
}
