use super::{RawScore, ScoringStrategy};
use crate::error::Result;
use crate::models::{Candidate, UserProfile};
use async_trait::async_trait;
use tracing::debug;

/// Weighted rule scoring. The raw score is the count of
/// independent signals found in the candidate's description: one per
/// matching category, one per matching sub-interest, one for the role
/// and one for the interest field. Only candidates with at least one
/// signal survive.
#[derive(Debug, Default)]
pub struct WeightedScorer;

impl WeightedScorer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScoringStrategy for WeightedScorer {
    async fn score(
        &self,
        profile: &UserProfile,
        candidates: &[Candidate],
    ) -> Result<Vec<RawScore>> {
        let mut scores = Vec::new();

        for (index, candidate) in candidates.iter().enumerate() {
            let description = candidate.description.to_lowercase();
            let contains = |term: &str| {
                !term.is_empty() && description.contains(term.to_lowercase().as_str())
            };

            let matched_categories: Vec<&str> = profile
                .categories
                .iter()
                .map(|c| c.as_str())
                .filter(|c| contains(c))
                .collect();
            let matched_subs: Vec<&str> = profile
                .sub_interests
                .iter()
                .map(String::as_str)
                .filter(|s| contains(s))
                .collect();
            let role = profile.role.as_ref().map(|r| r.as_str());
            let role_matched = role.map(|r| contains(r)).unwrap_or(false);
            let field_matched = contains(&profile.interest_field);

            let raw_score = (matched_categories.len()
                + matched_subs.len()
                + usize::from(role_matched)
                + usize::from(field_matched)) as f64;

            if raw_score > 0.0 {
                scores.push(RawScore {
                    index,
                    raw_score,
                    explanation: build_explanation(
                        &matched_categories,
                        &matched_subs,
                        if role_matched { role } else { None },
                        field_matched.then_some(profile.interest_field.as_str()),
                    ),
                });
            }
        }

        debug!(
            candidates = candidates.len(),
            survivors = scores.len(),
            "weighted rule pass complete"
        );
        Ok(scores)
    }

    fn name(&self) -> &'static str {
        "weighted"
    }
}

/// Conjunctive sentence built from whichever signals fired.
fn build_explanation(
    categories: &[&str],
    sub_interests: &[&str],
    role: Option<&str>,
    interest_field: Option<&str>,
) -> String {
    let mut clauses = Vec::new();
    if !categories.is_empty() {
        clauses.push(format!(
            "matches your interest in categories like {}",
            categories.join(" and ")
        ));
    }
    if !sub_interests.is_empty() {
        clauses.push(format!(
            "aligns with your specific interest in {}",
            sub_interests.join(" and ")
        ));
    }
    if let Some(role) = role {
        clauses.push(format!("relates to your role as a {role}"));
    }
    if let Some(field) = interest_field {
        clauses.push(format!("touches on your field of {field}"));
    }

    if clauses.is_empty() {
        // Unreachable with the current signal set; kept as the generic
        // fallback for surviving candidates with no listed clause.
        "This article broadly matches your stated preferences.".to_string()
    } else {
        format!("This article {}.", clauses.join(" and "))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{candidate, sports_hobbyist};
    use super::*;
    use crate::services::ProfileForm;

    #[tokio::test]
    async fn test_counts_independent_signals() {
        let profile = ProfileForm {
            role: "Researcher".to_string(),
            categories: vec!["Science".to_string()],
            ..Default::default()
        }
        .build();
        let candidates = vec![candidate(
            "One",
            "A Science breakthrough reported by a Researcher",
            "body",
        )];

        let scores = WeightedScorer::new().score(&profile, &candidates).await.unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].raw_score, 2.0);
        assert!(scores[0].explanation.contains("Science"));
        assert!(scores[0].explanation.contains("Researcher"));
    }

    #[tokio::test]
    async fn test_zero_signal_candidates_excluded() {
        let profile = sports_hobbyist();
        let candidates = vec![
            candidate("One", "Marathon training tips for runners", "body"),
            candidate("Two", "Latest Sports headlines", "body"),
            candidate("Three", "Stock market wrap", "body"),
        ];

        let scores = WeightedScorer::new().score(&profile, &candidates).await.unwrap();
        let indices: Vec<usize> = scores.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(scores[0].raw_score, 1.0); // marathon sub-interest
        assert_eq!(scores[1].raw_score, 1.0); // Sports category
    }

    #[test]
    fn test_explanation_sentence_shape() {
        let explanation = build_explanation(&["Sports"], &["marathon"], None, None);
        assert_eq!(
            explanation,
            "This article matches your interest in categories like Sports \
             and aligns with your specific interest in marathon."
        );
    }
}
