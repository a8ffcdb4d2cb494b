use super::{RawScore, ScoringStrategy};
use crate::error::Result;
use crate::models::{Candidate, UserProfile};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// TF-IDF cosine similarity. One composite text per
/// candidate (title + description + full text), the flattened profile
/// as an extra pseudo-document, English stop-word removal. All
/// candidates are retained; zero-similarity ones simply rank last.
#[derive(Debug, Default)]
pub struct TfIdfScorer;

impl TfIdfScorer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScoringStrategy for TfIdfScorer {
    async fn score(
        &self,
        profile: &UserProfile,
        candidates: &[Candidate],
    ) -> Result<Vec<RawScore>> {
        let profile_text = profile.flattened_text();
        let profile_tokens = tokenize(&profile_text);
        let candidate_tokens: Vec<Vec<String>> = candidates
            .iter()
            .map(|c| tokenize(&c.composite_text()))
            .collect();

        // Document frequency over the candidate corpus plus the profile
        // pseudo-document.
        let n_docs = (candidate_tokens.len() + 1) as f64;
        let mut df: HashMap<String, usize> = HashMap::new();
        for tokens in candidate_tokens.iter().chain(std::iter::once(&profile_tokens)) {
            let unique: HashSet<&String> = tokens.iter().collect();
            for term in unique {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let profile_vector = tf_idf_vector(&profile_tokens, &df, n_docs);
        let profile_terms = profile.terms();

        let mut scores = Vec::with_capacity(candidates.len());
        for (index, tokens) in candidate_tokens.iter().enumerate() {
            let vector = tf_idf_vector(tokens, &df, n_docs);
            let raw_score = cosine_similarity(&profile_vector, &vector);

            let composite = candidates[index].composite_text().to_lowercase();
            let shared: Vec<&str> = profile_terms
                .iter()
                .filter(|t| composite.contains(t.to_lowercase().as_str()))
                .map(String::as_str)
                .collect();
            let explanation = if shared.is_empty() {
                String::new()
            } else {
                format!("Shared terms: {}", shared.join(", "))
            };

            scores.push(RawScore {
                index,
                raw_score,
                explanation,
            });
        }

        debug!(
            candidates = candidates.len(),
            vocabulary = df.len(),
            "tf-idf cosine pass complete"
        );
        Ok(scores)
    }

    fn name(&self) -> &'static str {
        "tfidf"
    }
}

/// Lowercase alphanumeric tokenizer with stop-word removal.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| w.len() > 2 && !is_stop_word(w))
        .collect()
}

fn is_stop_word(word: &str) -> bool {
    matches!(
        word,
        "the" | "and" | "for" | "are" | "but" | "not" | "you" | "all" | "can" | "had" | "her"
            | "was" | "one" | "our" | "out" | "has" | "have" | "been" | "from" | "this" | "that"
            | "with" | "they" | "will" | "each" | "which" | "their" | "said" | "what" | "its"
            | "into" | "more" | "other" | "about" | "when" | "were" | "there" | "would" | "than"
    )
}

/// Length-normalized term frequency weighted by ln(N/df) + 1.
fn tf_idf_vector(
    tokens: &[String],
    df: &HashMap<String, usize>,
    n_docs: f64,
) -> HashMap<String, f64> {
    let mut counts: HashMap<&String, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }

    let total = tokens.len() as f64;
    counts
        .into_iter()
        .filter_map(|(term, count)| {
            let doc_freq = *df.get(term)? as f64;
            let tf = count as f64 / total;
            let idf = (n_docs / doc_freq).ln() + 1.0;
            Some((term.clone(), tf * idf))
        })
        .collect()
}

fn cosine_similarity(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(term, weight)| b.get(term).map(|other| weight * other))
        .sum();
    let norm_a: f64 = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|w| w * w).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{candidate, sports_hobbyist};
    use super::*;
    use crate::services::ProfileForm;

    #[tokio::test]
    async fn test_self_similarity_is_maximal() {
        let profile = sports_hobbyist();
        let text = profile.flattened_text();
        let candidates = vec![
            // The profile text as a literal candidate.
            candidate(&text, &text, &text),
            candidate("Other", "Completely unrelated cooking recipes", "pasta"),
        ];

        let scores = TfIdfScorer::new().score(&profile, &candidates).await.unwrap();
        assert!((scores[0].raw_score - 1.0).abs() < 1e-9);
        assert!(scores[1].raw_score < scores[0].raw_score);
    }

    #[tokio::test]
    async fn test_all_candidates_retained() {
        let profile = sports_hobbyist();
        let candidates = vec![
            candidate("One", "Marathon season opens", "runners gather"),
            candidate("Two", "Unrelated topic entirely", "nothing shared"),
        ];

        let scores = TfIdfScorer::new().score(&profile, &candidates).await.unwrap();
        assert_eq!(scores.len(), 2);
        assert!(scores[1].raw_score <= scores[0].raw_score);
    }

    #[tokio::test]
    async fn test_empty_profile_scores_zero() {
        let profile = ProfileForm::default().build();
        let candidates = vec![candidate("One", "Anything", "anything at all")];
        let scores = TfIdfScorer::new().score(&profile, &candidates).await.unwrap();
        assert_eq!(scores[0].raw_score, 0.0);
    }

    #[test]
    fn test_tokenize_drops_stop_words() {
        let tokens = tokenize("The marathon and the runners");
        assert_eq!(tokens, vec!["marathon", "runners"]);
    }
}
