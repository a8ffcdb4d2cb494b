// ============================================
// Rank Normalizer
// ============================================
//
// Rescales strategy-native raw scores onto the fixed 1-10 display
// scale and produces the final order. This is the one stage shared
// unconditionally by every strategy.

use crate::models::{Candidate, ScoredCandidate};
use crate::services::scoring::RawScore;
use crate::utils::{min_max, round_to_tenth};
use std::cmp::Ordering;
use tracing::debug;

/// Rescale raw scores to [1.0, 10.0] (one decimal) and stable-sort
/// descending by rating, ties keeping input order. When every raw score
/// is equal the whole batch rates exactly 10.0 rather than dividing by
/// zero.
pub fn normalize_and_rank(candidates: &[Candidate], raw: Vec<RawScore>) -> Vec<ScoredCandidate> {
    let raw_values: Vec<f64> = raw.iter().map(|r| r.raw_score).collect();
    let Some((min, max)) = min_max(&raw_values) else {
        return Vec::new();
    };
    let spread = max - min;

    let mut scored: Vec<ScoredCandidate> = raw
        .into_iter()
        .map(|r| {
            let rating = if spread.abs() < f64::EPSILON {
                10.0
            } else {
                round_to_tenth(1.0 + 9.0 * (r.raw_score - min) / spread)
            };
            ScoredCandidate {
                candidate: candidates[r.index].clone(),
                raw_score: r.raw_score,
                rating,
                explanation: r.explanation,
            }
        })
        .collect();

    // Vec::sort_by is stable, so ties keep original input order.
    scored.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));

    debug!(ranked = scored.len(), min, max, "normalized raw scores");
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::scoring::test_support::candidate;

    fn raw(index: usize, raw_score: f64) -> RawScore {
        RawScore {
            index,
            raw_score,
            explanation: String::new(),
        }
    }

    fn three_candidates() -> Vec<Candidate> {
        vec![
            candidate("One", "a", "x"),
            candidate("Two", "b", "y"),
            candidate("Three", "c", "z"),
        ]
    }

    #[test]
    fn test_ratings_span_full_scale() {
        let candidates = three_candidates();
        let scored = normalize_and_rank(&candidates, vec![raw(0, 2.0), raw(1, 5.0), raw(2, 8.0)]);
        assert_eq!(scored[0].rating, 10.0);
        assert_eq!(scored[0].candidate.title, "Three");
        assert_eq!(scored[2].rating, 1.0);
        assert_eq!(scored[2].candidate.title, "One");
        // Midpoint: 1 + 9 * 0.5 = 5.5
        assert_eq!(scored[1].rating, 5.5);
    }

    #[test]
    fn test_equal_scores_all_rate_ten() {
        let candidates = three_candidates();
        let scored = normalize_and_rank(&candidates, vec![raw(0, 0.3), raw(1, 0.3), raw(2, 0.3)]);
        assert!(scored.iter().all(|s| s.rating == 10.0));
        // Ties keep input order.
        let titles: Vec<&str> = scored.iter().map(|s| s.candidate.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_ratings_within_bounds_and_sorted() {
        let candidates = three_candidates();
        let scored = normalize_and_rank(&candidates, vec![raw(0, 0.17), raw(1, 9.4), raw(2, 3.3)]);
        for window in scored.windows(2) {
            assert!(window[0].rating >= window[1].rating);
        }
        for s in &scored {
            assert!((1.0..=10.0).contains(&s.rating));
            // One decimal place.
            assert_eq!(s.rating, round_to_tenth(s.rating));
        }
    }

    #[test]
    fn test_empty_input_yields_empty_ranking() {
        let scored = normalize_and_rank(&[], Vec::new());
        assert!(scored.is_empty());
    }
}
