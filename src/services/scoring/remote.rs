// ============================================
// Remote relevance scoring
// ============================================
//
// Delegates scoring to an external chat-completion service. Two calls
// per candidate: one extracts a key-information digest of the article
// text (cached by content hash), one asks for a 0-10 relevance score
// plus a rationale. The isolation unit is the single candidate: any
// transport, timeout or parse failure degrades that candidate to a
// zero score and rationale "N/A" without touching the rest of the
// batch.

use super::{RawScore, ScoringStrategy};
use crate::config::LlmConfig;
use crate::error::{RankerError, Result};
use crate::models::{Candidate, UserProfile};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const SCORE_PREFIX: &str = "Relevance Score:";
const RATIONALE_PREFIX: &str = "Rationale:";

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for the prompt.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String>;

    fn name(&self) -> &str;
}

#[cfg(test)]
mockall::mock! {
    pub Provider {}

    #[async_trait]
    impl LlmProvider for Provider {
        async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String>;
        fn name(&self) -> &str;
    }
}

// ============================================
// OpenAI-style chat provider
// ============================================

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

pub struct OpenAiProvider {
    client: HttpClient,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(RankerError::Config(
                "LLM_API_KEY is required for the remote strategy".to_string(),
            ));
        }

        let client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RankerError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| RankerError::Http(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RankerError::Http(format!("status {status}: {body}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| RankerError::MalformedResponse(format!("bad JSON envelope: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| RankerError::MalformedResponse("response has no choices".to_string()))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// ============================================
// Response grammar
// ============================================

/// Parsed relevance judgment from the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct RelevanceJudgment {
    pub score: f64,
    pub rationale: String,
}

/// Parse the fixed textual grammar: a `Relevance Score: <float>` line,
/// optionally followed by echoed title/url lines, then a
/// `Rationale: <text>` block running to the end of the response.
///
/// A missing or unparseable score is a `MalformedResponse`, distinct
/// from transport failures.
pub fn parse_judgment(response: &str) -> Result<RelevanceJudgment> {
    let mut score = None;
    for line in response.lines() {
        if let Some(rest) = line.trim().strip_prefix(SCORE_PREFIX) {
            let value: f64 = rest.trim().parse().map_err(|_| {
                RankerError::MalformedResponse(format!(
                    "unparseable relevance score '{}'",
                    rest.trim()
                ))
            })?;
            score = Some(value);
            break;
        }
    }
    let score = score.ok_or_else(|| {
        RankerError::MalformedResponse("no 'Relevance Score:' line in response".to_string())
    })?;

    // Rationale runs to end of response; may legitimately be absent.
    let rationale = response
        .find(RATIONALE_PREFIX)
        .map(|pos| response[pos + RATIONALE_PREFIX.len()..].trim().to_string())
        .unwrap_or_default();

    Ok(RelevanceJudgment { score, rationale })
}

// ============================================
// Remote scorer
// ============================================

/// Delegated remote scoring. Known limitation: raw scores come from the remote
/// model's own 0-10 convention and are not calibrated across a batch;
/// the min-max rescaling downstream assumes comparability that nothing
/// here verifies.
pub struct RemoteScorer {
    provider: Arc<dyn LlmProvider>,
    max_tokens: u32,
    timeout_secs: u64,
    max_concurrency: usize,
    /// Digest cache keyed by SHA-256 of the candidate content, so
    /// identical articles are extracted once per process.
    digest_cache: RwLock<HashMap<String, String>>,
}

impl RemoteScorer {
    pub fn new(provider: Arc<dyn LlmProvider>, config: &LlmConfig) -> Self {
        Self {
            provider,
            max_tokens: config.max_tokens,
            timeout_secs: config.timeout_secs,
            max_concurrency: config.max_concurrency.max(1),
            digest_cache: RwLock::new(HashMap::new()),
        }
    }

    async fn complete_with_deadline(&self, prompt: &str) -> Result<String> {
        tokio::time::timeout(
            Duration::from_secs(self.timeout_secs),
            self.provider.complete(prompt, self.max_tokens),
        )
        .await
        .map_err(|_| RankerError::Timeout(self.timeout_secs))?
    }

    /// Extract (or reuse) the key-information digest for a candidate.
    async fn digest(&self, candidate: &Candidate) -> Result<String> {
        let key = content_hash(candidate);
        {
            let cache = self.digest_cache.read().await;
            if let Some(cached) = cache.get(&key) {
                debug!(title = %candidate.title, "digest cache hit");
                return Ok(cached.clone());
            }
        }

        let prompt = format!(
            "You are a news curation assistant. Extract the key information \
             from the following article as a short digest: main topic, named \
             entities, and the central claims. Keep it under 120 words.\n\n\
             Article:\n{}",
            candidate.full_text
        );
        let digest = self.complete_with_deadline(&prompt).await?;

        let mut cache = self.digest_cache.write().await;
        cache.insert(key, digest.clone());
        Ok(digest)
    }

    /// Two-call judgment for one candidate: digest, then score.
    async fn judge(&self, profile_text: &str, candidate: &Candidate) -> Result<RelevanceJudgment> {
        let digest = self.digest(candidate).await?;

        let prompt = format!(
            "You are a news relevance rater. Given a reader profile and an \
             article digest, rate how relevant the article is to the reader \
             on a 0-10 scale.\n\n\
             Reader profile:\n{profile}\n\n\
             Article title: {title}\n\
             Article URL: {url}\n\
             Article digest:\n{digest}\n\n\
             Respond in exactly this format:\n\
             Relevance Score: <score between 0 and 10>\n\
             Title: {title}\n\
             URL: {url}\n\
             Rationale: <two or three sentences explaining the score>",
            profile = profile_text,
            title = candidate.title,
            url = candidate.url,
            digest = digest,
        );

        let response = self.complete_with_deadline(&prompt).await?;
        parse_judgment(&response)
    }
}

#[async_trait]
impl ScoringStrategy for RemoteScorer {
    async fn score(
        &self,
        profile: &UserProfile,
        candidates: &[Candidate],
    ) -> Result<Vec<RawScore>> {
        let profile_text = profile.flattened_text();

        let judgment_futures: Vec<_> = candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| {
            let profile_text = &profile_text;
            async move {
                match self.judge(profile_text, candidate).await {
                    Ok(judgment) => RawScore {
                        index,
                        raw_score: judgment.score,
                        explanation: judgment.rationale,
                    },
                    Err(e) => {
                        warn!(
                            index,
                            title = %candidate.title,
                            error = %e,
                            "remote scoring failed for candidate"
                        );
                        RawScore {
                            index,
                            raw_score: 0.0,
                            explanation: "N/A".to_string(),
                        }
                    }
                }
            }
        })
            .collect();

        let judgments = stream::iter(judgment_futures)
            .buffered(self.max_concurrency)
            .collect::<Vec<_>>()
            .await;

        info!(
            provider = self.provider.name(),
            candidates = candidates.len(),
            "remote scoring batch complete"
        );
        Ok(judgments)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

fn content_hash(candidate: &Candidate) -> String {
    let mut hasher = Sha256::new();
    hasher.update(candidate.title.as_bytes());
    hasher.update(b"\x1f");
    hasher.update(candidate.description.as_bytes());
    hasher.update(b"\x1f");
    hasher.update(candidate.full_text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{candidate, sports_hobbyist};
    use super::*;

    fn test_config() -> LlmConfig {
        LlmConfig {
            api_url: "http://localhost:9/unreachable".to_string(),
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            max_tokens: 256,
            timeout_secs: 5,
            max_concurrency: 2,
        }
    }

    #[test]
    fn test_parse_judgment_full_grammar() {
        let response = "Relevance Score: 7.5\n\
                        Title: Marathon season opens\n\
                        URL: http://example.com/marathon\n\
                        Rationale: Strong overlap with the reader's running\n\
                        interest and sports category.";
        let judgment = parse_judgment(response).unwrap();
        assert_eq!(judgment.score, 7.5);
        assert!(judgment.rationale.starts_with("Strong overlap"));
        assert!(judgment.rationale.ends_with("category."));
    }

    #[test]
    fn test_parse_judgment_missing_score_is_malformed() {
        let err = parse_judgment("Rationale: no score given").unwrap_err();
        assert!(matches!(err, RankerError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_judgment_bad_float_is_malformed() {
        let err = parse_judgment("Relevance Score: very high").unwrap_err();
        assert!(matches!(err, RankerError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_judgment_rationale_optional() {
        let judgment = parse_judgment("Relevance Score: 3").unwrap();
        assert_eq!(judgment.score, 3.0);
        assert_eq!(judgment.rationale, "");
    }

    #[test]
    fn test_content_hash_stable() {
        let a = candidate("One", "desc", "body");
        let b = candidate("One", "desc", "body");
        assert_eq!(content_hash(&a), content_hash(&b));
        let c = candidate("One", "desc", "different body");
        assert_ne!(content_hash(&a), content_hash(&c));
    }

    #[test]
    fn test_provider_requires_api_key() {
        let mut config = test_config();
        config.api_key = String::new();
        assert!(matches!(
            OpenAiProvider::new(&config),
            Err(RankerError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_failure_isolation_per_candidate() {
        let candidates: Vec<_> = (1..=5)
            .map(|i| candidate(&format!("Article {i}"), "description", "body text"))
            .collect();

        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .returning(|prompt, _| {
                if prompt.contains("Extract the key information") {
                    // Digest calls echo the article body.
                    Ok("digest of body text".to_string())
                } else if prompt.contains("Article title: Article 3") {
                    Err(RankerError::Http("simulated outage".to_string()))
                } else {
                    // Score by article number so ranking is checkable.
                    let score = (1..=5)
                        .find(|i| prompt.contains(&format!("Article title: Article {i}")))
                        .unwrap_or(0);
                    Ok(format!(
                        "Relevance Score: {score}.0\nRationale: Scripted answer."
                    ))
                }
            });
        provider.expect_name().return_const("mock".to_string());

        let scorer = RemoteScorer::new(Arc::new(provider), &test_config());
        let profile = sports_hobbyist();
        let scores = scorer.score(&profile, &candidates).await.unwrap();

        assert_eq!(scores.len(), 5);
        assert_eq!(scores[2].raw_score, 0.0);
        assert_eq!(scores[2].explanation, "N/A");
        for (i, score) in scores.iter().enumerate() {
            assert_eq!(score.index, i);
            if i != 2 {
                assert_eq!(score.raw_score, (i + 1) as f64);
                assert_eq!(score.explanation, "Scripted answer.");
            }
        }
    }

    #[tokio::test]
    async fn test_digest_cached_by_content() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let digest_calls = Arc::new(AtomicUsize::new(0));
        let counter = digest_calls.clone();

        let mut provider = MockProvider::new();
        provider.expect_complete().returning(move |prompt, _| {
            if prompt.contains("Extract the key information") {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok("digest".to_string())
            } else {
                Ok("Relevance Score: 5.0\nRationale: ok.".to_string())
            }
        });
        provider.expect_name().return_const("mock".to_string());

        // Serial fan-out so the second candidate sees the first's cache write.
        let mut config = test_config();
        config.max_concurrency = 1;
        let scorer = RemoteScorer::new(Arc::new(provider), &config);
        let profile = sports_hobbyist();
        // Two identical candidates share one extraction.
        let candidates = vec![
            candidate("Same", "desc", "identical body"),
            candidate("Same", "desc", "identical body"),
        ];

        scorer.score(&profile, &candidates).await.unwrap();
        assert_eq!(digest_calls.load(Ordering::SeqCst), 1);
    }
}
