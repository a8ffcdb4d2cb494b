use anyhow::{bail, Context};
use article_ranker::services::{presenter, ProfileForm};
use article_ranker::{
    services::{
        load_candidates_csv, LexicalScorer, OpenAiProvider, RemoteScorer, ScoringStrategy,
        TfIdfScorer, WeightedScorer,
    },
    Config, RankingPipeline,
};
use std::fs::File;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().context("failed to load config")?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        bail!("usage: article-ranker <profile.json> <candidates.csv> [lexical|weighted|tfidf|remote] [top_k]");
    }
    let profile_path = &args[1];
    let table_path = &args[2];
    let strategy_name = args.get(3).map(String::as_str).unwrap_or("weighted");
    let top_k = match args.get(4) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid top_k '{raw}'"))?,
        None => config.ranking.top_k,
    };

    let profile_file = File::open(profile_path)
        .with_context(|| format!("failed to open profile file '{profile_path}'"))?;
    let form: ProfileForm =
        serde_json::from_reader(profile_file).context("failed to parse profile JSON")?;
    let profile = form.build();

    let table_file = File::open(table_path)
        .with_context(|| format!("failed to open candidate table '{table_path}'"))?;
    let candidates = load_candidates_csv(table_file)?;

    let strategy: Arc<dyn ScoringStrategy> = match strategy_name {
        "lexical" => Arc::new(LexicalScorer::new()),
        "weighted" => Arc::new(WeightedScorer::new()),
        "tfidf" => Arc::new(TfIdfScorer::new()),
        "remote" => {
            let provider = Arc::new(OpenAiProvider::new(&config.llm)?);
            Arc::new(RemoteScorer::new(provider, &config.llm))
        }
        other => bail!("unknown strategy '{other}' (expected lexical, weighted, tfidf or remote)"),
    };

    info!(
        strategy = strategy.name(),
        candidates = candidates.len(),
        top_k,
        "ranking candidate articles"
    );

    let pipeline = RankingPipeline::new(strategy, top_k);
    let ranked = pipeline.rank(&profile, &candidates).await?;

    println!("{}", presenter::preference_summary(&profile));
    let entries = presenter::present(&ranked, top_k);
    println!("{}", presenter::render_text(&entries));

    Ok(())
}
