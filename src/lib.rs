pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{RankerError, Result};
pub use models::{Candidate, RankedResult, ScoredCandidate, UserProfile};
pub use services::{ProfileForm, RankingPipeline, ScoringStrategy};
