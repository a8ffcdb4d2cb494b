use serde::{Deserialize, Serialize};

/// Reader role stated in the survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Student,
    Professional,
    Researcher,
    Journalist,
    Hobbyist,
    Other(String),
}

impl Role {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "student" => Role::Student,
            "professional" => Role::Professional,
            "researcher" => Role::Researcher,
            "journalist" => Role::Journalist,
            "hobbyist" => Role::Hobbyist,
            _ => Role::Other(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Student => "Student",
            Role::Professional => "Professional",
            Role::Researcher => "Researcher",
            Role::Journalist => "Journalist",
            Role::Hobbyist => "Hobbyist",
            Role::Other(s) => s,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::parse(&s)
    }
}

impl From<Role> for String {
    fn from(r: Role) -> Self {
        r.as_str().to_string()
    }
}

/// Interest category from the survey's fixed seven-item list, plus the
/// free-text "other" slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Technology,
    Business,
    Health,
    Sports,
    Entertainment,
    Science,
    Politics,
    Other(String),
}

impl Category {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "technology" => Category::Technology,
            "business" => Category::Business,
            "health" => Category::Health,
            "sports" => Category::Sports,
            "entertainment" => Category::Entertainment,
            "science" => Category::Science,
            "politics" => Category::Politics,
            _ => Category::Other(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Technology => "Technology",
            Category::Business => "Business",
            Category::Health => "Health",
            Category::Sports => "Sports",
            Category::Entertainment => "Entertainment",
            Category::Science => "Science",
            Category::Politics => "Politics",
            Category::Other(s) => s,
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::parse(&s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

/// Delivery frequency preference. Not used for scoring; carried through
/// to the preference summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    Daily,
    Weekly,
    AsPublished,
    Other(String),
}

impl Frequency {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "as they are published" | "as published" | "as-published" => Frequency::AsPublished,
            _ => Frequency::Other(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::AsPublished => "As they are published",
            Frequency::Other(s) => s,
        }
    }
}

impl From<String> for Frequency {
    fn from(s: String) -> Self {
        Frequency::parse(&s)
    }
}

impl From<Frequency> for String {
    fn from(f: Frequency) -> Self {
        f.as_str().to_string()
    }
}

/// Preferred content type. Not used for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    NewsArticles,
    OpinionPieces,
    ResearchReports,
    Interviews,
    Other(String),
}

impl ContentType {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "news articles" => ContentType::NewsArticles,
            "opinion pieces" => ContentType::OpinionPieces,
            "research reports" => ContentType::ResearchReports,
            "interviews" => ContentType::Interviews,
            _ => ContentType::Other(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContentType::NewsArticles => "News articles",
            ContentType::OpinionPieces => "Opinion pieces",
            ContentType::ResearchReports => "Research reports",
            ContentType::Interviews => "Interviews",
            ContentType::Other(s) => s,
        }
    }
}

impl From<String> for ContentType {
    fn from(s: String) -> Self {
        ContentType::parse(&s)
    }
}

impl From<ContentType> for String {
    fn from(c: ContentType) -> Self {
        c.as_str().to_string()
    }
}

/// Reading-interest profile, built once per submission and immutable
/// afterwards. An all-empty profile is valid and simply matches nothing.
///
/// Invariant: `sub_interests` has the same length and positional
/// correspondence as `categories` (enforced by `ProfileForm::build`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub role: Option<Role>,
    pub interest_field: String,
    pub categories: Vec<Category>,
    pub sub_interests: Vec<String>,
    pub preferred_sources: Vec<String>,
    pub frequency: Option<Frequency>,
    pub content_types: Vec<ContentType>,
}

/// One article record from the ingested table. Required fields are
/// non-empty after validation; optional fields carry defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub title: String,
    pub description: String,
    pub full_text: String,
    pub url: String,
    pub author: String,
    pub publisher: String,
    pub image: String,
}

impl Candidate {
    /// Composite text used by the vector-space strategy.
    pub fn composite_text(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.full_text)
    }
}

/// Candidate plus its strategy-native raw score and the 1-10 display
/// rating. Derived transiently per ranking run, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub raw_score: f64,
    /// Display rating in [1.0, 10.0], one decimal place, monotonic in
    /// `raw_score` within a single run.
    pub rating: f64,
    pub explanation: String,
}

/// Ordered ranking output: rating descending, ties in original input
/// order, already truncated to the caller's top-K.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankedResult {
    pub entries: Vec<ScoredCandidate>,
}

impl RankedResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
