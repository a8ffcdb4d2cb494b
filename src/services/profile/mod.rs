// ============================================
// Profile Builder
// ============================================
//
// Turns raw survey fields into an immutable UserProfile and the two
// views the scoring strategies consume:
// - terms(): ordered list of profile terms for substring strategies
// - flattened_text(): single space-joined blob for vector strategies
//
// All fields are optional; an all-empty profile is valid and yields
// zero matches downstream.

use crate::models::{Category, ContentType, Frequency, Role, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum number of preferred sources kept from the form.
const MAX_PREFERRED_SOURCES: usize = 3;

/// Raw survey submission, one string per widget. Deserializes straight
/// from the form layer's JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub interest_field: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub other_category: String,
    /// One free-text slot per selected category, positional.
    #[serde(default)]
    pub sub_interests: Vec<String>,
    #[serde(default)]
    pub preferred_sources: Vec<String>,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub content_types: Vec<String>,
    #[serde(default)]
    pub other_content_type: String,
}

impl ProfileForm {
    /// Build the canonical profile. Sub-interests are padded or
    /// truncated so the positional invariant with `categories` holds by
    /// construction; the "other" category gets an empty sub-interest
    /// slot.
    pub fn build(self) -> UserProfile {
        let role = non_empty(&self.role).map(|r| Role::parse(r));

        let mut categories: Vec<Category> = self
            .categories
            .iter()
            .filter_map(|c| non_empty(c))
            .map(Category::parse)
            .collect();

        let mut sub_interests: Vec<String> = self
            .sub_interests
            .iter()
            .map(|s| s.trim().to_string())
            .collect();
        sub_interests.resize(categories.len(), String::new());

        if let Some(other) = non_empty(&self.other_category) {
            categories.push(Category::Other(other.to_string()));
            sub_interests.push(String::new());
        }

        let mut preferred_sources: Vec<String> = self
            .preferred_sources
            .iter()
            .filter_map(|s| non_empty(s))
            .map(str::to_string)
            .collect();
        preferred_sources.truncate(MAX_PREFERRED_SOURCES);

        let mut content_types: Vec<ContentType> = self
            .content_types
            .iter()
            .filter_map(|c| non_empty(c))
            .map(ContentType::parse)
            .collect();
        if let Some(other) = non_empty(&self.other_content_type) {
            content_types.push(ContentType::Other(other.to_string()));
        }

        let profile = UserProfile {
            role,
            interest_field: self.interest_field.trim().to_string(),
            categories,
            sub_interests,
            preferred_sources,
            frequency: non_empty(&self.frequency).map(Frequency::parse),
            content_types,
        };

        debug!(
            categories = profile.categories.len(),
            sub_interests = profile.sub_interests.len(),
            "built user profile"
        );

        profile
    }
}

impl UserProfile {
    /// Ordered profile terms: role, interest field, each category (the
    /// "other" category included), each non-empty sub-interest.
    pub fn terms(&self) -> Vec<String> {
        let mut terms = Vec::new();
        if let Some(role) = &self.role {
            terms.push(role.as_str().to_string());
        }
        if !self.interest_field.is_empty() {
            terms.push(self.interest_field.clone());
        }
        for category in &self.categories {
            terms.push(category.as_str().to_string());
        }
        for sub in &self.sub_interests {
            if !sub.is_empty() {
                terms.push(sub.clone());
            }
        }
        terms
    }

    /// Single descriptive string for the vector-space and remote
    /// strategies: all profile terms joined by single spaces, empty
    /// fields skipped.
    pub fn flattened_text(&self) -> String {
        self.terms().join(" ")
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
