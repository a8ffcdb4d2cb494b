// ============================================
// Presenter boundary
// ============================================
//
// Pure output formatting for the UI layer: top-K display entries and
// the submitted-preferences summary block. The caller chooses K
// explicitly.

use crate::models::{RankedResult, UserProfile};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DisplayEntry {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub description: String,
    pub url: String,
    pub image: String,
    pub rating: f64,
    pub explanation: String,
}

/// Top-K ranked candidates as display entries.
pub fn present(ranked: &RankedResult, k: usize) -> Vec<DisplayEntry> {
    ranked
        .entries
        .iter()
        .take(k)
        .map(|s| DisplayEntry {
            title: s.candidate.title.clone(),
            author: s.candidate.author.clone(),
            publisher: s.candidate.publisher.clone(),
            description: s.candidate.description.clone(),
            url: s.candidate.url.clone(),
            image: s.candidate.image.clone(),
            rating: s.rating,
            explanation: s.explanation.clone(),
        })
        .collect()
}

/// Plain-text rendering of the ranked entries.
pub fn render_text(entries: &[DisplayEntry]) -> String {
    if entries.is_empty() {
        return "No matching articles found.".to_string();
    }

    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} — rated {:.1}/10\n   by {} ({})\n   {}\n   {}\n",
            i + 1,
            entry.title,
            entry.rating,
            entry.author,
            entry.publisher,
            entry.description,
            entry.url,
        ));
        if !entry.explanation.is_empty() {
            out.push_str(&format!("   {}\n", entry.explanation));
        }
    }
    out
}

/// The survey's "Your Preferences" block.
pub fn preference_summary(profile: &UserProfile) -> String {
    let mut out = String::from("Your Preferences\n");

    let categories: Vec<&str> = profile.categories.iter().map(|c| c.as_str()).collect();
    out.push_str(&format!("Interest Categories: {}\n", join_or_none(&categories)));

    let sub_interests: Vec<&str> = profile
        .sub_interests
        .iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect();
    out.push_str(&format!("Specific Interests: {}\n", join_or_none(&sub_interests)));

    let sources: Vec<&str> = profile.preferred_sources.iter().map(String::as_str).collect();
    out.push_str(&format!("Preferred Sources: {}\n", join_or_none(&sources)));

    out.push_str(&format!(
        "Frequency: {}\n",
        profile.frequency.as_ref().map(|f| f.as_str()).unwrap_or("None")
    ));

    let content_types: Vec<&str> = profile.content_types.iter().map(|c| c.as_str()).collect();
    out.push_str(&format!("Content Type: {}\n", join_or_none(&content_types)));

    out
}

fn join_or_none(items: &[&str]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}
