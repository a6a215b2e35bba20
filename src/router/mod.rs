//! Query routing
//!
//! Classifies free-text queries into specialist categories and dispatches
//! them to the matching agent.

pub mod multi_agent;

pub use multi_agent::MultiAgentRouter;

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Specialist category a query can route to
///
/// Exactly one category is chosen per query; queries that match no
/// specialist signature resolve to `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Math,
    English,
    Language,
    #[serde(rename = "cs")]
    ComputerScience,
    General,
}

impl Category {
    /// String label for logging and serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::English => "english",
            Self::Language => "language",
            Self::ComputerScience => "cs",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a routed dispatch
#[derive(Debug, Clone, Serialize)]
pub struct RoutedResponse {
    /// Category the classifier resolved to
    pub category: Category,
    /// Name of the specialist agent that answered
    pub specialist: String,
    /// The specialist's answer
    pub content: String,
}

/// Find a word at word boundaries in text (prevents false positives)
///
/// Returns the position of the first occurrence of `word` that is surrounded
/// by word boundaries (whitespace, punctuation, or start/end of string).
/// Prevents matches like "MATH" inside "AFTERMATH".
fn find_word_boundary(text: &str, word: &str) -> Option<usize> {
    let word_len = word.len();
    let text_bytes = text.as_bytes();

    for (pos, _) in text.match_indices(word) {
        let before_is_boundary =
            pos == 0 || !text_bytes[pos - 1].is_ascii_alphanumeric();

        let after_pos = pos + word_len;
        let after_is_boundary =
            after_pos >= text.len() || !text_bytes[after_pos].is_ascii_alphanumeric();

        if before_is_boundary && after_is_boundary {
            return Some(pos);
        }
    }

    None
}

/// Parse a classifier reply into a category
///
/// Uses word-boundary keyword matching over the uppercased reply; when
/// several keywords appear, the leftmost wins so replies like
/// "MATH, not CS" resolve deterministically. An empty or keyword-free
/// reply is [`AppError::ClassificationAmbiguous`], which the router
/// resolves to [`Category::General`] internally.
pub fn parse_category(response: &str) -> AppResult<Category> {
    let normalized = response.trim().to_uppercase();

    if normalized.is_empty() {
        return Err(AppError::ClassificationAmbiguous {
            response: response.to_string(),
        });
    }

    // COMPUTER covers replies like "computer_science_assistant"; CS covers
    // the bare keyword the routing prompt asks for.
    let candidates = [
        (find_word_boundary(&normalized, "MATH"), Category::Math),
        (find_word_boundary(&normalized, "ENGLISH"), Category::English),
        (
            find_word_boundary(&normalized, "LANGUAGE"),
            Category::Language,
        ),
        (
            find_word_boundary(&normalized, "COMPUTER"),
            Category::ComputerScience,
        ),
        (
            find_word_boundary(&normalized, "CS"),
            Category::ComputerScience,
        ),
        (find_word_boundary(&normalized, "GENERAL"), Category::General),
    ];

    candidates
        .into_iter()
        .filter_map(|(pos, category)| pos.map(|p| (p, category)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, category)| category)
        .ok_or_else(|| AppError::ClassificationAmbiguous {
            response: response.to_string(),
        })
}
