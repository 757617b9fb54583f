//! Turning free-text ideas into structured submissions.
//!
//! The structuring backend sits behind [`IdeaStructurer`] so the mock can be
//! swapped for a real service without touching call sites.

use crate::error::{Error, Result};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TITLE: &str = "Community Idea";

/// Latency of the mock structuring backend
pub const MOCK_LATENCY: Duration = Duration::from_millis(900);

/// An idea ready for community voting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredIdea {
    pub title: String,
    pub summary_160_chars: String,
    pub benefits: String,
    pub estimated_scope: String,
    pub area: String,
    pub tags: Vec<String>,
    pub open_questions: Vec<String>,
}

fn first_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

fn first_line_or_default(text: &str) -> String {
    match text.split('\n').next() {
        Some(line) if !line.is_empty() => line.to_string(),
        _ => DEFAULT_TITLE.to_string(),
    }
}

impl StructuredIdea {
    /// Structure without any backend: the text is just sliced into fields
    pub fn from_free_text(text: &str) -> Self {
        let title = first_chars(&first_line_or_default(text), 60);
        Self {
            title,
            summary_160_chars: first_chars(text, 160),
            benefits: String::new(),
            estimated_scope: "small".to_string(),
            area: String::new(),
            tags: Vec::new(),
            open_questions: Vec::new(),
        }
    }
}

/// Backend that structures a free-text idea
#[async_trait]
pub trait IdeaStructurer: Send + Sync {
    async fn structure(&self, text: &str) -> Result<StructuredIdea>;
}

/// Canned reply after a fixed delay
#[derive(Debug, Clone)]
pub struct MockStructurer {
    pub latency: Duration,
}

impl Default for MockStructurer {
    fn default() -> Self {
        Self {
            latency: MOCK_LATENCY,
        }
    }
}

impl MockStructurer {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    fn reply(text: &str) -> StructuredIdea {
        let title = if text.chars().count() > 40 {
            format!("{}...", first_chars(text, 40))
        } else {
            first_line_or_default(text)
        };

        StructuredIdea {
            title,
            summary_160_chars: first_chars(text, 160),
            benefits: "• Increased community engagement • Improved local amenity".to_string(),
            estimated_scope: "medium".to_string(),
            area: "Local area".to_string(),
            tags: vec!["community".to_string(), "infrastructure".to_string()],
            open_questions: vec![
                "What is the budget?".to_string(),
                "Who will maintain it?".to_string(),
            ],
        }
    }
}

#[async_trait]
impl IdeaStructurer for MockStructurer {
    async fn structure(&self, text: &str) -> Result<StructuredIdea> {
        tokio::time::sleep(self.latency).await;
        Ok(Self::reply(text))
    }
}

/// Structure an idea, giving up after `timeout`.
///
/// Dropping the returned future cancels the backend call.
pub async fn structure_idea(
    structurer: &dyn IdeaStructurer,
    text: &str,
    timeout: Duration,
) -> Result<StructuredIdea> {
    if text.trim().is_empty() {
        return Err(Error::Validation("Please enter your idea first".to_string()));
    }

    debug!("Structuring idea ({} chars)", text.chars().count());
    match tokio::time::timeout(timeout, structurer.structure(text)).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(timeout.as_millis() as u64)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStructurer;

    #[async_trait]
    impl IdeaStructurer for FailingStructurer {
        async fn structure(&self, _text: &str) -> Result<StructuredIdea> {
            Err(Error::Structuring("backend unavailable".to_string()))
        }
    }

    #[test]
    fn test_plain_structuring() {
        let idea = StructuredIdea::from_free_text("Bike lanes on High St\nThey would be safer.");
        assert_eq!(idea.title, "Bike lanes on High St");
        assert_eq!(idea.estimated_scope, "small");
        assert!(idea.tags.is_empty());

        assert_eq!(StructuredIdea::from_free_text("\nbody").title, DEFAULT_TITLE);
        let long = "x".repeat(200);
        let idea = StructuredIdea::from_free_text(&long);
        assert_eq!(idea.title.len(), 60);
        assert_eq!(idea.summary_160_chars.len(), 160);
    }

    #[tokio::test]
    async fn test_mock_reply_truncates_long_titles() {
        let structurer = MockStructurer::new(Duration::from_millis(1));
        let text = "A community garden next to the library with raised beds";
        let idea = structure_idea(&structurer, text, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(idea.title, "A community garden next to the library w...");
        assert_eq!(idea.estimated_scope, "medium");
        assert_eq!(idea.tags, vec!["community", "infrastructure"]);
    }

    #[tokio::test]
    async fn test_short_text_keeps_first_line() {
        let structurer = MockStructurer::new(Duration::ZERO);
        let idea = structure_idea(&structurer, "Dog park\nnear the river", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(idea.title, "Dog park");
    }

    #[tokio::test]
    async fn test_blank_idea_rejected() {
        let err = structure_idea(&MockStructurer::default(), "  ", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_backend_times_out() {
        let structurer = MockStructurer::default();
        let err = structure_idea(&structurer, "Pool", Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout(100)));
    }

    #[tokio::test]
    async fn test_backend_errors_propagate() {
        let err = structure_idea(&FailingStructurer, "Pool", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Structuring(_)));
    }
}
