use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const HN_ITEM_URL: &str = "https://news.ycombinator.com/item?id=";

/// A story scraped from the Hacker News listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub title: String,
    pub url: String,
    pub score: u32,
    pub age_text: String,
    pub date: DateTime<Utc>,
    /// Readable text of the linked page, filled in after the listing is ranked
    #[serde(default)]
    pub content: Option<String>,
}

impl Story {
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// One article card of a digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigestArticle {
    pub id: String,
    pub title: String,
    pub url: String,
    pub score: u32,
    pub age_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl DigestArticle {
    pub fn discussion_url(&self) -> String {
        format!("{}{}", HN_ITEM_URL, self.id)
    }
}

impl From<&Story> for DigestArticle {
    fn from(story: &Story) -> Self {
        Self {
            id: story.id.clone(),
            title: story.title.clone(),
            url: story.url.clone(),
            score: story.score,
            age_text: story.age_text.clone(),
            date: Some(story.date),
        }
    }
}

/// The payload served by `/api/scrape_and_summarize`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Digest {
    #[serde(default)]
    pub summary: String,
    pub articles: Vec<DigestArticle>,
}

impl Digest {
    pub fn new(summary: impl Into<String>, stories: &[Story]) -> Self {
        Self {
            summary: summary.into(),
            articles: stories.iter().map(DigestArticle::from).collect(),
        }
    }
}
