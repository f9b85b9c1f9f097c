//! Turns the ranked stories into a single essay-style digest.

use std::sync::Arc;
use lazy_static::lazy_static;
use regex::Regex;
use hd_core::{DigestConfig, InferenceModel, Story};

pub const ARTICLE_MARKER: &str = "--- ARTICLE: ";
pub const NO_CONTENT_SUMMARY: &str = "No valid content found to summarize.";

const EDITOR_INSTRUCTIONS: &str = "\
You are a Tech News Editor. Summarize the following top 10 articles into a cohesive Global Tech Digest.
Requirements:
1. Write in a clear, engaging essay style with distinct paragraphs.
2. Each paragraph must be substantial, approximately 100 words long.
3. START each paragraph with the Title of the main article, wrapped in <b> tags (e.g., <b>Title</b>: ...).
4. Use <b> tags for emphasis where appropriate, instead of asterisks.
5. Do NOT introduction or conclusion bloat. Jump straight into the news.
6. Ignore any text that looks like navigation menus, pricing tables, or garbage.

Articles:
";

lazy_static! {
    static ref MARKDOWN_BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
}

/// Rewrites `**text**` as `<b>text</b>`.
pub fn bold_markdown(text: &str) -> String {
    MARKDOWN_BOLD.replace_all(text, "<b>$1</b>").into_owned()
}

/// Builds the editor prompt, or `None` when no story has enough content.
pub fn build_prompt(stories: &[Story], min_chars: usize, max_chars: usize) -> Option<String> {
    let mut prompt = EDITOR_INSTRUCTIONS.to_string();
    let mut valid = 0;

    for story in stories {
        let content = story.content();
        if content.chars().count() < min_chars {
            continue;
        }
        let truncated: String = content
            .chars()
            .take(max_chars)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        prompt.push_str(&format!("{}{} ---\n{}\n\n", ARTICLE_MARKER, story.title, truncated));
        valid += 1;
    }

    (valid > 0).then_some(prompt)
}

pub struct DigestSummarizer {
    model: Arc<dyn InferenceModel>,
    min_content_chars: usize,
    max_content_chars: usize,
}

impl DigestSummarizer {
    pub fn new(model: Arc<dyn InferenceModel>, config: &DigestConfig) -> Self {
        Self {
            model,
            min_content_chars: config.min_content_chars,
            max_content_chars: config.max_content_chars,
        }
    }

    /// Never fails: a model error becomes the summary text itself.
    pub async fn summarize(&self, stories: &[Story]) -> String {
        let Some(prompt) = build_prompt(stories, self.min_content_chars, self.max_content_chars) else {
            return NO_CONTENT_SUMMARY.to_string();
        };

        let valid = prompt.matches(ARTICLE_MARKER).count();
        tracing::info!("🤖 Sending {} articles to {}", valid, self.model.name());

        match self.model.chat(&prompt).await {
            Ok(reply) => bold_markdown(&reply),
            Err(e) => {
                tracing::error!("{} error: {}", self.model.name(), e);
                format!(
                    "Error creating summary with {name}: {e}. Is {name} running?",
                    name = self.model.name(),
                    e = e
                )
            }
        }
    }
}
