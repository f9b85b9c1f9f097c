use std::fmt;
use hd_core::Result;
use super::InferenceModel;
use crate::digest::ARTICLE_MARKER;

/// Offline backend: echoes the opening words of every article in the prompt.
#[derive(Default)]
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn chat(&self, prompt: &str) -> Result<String> {
        let mut paragraphs = Vec::new();
        let mut lines = prompt.lines();
        while let Some(line) = lines.next() {
            let Some(title) = line
                .strip_prefix(ARTICLE_MARKER)
                .and_then(|rest| rest.strip_suffix(" ---"))
            else {
                continue;
            };
            // Take first 20 words
            let words: Vec<&str> = lines
                .next()
                .unwrap_or_default()
                .split_whitespace()
                .take(20)
                .collect();
            paragraphs.push(format!("**{}**: {}", title, words.join(" ")));
        }
        Ok(paragraphs.join("\n\n"))
    }
}
