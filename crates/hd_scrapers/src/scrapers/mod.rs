use async_trait::async_trait;
use hd_core::{Error, Result, Story};
use scraper::{ElementRef, Selector};
use url::Url;

pub mod hackernews;

pub use hackernews::HackerNewsScraper;

#[async_trait]
pub trait StorySource: Send + Sync {
    /// Returns the name of the listing
    fn source(&self) -> &str;

    /// Returns the stories posted in the last `days` days, walking at most `max_pages` listing pages
    async fn fetch_stories(&self, days: i64, max_pages: u32) -> Result<Vec<Story>>;
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use super::*;

    pub fn selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector)
            .map_err(|e| Error::Scraping(format!("Invalid selector {}: {:?}", selector, e)))
    }

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::Scraping(format!("Failed to parse URL: {}", e)))
    }

    /// Absolute links pass through, anything else is resolved against `base`.
    pub fn resolve_url(base: &Url, href: &str) -> Result<String> {
        if href.starts_with("http") {
            return Ok(href.to_string());
        }
        base.join(href)
            .map(|url| url.to_string())
            .map_err(|e| Error::Scraping(format!("Failed to resolve {}: {}", href, e)))
    }

    pub fn extract_text(element: &ElementRef, selector: &Selector) -> Option<String> {
        element
            .select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }
}
