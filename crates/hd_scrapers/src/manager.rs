use std::sync::Arc;
use futures::future::join_all;
use tokio::sync::Semaphore;
use hd_core::{Digest, DigestConfig, Error, InferenceModel, Result, Story};
use hd_inference::DigestSummarizer;
use crate::content::{ContentFetcher, HttpContentFetcher};
use crate::filter::{is_tech_story, rank_stories};
use crate::scrapers::{HackerNewsScraper, StorySource};

/// Scrape, filter, rank, fetch and summarize: one call per digest.
pub struct DigestManager {
    config: DigestConfig,
    source: Arc<dyn StorySource>,
    fetcher: Arc<dyn ContentFetcher>,
    summarizer: DigestSummarizer,
    semaphore: Arc<Semaphore>,
}

impl DigestManager {
    pub fn new(config: DigestConfig, inference: Arc<dyn InferenceModel>) -> Result<Self> {
        let source = Arc::new(HackerNewsScraper::new(&config)?);
        let fetcher = Arc::new(HttpContentFetcher::new(&config)?);
        Self::with_parts(config, source, fetcher, inference)
    }

    pub fn with_parts(
        config: DigestConfig,
        source: Arc<dyn StorySource>,
        fetcher: Arc<dyn ContentFetcher>,
        inference: Arc<dyn InferenceModel>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            summarizer: DigestSummarizer::new(inference, &config),
            semaphore: Arc::new(Semaphore::new(config.concurrency)),
            config,
            source,
            fetcher,
        })
    }

    pub fn config(&self) -> &DigestConfig {
        &self.config
    }

    /// The `top_n` best tech stories of the window, without content.
    pub async fn top_stories(&self) -> Result<Vec<Story>> {
        tracing::info!("🦗 Scraping {} (last {} days, up to {} pages)", self.source.source(), self.config.days, self.config.max_pages);
        let stories = self.source.fetch_stories(self.config.days, self.config.max_pages).await?;
        tracing::info!("Scraped {} articles.", stories.len());

        let tech: Vec<Story> = stories.into_iter().filter(is_tech_story).collect();
        tracing::info!("Filtered down to {} tech articles.", tech.len());

        let mut ranked = rank_stories(tech);
        ranked.truncate(self.config.top_n);
        tracing::info!("Selecting top {} for summarization.", ranked.len());
        Ok(ranked)
    }

    /// Fills in `content` for every story, `concurrency` fetches at a time.
    pub async fn fetch_contents(&self, stories: Vec<Story>) -> Result<Vec<Story>> {
        let futures: Vec<_> = stories
            .into_iter()
            .map(|mut story| {
                let fetcher = self.fetcher.clone();
                let semaphore = self.semaphore.clone();
                async move {
                    let _permit = semaphore.acquire().await.map_err(|e| Error::External(e.into()))?;
                    story.content = Some(fetcher.fetch_content(&story.url).await);
                    tracing::debug!("📰 {} ({} chars)", story.title, story.content().len());
                    Ok::<_, Error>(story)
                }
            })
            .collect();

        join_all(futures).await.into_iter().collect()
    }

    pub async fn summarize(&self, stories: &[Story]) -> String {
        self.summarizer.summarize(stories).await
    }

    pub async fn build_digest(&self) -> Result<Digest> {
        let top = self.top_stories().await?;
        let with_content = self.fetch_contents(top).await?;
        let ranked = rank_stories(with_content);
        let summary = self.summarize(&ranked).await;
        tracing::info!("✅ Digest ready with {} articles", ranked.len());
        Ok(Digest::new(summary, &ranked))
    }
}
