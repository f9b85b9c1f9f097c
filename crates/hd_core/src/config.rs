use std::time::Duration;

pub const DEFAULT_MODEL: &str = "ollama";
pub const DEFAULT_MODEL_NAME: &str = "llama3.2:3b";
pub const DEFAULT_MODEL_URL: &str = "http://localhost:11434";

/// Tunables of the scrape and summarize pipeline.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    /// Stories older than this many days are dropped
    pub days: i64,
    pub max_pages: u32,
    /// How many ranked stories get their content fetched and summarized
    pub top_n: usize,
    /// Concurrent article content fetches
    pub concurrency: usize,
    pub request_timeout: Duration,
    /// Upper bound for a single chat completion
    pub model_timeout: Duration,
    /// Pause between listing pages
    pub page_delay: Duration,
    pub min_content_chars: usize,
    pub max_content_chars: usize,
    /// Inference backend, see `hd_inference::create_model`
    pub model: String,
    pub model_name: String,
    pub model_url: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            days: 15,
            max_pages: 30,
            top_n: 10,
            concurrency: 10,
            request_timeout: Duration::from_secs(10),
            model_timeout: Duration::from_secs(600),
            page_delay: Duration::from_millis(200),
            min_content_chars: 100,
            max_content_chars: 1500,
            model: DEFAULT_MODEL.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            model_url: DEFAULT_MODEL_URL.to_string(),
        }
    }
}

impl DigestConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if self.days <= 0 {
            return Err(crate::Error::Config("days must be positive".to_string()));
        }
        if self.max_pages == 0 {
            return Err(crate::Error::Config("max_pages must be at least 1".to_string()));
        }
        if self.concurrency == 0 {
            return Err(crate::Error::Config("concurrency must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DigestConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.top_n, 10);
        assert_eq!(config.model_name, "llama3.2:3b");
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let config = DigestConfig {
            concurrency: 0,
            ..DigestConfig::default()
        };
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "Configuration error: concurrency must be at least 1"
        );
    }
}
