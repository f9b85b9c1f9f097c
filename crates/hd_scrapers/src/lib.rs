pub mod content;
pub mod filter;
pub mod logging;
pub mod manager;
pub mod scrapers;

#[cfg(test)]
pub(crate) mod test_utils;

pub use content::{ContentFetcher, HttpContentFetcher};
pub use logging::{init_logging, Logger};
pub use manager::DigestManager;
pub use scrapers::{HackerNewsScraper, StorySource};

pub mod prelude {
    pub use super::scrapers::StorySource;
    pub use super::content::ContentFetcher;
    pub use hd_core::{Digest, Error, Result, Story};
}
