use std::path::PathBuf;
use std::sync::Arc;
use async_trait::async_trait;
use hd_core::{Digest, Result};
use hd_scrapers::DigestManager;

#[async_trait]
pub trait DigestProvider: Send + Sync {
    async fn digest(&self) -> Result<Digest>;
}

#[async_trait]
impl DigestProvider for DigestManager {
    async fn digest(&self) -> Result<Digest> {
        self.build_digest().await
    }
}

pub struct AppState {
    pub provider: Arc<dyn DigestProvider>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(provider: Arc<dyn DigestProvider>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            static_dir: static_dir.into(),
        }
    }
}
