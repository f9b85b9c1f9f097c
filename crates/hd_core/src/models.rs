use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait InferenceModel: Send + Sync {
    /// Human readable backend name, used in logs
    fn name(&self) -> &str;

    /// Send a single user prompt and return the model's reply
    async fn chat(&self, prompt: &str) -> Result<String>;
}
