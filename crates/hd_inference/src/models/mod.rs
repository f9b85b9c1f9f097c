use std::sync::Arc;
use hd_core::{DigestConfig, Error, Result};

pub mod dummy;
pub mod ollama;

pub use dummy::DummyModel;
pub use hd_core::InferenceModel;
pub use ollama::OllamaModel;

/// Names accepted by `create_model`
pub const AVAILABLE_MODELS: &[&str] = &["ollama", "dummy"];

/// Build the inference backend named by `config.model`.
pub fn create_model(config: &DigestConfig) -> Result<Arc<dyn InferenceModel>> {
    match config.model.to_lowercase().as_str() {
        "ollama" => Ok(Arc::new(OllamaModel::new(
            &config.model_url,
            &config.model_name,
            config.model_timeout,
        )?)),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Config(format!(
            "Unknown model '{}'. Available models: {}",
            other,
            AVAILABLE_MODELS.join(", ")
        ))),
    }
}
