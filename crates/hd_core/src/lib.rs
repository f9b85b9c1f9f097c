pub mod config;
pub mod error;
pub mod models;
pub mod types;

pub use config::DigestConfig;
pub use error::{Error, Result};
pub use models::InferenceModel;
pub use types::{Digest, DigestArticle, Story};
