pub mod digest;
pub mod models;

pub use digest::DigestSummarizer;
pub use models::create_model;

pub mod prelude {
    pub use super::digest::DigestSummarizer;
    pub use super::models::create_model;
    pub use hd_core::{DigestConfig, Error, InferenceModel, Result, Story};
}
