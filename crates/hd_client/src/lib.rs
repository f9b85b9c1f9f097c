//! Client side of the digest: fetch the payload, then render it or the failure.

pub mod controller;
pub mod error;
pub mod render;
pub mod source;
pub mod view;

pub use controller::DigestController;
pub use error::ClientError;
pub use render::{render, render_page, Rendered};
pub use source::{DigestSource, HttpDigestSource, DIGEST_ENDPOINT};
pub use view::{Phase, ViewState};
