use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub mod handlers;
pub mod state;

pub use state::{AppState, DigestProvider};

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(handlers::root))
        .route("/api/scrape_and_summarize", get(handlers::scrape_and_summarize))
        .route("/digest", get(handlers::digest_page))
        .nest_service("/static", static_files)
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> hd_core::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use hd_core::{Digest, Error, Result};
    pub use crate::{AppState, DigestProvider};
}
