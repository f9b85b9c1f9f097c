use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use hd_client::{render, render_page, ViewState};
use hd_core::{Digest, Error};
use crate::AppState;

/// Pipeline failures surface as `{"error": ...}` with a 400 or 500 status.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Digest failed: {}", self.0);
        let status = match self.0 {
            Error::Config(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Go to /static/index.html to use the app" }))
}

pub async fn scrape_and_summarize(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Digest>, ApiError> {
    tracing::info!("Starting scrape...");
    let digest = state.provider.digest().await?;
    Ok(Json(digest))
}

/// Same digest, rendered on the server.
pub async fn digest_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let mut view = ViewState::default();
    view.loading();
    match state.provider.digest().await {
        Ok(digest) => view.success(render(&digest)),
        Err(e) => {
            tracing::error!("Digest failed: {}", e);
            view.failure(e.to_string());
        }
    }
    Html(render_page(&view))
}
