use axum::{Json, extract::State};
use serde::Serialize;
use volcano_shared::DatasetSummary;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub dataset: Option<DatasetSummary>,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        dataset: state.dataset.as_deref().cloned(),
    })
}
