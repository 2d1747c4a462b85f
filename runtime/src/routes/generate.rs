use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use tracing::info;

use crate::{AppState, generator::FleetGenerator, storage::write_tables};

use super::types::{ApiError, GenerateResponse};

pub fn generate_routes() -> Router<Arc<AppState>> {
    Router::new().route("/generate", post(run_generation))
}

/// Runs one full generation batch and writes both loader tables. Any
/// failure aborts the whole batch with an error body; there is no partial
/// success to report.
async fn run_generation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GenerateResponse>, (StatusCode, Json<ApiError>)> {
    let settings = state.config.datagen.fleet_settings().map_err(|err| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: err.to_string(),
            }),
        )
    })?;

    let scooters = settings.scooters;
    let parts_per_scooter = settings.parts_per_scooter;

    // The batch is CPU-bound and built whole in memory; keep it off the
    // async workers.
    let generator = FleetGenerator::new(settings);
    let tables = tokio::task::spawn_blocking(move || generator.generate())
        .await
        .map_err(|err| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError {
                    error: format!("generation task failed: {err}"),
                }),
            )
        })?;

    let prefix = state.config.datagen.output_prefix();
    let (vertices_object, edges_object) = write_tables(state.store.as_ref(), &prefix, &tables)
        .await
        .map_err(|err| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError {
                    error: err.to_string(),
                }),
            )
        })?;

    info!(
        scooters,
        parts_per_scooter,
        vertices_object = %vertices_object,
        edges_object = %edges_object,
        "fleet graph data written"
    );

    Ok(Json(GenerateResponse {
        status: "ok".to_string(),
        scooters,
        parts_per_scooter,
        vertex_rows: tables.vertices.len() as u64,
        edge_rows: tables.edges.len() as u64,
        vertices_object,
        edges_object,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }))
}
