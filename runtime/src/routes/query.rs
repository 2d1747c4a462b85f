use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::{AppState, graph::QueryError};

use super::types::{AnswerResponse, ApiError};

#[derive(Debug, Deserialize)]
pub struct AssetParams {
    pub graph_endpoint: String,
    pub asset_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RawQueryParams {
    pub graph_endpoint: String,
    pub gremlin_query: String,
}

#[derive(Debug, Deserialize)]
pub struct AskParams {
    pub graph_endpoint: String,
    pub llm_query: String,
}

pub fn query_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/graph/asset", get(get_asset_subtree))
        .route("/graph/query", get(run_raw_query))
        .route("/graph/ask", get(ask_graph))
}

async fn get_asset_subtree(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AssetParams>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<ApiError>)> {
    let result = state
        .graph_client
        .downstream_assets(&params.graph_endpoint, &params.asset_id)
        .await
        .map_err(query_error_response)?;

    info!(asset_id = %params.asset_id, "asset subtree fetched");
    Ok((StatusCode::CREATED, Json(result)))
}

async fn run_raw_query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RawQueryParams>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<ApiError>)> {
    let result = state
        .graph_client
        .run_gremlin(&params.graph_endpoint, &params.gremlin_query)
        .await
        .map_err(query_error_response)?;

    info!("raw query executed");
    Ok((StatusCode::ACCEPTED, Json(result)))
}

async fn ask_graph(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AskParams>,
) -> Result<(StatusCode, Json<AnswerResponse>), (StatusCode, Json<ApiError>)> {
    let Some(qa) = state.qa.as_ref() else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError {
                error: "no completion endpoint configured; set OPENAI_API_KEY to enable \
                        natural-language questions"
                    .to_string(),
            }),
        ));
    };

    let answer = qa
        .ask(&params.graph_endpoint, &params.llm_query)
        .await
        .map_err(|err| {
            (
                StatusCode::BAD_GATEWAY,
                Json(ApiError {
                    error: format!("{err:#}"),
                }),
            )
        })?;

    info!("natural-language question answered");
    Ok((
        StatusCode::NON_AUTHORITATIVE_INFORMATION,
        Json(AnswerResponse {
            question: params.llm_query,
            answer,
        }),
    ))
}

fn query_error_response(err: QueryError) -> (StatusCode, Json<ApiError>) {
    let status = match &err {
        QueryError::Syntax { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        QueryError::Connection { .. } | QueryError::Backend { .. } => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(ApiError {
            error: err.to_string(),
        }),
    )
}
