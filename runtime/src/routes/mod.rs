use axum::{
    Json,
    http::{StatusCode, Uri},
};

pub mod generate;
pub mod query;
pub mod types;

pub use generate::generate_routes;
pub use query::query_routes;

use types::ApiError;

/// Router fallback: every path outside the fixed operation set is an
/// unrecognized operation.
pub async fn unknown_operation(uri: Uri) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError {
            error: format!("unknown operation {}; supported operations are /graph/asset, /graph/query, /graph/ask and /generate", uri.path()),
        }),
    )
}
