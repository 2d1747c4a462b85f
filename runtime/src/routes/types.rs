use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct GenerateResponse {
    pub status: String,
    pub scooters: u32,
    pub parts_per_scooter: u32,
    pub vertex_rows: u64,
    pub edge_rows: u64,
    pub vertices_object: String,
    pub edges_object: String,
    pub generated_at: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct AnswerResponse {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ApiError {
    pub error: String,
}
