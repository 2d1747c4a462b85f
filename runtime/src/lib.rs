use std::sync::Arc;

pub mod ai;
pub mod config;
pub mod generator;
pub mod graph;
pub mod routes;
pub mod storage;

use ai::GraphQaChain;
use config::AppConfig;
use graph::GraphClient;
use storage::TableStore;

/// Shared state behind every route.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn TableStore>,
    pub graph_client: Arc<GraphClient>,
    /// Present only when a completion endpoint is configured.
    pub qa: Option<Arc<GraphQaChain>>,
}
