use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use thiserror::Error;
use tokio::time::{Duration, sleep};
use tracing::warn;

const RETRY_ATTEMPTS: u32 = 4;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("could not reach graph endpoint {endpoint}: {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("graph endpoint rejected the query: {detail}")]
    Syntax { detail: String },
    #[error("graph backend unavailable ({status}): {detail}")]
    Backend { status: u16, detail: String },
}

/// HTTP client for the graph database endpoint. The endpoint address comes
/// in per request (reader and writer endpoints both work); only the port is
/// fixed by configuration.
pub struct GraphClient {
    http: Client,
    port: u16,
}

impl GraphClient {
    pub fn new(port: u16) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("client");
        Self { http, port }
    }

    /// Full downstream subtree of one asset, walked over `has` edges down to
    /// the leaves, properties included.
    pub async fn downstream_assets(&self, endpoint: &str, asset_id: &str) -> Result<Value, QueryError> {
        let traversal = subtree_traversal(asset_id);
        self.run_gremlin(endpoint, &traversal).await
    }

    pub async fn run_gremlin(&self, endpoint: &str, query: &str) -> Result<Value, QueryError> {
        self.submit(endpoint, "gremlin", &json!({ "gremlin": query })).await
    }

    pub async fn run_opencypher(&self, endpoint: &str, query: &str) -> Result<Value, QueryError> {
        self.submit(endpoint, "openCypher", &json!({ "query": query })).await
    }

    async fn submit(&self, endpoint: &str, path: &str, body: &Value) -> Result<Value, QueryError> {
        let url = format!("https://{}:{}/{}", endpoint, self.port, path);

        let mut delay = Duration::from_millis(300);
        for attempt in 0..RETRY_ATTEMPTS {
            let response = self
                .http
                .post(&url)
                .json(body)
                .send()
                .await
                .map_err(|source| QueryError::Connection {
                    endpoint: endpoint.to_string(),
                    source,
                })?;

            let status = response.status();
            if status.is_success() {
                return response.json::<Value>().await.map_err(|err| QueryError::Backend {
                    status: status.as_u16(),
                    detail: format!("invalid response body: {err}"),
                });
            }

            if (status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error())
                && attempt + 1 < RETRY_ATTEMPTS
            {
                warn!(%url, %status, attempt, "graph endpoint busy, retrying");
                sleep(delay).await;
                delay = Duration::from_millis((delay.as_millis() as f64 * 1.8) as u64)
                    + Duration::from_millis(fastrand::u64(0..250));
                continue;
            }

            let detail = response.text().await.unwrap_or_default();
            if status == StatusCode::BAD_REQUEST {
                return Err(QueryError::Syntax { detail });
            }
            return Err(QueryError::Backend {
                status: status.as_u16(),
                detail,
            });
        }

        Err(QueryError::Backend {
            status: StatusCode::SERVICE_UNAVAILABLE.as_u16(),
            detail: "retries exhausted".to_string(),
        })
    }
}

/// Gremlin traversal fetching one asset's whole downstream subtree: repeat
/// `out()` until a vertex has no outgoing `has` edge, returning value maps
/// with ids and labels.
pub fn subtree_traversal(asset_id: &str) -> String {
    let escaped = asset_id.replace('\\', "\\\\").replace('\'', "\\'");
    format!("g.V('{escaped}').repeat(out()).until(__.not(out('has'))).valueMap(true)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_embeds_the_asset_id() {
        let traversal = subtree_traversal("scooter-9XK2PQ");
        assert_eq!(
            traversal,
            "g.V('scooter-9XK2PQ').repeat(out()).until(__.not(out('has'))).valueMap(true)"
        );
    }

    #[test]
    fn traversal_escapes_quotes() {
        let traversal = subtree_traversal("scooter-'A'");
        assert!(traversal.contains(r"g.V('scooter-\'A\'')"));
    }
}
