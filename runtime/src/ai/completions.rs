use anyhow::Context;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::time::{Duration, sleep};

/// Client for the hosted language-model completion endpoint. One completion
/// per call, structured output enforced through a JSON schema.
pub struct CompletionsClient {
    http: Client,
    api_key: String,
    base: String,
    model: String,
}

impl CompletionsClient {
    pub fn new(api_key: String, base: Option<String>, model: String) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(120))
            .build()
            .expect("client");
        Self {
            http,
            api_key,
            base: base.unwrap_or_else(|| "https://api.openai.com".into()),
            model,
        }
    }

    pub async fn complete_structured<T: DeserializeOwned>(
        &self,
        system: &str,
        user: &str,
        schema_name: &str,
        schema: Value,
    ) -> anyhow::Result<T> {
        let body = json!({
            "model": self.model,
            "input": [
                { "role": "system", "content": [{ "type": "input_text", "text": system }] },
                { "role": "user",   "content": [{ "type": "input_text", "text": user }] }
            ],
            "text": {
                "format": {
                    "type": "json_schema",
                    "name": schema_name,
                    "strict": true,
                    "schema": schema
                }
            },
        });

        let mut delay = Duration::from_millis(300);
        for attempt in 0..5 {
            let response = self
                .http
                .post(format!("{}/v1/responses", self.base))
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
                .context("completion endpoint unreachable")?;

            if response.status().is_success() {
                let value: Value = response
                    .json()
                    .await
                    .context("invalid completion response body")?;
                if let Some(parsed) = extract_structured_output(&value) {
                    return Ok(parsed);
                }
                anyhow::bail!("structured output missing from completion response");
            }

            if matches!(response.status(), StatusCode::TOO_MANY_REQUESTS)
                || response.status().is_server_error()
            {
                if attempt < 4 {
                    sleep(delay).await;
                    delay = Duration::from_millis((delay.as_millis() as f64 * 1.8) as u64)
                        + Duration::from_millis(fastrand::u64(0..250));
                    continue;
                }
            }

            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("completion endpoint error {status}: {detail}");
        }
        anyhow::bail!("completion retries exhausted")
    }
}

fn extract_structured_output<T: DeserializeOwned>(root: &Value) -> Option<T> {
    if let Some(parsed) = root.get("output_parsed").and_then(parse_candidate::<T>) {
        return Some(parsed);
    }
    if let Some(parsed) = root.get("output_text").and_then(parse_candidate::<T>) {
        return Some(parsed);
    }

    let items = root.get("output")?.as_array()?;
    for item in items {
        if let Some(parsed) = item.get("parsed").and_then(parse_candidate::<T>) {
            return Some(parsed);
        }
        if let Some(blocks) = item.get("content").and_then(Value::as_array) {
            for block in blocks {
                if let Some(parsed) = block.get("parsed").and_then(parse_candidate::<T>) {
                    return Some(parsed);
                }
                if let Some(parsed) = block.get("text").and_then(parse_candidate::<T>) {
                    return Some(parsed);
                }
            }
        }
    }
    None
}

fn parse_candidate<T: DeserializeOwned>(value: &Value) -> Option<T> {
    match value {
        Value::String(s) => serde_json::from_str::<T>(s).ok(),
        _ => serde_json::from_value(value.clone()).ok(),
    }
}
