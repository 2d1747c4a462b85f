use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::graph::GraphClient;

use super::completions::CompletionsClient;

/// What the generated fleet graph looks like, for query synthesis. Vertex
/// ids double as names; all containment edges share the `has` label.
const GRAPH_SCHEMA_SUMMARY: &str = "The graph models a scooter fleet. Vertex labels: scooter, part, \
incident, legal_case, manufacturer, legal_warranty, in_transit_journey, weather_sunny, \
weather_cloudy, weather_rainy, warehouse, parking_station, maintenance_center, driver, \
payment_method, fault, warranty, claim_fault, fleet_owner. Every child asset is connected to its \
owner by a directed edge labeled `has`, pointing from parent to child. Vertex ids double as names.";

const QUERY_SYSTEM_PROMPT: &str = "You translate questions about a scooter fleet graph into a \
single openCypher query. Do not apologize and just produce the query. Respond with JSON matching \
the schema.";

const ANSWER_SYSTEM_PROMPT: &str = "You answer questions directly from graph query results. Do \
not apologize and just respond to the question. Respond with JSON matching the schema.";

#[derive(Debug, Deserialize)]
struct SynthesizedQuery {
    query: String,
}

#[derive(Debug, Deserialize)]
struct PhrasedAnswer {
    answer: String,
}

/// Natural-language question in, phrased answer out: one completion
/// synthesizes an openCypher query from the fleet schema, the proxy runs it
/// against the graph endpoint, a second completion phrases the rows.
pub struct GraphQaChain {
    completions: Arc<CompletionsClient>,
    graph: Arc<GraphClient>,
}

impl GraphQaChain {
    pub fn new(completions: Arc<CompletionsClient>, graph: Arc<GraphClient>) -> Self {
        Self { completions, graph }
    }

    pub async fn ask(&self, endpoint: &str, question: &str) -> Result<String> {
        let synthesized: SynthesizedQuery = self
            .completions
            .complete_structured(
                QUERY_SYSTEM_PROMPT,
                &query_user_prompt(question),
                "opencypher_query",
                query_schema(),
            )
            .await
            .context("failed to synthesize an openCypher query")?;

        let rows = self
            .graph
            .run_opencypher(endpoint, &synthesized.query)
            .await
            .with_context(|| format!("synthesized query failed: {}", synthesized.query))?;

        let phrased: PhrasedAnswer = self
            .completions
            .complete_structured(
                ANSWER_SYSTEM_PROMPT,
                &answer_user_prompt(question, &synthesized.query, &rows),
                "graph_answer",
                answer_schema(),
            )
            .await
            .context("failed to phrase the query result")?;

        Ok(phrased.answer)
    }
}

fn query_user_prompt(question: &str) -> String {
    format!(
        "{GRAPH_SCHEMA_SUMMARY}\n\nQuestion: {question}\n\nReturn one openCypher query that \
         answers the question against this graph."
    )
}

fn answer_user_prompt(question: &str, query: &str, rows: &Value) -> String {
    format!(
        "Question: {question}\n\nQuery that was executed:\n{query}\n\nQuery result rows:\n{rows}\n\n\
         Answer the question directly from these rows."
    )
}

fn query_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["query"],
        "properties": {
            "query": { "type": "string" }
        }
    })
}

fn answer_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["answer"],
        "properties": {
            "answer": { "type": "string" }
        }
    })
}
