//! Name substring search and per-label listing.

use anyhow::Result;
use neo4rs::Query;
use ocean_core::EntityLabel;
use serde::Serialize;

use super::field;
use crate::GraphClient;

pub const DEFAULT_SEARCH_LIMIT: i64 = 10;
pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 1000;

/// A node as listed by search and label queries.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub label: String,
    pub effect: String,
}

const NODE_COLUMNS: &str = "id(n) AS id,
                COALESCE(n.name, '未知') AS name,
                COALESCE(labels(n)[0], 'Unknown') AS label,
                COALESCE(n.effect, '') AS effect";

fn parse_nodes(rows: Vec<neo4rs::Row>) -> Result<Vec<NodeSummary>> {
    let mut nodes = Vec::with_capacity(rows.len());
    for row in rows {
        let id: i64 = field(&row, "id")?;
        nodes.push(NodeSummary {
            id: id.to_string(),
            name: field(&row, "name")?,
            label: field(&row, "label")?,
            effect: field(&row, "effect")?,
        });
    }
    Ok(nodes)
}

/// Nodes of any label whose name contains `text` (case-sensitive).
pub async fn search_nodes(client: &GraphClient, text: &str, limit: i64) -> Result<Vec<NodeSummary>> {
    let query = Query::new(format!(
        "MATCH (n)
         WHERE n.name CONTAINS $query
         RETURN {NODE_COLUMNS}
         ORDER BY name
         LIMIT $limit"
    ))
    .param("query", text)
    .param("limit", limit.clamp(1, MAX_LIMIT));

    parse_nodes(client.query(query).await?)
}

/// Up to `limit` nodes carrying `label`.
pub async fn nodes_by_label(client: &GraphClient, label: EntityLabel, limit: i64) -> Result<Vec<NodeSummary>> {
    // The label comes from the closed enum, never from raw input.
    let query = Query::new(format!(
        "MATCH (n:{label})
         RETURN {NODE_COLUMNS}
         ORDER BY name
         LIMIT $limit",
        label = label.as_str()
    ))
    .param("limit", limit.clamp(1, MAX_LIMIT));

    parse_nodes(client.query(query).await?)
}
