//! Edge-list graph query for the force-directed view.

use std::collections::{BTreeMap, HashSet};

use anyhow::Result;
use neo4rs::Query;
use ocean_core::model::symbol_size_for;
use ocean_core::EntityLabel;
use serde::Serialize;

use super::{field, timestamp};
use crate::GraphClient;

/// Upper bound on edges returned by one graph query.
pub const MAX_EDGES: i64 = 200;

/// Optional filters for [`fetch_graph`].
#[derive(Debug, Clone, Default)]
pub struct GraphFilter {
    /// Keep edges touching a node with this label.
    pub label: Option<EntityLabel>,
    /// Keep edges where either endpoint's name contains this text.
    pub search: Option<String>,
}

/// One endpoint as read from a result row.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    pub id: i64,
    pub label: String,
    pub name: String,
    pub effect: String,
}

/// One directed edge as read from a result row.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRow {
    pub source: NodeRow,
    pub target: NodeRow,
    pub relationship: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    pub category: String,
    pub effect: String,
    pub symbol_size: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub relationship: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub total_nodes: usize,
    pub total_links: usize,
    pub node_types: BTreeMap<String, usize>,
    pub timestamp: String,
}

/// Nodes, links and summary, the payload the graph view renders and exports.
#[derive(Debug, Clone, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    pub summary: GraphSummary,
}

impl GraphData {
    /// Deduplicate endpoints by internal id, keeping first-seen order.
    pub fn from_edges(edges: Vec<EdgeRow>) -> Self {
        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        let mut links = Vec::with_capacity(edges.len());

        for edge in edges {
            links.push(GraphLink {
                source: edge.source.id.to_string(),
                target: edge.target.id.to_string(),
                relationship: edge.relationship,
            });
            for node in [edge.source, edge.target] {
                if seen.insert(node.id) {
                    nodes.push(GraphNode {
                        id: node.id.to_string(),
                        symbol_size: symbol_size_for(&node.label),
                        name: node.name,
                        category: node.label,
                        effect: node.effect,
                    });
                }
            }
        }

        let mut node_types = BTreeMap::new();
        for node in &nodes {
            *node_types.entry(node.category.clone()).or_insert(0) += 1;
        }

        Self {
            summary: GraphSummary {
                total_nodes: nodes.len(),
                total_links: links.len(),
                node_types,
                timestamp: timestamp(),
            },
            nodes,
            links,
        }
    }
}

/// Cypher for the edge query. Only fixed fragments are concatenated;
/// filter values travel as parameters.
pub fn graph_cypher(filter: &GraphFilter) -> String {
    let mut cypher = String::from("MATCH (n1)-[r]->(n2)\nWHERE true");

    if filter.label.is_some() {
        cypher.push_str("\n  AND ($label IN labels(n1) OR $label IN labels(n2))");
    }
    if filter.search.is_some() {
        cypher.push_str("\n  AND (n1.name CONTAINS $search OR n2.name CONTAINS $search)");
    }
    cypher.push_str(
        "\nRETURN id(n1) AS source_id,
       COALESCE(labels(n1)[0], 'Unknown') AS source_label,
       COALESCE(n1.name, '未知') AS source_name,
       COALESCE(n1.effect, '') AS source_effect,
       type(r) AS relationship,
       id(n2) AS target_id,
       COALESCE(labels(n2)[0], 'Unknown') AS target_label,
       COALESCE(n2.name, '未知') AS target_name,
       COALESCE(n2.effect, '') AS target_effect
LIMIT $limit",
    );
    cypher
}

fn graph_query(filter: &GraphFilter) -> Query {
    let mut query = Query::new(graph_cypher(filter)).param("limit", MAX_EDGES);
    if let Some(label) = filter.label {
        query = query.param("label", label.as_str());
    }
    if let Some(search) = &filter.search {
        query = query.param("search", search.as_str());
    }
    query
}

fn node_from_row(row: &neo4rs::Row, prefix: &str) -> Result<NodeRow> {
    Ok(NodeRow {
        id: field(row, &format!("{prefix}_id"))?,
        label: field(row, &format!("{prefix}_label"))?,
        name: field(row, &format!("{prefix}_name"))?,
        effect: field(row, &format!("{prefix}_effect"))?,
    })
}

/// Run the edge query and shape the result.
pub async fn fetch_graph(client: &GraphClient, filter: &GraphFilter) -> Result<GraphData> {
    let rows = client.query(graph_query(filter)).await?;

    let mut edges = Vec::with_capacity(rows.len());
    for row in &rows {
        edges.push(EdgeRow {
            source: node_from_row(row, "source")?,
            target: node_from_row(row, "target")?,
            relationship: field(row, "relationship")?,
        });
    }

    Ok(GraphData::from_edges(edges))
}
