//! Aggregate statistics over the whole graph.

use anyhow::Result;
use neo4rs::Query;
use serde::Serialize;

use super::{field, timestamp};
use crate::GraphClient;

/// How many nodes the degree ranking keeps.
pub const TOP_CONNECTED: i64 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct LabelCount {
    #[serde(rename = "type")]
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelationshipCount {
    pub relationship: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectedNode {
    pub name: String,
    #[serde(rename = "type")]
    pub label: String,
    pub connections: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub node_types: Vec<LabelCount>,
    pub relationships: Vec<RelationshipCount>,
    pub most_connected_nodes: Vec<ConnectedNode>,
    pub total_nodes: i64,
    pub total_relationships: i64,
    pub timestamp: String,
}

impl GraphStats {
    fn new(
        node_types: Vec<LabelCount>,
        relationships: Vec<RelationshipCount>,
        most_connected_nodes: Vec<ConnectedNode>,
    ) -> Self {
        Self {
            total_nodes: node_types.iter().map(|c| c.count).sum(),
            total_relationships: relationships.iter().map(|c| c.count).sum(),
            node_types,
            relationships,
            most_connected_nodes,
            timestamp: timestamp(),
        }
    }
}

/// Node count per first label, edge count per type, and the top nodes by
/// degree.
pub async fn graph_stats(client: &GraphClient) -> Result<GraphStats> {
    let node_query = Query::new(
        "MATCH (n)
         RETURN COALESCE(labels(n)[0], 'Unknown') AS label, count(*) AS count
         ORDER BY count DESC, label ASC"
            .to_string(),
    );
    let mut node_types = Vec::new();
    for row in client.query(node_query).await? {
        node_types.push(LabelCount {
            label: field(&row, "label")?,
            count: field(&row, "count")?,
        });
    }

    let rel_query = Query::new(
        "MATCH ()-[r]->()
         RETURN type(r) AS relationship, count(*) AS count
         ORDER BY count DESC, relationship ASC"
            .to_string(),
    );
    let mut relationships = Vec::new();
    for row in client.query(rel_query).await? {
        relationships.push(RelationshipCount {
            relationship: field(&row, "relationship")?,
            count: field(&row, "count")?,
        });
    }

    let degree_query = Query::new(
        "MATCH (n)-[r]-()
         RETURN COALESCE(n.name, '未知') AS name,
                COALESCE(labels(n)[0], 'Unknown') AS label,
                count(r) AS connections
         ORDER BY connections DESC, name ASC
         LIMIT $limit"
            .to_string(),
    )
    .param("limit", TOP_CONNECTED);
    let mut most_connected = Vec::new();
    for row in client.query(degree_query).await? {
        most_connected.push(ConnectedNode {
            name: field(&row, "name")?,
            label: field(&row, "label")?,
            connections: field(&row, "connections")?,
        });
    }

    Ok(GraphStats::new(node_types, relationships, most_connected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_are_sums() {
        let stats = GraphStats::new(
            vec![
                LabelCount { label: "Topic".into(), count: 3 },
                LabelCount { label: "Measure".into(), count: 5 },
            ],
            vec![RelationshipCount { relationship: "ADOPTS".into(), count: 5 }],
            vec![],
        );
        assert_eq!(stats.total_nodes, 8);
        assert_eq!(stats.total_relationships, 5);
    }

    #[test]
    fn test_serialized_shape() {
        let stats = GraphStats::new(
            vec![LabelCount { label: "Topic".into(), count: 1 }],
            vec![],
            vec![ConnectedNode { name: "T1".into(), label: "Topic".into(), connections: 6 }],
        );
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["nodeTypes"][0]["type"], "Topic");
        assert_eq!(json["mostConnectedNodes"][0]["connections"], 6);
        assert_eq!(json["totalNodes"], 1);
    }
}
