//! Single node lookup with its direct neighbours.

use std::collections::BTreeMap;

use anyhow::Result;
use neo4rs::Query;
use serde::Serialize;

use super::field;
use crate::GraphClient;

/// A neighbour of the requested node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectedEntity {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetail {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub label: String,
    pub properties: BTreeMap<String, String>,
    /// Neighbours keyed by relationship type.
    pub connections: BTreeMap<String, Vec<ConnectedEntity>>,
    pub total_connections: usize,
}

/// One result row: the node columns repeat, the neighbour columns may be
/// empty when the node has no edges.
#[derive(Debug, Clone)]
struct DetailRow {
    rel_type: String,
    related: Option<ConnectedEntity>,
}

fn group_connections(rows: Vec<DetailRow>) -> BTreeMap<String, Vec<ConnectedEntity>> {
    let mut connections: BTreeMap<String, Vec<ConnectedEntity>> = BTreeMap::new();
    for row in rows {
        if let (false, Some(related)) = (row.rel_type.is_empty(), row.related) {
            connections.entry(row.rel_type).or_default().push(related);
        }
    }
    connections
}

/// Look up a node by internal id. `Ok(None)` when the id does not parse or
/// does not resolve to a node.
pub async fn node_detail(client: &GraphClient, raw_id: &str) -> Result<Option<NodeDetail>> {
    let Ok(id) = raw_id.trim().parse::<i64>() else {
        return Ok(None);
    };

    let query = Query::new(
        "MATCH (n) WHERE id(n) = $id
         OPTIONAL MATCH (n)-[r]-(related)
         RETURN COALESCE(n.name, '未知') AS name,
                COALESCE(labels(n)[0], 'Unknown') AS label,
                keys(n) AS keys,
                [k IN keys(n) | COALESCE(toString(n[k]), '')] AS values,
                COALESCE(type(r), '') AS rel_type,
                COALESCE(id(related), -1) AS related_id,
                COALESCE(related.name, '未知') AS related_name,
                COALESCE(labels(related)[0], 'Unknown') AS related_label
         ORDER BY rel_type, related_name"
            .to_string(),
    )
    .param("id", id);

    let rows = client.query(query).await?;
    let Some(first) = rows.first() else {
        return Ok(None);
    };

    let name: String = field(first, "name")?;
    let label: String = field(first, "label")?;
    let keys: Vec<String> = field(first, "keys")?;
    let values: Vec<String> = field(first, "values")?;
    let properties = keys.into_iter().zip(values).collect();

    let mut detail_rows = Vec::with_capacity(rows.len());
    for row in &rows {
        let related_id: i64 = field(row, "related_id")?;
        detail_rows.push(DetailRow {
            rel_type: field(row, "rel_type")?,
            related: (related_id >= 0)
                .then(|| -> Result<ConnectedEntity> {
                    Ok(ConnectedEntity {
                        id: related_id.to_string(),
                        name: field(row, "related_name")?,
                        label: field(row, "related_label")?,
                    })
                })
                .transpose()?,
        });
    }

    let connections = group_connections(detail_rows);
    let total_connections = connections.values().map(Vec::len).sum();

    Ok(Some(NodeDetail {
        id: id.to_string(),
        name,
        label,
        properties,
        connections,
        total_connections,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: &str, name: &str, label: &str) -> ConnectedEntity {
        ConnectedEntity {
            id: id.into(),
            name: name.into(),
            label: label.into(),
        }
    }

    #[test]
    fn test_group_by_relationship() {
        let rows = vec![
            DetailRow { rel_type: "ADOPTS".into(), related: Some(entity("2", "M1", "Measure")) },
            DetailRow { rel_type: "ADOPTS".into(), related: Some(entity("3", "M2", "Measure")) },
            DetailRow { rel_type: "HAPPENS_IN".into(), related: Some(entity("4", "R1", "Region")) },
        ];
        let grouped = group_connections(rows);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["ADOPTS"].len(), 2);
        assert_eq!(grouped["HAPPENS_IN"][0].name, "R1");
    }

    #[test]
    fn test_isolated_node_has_no_connections() {
        let rows = vec![DetailRow { rel_type: String::new(), related: None }];
        assert!(group_connections(rows).is_empty());
    }
}
