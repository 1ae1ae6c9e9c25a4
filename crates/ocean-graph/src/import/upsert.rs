//! Idempotent MERGE statements for one upsert plan.
//!
//! Creates nodes and relationships:
//! - (:Topic)-[:HAPPENS_IN]->(:Region)
//! - (:Organization)-[:IMPLEMENTED_BY]->(:Topic)
//! - (:Topic)-[:TARGETS]->(:PollutionSource)
//! - (:Topic)-[:ADOPTS]->(:Measure)

use anyhow::{Context, Result};
use neo4rs::Query;
use ocean_core::{EntityLabel, RelationshipType};
use tracing::debug;

use super::row::UpsertPlan;
use crate::GraphClient;

const MERGE_TOPIC: &str = "MERGE (t:Topic {name: $topic})
     SET t.effect = $effect";

/// Cypher merging the related node and its edge to an existing topic.
/// Labels and relationship types come from closed enums only. The edge
/// records its position within the source cell so list fields can be read
/// back in their original order.
pub fn merge_edge_cypher(rel: RelationshipType) -> String {
    let other = if rel.from_label() == EntityLabel::Topic {
        rel.to_label()
    } else {
        rel.from_label()
    };
    let pattern = if rel.from_label() == EntityLabel::Topic {
        format!("(t)-[r:{}]->(o)", rel.as_str())
    } else {
        format!("(o)-[r:{}]->(t)", rel.as_str())
    };

    format!(
        "MATCH (t:Topic {{name: $topic}})
         MERGE (o:{} {{name: $name}})
         MERGE {}
         SET r.position = $position",
        other.as_str(),
        pattern
    )
}

/// Zero-based index of the next edge of type `rel` given the edges before it.
fn edge_position(earlier: &[(RelationshipType, String)], rel: RelationshipType) -> i64 {
    earlier.iter().filter(|(r, _)| *r == rel).count() as i64
}

fn plan_queries(plan: &UpsertPlan) -> Vec<Query> {
    let mut queries = Vec::with_capacity(plan.edges.len() + 1);

    queries.push(
        Query::new(MERGE_TOPIC.to_string())
            .param("topic", plan.topic.as_str())
            .param("effect", plan.effect.as_str()),
    );

    for (i, (rel, name)) in plan.edges.iter().enumerate() {
        queries.push(
            Query::new(merge_edge_cypher(*rel))
                .param("topic", plan.topic.as_str())
                .param("name", name.as_str())
                .param("position", edge_position(&plan.edges[..i], *rel)),
        );
    }
    queries
}

/// Write one plan atomically. On failure the row's transaction is rolled
/// back and nothing of the row remains.
pub async fn write_plan(client: &GraphClient, plan: &UpsertPlan) -> Result<()> {
    let mut txn = client.start_txn().await?;

    for query in plan_queries(plan) {
        if let Err(e) = txn.run(query).await {
            if let Err(rollback_err) = txn.rollback().await {
                debug!(error = %rollback_err, "Rollback after failed upsert also failed");
            }
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to upsert topic '{}'", plan.topic)));
        }
    }

    txn.commit().await.context("Failed to commit row transaction")?;
    debug!(topic = %plan.topic, edges = plan.edges.len(), "Upserted topic");
    Ok(())
}
