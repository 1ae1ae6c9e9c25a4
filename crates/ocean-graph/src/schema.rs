//! Neo4j schema initialization (uniqueness constraints on `name`).

use anyhow::Result;
use neo4rs::Query;
use ocean_core::EntityLabel;
use tracing::info;

use crate::GraphClient;

/// One `CREATE CONSTRAINT` statement per entity label.
pub fn schema_statements() -> Vec<String> {
    EntityLabel::ALL
        .iter()
        .map(|label| {
            format!(
                "CREATE CONSTRAINT {}_name IF NOT EXISTS FOR (n:{}) REQUIRE n.name IS UNIQUE",
                constraint_prefix(*label),
                label.as_str()
            )
        })
        .collect()
}

fn constraint_prefix(label: EntityLabel) -> &'static str {
    match label {
        EntityLabel::Topic => "topic",
        EntityLabel::Region => "region",
        EntityLabel::Organization => "organization",
        EntityLabel::PollutionSource => "pollution_source",
        EntityLabel::Measure => "measure",
    }
}

/// Initialize Neo4j schema with constraints.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema(client: &GraphClient) -> Result<()> {
    info!("Initializing Neo4j schema...");

    let statements = schema_statements();
    for statement in &statements {
        client.execute(Query::new(statement.clone())).await?;
    }

    info!("Neo4j schema initialized ({} statements)", statements.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_constraint_per_label() {
        let statements = schema_statements();
        assert_eq!(statements.len(), EntityLabel::ALL.len());
        assert!(statements[3].contains("FOR (n:PollutionSource)"));
        assert!(statements.iter().all(|s| s.contains("IF NOT EXISTS")));
    }
}
