//! Topic-centred news records in the source CSV shape.

use anyhow::Result;
use neo4rs::Query;
use ocean_core::{NewsRecord, RelationshipType};

use super::field;
use crate::GraphClient;

/// One row per Topic with the names of every related entity collected.
/// Each OPTIONAL MATCH is collapsed before the next to avoid a cartesian
/// product across relationship types. Measures and organizations are
/// ordered by the cell position stored on their edge.
pub fn news_cypher() -> String {
    format!(
        "MATCH (topic:Topic)
         OPTIONAL MATCH (topic)-[:{happens_in}]->(region:Region)
         WITH topic, collect(DISTINCT region.name) AS regions
         OPTIONAL MATCH (topic)-[:{targets}]->(source:PollutionSource)
         WITH topic, regions, collect(DISTINCT source.name) AS sources
         OPTIONAL MATCH (topic)-[adopted:{adopts}]->(measure:Measure)
         WITH topic, regions, sources, adopted, measure
         ORDER BY COALESCE(adopted.position, 0), id(adopted)
         WITH topic, regions, sources, collect(measure.name) AS measures
         OPTIONAL MATCH (org:Organization)-[implemented:{implemented_by}]->(topic)
         WITH topic, regions, sources, measures, implemented, org
         ORDER BY COALESCE(implemented.position, 0), id(implemented)
         WITH topic, regions, sources, measures, collect(org.name) AS organizations
         RETURN topic.name AS topic,
                COALESCE(topic.effect, '') AS effect,
                regions, sources, measures, organizations
         ORDER BY topic",
        happens_in = RelationshipType::HappensIn.as_str(),
        targets = RelationshipType::Targets.as_str(),
        adopts = RelationshipType::Adopts.as_str(),
        implemented_by = RelationshipType::ImplementedBy.as_str(),
    )
}

/// Every topic as a flat news record.
pub async fn list_news(client: &GraphClient) -> Result<Vec<NewsRecord>> {
    let rows = client.query(Query::new(news_cypher())).await?;

    let mut news = Vec::with_capacity(rows.len());
    for row in rows {
        news.push(NewsRecord::from_related(
            field(&row, "topic")?,
            field(&row, "effect")?,
            field(&row, "regions")?,
            field(&row, "sources")?,
            field(&row, "measures")?,
            field(&row, "organizations")?,
        ));
    }
    Ok(news)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cypher_uses_relationship_names() {
        let cypher = news_cypher();
        assert!(cypher.contains("-[:HAPPENS_IN]->(region:Region)"));
        assert!(cypher.contains("(org:Organization)-[implemented:IMPLEMENTED_BY]->(topic)"));
        assert!(cypher.contains("-[adopted:ADOPTS]->(measure:Measure)"));
        assert!(cypher.contains("-[:TARGETS]->(source:PollutionSource)"));
    }

    #[test]
    fn test_list_fields_follow_edge_position() {
        let cypher = news_cypher();
        assert!(cypher.contains("ORDER BY COALESCE(adopted.position, 0), id(adopted)"));
        assert!(cypher.contains("ORDER BY COALESCE(implemented.position, 0), id(implemented)"));
    }
}
