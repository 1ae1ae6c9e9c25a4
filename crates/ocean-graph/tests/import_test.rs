//! Integration tests for the CSV importer against a real Neo4j.
//!
//! Requirements: Docker (for Neo4j via testcontainers)
//!
//! Run with: cargo test -p ocean-graph --features test-utils --test import_test

#![cfg(feature = "test-utils")]

use std::io::Write;
use std::path::Path;

use neo4rs::Query;
use ocean_core::OceanError;
use ocean_graph::{run_import, schema, GraphClient};

const HEADER: &str = "主题,生态区域,实施主体,污染来源,治理措施,效果数据";

async fn setup() -> (impl std::any::Any, GraphClient) {
    let (container, client) = ocean_graph::testutil::neo4j_container().await;
    schema::initialize_schema(&client).await.expect("schema");
    (container, client)
}

fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}

async fn count(client: &GraphClient, cypher: &str) -> i64 {
    client
        .query_scalar::<i64>(Query::new(cypher.to_string()), "c")
        .await
        .unwrap()
        .unwrap_or(0)
}

#[tokio::test]
async fn two_rows_produce_expected_graph() {
    let (_container, client) = setup().await;
    let csv = write_csv(&[
        "T1,R1,O1、O2,P1,M1、M2,E1",
        "T2,R1,O2,P2,M3,E2",
    ]);

    let report = run_import(&client, csv.path()).await.unwrap();
    assert_eq!(report.rows_total, 2);
    assert_eq!(report.rows_succeeded, 2);
    assert!(report.is_clean());

    // T1, T2, R1, O1, O2, P1, P2, M1, M2, M3
    let counts = client.get_counts().await.unwrap();
    assert_eq!(counts.nodes, 10);
    // T1: 1 + 2 + 1 + 2, T2: 1 + 1 + 1 + 1
    assert_eq!(counts.relationships, 10);

    let effect: Option<String> = client
        .query_scalar(
            Query::new("MATCH (t:Topic {name: 'T2'}) RETURN t.effect AS e".to_string()),
            "e",
        )
        .await
        .unwrap();
    assert_eq!(effect.as_deref(), Some("E2"));
}

#[tokio::test]
async fn reimport_is_idempotent() {
    let (_container, client) = setup().await;
    let csv = write_csv(&["T1,R1,O1、O2,P1,M1,E1"]);

    run_import(&client, csv.path()).await.unwrap();
    let first = client.get_counts().await.unwrap();
    run_import(&client, csv.path()).await.unwrap();
    let second = client.get_counts().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn organizations_are_split_and_point_at_topic() {
    let (_container, client) = setup().await;
    let csv = write_csv(&["T1,,政府、 企业 ,,,"]);

    run_import(&client, csv.path()).await.unwrap();

    let orgs = count(
        &client,
        "MATCH (o:Organization)-[:IMPLEMENTED_BY]->(:Topic {name: 'T1'}) RETURN count(o) AS c",
    )
    .await;
    assert_eq!(orgs, 2);
    let trimmed = count(&client, "MATCH (o:Organization {name: '企业'}) RETURN count(o) AS c").await;
    assert_eq!(trimmed, 1);
}

#[tokio::test]
async fn blank_topic_gets_placeholder_and_empty_cells_create_nothing() {
    let (_container, client) = setup().await;
    let csv = write_csv(&[",,,,,"]);

    let report = run_import(&client, csv.path()).await.unwrap();
    assert_eq!(report.rows_succeeded, 1);

    let counts = client.get_counts().await.unwrap();
    assert_eq!(counts.nodes, 1);
    assert_eq!(counts.relationships, 0);
    assert_eq!(count(&client, "MATCH (t:Topic {name: '未知主题_0'}) RETURN count(t) AS c").await, 1);
}

#[tokio::test]
async fn missing_file_writes_nothing() {
    let (_container, client) = setup().await;

    let err = run_import(&client, Path::new("/nonexistent/ocean.csv"))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<OceanError>(),
        Some(OceanError::SourceNotFound(_))
    ));
    assert_eq!(client.get_counts().await.unwrap().nodes, 0);
}
