//! CSV to Neo4j import pipeline.
//!
//! Reads governance records from a CSV file and merges each row into the
//! graph inside its own transaction. A failing row is logged and counted;
//! it never stops the rest of the file.

pub mod row;
pub mod upsert;

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::GraphClient;
pub use row::{read_rows, SourceRow, UpsertPlan};

/// A row that could not be imported.
#[derive(Debug, Clone)]
pub struct RowFailure {
    /// Zero-based data row position.
    pub index: usize,
    pub topic: Option<String>,
    pub error: String,
}

/// Result of an import run.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub rows_total: usize,
    pub rows_succeeded: usize,
    pub rows_failed: usize,
    /// MERGE statements issued for nodes, including ones that already existed.
    pub nodes_merged: usize,
    pub relationships_merged: usize,
    pub failures: Vec<RowFailure>,
}

impl ImportReport {
    fn record_success(&mut self, plan: &UpsertPlan) {
        self.rows_succeeded += 1;
        self.nodes_merged += plan.node_count();
        self.relationships_merged += plan.relationship_count();
    }

    fn record_failure(&mut self, index: usize, topic: Option<String>, error: String) {
        warn!(row = index + 1, topic = topic.as_deref().unwrap_or("-"), %error, "Row import failed");
        self.rows_failed += 1;
        self.failures.push(RowFailure { index, topic, error });
    }

    pub fn is_clean(&self) -> bool {
        self.rows_failed == 0
    }
}

/// Import every row of `path` into the graph.
pub async fn run_import(client: &GraphClient, path: &Path) -> Result<ImportReport> {
    run_import_with_progress(client, path, |_, _| {}).await
}

/// Same as [`run_import`], calling `on_row(done, total)` after each row.
pub async fn run_import_with_progress<F>(
    client: &GraphClient,
    path: &Path,
    mut on_row: F,
) -> Result<ImportReport>
where
    F: FnMut(usize, usize),
{
    // Fails on a missing file before any graph write.
    let rows = read_rows(path)?;

    info!(path = %path.display(), rows = rows.len(), "Starting CSV import");

    let mut report = ImportReport {
        rows_total: rows.len(),
        ..Default::default()
    };

    for (index, parsed) in rows.into_iter().enumerate() {
        match parsed {
            Ok(source) => {
                let plan = UpsertPlan::from_row(index, &source);
                match upsert::write_plan(client, &plan).await {
                    Ok(()) => report.record_success(&plan),
                    Err(e) => report.record_failure(index, Some(plan.topic.clone()), format!("{:#}", e)),
                }
            }
            Err(e) => report.record_failure(index, None, e),
        }
        on_row(index + 1, report.rows_total);
    }

    info!(
        succeeded = report.rows_succeeded,
        failed = report.rows_failed,
        nodes = report.nodes_merged,
        relationships = report.relationships_merged,
        "CSV import complete"
    );

    Ok(report)
}
