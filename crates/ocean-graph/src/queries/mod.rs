//! Read-only queries behind the HTTP API.
//!
//! Nothing in here writes to the graph.

pub mod graph;
pub mod news;
pub mod node;
pub mod search;
pub mod stats;

use anyhow::Result;
use neo4rs::Row;
use serde::de::DeserializeOwned;

/// Read a column from a row, naming the column on failure.
pub(crate) fn field<T: DeserializeOwned>(row: &Row, name: &str) -> Result<T> {
    row.get(name)
        .map_err(|e| anyhow::anyhow!("Failed to get field '{}': {:?}", name, e))
}

/// Current time in the format used by every response timestamp.
pub(crate) fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
