//! # Ocean Graph
//!
//! Neo4j knowledge graph integration.
//!
//! Provides the CSV importer that merges governance records into the graph,
//! schema bootstrap, and the read-only queries behind the HTTP API.

pub mod client;
pub mod import;
pub mod queries;
pub mod schema;

#[cfg(feature = "test-utils")]
pub mod testutil;

pub use client::{GraphClient, GraphConfig, GraphCounts};
pub use import::{run_import, run_import_with_progress, ImportReport, RowFailure};
