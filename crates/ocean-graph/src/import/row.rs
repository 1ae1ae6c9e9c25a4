//! CSV rows and the upsert plan derived from each one.

use std::path::Path;

use anyhow::{Context, Result};
use ocean_core::model::{non_blank, placeholder_topic_name, split_list};
use ocean_core::{OceanError, RelationshipType};
use serde::Deserialize;

/// One CSV data row. Headers are the Chinese column names of the source
/// file; English aliases are accepted too.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceRow {
    #[serde(rename = "主题", alias = "topic", default)]
    pub topic: Option<String>,
    #[serde(rename = "生态区域", alias = "region", default)]
    pub region: Option<String>,
    #[serde(rename = "实施主体", alias = "organizations", default)]
    pub organizations: Option<String>,
    #[serde(rename = "污染来源", alias = "pollution_source", default)]
    pub pollution_source: Option<String>,
    #[serde(rename = "治理措施", alias = "measures", default)]
    pub measures: Option<String>,
    #[serde(rename = "效果数据", alias = "effect", default)]
    pub effect: Option<String>,
}

/// A row as read from the file; malformed records keep their error text so
/// they can be counted without stopping the import.
pub type ParsedRow = std::result::Result<SourceRow, String>;

/// Read every data row of `path`.
///
/// A missing file is reported as [`OceanError::SourceNotFound`] before
/// anything else happens.
pub fn read_rows(path: &Path) -> Result<Vec<ParsedRow>> {
    if !path.is_file() {
        return Err(OceanError::SourceNotFound(path.to_path_buf()).into());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file {}", path.display()))?;

    // Spreadsheet exports often carry a BOM and padded header cells.
    let headers: csv::StringRecord = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim())
        .collect();
    reader.set_headers(headers);

    Ok(reader
        .deserialize::<SourceRow>()
        .map(|r| r.map_err(|e| e.to_string()))
        .collect())
}

/// Everything one row merges into the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertPlan {
    pub topic: String,
    pub effect: String,
    /// Related node name per relationship, in write order.
    pub edges: Vec<(RelationshipType, String)>,
}

impl UpsertPlan {
    /// Resolve a row at zero-based position `index`.
    pub fn from_row(index: usize, row: &SourceRow) -> Self {
        let topic = non_blank(row.topic.as_deref())
            .unwrap_or_else(|| placeholder_topic_name(index));
        let effect = row.effect.clone().unwrap_or_default();

        let mut edges = Vec::new();
        if let Some(region) = non_blank(row.region.as_deref()) {
            edges.push((RelationshipType::HappensIn, region));
        }
        for org in split_list(row.organizations.as_deref().unwrap_or_default()) {
            edges.push((RelationshipType::ImplementedBy, org));
        }
        if let Some(source) = non_blank(row.pollution_source.as_deref()) {
            edges.push((RelationshipType::Targets, source));
        }
        for measure in split_list(row.measures.as_deref().unwrap_or_default()) {
            edges.push((RelationshipType::Adopts, measure));
        }

        Self { topic, effect, edges }
    }

    /// Nodes merged by this plan, the topic included.
    pub fn node_count(&self) -> usize {
        1 + self.edges.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.edges.len()
    }
}
