//! Graph entity labels, relationship types and field helpers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OceanError;

/// Separator used for multi-valued source fields (organizations, measures).
pub const LIST_DELIMITER: char = '、';

/// Display size for nodes whose label is not in the lookup table.
pub const DEFAULT_SYMBOL_SIZE: i64 = 15;

/// The closed set of node labels the importer writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityLabel {
    Topic,
    Region,
    Organization,
    PollutionSource,
    Measure,
}

impl EntityLabel {
    pub const ALL: [EntityLabel; 5] = [
        EntityLabel::Topic,
        EntityLabel::Region,
        EntityLabel::Organization,
        EntityLabel::PollutionSource,
        EntityLabel::Measure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Topic => "Topic",
            Self::Region => "Region",
            Self::Organization => "Organization",
            Self::PollutionSource => "PollutionSource",
            Self::Measure => "Measure",
        }
    }

    /// Node size used by the force-directed layout.
    pub fn symbol_size(&self) -> i64 {
        match self {
            Self::Topic => 25,
            Self::Region => 20,
            Self::Organization => 18,
            Self::PollutionSource => 16,
            Self::Measure => 14,
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityLabel {
    type Err = OceanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| OceanError::UnknownLabel(s.to_string()))
    }
}

/// Symbol size for an arbitrary label string read back from the store.
pub fn symbol_size_for(label: &str) -> i64 {
    label
        .parse::<EntityLabel>()
        .map(|l| l.symbol_size())
        .unwrap_or(DEFAULT_SYMBOL_SIZE)
}

/// Directed relationship types between entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    /// Topic -> Region
    HappensIn,
    /// Organization -> Topic
    ImplementedBy,
    /// Topic -> PollutionSource
    Targets,
    /// Topic -> Measure
    Adopts,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HappensIn => "HAPPENS_IN",
            Self::ImplementedBy => "IMPLEMENTED_BY",
            Self::Targets => "TARGETS",
            Self::Adopts => "ADOPTS",
        }
    }

    /// The label of the node the relationship points away from.
    pub fn from_label(&self) -> EntityLabel {
        match self {
            Self::ImplementedBy => EntityLabel::Organization,
            _ => EntityLabel::Topic,
        }
    }

    /// The label of the node the relationship points at.
    pub fn to_label(&self) -> EntityLabel {
        match self {
            Self::HappensIn => EntityLabel::Region,
            Self::ImplementedBy => EntityLabel::Topic,
            Self::Targets => EntityLabel::PollutionSource,
            Self::Adopts => EntityLabel::Measure,
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a multi-valued field on [`LIST_DELIMITER`], trimming pieces and
/// dropping empties.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`split_list`].
pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(LIST_DELIMITER);
        }
        out.push_str(item.as_ref());
    }
    out
}

/// Trimmed value of an optional field, `None` when blank.
pub fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Name given to a topic whose source row has no topic, keyed by the
/// zero-based row position.
pub fn placeholder_topic_name(index: usize) -> String {
    format!("未知主题_{}", index)
}
