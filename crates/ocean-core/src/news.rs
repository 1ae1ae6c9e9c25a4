//! Flat news record, one per Topic, in the shape of the source CSV.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::join_list;

/// A Topic and its related entities flattened into CSV columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRecord {
    #[serde(rename = "主题", default)]
    pub topic: String,
    #[serde(rename = "生态区域", default)]
    pub region: String,
    #[serde(rename = "污染来源", default)]
    pub pollution_source: String,
    #[serde(rename = "治理措施", default)]
    pub measures: String,
    #[serde(rename = "实施主体", default)]
    pub organizations: String,
    #[serde(rename = "效果数据", default)]
    pub effect: String,
}

impl NewsRecord {
    /// Build a record from the collected related names of one Topic.
    ///
    /// Region and pollution source keep only the lexicographically first
    /// name. Measures and organizations keep the order they arrive in (the
    /// source cell order) with repeats dropped, then are joined.
    pub fn from_related(
        topic: String,
        effect: String,
        mut regions: Vec<String>,
        mut sources: Vec<String>,
        mut measures: Vec<String>,
        mut organizations: Vec<String>,
    ) -> Self {
        for names in [&mut regions, &mut sources] {
            names.retain(|n| !n.is_empty());
            names.sort();
        }
        dedup_in_order(&mut measures);
        dedup_in_order(&mut organizations);

        Self {
            topic,
            region: regions.into_iter().next().unwrap_or_default(),
            pollution_source: sources.into_iter().next().unwrap_or_default(),
            measures: join_list(&measures),
            organizations: join_list(&organizations),
            effect,
        }
    }
}

/// Drop blanks and later repeats, keeping first occurrences in place.
fn dedup_in_order(names: &mut Vec<String>) {
    let mut seen = HashSet::new();
    names.retain(|n| !n.is_empty() && seen.insert(n.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::split_list;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_measures_round_trip() {
        let record = NewsRecord::from_related(
            "T1".into(),
            "".into(),
            vec![],
            vec![],
            names(&["X", "Y"]),
            vec![],
        );
        assert_eq!(record.measures, "X、Y");
    }

    #[test]
    fn test_list_fields_keep_cell_order() {
        let record = NewsRecord::from_related(
            "T1".into(),
            "".into(),
            vec![],
            vec![],
            split_list("禁排、监测"),
            split_list("政府、企业、政府"),
        );
        assert_eq!(record.measures, "禁排、监测");
        assert_eq!(record.organizations, "政府、企业");
    }

    #[test]
    fn test_first_region_is_deterministic() {
        let a = NewsRecord::from_related(
            "T".into(),
            "".into(),
            names(&["南海", "东海"]),
            names(&["塑料", "油污"]),
            vec![],
            vec![],
        );
        let b = NewsRecord::from_related(
            "T".into(),
            "".into(),
            names(&["东海", "南海"]),
            names(&["油污", "塑料"]),
            vec![],
            vec![],
        );
        assert_eq!(a.region, b.region);
        assert_eq!(a.pollution_source, b.pollution_source);
    }

    #[test]
    fn test_empty_relations() {
        let record = NewsRecord::from_related(
            "T".into(),
            "改善".into(),
            vec![],
            vec![],
            vec![],
            vec![],
        );
        assert_eq!(record.region, "");
        assert_eq!(record.measures, "");
        assert_eq!(record.organizations, "");
        assert_eq!(record.effect, "改善");
    }

    #[test]
    fn test_serializes_with_csv_headers() {
        let record = NewsRecord {
            topic: "T1".into(),
            region: "R1".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["主题"], "T1");
        assert_eq!(json["生态区域"], "R1");
        assert_eq!(json["治理措施"], "");
    }
}
