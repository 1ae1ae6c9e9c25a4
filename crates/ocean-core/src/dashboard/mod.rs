//! Dashboard shaping: filtering, pagination, summary counts, map markers
//! and word-cloud keywords over a set of news records.

pub mod keywords;
pub mod regions;
pub mod sample;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::news::NewsRecord;

pub use keywords::{extract_keywords, Keyword};
pub use regions::{region_markers, RegionMarker};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// List filters. Blank values are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsFilter {
    /// Case-insensitive substring over topic, measures and organizations.
    pub keyword: Option<String>,
    /// Exact region match.
    pub region: Option<String>,
    /// Exact topic match.
    pub topic: Option<String>,
}

impl NewsFilter {
    pub fn matches(&self, record: &NewsRecord) -> bool {
        let keyword = self
            .keyword
            .as_deref()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty());

        let keyword_ok = match keyword {
            None => true,
            Some(k) => [&record.topic, &record.measures, &record.organizations]
                .iter()
                .any(|field| field.to_lowercase().contains(&k)),
        };

        let region_ok = match self.region.as_deref().filter(|r| !r.is_empty()) {
            None => true,
            Some(r) => record.region == r,
        };

        let topic_ok = match self.topic.as_deref().filter(|t| !t.is_empty()) {
            None => true,
            Some(t) => record.topic == t,
        };

        keyword_ok && region_ok && topic_ok
    }

    pub fn apply<'a>(&self, records: &'a [NewsRecord]) -> Vec<&'a NewsRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// One page of a filtered list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    /// 1-based index of the first item on the page, 0 when empty.
    pub start_index: usize,
    pub end_index: usize,
}

/// Slice `items` into the requested page. Out-of-range pages are clamped.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));

    let start = ((page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page,
        page_size,
        total_items,
        total_pages,
        start_index: if start < end { start + 1 } else { 0 },
        end_index: end,
    }
}

/// Headline counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_news: usize,
    pub total_regions: usize,
    pub total_topics: usize,
    /// Distinct organization strings, not distinct organizations.
    pub active_projects: usize,
}

impl DashboardSummary {
    pub fn from_records(records: &[NewsRecord]) -> Self {
        Self {
            total_news: records.len(),
            total_regions: count_distinct(records.iter().map(|r| r.region.as_str())),
            total_topics: count_distinct(records.iter().map(|r| r.topic.as_str())),
            active_projects: count_distinct(records.iter().map(|r| r.organizations.as_str())),
        }
    }
}

fn count_distinct<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values
        .filter(|v| !v.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

/// Options for the region and topic drop-downs, in first-seen order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub topics: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[NewsRecord]) -> Self {
        let mut seen_regions = HashSet::new();
        let mut seen_topics = HashSet::new();
        let mut options = Self::default();

        for record in records {
            if !record.region.is_empty() && seen_regions.insert(record.region.as_str()) {
                options.regions.push(record.region.clone());
            }
            if !record.topic.is_empty() && seen_topics.insert(record.topic.as_str()) {
                options.topics.push(record.topic.clone());
            }
        }
        options
    }
}

/// Everything the dashboard page renders in one payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub summary: DashboardSummary,
    pub filters: FilterOptions,
    pub news: Page<NewsRecord>,
    pub markers: Vec<RegionMarker>,
    pub keywords: Vec<Keyword>,
    /// True when the view was built from the bundled sample dataset.
    pub sample: bool,
}

impl DashboardView {
    /// Summary and filter options describe the full dataset; the list,
    /// markers and keywords follow the filter.
    pub fn build(
        records: &[NewsRecord],
        filter: &NewsFilter,
        page: usize,
        page_size: usize,
        sample: bool,
    ) -> Self {
        let filtered: Vec<NewsRecord> = filter.apply(records).into_iter().cloned().collect();

        Self {
            summary: DashboardSummary::from_records(records),
            filters: FilterOptions::from_records(records),
            news: paginate(&filtered, page, page_size),
            markers: region_markers(&filtered),
            keywords: extract_keywords(&filtered),
            sample,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(topic: &str, region: &str, measures: &str, orgs: &str) -> NewsRecord {
        NewsRecord {
            topic: topic.into(),
            region: region.into(),
            measures: measures.into(),
            organizations: orgs.into(),
            ..Default::default()
        }
    }

    fn dataset() -> Vec<NewsRecord> {
        vec![
            record("渤海湾综合治理", "中国渤海", "入海排污口整治、岸线修复", "生态环境部"),
            record("Great Barrier Reef Plan", "澳大利亚大堡礁", "Water quality", "GBRMPA"),
            record("东京湾清洁", "日本东京湾", "污水处理升级", "东京都"),
            record("渤海湾综合治理", "中国渤海", "", "生态环境部、自然资源部"),
        ]
    }

    #[test]
    fn test_keyword_filter_is_case_insensitive() {
        let data = dataset();
        let filter = NewsFilter {
            keyword: Some("reef".into()),
            ..Default::default()
        };
        let hits = filter.apply(&data);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].topic, "Great Barrier Reef Plan");
    }

    #[test]
    fn test_keyword_matches_organizations_and_measures() {
        let data = dataset();
        let by_org = NewsFilter {
            keyword: Some("自然资源部".into()),
            ..Default::default()
        };
        assert_eq!(by_org.apply(&data).len(), 1);

        let by_measure = NewsFilter {
            keyword: Some("污水".into()),
            ..Default::default()
        };
        assert_eq!(by_measure.apply(&data).len(), 1);
    }

    #[test]
    fn test_region_and_topic_are_exact() {
        let data = dataset();
        let filter = NewsFilter {
            region: Some("中国".into()),
            ..Default::default()
        };
        assert!(filter.apply(&data).is_empty());

        let filter = NewsFilter {
            region: Some("中国渤海".into()),
            topic: Some("渤海湾综合治理".into()),
            keyword: Some("  ".into()),
        };
        assert_eq!(filter.apply(&data).len(), 2);
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=23).collect();

        let first = paginate(&items, 1, 10);
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.start_index, 1);
        assert_eq!(first.end_index, 10);

        let last = paginate(&items, 3, 10);
        assert_eq!(last.items, vec![21, 22, 23]);
        assert_eq!(last.start_index, 21);

        let clamped = paginate(&items, 99, 10);
        assert_eq!(clamped.page, 3);
    }

    #[test]
    fn test_paginate_empty() {
        let items: Vec<u32> = vec![];
        let page = paginate(&items, 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.start_index, 0);
        assert_eq!(page.end_index, 0);
    }

    #[test]
    fn test_summary_counts() {
        let summary = DashboardSummary::from_records(&dataset());
        assert_eq!(summary.total_news, 4);
        assert_eq!(summary.total_regions, 3);
        assert_eq!(summary.total_topics, 3);
        assert_eq!(summary.active_projects, 4);
    }

    #[test]
    fn test_filter_options_first_seen_order() {
        let options = FilterOptions::from_records(&dataset());
        assert_eq!(options.regions, vec!["中国渤海", "澳大利亚大堡礁", "日本东京湾"]);
        assert_eq!(options.topics.len(), 3);
    }

    #[test]
    fn test_view_summary_ignores_filter() {
        let data = dataset();
        let filter = NewsFilter {
            region: Some("日本东京湾".into()),
            ..Default::default()
        };
        let view = DashboardView::build(&data, &filter, 1, DEFAULT_PAGE_SIZE, false);
        assert_eq!(view.summary.total_news, 4);
        assert_eq!(view.news.total_items, 1);
        assert_eq!(view.markers.len(), 1);
        assert_eq!(view.markers[0].count, 1);
    }
}
