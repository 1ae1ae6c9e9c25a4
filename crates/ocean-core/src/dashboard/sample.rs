//! Bundled sample dataset, used when the graph store cannot be queried.

use crate::error::OceanResult;
use crate::news::NewsRecord;

const SAMPLE_NEWS_JSON: &str = include_str!("../../data/sample-news.json");

/// Parse the embedded sample records.
pub fn sample_news() -> OceanResult<Vec<NewsRecord>> {
    Ok(serde_json::from_str(SAMPLE_NEWS_JSON)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{DashboardView, NewsFilter};

    #[test]
    fn test_sample_parses() {
        let records = sample_news().unwrap();
        assert_eq!(records.len(), 8);
        assert!(records.iter().all(|r| !r.topic.is_empty()));
    }

    #[test]
    fn test_sample_builds_a_view() {
        let records = sample_news().unwrap();
        let view = DashboardView::build(&records, &NewsFilter::default(), 1, 5, true);
        assert!(view.sample);
        assert_eq!(view.news.items.len(), 5);
        assert_eq!(view.news.total_pages, 2);
        assert!(!view.markers.is_empty());
        assert!(!view.keywords.is_empty());
    }
}
