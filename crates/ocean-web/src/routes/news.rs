//! News route handlers.

use axum::{
    extract::State,
    Json,
};
use ocean_core::dashboard::{sample::sample_news, DashboardView, NewsFilter, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use ocean_core::NewsRecord;
use ocean_graph::queries::news::list_news as query_news;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::state::AppState;

const NEWS_QUERY_FAILED: &str = "查询新闻数据失败";

#[derive(Serialize)]
pub struct NewsResponse {
    success: bool,
    news: Vec<NewsRecord>,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    success: bool,
    #[serde(flatten)]
    view: DashboardView,
}

/// Dashboard query string. Numbers arrive as text so a malformed value
/// falls back to its default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub keyword: Option<String>,
    pub region: Option<String>,
    pub topic: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sample: Option<String>,
}

impl DashboardQuery {
    fn filter(&self) -> NewsFilter {
        NewsFilter {
            keyword: self.keyword.clone(),
            region: self.region.clone(),
            topic: self.topic.clone(),
        }
    }

    fn page(&self) -> usize {
        parse_usize(self.page.as_deref()).unwrap_or(1)
    }

    fn page_size(&self) -> usize {
        parse_usize(self.page_size.as_deref())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE)
    }

    fn use_sample(&self) -> bool {
        matches!(self.sample.as_deref().map(str::trim), Some("true" | "1"))
    }
}

fn parse_usize(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok()).filter(|n| *n > 0)
}

/// GET /api/news - One flat record per topic.
pub async fn list_news(State(state): State<AppState>) -> Result<Json<NewsResponse>, ApiError> {
    let news = query_news(&state.graph)
        .await
        .map_err(|e| ApiError::internal(NEWS_QUERY_FAILED, e))?;

    tracing::debug!(records = news.len(), "News query");
    Ok(Json(NewsResponse { success: true, news }))
}

/// GET /api/news/dashboard - Filtered, paginated dashboard payload.
///
/// With `sample=true` the bundled sample dataset is used and the store is
/// never queried.
pub async fn dashboard(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<DashboardQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let sample = params.use_sample();
    let records = if sample {
        sample_news()?
    } else {
        query_news(&state.graph)
            .await
            .map_err(|e| ApiError::internal(NEWS_QUERY_FAILED, e))?
    };

    let view = DashboardView::build(
        &records,
        &params.filter(),
        params.page(),
        params.page_size(),
        sample,
    );
    Ok(Json(DashboardResponse { success: true, view }))
}
