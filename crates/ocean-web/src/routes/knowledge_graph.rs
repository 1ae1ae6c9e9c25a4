//! Knowledge graph route handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ocean_core::model::non_blank;
use ocean_core::{EntityLabel, OceanError};
use ocean_graph::queries::graph::{fetch_graph, GraphData, GraphFilter};
use ocean_graph::queries::node::{node_detail, NodeDetail};
use ocean_graph::queries::search::{
    nodes_by_label, search_nodes, NodeSummary, DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT, MAX_LIMIT,
};
use ocean_graph::queries::stats::{graph_stats, GraphStats};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::parse_limit;
use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct GraphQuery {
    #[serde(rename = "type")]
    pub label: Option<String>,
    pub search: Option<String>,
}

impl GraphQuery {
    /// Validate into a store filter; blank values count as absent.
    pub fn into_filter(self) -> Result<GraphFilter, OceanError> {
        let label = non_blank(self.label.as_deref())
            .map(|l| l.parse::<EntityLabel>())
            .transpose()?;
        Ok(GraphFilter {
            label,
            search: non_blank(self.search.as_deref()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

#[derive(Serialize)]
pub struct GraphResponse {
    success: bool,
    #[serde(flatten)]
    data: GraphData,
}

#[derive(Serialize)]
pub struct StatsResponse {
    success: bool,
    stats: GraphStats,
}

#[derive(Serialize)]
pub struct NodeResponse {
    success: bool,
    node: NodeDetail,
}

#[derive(Serialize)]
pub struct SearchResponse {
    success: bool,
    query: String,
    results: Vec<NodeSummary>,
    total: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodesResponse {
    success: bool,
    node_type: String,
    nodes: Vec<NodeSummary>,
    total: usize,
}

/// GET /api/knowledge-graph/health - Round-trip a trivial query.
pub async fn health(State(state): State<AppState>) -> Response {
    match state.graph.ping().await {
        Ok(()) => Json(json!({
            "status": "OK",
            "database": "Connected",
            "message": "Neo4j数据库连接正常",
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "Neo4j health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "ERROR",
                    "database": "Disconnected",
                    "message": "Neo4j数据库连接失败",
                    "error": format!("{:#}", e),
                })),
            )
                .into_response()
        }
    }
}

/// GET /api/knowledge-graph?type=&search=
pub async fn get_graph(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<GraphQuery>,
) -> ApiResult<GraphResponse> {
    let filter = params.into_filter()?;
    tracing::debug!(label = ?filter.label, search = ?filter.search, "Graph query");

    let data = fetch_graph(&state.graph, &filter)
        .await
        .map_err(|e| ApiError::internal("查询知识图谱数据失败", e))?;

    Ok(Json(GraphResponse { success: true, data }))
}

/// GET /api/knowledge-graph/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<StatsResponse> {
    let stats = graph_stats(&state.graph)
        .await
        .map_err(|e| ApiError::internal("获取统计信息失败", e))?;

    Ok(Json(StatsResponse { success: true, stats }))
}

/// GET /api/knowledge-graph/node/{id}
pub async fn get_node(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<NodeResponse> {
    let node = node_detail(&state.graph, &id)
        .await
        .map_err(|e| ApiError::internal("获取节点详情失败", e))?
        .ok_or(OceanError::NodeNotFound(id))?;

    Ok(Json(NodeResponse { success: true, node }))
}

/// GET /api/knowledge-graph/search?q=&limit=
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchQuery>,
) -> ApiResult<SearchResponse> {
    let query = non_blank(params.q.as_deref()).ok_or_else(|| OceanError::missing("q"))?;
    let limit = parse_limit(params.limit.as_deref(), DEFAULT_SEARCH_LIMIT, MAX_LIMIT)?;

    let results = search_nodes(&state.graph, &query, limit)
        .await
        .map_err(|e| ApiError::internal("搜索失败", e))?;

    Ok(Json(SearchResponse {
        success: true,
        query,
        total: results.len(),
        results,
    }))
}

/// GET /api/knowledge-graph/nodes/{label}?limit=
pub async fn list_by_label(
    State(state): State<AppState>,
    ApiPath(raw_label): ApiPath<String>,
    ApiQuery(params): ApiQuery<LimitQuery>,
) -> ApiResult<NodesResponse> {
    let label: EntityLabel = raw_label.parse()?;
    let limit = parse_limit(params.limit.as_deref(), DEFAULT_LIST_LIMIT, MAX_LIMIT)?;

    let nodes = nodes_by_label(&state.graph, label, limit)
        .await
        .map_err(|e| ApiError::internal(format!("获取 {} 节点失败", label), e))?;

    Ok(Json(NodesResponse {
        success: true,
        node_type: label.to_string(),
        total: nodes.len(),
        nodes,
    }))
}
