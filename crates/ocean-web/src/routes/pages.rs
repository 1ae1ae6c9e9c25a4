//! Embedded dashboard pages and their static assets.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("../../../../assets/web/index.html");
const KNOWLEDGE_GRAPH_HTML: &str = include_str!("../../../../assets/web/knowledge-graph.html");
const APP_JS: &str = include_str!("../../../../assets/web/app.js");
const KNOWLEDGE_GRAPH_JS: &str = include_str!("../../../../assets/web/knowledge-graph.js");
const STYLE_CSS: &str = include_str!("../../../../assets/web/style.css");

/// GET / - Serve the news dashboard.
pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// GET /knowledge-graph - Serve the graph explorer.
pub async fn knowledge_graph() -> impl IntoResponse {
    Html(KNOWLEDGE_GRAPH_HTML)
}

fn lookup(file: &str) -> Option<(&'static str, &'static str)> {
    match file {
        "app.js" => Some(("text/javascript; charset=utf-8", APP_JS)),
        "knowledge-graph.js" => Some(("text/javascript; charset=utf-8", KNOWLEDGE_GRAPH_JS)),
        "style.css" => Some(("text/css; charset=utf-8", STYLE_CSS)),
        _ => None,
    }
}

/// GET /static/{file}
pub async fn static_asset(Path(file): Path<String>) -> Response {
    match lookup(&file) {
        Some((content_type, body)) => ([(header::CONTENT_TYPE, content_type)], body).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
