//! Ocean Web Server
//!
//! Axum-based server for the JSON API and the embedded dashboard pages.

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use ocean_graph::GraphClient;
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::ApiError;
pub use state::AppState;

/// Listen address for the web server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Knowledge graph
        .route("/knowledge-graph", get(routes::knowledge_graph::get_graph))
        .route("/knowledge-graph/health", get(routes::knowledge_graph::health))
        .route("/knowledge-graph/stats", get(routes::knowledge_graph::get_stats))
        .route("/knowledge-graph/node/{id}", get(routes::knowledge_graph::get_node))
        .route("/knowledge-graph/search", get(routes::knowledge_graph::search))
        .route("/knowledge-graph/nodes/{label}", get(routes::knowledge_graph::list_by_label))
        // News
        .route("/news", get(routes::news::list_news))
        .route("/news/dashboard", get(routes::news::dashboard));

    Router::new()
        .route("/", get(routes::pages::index))
        .route("/knowledge-graph", get(routes::pages::knowledge_graph))
        .route("/static/{file}", get(routes::pages::static_asset))
        .route("/health", get(routes::health::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until the process is stopped.
pub async fn run_server(client: GraphClient, config: &ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(client);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    tracing::info!("Knowledge graph: http://{}/knowledge-graph", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
