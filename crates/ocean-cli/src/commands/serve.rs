//! Web server command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use ocean_graph::GraphClient;

use crate::config::AppConfig;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file used with --log
    #[arg(long, default_value = "logs/serve.log")]
    pub log_file: PathBuf,
}

pub async fn execute(args: ServeArgs, config: &AppConfig) -> Result<()> {
    let mut server = config.server.clone();
    if let Some(port) = args.port {
        server.port = port;
    }
    if let Some(host) = args.host {
        server.host = host;
    }

    // The pool is lazy: the server comes up even when Neo4j is down and the
    // health endpoint reports it.
    let client = GraphClient::connect_lazy(&config.graph).await?;
    if let Err(e) = client.ping().await {
        tracing::warn!(uri = %config.graph.uri, error = %format!("{:#}", e), "Neo4j is not reachable; graph endpoints will fail until it is");
    }

    let base = format!("http://{}:{}", server.host, server.port);
    println!();
    println!("  {} {}", "Ocean".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}        {}", "Dashboard".green(), base);
    println!("  {}  {}/knowledge-graph", "Knowledge graph".green(), base);
    println!("  {}              {}/api", "API".green(), base);
    println!("  {}           {}/health", "Health".green(), base);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    ocean_web::run_server(client, &server).await
}
