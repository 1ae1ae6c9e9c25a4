//! CLI command definitions and handlers.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;

pub mod graph;
pub mod import;
pub mod serve;

/// Ocean governance knowledge graph
#[derive(Parser)]
#[command(name = "ocean")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./ocean.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub neo4j: Neo4jArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings; each one overrides the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct Neo4jArgs {
    /// Bolt URI of the Neo4j server
    #[arg(long, env = "NEO4J_URI", global = true)]
    pub neo4j_uri: Option<String>,

    /// Neo4j user
    #[arg(long, env = "NEO4J_USER", global = true)]
    pub neo4j_user: Option<String>,

    /// Neo4j password
    #[arg(long, env = "NEO4J_PASSWORD", global = true, hide_env_values = true)]
    pub neo4j_password: Option<String>,

    /// Neo4j database name
    #[arg(long, env = "NEO4J_DATABASE", global = true)]
    pub neo4j_database: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a CSV file of governance records into the graph
    Import(import::ImportArgs),

    /// Start the web server (dashboard, graph explorer and API)
    Serve(serve::ServeArgs),

    /// Knowledge Graph commands
    #[command(subcommand)]
    Graph(graph::GraphCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        config.apply_neo4j_args(&self.neo4j);

        match self.command {
            Commands::Import(args) => import::execute(args, &config).await,
            Commands::Serve(args) => serve::execute(args, &config).await,
            Commands::Graph(cmd) => graph::execute(cmd, &config).await,
        }
    }
}
