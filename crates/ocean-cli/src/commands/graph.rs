//! Knowledge Graph CLI commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use ocean_graph::queries::{search, stats};
use ocean_graph::GraphClient;

use crate::config::AppConfig;
use crate::output;

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Show node and relationship totals
    Status,

    /// Show counts per label and relationship type and the busiest nodes
    Stats,

    /// Find nodes whose name contains the given text
    Search {
        /// Text to look for
        query: String,
        /// Maximum number of results
        #[arg(long, default_value_t = search::DEFAULT_SEARCH_LIMIT)]
        limit: i64,
    },
}

pub async fn execute(cmd: GraphCommands, config: &AppConfig) -> Result<()> {
    let client = GraphClient::connect(&config.graph).await?;

    match cmd {
        GraphCommands::Status => cmd_status(&client, config).await,
        GraphCommands::Stats => cmd_stats(&client).await,
        GraphCommands::Search { query, limit } => cmd_search(&client, &query, limit).await,
    }
}

async fn cmd_status(client: &GraphClient, config: &AppConfig) -> Result<()> {
    println!("{}", "Knowledge Graph Status".bold());
    println!("{}", "─".repeat(40));

    let counts = client.get_counts().await?;
    println!("  Server:        {}", config.graph.uri.green());
    println!("  Nodes:         {}", counts.nodes.to_string().cyan());
    println!("  Relationships: {}", counts.relationships.to_string().cyan());

    println!("{}", "─".repeat(40));
    Ok(())
}

async fn cmd_stats(client: &GraphClient) -> Result<()> {
    let stats = stats::graph_stats(client).await?;

    println!("{}", "Nodes by label".bold());
    output::print_table(
        &["Label", "Count"],
        stats
            .node_types
            .iter()
            .map(|c| vec![c.label.clone(), c.count.to_string()])
            .collect(),
    );

    println!();
    println!("{}", "Relationships by type".bold());
    output::print_table(
        &["Relationship", "Count"],
        stats
            .relationships
            .iter()
            .map(|c| vec![c.relationship.clone(), c.count.to_string()])
            .collect(),
    );

    println!();
    println!("{}", "Most connected nodes".bold());
    output::print_table(
        &["Name", "Label", "Connections"],
        stats
            .most_connected_nodes
            .iter()
            .map(|n| vec![n.name.clone(), n.label.clone(), n.connections.to_string()])
            .collect(),
    );

    println!();
    println!(
        "{} nodes, {} relationships",
        stats.total_nodes.to_string().bold(),
        stats.total_relationships.to_string().bold()
    );
    Ok(())
}

async fn cmd_search(client: &GraphClient, query: &str, limit: i64) -> Result<()> {
    let results = search::search_nodes(client, query, limit).await?;

    if results.is_empty() {
        println!("{}", "No results.".dimmed());
        return Ok(());
    }

    output::print_table(
        &["ID", "Name", "Label", "Effect"],
        results
            .iter()
            .map(|n| vec![n.id.clone(), n.name.clone(), n.label.clone(), n.effect.clone()])
            .collect(),
    );
    println!();
    println!("{} result(s)", results.len());
    Ok(())
}
