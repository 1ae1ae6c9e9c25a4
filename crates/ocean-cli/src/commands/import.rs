//! CSV import command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use ocean_core::OceanError;
use ocean_graph::{run_import_with_progress, schema, GraphClient};

use crate::config::AppConfig;
use crate::output;

#[derive(Args)]
pub struct ImportArgs {
    /// CSV file to import (defaults to the configured import path)
    pub file: Option<PathBuf>,

    /// Skip creating uniqueness constraints before the import
    #[arg(long)]
    pub skip_schema: bool,
}

/// Fail with [`OceanError::SourceNotFound`] unless `path` is a file.
fn ensure_source(path: &Path) -> Result<(), OceanError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(OceanError::SourceNotFound(path.to_path_buf()))
    }
}

pub async fn execute(args: ImportArgs, config: &AppConfig) -> Result<()> {
    let path = args.file.unwrap_or_else(|| config.import.path.clone());

    // Check the file first so a typo never costs a connection attempt.
    ensure_source(&path)?;

    println!("{} {}", "Importing".bold(), path.display().to_string().cyan());

    let client = GraphClient::connect(&config.graph).await?;

    if !args.skip_schema {
        schema::initialize_schema(&client).await?;
    }

    // Length is filled in by the first progress callback.
    let progress = ProgressBar::no_length();
    progress.set_style(
        ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} rows {msg}")?
            .progress_chars("=> "),
    );

    let report = run_import_with_progress(&client, &path, |done, total| {
        progress.set_length(total as u64);
        progress.set_position(done as u64);
    })
    .await?;
    progress.finish_and_clear();

    output::print_import_report(&report);

    let counts = client.get_counts().await?;
    println!(
        "  Graph now holds {} nodes and {} relationships.",
        counts.nodes.to_string().cyan(),
        counts.relationships.to_string().cyan()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_source(&dir.path().join("out1.csv")).unwrap_err();
        assert!(matches!(err, OceanError::SourceNotFound(_)));

        // A directory is not a source file either.
        assert!(ensure_source(dir.path()).is_err());
    }

    #[test]
    fn test_existing_source_passes() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(ensure_source(file.path()).is_ok());
    }
}
