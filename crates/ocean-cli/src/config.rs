//! Layered configuration: defaults, then `ocean.toml`, then flags and
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ocean_core::OceanError;
use ocean_graph::GraphConfig;
use ocean_web::ServerConfig;
use serde::Deserialize;

use crate::commands::Neo4jArgs;

pub const DEFAULT_CONFIG_FILE: &str = "ocean.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub path: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/out1.csv"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub graph: GraphConfig,
    pub server: ServerConfig,
    pub import: ImportConfig,
}

impl AppConfig {
    /// Load `explicit`, or `ocean.toml` from the working directory if it
    /// exists, or built-in defaults.
    ///
    /// A file named explicitly must exist; the implicit one is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, OceanError> {
        toml::from_str(text).map_err(|e| OceanError::Config(e.to_string()))
    }

    /// Flags and environment variables win over the file.
    pub fn apply_neo4j_args(&mut self, args: &Neo4jArgs) {
        if let Some(uri) = &args.neo4j_uri {
            self.graph.uri = uri.clone();
        }
        if let Some(user) = &args.neo4j_user {
            self.graph.user = user.clone();
        }
        if let Some(password) = &args.neo4j_password {
            self.graph.password = password.clone();
        }
        if let Some(database) = &args.neo4j_database {
            self.graph.database = database.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.graph.uri, "bolt://localhost:7687");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.import.path, PathBuf::from("data/out1.csv"));
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::parse(
            r#"
            [graph]
            uri = "bolt://neo4j:7687"
            password = "secret"

            [server]
            port = 8080
            "#,
        )
        .unwrap();
        assert_eq!(config.graph.uri, "bolt://neo4j:7687");
        assert_eq!(config.graph.user, "neo4j");
        assert_eq!(config.graph.password, "secret");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::parse("[graph\nuri = 1").unwrap_err();
        assert!(matches!(err, OceanError::Config(_)));
    }

    #[test]
    fn test_args_override_file() {
        let mut config = AppConfig::parse("[graph]\nuser = \"file-user\"\n").unwrap();
        config.apply_neo4j_args(&Neo4jArgs {
            neo4j_uri: Some("bolt://cli:7687".into()),
            ..Default::default()
        });
        assert_eq!(config.graph.uri, "bolt://cli:7687");
        assert_eq!(config.graph.user, "file-user");
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocean.toml");
        std::fs::write(&path, "[import]\npath = \"records.csv\"\n").unwrap();
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.import.path, PathBuf::from("records.csv"));
    }
}
