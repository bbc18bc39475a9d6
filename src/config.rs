use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub search: SearchConfig,

    /// Path the config was read from, if any. Logged by the caller once
    /// tracing is up; `load()` itself must stay silent since it runs before
    /// the subscriber is installed.
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    pub log_level: String,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Postgres connection string. Usually supplied via `DATABASE_URL`.
    pub url: String,

    pub max_connections: u32,

    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Postgres text-search configuration used for ranking.
    pub language: String,

    /// Curated terms that always lead the popular-searches list.
    pub popular_terms: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            language: "vietnamese".to_string(),
            popular_terms: vec!["căn hộ chung cư".to_string(), "đất nền".to_string()],
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;

        // Same override the original deployment used; keeps the URL out of
        // the config file.
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }

        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                return Self::load_from_path(path);
            }
        }

        Ok(Self::default())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(path) = std::env::var("NHADAT_CONFIG") {
            paths.push(path.into());
        }
        paths.push("nhadat.toml".into());
        paths.push("/etc/nhadat/config.toml".into());
        paths
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.loaded_from = Some(path.to_path_buf());

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            bail!("No database URL configured; set DATABASE_URL or database.url in nhadat.toml");
        }
        if self.database.max_connections == 0 {
            bail!("database.max_connections must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.search.language, "vietnamese");
        assert!(!config.search.popular_terms.is_empty());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_path_records_source() {
        let path = std::env::temp_dir().join("nhadat-config-source-test.toml");
        std::fs::write(&path, "[server]\nport = 4000\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.loaded_from.as_deref(), Some(path.as_path()));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [database]
            url = "postgres://localhost/nhadat"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.url, "postgres://localhost/nhadat");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.validate().is_ok());
    }
}
