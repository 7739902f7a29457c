// File: src/config.rs
// Purpose: Configuration parsing from filerouter.toml

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::route::DEFAULT_INDEX_NAME;

/// Default configuration file name
pub const CONFIG_FILE: &str = "filerouter.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    /// Tag overrides, keyed by file or directory relative to the routes
    /// directory
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoutingConfig {
    /// Directory containing route files (default: "routes")
    #[serde(default = "default_routes_dir")]
    pub routes_dir: PathBuf,

    /// Extension of route files (default: "rs")
    #[serde(default = "default_extension")]
    pub extension: String,

    /// File stem that maps to its directory's route (default: "index")
    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// Top-level function names that are neither handlers nor warned about
    #[serde(default = "default_skip_functions")]
    pub skip_functions: Vec<String>,

    /// Whether unrecognized top-level functions are logged (default: true)
    #[serde(default = "default_true")]
    pub warn_unrecognized: bool,
}

// Default values
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_routes_dir() -> PathBuf {
    PathBuf::from("routes")
}

fn default_extension() -> String {
    "rs".to_string()
}

fn default_index_name() -> String {
    DEFAULT_INDEX_NAME.to_string()
}

fn default_skip_functions() -> Vec<String> {
    vec!["main".to_string(), "tests".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            routes_dir: default_routes_dir(),
            extension: default_extension(),
            index_name: default_index_name(),
            skip_functions: default_skip_functions(),
            warn_unrecognized: true,
        }
    }
}

impl ServerConfig {
    /// `host:port`, as accepted by `TcpListener::bind`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl RoutingConfig {
    pub fn is_skipped_function(&self, name: &str) -> bool {
        name.starts_with('_') || self.skip_functions.iter().any(|skip| skip == name)
    }
}

impl Config {
    /// Load configuration from filerouter.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing or empty file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }
}
