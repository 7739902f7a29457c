pub mod check;
pub mod routes;

use std::path::{Path, PathBuf};

use anyhow::Result;
use filerouter::{Config, FileRouter};

/// Router configured from `config`, scanning `dir` when given
pub fn router(dir: Option<PathBuf>, config: &Path) -> Result<FileRouter> {
    let mut config = Config::load(config)?;
    if let Some(dir) = dir {
        config.routing.routes_dir = dir;
    }
    Ok(FileRouter::from_config(&config))
}
