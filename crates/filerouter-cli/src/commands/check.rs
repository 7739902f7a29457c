use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use colored::Colorize;

use crate::loader::SourceLoader;

pub fn execute(dir: Option<PathBuf>, config: &Path) -> Result<()> {
    let mut router = super::router(dir, config)?;
    let routes_dir = router.routes_dir().to_path_buf();

    match router.scan(&SourceLoader) {
        Ok(routes) => {
            let handlers: usize = routes.iter().map(|route| route.methods.len()).sum();
            println!(
                "{} {} handlers in {} route files",
                "✓".green().bold(),
                handlers,
                routes.len()
            );
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), e);
            bail!("route check failed for {}", routes_dir.display())
        }
    }
}
