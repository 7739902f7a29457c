use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use filerouter::RouteInfo;
use serde_json::{json, Value};

use crate::loader::SourceLoader;

pub fn execute(dir: Option<PathBuf>, config: &Path, as_json: bool) -> Result<()> {
    let mut router = super::router(dir, config)?;
    let routes_dir = router.routes_dir().to_path_buf();
    let routes = router
        .scan(&SourceLoader)
        .with_context(|| format!("Failed to scan {:?}", routes_dir))?;

    if as_json {
        let listing: Vec<Value> = routes.iter().map(to_json).collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("{} {}", "Routes in".green().bold(), routes_dir.display());
    println!();
    for route in routes {
        println!(
            "  {:<32} {:<24} {} {}",
            route.pattern.cyan(),
            methods(route),
            route.file.display(),
            format!("[{}]", route.tag).dimmed()
        );
    }
    println!();
    println!("{} route files", routes.len());

    Ok(())
}

fn methods(route: &RouteInfo) -> String {
    route
        .methods
        .iter()
        .map(|method| method.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn to_json(route: &RouteInfo) -> Value {
    json!({
        "pattern": route.pattern,
        "path": route.path,
        "file": route.file.display().to_string(),
        "methods": route.methods.iter().map(|method| method.as_str()).collect::<Vec<_>>(),
        "names": route.names,
        "params": route
            .params
            .iter()
            .map(|param| json!({ "name": param.name, "type": param.ty.keyword() }))
            .collect::<Vec<_>>(),
        "tag": route.tag,
    })
}
