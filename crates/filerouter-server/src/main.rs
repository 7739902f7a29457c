mod linked;
mod state;

use std::path::Path;

use anyhow::{Context, Result};
use axum::Router;
use filerouter::{Config, FileRouter, RouteInfo};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

/// Config file used when `FILEROUTER_CONFIG` is not set
const DEFAULT_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/filerouter.toml");

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::var("FILEROUTER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG.to_string());
    let config = load_config(Path::new(&config_path), |key| std::env::var(key).ok())?;

    let mut router = FileRouter::from_config(&config);
    let routes = router
        .scan(&linked::modules())
        .with_context(|| format!("Failed to scan routes in {:?}", config.routing.routes_dir))?;
    print_routes(routes);

    let app = build_app(router);

    let addr = config.server.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Loads the config file, then applies environment overrides
///
/// A relative `routes_dir` is resolved against the config file's
/// directory.
fn load_config(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let mut config = Config::load(path)?;

    if let Some(host) = env("FILEROUTER_HOST") {
        config.server.host = host;
    }
    if let Some(port) = env("FILEROUTER_PORT") {
        config.server.port = port
            .parse()
            .with_context(|| format!("Invalid FILEROUTER_PORT: {:?}", port))?;
    }
    if let Some(dir) = env("FILEROUTER_ROUTES_DIR") {
        config.routing.routes_dir = dir.into();
    }

    if config.routing.routes_dir.is_relative() {
        if let Some(base) = path.parent() {
            config.routing.routes_dir = base.join(&config.routing.routes_dir);
        }
    }
    Ok(config)
}

fn build_app(router: FileRouter<AppState>) -> Router {
    router
        .into_app()
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::seeded())
}

fn print_routes(routes: &[RouteInfo]) {
    println!("Registered routes:");
    for route in routes {
        let methods: Vec<&str> = route.methods.iter().map(|method| method.as_str()).collect();
        println!(
            "  {:<30} [{}] -> {} ({})",
            route.pattern,
            methods.join(", "),
            route.file.display(),
            route.tag
        );
    }
}
