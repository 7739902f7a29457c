use axum::extract::State;
use axum::Json;
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn get(State(state): State<AppState>) -> Json<Value> {
    let now = Utc::now();

    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": now.to_rfc3339(),
        "uptime": format_uptime(now - state.started_at),
        "service": "filerouter demo API",
    }))
}

/// `1h 2m 3s`
fn format_uptime(elapsed: Duration) -> String {
    let seconds = elapsed.num_seconds().max(0);
    format!("{}h {}m {}s", seconds / 3600, seconds % 3600 / 60, seconds % 60)
}
