use axum::Json;
use serde_json::{json, Value};

pub async fn get() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the file-based router demo!",
        "routes": [
            "GET / - This page",
            "GET /users - List users",
            "GET /users/{id} - Get user by ID",
            "POST /users - Create user",
            "GET /posts - List posts",
            "GET /blog/{slug} - Get blog post by slug",
            "GET /files/{path} - Get file at path (catch-all)",
            "GET /api/v1/health - Health check",
        ],
    }))
}
