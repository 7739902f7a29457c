use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::state::{AppState, User};

#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
}

pub async fn get(State(state): State<AppState>) -> Json<Value> {
    let users = state.users.read().await;
    Json(json!({ "users": &*users }))
}

pub async fn post(
    State(state): State<AppState>,
    Json(data): Json<UserCreate>,
) -> (StatusCode, Json<Value>) {
    let mut users = state.users.write().await;
    let id = users.iter().map(|user| user.id).max().unwrap_or(0) + 1;
    let user = User {
        id,
        name: data.name,
        email: data.email,
    };
    users.push(user.clone());

    (
        StatusCode::CREATED,
        Json(json!({ "message": "User created", "user": user })),
    )
}
