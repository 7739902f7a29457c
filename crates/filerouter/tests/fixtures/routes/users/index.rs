use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct NewUser {
    pub name: String,
}

pub async fn get() -> &'static str {
    "all users"
}

pub async fn post(Json(user): Json<NewUser>) -> (StatusCode, String) {
    (StatusCode::CREATED, format!("created {}", user.name))
}
