use std::collections::BTreeMap;
use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogPost {
    pub title: String,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
}

/// Application state shared across handlers
#[derive(Clone, Default)]
pub struct AppState {
    pub users: Arc<RwLock<Vec<User>>>,
    pub blog: Arc<RwLock<BTreeMap<String, BlogPost>>>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// State preloaded with a few users and blog posts
    pub fn seeded() -> Self {
        let users = [(1, "Alice"), (2, "Bob"), (3, "Charlie")]
            .into_iter()
            .map(|(id, name)| User {
                id,
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
            })
            .collect();

        let blog = [
            ("hello-world", "Hello World", "This is my first blog post!", "Alice"),
            ("rust-tips", "10 Rust Tips", "Here are 10 useful Rust tips for beginners...", "Bob"),
            ("axum-guide", "Axum Getting Started", "Learn how to build APIs with axum...", "Charlie"),
        ]
        .into_iter()
        .map(|(slug, title, content, author)| {
            let post = BlogPost {
                title: title.to_string(),
                content: content.to_string(),
                author: author.to_string(),
                tags: slug.split('-').map(str::to_string).collect(),
            };
            (slug.to_string(), post)
        })
        .collect();

        Self {
            users: Arc::new(RwLock::new(users)),
            blog: Arc::new(RwLock::new(blog)),
            started_at: Utc::now(),
        }
    }
}

/// JSON error body shared by the demo routes
pub fn not_found(detail: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": detail })))
}
