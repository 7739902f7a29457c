use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::extract::Query;
use axum::http::{header, HeaderMap, Method, Uri};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub published_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct DraftQuery {
    #[serde(default)]
    pub draft: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostData {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentData {
    pub author: String,
    pub message: String,
}

/// Several body parts in one JSON document
#[derive(Debug, Deserialize)]
pub struct PostUpdate {
    pub post: PostData,
    #[serde(default)]
    pub comments: Vec<CommentData>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

fn default_limit() -> usize {
    10
}

/// Lists posts with pagination and filtering from the query string
pub async fn get(Query(query): Query<ListQuery>) -> Json<Value> {
    let posts = [(1, "Hello World", true), (2, "Draft Post", false), (3, "Another Post", true)];

    let posts: Vec<Value> = posts
        .into_iter()
        .filter(|(_, _, published)| *published || !query.published_only)
        .skip(query.offset)
        .take(query.limit)
        .map(|(id, title, published)| json!({ "id": id, "title": title, "published": published }))
        .collect();

    Json(json!({
        "posts": posts,
        "pagination": { "limit": query.limit, "offset": query.offset },
        "filters": { "published_only": query.published_only },
    }))
}

/// Creates a post from a JSON body, headers and query parameters
pub async fn post(
    headers: HeaderMap,
    Query(query): Query<DraftQuery>,
    Json(data): Json<PostData>,
) -> Json<Value> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok());

    Json(json!({
        "message": "Post created",
        "post": {
            "id": 999,
            "title": data.title,
            "content": data.content,
            "tags": data.tags,
            "published": data.published && !query.draft,
            "metadata": {
                "user_agent": user_agent,
                "has_auth": headers.contains_key(header::AUTHORIZATION),
                "is_draft": query.draft,
            },
        },
    }))
}

pub async fn put(Json(update): Json<PostUpdate>) -> Json<Value> {
    Json(json!({
        "message": "Post updated with multiple body parts",
        "post": update.post,
        "comments": update.comments,
        "metadata": update.metadata,
    }))
}

/// Echoes a summary of the raw request
pub async fn patch(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query_params): Query<BTreeMap<String, String>>,
    body: Bytes,
) -> Json<Value> {
    let json_data = if body.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| json!({ "error": "Invalid JSON" }))
    };
    Json(json!({
        "message": "Raw request processed",
        "body_size": body.len(),
        "headers_count": headers.len(),
        "query_params": query_params,
        "json_data": json_data,
        "method": method.as_str(),
        "url": uri.to_string(),
    }))
}
