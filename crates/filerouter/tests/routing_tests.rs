// End-to-end tests over the route tree in tests/fixtures/routes
//
// The fixture files are compiled into this test binary as modules and
// linked to their location, exactly as an application would do.

use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use filerouter::{link, FileRouter, HttpMethod, LinkedModules, ParamType, PathParam, RouteInfo};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

#[path = "fixtures/routes/index.rs"]
mod home;
#[path = "fixtures/routes/posts.rs"]
mod posts;
#[path = "fixtures/routes/users/index.rs"]
mod users;
#[path = "fixtures/routes/users/admin.rs"]
mod users_admin;
#[path = "fixtures/routes/users/[id:int].rs"]
mod user_by_id;
#[path = "fixtures/routes/blog/[slug:].rs"]
mod blog_post;
#[path = "fixtures/routes/files/[...path].rs"]
mod files;
#[path = "fixtures/routes/api/v1/health.rs"]
mod health;
#[path = "fixtures/routes/orders/[id:uuid].rs"]
mod order_by_id;
#[path = "fixtures/routes/prices/[amount:float].rs"]
mod price;

const ROUTES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/routes");

fn modules() -> LinkedModules {
    let modules = LinkedModules::new();
    let modules = link!(modules, "index.rs" => home { get });
    let modules = link!(modules, "posts.rs" => posts { get });
    let modules = link!(modules, "users/index.rs" => users { get, post });
    let modules = link!(modules, "users/admin.rs" => users_admin { get });
    let modules = link!(modules, "users/[id:int].rs" => user_by_id { get, delete });
    let modules = link!(modules, "blog/[slug:].rs" => blog_post { get });
    let modules = link!(modules, "files/[...path].rs" => files { get });
    let modules = link!(modules, "api/v1/health.rs" => health { get });
    let modules = link!(modules, "orders/[id:uuid].rs" => order_by_id { get });
    link!(modules, "prices/[amount:float].rs" => price { get })
}

fn scanned() -> FileRouter {
    let mut router = FileRouter::new(ROUTES_DIR);
    router.scan(&modules()).unwrap();
    router
}

async fn send(app: &Router, method: &str, uri: &str, body: Body) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, "GET", uri, Body::empty()).await
}

fn summary(routes: &[RouteInfo]) -> Vec<(&str, Vec<HttpMethod>, &str)> {
    routes
        .iter()
        .map(|route| (route.pattern.as_str(), route.methods.clone(), route.tag.as_str()))
        .collect()
}

#[test]
fn test_route_table() {
    let router = scanned();

    assert_eq!(
        summary(router.routes()),
        vec![
            ("/", vec![HttpMethod::Get], "default"),
            ("/posts", vec![HttpMethod::Get], "posts"),
            ("/users", vec![HttpMethod::Get, HttpMethod::Post], "users"),
            ("/users/admin", vec![HttpMethod::Get], "users"),
            ("/api/v1/health", vec![HttpMethod::Get], "api"),
            ("/blog/{slug}", vec![HttpMethod::Get], "blog"),
            ("/orders/{id:uuid}", vec![HttpMethod::Get], "orders"),
            ("/prices/{amount:float}", vec![HttpMethod::Get], "prices"),
            ("/users/{id:int}", vec![HttpMethod::Get, HttpMethod::Delete], "users"),
            ("/files/{path:path}", vec![HttpMethod::Get], "files"),
        ]
    );
}

#[test]
fn test_route_details() {
    let router = scanned();
    let route = router
        .routes()
        .iter()
        .find(|route| route.path == "/users/:id")
        .unwrap();

    assert_eq!(route.file, PathBuf::from("users/[id:int].rs"));
    assert_eq!(route.params, vec![PathParam::new("id", ParamType::Int)]);
    assert_eq!(route.names, vec!["get_[id:int]", "delete_[id:int]"]);
    assert_eq!(route.handlers[1].to_string(), "users/[id:int].rs::delete");
}

#[test]
fn test_ignored_files_are_not_routes() {
    let router = scanned();
    let files: Vec<_> = router.routes().iter().map(|route| route.file.clone()).collect();

    assert!(!files.contains(&PathBuf::from("users/_helpers.rs")));
    assert!(!files.contains(&PathBuf::from("users/mod.rs")));
    assert!(!files.contains(&PathBuf::from("_drafts/secret.rs")));
    assert!(!files.iter().any(|file| file.extension().is_some_and(|ext| ext == "md")));
}

#[tokio::test]
async fn test_index_files() {
    let app = scanned().into_app();

    assert_eq!(get(&app, "/").await, (StatusCode::OK, "home".to_string()));
    assert_eq!(get(&app, "/users").await, (StatusCode::OK, "all users".to_string()));
}

#[tokio::test]
async fn test_int_parameter() {
    let app = scanned().into_app();

    assert_eq!(get(&app, "/users/42").await, (StatusCode::OK, "user 42".to_string()));
    assert_eq!(get(&app, "/users/abc").await.0, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/users/-1").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_beats_dynamic() {
    let app = scanned().into_app();

    assert_eq!(get(&app, "/users/admin").await, (StatusCode::OK, "admin".to_string()));
}

#[tokio::test]
async fn test_slug_and_catch_all() {
    let app = scanned().into_app();

    assert_eq!(
        get(&app, "/blog/hello-world").await,
        (StatusCode::OK, "post hello-world".to_string())
    );
    assert_eq!(
        get(&app, "/files/a/b/c.txt").await,
        (StatusCode::OK, "a/b/c.txt".to_string())
    );
}

#[tokio::test]
async fn test_uuid_and_float_parameters() {
    let app = scanned().into_app();

    let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
    assert_eq!(
        get(&app, &format!("/orders/{}", id)).await,
        (StatusCode::OK, format!("order {}", id))
    );
    assert_eq!(
        get(&app, "/orders/67e5504410b1426f9247bb680e5fe0c8").await.0,
        StatusCode::NOT_FOUND
    );

    assert_eq!(get(&app, "/prices/12.5").await, (StatusCode::OK, "12.50".to_string()));
    assert_eq!(get(&app, "/prices/7").await, (StatusCode::OK, "7.00".to_string()));
    assert_eq!(get(&app, "/prices/1e3").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_methods_on_one_template() {
    let app = scanned().into_app();

    let created = send(&app, "POST", "/users", Body::from(r#"{"name":"ada"}"#)).await;
    assert_eq!(created, (StatusCode::CREATED, "created ada".to_string()));

    assert_eq!(
        send(&app, "DELETE", "/users/7", Body::empty()).await.0,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        send(&app, "POST", "/users/admin", Body::empty()).await.0,
        StatusCode::METHOD_NOT_ALLOWED
    );
}

#[tokio::test]
async fn test_handler_extractors_are_untouched() {
    let app = scanned().into_app();

    let (status, _) = send(&app, "POST", "/users", Body::from("not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_file_router_helper() {
    let app = filerouter::file_router(ROUTES_DIR, &modules()).unwrap();

    assert_eq!(get(&app, "/posts").await, (StatusCode::OK, "2 posts".to_string()));
}

#[test]
fn test_rescan_is_idempotent() {
    let modules = modules();
    let mut router = FileRouter::new(ROUTES_DIR);

    let first = router.scan(&modules).unwrap().to_vec();
    let second = router.scan(&modules).unwrap().to_vec();
    assert_eq!(first, second);
}

#[test]
fn test_custom_tags() {
    let mut router = FileRouter::new(ROUTES_DIR);
    router.set_custom_tag("users", "user-management");
    router.set_custom_tag("users/[id:int].rs", "user-details");
    router.scan(&modules()).unwrap();

    let tag = |path: &str| {
        router
            .routes()
            .iter()
            .find(|route| route.path == path)
            .map(|route| route.tag.clone())
            .unwrap()
    };
    assert_eq!(tag("/users"), "user-management");
    assert_eq!(tag("/users/admin"), "user-management");
    assert_eq!(tag("/users/:id"), "user-details");
    assert_eq!(tag("/blog/:slug"), "blog");
}
