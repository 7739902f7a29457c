// Scan failures over scratch route trees

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use filerouter::{ConfigurationError, FileRouter, HttpMethod, LinkedModules, LoadError, ScanError};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tower::ServiceExt;

async fn ok() -> &'static str {
    "ok"
}

fn write(root: &Path, file: &str, contents: &str) {
    let path = root.join(file);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn tree(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (file, contents) in files {
        write(dir.path(), file, contents);
    }
    dir
}

/// Links `ok` for every (file, function) pair
fn linked(pairs: &[(&str, &str)]) -> LinkedModules {
    pairs
        .iter()
        .fold(LinkedModules::new(), |modules, (file, function)| {
            modules.link(file, function, ok)
        })
}

fn scan(dir: &Path, modules: &LinkedModules) -> Result<(), ScanError> {
    FileRouter::new(dir).scan(modules).map(|_| ())
}

fn configuration_error(err: &ScanError) -> ConfigurationError {
    err.configuration_error().cloned().unwrap()
}

#[test]
fn test_colliding_files() {
    let dir = tree(&[("users.rs", "fn get() {}"), ("users/index.rs", "fn get() {}")]);
    let modules = linked(&[("users.rs", "get"), ("users/index.rs", "get")]);

    let err = scan(dir.path(), &modules).unwrap_err();
    // `users/` is walked before `users.rs`
    assert_eq!(err.file(), Some(dir.path().join("users.rs").as_path()));
    assert_eq!(
        configuration_error(&err),
        ConfigurationError::RouteCollision {
            method: HttpMethod::Get,
            template: "/users".to_string(),
            existing: PathBuf::from("users/index.rs"),
        }
    );
}

#[test]
fn test_different_methods_share_a_template() {
    let dir = tree(&[("users.rs", "fn get() {}"), ("users/index.rs", "fn post() {}")]);
    let modules = linked(&[("users.rs", "get"), ("users/index.rs", "post")]);

    let mut router = FileRouter::new(dir.path());
    let routes = router.scan(&modules).unwrap();
    assert_eq!(routes.len(), 2);
    assert!(routes.iter().all(|route| route.path == "/users"));
}

#[test]
fn test_ambiguous_parameter_names() {
    let dir = tree(&[("users/[id].rs", "fn get() {}"), ("users/[name].rs", "fn post() {}")]);
    let modules = linked(&[("users/[id].rs", "get"), ("users/[name].rs", "post")]);

    let err = scan(dir.path(), &modules).unwrap_err();
    assert!(matches!(
        configuration_error(&err),
        ConfigurationError::AmbiguousRoute { other, .. } if other == PathBuf::from("users/[id].rs")
    ));
}

#[test]
fn test_catch_all_directory_rejected() {
    let dir = tree(&[("[...a]/b.rs", "fn get() {}")]);
    let modules = linked(&[("[...a]/b.rs", "get")]);

    let err = scan(dir.path(), &modules).unwrap_err();
    assert_eq!(
        configuration_error(&err),
        ConfigurationError::CatchAllNotFinal {
            segment: "[...a]".to_string()
        }
    );
    assert!(err.to_string().contains("[...a]/b.rs"));
}

#[test]
fn test_unknown_type_keyword() {
    let dir = tree(&[("users/[id:bool].rs", "fn get() {}")]);
    let modules = linked(&[("users/[id:bool].rs", "get")]);

    let err = scan(dir.path(), &modules).unwrap_err();
    assert!(matches!(
        configuration_error(&err),
        ConfigurationError::UnknownParamType { keyword, .. } if keyword == "bool"
    ));
}

#[rstest]
#[case("a*b.rs")]
#[case("v1:beta.rs")]
fn test_reserved_characters_in_static_segment(#[case] file: &str) {
    let dir = tree(&[(file, "fn get() {}")]);
    let modules = linked(&[(file, "get")]);

    let err = scan(dir.path(), &modules).unwrap_err();
    assert_eq!(err.file(), Some(dir.path().join(file).as_path()));
    assert_eq!(
        configuration_error(&err),
        ConfigurationError::ReservedStaticSegment {
            segment: file.trim_end_matches(".rs").to_string()
        }
    );
}

#[test]
fn test_syntax_error_aborts_scan() {
    let dir = tree(&[("index.rs", "fn get() {}"), ("broken.rs", "pub async fn get( {")]);
    let modules = linked(&[("index.rs", "get"), ("broken.rs", "get")]);

    let err = scan(dir.path(), &modules).unwrap_err();
    assert!(matches!(
        err,
        ScanError::Load { error: LoadError::Syntax(_), ref file } if file.ends_with("broken.rs")
    ));
}

#[test]
fn test_unlinked_handler() {
    let dir = tree(&[("index.rs", "fn get() {} fn delete() {}")]);
    let modules = linked(&[("index.rs", "get")]);

    let err = scan(dir.path(), &modules).unwrap_err();
    assert!(matches!(
        err,
        ScanError::Load { error: LoadError::UnlinkedHandler { ref function }, .. } if function == "delete"
    ));
}

#[test]
fn test_undeclared_handler() {
    let dir = tree(&[("index.rs", "fn get() {}")]);
    let modules = linked(&[("index.rs", "get"), ("index.rs", "post")]);

    let err = scan(dir.path(), &modules).unwrap_err();
    assert!(matches!(
        err,
        ScanError::Load { error: LoadError::UndeclaredHandler { ref function }, .. } if function == "post"
    ));
}

#[test]
fn test_non_method_functions_are_not_routes() {
    let dir = tree(&[
        ("index.rs", "fn get() {}"),
        ("helpers.rs", "fn render() {} fn _private() {} fn GET() {}"),
    ]);
    let modules = linked(&[("index.rs", "get")]);

    let mut router = FileRouter::new(dir.path());
    let routes = router.scan(&modules).unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].path, "/");
}

/// Log output shared with the test body
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn test_non_method_functions_are_reported() {
    let dir = tree(&[("helpers.rs", "fn render() {} fn _private() {} fn main() {}")]);

    let logs = Captured::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        scan(dir.path(), &LinkedModules::new()).unwrap();
    });

    let logs = logs.text();
    assert!(logs.contains("not a recognized HTTP method handler"), "{}", logs);
    assert!(logs.contains("function=\"render\""), "{}", logs);
    assert!(!logs.contains("_private"), "{}", logs);
    assert!(!logs.contains("function=\"main\""), "{}", logs);
}

#[tokio::test]
async fn test_failed_rescan_keeps_previous_app() {
    let dir = tree(&[("users.rs", "fn get() {}")]);
    let modules = linked(&[("users.rs", "get"), ("users/index.rs", "get")]);

    let mut router = FileRouter::new(dir.path());
    router.scan(&modules).unwrap();

    write(dir.path(), "users/index.rs", "fn get() {}");
    assert!(router.scan(&modules).is_err());

    assert_eq!(router.routes().len(), 1);
    assert_eq!(router.routes()[0].file, PathBuf::from("users.rs"));

    let request = Request::builder().uri("/users").body(Body::empty()).unwrap();
    let response = router.app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn test_missing_routes_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = scan(&dir.path().join("routes"), &LinkedModules::new()).unwrap_err();
    assert!(matches!(err, ScanError::RootNotFound(_)));
}
