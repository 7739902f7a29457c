//! The file router facade
//!
//! [`FileRouter`] owns the routing options and tag overrides, runs a scan
//! through a [`ModuleLoader`] and holds the resulting axum `Router`. A scan
//! either succeeds completely or leaves the previous application in place.

use std::path::{Path, PathBuf};

use axum::Router;
use tracing::info;

use crate::collector::{collect, RouteDefinition};
use crate::config::{Config, RoutingConfig};
use crate::module::{HandlerId, ModuleLoader};
use crate::registry::RouteRegistry;
use crate::tags::TagResolver;
use crate::{HttpMethod, PathParam, ScanError};

/// Summary of one registered route file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    /// Typed template, e.g. `/users/{id:int}`
    pub pattern: String,
    /// Template in axum's syntax, e.g. `/users/:id`
    pub path: String,
    /// Route file, relative to the routes directory
    pub file: PathBuf,
    pub params: Vec<PathParam>,
    pub methods: Vec<HttpMethod>,
    pub handlers: Vec<HandlerId>,
    /// Route names, `{method}_{file stem}`, in method order
    pub names: Vec<String>,
    pub tag: String,
}

impl RouteInfo {
    fn from_definition<S>(definition: &RouteDefinition<S>) -> Self {
        Self {
            pattern: definition.template.to_string(),
            path: definition.template.path().to_string(),
            file: definition.file.clone(),
            params: definition.template.params().to_vec(),
            methods: Vec::new(),
            handlers: Vec::new(),
            names: Vec::new(),
            tag: definition.tag.clone(),
        }
    }

    fn push<S>(&mut self, definition: &RouteDefinition<S>) {
        self.methods.push(definition.method);
        self.handlers.push(definition.handler.id().clone());
        self.names.push(definition.name.clone());
    }
}

/// Groups definitions per route file, keeping their order
fn summarize<S>(definitions: &[RouteDefinition<S>]) -> Vec<RouteInfo> {
    let mut routes: Vec<RouteInfo> = Vec::new();
    for definition in definitions {
        let index = match routes.iter().position(|route| route.file == definition.file) {
            Some(index) => index,
            None => {
                routes.push(RouteInfo::from_definition(definition));
                routes.len() - 1
            }
        };
        routes[index].push(definition);
    }
    routes
}

/// Discovers route files and builds an axum application from them
///
/// # Examples
///
/// ```no_run
/// use filerouter::{FileRouter, LinkedModules};
///
/// async fn get() -> &'static str { "home" }
///
/// let modules = LinkedModules::new().link("index.rs", "get", get);
///
/// let mut router = FileRouter::new("routes");
/// router.set_custom_tag("routes/users", "user-management");
/// router.scan(&modules)?;
///
/// let app: axum::Router = router.into_app();
/// # Ok::<(), filerouter::ScanError>(())
/// ```
pub struct FileRouter<S = ()> {
    options: RoutingConfig,
    tags: TagResolver,
    routes: Vec<RouteInfo>,
    app: Router<S>,
}

impl<S> FileRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Router over `routes_dir` with default options
    pub fn new(routes_dir: impl Into<PathBuf>) -> Self {
        Self::with_options(RoutingConfig {
            routes_dir: routes_dir.into(),
            ..RoutingConfig::default()
        })
    }

    pub fn with_options(options: RoutingConfig) -> Self {
        Self {
            options,
            tags: TagResolver::new(),
            routes: Vec::new(),
            app: Router::new(),
        }
    }

    /// Router configured by the `[routing]` and `[tags]` sections
    pub fn from_config(config: &Config) -> Self {
        let mut router = Self::with_options(config.routing.clone());
        for (path, tag) in &config.tags {
            router.set_custom_tag(path, tag);
        }
        router
    }

    /// Overrides the tag of a route file or of every file in a directory
    ///
    /// `path` is relative to the routes directory or starts with it
    /// (`users/[id].rs` and `routes/users/[id].rs` are equivalent). Takes
    /// effect on the next scan.
    pub fn set_custom_tag(&mut self, path: impl AsRef<Path>, tag: impl Into<String>) {
        let path = path.as_ref();
        let relative = path.strip_prefix(&self.options.routes_dir).unwrap_or(path);
        self.tags.set(relative, tag);
    }

    /// Scans the routes directory and replaces the application
    ///
    /// On error nothing changes: the routes and application of the
    /// previous successful scan stay in place.
    pub fn scan<L>(&mut self, loader: &L) -> Result<&[RouteInfo], ScanError>
    where
        L: ModuleLoader<S> + ?Sized,
    {
        let root = self.options.routes_dir.as_path();
        let definitions = collect(root, &self.options, &self.tags, loader)?;

        let mut registry = RouteRegistry::new();
        for definition in &definitions {
            registry
                .register(definition)
                .map_err(|e| ScanError::configuration(root.join(&definition.file), e))?;
        }

        let routes = summarize(&definitions);
        info!(
            dir = %root.display(),
            files = routes.len(),
            handlers = definitions.len(),
            "routes scanned"
        );

        self.app = registry.into_router();
        self.routes = routes;
        Ok(&self.routes)
    }
}

impl<S> FileRouter<S> {
    /// Routes of the last successful scan, most specific first
    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    pub fn routes_dir(&self) -> &Path {
        &self.options.routes_dir
    }

    pub fn options(&self) -> &RoutingConfig {
        &self.options
    }

    pub fn app(&self) -> Router<S> {
        self.app.clone()
    }

    pub fn into_app(self) -> Router<S> {
        self.app
    }
}

/// Scans `routes_dir` with default options and returns the application
pub fn file_router<S, L>(routes_dir: impl Into<PathBuf>, loader: &L) -> Result<Router<S>, ScanError>
where
    S: Clone + Send + Sync + 'static,
    L: ModuleLoader<S> + ?Sized,
{
    let mut router = FileRouter::new(routes_dir);
    router.scan(loader)?;
    Ok(router.into_app())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::RouteHandler;
    use crate::RouteTemplate;
    use pretty_assertions::assert_eq;

    fn definition(file: &str, method: HttpMethod) -> RouteDefinition<()> {
        let id = HandlerId {
            file: file.to_string(),
            function: method.function_name().to_string(),
        };
        RouteDefinition {
            file: PathBuf::from(file),
            template: RouteTemplate::from_file_path(file, "index").unwrap(),
            method,
            handler: RouteHandler::new(id, || async { "ok" }),
            handler_args: Vec::new(),
            tag: "users".to_string(),
            name: format!("{}_x", method.function_name()),
        }
    }

    #[test]
    fn test_summarize_groups_per_file() {
        let definitions = vec![
            definition("users.rs", HttpMethod::Get),
            definition("users/index.rs", HttpMethod::Post),
            definition("users.rs", HttpMethod::Delete),
        ];
        let routes = summarize(&definitions);

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].file, PathBuf::from("users.rs"));
        assert_eq!(routes[0].methods, vec![HttpMethod::Get, HttpMethod::Delete]);
        assert_eq!(routes[1].methods, vec![HttpMethod::Post]);
        assert_eq!(routes[1].pattern, "/users");
    }

    #[test]
    fn test_custom_tag_accepts_prefixed_paths() {
        let mut router: FileRouter = FileRouter::new("routes");
        router.set_custom_tag("routes/users", "user-management");
        router.set_custom_tag("api", "api");

        let users = RouteTemplate::from_file_path("users/[id].rs", "index").unwrap();
        assert_eq!(
            router.tags.resolve(Path::new("users/[id].rs"), &users),
            "user-management"
        );
        let health = RouteTemplate::from_file_path("api/v1/health.rs", "index").unwrap();
        assert_eq!(router.tags.resolve(Path::new("api/v1/health.rs"), &health), "api");
    }

    #[test]
    fn test_missing_directory_keeps_previous_state() {
        let mut router: FileRouter = FileRouter::new("does/not/exist");
        let modules = crate::LinkedModules::new();
        let err = router.scan(&modules).unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound(_)));
        assert!(router.routes().is_empty());
    }
}
