//! Route modules
//!
//! A route file is loaded as a [`RouteModule`]: a mapping from each of its
//! top-level names to an [`Export`]. Rust code cannot be evaluated at run
//! time, so the built-in [`LinkedModules`] loader pairs the functions a
//! file declares with handlers compiled into the binary and linked by
//! file and function name.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::handler::Handler;
use axum::routing::{on, MethodFilter, MethodRouter};

use crate::source::{HandlerArg, RouteSource, SourceFunction};
use crate::{HttpMethod, LoadError};

/// Identity of a handler: its route file and function name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId {
    /// Route file key (`users/[id:int].rs`)
    pub file: String,
    pub function: String,
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.file, self.function)
    }
}

type MakeMethodRouter<S> = Arc<dyn Fn(MethodFilter) -> MethodRouter<S> + Send + Sync>;

/// A type-erased axum handler that can be mounted under any method
pub struct RouteHandler<S> {
    id: HandlerId,
    make: MakeMethodRouter<S>,
}

impl<S> RouteHandler<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new<H, T>(id: HandlerId, handler: H) -> Self
    where
        H: Handler<T, S> + Sync,
        T: 'static,
    {
        Self {
            id,
            make: Arc::new(move |filter| on(filter, handler.clone())),
        }
    }

    /// Mounts the handler, unchanged, under one method
    pub fn method_router(&self, method: HttpMethod) -> MethodRouter<S> {
        (self.make)(method.filter())
    }
}

impl<S> RouteHandler<S> {
    pub fn id(&self) -> &HandlerId {
        &self.id
    }
}

impl<S> Clone for RouteHandler<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            make: Arc::clone(&self.make),
        }
    }
}

impl<S> fmt::Debug for RouteHandler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteHandler").field("id", &self.id).finish()
    }
}

/// A named top-level value of a route module
#[derive(Debug, Clone)]
pub enum Export<S> {
    /// A function with a callable handler and its declared arguments
    Handler {
        handler: RouteHandler<S>,
        args: Vec<HandlerArg>,
    },
    /// A function without a handler (helpers and other names)
    Function(SourceFunction),
}

/// One route file as seen by the collector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFile {
    path: PathBuf,
    relative: PathBuf,
    key: String,
}

impl RouteFile {
    pub fn new(root: &Path, relative: impl Into<PathBuf>) -> Self {
        let relative = relative.into();
        Self {
            path: root.join(&relative),
            key: module_key(&relative),
            relative,
        }
    }

    /// Path on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the routes directory
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// Relative path with `/` separators, used to link handlers
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn stem(&self) -> &str {
        self.relative
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
    }
}

/// Normalizes a relative route file path into a link key
pub(crate) fn module_key(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Top-level names of one loaded route file
#[derive(Debug, Clone)]
pub struct RouteModule<S> {
    key: String,
    exports: BTreeMap<String, Export<S>>,
}

impl<S> RouteModule<S> {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            exports: BTreeMap::new(),
        }
    }

    pub fn with_export(mut self, name: impl Into<String>, export: Export<S>) -> Self {
        self.exports.insert(name.into(), export);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self, name: &str) -> Option<&Export<S>> {
        self.exports.get(name)
    }

    /// Exports in name order
    pub fn exports(&self) -> impl Iterator<Item = (&str, &Export<S>)> {
        self.exports.iter().map(|(name, export)| (name.as_str(), export))
    }
}

/// Loads a route file as an isolated unit of code
pub trait ModuleLoader<S> {
    fn load(&self, file: &RouteFile) -> Result<RouteModule<S>, LoadError>;
}

/// Loader backed by handlers compiled into the binary
///
/// Route files are ordinary Rust modules (typically included with
/// `#[path = "..."] mod ...;`). Each handler is linked under the file's
/// key and its function name; loading a file parses it and checks that
/// declared methods and linked handlers agree.
///
/// # Examples
///
/// ```
/// use filerouter::LinkedModules;
///
/// async fn get() -> &'static str { "home" }
///
/// let modules: LinkedModules = LinkedModules::new().link("index.rs", "get", get);
/// assert!(modules.is_linked("index.rs", "get"));
/// ```
pub struct LinkedModules<S = ()> {
    modules: HashMap<String, BTreeMap<String, RouteHandler<S>>>,
}

impl<S> Default for LinkedModules<S> {
    fn default() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }
}

impl<S> LinkedModules<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Links `handler` as function `function` of route file `file`
    ///
    /// `file` is relative to the routes directory, with `/` separators.
    pub fn link<H, T>(mut self, file: &str, function: &str, handler: H) -> Self
    where
        H: Handler<T, S> + Sync,
        T: 'static,
    {
        let key = module_key(Path::new(file));
        let id = HandlerId {
            file: key.clone(),
            function: function.to_string(),
        };
        self.modules
            .entry(key)
            .or_default()
            .insert(function.to_string(), RouteHandler::new(id, handler));
        self
    }
}

impl<S> LinkedModules<S> {
    pub fn is_linked(&self, file: &str, function: &str) -> bool {
        self.modules
            .get(&module_key(Path::new(file)))
            .is_some_and(|functions| functions.contains_key(function))
    }
}

impl<S> ModuleLoader<S> for LinkedModules<S> {
    fn load(&self, file: &RouteFile) -> Result<RouteModule<S>, LoadError> {
        let source = RouteSource::read(file.path())?;
        let linked = self.modules.get(file.key());

        let mut module = RouteModule::new(file.key());
        for function in source.functions() {
            let handler = linked.and_then(|functions| functions.get(&function.name));
            let export = match handler {
                Some(handler) => Export::Handler {
                    handler: handler.clone(),
                    args: function.args.clone(),
                },
                None if HttpMethod::from_function_name(&function.name).is_some() => {
                    return Err(LoadError::UnlinkedHandler {
                        function: function.name.clone(),
                    });
                }
                None => Export::Function(function.clone()),
            };
            module = module.with_export(function.name.clone(), export);
        }

        if let Some(undeclared) = linked
            .into_iter()
            .flat_map(|functions| functions.keys())
            .find(|name| source.function(name).is_none())
        {
            return Err(LoadError::UndeclaredHandler {
                function: undeclared.clone(),
            });
        }

        Ok(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_key_normalizes_separators() {
        assert_eq!(module_key(Path::new("./users/[id:int].rs")), "users/[id:int].rs");
        assert_eq!(module_key(Path::new("index.rs")), "index.rs");
    }

    #[test]
    fn test_route_file_paths() {
        let file = RouteFile::new(Path::new("routes"), "users/index.rs");
        assert_eq!(file.path(), Path::new("routes/users/index.rs"));
        assert_eq!(file.key(), "users/index.rs");
        assert_eq!(file.stem(), "index");
    }

    #[test]
    fn test_handler_id_display() {
        let id = HandlerId {
            file: "users/[id].rs".to_string(),
            function: "get".to_string(),
        };
        assert_eq!(id.to_string(), "users/[id].rs::get");
    }
}
