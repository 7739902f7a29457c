//! Route collection
//!
//! Walks a routes directory, translates each eligible file's location into
//! a [`RouteTemplate`] and turns every export named after an HTTP method
//! into a [`RouteDefinition`].

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::config::RoutingConfig;
use crate::module::{Export, ModuleLoader, RouteFile, RouteHandler};
use crate::source::HandlerArg;
use crate::tags::TagResolver;
use crate::{HttpMethod, LoadError, PathParam, RouteTemplate, ScanError};

/// File stems that mark Rust module structure rather than routes
const MODULE_MARKERS: [&str; 3] = ["mod", "lib", "main"];

/// One handler bound to a method and a template
#[derive(Debug, Clone)]
pub struct RouteDefinition<S> {
    /// Route file, relative to the routes directory
    pub file: PathBuf,
    pub template: RouteTemplate,
    pub method: HttpMethod,
    pub handler: RouteHandler<S>,
    /// Arguments declared by the handler function
    pub handler_args: Vec<HandlerArg>,
    pub tag: String,
    /// `{method}_{file stem}`, e.g. `get_[id:int]`
    pub name: String,
}

/// A parameter of a route definition, tagged with where it comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter<'a> {
    /// Declared by the route file name
    Path(&'a PathParam),
    /// Declared by the handler function (query, body, headers, ...)
    Handler(&'a HandlerArg),
}

impl<S> RouteDefinition<S> {
    /// Path parameters followed by the handler's own arguments
    ///
    /// Handler arguments using the `Path` extractor bind the path
    /// parameters already listed and are left out.
    pub fn parameters(&self) -> Vec<Parameter<'_>> {
        self.template
            .params()
            .iter()
            .map(Parameter::Path)
            .chain(
                self.handler_args
                    .iter()
                    .filter(|arg| !arg.binds_path)
                    .map(Parameter::Handler),
            )
            .collect()
    }
}

fn is_excluded(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.')
}

/// Whether a file, by its name alone, is a route file
///
/// # Examples
///
/// ```
/// use filerouter::collector::is_route_file;
/// use std::path::Path;
///
/// assert!(is_route_file(Path::new("users/[id].rs"), "rs"));
/// assert!(!is_route_file(Path::new("users/_helpers.rs"), "rs"));
/// assert!(!is_route_file(Path::new("users/mod.rs"), "rs"));
/// assert!(!is_route_file(Path::new("README.md"), "rs"));
/// ```
pub fn is_route_file(path: &Path, extension: &str) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    if is_excluded(name) {
        return false;
    }
    if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
        return false;
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| !MODULE_MARKERS.contains(&stem))
}

/// Whether a non-method export `name` is reported during collection
fn is_reported(options: &RoutingConfig, name: &str) -> bool {
    options.warn_unrecognized && !options.is_skipped_function(name)
}

fn is_entered(entry: &DirEntry) -> bool {
    entry.depth() == 0
        || !entry.file_type().is_dir()
        || !entry.file_name().to_str().is_some_and(is_excluded)
}

/// Lists the route files under `root`, sorted by path
pub fn discover(root: &Path, options: &RoutingConfig) -> Result<Vec<RouteFile>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(is_entered)
    {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_route_file(entry.path(), &options.extension) {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        files.push(RouteFile::new(root, relative));
    }
    Ok(files)
}

/// Collects the route definitions of every route file under `root`
///
/// Definitions come out most specific first, then by path and method. The
/// first file that cannot be translated or loaded aborts the collection.
pub fn collect<S, L>(
    root: &Path,
    options: &RoutingConfig,
    tags: &TagResolver,
    loader: &L,
) -> Result<Vec<RouteDefinition<S>>, ScanError>
where
    L: ModuleLoader<S> + ?Sized,
{
    let mut definitions = Vec::new();

    for file in discover(root, options)? {
        let template = RouteTemplate::from_file_path(file.relative(), &options.index_name)
            .map_err(|e| ScanError::configuration(file.path(), e))?;
        let module = loader
            .load(&file)
            .map_err(|e| ScanError::load(file.path(), e))?;
        let tag = tags.resolve(file.relative(), &template);

        for (name, export) in module.exports() {
            let Some(method) = HttpMethod::from_function_name(name) else {
                if is_reported(options, name) {
                    warn!(
                        file = %file.relative().display(),
                        function = name,
                        "not a recognized HTTP method handler"
                    );
                }
                continue;
            };

            let Export::Handler { handler, args } = export else {
                let error = LoadError::UnlinkedHandler {
                    function: name.to_string(),
                };
                return Err(ScanError::load(file.path(), error));
            };

            definitions.push(RouteDefinition {
                file: file.relative().to_path_buf(),
                template: template.clone(),
                method,
                handler: handler.clone(),
                handler_args: args.clone(),
                tag: tag.clone(),
                name: format!("{}_{}", method.function_name(), file.stem()),
            });
        }
    }

    definitions.sort_by(|a, b| {
        a.template
            .specificity()
            .cmp(&b.template.specificity())
            .then_with(|| a.template.path().cmp(b.template.path()))
            .then_with(|| a.method.cmp(&b.method))
    });
    Ok(definitions)
}
