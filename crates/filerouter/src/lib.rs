//! # filerouter
//!
//! File-based route registration for axum. Directory and file names under
//! a routes directory become route templates; top-level functions named
//! after HTTP methods become the handlers for those templates.
//!
//! ## Naming convention
//!
//! | File                       | Template                |
//! |----------------------------|-------------------------|
//! | `index.rs`                 | `/`                     |
//! | `users/index.rs`           | `/users`                |
//! | `users/[id].rs`            | `/users/{id}`           |
//! | `users/[id:int].rs`        | `/users/{id:int}`       |
//! | `blog/[slug:].rs`          | `/blog/{slug}`          |
//! | `files/[...path].rs`       | `/files/{path:path}`    |
//!
//! Type keywords are `int`, `float`, `str`, `uuid` and `path`. A request
//! whose path value does not fit the declared type gets a 404.
//!
//! Files and directories starting with `_` or `.` are ignored, as are
//! `mod.rs`, `lib.rs` and `main.rs`.
//!
//! ## Handlers
//!
//! Route files are ordinary Rust modules compiled into the binary. They
//! are linked to their location with [`LinkedModules`] (or [`link!`]);
//! scanning a directory parses each file with `syn` and checks that the
//! methods it declares are exactly the ones linked.
//!
//! ## Example
//!
//! ```no_run
//! use filerouter::{link, FileRouter, LinkedModules};
//!
//! mod users_id {
//!     use axum::extract::Path;
//!
//!     pub async fn get(Path(id): Path<i64>) -> String {
//!         format!("user {}", id)
//!     }
//! }
//!
//! let modules = link!(LinkedModules::new(), "users/[id:int].rs" => users_id { get });
//!
//! let mut router = FileRouter::new("routes");
//! for route in router.scan(&modules)? {
//!     println!("{} {:?} -> {}", route.pattern, route.methods, route.file.display());
//! }
//! let app: axum::Router = router.into_app();
//! # Ok::<(), filerouter::ScanError>(())
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod app;
mod coerce;
pub mod collector;
pub mod config;
pub mod error;
pub mod method;
pub mod module;
pub mod param;
pub mod registry;
pub mod route;
pub mod source;
pub mod tags;

// Re-export public types
pub use app::{file_router, FileRouter, RouteInfo};
pub use collector::{Parameter, RouteDefinition};
pub use config::Config;
pub use error::{ConfigurationError, LoadError, ScanError};
pub use method::HttpMethod;
pub use module::{Export, HandlerId, LinkedModules, ModuleLoader, RouteFile, RouteHandler, RouteModule};
pub use param::{ParamType, PathParam};
pub use registry::RouteRegistry;
pub use route::RouteTemplate;
pub use source::{HandlerArg, RouteSource};
pub use tags::TagResolver;

/// Links the handler functions of one route module
///
/// Expands to one [`LinkedModules::link`] call per function, using the
/// function's own name as the method name.
///
/// ```
/// use filerouter::{link, LinkedModules};
///
/// mod users {
///     pub async fn get() -> &'static str { "all users" }
///     pub async fn post() -> &'static str { "created" }
/// }
///
/// let modules: LinkedModules = link!(LinkedModules::new(), "users/index.rs" => users { get, post });
/// assert!(modules.is_linked("users/index.rs", "post"));
/// ```
#[macro_export]
macro_rules! link {
    ($modules:expr, $file:literal => $module:ident { $($function:ident),+ $(,)? }) => {
        $modules $(.link($file, stringify!($function), $module::$function))+
    };
}
