//! Scan-time errors
//!
//! Every error here is fatal to the scan that produced it. Request-time
//! failures (extraction, validation) are reported by axum itself.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::HttpMethod;

/// A route file name or route combination that cannot be registered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("segment `{segment}` has an unclosed bracket")]
    UnclosedBracket { segment: String },

    #[error("segment `{segment}` has a stray bracket")]
    StrayBracket { segment: String },

    #[error("segment `{segment}` declares a parameter without a name")]
    EmptyParamName { segment: String },

    #[error("segment `{segment}`: `{name}` is not a valid parameter name")]
    InvalidParamName { segment: String, name: String },

    #[error("segment `{segment}`: unknown parameter type `{keyword}` (expected int, float, str, uuid or path)")]
    UnknownParamType { segment: String, keyword: String },

    #[error("static segment `{segment}` contains a reserved character (`:` or `*`)")]
    ReservedStaticSegment { segment: String },

    #[error("catch-all segment `{segment}` must be the last segment of the route")]
    CatchAllNotFinal { segment: String },

    #[error("route declares more than one catch-all segment")]
    MultipleCatchAll,

    #[error("parameter `{name}` is declared more than once")]
    DuplicateParam { name: String },

    #[error("{method} {template} is already registered by {existing}")]
    RouteCollision {
        method: HttpMethod,
        template: String,
        existing: PathBuf,
    },

    #[error("{template} is ambiguous with {other_template} registered by {other}")]
    AmbiguousRoute {
        template: String,
        other_template: String,
        other: PathBuf,
    },

    #[error("file name is not valid UTF-8")]
    NonUtf8Name,
}

/// A route file that could not be loaded as a module
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read route file: {0}")]
    Read(#[from] io::Error),

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("function `{function}` is declared but no handler is linked for it")]
    UnlinkedHandler { function: String },

    #[error("handler `{function}` is linked but the file declares no such function")]
    UndeclaredHandler { function: String },
}

/// Failure of a whole scan, identifying the offending file
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("routes directory {} not found", .0.display())]
    RootNotFound(PathBuf),

    #[error("failed to walk routes directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("{}: {error}", .file.display())]
    Configuration {
        file: PathBuf,
        #[source]
        error: ConfigurationError,
    },

    #[error("{}: failed to load route module: {error}", .file.display())]
    Load {
        file: PathBuf,
        #[source]
        error: LoadError,
    },
}

impl ScanError {
    pub(crate) fn configuration(file: impl Into<PathBuf>, error: ConfigurationError) -> Self {
        Self::Configuration {
            file: file.into(),
            error,
        }
    }

    pub(crate) fn load(file: impl Into<PathBuf>, error: LoadError) -> Self {
        Self::Load {
            file: file.into(),
            error,
        }
    }

    /// The route file the error refers to, if any
    pub fn file(&self) -> Option<&std::path::Path> {
        match self {
            Self::Configuration { file, .. } | Self::Load { file, .. } => Some(file),
            Self::RootNotFound(_) | Self::Walk(_) => None,
        }
    }

    /// The configuration error behind this scan failure, if any
    pub fn configuration_error(&self) -> Option<&ConfigurationError> {
        match self {
            Self::Configuration { error, .. } => Some(error),
            _ => None,
        }
    }
}
