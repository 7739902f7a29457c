/// Route module for file-based routing
///
/// Contains the pure components that turn route file names into
/// templates:
/// - `pattern`: classification of a single segment
/// - `parser`: translation of a whole relative path into a template

pub mod parser;
pub mod pattern;

// Re-export commonly used types
pub use parser::{RouteTemplate, DEFAULT_INDEX_NAME};
pub use pattern::{classify_segment, Segment};
