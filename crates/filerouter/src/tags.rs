use std::collections::HashMap;
use std::path::Path;

use crate::module::module_key;
use crate::RouteTemplate;

/// Tag used when a route has no static segment and no override
pub const DEFAULT_TAG: &str = "default";

/// Resolves the tag of each route file
///
/// # Priority
///
/// 1. Override set for the file itself
/// 2. Override set for the nearest enclosing directory
/// 3. First static segment of the template (`/users/:id` → `users`)
/// 4. `"default"`
#[derive(Debug, Clone, Default)]
pub struct TagResolver {
    overrides: HashMap<String, String>,
}

impl TagResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a tag for a file or directory relative to the routes directory
    pub fn set(&mut self, path: impl AsRef<Path>, tag: impl Into<String>) {
        self.overrides.insert(module_key(path.as_ref()), tag.into());
    }

    pub fn resolve(&self, relative_file: &Path, template: &RouteTemplate) -> String {
        relative_file
            .ancestors()
            .map(module_key)
            .find_map(|key| self.overrides.get(&key))
            .cloned()
            .or_else(|| template.first_static().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_TAG.to_string())
    }
}
