/// Translation of route file paths into route templates
///
/// Pure functional parsers that transform relative file paths into
/// [`RouteTemplate`]s. All functions are **pure**: same input → same
/// output, no side effects.

use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path};

use super::pattern::{classify_segment, Segment};
use crate::{ConfigurationError, PathParam};

/// File stem that stands for the route of its containing directory
pub const DEFAULT_INDEX_NAME: &str = "index";

/// An immutable route template built from one route file's location
///
/// Holds the classified segments, the path in axum's syntax and the
/// ordered list of declared path parameters.
///
/// # Examples
///
/// ```
/// use filerouter::RouteTemplate;
///
/// let template = RouteTemplate::from_file_path("users/[id:int].rs", "index").unwrap();
/// assert_eq!(template.path(), "/users/:id");
/// assert_eq!(template.to_string(), "/users/{id:int}");
///
/// let root = RouteTemplate::from_file_path("index.rs", "index").unwrap();
/// assert_eq!(root.path(), "/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    segments: Vec<Segment>,
    path: String,
    params: Vec<PathParam>,
}

/// Accumulator for fold-based parsing
///
/// All mutations are local to the fold; each step consumes and returns the
/// state.
#[derive(Default)]
struct ParseState {
    segments: Vec<Segment>,
    path: String,
    params: Vec<PathParam>,
    catch_alls: Vec<String>,
}

impl ParseState {
    fn with_segment(mut self, segment: Segment, raw: &str) -> Self {
        self.path.push('/');
        self.path.push_str(&segment.to_axum());
        if let Some(param) = segment.param() {
            self.params.push(param);
        }
        if segment.is_catch_all() {
            self.catch_alls.push(raw.to_string());
        }
        self.segments.push(segment);
        self
    }

    /// Checks catch-all placement and parameter uniqueness
    ///
    /// `file_segment` tells whether the final segment came from the file
    /// stem; directories may never hold a catch-all.
    fn validate(self, file_segment: bool) -> Result<Self, ConfigurationError> {
        if self.catch_alls.len() > 1 {
            return Err(ConfigurationError::MultipleCatchAll);
        }

        let last = self.segments.len().saturating_sub(1);
        let misplaced = self
            .segments
            .iter()
            .enumerate()
            .find(|(idx, segment)| segment.is_catch_all() && (*idx != last || !file_segment));
        if misplaced.is_some() {
            return Err(ConfigurationError::CatchAllNotFinal {
                segment: self.catch_alls[0].clone(),
            });
        }

        let mut seen: Vec<&str> = Vec::with_capacity(self.params.len());
        for param in &self.params {
            if seen.contains(&param.name.as_str()) {
                return Err(ConfigurationError::DuplicateParam {
                    name: param.name.clone(),
                });
            }
            seen.push(&param.name);
        }

        Ok(self)
    }

    fn finalize(mut self) -> RouteTemplate {
        if self.path.is_empty() {
            self.path = "/".to_string();
        }
        RouteTemplate {
            segments: self.segments,
            path: self.path,
            params: self.params,
        }
    }
}

impl RouteTemplate {
    /// Builds a template from directory names and an optional file stem
    ///
    /// `file_stem` is `None` for an index file, which contributes no
    /// segment of its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use filerouter::RouteTemplate;
    ///
    /// let template = RouteTemplate::new(["files"], Some("[...path]")).unwrap();
    /// assert_eq!(template.path(), "/files/*path");
    ///
    /// let users = RouteTemplate::new(["users"], None).unwrap();
    /// assert_eq!(users.path(), "/users");
    /// ```
    pub fn new<'a, I>(directories: I, file_stem: Option<&'a str>) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let raw: Vec<&str> = directories.into_iter().chain(file_stem).collect();

        raw.iter()
            .try_fold(ParseState::default(), |state, raw| {
                classify_segment(raw).map(|segment| state.with_segment(segment, raw))
            })?
            .validate(file_stem.is_some())
            .map(ParseState::finalize)
    }

    /// Builds a template from a path relative to the routes directory
    ///
    /// The extension of the final component is stripped; a stem equal to
    /// `index_name` maps to the route of its directory.
    pub fn from_file_path(
        relative: impl AsRef<Path>,
        index_name: &str,
    ) -> Result<Self, ConfigurationError> {
        let relative = relative.as_ref();

        let mut directories = Vec::new();
        if let Some(parent) = relative.parent() {
            for component in parent.components() {
                if let Component::Normal(name) = component {
                    directories.push(name.to_str().ok_or(ConfigurationError::NonUtf8Name)?);
                }
            }
        }

        let stem = relative
            .file_stem()
            .map(|stem| stem.to_str().ok_or(ConfigurationError::NonUtf8Name))
            .transpose()?
            .filter(|stem| *stem != index_name);

        Self::new(directories, stem)
    }

    /// Path in axum's route syntax, e.g. `/users/:id`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Ordered path parameters declared by the template
    pub fn params(&self) -> &[PathParam] {
        &self.params
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    /// First static segment, used as the default tag
    pub fn first_static(&self) -> Option<&str> {
        self.segments.iter().find_map(|segment| match segment {
            Segment::Static(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Specificity key: compares segment by segment, static before dynamic
    /// before catch-all, so more specific templates sort first
    pub fn specificity(&self) -> Vec<u8> {
        self.segments.iter().map(Segment::rank).collect()
    }

    /// Template with parameter names erased (`/users/:`), identifying
    /// templates that match exactly the same requests
    pub(crate) fn shape(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Static(text) => format!("/{}", text),
                segment if segment.is_catch_all() => "/*".to_string(),
                _ => "/:".to_string(),
            })
            .collect()
    }

    /// Substitutes concrete values for every parameter
    ///
    /// Returns `None` when a parameter has no value.
    ///
    /// # Examples
    ///
    /// ```
    /// use filerouter::RouteTemplate;
    /// use std::collections::HashMap;
    ///
    /// let template = RouteTemplate::from_file_path("users/[id:int].rs", "index").unwrap();
    /// let url = template.substitute(&HashMap::from([("id", "5")])).unwrap();
    /// assert_eq!(url, "/users/5");
    /// ```
    pub fn substitute(&self, values: &HashMap<&str, &str>) -> Option<String> {
        let parts: Option<Vec<String>> = self
            .segments
            .iter()
            .map(|segment| match segment.param_name() {
                Some(name) => values.get(name).map(|value| value.to_string()),
                None => Some(segment.to_axum()),
            })
            .collect();

        parts.map(|parts| {
            if parts.is_empty() {
                "/".to_string()
            } else {
                format!("/{}", parts.join("/"))
            }
        })
    }
}

/// Typed display form, e.g. `/users/{id:int}` or `/files/{path:path}`
impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment.to_typed())?;
        }
        Ok(())
    }
}
