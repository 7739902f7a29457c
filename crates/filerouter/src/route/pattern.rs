/// Pattern parsing for route segments
///
/// Pure functional parsing of route file names into typed segments.
/// All functions are **pure**: same input → same output, no side effects.

use crate::{ConfigurationError, ParamType, PathParam};

/// Represents the different kinds of route pattern segments
///
/// Exactly one variant matches any well-formed segment; everything else is
/// rejected by [`classify_segment`].
///
/// # Examples
///
/// ```
/// use filerouter::route::pattern::{classify_segment, Segment};
/// use filerouter::ParamType;
///
/// assert_eq!(classify_segment("about").unwrap(), Segment::Static("about".into()));
/// assert_eq!(classify_segment("[id]").unwrap(), Segment::Dynamic("id".into()));
/// assert_eq!(
///     classify_segment("[id:int]").unwrap(),
///     Segment::Typed("id".into(), ParamType::Int)
/// );
/// assert_eq!(classify_segment("[slug:]").unwrap(), Segment::Slug("slug".into()));
/// assert_eq!(classify_segment("[...path]").unwrap(), Segment::CatchAll("path".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text: `about`
    Static(String),
    /// Untyped parameter: `[id]` (string)
    Dynamic(String),
    /// Typed parameter: `[id:int]`
    Typed(String, ParamType),
    /// Slug parameter: `[slug:]` (string, same wire shape as untyped)
    Slug(String),
    /// Catch-all parameter: `[...path]` (consumes the rest of the path)
    CatchAll(String),
}

impl Segment {
    /// Name of the parameter this segment declares, if any
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Static(_) => None,
            Segment::Dynamic(name)
            | Segment::Typed(name, _)
            | Segment::Slug(name)
            | Segment::CatchAll(name) => Some(name),
        }
    }

    /// Parameter declared by this segment with its inferred type
    pub fn param(&self) -> Option<PathParam> {
        match self {
            Segment::Static(_) => None,
            Segment::Dynamic(name) | Segment::Slug(name) => {
                Some(PathParam::new(name.clone(), ParamType::Str))
            }
            Segment::Typed(name, ty) => Some(PathParam::new(name.clone(), *ty)),
            Segment::CatchAll(name) => Some(PathParam::new(name.clone(), ParamType::Path)),
        }
    }

    /// Whether this segment consumes the remainder of the path
    ///
    /// True for `[...name]` and for `[name:path]`.
    pub fn is_catch_all(&self) -> bool {
        match self {
            Segment::CatchAll(_) => true,
            Segment::Typed(_, ty) => ty.spans_segments(),
            _ => false,
        }
    }

    /// Segment rendered in axum's route syntax (`about`, `:id`, `*path`)
    pub fn to_axum(&self) -> String {
        match self {
            Segment::Static(text) => text.clone(),
            Segment::CatchAll(name) | Segment::Typed(name, ParamType::Path) => {
                format!("*{}", name)
            }
            Segment::Dynamic(name) | Segment::Typed(name, _) | Segment::Slug(name) => {
                format!(":{}", name)
            }
        }
    }

    /// Segment rendered in the typed display form (`about`, `{id:int}`)
    pub fn to_typed(&self) -> String {
        match self {
            Segment::Static(text) => text.clone(),
            Segment::Dynamic(name) | Segment::Slug(name) => format!("{{{}}}", name),
            Segment::Typed(name, ParamType::Str) => format!("{{{}}}", name),
            Segment::Typed(name, ty) => format!("{{{}:{}}}", name, ty),
            Segment::CatchAll(name) => format!("{{{}:path}}", name),
        }
    }

    /// Matching rank: static segments before parameters before catch-alls
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Segment::Static(_) => 0,
            segment if segment.is_catch_all() => 2,
            _ => 1,
        }
    }
}

/// Classifies a raw file or directory name into a segment (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. No brackets at all → **Static** (must not contain `:` or `*`)
/// 2. `[name:type]` → **Typed**, `[name:]` → **Slug** (colon checked first)
/// 3. `[...name]` → **CatchAll**
/// 4. `[name]` → **Dynamic**
///
/// Anything else (unclosed or stray brackets, empty or non-identifier
/// names, unknown type keywords) is a [`ConfigurationError`].
///
/// # Examples
///
/// ```
/// use filerouter::route::pattern::classify_segment;
/// use filerouter::ConfigurationError;
///
/// assert!(matches!(
///     classify_segment("[id"),
///     Err(ConfigurationError::UnclosedBracket { .. })
/// ));
/// assert!(matches!(
///     classify_segment("[id:bool]"),
///     Err(ConfigurationError::UnknownParamType { .. })
/// ));
/// ```
pub fn classify_segment(segment: &str) -> Result<Segment, ConfigurationError> {
    match segment.strip_prefix('[') {
        Some(rest) => match rest.strip_suffix(']') {
            Some(inner) if inner.contains(['[', ']']) => Err(ConfigurationError::StrayBracket {
                segment: segment.to_string(),
            }),
            Some(inner) => classify_param(segment, inner),
            None => Err(ConfigurationError::UnclosedBracket {
                segment: segment.to_string(),
            }),
        },
        None if segment.contains(['[', ']']) => Err(ConfigurationError::StrayBracket {
            segment: segment.to_string(),
        }),
        None if segment.contains([':', '*']) => {
            Err(ConfigurationError::ReservedStaticSegment {
                segment: segment.to_string(),
            })
        }
        None => Ok(Segment::Static(segment.to_string())),
    }
}

/// Classifies the text between the brackets of a dynamic segment
fn classify_param(segment: &str, inner: &str) -> Result<Segment, ConfigurationError> {
    if let Some((name, keyword)) = inner.split_once(':') {
        let name = parse_param_name(segment, name)?;
        if keyword.is_empty() {
            return Ok(Segment::Slug(name));
        }
        return ParamType::from_keyword(keyword)
            .map(|ty| Segment::Typed(name, ty))
            .ok_or_else(|| ConfigurationError::UnknownParamType {
                segment: segment.to_string(),
                keyword: keyword.to_string(),
            });
    }

    match inner.strip_prefix("...") {
        Some(name) => parse_param_name(segment, name).map(Segment::CatchAll),
        None => parse_param_name(segment, inner).map(Segment::Dynamic),
    }
}

/// Validates a parameter name: an identifier (`[A-Za-z_][A-Za-z0-9_]*`)
fn parse_param_name(segment: &str, name: &str) -> Result<String, ConfigurationError> {
    let mut chars = name.chars();
    match chars.next() {
        None => Err(ConfigurationError::EmptyParamName {
            segment: segment.to_string(),
        }),
        Some(first)
            if (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') =>
        {
            Ok(name.to_string())
        }
        Some(_) => Err(ConfigurationError::InvalidParamName {
            segment: segment.to_string(),
            name: name.to_string(),
        }),
    }
}
