/// Path parameter types
///
/// Every dynamic segment of a route file name declares a parameter whose
/// type comes from a fixed keyword set. The type is checked against the
/// raw path value before a request reaches the handler.

use std::fmt;

/// Type of a path parameter, inferred from the bracket syntax
///
/// # Keywords
///
/// | Keyword          | Type            | Accepts                        |
/// |------------------|-----------------|--------------------------------|
/// | *(absent)*, `str`| `Str`           | any single segment             |
/// | `int`            | `Int`           | `[0-9]+`                       |
/// | `float`          | `Float`         | `[0-9]+(.[0-9]+)?`             |
/// | `uuid`           | `Uuid`          | hyphenated UUID                |
/// | `path`           | `Path`          | remainder of the path, with `/`|
///
/// # Examples
///
/// ```
/// use filerouter::ParamType;
///
/// assert_eq!(ParamType::from_keyword("int"), Some(ParamType::Int));
/// assert_eq!(ParamType::from_keyword(""), Some(ParamType::Str));
/// assert_eq!(ParamType::from_keyword("bool"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Str,
    Int,
    Float,
    Uuid,
    Path,
}

impl ParamType {
    /// Maps a type keyword to a parameter type (empty keyword means `str`)
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "" | "str" => Some(Self::Str),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "uuid" => Some(Self::Uuid),
            "path" => Some(Self::Path),
            _ => None,
        }
    }

    /// Keyword used in the typed display form of a template
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Uuid => "uuid",
            Self::Path => "path",
        }
    }

    /// Whether values of this type may contain `/`
    pub fn spans_segments(&self) -> bool {
        matches!(self, Self::Path)
    }

    /// Checks a raw (percent-decoded) path value against this type
    ///
    /// # Examples
    ///
    /// ```
    /// use filerouter::ParamType;
    ///
    /// assert!(ParamType::Int.accepts("42"));
    /// assert!(!ParamType::Int.accepts("abc"));
    /// assert!(ParamType::Float.accepts("3.14"));
    /// assert!(ParamType::Path.accepts("a/b/c.txt"));
    /// ```
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Self::Str => !value.is_empty() && !value.contains('/'),
            Self::Path => !value.is_empty(),
            Self::Int => is_digits(value),
            Self::Float => match value.split_once('.') {
                Some((whole, fraction)) => is_digits(whole) && is_digits(fraction),
                None => is_digits(value),
            },
            Self::Uuid => is_hyphenated_uuid(value),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_hyphenated_uuid(value: &str) -> bool {
    value.len() == 36
        && value.as_bytes()[8] == b'-'
        && uuid::Uuid::parse_str(value).is_ok()
}

/// A parameter declared by a dynamic segment of a route file path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam {
    pub name: String,
    pub ty: ParamType,
}

impl PathParam {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}
