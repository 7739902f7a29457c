//! Introspection of route source files
//!
//! A route file is parsed with `syn` and its top-level functions are
//! listed by name together with the arguments they declare. Nothing is
//! evaluated; the file only has to be syntactically valid Rust.

use std::fs;
use std::path::Path;

use quote::ToTokens;
use syn::{FnArg, Item, Type, Visibility};

use crate::LoadError;

/// One declared argument of a handler, as written in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerArg {
    /// Binding pattern, e.g. `Path(id)`
    pub pattern: String,
    /// Declared type, e.g. `Path<i64>`
    pub ty: String,
    /// Whether the argument is axum's `Path` extractor
    pub binds_path: bool,
}

/// A top-level function of a route file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFunction {
    pub name: String,
    pub is_pub: bool,
    pub is_async: bool,
    pub args: Vec<HandlerArg>,
}

/// Top-level functions of one route file, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSource {
    functions: Vec<SourceFunction>,
}

impl RouteSource {
    /// Parses route source text
    ///
    /// # Examples
    ///
    /// ```
    /// use filerouter::RouteSource;
    ///
    /// let source = RouteSource::parse("pub async fn get() -> &'static str { \"hi\" }").unwrap();
    /// assert_eq!(source.function_names().collect::<Vec<_>>(), vec!["get"]);
    /// ```
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let file = syn::parse_file(text).map_err(|e| LoadError::Syntax(e.to_string()))?;

        let functions = file
            .items
            .into_iter()
            .filter_map(|item| match item {
                Item::Fn(item_fn) => Some(item_fn),
                _ => None,
            })
            .map(|item_fn| SourceFunction {
                name: item_fn.sig.ident.to_string(),
                is_pub: matches!(item_fn.vis, Visibility::Public(_)),
                is_async: item_fn.sig.asyncness.is_some(),
                args: item_fn
                    .sig
                    .inputs
                    .iter()
                    .filter_map(|input| match input {
                        FnArg::Typed(pat_type) => Some(HandlerArg {
                            pattern: pat_type.pat.to_token_stream().to_string(),
                            ty: pat_type.ty.to_token_stream().to_string(),
                            binds_path: is_path_extractor(&pat_type.ty),
                        }),
                        FnArg::Receiver(_) => None,
                    })
                    .collect(),
            })
            .collect();

        Ok(Self { functions })
    }

    /// Reads and parses a route file
    pub fn read(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn functions(&self) -> &[SourceFunction] {
        &self.functions
    }

    pub fn function(&self, name: &str) -> Option<&SourceFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(|f| f.name.as_str())
    }
}

fn is_path_extractor(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Path"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const USER_ROUTE: &str = r#"
        use axum::extract::Path;
        use axum::Json;

        pub async fn get(Path(id): Path<i64>) -> String {
            format!("user {}", id)
        }

        pub async fn put(Path(id): Path<i64>, Json(body): Json<UserUpdate>) -> String {
            helper(id)
        }

        fn helper(id: i64) -> String {
            id.to_string()
        }

        mod nested {
            pub fn delete() {}
        }
    "#;

    #[test]
    fn test_lists_top_level_functions_only() {
        let source = RouteSource::parse(USER_ROUTE).unwrap();
        assert_eq!(
            source.function_names().collect::<Vec<_>>(),
            vec!["get", "put", "helper"]
        );
    }

    #[test]
    fn test_function_details() {
        let source = RouteSource::parse(USER_ROUTE).unwrap();

        let put = source.function("put").unwrap();
        assert!(put.is_pub);
        assert!(put.is_async);
        assert_eq!(put.args.len(), 2);
        assert!(put.args[0].binds_path);
        assert!(!put.args[1].binds_path);

        let helper = source.function("helper").unwrap();
        assert!(!helper.is_pub);
        assert!(!helper.is_async);
        assert_eq!(helper.args[0].pattern, "id");
        assert_eq!(helper.args[0].ty, "i64");
    }

    #[test]
    fn test_syntax_error() {
        let err = RouteSource::parse("pub fn get( {").unwrap_err();
        assert!(matches!(err, LoadError::Syntax(_)));
    }

    #[test]
    fn test_empty_file() {
        let source = RouteSource::parse("").unwrap();
        assert!(source.functions().is_empty());
    }
}
