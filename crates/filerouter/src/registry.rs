//! Route registration
//!
//! The registry is the only place that touches axum's routing table. It
//! rejects a (method, template) pair that is already taken and templates
//! that axum's matcher cannot hold side by side, so building the final
//! `Router` never panics.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use axum::routing::MethodRouter;
use axum::Router;
use tracing::debug;

use crate::coerce::with_declared_params;
use crate::route::Segment;
use crate::{ConfigurationError, HttpMethod, RouteDefinition, RouteTemplate};

/// Template and file that first claimed a position in the route tree
#[derive(Debug, Clone)]
struct Claim {
    template: String,
    file: PathBuf,
}

impl Claim {
    fn conflict(&self, template: &RouteTemplate) -> ConfigurationError {
        ConfigurationError::AmbiguousRoute {
            template: template.to_string(),
            other_template: self.template.clone(),
            other: self.file.clone(),
        }
    }
}

/// Tree of registered template shapes
///
/// Static children may coexist with one parameter child (static wins at
/// match time). A parameter child and a catch-all child may not coexist,
/// and all templates through a parameter position must agree on its name.
#[derive(Debug, Default)]
struct ShapeNode {
    statics: BTreeMap<String, ShapeNode>,
    param: Option<(String, Claim, Box<ShapeNode>)>,
    catch_all: Option<(String, Claim)>,
}

impl ShapeNode {
    fn insert(
        &mut self,
        segments: &[Segment],
        template: &RouteTemplate,
        claim: &Claim,
    ) -> Result<(), ConfigurationError> {
        let Some((first, rest)) = segments.split_first() else {
            return Ok(());
        };

        match (first, first.param_name()) {
            (Segment::Static(text), _) => self
                .statics
                .entry(text.clone())
                .or_default()
                .insert(rest, template, claim),
            (segment, Some(name)) if segment.is_catch_all() => {
                if let Some((_, other, _)) = &self.param {
                    return Err(other.conflict(template));
                }
                if let Some((existing, other)) = &self.catch_all {
                    if existing.as_str() != name {
                        return Err(other.conflict(template));
                    }
                    return Ok(());
                }
                self.catch_all = Some((name.to_string(), claim.clone()));
                Ok(())
            }
            (_, Some(name)) => {
                if let Some((_, other)) = &self.catch_all {
                    return Err(other.conflict(template));
                }
                let (existing, other, child) = self.param.get_or_insert_with(|| {
                    (name.to_string(), claim.clone(), Box::default())
                });
                if existing.as_str() != name {
                    return Err(other.conflict(template));
                }
                child.insert(rest, template, claim)
            }
            (_, None) => Ok(()),
        }
    }
}

/// Collects route definitions into an axum `Router`
pub struct RouteRegistry<S> {
    routes: BTreeMap<String, (Vec<u8>, MethodRouter<S>)>,
    taken: HashMap<(HttpMethod, String), PathBuf>,
    shapes: ShapeNode,
}

impl<S> Default for RouteRegistry<S> {
    fn default() -> Self {
        Self {
            routes: BTreeMap::new(),
            taken: HashMap::new(),
            shapes: ShapeNode::default(),
        }
    }
}

impl<S> RouteRegistry<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one definition
    ///
    /// Fails if its method and template are already registered (by any
    /// file) or if the template is ambiguous with a registered one.
    pub fn register(&mut self, definition: &RouteDefinition<S>) -> Result<(), ConfigurationError> {
        self.register_handler(
            &definition.template,
            definition.method,
            definition.handler.method_router(definition.method),
            &definition.file,
        )
    }

    pub fn register_handler(
        &mut self,
        template: &RouteTemplate,
        method: HttpMethod,
        handler: MethodRouter<S>,
        file: &Path,
    ) -> Result<(), ConfigurationError> {
        let key = (method, template.shape());
        if let Some(existing) = self.taken.get(&key) {
            return Err(ConfigurationError::RouteCollision {
                method,
                template: template.to_string(),
                existing: existing.clone(),
            });
        }

        let claim = Claim {
            template: template.to_string(),
            file: file.to_path_buf(),
        };
        self.shapes.insert(template.segments(), template, &claim)?;
        self.taken.insert(key, file.to_path_buf());

        debug!(%method, path = template.path(), file = %file.display(), "registered route");

        let handler = with_declared_params(handler, template);
        let path = template.path().to_string();
        let entry = match self.routes.remove(&path) {
            Some((specificity, existing)) => (specificity, existing.merge(handler)),
            None => (template.specificity(), handler),
        };
        self.routes.insert(path, entry);
        Ok(())
    }

    /// Number of distinct paths registered
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Builds the router, most specific paths first
    pub fn into_router(self) -> Router<S> {
        let mut routes: Vec<_> = self.routes.into_iter().collect();
        routes.sort_by(|(a_path, (a_rank, _)), (b_path, (b_rank, _))| {
            a_rank.cmp(b_rank).then_with(|| a_path.cmp(b_path))
        });

        routes
            .into_iter()
            .fold(Router::new(), |router, (path, (_, method_router))| {
                router.route(&path, method_router)
            })
    }
}
