//! Path parameter type checks
//!
//! Routes with path parameters get a route layer that checks each raw value
//! against its declared type. The handler itself is mounted unchanged, its
//! own extractors bind the request exactly as written.

use std::sync::Arc;

use axum::extract::{RawPathParams, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::MethodRouter;
use tracing::debug;

use crate::{PathParam, RouteTemplate};

type Declared = Arc<[PathParam]>;

/// Wraps `router` so that requests whose path values do not fit the
/// declared types never reach the handler (404, as for an unmatched path)
pub(crate) fn with_declared_params<S>(router: MethodRouter<S>, template: &RouteTemplate) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    if !template.has_params() {
        return router;
    }

    let declared: Declared = template.params().into();
    router.route_layer(middleware::from_fn_with_state::<
        _,
        Declared,
        (State<Declared>, RawPathParams, Request),
    >(declared, check_path_params))
}

async fn check_path_params(
    State(declared): State<Declared>,
    raw: RawPathParams,
    request: Request,
    next: Next,
) -> Response {
    match first_mismatch(&declared, &raw) {
        Some(name) => {
            debug!(param = %name, path = %request.uri().path(), "path parameter rejected");
            StatusCode::NOT_FOUND.into_response()
        }
        None => next.run(request).await,
    }
}

fn first_mismatch(declared: &[PathParam], raw: &RawPathParams) -> Option<String> {
    raw.iter()
        .find(|(name, value)| {
            declared
                .iter()
                .find(|param| param.name == *name)
                .is_some_and(|param| !param.ty.accepts(value))
        })
        .map(|(name, _)| name.to_string())
}
