//! Loader for route trees whose handlers are not compiled in

use axum::http::StatusCode;
use filerouter::{
    Export, HandlerId, HttpMethod, LoadError, ModuleLoader, RouteFile, RouteHandler, RouteModule,
    RouteSource,
};

/// Parses each route file and backs every declared method with a
/// handler answering 501 Not Implemented
pub struct SourceLoader;

impl ModuleLoader<()> for SourceLoader {
    fn load(&self, file: &RouteFile) -> Result<RouteModule<()>, LoadError> {
        let source = RouteSource::read(file.path())?;

        let module = source
            .functions()
            .iter()
            .fold(RouteModule::new(file.key()), |module, function| {
                let export = match HttpMethod::from_function_name(&function.name) {
                    Some(_) => Export::Handler {
                        handler: not_implemented(HandlerId {
                            file: file.key().to_string(),
                            function: function.name.clone(),
                        }),
                        args: function.args.clone(),
                    },
                    None => Export::Function(function.clone()),
                };
                module.with_export(function.name.clone(), export)
            });
        Ok(module)
    }
}

fn not_implemented(id: HandlerId) -> RouteHandler<()> {
    RouteHandler::new(id, || async { StatusCode::NOT_IMPLEMENTED })
}
