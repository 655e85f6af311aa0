// CORS configuration
// Permissive policy: any origin, method, or header may call the service.
// tower-http rejects wildcard origins combined with allow-credentials, so
// no credentials flag is set here.

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub fn apply_cors(router: Router) -> Router {
    router.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
