use http::HeaderValue;
use tower::layer::util::{Identity, Stack};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::HttpMakeClassifier;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Trace, CORS and body-limit layers applied to the whole router.
pub fn stack() -> ServiceBuilder<
    Stack<RequestBodyLimitLayer, Stack<CorsLayer, Stack<TraceLayer<HttpMakeClassifier>, Identity>>>,
> {
    let trace = TraceLayer::new_for_http();
    let cors = cors_from_env();
    let limit = RequestBodyLimitLayer::new(2 * 1024 * 1024);

    ServiceBuilder::new().layer(trace).layer(cors).layer(limit)
}

/// `ROSTERA__CORS__ORIGINS` holds a comma-separated origin list; with the
/// variable unset the policy is permissive.
fn cors_from_env() -> CorsLayer {
    match std::env::var("ROSTERA__CORS__ORIGINS") {
        Ok(origins) => {
            let parsed: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(parsed))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        Err(_) => CorsLayer::permissive(),
    }
}
