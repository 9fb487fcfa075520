use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::hal::API_ROOT;
use crate::http::{cors::create_cors_layer, security::security_headers};
use axum::{Router, http::HeaderValue, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::AllowOrigin;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// OpenAPI document location, shared by every documentation UI.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Assembles the public router around the API routes.
///
/// - `apis` nested under `/api`
/// - documentation UIs: `/swagger-ui`, `/redoc`, `/rapidoc`, `/scalar`, all
///   reading [`OPENAPI_JSON_PATH`]
/// - `extra` merged at the root (token endpoint, health checks)
/// - JSON 404 fallback
/// - request tracing, security headers, compression, and CORS when
///   `CORS_ALLOWED_ORIGIN` (comma-separated) is set
///
/// # Errors
/// Fails when `CORS_ALLOWED_ORIGIN` is set but holds an invalid header value.
pub fn create_router<T>(apis: Router, extra: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new(OPENAPI_JSON_PATH).path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest(API_ROOT, apis)
        .merge(extra)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(CompressionLayer::new());

    if let Some(origins) = cors_origins_from_env()? {
        info!(?origins, "CORS enabled");
        router = router.layer(create_cors_layer(AllowOrigin::list(origins)));
    }

    Ok(router)
}

fn cors_origins_from_env() -> io::Result<Option<Vec<HeaderValue>>> {
    let Ok(raw) = std::env::var("CORS_ALLOWED_ORIGIN") else {
        return Ok(None);
    };

    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    Ok((!origins.is_empty()).then_some(origins))
}

/// Serves `router` with coordinated shutdown.
///
/// On SIGINT/SIGTERM the server stops accepting connections and drains
/// in-flight requests while `cleanup` (closing the database pool, etc.) runs,
/// bounded by `shutdown_timeout`.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_signal = coordinator.clone();
    let cleanup_handle = tokio::spawn(async move {
        cleanup_signal.wait().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        if tokio::time::timeout(shutdown_timeout, cleanup).await.is_err() {
            tracing::warn!("Cleanup exceeded {:?}, forcing shutdown", shutdown_timeout);
        }
    });

    let server_signal = coordinator.clone();
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { server_signal.wait().await })
        .await
        .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e));

    // a server error must still release the cleanup task
    coordinator.trigger();
    cleanup_handle.await.ok();

    serve_result
}
