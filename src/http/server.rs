//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router around a terminal handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Resolve each request path through the resolver chain
//! - Redirect on a hit, hand the request to the terminal handler on a miss
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RedirectorConfig;
use crate::http::request::request_id;
use crate::http::response::see_other;
use crate::observability::metrics;
use crate::routing::ResolverChain;

/// Application state injected into the redirect middleware.
#[derive(Clone)]
struct AppState {
    chain: Arc<ResolverChain>,
}

/// HTTP server for the redirect service.
pub struct HttpServer {
    router: Router,
    chain: Arc<ResolverChain>,
}

impl HttpServer {
    /// Create a server that answers unmatched paths with the default greeting.
    pub fn new(config: &RedirectorConfig, chain: ResolverChain) -> Self {
        Self::with_fallback(config, chain, default_router())
    }

    /// Create a server with a custom terminal router for unmatched paths.
    pub fn with_fallback(config: &RedirectorConfig, chain: ResolverChain, fallback: Router) -> Self {
        let chain = Arc::new(chain);
        let state = AppState {
            chain: chain.clone(),
        };

        let router = Self::build_router(config, state, fallback);
        Self { router, chain }
    }

    /// Layer the redirect middleware and the ambient stack over the terminal router.
    #[allow(deprecated)]
    fn build_router(config: &RedirectorConfig, state: AppState, fallback: Router) -> Router {
        fallback
            .layer(middleware::from_fn_with_state(state, redirect_middleware))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            resolvers = ?self.chain.names(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A handle to the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Terminal router answering every path with a static greeting.
pub fn default_router() -> Router {
    Router::new().fallback(hello)
}

async fn hello() -> &'static str {
    "Hello, world!\n"
}

/// Redirects when the chain resolves the path, otherwise passes the request on.
async fn redirect_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();

    if let Some(resolved) = state.chain.resolve(path) {
        match see_other(&resolved.url) {
            Ok(response) => {
                tracing::debug!(
                    request_id = %request_id(&request),
                    path = %path,
                    source = %resolved.source,
                    url = %resolved.url,
                    "Redirecting"
                );
                metrics::record_resolution(resolved.source);
                return response;
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id(&request),
                    path = %path,
                    source = %resolved.source,
                    error = %e,
                    "Resolved URL is not a valid Location header"
                );
            }
        }
    }

    tracing::debug!(request_id = %request_id(&request), path = %path, "No resolver matched");
    metrics::record_fallthrough();
    next.run(request).await
}
