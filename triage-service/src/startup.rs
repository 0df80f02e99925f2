use crate::config::TriageConfig;
use crate::handlers;
use crate::services::{
    CompletionProvider, GatewayClient, PatientStore, Storage, SupabaseStorage, SupabaseStore,
};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors::cors_headers_middleware, metrics::metrics_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: TriageConfig,
    pub provider: Arc<dyn CompletionProvider>,
    pub storage: Arc<dyn Storage>,
    pub store: Arc<dyn PatientStore>,
}

impl AppState {
    /// Wire the HTTP-backed collaborators described by `config`.
    pub fn from_config(config: TriageConfig) -> Result<Self, AppError> {
        let gateway = GatewayClient::new(config.gateway.clone()).map_err(|e| {
            tracing::error!("Failed to create AI gateway client: {}", e);
            AppError::InternalError(anyhow::Error::new(e))
        })?;
        tracing::info!(model = %gateway.model(), "Initialized AI gateway client");

        let http = reqwest::Client::new();
        let storage = SupabaseStorage::new(http.clone(), config.supabase.clone());
        let store = SupabaseStore::new(http, config.supabase.clone());
        tracing::info!(
            bucket = %config.supabase.bucket,
            table = %config.supabase.patients_table,
            "Initialized storage clients"
        );

        Ok(Self {
            config,
            provider: Arc::new(gateway),
            storage: Arc::new(storage),
            store: Arc::new(store),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/",
            post(handlers::handle_ai_request).options(handlers::preflight),
        )
        .route(
            "/triage",
            post(handlers::handle_ai_request).options(handlers::preflight),
        )
        .layer(from_fn(cors_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(config: TriageConfig) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let state = AppState::from_config(config)?;
        Self::with_state(state, addr).await
    }

    /// Bind with pre-built collaborators.
    pub async fn with_state(state: AppState, addr: SocketAddr) -> Result<Self, AppError> {
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    pub async fn run_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
    }
}
