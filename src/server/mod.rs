pub mod handlers;
pub mod types;

use crate::{
    Error, Result,
    config::{Config, ServerConfig},
    model::{LogisticAdapter, ModelAdapter},
    prediction::PredictionService,
};
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub async fn run(config: Config) -> Result<()> {
    let adapter: Arc<dyn ModelAdapter> = Arc::new(LogisticAdapter::from_config(&config.model)?);

    let app_state = AppState::new(
        PredictionService::new(adapter),
        &config.project_name,
        &config.server.api_prefix,
    );
    let app = router(app_state, &config.server)?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router: the landing page at `/` and the API under
/// the configured prefix.
pub fn router(state: AppState, server: &ServerConfig) -> Result<Router> {
    server.validate()?;

    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/schema", get(handlers::schema))
        .route("/predict", post(handlers::predict));

    let mut app = Router::new()
        .route("/", get(handlers::index))
        .nest(&server.api_prefix, api)
        .with_state(state);

    if let Some(cors) = cors_layer(&server.cors_origins)? {
        app = app.layer(cors);
    }

    Ok(app.layer(TraceLayer::new_for_http()))
}

fn cors_layer(origins: &[String]) -> Result<Option<CorsLayer>> {
    if origins.is_empty() {
        return Ok(None);
    }

    // Credentialed CORS cannot be combined with a wildcard origin.
    if origins.iter().any(|origin| origin == "*") {
        return Ok(Some(
            CorsLayer::new()
                .allow_origin(AllowOrigin::any())
                .allow_methods(AllowMethods::any())
                .allow_headers(AllowHeaders::any()),
        ));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .trim_end_matches('/')
                .parse::<HeaderValue>()
                .map_err(|_| Error::config(format!("Invalid CORS origin: '{}'", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request()),
    ))
}
