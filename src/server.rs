use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::get,
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::openapi::openapi_spec;
use crate::routes::{
    create_trip_handler, list_trips_handler, openapi_handler, trip_stats_handler, AppState,
};
use crate::store::TripStore;

pub fn router(config: &AppConfig, store: TripStore) -> Router {
    let trips = Router::new()
        .route("/trips", get(list_trips_handler).post(create_trip_handler))
        .route("/trips/stats", get(trip_stats_handler))
        .route("/openapi.json", get(openapi_handler));

    let app = if config.api_prefix.is_empty() {
        trips
    } else {
        Router::new().nest(&format!("/{}", config.api_prefix), trips)
    };

    app.layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState {
            store,
            openapi: Arc::new(openapi_spec(&config.api_prefix)),
        })
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origin = match config.cors_allow_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => AllowOrigin::exact(origin),
        Some(Err(e)) => {
            warn!("Invalid CORS_ALLOW_ORIGIN, allowing any origin: {}", e);
            AllowOrigin::any()
        }
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60))
}

pub async fn serve(config: &AppConfig, store: TripStore) -> Result<()> {
    let app = router(config, store);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("API on http://{}/{}", address, config.api_prefix);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
