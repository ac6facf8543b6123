use crate::envelope::{Envelope, HealthResponse};
use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    http::{Method, header},
    routing::get,
};
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// `POST /` runs an action, `GET /` answers a static health payload.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(health).post(handle_action))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// Browsers post as text/plain to skip the CORS preflight, so the body is
// taken as a string and parsed here rather than through `Json`.
async fn handle_action(State(state): State<Arc<AppState>>, body: String) -> Json<Envelope> {
    Json(state.dispatch(body).await)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let addr = state.config().http_bind_address;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
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

    info!("shutdown signal received");
}
