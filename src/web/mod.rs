//! HTTP front end: one listing page and three form posts, all of which
//! redirect back to the listing.

use anyhow::{Context, Result};
use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::application::{AppError, LedgerService};
use crate::config::ServerConfig;

mod handlers;
mod page;

pub use page::render_index;

#[derive(Clone)]
pub struct WebState {
    pub ledger: LedgerService,
}

pub fn router(ledger: LedgerService) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .route("/delete/{id}", post(handlers::delete))
        .route("/clear", post(handlers::clear))
        .layer(TraceLayer::new_for_http())
        .with_state(WebState { ledger })
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(ledger: LedgerService, config: &ServerConfig) -> Result<()> {
    let address = config.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    run_with_listener(ledger, listener).await
}

pub async fn run_with_listener(ledger: LedgerService, listener: TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    tracing::info!("listening on http://{address}");

    axum::serve(listener, router(ledger))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}

/// A request that failed after validation, i.e. the store did not answer.
pub struct WebError(AppError);

impl From<AppError> for WebError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}
