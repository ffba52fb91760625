//! HTTP surface for the record store.
//!
//! # Routes
//! - `GET /records`: full collection.
//! - `POST /records` with `{ "text": "...", "done"?: bool }`: create, answers
//!   with the full collection.
//! - `DELETE /records/{id}`: delete, answers with the full collection. Unknown
//!   ids succeed without changes.
//! - `GET /health`: liveness check with the crate version.
//!
//! Every record route answers `{ "status": "SUCCESS", "records": [...] }`.
//! Failures answer `{ "status": "ERROR", "error": { "code", "message" } }`
//! with `400` for `validation_error` / `malformed_payload` and `503` for
//! `store_unavailable`.
//!
//! # Running
//! ```sh
//! RECORDSTORE_DB_PATH=/var/lib/recordstore/todos.sqlite3 \
//! RECORDSTORE_PORT=3000 \
//! cargo run -p recordstore_server
//! ```
use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{delete, get},
    Router,
};
use log::{error, info};
use recordstore_core::{db::DbError, Config};
use thiserror::Error;
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod routes;
pub mod state;

use routes::{
    create_record_handler, delete_record_handler, health_handler, list_records_handler,
};
use state::AppState;

/// Failures that stop the server from starting or serving.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("record store failed to open: {0}")]
    Store(#[from] DbError),

    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the application router over an already initialized state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/records",
            get(list_records_handler).post(create_record_handler),
        )
        .route("/records/{id}", delete(delete_record_handler))
        .layer(cors)
        .with_state(state)
}

/// Opens the store, binds the listener and serves until a shutdown signal.
pub async fn start_server(config: Config) -> Result<(), ServerError> {
    info!(
        "event=server_init module=http status=start db_path={}",
        config.db_path.display()
    );
    let address = SocketAddr::new(config.host, config.port);
    let state = AppState::new(config)?;
    let app = build_router(state);

    let listener = TcpListener::bind(address).await?;
    info!("event=server_listen module=http status=ok address={address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=http status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("event=shutdown_signal module=http signal=ctrl_c"),
            Err(err) => {
                error!("event=shutdown_signal module=http status=error signal=ctrl_c error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("event=shutdown_signal module=http signal=terminate");
            }
            Err(err) => {
                error!(
                    "event=shutdown_signal module=http status=error signal=terminate error={err}"
                );
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
