use std::sync::Arc;
use std::time::Duration;
use axum::{
    Json, Router,
    extract::State,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use crate::core::database::Database;
use crate::core::error::Result;
use crate::graphql::schema::{build_schema, DungeonSchema};

pub fn router(schema: DungeonSchema) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/graphql", post(graphql_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(schema)
}

async fn graphql_handler(
    State(schema): State<DungeonSchema>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(schema.execute(request).await)
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Bind and serve until Ctrl+C or SIGTERM
pub async fn serve(db: Arc<Database>) -> Result<()> {
    let address = db.config().address();
    let app = router(build_schema(db));

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install terminate handler: {e}");
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
