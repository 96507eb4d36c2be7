/// Axum webserver implementation
///
/// Main server lifecycle management including startup, shutdown, and graceful termination
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::cors::CorsLayer;

use crate::{
    apis::ReqwestFetch,
    config::ProxyConfig,
    logger::{self, LogTag},
    webserver::{routes, state::AppState},
};

/// Global shutdown notifier
static SHUTDOWN_NOTIFY: once_cell::sync::Lazy<Arc<Notify>> =
    once_cell::sync::Lazy::new(|| Arc::new(Notify::new()));

/// Start the webserver
///
/// This function blocks until the server is shut down
pub async fn start_server(config: ProxyConfig) -> Result<(), String> {
    let addr_string = config.listen_addr();

    logger::debug(
        LogTag::Webserver,
        &format!("🌐 Starting webserver on {}", addr_string),
    );

    let http = ReqwestFetch::new(config.upstreams.request_timeout_secs)
        .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

    // Create application state
    let state = Arc::new(AppState::new(Arc::new(config), Arc::new(http)));

    // Build the router
    let app = build_app(Arc::clone(&state));

    // Parse bind address
    let addr: SocketAddr = addr_string
        .parse()
        .map_err(|e| format!("Invalid bind address '{}': {}", addr_string, e))?;

    // Create TCP listener
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        // Provide helpful error message for common cases
        match e.kind() {
            std::io::ErrorKind::AddrInUse => {
                format!(
                    "Failed to bind to {}: Address already in use\n\
                     \n\
                     Another pumpfun-backend instance may already be running.\n\
                     \n\
                     To verify and stop other instances:\n\
                       1. Check: ps aux | grep pumpfun-backend | grep -v grep\n\
                       2. Stop: pkill -f pumpfun-backend",
                    addr
                )
            }
            std::io::ErrorKind::PermissionDenied => {
                format!(
                    "Failed to bind to {}: Permission denied\n\
                     \n\
                     Port {} requires elevated privileges on this system.\n\
                     Consider using a port above 1024 or running with appropriate permissions.",
                    addr,
                    addr.port()
                )
            }
            _ => format!("Failed to bind to {}: {}", addr, e),
        }
    })?;

    logger::info(
        LogTag::Webserver,
        &format!("✅ Webserver listening on http://{}", addr),
    );

    // Run the server with graceful shutdown
    let shutdown_signal = async {
        SHUTDOWN_NOTIFY.notified().await;
        logger::debug(
            LogTag::Webserver,
            "Received shutdown signal, stopping webserver...",
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    logger::info(LogTag::Webserver, "✅ Webserver stopped gracefully");

    Ok(())
}

/// Trigger webserver shutdown
pub fn shutdown() {
    logger::debug(LogTag::Webserver, "Triggering webserver shutdown...");
    SHUTDOWN_NOTIFY.notify_one();
}

/// Build the Axum application with all routes and middleware
///
/// Deployed frontends live on other origins, so CORS stays permissive.
fn build_app(state: Arc<AppState>) -> Router {
    routes::create_router(state).layer(CorsLayer::permissive())
}
