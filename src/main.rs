use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use upldr::config::AppConfig;
use upldr::infrastructure::storage;
use upldr::services::stager::LocalStager;
use upldr::services::storage::ObjectStorage;
use upldr::{AppState, create_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing with EnvFilter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "upldr=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting upldr gateway...");

    let config = AppConfig::from_env()?;
    let storage_service: Arc<dyn ObjectStorage> = storage::setup_storage(&config).await;

    let stager = Arc::new(LocalStager::new(&config.staging_dir));
    stager.ensure_dir().await?;
    info!("📂 Staging directory: {}", config.staging_dir);

    let state = AppState {
        storage: storage_service,
        stager,
        config: config.clone(),
    };

    let app = create_app(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
                    info!("📥 {} {}", request.method(), request.uri());
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        info!(
                            "📤 Finished in {:?} with status {}",
                            latency,
                            response.status()
                        );
                    },
                ),
        )
        .layer(axum::extract::DefaultBodyLimit::max(config.max_upload_size));

    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    info!("✅ Gateway ready at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🛑 Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("⌨️  Ctrl+C received, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("💤 SIGTERM received, starting graceful shutdown...");
        },
    }
}
