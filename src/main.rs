use social_server::core::{AppState, Config, StorageBackend};
use sqlx::mysql::MySqlPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_server=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Inizializza la configurazione
    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;
    config.print_info();

    let state = match config.storage {
        StorageBackend::Memory => AppState::in_memory(config.jwt_secret.clone()),
        StorageBackend::MySql => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or("DATABASE_URL must be set when STORAGE=mysql")?;

            let pool = MySqlPoolOptions::new()
                .max_connections(config.max_connections)
                .max_lifetime(Duration::from_secs(config.connection_lifetime_secs))
                .connect(database_url)
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("Database migrations applied");

            AppState::new(pool, config.jwt_secret.clone())
        }
    };

    // Crea il router
    let app = social_server::create_router(Arc::new(state));

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Avvia il server
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
