use axum_extra::extract::cookie::Key;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &vitrine::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        static_dir = %cfg.static_dir.display(),
        secret_file = %cfg.secret_file.display(),
        loglevel = %cfg.loglevel
    );

    if cfg.secret_key.len() < 32 {
        return Err(vitrine::VitrineError::WeakSecretKey.into());
    }
    let key = Key::derive_from(cfg.secret_key.as_bytes());

    // Startup-fatal: no credential, no server.
    let auth = vitrine::AdminCredentials::load(&cfg.secret_file)?;

    let pool = vitrine::db::connect(&cfg.database_url).await?;
    let storage = vitrine::db::CatalogStorage::new(pool);
    storage.init_schema().await?;

    let state = vitrine::router::VitrineState::new(storage, auth, key, cfg.static_dir.clone());
    let app = vitrine::router::vitrine_router(state);

    let addr = format!("{}:{}", cfg.host, cfg.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
