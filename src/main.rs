use pencil::{routes, AppState, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env vars
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pencil=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    info!("Pencil v{} is starting", env!("CARGO_PKG_VERSION"));

    // Named colors are loaded before the listener exists
    let state = AppState::initialize(&config).await?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    axum::serve(listener, routes::router(state)).await?;
    Ok(())
}
