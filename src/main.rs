use axum::extract::DefaultBodyLimit;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jobly::api::middleware::cors::create_cors_layer;
use jobly::{api::create_router, application::builder::ApplicationBuilder, Config};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    if std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    info!("Starting Jobly service");

    let config = Config::from_env();
    config.validate()?;
    info!("Configuration loaded and validated");

    let max_body_bytes = config.max_body_bytes;
    let listen_addr = config.listen_addr.clone();
    let cors = create_cors_layer(&config.allowed_origins);

    let state = ApplicationBuilder::new(config)
        .with_database()
        .await?
        .with_repositories()?
        .build()?;

    let app = create_router(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors);

    info!("Listening on {}", listen_addr);
    let listener = TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
