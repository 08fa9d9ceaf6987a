use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "reckon", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server (default).
    Serve,
    /// Run the interactive terminal calculator against a running server.
    Console,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cfg = &reckon::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cfg).await,
        Command::Console => Ok(reckon::console::run(cfg).await?),
    }
}

async fn serve(cfg: &reckon::config::Config) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        bind_addr = %cfg.bind_addr,
        database_url = %cfg.database_url,
        loglevel = %cfg.loglevel,
        "starting calculations API"
    );

    let pool = reckon::db::connect(&cfg.database_url).await?;
    let storage = reckon::db::CalculationsStorage::new(pool);
    storage.init_schema().await?;
    if cfg.seed_history {
        storage.seed_if_empty().await?;
    }

    let state = reckon::router::ReckonState::new(storage);
    let app = reckon::router::reckon_router(state);

    let listener = TcpListener::bind(&cfg.bind_addr).await?;
    info!("HTTP server listening on {}", cfg.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
