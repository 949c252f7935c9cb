mod cli;
mod core;
mod features;
mod shared;

use std::sync::Arc;

use clap::Parser;
use sqlx::SqlitePool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::core::app::{build_router, Services};
use crate::core::config::Config;
use crate::core::database;
use crate::features::auth::{AuthService, SessionService};
use crate::shared::templates;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli, worker_threads))
}

async fn async_main(cli: Cli, worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config, pool, worker_threads).await,
        Commands::AddTechnician { email, password } => {
            add_technician(config, pool, &email, &password).await
        }
    }
}

async fn add_technician(
    config: Config,
    pool: SqlitePool,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let sessions = Arc::new(SessionService::new(pool.clone(), config.session));
    let auth = AuthService::new(pool, sessions);

    let technician = auth.create_technician(email, password).await?;
    println!(
        "Technician created: id={}, email={}",
        technician.id, technician.email
    );
    Ok(())
}

async fn serve(config: Config, pool: SqlitePool, worker_threads: usize) -> anyhow::Result<()> {
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    let loaded = templates::init_templates(&config.app.template_dir);
    tracing::info!(
        "Loaded {} templates from {}",
        loaded,
        config.app.template_dir
    );
    if !templates::template_exists("error.html") {
        tracing::warn!("error.html is missing; error pages fall back to plain text");
    }

    let services = Services::new(pool, config.session.clone());
    tracing::info!("Services initialized");

    let app = build_router(&config, &services);

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
