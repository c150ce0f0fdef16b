use std::sync::Arc;

use tokio::sync::watch;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use content_lifecycle::adapters::http::{api_router, ContentAppState, PublishingAppState};
use content_lifecycle::adapters::memory::{InMemoryContentRepository, InMemoryVersionRepository};
use content_lifecycle::adapters::postgres::{PostgresContentRepository, PostgresVersionRepository};
use content_lifecycle::adapters::scheduler::{ScheduledPublishRunner, ScheduledPublishRunnerConfig};
use content_lifecycle::application::handlers::PublishDueItemsHandler;
use content_lifecycle::config::{AppConfig, LogFormat, ServerConfig};
use content_lifecycle::ports::{ContentRepository, VersionRepository};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        port = config.server.port,
        "Loaded configuration"
    );

    let (content, versions) = build_repositories(&config).await?;

    let publisher = Arc::new(
        PublishDueItemsHandler::new(content.clone(), versions.clone())
            .with_actor(config.scheduler.actor_id()?),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runner_handle = if config.scheduler.enabled {
        let runner = ScheduledPublishRunner::with_config(
            publisher.clone(),
            ScheduledPublishRunnerConfig::default().with_interval(config.scheduler.interval()),
        );
        Some(tokio::spawn(async move { runner.run(shutdown_rx).await }))
    } else {
        tracing::info!("Scheduled publish runner disabled; use POST /api/scheduled-publish");
        None
    };

    let app = api_router(
        ContentAppState::new(content, versions),
        PublishingAppState::new(publisher),
    )
    .layer(TimeoutLayer::new(config.server.request_timeout()))
    .layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped accepting connections");
    let _ = shutdown_tx.send(true);
    if let Some(handle) = runner_handle {
        let _ = handle.await;
    }
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn build_repositories(
    config: &AppConfig,
) -> Result<(Arc<dyn ContentRepository>, Arc<dyn VersionRepository>), BoxError> {
    let Some(database) = &config.database else {
        tracing::warn!("No database configured, using in-memory repositories");
        return Ok((
            Arc::new(InMemoryContentRepository::new()),
            Arc::new(InMemoryVersionRepository::new()),
        ));
    };

    let pool = database.pool_options().connect(&database.url).await?;
    tracing::info!("Database connection pool created");

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok((
        Arc::new(PostgresContentRepository::new(pool.clone())),
        Arc::new(PostgresVersionRepository::new(pool)),
    ))
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}
