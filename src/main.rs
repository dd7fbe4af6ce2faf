//! Lifeline Server: daily check-in tracking with escalation to emergency
//! contacts.
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use lifeline_core::config::{AppConfig, DatabaseProvider, SuppressionBackend};
use lifeline_core::error::AppError;
use lifeline_core::types::{Clock, LocalCalendar, SystemClock};
use lifeline_database::repositories::{
    CheckInRepository, ContactRepository, SettingsRepository, SuppressionRepository,
    UserRepository,
};
use lifeline_database::traits::SuppressionStore;
use lifeline_database::{DatabasePool, MemoryStore};
use lifeline_monitor::{EscalationEngine, InMemorySuppressionStore, MonitorStores};
use lifeline_worker::MonitorScheduler;

#[tokio::main]
async fn main() {
    let env = std::env::var("LIFELINE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Lifeline v{}", env!("CARGO_PKG_VERSION"));
    let config = Arc::new(config);

    // ── Step 1: Stores ───────────────────────────────────────────
    tracing::info!(provider = ?config.database.provider, "Initializing stores");
    let (stores, db_pool) = match config.database.provider {
        DatabaseProvider::Postgres => {
            let db = DatabasePool::connect(&config.database).await?;
            lifeline_database::migration::run_migrations(db.pool()).await?;
            let pool = db.pool().clone();
            let stores = MonitorStores {
                users: Arc::new(UserRepository::new(pool.clone())),
                checkins: Arc::new(CheckInRepository::new(pool.clone())),
                settings: Arc::new(SettingsRepository::new(pool.clone())),
                contacts: Arc::new(ContactRepository::new(pool)),
            };
            (stores, Some(db))
        }
        DatabaseProvider::Memory => {
            tracing::warn!("Using in-memory stores; data is lost on restart");
            (MonitorStores::shared(Arc::new(MemoryStore::new())), None)
        }
    };

    let suppression: Arc<dyn SuppressionStore> =
        match (config.monitor.suppression_backend, &db_pool) {
            (SuppressionBackend::Database, Some(db)) => {
                Arc::new(SuppressionRepository::new(db.pool().clone()))
            }
            (SuppressionBackend::Database, None) => {
                return Err(AppError::configuration(
                    "Database suppression backend requires the postgres provider",
                ));
            }
            (SuppressionBackend::Memory, _) => Arc::new(InMemorySuppressionStore::new()),
        };

    // ── Step 2: Notification senders ─────────────────────────────
    let email = lifeline_notify::build_email_sender(&config.email)?;
    let sms = lifeline_notify::build_sms_sender(&config.sms)?;
    tracing::info!(
        email_provider = ?config.email.provider,
        sms_provider = ?config.sms.provider,
        "Notification senders ready"
    );

    // ── Step 3: Engine + services ────────────────────────────────
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let calendar = LocalCalendar::from_config(
        config.monitor.timezone.as_deref(),
        config.monitor.utc_offset_minutes,
    )?;
    tracing::info!(zone = %calendar.zone(), "Local calendar configured");

    let engine = EscalationEngine::new(
        stores.clone(),
        suppression,
        email,
        sms,
        Arc::clone(&clock),
        calendar,
        config.monitor.clone(),
    );

    let state = lifeline_api::AppState::new(
        Arc::clone(&config),
        &stores,
        engine.clone(),
        clock,
        calendar,
        db_pool.clone(),
    )?;

    // ── Step 4: Scheduler ────────────────────────────────────────
    let scheduler = if config.schedule.enabled {
        let mut scheduler = MonitorScheduler::new(engine).await?;
        scheduler.register(&config.schedule, &calendar).await?;
        scheduler.start().await?;
        scheduler.spawn_startup_run(Duration::from_secs(config.schedule.startup_delay_seconds));
        Some(scheduler)
    } else {
        tracing::info!("Scheduled evaluation disabled");
        None
    };

    // ── Step 5: HTTP server ──────────────────────────────────────
    let app = lifeline_api::build_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Lifeline server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    })
    .await
    .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 6: Stop background work ─────────────────────────────
    if let Some(mut scheduler) = scheduler {
        scheduler.shutdown().await?;
    }
    if let Some(db) = db_pool {
        db.close().await;
    }

    tracing::info!("Lifeline server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
