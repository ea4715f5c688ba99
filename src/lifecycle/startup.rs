//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration, apply command-line overrides
//! - Initialize logging, metrics and the tracer in dependency order
//! - Start the log generator and the HTTP server
//! - Wait for a stop signal and wind everything down
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{read_config, validate_config, ConfigError, LogFormat, ServiceConfig};
use crate::http::{bind, HttpServer, ServerError};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, metrics, SpanTracer};
use crate::scheduler::RandomLogGenerator;
use crate::service::ServiceProfile;

/// Command-line options shared by every service binary.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ServiceArgs {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "SERVICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Override the log output format.
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Disable the random log generator.
    #[arg(long)]
    pub no_scheduler: bool,
}

/// Error type for startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Resolve the effective configuration.
///
/// An explicit `profile` wins over the one named in the config file; with
/// neither, the service runs as the order service. Validation runs once,
/// after every command-line override is applied.
pub fn resolve_config(
    profile: Option<ServiceProfile>,
    args: &ServiceArgs,
) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => read_config(path, profile)?,
        None => ServiceConfig::for_profile(profile.unwrap_or_default()),
    };

    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
    }
    if let Some(format) = args.log_format {
        config.observability.log_format = format;
    }
    if args.no_scheduler {
        config.scheduler.enabled = false;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Run one service until a stop signal arrives.
pub async fn run(profile: Option<ServiceProfile>, args: ServiceArgs) -> Result<(), StartupError> {
    let config = resolve_config(profile, &args)?;

    logging::init_logging(&config.observability)?;

    tracing::info!(
        service = %config.service_name(),
        profile = %config.profile(),
        bind_address = %config.listener.bind_address,
        ping_delay_ms = config.ping.delay_ms,
        scheduler_enabled = config.scheduler.enabled,
        scheduler_interval_secs = config.scheduler_interval().as_secs(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let tracer = Arc::new(SpanTracer::new(config.service_name()));
    let shutdown = Shutdown::new();

    let generator = config.scheduler.enabled.then(|| {
        let generator = RandomLogGenerator::new(
            config.service_name(),
            config.profile().catalog(),
            config.scheduler_interval(),
            tracer.clone(),
        );
        tokio::spawn(generator.run(shutdown.subscribe()))
    });

    let listener = bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config, tracer.clone(), shutdown.clone());
    let server_shutdown = shutdown.subscribe();

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        signal_shutdown.trigger();
    });

    let result = server.run(listener, server_shutdown).await;

    // Stop the generator even when the server failed on its own.
    shutdown.trigger();
    if let Some(handle) = generator {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Random log generator task failed");
        }
    }
    tracer.shutdown();

    result?;
    tracing::info!("Shutdown complete");
    Ok(())
}
