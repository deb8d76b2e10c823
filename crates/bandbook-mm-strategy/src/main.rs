/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Running simulated market maker with graceful shutdown
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use bandbook_adapter::{ClientConfig, FeedClient};
use bandbook_mm_strategy::placement::RngSource;
use bandbook_mm_strategy::{EngineConfig, MarketMaker, Scheduler};

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
#[command(name = "bandbook-mm-strategy", version, about = "Simulated band market maker")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: PathBuf,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let _log_guard = init_tracing(&args.log_level, args.log_file.as_deref())?;

    info!(
        config_path = %args.config_path.display(),
        dry_run = args.dry_run,
        "starting bandbook-mm-strategy"
    );

    let config = EngineConfig::from_file(&args.config_path).context("load config")?;
    info!(
        orderbook_url = %config.orderbook_url,
        order_range = %config.order_range,
        allowed_active_orders = config.allowed_active_orders,
        "configuration loaded"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let client = FeedClient::with_config(
        &config.orderbook_url,
        ClientConfig {
            timeout: config.request_timeout(),
            connect_timeout: config.request_timeout().min(MAX_CONNECT_TIMEOUT),
        },
    )
    .context("build order book client")?;

    let engine = MarketMaker::new(
        config.strategy_params(),
        config.initial_account,
        Box::new(RngSource::from_seed(config.rng_seed)),
    );
    let scheduler = Scheduler::new(
        Arc::new(client),
        engine,
        config.update_interval(),
        config.report_interval(),
    );

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    scheduler.run(shutdown).await;
    info!("shutdown signal received");

    scheduler.report_balances().await;
    Ok(())
}

fn init_tracing(log_level: &str, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|err| anyhow!(err))
            .context("initialize tracing subscriber")?;
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().context("log file path must name a file")?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(directory, file_name));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(Some(guard))
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    tokio::spawn(async move {
        let signal = shutdown_signal().await;
        info!(signal, "stopping update and report loops");
        shutdown.cancel();
    });
}

/// Resolves with the name of the first termination signal delivered.
#[cfg(unix)]
async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => tokio::select! {
            name = interrupt() => name,
            _ = terminate.recv() => "SIGTERM",
        },
        Err(err) => {
            warn!(error = %err, "failed to install SIGTERM handler");
            interrupt().await
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> &'static str {
    interrupt().await
}

async fn interrupt() -> &'static str {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to install SIGINT handler");
        std::future::pending::<()>().await;
    }
    "SIGINT"
}
