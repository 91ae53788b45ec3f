//! datimus-agent: publishes weekly schedules as Prometheus gauges.
//!
//! Loads the agent config and its metric files, evaluates every metric on a
//! fixed interval and serves the values on `GET /metrics`.

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::watch;

use datimus_agent::{check_schedule, http, runner, Cli, GaugeSet};
use datimus_rules::{LoadedSchedule, ScheduleLoader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_filter())),
        )
        .init();

    tracing::info!(?cli, "starting datimus-agent");

    let schedule = ScheduleLoader::new(&cli.config)
        .load()
        .inspect_err(|e| tracing::error!(error = %e, "failed to load schedule"))
        .with_context(|| format!("loading schedule from {}", cli.config.display()))?;

    if cli.check {
        let summary = check_schedule(&schedule).context("registering gauges")?;
        print!("{summary}");
        return Ok(());
    }

    let LoadedSchedule { config, table } = schedule;
    let gauges = GaugeSet::new(&table).context("registering gauges")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    let addr = cli.listen_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding metrics listener on {addr}"))?;
    let server = http::spawn_metrics_server(listener, gauges.clone(), shutdown_rx.clone());

    runner::run(&table, &gauges, config.sleep_interval(), shutdown_rx).await;

    server.await.context("metrics server task panicked")?;
    tracing::info!("datimus-agent stopped");
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to register SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => {},
            _ = sigterm.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
    }
}
