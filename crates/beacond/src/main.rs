//! beacond - the device telemetry beacon agent
//!
//! This is the main entry point for the agent. It wires together:
//! - Configuration loading
//! - The file-backed store
//! - A telemetry adapter
//! - The HTTP backend client
//! - The agent engine, driven by a periodic tick

use anyhow::{Context, Result, bail};
use beacon_config::{Settings, TelemetryAdapter, load_config};
use beacon_core::{Agent, AgentOptions, HttpBackend, SyncOutcome};
use beacon_store::{FileStore, Store};
use beacon_telemetry::{IpGeoTelemetry, ReachabilityProbe, StaticTelemetry, TelemetrySource};
use beacon_telemetry_linux::LinuxTelemetry;
use beacon_util::default_config_path;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal::unix::{SignalKind, signal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// beacond - periodic device telemetry collection with batched sync
#[derive(Parser, Debug)]
#[command(name = "beacond")]
#[command(about = "Device telemetry beacon agent", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/beacond/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Data directory override (or set BEACON_DATA_DIR env var)
    #[arg(short, long, env = "BEACON_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Username submitted at registration (overrides config)
    #[arg(short, long)]
    username: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Main service state
struct Service {
    agent: Agent,
    settings: Settings,
    username: String,
}

impl Service {
    fn new(args: &Args) -> Result<Self> {
        let settings = load_config(&args.config)
            .with_context(|| format!("Failed to load config from {:?}", args.config))?;

        info!(
            config_path = %args.config.display(),
            endpoint = %settings.api.base_url,
            "Configuration loaded"
        );

        let username = match args
            .username
            .clone()
            .or_else(|| settings.agent.username.clone())
        {
            Some(username) => username,
            None => bail!("No username configured (set agent.username or pass --username)"),
        };

        let data_dir = args
            .data_dir
            .clone()
            .unwrap_or_else(|| settings.daemon.data_dir.clone());

        let store: Arc<dyn Store> = Arc::new(
            FileStore::open(&data_dir)
                .with_context(|| format!("Failed to open data directory {:?}", data_dir))?,
        );

        info!(data_dir = %data_dir.display(), "Store initialized");

        let telemetry = build_telemetry(&settings);
        let backend = Arc::new(HttpBackend::new(
            settings.api.base_url.clone(),
            settings.api.request_timeout,
        ));

        let options = AgentOptions {
            batch_size: settings.agent.batch_size,
            max_cache_size: settings.agent.max_cache_size,
        };
        let agent = Agent::new(store, telemetry, backend, options);

        Ok(Self {
            agent,
            settings,
            username,
        })
    }

    async fn run(mut self) -> Result<()> {
        // Registration gates the periodic loop
        self.agent
            .start(&self.username)
            .await
            .context("Registration failed, not starting the collection loop")?;

        let mut sigterm =
            signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
        let mut sigint =
            signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;
        let mut sighup = signal(SignalKind::hangup()).context("Failed to create SIGHUP handler")?;

        let mut tick_timer = tokio::time::interval(self.settings.agent.collect_interval);
        // Ticks never overlap: the body runs to completion before the next
        // tick is polled, and missed ticks are skipped rather than bursted
        tick_timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!(
            interval_secs = self.settings.agent.collect_interval.as_secs(),
            "Agent running"
        );

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully");
                    break;
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully");
                    break;
                }
                _ = sighup.recv() => {
                    info!("Received SIGHUP, shutting down gracefully");
                    break;
                }

                _ = tick_timer.tick() => {
                    self.tick().await;
                }
            }
        }

        // Best-effort final drain happens inside stop()
        self.agent.stop().await;

        Ok(())
    }

    async fn tick(&mut self) {
        let sample = self.agent.collect_and_cache().await;

        match self.agent.sync_cache().await {
            SyncOutcome::Sent { count } => {
                info!(sent = count, "Sync complete");
            }
            SyncOutcome::Skipped => {}
            SyncOutcome::Revoked => {
                warn!("Device revoked; samples will be collected but never submitted");
            }
            SyncOutcome::Failed { reason } => {
                warn!(reason, "Sync failed, retrying on the next tick");
            }
        }

        let status = self.agent.status();
        info!(
            battery = sample.battery,
            network = ?sample.network,
            cached = status.cached,
            revoked = status.revoked,
            "Tick complete"
        );
    }
}

fn build_telemetry(settings: &Settings) -> Arc<dyn TelemetrySource> {
    let telemetry = &settings.telemetry;
    let probe = ReachabilityProbe::new(telemetry.probe_url.clone(), telemetry.probe_timeout);

    match telemetry.adapter {
        TelemetryAdapter::Linux => {
            let geo = IpGeoTelemetry::new(telemetry.geo_url.clone(), telemetry.geo_timeout, probe);
            Arc::new(LinuxTelemetry::new(geo))
        }
        TelemetryAdapter::IpGeo => Arc::new(IpGeoTelemetry::new(
            telemetry.geo_url.clone(),
            telemetry.geo_timeout,
            probe,
        )),
        TelemetryAdapter::Static => Arc::new(StaticTelemetry::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "beacond starting");

    let service = Service::new(&args)?;
    service.run().await
}
