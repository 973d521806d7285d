// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use anyhow::Context;
use binnacle_core::MonotonicClock;
use binnacle_gateway::sim::{
    drive_tacho, LogBus, LogPanel, LogTelemetry, SimLink, SimProbe, SimTacho,
};
use binnacle_gateway::{build_pipeline, run, Drivers, GatewayConfig};
use binnacle_pipeline::{shared_bus, shared_panel, shared_telemetry};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// How often the run loop wakes to poll the pipeline's scheduler.
const TICK: Duration = Duration::from_millis(50);

#[derive(Debug, Parser)]
#[command(name = "binnacle-gateway", about = "Marine engine telemetry gateway")]
struct Args {
    /// Path to a JSON configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Exit after this many seconds instead of running until ctrl-c.
    #[arg(long)]
    run_for: Option<u64>,

    /// Simulated shaft speed for the bench tacho.
    #[arg(long, default_value_t = 750.0)]
    rpm: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GatewayConfig::load(path)?,
        None => GatewayConfig::default(),
    };

    // The whole gateway is cooperative on one thread; sampling, transforms
    // and consumer side effects all run inside the tick.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    runtime.block_on(async move {
        info!(hostname = %config.hostname, "binnacle gateway starting");

        let tacho = SimTacho::new();
        let drivers = Drivers {
            oil_probe: Box::new(SimProbe::new(350.0)),
            coolant_probe: Box::new(SimProbe::new(355.0)),
            exhaust_probe: Box::new(SimProbe::new(320.0)),
            tacho: Box::new(tacho.clone()),
            link: Box::new(SimLink),
            bus: shared_bus(LogBus),
            telemetry: shared_telemetry(LogTelemetry),
            panel: shared_panel(LogPanel),
        };

        let pipeline = build_pipeline(&config, drivers).context("wiring pipeline")?;

        let cancel = CancellationToken::new();

        tokio::spawn(drive_tacho(
            tacho,
            args.rpm,
            config.sensors.pulses_per_revolution,
            cancel.clone(),
        ));

        {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("ctrl-c received, shutting down");
                    cancel.cancel();
                }
            });
        }

        if let Some(seconds) = args.run_for {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(seconds)).await;
                cancel.cancel();
            });
        }

        run(pipeline, MonotonicClock::new(), cancel, TICK).await;
        Ok(())
    })
}
