//! Gate controller — host entry point.
//!
//! Runs the control loop against the simulated gate plant:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  SimulatedGate (InputPort + OutputPort)   LogEventSink   │
//! │  ──────────────── Port Trait Boundary ────────────────   │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │            GateService (pure logic)                │  │
//! │  │         BlinkTimer · GateController                │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `gatectl [CONFIG] [MAX_TICKS]`.  The loop ends when the
//! controller requests exit or after `MAX_TICKS` ticks (default 600).
//! Set `RUST_LOG` to control verbosity.
#![deny(unused_must_use)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use gatectl::adapters::log_sink::LogEventSink;
use gatectl::adapters::sim::SimulatedGate;
use gatectl::app::service::GateService;
use gatectl::config::GateConfig;

/// Motor ticks for a full stroke of the simulated leaf.
const SIM_TRAVEL_TICKS: u32 = 120;

#[derive(Parser)]
#[command(name = "gatectl")]
#[command(about = "Run the gate controller against a simulated gate")]
#[command(version)]
struct Args {
    /// JSON controller configuration; defaults apply when omitted
    config: Option<PathBuf>,

    /// Stop after this many ticks unless the controller halts first
    #[arg(default_value_t = 600)]
    max_ticks: u64,
}

fn load_config(path: Option<&Path>) -> Result<GateConfig> {
    let config = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("reading config {}", p.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", p.display()))?
        }
        None => GateConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("gatectl v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(args.config.as_deref())?;

    // Closed gate; open it, close it again, then leave it.
    let mut hw = SimulatedGate::new(SIM_TRAVEL_TICKS)
        .press_at(10)
        .press_at(10 + u64::from(SIM_TRAVEL_TICKS) + 40);
    let mut sink = LogEventSink::new();

    let mut app = GateService::new(config.clone());
    app.start(&mut sink);

    let period = Duration::from_millis(u64::from(config.tick_interval_ms));
    let ran = app.run_until_exit(&mut hw, &mut sink, Some(args.max_ticks), || {
        std::thread::sleep(period);
    });

    let t = app.telemetry();
    info!(
        "Stopped after {} ticks in {:?} (faults={}, leaf position={})",
        ran,
        t.state,
        t.faults_total,
        hw.position()
    );
    if app.exit_requested() {
        anyhow::bail!("controller halted: {}", t.error_code);
    }
    Ok(())
}
