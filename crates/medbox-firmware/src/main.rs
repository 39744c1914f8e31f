//! # medbox Firmware
//!
//! Entry point for the medbox dispense controller. Parses CLI args, builds
//! the `Supervisor` and its collaborators, and runs the cooperative tick
//! loop until interrupted.
//!
//! Concrete hardware drivers (stepper, photodetector, ToF range finder) and
//! the bus client are out of scope here, same as in the rest of this
//! workspace — this binary only ever runs against the in-process fakes in
//! `medbox-sim`. A real deployment links a separate crate that implements
//! `medbox_drivers`'s traits against actual peripherals and swaps it in at
//! the same three call sites `build_magazines` and `main` use.

mod config;

use anyhow::Result;
use clap::Parser;
use config::Config;
use medbox_core::{Magazine, MagazineId, Magazines, Supervisor};
use medbox_proto::Topics;
use medbox_sim::{FakeBusClient, FakeClock, FakePhotoDetector, FakeRangeFinder, FakeStepperDriver};
use std::thread;
use std::time::Duration;
use tracing::info;

/// Runs the medbox dispense controller.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Deployment id used to build the `medbox/<id>/...` topic prefix.
    #[arg(long, default_value = "01")]
    device_id: String,

    /// Hardware MAC address used to build a unique bus client id.
    #[arg(long, default_value = "000000000000")]
    hardware_mac: String,

    /// Override for `MAX_STEPS_SAFETY`.
    #[arg(long)]
    max_steps_safety: Option<i32>,

    /// Override for `SENSOR_THRESHOLD`.
    #[arg(long)]
    sensor_threshold: Option<u16>,

    /// Override for `JAM_TIMEOUT_MS`.
    #[arg(long)]
    jam_timeout_ms: Option<u64>,

    /// Override for `COOLDOWN_MS`.
    #[arg(long)]
    cooldown_ms: Option<u64>,

    /// Override for `LEVEL_INTERVAL_MS`.
    #[arg(long)]
    level_interval_ms: Option<u64>,

    /// Exit after this many ticks instead of running forever. Intended for
    /// bench testing; a real deployment never sets this.
    #[arg(long)]
    max_ticks: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let max_ticks = cli.max_ticks;
    let config = build_config(cli);
    run(config, max_ticks)
}

fn build_config(cli: Cli) -> Config {
    let mut config = Config { device_id: cli.device_id, hardware_mac: cli.hardware_mac, ..Config::default() };
    if let Some(v) = cli.max_steps_safety {
        config.limits.max_steps_safety = v;
    }
    if let Some(v) = cli.sensor_threshold {
        config.limits.sensor_threshold = v;
    }
    if let Some(v) = cli.jam_timeout_ms {
        config.limits.jam_timeout_ms = v;
    }
    if let Some(v) = cli.cooldown_ms {
        config.limits.cooldown_ms = v;
    }
    if let Some(v) = cli.level_interval_ms {
        config.limits.level_interval_ms = v;
    }
    config
}

fn build_magazines() -> Magazines {
    Magazines::new(
        Magazine::new(
            MagazineId::One,
            Box::new(FakeStepperDriver::new()),
            Box::new(FakePhotoDetector::fires_after(Some(400))),
            Box::new(FakeRangeFinder::new(80)),
        ),
        Magazine::new(
            MagazineId::Two,
            Box::new(FakeStepperDriver::new()),
            Box::new(FakePhotoDetector::fires_after(Some(400))),
            Box::new(FakeRangeFinder::new(80)),
        ),
    )
}

fn run(config: Config, max_ticks: Option<u64>) -> Result<()> {
    info!(device_id = %config.device_id, client_id = %config.client_id(), "starting medbox firmware");

    let topics = Topics::new(&config.device_id);
    let limits = config.limits;
    let mut supervisor = Supervisor::with_limits(config.client_id(), topics, build_magazines(), limits);

    let mut clock = FakeClock::new();
    let mut bus = FakeBusClient::new();

    let mut ticks: u64 = 0;
    loop {
        clock.advance(1);
        supervisor.tick(&clock, &mut bus);

        ticks += 1;
        if max_ticks.is_some_and(|limit| ticks >= limit) {
            break;
        }
        thread::sleep(Duration::from_millis(1));
    }

    Ok(())
}
