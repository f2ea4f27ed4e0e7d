use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use herd_sim::{run, write_json_line, RunOptions, Scenario};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless herd simulation", long_about = None)]
struct Args {
    /// Scenario JSON file; a built-in two-herd scenario is used when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Number of ticks to run, overriding the scenario
    #[arg(short = 'n', long)]
    ticks: Option<u64>,

    /// Fixed time step in seconds, overriding the scenario
    #[arg(long)]
    dt: Option<f32>,

    /// Emit a snapshot every N ticks (0 disables snapshots)
    #[arg(short = 'e', long, default_value_t = 10)]
    snapshot_every: u64,

    /// Write snapshots as JSON lines to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let scenario = match &args.scenario {
        Some(path) => {
            log::info!("Loading scenario {}", path.display());
            Scenario::load(path)?
        }
        None => {
            log::info!("No scenario given, using the built-in two-herd scenario");
            Scenario::two_herds()
        }
    };

    let options = RunOptions {
        ticks: args.ticks.unwrap_or(scenario.ticks),
        dt: args.dt.unwrap_or(scenario.dt),
        snapshot_every: args.snapshot_every,
    };

    let mut world = scenario.build().context("Failed to compose world")?;
    for id in world.sim.registry().ids() {
        if let Some(settings) = world.settings(id) {
            log::debug!(
                "Herd '{}' settings: {}",
                world.label(id).unwrap_or_default(),
                serde_json::to_string(&settings)?
            );
        }
    }

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    log::info!(
        "Running {} ticks at dt = {}s, snapshot every {} ticks",
        options.ticks,
        options.dt,
        options.snapshot_every
    );

    let report = run(&mut world, &options, |snapshot| write_json_line(&mut writer, snapshot))
        .context("Simulation error")?;
    writer.flush().context("Failed to flush snapshots")?;

    log::info!(
        "Done: {} ticks, {} snapshots, {} agent moves",
        report.ticks,
        report.snapshots,
        report.moves
    );

    Ok(())
}
