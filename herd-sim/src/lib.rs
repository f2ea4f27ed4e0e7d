//! Headless host for the herd simulation: composes a world from a scenario,
//! drives it at a fixed step and reports snapshots.

use std::io::Write;

use anyhow::{Context, Result};
use herd_core::{HerdId, SimulationStep, TickSummary};
use herd_shared::{AgentSnapshot, HerdSettings, HerdSnapshot, WorldSnapshot};

pub mod convert;
pub mod scenario;

use convert::{settings_from_config, to_point};
pub use scenario::Scenario;

/// A running simulation plus the host-side labels of its herds
pub struct World {
    pub sim: SimulationStep,
    labels: Vec<(HerdId, String)>,
}

impl World {
    pub fn new(sim: SimulationStep, labels: Vec<(HerdId, String)>) -> Self {
        Self { sim, labels }
    }

    pub fn label(&self, id: HerdId) -> Option<&str> {
        self.labels
            .iter()
            .find(|(herd, _)| *herd == id)
            .map(|(_, label)| label.as_str())
    }

    pub fn settings(&self, id: HerdId) -> Option<HerdSettings> {
        self.sim
            .registry()
            .get(id)
            .map(|herd| settings_from_config(herd.config()))
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let herds = self
            .sim
            .registry()
            .all()
            .iter()
            .filter_map(|herd| {
                let id = herd.id()?;
                Some(HerdSnapshot {
                    id: id.get(),
                    label: self.label(id).unwrap_or_default().to_string(),
                    centroid: to_point(herd.centroid()),
                    threat_position: to_point(herd.threat_position()),
                    agents: herd
                        .agents()
                        .iter()
                        .map(|agent| AgentSnapshot {
                            position: to_point(agent.position),
                            velocity: to_point(agent.velocity),
                            target_velocity: to_point(agent.target_velocity()),
                        })
                        .collect(),
                })
            })
            .collect();

        WorldSnapshot {
            tick: self.sim.tick_count(),
            herds,
        }
    }
}

/// How long to run and how often to report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    pub ticks: u64,
    pub dt: f32,
    /// Emit a snapshot every this many ticks; 0 disables snapshots.
    pub snapshot_every: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    pub ticks: u64,
    pub snapshots: usize,
    /// Sum of moved agents over all ticks.
    pub moves: u64,
    pub last: Option<TickSummary>,
}

/// Drive `world` for `options.ticks` fixed steps, handing snapshots to `sink`.
pub fn run<F>(world: &mut World, options: &RunOptions, mut sink: F) -> Result<RunReport>
where
    F: FnMut(&WorldSnapshot) -> Result<()>,
{
    scenario::validate_dt(options.dt)?;

    let mut report = RunReport::default();
    for _ in 0..options.ticks {
        let summary = world.sim.tick(options.dt);
        report.ticks += 1;
        report.moves += summary.moved as u64;
        report.last = Some(summary);

        if options.snapshot_every > 0 && summary.tick % options.snapshot_every == 0 {
            sink(&world.snapshot())
                .with_context(|| format!("Failed to emit snapshot for tick {}", summary.tick))?;
            report.snapshots += 1;
        }

        if summary.tick % 100 == 0 {
            log::debug!("Tick {}: {} agents moved", summary.tick, summary.moved);
        }
    }

    Ok(report)
}

/// Write each snapshot as one line of JSON.
pub fn write_json_line<W: Write>(writer: &mut W, snapshot: &WorldSnapshot) -> Result<()> {
    serde_json::to_writer(&mut *writer, snapshot)?;
    writer.write_all(b"\n")?;
    Ok(())
}
