use std::path::Path;

use anyhow::{bail, Context, Result};
use herd_core::{Agent, Herd, HerdRegistry, SimulationStep};
use herd_shared::{HerdSettings, Point3};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::convert::{config_from_settings, to_vector};
use crate::World;

/// Fixed step used when a scenario does not set one
pub const DEFAULT_DT: f32 = 0.02;
pub const DEFAULT_TICKS: u64 = 500;

fn default_dt() -> f32 {
    DEFAULT_DT
}

fn default_ticks() -> u64 {
    DEFAULT_TICKS
}

/// World composition read from JSON
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    #[serde(default = "default_dt")]
    pub dt: f32,
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Seed for scatter placement
    #[serde(default)]
    pub seed: u64,
    pub herds: Vec<HerdSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HerdSpec {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub settings: HerdSettings,
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
    #[serde(default)]
    pub scatter: Option<ScatterSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentSpec {
    pub position: Point3,
    #[serde(default)]
    pub velocity: Point3,
}

/// Agents placed at random in a horizontal disc
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScatterSpec {
    pub count: usize,
    pub center: Point3,
    pub radius: f32,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self> {
        let scenario: Scenario =
            serde_json::from_str(text).context("Failed to parse scenario JSON")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    /// Two herds of twelve, close enough to unsettle each other.
    pub fn two_herds() -> Self {
        let herd = |label: &str, x: f32| HerdSpec {
            label: label.to_string(),
            settings: HerdSettings::default(),
            agents: Vec::new(),
            scatter: Some(ScatterSpec {
                count: 12,
                center: Point3::new(x, 0.0, 0.0),
                radius: 1.5,
            }),
        };

        Self {
            dt: DEFAULT_DT,
            ticks: DEFAULT_TICKS,
            seed: 1,
            herds: vec![herd("west", -4.0), herd("east", 4.0)],
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.herds.is_empty() {
            bail!("Scenario must contain at least one herd");
        }
        validate_dt(self.dt)?;

        for (index, spec) in self.herds.iter().enumerate() {
            validate_settings(&spec.settings)
                .with_context(|| format!("Herd {} has invalid settings", index))?;

            for agent in &spec.agents {
                if !agent.position.is_finite() || !agent.velocity.is_finite() {
                    bail!("Herd {} has an agent with a non-finite position or velocity", index);
                }
            }

            if let Some(scatter) = &spec.scatter {
                if !scatter.center.is_finite() || !scatter.radius.is_finite() || scatter.radius < 0.0 {
                    bail!("Herd {} has an invalid scatter area", index);
                }
            }

            let count = spec.agents.len() + spec.scatter.as_ref().map_or(0, |s| s.count);
            if count == 0 {
                log::warn!("Herd {} has no agents, its centroid stays at the origin", index);
            }
        }

        Ok(())
    }

    /// Compose the world: one registered herd per [`HerdSpec`], in file order.
    pub fn build(&self) -> Result<World> {
        self.validate()?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut registry = HerdRegistry::new();
        let mut labels = Vec::with_capacity(self.herds.len());

        for (index, spec) in self.herds.iter().enumerate() {
            let mut herd = Herd::new(config_from_settings(&spec.settings));
            for agent in &spec.agents {
                herd.add_agent(Agent::new(to_vector(agent.position), to_vector(agent.velocity)));
            }
            if let Some(scatter) = &spec.scatter {
                herd.scatter(scatter.count, to_vector(scatter.center), scatter.radius, &mut rng);
            }

            let label = if spec.label.is_empty() {
                format!("herd-{}", index)
            } else {
                spec.label.clone()
            };
            log::info!("Herd '{}' with {} agents", label, herd.len());

            let id = registry.register(herd);
            labels.push((id, label));
        }

        Ok(World::new(SimulationStep::new(registry), labels))
    }
}

pub fn validate_dt(dt: f32) -> Result<()> {
    if !dt.is_finite() || dt < 0.0 {
        bail!("Time step must be a finite, non-negative number of seconds, got {}", dt);
    }
    Ok(())
}

fn validate_settings(settings: &HerdSettings) -> Result<()> {
    let weights = [
        settings.cohesion.base,
        settings.cohesion.fear,
        settings.separation.base,
        settings.separation.fear,
        settings.alignment.base,
        settings.alignment.fear,
        settings.escape_weight,
        settings.max_velocity.base,
        settings.max_velocity.fear,
    ];
    if weights.iter().any(|weight| !weight.is_finite()) {
        bail!("Weights and speed limits must be finite");
    }
    if !(settings.flight_zone_radius.is_finite() && settings.flight_zone_radius > 0.0) {
        bail!("flight_zone_radius must be positive, got {}", settings.flight_zone_radius);
    }
    if !(settings.alignment_radius.is_finite() && settings.alignment_radius >= 0.0) {
        bail!("alignment_radius must be non-negative, got {}", settings.alignment_radius);
    }
    if !(settings.min_velocity.is_finite() && settings.min_velocity >= 0.0) {
        bail!("min_velocity must be non-negative, got {}", settings.min_velocity);
    }
    Ok(())
}
