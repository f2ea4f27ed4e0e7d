#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// A 3D point in world coordinates, `y` up
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point3 {
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Calculate distance to another point
    pub fn distance_to(&self, other: &Point3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        libm::sqrtf(dx * dx + dy * dy + dz * dz)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Calm and fear weight of one rule
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightSettings {
    pub base: f32,
    pub fear: f32,
}

impl WeightSettings {
    pub const fn new(base: f32, fear: f32) -> Self {
        Self { base, fear }
    }
}

/// Herd tuning as exchanged with the host. Missing fields take defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HerdSettings {
    pub cohesion: WeightSettings,
    pub separation: WeightSettings,
    pub alignment: WeightSettings,
    pub escape_weight: f32,
    pub alignment_radius: f32,
    pub flight_zone_radius: f32,
    pub min_velocity: f32,
    pub max_velocity: WeightSettings,
    pub clamp_to_ground: bool,
}

impl Default for HerdSettings {
    fn default() -> Self {
        Self {
            cohesion: WeightSettings::new(0.5, 5.0),
            separation: WeightSettings::new(2.0, 0.0),
            alignment: WeightSettings::new(0.1, 1.0),
            escape_weight: 6.0,
            alignment_radius: 50.0,
            flight_zone_radius: 7.0,
            min_velocity: 0.1,
            max_velocity: WeightSettings::new(1.0, 4.0),
            clamp_to_ground: true,
        }
    }
}

/// Observable state of one agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentSnapshot {
    pub position: Point3,
    pub velocity: Point3,
    pub target_velocity: Point3,
}

/// Observable state of one herd
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HerdSnapshot {
    pub id: u32,
    pub label: String,
    pub centroid: Point3,
    pub threat_position: Point3,
    pub agents: Vec<AgentSnapshot>,
}

/// Whole-world state after a tick
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub herds: Vec<HerdSnapshot>,
}

impl WorldSnapshot {
    pub fn agent_count(&self) -> usize {
        self.herds.iter().map(|herd| herd.agents.len()).sum()
    }
}
