#![cfg_attr(not(feature = "std"), no_std)]

//! Herd simulation core.
//!
//! Agents are grouped into herds, and every herd treats the mean centroid of
//! all other herds as a threat to flee from. [`SimulationStep::tick`] advances
//! the whole world by one fixed step in two phases: first every herd refreshes
//! its aggregates, then every agent blends its steering rules and moves.

extern crate alloc;

pub mod agent;
pub mod behavior;
pub mod herd;
pub mod registry;
pub mod simulation;

pub use agent::Agent;
pub use herd::Herd;
pub use registry::{HerdId, HerdRegistry};
pub use simulation::{SimulationStep, TickSummary};

/// A 3D vector used for position and velocity. `y` is the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn sqr_magnitude(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn magnitude(&self) -> f32 {
        sqrt(self.sqr_magnitude())
    }

    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
                z: self.z / mag,
            }
        } else {
            Self::zero()
        }
    }

    /// Limit the magnitude to `max`, rescaling only when the squared
    /// magnitude exceeds `max * max`. A negative limit therefore keeps short
    /// vectors and turns longer ones into `normalize() * max`, reversing them.
    /// A NaN limit yields the zero vector.
    pub fn clamp_magnitude(&self, max: f32) -> Self {
        if max.is_nan() {
            return Self::zero();
        }
        if self.sqr_magnitude() > max * max {
            self.normalize() * max
        } else {
            *self
        }
    }

    pub fn distance(&self, other: &Vector3) -> f32 {
        (*self - *other).magnitude()
    }

    /// Squared distance on the horizontal `x`/`z` plane.
    pub fn horizontal_sqr_distance(&self, other: &Vector3) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl core::ops::Add for Vector3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl core::ops::Sub for Vector3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl core::ops::Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector3 {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl core::ops::Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Unclamped linear interpolation; `t` outside `[0, 1]` extrapolates.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub(crate) fn sqrt(x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        x.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrtf(x)
    }
}

pub(crate) fn atan(x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        x.atan()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::atanf(x)
    }
}

/// A rule weight at rest (`base`) and the extra it gains under threat (`fear`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightPair {
    pub base: f32,
    pub fear: f32,
}

impl WeightPair {
    pub const fn new(base: f32, fear: f32) -> Self {
        Self { base, fear }
    }
}

/// Tunable parameters of a herd
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HerdConfig {
    pub cohesion: WeightPair,
    pub separation: WeightPair,
    pub alignment: WeightPair,
    pub escape_weight: f32,
    /// Horizontal radius inside which siblings count for alignment.
    pub alignment_radius: f32,
    pub flight_zone_radius: f32,
    /// Clamped target speeds below this leave the agent where it is.
    pub min_velocity: f32,
    /// Speed limit far from the threat (`base`) and at the threat (`fear`).
    pub max_velocity: WeightPair,
    /// Zero the vertical velocity component so agents stay on the ground plane.
    pub clamp_to_ground: bool,
}

impl Default for HerdConfig {
    fn default() -> Self {
        Self {
            cohesion: WeightPair::new(0.5, 5.0),
            separation: WeightPair::new(2.0, 0.0),
            alignment: WeightPair::new(0.1, 1.0),
            escape_weight: 6.0,
            alignment_radius: 50.0,
            flight_zone_radius: 7.0,
            min_velocity: 0.1,
            max_velocity: WeightPair::new(1.0, 4.0),
            clamp_to_ground: true,
        }
    }
}
