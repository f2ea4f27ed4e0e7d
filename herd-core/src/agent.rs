use crate::{behavior, lerp, Herd, HerdConfig, HerdId, Vector3};

/// A single member of a herd
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: Vector3,
    /// Velocity applied on the last step that moved this agent.
    pub velocity: Vector3,
    target_velocity: Vector3,
    distance_to_threat: f32,
    herd: Option<HerdId>,
}

impl Agent {
    pub fn new(position: Vector3, velocity: Vector3) -> Self {
        Self {
            position,
            velocity,
            target_velocity: Vector3::zero(),
            distance_to_threat: 0.0,
            herd: None,
        }
    }

    /// Owning herd, once the agent belongs to a registered herd.
    pub fn herd(&self) -> Option<HerdId> {
        self.herd
    }

    pub(crate) fn set_herd(&mut self, herd: Option<HerdId>) {
        self.herd = herd;
    }

    /// Last clamped target velocity, kept for visualisation even when the
    /// agent did not move.
    pub fn target_velocity(&self) -> Vector3 {
        self.target_velocity
    }

    /// Distance to the threat measured by the last step.
    pub fn distance_to_threat(&self) -> f32 {
        self.distance_to_threat
    }

    /// Blend all steering rules against the herd's current aggregates.
    ///
    /// `self` must be one of `herd.agents()`; it is skipped among the
    /// siblings by identity.
    pub fn compute_rules(&self, herd: &Herd) -> Vector3 {
        debug_assert!(self.herd.is_none() || self.herd == herd.id());

        let config = herd.config();
        let threat = herd.threat_position();
        let distance = self.position.distance(&threat);

        let coh = behavior::cohesion(self.position, herd.centroid())
            * behavior::combine_weight(config.cohesion, distance);
        let sep = behavior::separation(self, herd.agents())
            * behavior::combine_weight(config.separation, distance);
        let ali = behavior::alignment(self, herd.agents(), config.alignment_radius)
            * behavior::combine_weight(config.alignment, distance);
        let esc = behavior::escape(self.position, threat) * config.escape_weight;

        coh + sep + ali + esc
    }

    /// Apply `target` as the new velocity and advance by `dt`.
    ///
    /// The target is clamped to a speed limit that rises as the threat comes
    /// closer. Returns `false`, leaving velocity and position untouched, when
    /// the clamped target is slower than `min_velocity` or not finite.
    ///
    /// The threat distance is measured again here rather than passed in from
    /// [`compute_rules`](Self::compute_rules). Within a tick both calls read
    /// the same position and the same frozen herd aggregates, so they agree.
    pub fn step(
        &mut self,
        target: Vector3,
        threat_position: Vector3,
        config: &HerdConfig,
        dt: f32,
    ) -> bool {
        self.distance_to_threat = self.position.distance(&threat_position);

        let max_velocity = lerp(
            config.max_velocity.base,
            config.max_velocity.fear,
            1.0 - self.distance_to_threat / config.flight_zone_radius,
        );
        let target = target.clamp_magnitude(max_velocity);
        self.target_velocity = target;

        if !target.is_finite() || target.magnitude() < config.min_velocity {
            return false;
        }

        let mut velocity = target;
        if config.clamp_to_ground {
            velocity.y = 0.0;
        }

        self.velocity = velocity;
        self.position += velocity * dt;
        true
    }
}
