//! Steering rules and the weighting functions that blend them.

use crate::{atan, Agent, Vector3, WeightPair};

/// Softness of the inverse square falloff between siblings.
pub const SEPARATION_SOFTNESS: f32 = 1.0;
/// Softness of the inverse square falloff away from the threat.
pub const ESCAPE_SOFTNESS: f32 = 10.0;
/// Offset keeping `inv_sq` finite for tiny non-zero distances.
pub const INV_SQ_EPSILON: f32 = f32::EPSILON;

const SIGMOID_SPREAD: f32 = 0.3;

/// Smooth step from 0 to 1 centred on `x = 0`.
pub fn sigmoid(x: f32) -> f32 {
    atan(x / SIGMOID_SPREAD) / core::f32::consts::PI + 0.5
}

/// Blend a rule's calm and fear weights by distance to the threat.
pub fn combine_weight(weights: WeightPair, distance_to_threat: f32) -> f32 {
    weights.base + weights.base * sigmoid(distance_to_threat) * weights.fear
}

/// Inverse square falloff with softness `s`. Zero distance or zero softness
/// has no influence.
pub fn inv_sq(x: f32, s: f32) -> f32 {
    if x == 0.0 || s == 0.0 {
        return 0.0;
    }
    let scaled = x / s + INV_SQ_EPSILON;
    1.0 / (scaled * scaled)
}

pub fn cohesion(position: Vector3, centroid: Vector3) -> Vector3 {
    (centroid - position).normalize()
}

/// Push away from every sibling, strongest for the closest ones.
///
/// `agent` is recognised in `others` by identity and skipped, so the usual
/// call passes the whole herd. Contributions that are not finite are dropped.
pub fn separation<'a, I>(agent: &Agent, others: I) -> Vector3
where
    I: IntoIterator<Item = &'a Agent>,
{
    let mut steering = Vector3::zero();

    for other in others {
        if core::ptr::eq(agent, other) {
            continue;
        }

        let away = agent.position - other.position;
        let push = away.normalize() * inv_sq(away.magnitude(), SEPARATION_SOFTNESS);
        if !push.is_finite() {
            continue;
        }
        steering += push;
    }

    steering
}

/// Mean velocity of the siblings within `radius` on the horizontal plane.
pub fn alignment<'a, I>(agent: &Agent, others: I, radius: f32) -> Vector3
where
    I: IntoIterator<Item = &'a Agent>,
{
    let mut sum = Vector3::zero();
    let mut count = 0;

    for other in others {
        if core::ptr::eq(agent, other) {
            continue;
        }
        if agent.position.horizontal_sqr_distance(&other.position) > radius * radius {
            continue;
        }
        sum += other.velocity;
        count += 1;
    }

    if count > 0 {
        sum / count as f32
    } else {
        Vector3::zero()
    }
}

pub fn escape(position: Vector3, threat: Vector3) -> Vector3 {
    let away = position - threat;
    away.normalize() * inv_sq(away.magnitude(), ESCAPE_SOFTNESS)
}
