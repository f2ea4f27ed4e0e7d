//! Conversions between the core types and their serde mirrors.

use herd_core::{HerdConfig, Vector3, WeightPair};
use herd_shared::{HerdSettings, Point3, WeightSettings};

pub fn to_point(v: Vector3) -> Point3 {
    Point3::new(v.x, v.y, v.z)
}

pub fn to_vector(p: Point3) -> Vector3 {
    Vector3::new(p.x, p.y, p.z)
}

fn to_pair(w: WeightSettings) -> WeightPair {
    WeightPair::new(w.base, w.fear)
}

fn to_settings(w: WeightPair) -> WeightSettings {
    WeightSettings::new(w.base, w.fear)
}

pub fn config_from_settings(settings: &HerdSettings) -> HerdConfig {
    HerdConfig {
        cohesion: to_pair(settings.cohesion),
        separation: to_pair(settings.separation),
        alignment: to_pair(settings.alignment),
        escape_weight: settings.escape_weight,
        alignment_radius: settings.alignment_radius,
        flight_zone_radius: settings.flight_zone_radius,
        min_velocity: settings.min_velocity,
        max_velocity: to_pair(settings.max_velocity),
        clamp_to_ground: settings.clamp_to_ground,
    }
}

pub fn settings_from_config(config: &HerdConfig) -> HerdSettings {
    HerdSettings {
        cohesion: to_settings(config.cohesion),
        separation: to_settings(config.separation),
        alignment: to_settings(config.alignment),
        escape_weight: config.escape_weight,
        alignment_radius: config.alignment_radius,
        flight_zone_radius: config.flight_zone_radius,
        min_velocity: config.min_velocity,
        max_velocity: to_settings(config.max_velocity),
        clamp_to_ground: config.clamp_to_ground,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_match_default_config() {
        assert_eq!(config_from_settings(&HerdSettings::default()), HerdConfig::default());
        assert_eq!(settings_from_config(&HerdConfig::default()), HerdSettings::default());
    }
}
