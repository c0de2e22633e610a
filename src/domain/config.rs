//! World configuration as handed over by the host UI (or a JSON preset).

use rand::{Rng, RngCore};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::cell::MAX_DENSITY_LEVELS;
use super::palette::Palette;
use super::params::{clamp_dimension, Composition, ParameterSnapshot, MAX_TILT_DEGREES};
use super::rules::RuleSet;

pub const DEFAULT_WIDTH: u32 = 512;
pub const DEFAULT_HEIGHT: u32 = 384;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    pub composition: Composition,
    pub parameters: ParameterSnapshot,
    pub rules: RuleSet,
    pub palette: Palette,
    /// Steps per displayed frame.
    pub speed: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            composition: Composition::default(),
            parameters: ParameterSnapshot::default(),
            rules: RuleSet::default(),
            palette: Palette::default(),
            speed: 1.0,
        }
    }
}

impl WorldConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: WorldConfig = parse_object(json, "world config")?;
        let clamped = config.clone().clamped();
        if clamped != config {
            log::warn!("world config had out-of-range values; clamped");
        }
        Ok(clamped)
    }

    pub fn to_json(&self) -> String {
        // Plain data with no maps keyed by non-strings; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn clamped(self) -> Self {
        WorldConfig {
            width: clamp_dimension(self.width),
            height: clamp_dimension(self.height),
            composition: self.composition.normalized(),
            parameters: self.parameters.clamped(),
            rules: self.rules.sanitized(),
            palette: self.palette,
            speed: if self.speed.is_finite() { self.speed.clamp(0.0, 64.0) } else { 1.0 },
        }
    }

    /// Steps to run for one displayed frame.
    #[inline]
    pub fn steps_per_frame(&self) -> u32 {
        steps_for_speed(self.speed)
    }

    /// The "Randomize" preset: random composition inside the slider bands, random
    /// physics in 0.05 steps, random sand colors. Dimensions and rules are kept.
    pub fn randomized<R: RngCore>(&self, rng: &mut R) -> Self {
        let water = rng.gen_range(40..=80) as f32;
        let air = rng.gen_range(10..=20) as f32;
        let step = |rng: &mut R| rng.gen_range(0..=20u32) as f32 / 20.0;
        let parameters = ParameterSnapshot {
            viscosity: step(rng),
            surface_tension: step(rng),
            tilt_degrees: rng.gen_range(-(MAX_TILT_DEGREES as i32)..=MAX_TILT_DEGREES as i32) as f32,
            turbulence: step(rng),
            density_levels: rng.gen_range(1..=MAX_DENSITY_LEVELS),
            gravity_inverted: self.parameters.gravity_inverted,
        };
        let palette = Palette {
            sand_a: [rng.gen(), rng.gen(), rng.gen(), 255],
            sand_b: [rng.gen(), rng.gen(), rng.gen(), 255],
            ..self.palette
        };
        WorldConfig {
            composition: Composition::from_percents(water, air),
            parameters,
            palette,
            ..self.clone()
        }
    }
}

/// Parse a JSON object into `T`. Arrays and scalars are refused even though serde
/// would map a sequence onto the struct fields.
pub(crate) fn parse_object<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err(format!("{what} must be a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

/// `max(1, round(speed))`
#[inline]
pub fn steps_for_speed(speed: f32) -> u32 {
    if !speed.is_finite() {
        return 1;
    }
    speed.round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn json_round_trip_and_partial_input() {
        let config = WorldConfig::from_json(r#"{ "width": 64, "parameters": { "viscosity": 0.9 } }"#).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.parameters.viscosity, 0.9);
        assert_eq!(config.parameters.density_levels, 3);

        let back = WorldConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn json_values_are_clamped() {
        let config = WorldConfig::from_json(r#"{ "width": 4, "height": 9000, "parameters": { "tilt_degrees": -80 } }"#).unwrap();
        assert_eq!(config.width, 16);
        assert_eq!(config.height, 1024);
        assert_eq!(config.parameters.tilt_degrees, -45.0);
    }

    #[test]
    fn non_object_documents_are_refused() {
        assert_eq!(WorldConfig::from_json("[]").unwrap_err(), "world config must be a JSON object");
        assert!(WorldConfig::from_json("[64, 48]").is_err());
        assert!(WorldConfig::from_json("12").is_err());
        assert!(WorldConfig::from_json("{}").is_ok());
    }

    #[test]
    fn speed_rounds_to_at_least_one_step() {
        assert_eq!(steps_for_speed(0.2), 1);
        assert_eq!(steps_for_speed(2.5), 3);
        assert_eq!(steps_for_speed(4.0), 4);
        assert_eq!(steps_for_speed(f32::NAN), 1);
    }

    #[test]
    fn randomized_preset_stays_in_bands() {
        let mut rng = SmallRng::seed_from_u64(7);
        let base = WorldConfig::default();
        for _ in 0..50 {
            let c = base.randomized(&mut rng);
            assert!(c.composition.air >= 0.1 - 1e-6 && c.composition.air <= 0.2 + 1e-6);
            assert!(c.composition.water >= 0.4 - 1e-6 && c.composition.water <= 0.8 + 1e-6);
            assert!((c.composition.sand + c.composition.water + c.composition.air - 1.0).abs() < 1e-5);
            assert_eq!(c.parameters, c.parameters.clamped());
            assert_eq!(c.width, base.width);
        }
    }
}
