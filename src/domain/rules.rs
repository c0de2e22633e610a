//! Rule coefficients for the transition model.
//!
//! The physical parameters (viscosity, tilt, ...) say *how* the world behaves; the
//! rule set holds the base rates those parameters modulate. Defaults reproduce the
//! hand-tuned look of the sandbox: sand settles slowly through air, bubbles rise
//! quickly through water and crawl through sand.

use serde::{Deserialize, Serialize};

/// Rates indexed by sand species are `[SandA, SandB]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Straight fall into air, before heaviness/viscosity/resistance scaling.
    pub sand_fall_rate: [f32; 2],
    pub sand_diagonal_rate: [f32; 2],
    pub sand_diagonal_floor: f32,
    pub sand_diagonal_water_rate: [f32; 2],
    pub sand_diagonal_water_floor: f32,
    /// Sideways hop chance per unit of turbulence.
    pub sand_jitter_rate: f32,

    /// Probability mass given to the tilt-favoured side when tilt is non-zero.
    pub tilt_skew: f32,

    /// Resistance lost per air neighbour of the target cell.
    pub bubble_resistance: f32,
    /// Extra resistance per air neighbour per unit of surface tension.
    pub bubble_resistance_tension: f32,
    pub bubble_resistance_floor: f32,

    /// Diagonal water flow refusal per solid neighbour per unit of surface tension.
    pub water_tension_per_solid: f32,
    /// Chance per unit of turbulence that a refused diagonal flow happens anyway.
    pub water_turbulence_push: f32,
    pub water_jitter_rate: f32,

    pub air_rise_sand: f32,
    pub air_diagonal_sand: f32,
    pub air_diagonal_water: f32,
    pub air_lateral_sand: f32,
    pub air_lateral_water: f32,
    /// Rise bonus per air cell already waiting above.
    pub air_near_air_bonus: f32,
    /// Diagonal bonus when air lies one step further along the path.
    pub air_ahead_bonus: f32,

    /// Bubble slowdown per sand neighbour, plus the viscosity-scaled part.
    pub sand_damping: f32,
    pub sand_damping_viscosity: f32,
    pub sand_damping_floor: f32,

    /// Global multiplier on every probabilistic air move.
    pub air_mobility: f32,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            sand_fall_rate: [0.12, 0.06],
            sand_diagonal_rate: [0.08, 0.04],
            sand_diagonal_floor: 0.01,
            sand_diagonal_water_rate: [0.11, 0.08],
            sand_diagonal_water_floor: 0.06,
            sand_jitter_rate: 0.03,
            tilt_skew: 0.65,
            bubble_resistance: 0.12,
            bubble_resistance_tension: 0.14,
            bubble_resistance_floor: 0.05,
            water_tension_per_solid: 0.15,
            water_turbulence_push: 0.1,
            water_jitter_rate: 0.05,
            air_rise_sand: 0.06,
            air_diagonal_sand: 0.04,
            air_diagonal_water: 0.09,
            air_lateral_sand: 0.03,
            air_lateral_water: 0.06,
            air_near_air_bonus: 0.04,
            air_ahead_bonus: 0.06,
            sand_damping: 0.07,
            sand_damping_viscosity: 0.10,
            sand_damping_floor: 0.25,
            air_mobility: 1.0,
        }
    }
}

impl RuleSet {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let rules: RuleSet = super::config::parse_object(json, "rule set")?;
        Ok(rules.sanitized())
    }

    /// Negative or non-finite rates become 0, the tilt skew stays in `[0.5, 1]`.
    pub fn sanitized(mut self) -> Self {
        fn rate(v: &mut f32) {
            if !v.is_finite() || *v < 0.0 {
                *v = 0.0;
            }
        }
        for pair in [
            &mut self.sand_fall_rate,
            &mut self.sand_diagonal_rate,
            &mut self.sand_diagonal_water_rate,
        ] {
            pair.iter_mut().for_each(rate);
        }
        for v in [
            &mut self.sand_diagonal_floor,
            &mut self.sand_diagonal_water_floor,
            &mut self.sand_jitter_rate,
            &mut self.bubble_resistance,
            &mut self.bubble_resistance_tension,
            &mut self.bubble_resistance_floor,
            &mut self.water_tension_per_solid,
            &mut self.water_turbulence_push,
            &mut self.water_jitter_rate,
            &mut self.air_rise_sand,
            &mut self.air_diagonal_sand,
            &mut self.air_diagonal_water,
            &mut self.air_lateral_sand,
            &mut self.air_lateral_water,
            &mut self.air_near_air_bonus,
            &mut self.air_ahead_bonus,
            &mut self.sand_damping,
            &mut self.sand_damping_viscosity,
            &mut self.sand_damping_floor,
            &mut self.air_mobility,
        ] {
            rate(v);
        }
        self.tilt_skew = if self.tilt_skew.is_finite() { self.tilt_skew.clamp(0.5, 1.0) } else { 0.65 };
        self
    }

    /// Probability of stepping to the right, given the tilt sign.
    /// Falling matter leans with the tilt; rising air leans against it (`rising = true`).
    #[inline]
    pub fn right_bias(&self, tilt_degrees: f32, rising: bool) -> f32 {
        let lean = if tilt_degrees > 0.0 {
            self.tilt_skew
        } else if tilt_degrees < 0.0 {
            1.0 - self.tilt_skew
        } else {
            return 0.5;
        };
        if rising { 1.0 - lean } else { lean }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sand_a_outpaces_sand_b_by_default() {
        let rules = RuleSet::default();
        assert!(rules.sand_fall_rate[0] > rules.sand_fall_rate[1]);
        assert!(rules.sand_diagonal_rate[0] > rules.sand_diagonal_rate[1]);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let rules = RuleSet::from_json(r#"{ "air_mobility": 0.0, "tilt_skew": 2.0 }"#).unwrap();
        assert_eq!(rules.air_mobility, 0.0);
        assert_eq!(rules.tilt_skew, 1.0);
        assert_eq!(rules.sand_fall_rate, RuleSet::default().sand_fall_rate);
    }

    #[test]
    fn negative_rates_are_zeroed() {
        let rules = RuleSet { sand_fall_rate: [-1.0, 0.5], air_rise_sand: f32::NAN, ..Default::default() }.sanitized();
        assert_eq!(rules.sand_fall_rate, [0.0, 0.5]);
        assert_eq!(rules.air_rise_sand, 0.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(RuleSet::from_json("{ not json").is_err());
        assert_eq!(RuleSet::from_json("[]").unwrap_err(), "rule set must be a JSON object");
    }

    #[test]
    fn tilt_bias_mirrors_for_rising_air() {
        let rules = RuleSet::default();
        assert_eq!(rules.right_bias(0.0, false), 0.5);
        assert!((rules.right_bias(30.0, false) - 0.65).abs() < 1e-6);
        assert!((rules.right_bias(30.0, true) - 0.35).abs() < 1e-6);
        assert!((rules.right_bias(-10.0, false) - 0.35).abs() < 1e-6);
        assert!((rules.right_bias(-10.0, true) - 0.65).abs() < 1e-6);
    }
}
