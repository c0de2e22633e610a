//! Physical parameters and world composition.
//!
//! Everything here clamps instead of rejecting: out-of-range or non-finite input
//! degrades to the nearest valid value. Non-finite unit values and tilt become 0;
//! non-finite slider percentages take the slider's starting position.

use serde::{Deserialize, Serialize};

use super::cell::MAX_DENSITY_LEVELS;

pub const MIN_WORLD_SIZE: u32 = 16;
pub const MAX_WORLD_SIZE: u32 = 1024;
pub const MAX_TILT_DEGREES: f32 = 45.0;

/// Air band (percent) enforced by `Composition::from_percents`.
pub const AIR_PERCENT_MIN: f32 = 10.0;
pub const AIR_PERCENT_MAX: f32 = 20.0;

#[inline]
pub fn clamp_dimension(v: u32) -> u32 {
    v.clamp(MIN_WORLD_SIZE, MAX_WORLD_SIZE)
}

#[inline]
fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() { v } else { fallback }
}

#[inline]
pub(crate) fn clamp_unit(v: f32) -> f32 {
    finite_or(v, 0.0).clamp(0.0, 1.0)
}

/// Per-tick physical configuration. Read once at the start of every step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSnapshot {
    pub viscosity: f32,
    pub surface_tension: f32,
    pub tilt_degrees: f32,
    pub turbulence: f32,
    pub density_levels: u8,
    pub gravity_inverted: bool,
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        ParameterSnapshot {
            viscosity: 0.5,
            surface_tension: 0.5,
            tilt_degrees: 0.0,
            turbulence: 0.25,
            density_levels: 3,
            gravity_inverted: false,
        }
    }
}

impl ParameterSnapshot {
    pub fn clamped(self) -> Self {
        ParameterSnapshot {
            viscosity: clamp_unit(self.viscosity),
            surface_tension: clamp_unit(self.surface_tension),
            tilt_degrees: finite_or(self.tilt_degrees, 0.0).clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES),
            turbulence: clamp_unit(self.turbulence),
            density_levels: self.density_levels.clamp(1, MAX_DENSITY_LEVELS),
            gravity_inverted: self.gravity_inverted,
        }
    }

    /// Row offset that means "down" for the current gravity sign.
    #[inline]
    pub fn down(&self) -> i32 {
        if self.gravity_inverted { -1 } else { 1 }
    }
}

/// Target fractions for world population. Whatever sand and water leave over is air.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Composition {
    pub sand: f32,
    pub water: f32,
    pub air: f32,
}

impl Default for Composition {
    fn default() -> Self {
        Composition::from_percents(60.0, 15.0)
    }
}

impl Composition {
    /// Clamp every fraction into `[0, 1]` and scale the set down when it sums above 1.
    pub fn normalized(self) -> Self {
        let sand = clamp_unit(self.sand);
        let water = clamp_unit(self.water);
        let air = clamp_unit(self.air);
        let sum = sand + water + air;
        if sum > 1.0 {
            Composition { sand: sand / sum, water: water / sum, air: air / sum }
        } else {
            Composition { sand, water, air }
        }
    }

    /// Slider-style composition: water is free, air stays inside the 10-20% band,
    /// sand takes the rest.
    pub fn from_percents(water: f32, air: f32) -> Self {
        let air = finite_or(air, 15.0).clamp(AIR_PERCENT_MIN, AIR_PERCENT_MAX);
        let water = finite_or(water, 60.0).clamp(0.0, 100.0 - air);
        let sand = (100.0 - (water + air)).max(0.0);
        Composition { sand: sand / 100.0, water: water / 100.0, air: air / 100.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_clamp_into_range() {
        let p = ParameterSnapshot {
            viscosity: 3.0,
            surface_tension: -1.0,
            tilt_degrees: 90.0,
            turbulence: f32::NAN,
            density_levels: 0,
            gravity_inverted: true,
        }
        .clamped();
        assert_eq!(p.viscosity, 1.0);
        assert_eq!(p.surface_tension, 0.0);
        assert_eq!(p.tilt_degrees, 45.0);
        assert_eq!(p.turbulence, 0.0);
        assert_eq!(p.density_levels, 1);
        assert_eq!(p.down(), -1);

        let p = ParameterSnapshot { density_levels: 9, ..Default::default() }.clamped();
        assert_eq!(p.density_levels, MAX_DENSITY_LEVELS);
    }

    #[test]
    fn non_finite_sliders_restart_at_their_starting_position() {
        let c = Composition::from_percents(f32::NAN, f32::INFINITY);
        assert!((c.water - 0.6).abs() < 1e-6);
        assert!((c.air - 0.15).abs() < 1e-6);
        assert!((c.sand - 0.25).abs() < 1e-6);

        let p = ParameterSnapshot { viscosity: f32::NAN, tilt_degrees: f32::NEG_INFINITY, ..Default::default() }.clamped();
        assert_eq!(p.viscosity, 0.0);
        assert_eq!(p.tilt_degrees, 0.0);
    }

    #[test]
    fn dimensions_clamp() {
        assert_eq!(clamp_dimension(1), 16);
        assert_eq!(clamp_dimension(5000), 1024);
        assert_eq!(clamp_dimension(300), 300);
    }

    #[test]
    fn composition_normalizes_overfull_input() {
        let c = Composition { sand: 0.8, water: 0.8, air: 0.4 }.normalized();
        assert!((c.sand + c.water + c.air - 1.0).abs() < 1e-6);
        assert!((c.sand - 0.4).abs() < 1e-6);

        let c = Composition { sand: -0.5, water: 0.3, air: 0.1 }.normalized();
        assert_eq!(c.sand, 0.0);
        assert_eq!(c.water, 0.3);
    }

    #[test]
    fn percents_keep_air_in_band_and_derive_sand() {
        let c = Composition::from_percents(95.0, 2.0);
        assert!((c.air - 0.10).abs() < 1e-6);
        assert!((c.water - 0.90).abs() < 1e-6);
        assert!(c.sand.abs() < 1e-6);

        let c = Composition::from_percents(50.0, 30.0);
        assert!((c.air - 0.20).abs() < 1e-6);
        assert!((c.sand - 0.30).abs() < 1e-6);
    }
}
