//! SandBehavior - grains settling through air and water
//!
//! - Water below: always swap (sand sinks through water).
//! - Air below: probabilistic, slower for light grains, high viscosity and large bubbles.
//! - Otherwise roll diagonally, tilt decides which side is tried first.
//! - Turbulence occasionally nudges a resting grain sideways.

use rand::RngCore;

use super::{Behavior, UpdateContext};
use crate::domain::Substance;

pub struct SandBehavior;

impl SandBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for SandBehavior {
    fn update<R: RngCore>(&self, ctx: &mut UpdateContext<'_, R>) -> bool {
        let xi = ctx.x as i32;
        let yi = ctx.y as i32;
        let me = ctx.here();
        let slot = me.substance.species_slot();
        let heaviness = me.heaviness(ctx.params.density_levels);
        let viscosity = ctx.params.viscosity;
        let viscosity_scale = 1.0 - 0.75 * viscosity;
        let rules = ctx.rules;
        let ty = yi + ctx.down;

        // --- 1. Straight fall ---
        match ctx.substance_at(xi, ty) {
            Some(Substance::Water) => {
                if ctx.move_to(xi, ty) {
                    return true;
                }
            }
            Some(Substance::Air) => {
                let p = rules.sand_fall_rate[slot] * (0.6 + 0.6 * heaviness) * viscosity_scale
                    * ctx.bubble_resistance(xi, ty);
                if ctx.chance(p) && ctx.move_to(xi, ty) {
                    return true;
                }
            }
            _ => {}
        }

        // --- 2. Diagonal roll ---
        let right_bias = rules.right_bias(ctx.params.tilt_degrees, false);
        let dir = ctx.pick_side(right_bias);
        for dx in [dir, -dir] {
            let tx = xi + dx;
            let p = match ctx.substance_at(tx, ty) {
                Some(Substance::Air) => {
                    let base = (rules.sand_diagonal_rate[slot] * viscosity_scale * (0.55 + 0.6 * heaviness))
                        .max(rules.sand_diagonal_floor);
                    base * ctx.bubble_resistance(tx, ty)
                }
                Some(Substance::Water) => (rules.sand_diagonal_water_rate[slot]
                    * (1.0 - 0.6 * viscosity)
                    * (0.6 + 0.6 * heaviness))
                    .max(rules.sand_diagonal_water_floor),
                _ => continue,
            };
            if ctx.chance(p) && ctx.move_to(tx, ty) {
                return true;
            }
        }

        // --- 3. Turbulent jitter ---
        if ctx.chance(ctx.params.turbulence * rules.sand_jitter_rate) {
            let sx = xi + ctx.pick_side(right_bias);
            if ctx.substance_at(sx, yi) == Some(Substance::Air) && !ctx.is_rising_air(sx, yi) && ctx.move_to(sx, yi) {
                return true;
            }
        }

        false
    }
}
