//! AirBehavior - bubbles
//!
//! Air is the lightest substance, so it moves against gravity:
//! - Water above: always swap, bubbles rise freely through water.
//! - Sand above: slow probabilistic rise, damped by the sand packed around the target.
//! - Diagonal and sideways drift toward other air so pockets coalesce.

use rand::RngCore;

use super::{Behavior, UpdateContext};
use crate::domain::Substance;

/// Rise/drift boost per unit of turbulence and surface tension.
const RISE_TURBULENCE: f32 = 0.03;
const RISE_TENSION: f32 = 0.04;
const DRIFT_TURBULENCE: f32 = 0.03;
const DRIFT_TENSION: f32 = 0.03;
const SIDEWAYS_TURBULENCE: f32 = 0.03;
const SIDEWAYS_TENSION: f32 = 0.02;

pub struct AirBehavior;

impl AirBehavior {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn is_air<R: RngCore>(ctx: &UpdateContext<'_, R>, x: i32, y: i32) -> bool {
        ctx.substance_at(x, y) == Some(Substance::Air)
    }
}

impl Behavior for AirBehavior {
    fn update<R: RngCore>(&self, ctx: &mut UpdateContext<'_, R>) -> bool {
        let xi = ctx.x as i32;
        let yi = ctx.y as i32;
        let rules = ctx.rules;
        let params = ctx.params;
        let up = -ctx.down;
        let ny = yi + up;
        let tension = params.surface_tension;
        let turbulence = params.turbulence;

        // --- Rise ---
        match ctx.substance_at(xi, ny) {
            Some(Substance::Water) => {
                if ctx.move_to(xi, ny) {
                    return true;
                }
            }
            Some(Substance::SandA | Substance::SandB) => {
                let near = [(xi, ny + up), (xi - 1, ny), (xi + 1, ny)]
                    .into_iter()
                    .filter(|&(x, y)| Self::is_air(ctx, x, y))
                    .count() as f32;
                let p = (rules.air_rise_sand
                    + RISE_TURBULENCE * turbulence
                    + RISE_TENSION * tension
                    + rules.air_near_air_bonus * near)
                    * ctx.sand_damping(xi, ny)
                    * rules.air_mobility;
                if ctx.chance(p) && ctx.move_to(xi, ny) {
                    return true;
                }
            }
            _ => {}
        }

        let right_bias = rules.right_bias(params.tilt_degrees, true);

        // --- Diagonal drift ---
        let dir = ctx.pick_side(right_bias);
        for dx in [dir, -dir] {
            let tx = xi + dx;
            let (base, through_sand) = match ctx.substance_at(tx, ny) {
                Some(Substance::Water) => (rules.air_diagonal_water, false),
                Some(Substance::SandA | Substance::SandB) => (rules.air_diagonal_sand, true),
                _ => continue,
            };
            let ahead = Self::is_air(ctx, tx, ny + up) || Self::is_air(ctx, tx + dx, ny);
            let mut p = base + DRIFT_TENSION * tension + DRIFT_TURBULENCE * turbulence;
            if ahead {
                p += rules.air_ahead_bonus;
            }
            if through_sand {
                p *= ctx.sand_damping(tx, ny);
            }
            p *= rules.air_mobility;
            if ctx.chance(p) && ctx.move_to(tx, ny) {
                return true;
            }
        }

        // --- Sideways toward air ---
        let dir = ctx.pick_side(right_bias);
        for dx in [dir, -dir] {
            let sx = xi + dx;
            let (base, through_sand) = match ctx.substance_at(sx, yi) {
                Some(Substance::Water) => (rules.air_lateral_water, false),
                Some(Substance::SandA | Substance::SandB) => (rules.air_lateral_sand, true),
                _ => continue,
            };
            if !Self::is_air(ctx, sx + dx, yi) {
                continue;
            }
            let mut p = base + SIDEWAYS_TENSION * tension + SIDEWAYS_TURBULENCE * turbulence;
            if through_sand {
                p *= ctx.sand_damping(sx, yi);
            }
            p *= rules.air_mobility;
            if ctx.chance(p) && ctx.move_to(sx, yi) {
                return true;
            }
        }

        false
    }
}
