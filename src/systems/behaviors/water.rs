//! WaterBehavior - falls, spreads and levels out
//!
//! - Air below: always swap.
//! - Diagonal flow, held back by surface tension when the cell is hemmed in by sand.
//! - Lateral spread: scan sideways through water for the nearest air pocket.
//!   Viscosity shortens the reach, turbulence lengthens it.
//! - Turbulence occasionally sloshes a cell against the spread direction.
//!
//! Air with free water above it is left alone: that pair swaps vertically.

mod scan;

use rand::RngCore;

use super::{Behavior, UpdateContext};
use crate::domain::Substance;

use scan::scan_for_air;

/// Lateral reach in cells at zero viscosity and zero turbulence.
const BASE_SPREAD: f32 = 3.0;

pub struct WaterBehavior;

impl WaterBehavior {
    pub fn new() -> Self {
        Self
    }

    /// `round(3 * (1 - 0.8 v) * (1 + 0.5 t))`, never below one cell.
    #[inline]
    pub(crate) fn spread_range(viscosity: f32, turbulence: f32) -> i32 {
        let range = BASE_SPREAD * (1.0 - 0.8 * viscosity) * (1.0 + 0.5 * turbulence);
        (range.round() as i32).max(1)
    }
}

impl Behavior for WaterBehavior {
    fn update<R: RngCore>(&self, ctx: &mut UpdateContext<'_, R>) -> bool {
        let xi = ctx.x as i32;
        let yi = ctx.y as i32;
        let rules = ctx.rules;
        let params = ctx.params;
        let ty = yi + ctx.down;

        // Fall
        if ctx.substance_at(xi, ty) == Some(Substance::Air) && ctx.move_to(xi, ty) {
            return true;
        }

        let right_bias = rules.right_bias(params.tilt_degrees, false);

        // Diagonal flow
        let dir = ctx.pick_side(right_bias);
        for dx in [dir, -dir] {
            let tx = xi + dx;
            if ctx.substance_at(tx, ty) != Some(Substance::Air) || ctx.is_rising_air(tx, ty) {
                continue;
            }
            // Walls and sand around the landing cell hold the drop back.
            let solid = ctx.grid().count_solid_around(tx, ty) as f32;
            let allow = 1.0 - params.surface_tension * rules.water_tension_per_solid * solid;
            let flows = ctx.chance(allow) || ctx.chance(params.turbulence * rules.water_turbulence_push);
            if flows && ctx.move_to(tx, ty) {
                return true;
            }
        }

        // Lateral spread
        let side = ctx.pick_side(right_bias);
        let range = Self::spread_range(params.viscosity, params.turbulence);
        if let Some(tx) = scan_for_air(ctx, xi, yi, side, range) {
            if ctx.move_to(tx, yi) {
                return true;
            }
        }

        // Slosh
        if ctx.chance(params.turbulence * rules.water_jitter_rate) {
            let sx = xi - side;
            if ctx.substance_at(sx, yi) == Some(Substance::Air) && !ctx.is_rising_air(sx, yi) && ctx.move_to(sx, yi) {
                return true;
            }
        }

        false
    }
}
