//! Behaviors - one rule set per substance
//!
//! Every behavior reads the current generation through `UpdateContext` and expresses
//! motion as an exchange with a neighbour (`move_to`). The double buffer refuses an
//! exchange when either side already moved this generation.

mod air;
mod sand;
mod water;

pub use air::AirBehavior;
pub use sand::SandBehavior;
pub use water::WaterBehavior;

use rand::{Rng, RngCore};

use crate::domain::{Cell, ParameterSnapshot, RuleSet, Substance};
use crate::spatial::{Grid, GridBuffers};

/// Update context passed to behaviors
pub struct UpdateContext<'a, R: RngCore> {
    pub buffers: &'a mut GridBuffers,
    pub params: &'a ParameterSnapshot,
    pub rules: &'a RuleSet,
    pub rng: &'a mut R,
    /// +1 when down is +y, -1 when gravity is inverted. Fixed for the whole step.
    pub down: i32,
    pub x: u32,
    pub y: u32,
}

impl<'a, R: RngCore> UpdateContext<'a, R> {
    /// The generation being read.
    #[inline]
    pub fn grid(&self) -> &Grid {
        self.buffers.current()
    }

    #[inline]
    pub fn here(&self) -> Cell {
        self.grid().get(self.x, self.y)
    }

    #[inline]
    pub fn substance_at(&self, x: i32, y: i32) -> Option<Substance> {
        self.grid().substance_at(x, y)
    }

    /// Bernoulli draw; `p` is clamped to `[0, 1]`. Certain outcomes consume no randomness.
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        if !(p > 0.0) {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.rng.gen::<f32>() < p
    }

    /// +1 (right) with probability `right_bias`, else -1.
    #[inline]
    pub fn pick_side(&mut self, right_bias: f32) -> i32 {
        if self.rng.gen::<f32>() < right_bias { 1 } else { -1 }
    }

    /// Exchange this cell with `(tx, ty)`. Fails outside the grid or when either cell
    /// is already claimed this generation.
    #[inline]
    pub fn move_to(&mut self, tx: i32, ty: i32) -> bool {
        let Some(target) = self.grid().checked_index(tx, ty) else {
            return false;
        };
        let source = self.grid().index(self.x, self.y);
        self.buffers.try_swap(source, target)
    }

    /// Air at `(x, y)` with unclaimed water directly above it. That pair swaps
    /// vertically this generation, so no sideways mover may take the air.
    #[inline]
    pub fn is_rising_air(&self, x: i32, y: i32) -> bool {
        if self.substance_at(x, y) != Some(Substance::Air) {
            return false;
        }
        match self.grid().checked_index(x, y - self.down) {
            Some(above) => self.grid().cells[above].substance == Substance::Water && !self.buffers.is_claimed(above),
            None => false,
        }
    }

    /// Bubble slowdown from sand packed around `(x, y)`.
    #[inline]
    pub fn sand_damping(&self, x: i32, y: i32) -> f32 {
        let sand = self.grid().count_around(x, y, Substance::is_sand) as f32;
        let per = self.rules.sand_damping + self.rules.sand_damping_viscosity * self.params.viscosity;
        (1.0 - per * sand).max(self.rules.sand_damping_floor)
    }

    /// How hard an air pocket at `(x, y)` resists a grain entering it: the more air
    /// around the target, the lower the factor.
    #[inline]
    pub fn bubble_resistance(&self, x: i32, y: i32) -> f32 {
        let air = self.grid().count_around(x, y, Substance::is_air) as f32;
        let per = self.rules.bubble_resistance + self.rules.bubble_resistance_tension * self.params.surface_tension;
        (1.0 - per * air).max(self.rules.bubble_resistance_floor)
    }
}

/// Behavior trait - each substance implements this. Returns `true` when the cell moved.
pub trait Behavior {
    fn update<R: RngCore>(&self, ctx: &mut UpdateContext<'_, R>) -> bool;
}

/// Behavior registry - dispatch by substance
pub struct BehaviorRegistry {
    sand: SandBehavior,
    water: WaterBehavior,
    air: AirBehavior,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self {
            sand: SandBehavior::new(),
            water: WaterBehavior::new(),
            air: AirBehavior::new(),
        }
    }

    #[inline]
    pub fn update<R: RngCore>(&self, substance: Substance, ctx: &mut UpdateContext<'_, R>) -> bool {
        match substance {
            Substance::SandA | Substance::SandB => self.sand.update(ctx),
            Substance::Water => self.water.update(ctx),
            Substance::Air => self.air.update(ctx),
        }
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rand::RngCore;

    /// Random source that always yields zero: every `chance(p)` with `p > 0` succeeds
    /// and `pick_side` always goes right.
    pub struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 { 0 }
        fn next_u64(&mut self) -> u64 { 0 }
        fn fill_bytes(&mut self, dest: &mut [u8]) { dest.fill(0) }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            dest.fill(0);
            Ok(())
        }
    }

    /// Random source that always yields values just below one: no probabilistic
    /// move ever fires and `pick_side` always goes left.
    pub struct MaxRng;

    impl RngCore for MaxRng {
        fn next_u32(&mut self) -> u32 { u32::MAX }
        fn next_u64(&mut self) -> u64 { u64::MAX }
        fn fill_bytes(&mut self, dest: &mut [u8]) { dest.fill(0xFF) }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            dest.fill(0xFF);
            Ok(())
        }
    }

    /// Replays chosen `gen::<f32>()` values in order, then behaves like `MaxRng`.
    pub struct ScriptedRng {
        draws: Vec<u32>,
        next: usize,
    }

    impl ScriptedRng {
        /// Every value must lie in `[0, 1)`.
        pub fn new(values: &[f32]) -> Self {
            // `gen::<f32>()` keeps the top 24 bits of `next_u32`.
            let draws = values.iter().map(|&v| ((v * (1u32 << 24) as f32) as u32) << 8).collect();
            Self { draws, next: 0 }
        }

        pub fn used(&self) -> usize {
            self.next
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            match self.draws.get(self.next) {
                Some(&d) => {
                    self.next += 1;
                    d
                }
                None => u32::MAX,
            }
        }
        fn next_u64(&mut self) -> u64 {
            (u64::from(self.next_u32()) << 32) | u64::from(u32::MAX)
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) { dest.fill(0xFF) }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            dest.fill(0xFF);
            Ok(())
        }
    }
}
