//! SimulationState - the world and everything needed to advance it
//!
//! Orchestration only: population lives in init/, the transition pass in step/,
//! host edits in commands/, pixel projection in render/. Substance rules are in
//! systems/behaviors.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::domain::{Cell, Composition, Palette, ParameterSnapshot, RuleSet, Substance, WorldConfig};
use crate::spatial::grid::SubstanceCounts;
use crate::spatial::GridBuffers;
use crate::systems::behaviors::BehaviorRegistry;

#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/random.rs"]
mod random;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/project.rs"]
mod project;
mod facade;

pub use facade::World;
pub use perf_stats::PerfStats;
pub use project::PixelFormat;

/// The simulated world: double-buffered grid, the physical snapshot, the rule
/// coefficients and the random source that drives every probabilistic move.
pub struct SimulationState<R: RngCore = SmallRng> {
    buffers: GridBuffers,
    params: ParameterSnapshot,
    rules: RuleSet,
    palette: Palette,
    composition: Composition,
    behaviors: BehaviorRegistry,
    rng: R,
    generation: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SimulationState<SmallRng> {
    /// Build and populate a world seeded from system entropy.
    pub fn new(config: &WorldConfig) -> Self {
        Self::with_rng(config, random::entropy_rng())
    }
}

impl<R: RngCore + SeedableRng> SimulationState<R> {
    /// Reallocate and repopulate. Every argument is clamped into range.
    /// With `reseed` a fresh entropy seed replaces the random stream first.
    pub fn reset_world(
        &mut self,
        width: u32,
        height: u32,
        composition: Composition,
        parameters: ParameterSnapshot,
        reseed: bool,
    ) {
        if reseed {
            self.rng = R::seed_from_u64(random::entropy_seed());
        }
        init::reset(self, width, height, composition, parameters);
    }

    /// Restart the random stream from `seed`. The grid is left as it is.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }
}

impl<R: RngCore> SimulationState<R> {
    /// Build and populate a world drawing from `rng`.
    pub fn with_rng(config: &WorldConfig, rng: R) -> Self {
        init::create_state(config, rng)
    }

    /// Apply a whole configuration: rules, palette, dimensions, composition and
    /// parameters. The grid is repopulated.
    pub fn reset_with_config(&mut self, config: &WorldConfig) {
        let config = config.clone().clamped();
        self.rules = config.rules;
        self.palette = config.palette;
        init::reset(self, config.width, config.height, config.composition, config.parameters);
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        step::step(self);
    }

    /// Run `max(1, round(speed))` steps; returns how many ran.
    pub fn advance(&mut self, speed: f32) -> u32 {
        step::advance(self, speed)
    }

    pub fn width(&self) -> u32 { self.buffers.width() }

    pub fn height(&self) -> u32 { self.buffers.height() }

    pub fn generation(&self) -> u64 { self.generation }

    pub fn counts(&self) -> SubstanceCounts {
        self.buffers.current().counts()
    }

    /// Cell at a validated coordinate. Out-of-range coordinates are a caller bug.
    pub fn cell_at(&self, x: u32, y: u32) -> Cell {
        commands::cell_at(self, x, y)
    }

    /// Overwrite one cell. Density is clamped for sand and forced to 0 otherwise.
    pub fn set_cell_at(&mut self, x: u32, y: u32, substance: Substance, density: u8) {
        commands::set_cell_at(self, x, y, substance, density)
    }

    /// Disk brush on the current grid, clipped to the world. Sand gets a random density per cell.
    pub fn paint(&mut self, cx: i32, cy: i32, radius: i32, substance: Substance) {
        commands::paint(self, cx, cy, radius, substance)
    }

    /// Brush radius the host uses when none is given.
    pub fn default_brush_radius(substance: Substance) -> i32 {
        commands::default_brush_radius(substance)
    }

    /// Write one pixel per cell into `out` (row-major). Cells beyond the buffer are skipped.
    pub fn project_to_pixels(&self, out: &mut [u8], format: PixelFormat) {
        project::project_to_pixels(self.buffers.current(), &self.palette, out, format)
    }

    /// Same as `project_to_pixels` but packed as little-endian `u32` (ABGR), ready for `ImageData`.
    pub fn project_to_abgr(&self, out: &mut [u32]) {
        project::project_to_abgr(self.buffers.current(), &self.palette, out)
    }

    pub fn parameters(&self) -> ParameterSnapshot { self.params }

    pub fn composition(&self) -> Composition { self.composition }

    pub fn rules(&self) -> &RuleSet { &self.rules }

    pub fn gravity_inverted(&self) -> bool { self.params.gravity_inverted }

    /// Takes effect at the next step; a running step never sees a change.
    pub fn set_gravity_inverted(&mut self, inverted: bool) {
        settings::set_gravity_inverted(self, inverted);
    }

    /// Flip gravity; returns the new state.
    pub fn toggle_gravity(&mut self) -> bool {
        settings::toggle_gravity(self)
    }

    pub fn palette(&self) -> &Palette { &self.palette }

    pub fn set_palette(&mut self, palette: Palette) {
        settings::set_palette(self, palette);
    }

    /// Current settings as a config document (speed is the host's and stays at its default).
    pub fn config(&self) -> WorldConfig {
        settings::config(self)
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> PerfStats {
        settings::perf_stats(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
