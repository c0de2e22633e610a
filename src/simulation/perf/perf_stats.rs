use wasm_bindgen::prelude::*;

use crate::domain::Substance;

/// Milliseconds on a steady clock: `Date.now()` in the browser, time since the
/// first reading everywhere else. Only differences between readings mean anything.
fn clock_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::sync::OnceLock;
        use std::time::Instant;

        static EPOCH: OnceLock<Instant> = OnceLock::new();
        EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
    }
}

/// Snapshot of the last step (and last render). All zeros while metrics are disabled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) render_ms: f64,
    pub(super) cells_visited: u32,
    pub(super) cells_skipped: u32,
    pub(super) sand_moves: u32,
    pub(super) water_moves: u32,
    pub(super) air_moves: u32,
    pub(super) grid_size: u32,
    pub(super) generation: u64,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }

    /// Start a fresh step snapshot; the render time of the previous frame is kept.
    pub(crate) fn begin_step(&mut self, grid_size: u32) {
        let render_ms = self.render_ms;
        self.reset();
        self.render_ms = render_ms;
        self.grid_size = grid_size;
    }

    /// Clock reading to hand back to `finish_step`/`finish_render`; `None` while disabled.
    #[inline]
    pub(crate) fn start_clock(enabled: bool) -> Option<f64> {
        enabled.then(clock_ms)
    }

    pub(crate) fn finish_step(&mut self, started: Option<f64>, generation: u64) {
        if let Some(t0) = started {
            self.step_ms = clock_ms() - t0;
            self.generation = generation;
        }
    }

    pub(crate) fn finish_render(&mut self, started: Option<f64>) {
        if let Some(t0) = started {
            self.render_ms = clock_ms() - t0;
        }
    }

    #[inline]
    pub(crate) fn record_move(&mut self, substance: Substance) {
        match substance {
            Substance::SandA | Substance::SandB => self.sand_moves += 1,
            Substance::Water => self.water_moves += 1,
            Substance::Air => self.air_moves += 1,
        }
    }

    /// Total exchanges started this step.
    pub fn total_moves(&self) -> u32 {
        self.sand_moves + self.water_moves + self.air_moves
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn render_ms(&self) -> f64 { self.render_ms }
    #[wasm_bindgen(getter)]
    pub fn cells_visited(&self) -> u32 { self.cells_visited }
    #[wasm_bindgen(getter)]
    pub fn cells_skipped(&self) -> u32 { self.cells_skipped }
    #[wasm_bindgen(getter)]
    pub fn sand_moves(&self) -> u32 { self.sand_moves }
    #[wasm_bindgen(getter)]
    pub fn water_moves(&self) -> u32 { self.water_moves }
    #[wasm_bindgen(getter)]
    pub fn air_moves(&self) -> u32 { self.air_moves }
    #[wasm_bindgen(getter)]
    pub fn grid_size(&self) -> u32 { self.grid_size }
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u64 { self.generation }
}
