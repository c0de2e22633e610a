use rand::{Rng, RngCore};

use crate::domain::{Cell, Substance};

use super::SimulationState;

pub(super) fn cell_at<R: RngCore>(state: &SimulationState<R>, x: u32, y: u32) -> Cell {
    debug_assert!(
        x < state.width() && y < state.height(),
        "cell_at({x}, {y}) outside {}x{}",
        state.width(),
        state.height()
    );
    state.buffers.current().get(x, y)
}

pub(super) fn set_cell_at<R: RngCore>(state: &mut SimulationState<R>, x: u32, y: u32, substance: Substance, density: u8) {
    debug_assert!(
        x < state.width() && y < state.height(),
        "set_cell_at({x}, {y}) outside {}x{}",
        state.width(),
        state.height()
    );
    let cell = Cell::new(substance, density, state.params.density_levels);
    state.buffers.current_mut().set(x, y, cell);
}

pub(super) fn paint<R: RngCore>(state: &mut SimulationState<R>, cx: i32, cy: i32, radius: i32, substance: Substance) {
    let radius = radius.max(0);
    let r2 = radius * radius;
    let levels = state.params.density_levels.max(1);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let Some(idx) = state.buffers.current().checked_index(cx + dx, cy + dy) else {
                continue;
            };
            let density = if substance.is_sand() { state.rng.gen_range(0..levels) } else { 0 };
            state.buffers.current_mut().cells[idx] = Cell::new(substance, density, levels);
        }
    }
}

pub(super) fn default_brush_radius(substance: Substance) -> i32 {
    if substance.is_sand() { 1 } else { 3 }
}
