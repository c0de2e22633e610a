use rand::RngCore;

use crate::domain::config::steps_for_speed;
use crate::systems::behaviors::UpdateContext;

use super::perf_stats::PerfStats;
use super::SimulationState;

/// One generation.
///
/// Rows are visited starting from the one matter falls toward, so a grain that
/// lands is not picked up again further along the same pass. Scan direction
/// alternates per visited row and per generation to cancel left/right drift.
pub(super) fn step<R: RngCore>(state: &mut SimulationState<R>) {
    let perf_on = state.perf_enabled;
    let started = PerfStats::start_clock(perf_on);
    if perf_on {
        state.perf_stats.begin_step(state.buffers.current().size() as u32);
    }

    // Gravity and every coefficient are fixed for the whole pass.
    let params = state.params;
    let down = params.down();
    let width = state.buffers.width();
    let height = state.buffers.height();

    state.buffers.begin_generation();

    for visit in 0..height {
        let y = if down > 0 { height - 1 - visit } else { visit };
        let left_to_right = ((visit as u64).wrapping_add(state.generation) & 1) == 0;

        for i in 0..width {
            let x = if left_to_right { i } else { width - 1 - i };
            let idx = state.buffers.current().index(x, y);
            if state.buffers.is_claimed(idx) {
                if perf_on {
                    state.perf_stats.cells_skipped += 1;
                }
                continue;
            }

            let substance = state.buffers.current().cells[idx].substance;
            let moved = {
                let mut ctx = UpdateContext {
                    buffers: &mut state.buffers,
                    params: &params,
                    rules: &state.rules,
                    rng: &mut state.rng,
                    down,
                    x,
                    y,
                };
                state.behaviors.update(substance, &mut ctx)
            };

            if perf_on {
                state.perf_stats.cells_visited += 1;
                if moved {
                    state.perf_stats.record_move(substance);
                }
            }
        }
    }

    state.buffers.finish_generation();
    state.generation += 1;

    state.perf_stats.finish_step(started, state.generation);
}

pub(super) fn advance<R: RngCore>(state: &mut SimulationState<R>, speed: f32) -> u32 {
    let steps = steps_for_speed(speed);
    for _ in 0..steps {
        step(state);
    }
    steps
}
