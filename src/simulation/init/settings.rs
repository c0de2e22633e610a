use rand::RngCore;

use crate::domain::{Palette, WorldConfig};

use super::perf_stats::PerfStats;
use super::SimulationState;

pub(super) fn enable_perf_metrics<R: RngCore>(state: &mut SimulationState<R>, enabled: bool) {
    state.perf_enabled = enabled;
    if !enabled {
        state.perf_stats.reset();
    }
}

pub(super) fn perf_stats<R: RngCore>(state: &SimulationState<R>) -> PerfStats {
    state.perf_stats.clone()
}

pub(super) fn set_gravity_inverted<R: RngCore>(state: &mut SimulationState<R>, inverted: bool) {
    if state.params.gravity_inverted != inverted {
        log::debug!("gravity {}", if inverted { "inverted" } else { "restored" });
    }
    state.params.gravity_inverted = inverted;
}

pub(super) fn toggle_gravity<R: RngCore>(state: &mut SimulationState<R>) -> bool {
    let inverted = !state.params.gravity_inverted;
    set_gravity_inverted(state, inverted);
    inverted
}

pub(super) fn set_palette<R: RngCore>(state: &mut SimulationState<R>, palette: Palette) {
    state.palette = palette;
}

pub(super) fn config<R: RngCore>(state: &SimulationState<R>) -> WorldConfig {
    WorldConfig {
        width: state.width(),
        height: state.height(),
        composition: state.composition,
        parameters: state.params,
        rules: state.rules.clone(),
        palette: state.palette,
        ..WorldConfig::default()
    }
}
