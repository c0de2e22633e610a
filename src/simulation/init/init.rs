use rand::{Rng, RngCore};

use crate::domain::cell::clamp_density;
use crate::domain::params::clamp_dimension;
use crate::domain::{Cell, Composition, ParameterSnapshot, Substance, WorldConfig};
use crate::spatial::{Grid, GridBuffers};
use crate::systems::behaviors::BehaviorRegistry;

use super::perf_stats::PerfStats;
use super::SimulationState;

pub(super) fn create_state<R: RngCore>(config: &WorldConfig, rng: R) -> SimulationState<R> {
    let config = config.clone().clamped();
    let mut state = SimulationState {
        buffers: GridBuffers::new(config.width, config.height),
        params: config.parameters,
        rules: config.rules,
        palette: config.palette,
        composition: config.composition,
        behaviors: BehaviorRegistry::new(),
        rng,
        generation: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    };
    populate(state.buffers.current_mut(), &config.composition, config.parameters.density_levels, &mut state.rng);
    log::info!(
        "world created: {}x{}, sand {:.2} water {:.2} air {:.2}",
        config.width,
        config.height,
        config.composition.sand,
        config.composition.water,
        config.composition.air,
    );
    state
}

/// Reallocate both grids and repopulate. Everything is clamped first.
pub(super) fn reset<R: RngCore>(
    state: &mut SimulationState<R>,
    width: u32,
    height: u32,
    composition: Composition,
    parameters: ParameterSnapshot,
) {
    let width = clamp_dimension(width);
    let height = clamp_dimension(height);
    let composition = composition.normalized();
    let parameters = parameters.clamped();

    state.buffers = GridBuffers::new(width, height);
    state.params = parameters;
    state.composition = composition;
    state.generation = 0;
    state.perf_stats.reset();
    populate(state.buffers.current_mut(), &composition, parameters.density_levels, &mut state.rng);

    log::info!(
        "world reset: {}x{}, sand {:.2} water {:.2} air {:.2}, viscosity {:.2} tension {:.2} tilt {} turbulence {:.2} levels {}{}",
        width,
        height,
        composition.sand,
        composition.water,
        composition.air,
        parameters.viscosity,
        parameters.surface_tension,
        parameters.tilt_degrees,
        parameters.turbulence,
        parameters.density_levels,
        if parameters.gravity_inverted { ", gravity inverted" } else { "" },
    );
}

/// One uniform draw per cell: `[0, sand)` is sand, `[sand, sand + water)` water,
/// the rest air. Sand species is a coin flip, density uniform over the levels.
pub(super) fn populate<R: RngCore>(grid: &mut Grid, composition: &Composition, levels: u8, rng: &mut R) {
    let sand_cut = composition.sand;
    let water_cut = composition.sand + composition.water;
    for cell in grid.cells.iter_mut() {
        let r: f32 = rng.gen();
        *cell = if r < sand_cut {
            let species = if rng.gen::<bool>() { Substance::SandA } else { Substance::SandB };
            let density = clamp_density(rng.gen_range(0..levels.max(1)), levels);
            Cell::sand(species, density)
        } else if r < water_cut {
            Cell::WATER
        } else {
            Cell::AIR
        };
    }
}
