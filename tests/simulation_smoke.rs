use grainfall_engine::{Cell, Composition, ParameterSnapshot, SimulationState, Substance, World, WorldConfig};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn world(width: u32, height: u32, seed: u64) -> SimulationState {
    let config = WorldConfig { width, height, ..WorldConfig::default() };
    SimulationState::with_rng(&config, SmallRng::seed_from_u64(seed))
}

#[test]
fn every_size_steps_safely_and_conserves_counts() {
    for (w, h) in [(16, 16), (17, 16), (16, 33), (31, 47), (64, 20), (1024, 16), (16, 1024)] {
        let mut state = world(w, h, (w * 31 + h) as u64);
        let before = state.counts();
        for _ in 0..4 {
            state.step();
        }
        assert_eq!(state.counts(), before, "{w}x{h}");
        assert_eq!(state.counts().total(), w * h);
    }
}

#[test]
fn inverted_gravity_and_extreme_parameters_conserve_counts() {
    let mut state = world(48, 48, 77);
    for params in [
        ParameterSnapshot { viscosity: 1.0, surface_tension: 1.0, turbulence: 1.0, tilt_degrees: 45.0, density_levels: 5, gravity_inverted: true },
        ParameterSnapshot { viscosity: 0.0, surface_tension: 0.0, turbulence: 0.0, tilt_degrees: -45.0, density_levels: 1, gravity_inverted: false },
    ] {
        state.reset_world(48, 48, Composition::from_percents(45.0, 15.0), params, false);
        let before = state.counts();
        for _ in 0..30 {
            state.step();
        }
        assert_eq!(state.counts(), before);
    }
}

#[test]
fn same_seed_same_next_grid() {
    let mut a = world(40, 30, 5);
    let mut b = world(40, 30, 5);
    for _ in 0..10 {
        a.step();
        b.step();
    }
    for y in 0..30 {
        for x in 0..40 {
            assert_eq!(a.cell_at(x, y), b.cell_at(x, y));
        }
    }
}

#[test]
fn sand_settles_to_the_floor() {
    let mut state = world(16, 16, 9);
    state.reset_world(16, 16, Composition { sand: 0.0, water: 0.0, air: 1.0 }, ParameterSnapshot::default(), false);
    state.set_cell_at(8, 0, Substance::SandA, 0);
    for _ in 0..2000 {
        state.step();
    }
    assert_eq!(state.counts().sand_a, 1);
    let floor = (0..16).any(|x| state.cell_at(x, 15).substance == Substance::SandA);
    assert!(floor, "a lone grain ends up on the bottom row");
}

#[test]
fn facade_paints_and_reports_cells() {
    let mut w = World::new(32, 32);
    w.set_paused(true);
    w.set_cell_at(3, 4, 3, 9).unwrap();
    let bits = w.cell_at(3, 4);
    let cell = Cell::from_bits(bits);
    assert_eq!(cell.substance, Substance::SandB);
    assert!(cell.density < 3);

    // Out-of-range reads clamp to the edge.
    assert_eq!(w.cell_at(500, 500), w.cell_at(31, 31));

    assert_eq!(w.frame(4.0), 0);
    assert_eq!(w.generation(), 0);
    assert!(!w.toggle_pause());
    assert_eq!(w.frame(1.0), 1);

    assert!(w.flip_gravity());
    assert!(w.gravity_inverted());
    assert!(w.config_json().contains("\"gravity_inverted\":true"));
}

#[test]
fn facade_reset_applies_pending_settings() {
    let mut w = World::new(32, 32);
    w.set_size(40, 20);
    w.set_composition_percents(0.0, 20.0);
    w.set_parameters(0.3, 0.3, 0.0, 0.3, 2);
    w.reset();
    assert_eq!((w.width(), w.height()), (40, 20));
    assert_eq!(w.water_count(), 0);
    assert_eq!(w.air_count() + w.sand_a_count() + w.sand_b_count(), 800);
    assert_eq!(w.pixels_len(), 40 * 20 * 4);

    w.randomize();
    assert_eq!((w.width(), w.height()), (40, 20));
    assert_eq!(w.state().counts().total(), 800);
}

#[test]
fn facade_sand_colors_accept_short_and_long_hex() {
    let mut w = World::new(16, 16);
    w.set_sand_colors("#fa0", "#102030").unwrap();
    assert_eq!(w.state().palette().sand_a, [0xff, 0xaa, 0x00, 255]);
    assert_eq!(w.state().palette().sand_b, [0x10, 0x20, 0x30, 255]);
}
