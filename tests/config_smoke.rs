use grainfall_engine::{Composition, ParameterSnapshot, RuleSet, SimulationState, WorldConfig};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn config_json_round_trip_through_a_world() {
    let json = r##"{
        "width": 80,
        "height": 60,
        "composition": { "sand": 0.5, "water": 0.25, "air": 0.25 },
        "parameters": { "viscosity": 0.2, "tilt_degrees": 12, "density_levels": 4 },
        "palette": { "sand_a": [255, 0, 0, 255] },
        "speed": 2
    }"##;
    let config = WorldConfig::from_json(json).expect("config should parse");
    assert_eq!(config.steps_per_frame(), 2);

    let state = SimulationState::with_rng(&config, SmallRng::seed_from_u64(3));
    assert_eq!((state.width(), state.height()), (80, 60));
    assert_eq!(state.parameters().density_levels, 4);
    assert_eq!(state.palette().sand_a, [255, 0, 0, 255]);

    let back = WorldConfig { speed: config.speed, ..state.config() };
    assert_eq!(WorldConfig::from_json(&back.to_json()).unwrap(), config);
}

#[test]
fn malformed_config_is_rejected_with_a_message() {
    let err = WorldConfig::from_json("{ width: ").unwrap_err();
    assert!(!err.is_empty());
    assert!(RuleSet::from_json("[]").is_err());
    assert!(WorldConfig::from_json("[80, 60]").is_err());
}

#[test]
fn out_of_range_config_is_clamped_not_rejected() {
    let config = WorldConfig::from_json(
        r#"{ "width": 0, "composition": { "sand": 3, "water": 3, "air": 3 }, "parameters": { "turbulence": 7 } }"#,
    )
    .unwrap();
    assert_eq!(config.width, 16);
    assert!((config.composition.sand + config.composition.water + config.composition.air - 1.0).abs() < 1e-5);
    assert_eq!(config.parameters.turbulence, 1.0);
}

#[test]
fn randomized_preset_builds_a_valid_world() {
    let mut rng = SmallRng::seed_from_u64(21);
    let base = WorldConfig { width: 32, height: 32, ..WorldConfig::default() };
    for _ in 0..5 {
        let config = base.randomized(&mut rng);
        let mut state = SimulationState::with_rng(&config, SmallRng::seed_from_u64(1));
        let before = state.counts();
        state.advance(2.0);
        assert_eq!(state.counts(), before);
        assert_eq!(state.parameters(), config.parameters);
    }
}

#[test]
fn slider_composition_keeps_air_in_band() {
    let c = Composition::from_percents(70.0, 25.0);
    assert!((c.air - 0.2).abs() < 1e-6);
    assert!((c.sand - 0.1).abs() < 1e-6);
    let p = ParameterSnapshot { tilt_degrees: 100.0, ..Default::default() }.clamped();
    assert_eq!(p.tilt_degrees, 45.0);
}
