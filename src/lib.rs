//! Grainfall Engine - falling sand, water and air bubbles in WASM
//!
//! Architecture:
//! - domain/      - Cell encoding, parameters, rule coefficients, palette, config
//! - spatial/     - Grid store and the current/next double buffer
//! - systems/     - Per-substance behaviors
//! - simulation/  - SimulationState orchestration and the wasm facade

pub mod domain;
pub mod logging;
pub mod simulation;
pub mod spatial;
pub mod systems;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    logging::install(log::LevelFilter::Info);
    log::info!("Grainfall engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::{Cell, Composition, Palette, ParameterSnapshot, RuleSet, Substance, WorldConfig};
pub use simulation::{PerfStats, PixelFormat, SimulationState, World};
pub use spatial::grid::SubstanceCounts;

// Substance ids for JS
#[wasm_bindgen]
pub fn substance_air() -> u8 { Substance::Air.id() }
#[wasm_bindgen]
pub fn substance_sand_a() -> u8 { Substance::SandA.id() }
#[wasm_bindgen]
pub fn substance_water() -> u8 { Substance::Water.id() }
#[wasm_bindgen]
pub fn substance_sand_b() -> u8 { Substance::SandB.id() }
