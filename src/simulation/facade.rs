use wasm_bindgen::prelude::*;

use crate::domain::{Cell, Composition, ParameterSnapshot, Substance, WorldConfig};

use super::perf_stats::PerfStats;
use super::{PixelFormat, SimulationState};

#[inline]
fn substance_from_js(id: u8) -> Result<Substance, JsValue> {
    Substance::from_id(id).ok_or_else(|| JsValue::from_str(&format!("unknown substance id {id}")))
}

/// Browser-facing world. Owns the RGBA frame buffer the host copies into a canvas.
#[wasm_bindgen]
pub struct World {
    state: SimulationState,
    /// Settings applied by the next `reset`. Gravity and palette changes apply at once.
    config: WorldConfig,
    pixels: Vec<u8>,
    paused: bool,
}

impl World {
    fn from_state(state: SimulationState, config: WorldConfig) -> Self {
        let mut world = World {
            pixels: Vec::new(),
            state,
            config,
            paused: false,
        };
        world.resize_pixels();
        world.render();
        world
    }

    fn resize_pixels(&mut self) {
        let len = self.state.buffers.current().size() * PixelFormat::Rgba.bytes_per_pixel();
        self.pixels.resize(len, 0);
    }

    fn render(&mut self) {
        let started = PerfStats::start_clock(self.state.perf_enabled);
        self.state.project_to_pixels(&mut self.pixels, PixelFormat::Rgba);
        self.state.perf_stats.finish_render(started);
    }

    fn clamp_coords(&self, x: u32, y: u32) -> (u32, u32) {
        (x.min(self.state.width() - 1), y.min(self.state.height() - 1))
    }

    /// The simulation behind the facade, for native hosts and tests.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }
}

#[wasm_bindgen]
impl World {
    /// Create and populate a world with default composition and parameters
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        let config = WorldConfig { width, height, ..WorldConfig::default() }.clamped();
        Self::from_state(SimulationState::new(&config), config)
    }

    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<World, JsValue> {
        let config = WorldConfig::from_json(json).map_err(|e| JsValue::from_str(&e))?;
        log::info!("config loaded: {}x{}", config.width, config.height);
        Ok(Self::from_state(SimulationState::new(&config), config))
    }

    /// Replace the pending configuration; the world is rebuilt right away.
    pub fn apply_config_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.config = WorldConfig::from_json(json).map_err(|e| JsValue::from_str(&e))?;
        self.reset();
        Ok(())
    }

    pub fn config_json(&self) -> String {
        self.config.to_json()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.state.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.state.height() }

    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u64 { self.state.generation() }

    /// Composition for the next reset, slider style: air stays in its band, sand is the remainder.
    pub fn set_composition_percents(&mut self, water: f32, air: f32) {
        self.config.composition = Composition::from_percents(water, air);
    }

    /// Physical parameters for the next reset.
    pub fn set_parameters(
        &mut self,
        viscosity: f32,
        surface_tension: f32,
        tilt_degrees: f32,
        turbulence: f32,
        density_levels: u8,
    ) {
        self.config.parameters = ParameterSnapshot {
            viscosity,
            surface_tension,
            tilt_degrees,
            turbulence,
            density_levels,
            gravity_inverted: self.state.gravity_inverted(),
        }
        .clamped();
    }

    /// Resize applies on the next reset.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.config = self.config.clone().clamped();
    }

    #[wasm_bindgen(getter)]
    pub fn speed(&self) -> f32 { self.config.speed }

    pub fn set_speed(&mut self, speed: f32) {
        self.config = WorldConfig { speed, ..self.config.clone() }.clamped();
    }

    /// Repopulate from the pending configuration with a fresh random stream.
    pub fn reset(&mut self) {
        self.config.parameters.gravity_inverted = self.state.gravity_inverted();
        let config = self.config.clone();
        self.state.reseed(super::random::entropy_seed());
        self.state.reset_with_config(&config);
        self.resize_pixels();
        self.render();
    }

    /// "Randomize": random composition, physics and sand colors, then reset.
    pub fn randomize(&mut self) {
        self.config = self.config.randomized(&mut self.state.rng);
        self.reset();
    }

    pub fn step(&mut self) {
        self.state.step();
    }

    /// One displayed frame: run `max(1, round(speed))` steps unless paused, then
    /// project into the pixel buffer. Returns the number of steps run.
    pub fn frame(&mut self, speed: f32) -> u32 {
        let steps = if self.paused { 0 } else { self.state.advance(speed) };
        self.render();
        steps
    }

    /// Pointer to the RGBA frame buffer (valid until the next reset)
    pub fn pixels_ptr(&self) -> *const u8 {
        self.pixels.as_ptr()
    }

    pub fn pixels_len(&self) -> usize {
        self.pixels.len()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    #[wasm_bindgen(getter)]
    pub fn paused(&self) -> bool { self.paused }

    /// Flip gravity; returns true when gravity now points up.
    pub fn flip_gravity(&mut self) -> bool {
        let inverted = self.state.toggle_gravity();
        self.config.parameters.gravity_inverted = inverted;
        inverted
    }

    #[wasm_bindgen(getter)]
    pub fn gravity_inverted(&self) -> bool { self.state.gravity_inverted() }

    /// Paint with the default brush for the substance
    pub fn paint(&mut self, x: i32, y: i32, substance: u8) -> Result<(), JsValue> {
        let substance = substance_from_js(substance)?;
        self.state.paint(x, y, super::commands::default_brush_radius(substance), substance);
        Ok(())
    }

    pub fn paint_with_radius(&mut self, x: i32, y: i32, radius: i32, substance: u8) -> Result<(), JsValue> {
        let substance = substance_from_js(substance)?;
        self.state.paint(x, y, radius, substance);
        Ok(())
    }

    /// Packed cell (`type | color << 8 | density << 16`); coordinates are clamped.
    pub fn cell_at(&self, x: u32, y: u32) -> u32 {
        let (x, y) = self.clamp_coords(x, y);
        self.state.cell_at(x, y).to_bits()
    }

    pub fn set_cell_at(&mut self, x: u32, y: u32, substance: u8, density: u8) -> Result<(), JsValue> {
        let substance = substance_from_js(substance)?;
        let (x, y) = self.clamp_coords(x, y);
        self.state.set_cell_at(x, y, substance, density);
        Ok(())
    }

    /// Sand base colors from `#rgb`/`#rrggbb` strings
    pub fn set_sand_colors(&mut self, sand_a: &str, sand_b: &str) -> Result<(), JsValue> {
        let palette = self.state.palette().with_sand_hex(sand_a, sand_b).map_err(|e| {
            log::warn!("palette rejected: {e}");
            JsValue::from_str(&e)
        })?;
        self.state.set_palette(palette);
        self.config.palette = palette;
        self.render();
        Ok(())
    }

    pub fn air_count(&self) -> u32 { self.state.counts().air }

    pub fn sand_a_count(&self) -> u32 { self.state.counts().sand_a }

    pub fn water_count(&self) -> u32 { self.state.counts().water }

    pub fn sand_b_count(&self) -> u32 { self.state.counts().sand_b }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.state.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.state.perf_stats()
    }
}

/// Packed-cell helpers for hosts that decode `cell_at` themselves.
#[wasm_bindgen]
pub fn cell_substance(bits: u32) -> u8 {
    Cell::from_bits(bits).substance.id()
}

#[wasm_bindgen]
pub fn cell_density(bits: u32) -> u8 {
    Cell::from_bits(bits).density
}
