//! Domain types - what a cell is and which knobs shape its behavior

pub mod cell;
pub mod config;
pub mod palette;
pub mod params;
pub mod rules;

pub use cell::{Cell, Substance, MAX_DENSITY_LEVELS};
pub use config::WorldConfig;
pub use palette::Palette;
pub use params::{Composition, ParameterSnapshot};
pub use rules::RuleSet;
