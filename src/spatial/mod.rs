//! Spatial storage - the cell grid and the current/next double buffer

pub mod grid;

pub use grid::{Grid, GridBuffers};
