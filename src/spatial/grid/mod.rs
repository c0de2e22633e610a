//! Grid - flat row-major cell storage
//!
//! One `Vec<Cell>` per generation; `GridBuffers` pairs the current and next
//! generation and tracks which cells already took part in a move this step.

use crate::domain::{Cell, Substance};

mod accessors;
mod buffers;
mod indexing;

pub use buffers::GridBuffers;

/// Per-substance population of a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubstanceCounts {
    pub air: u32,
    pub sand_a: u32,
    pub water: u32,
    pub sand_b: u32,
}

impl SubstanceCounts {
    #[inline]
    pub fn total(&self) -> u32 {
        self.air + self.sand_a + self.water + self.sand_b
    }

    #[inline]
    pub fn get(&self, substance: Substance) -> u32 {
        match substance {
            Substance::Air => self.air,
            Substance::SandA => self.sand_a,
            Substance::Water => self.water,
            Substance::SandB => self.sand_b,
        }
    }
}

pub struct Grid {
    width: u32,
    height: u32,
    size: usize,

    pub cells: Vec<Cell>,
}

impl Grid {
    /// All-air grid.
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            width,
            height,
            size,
            cells: vec![Cell::AIR; size],
        }
    }

    pub fn counts(&self) -> SubstanceCounts {
        let mut counts = SubstanceCounts::default();
        for cell in &self.cells {
            match cell.substance {
                Substance::Air => counts.air += 1,
                Substance::SandA => counts.sand_a += 1,
                Substance::Water => counts.water += 1,
                Substance::SandB => counts.sand_b += 1,
            }
        }
        counts
    }
}
