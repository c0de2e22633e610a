//! Cell encoding
//!
//! A cell is a tiny value type: substance + reserved palette slot + density level.
//! The packed `u32` form (`type | color << 8 | density << 16`) is what the JS host
//! reads back through `World::cell_at`.

use serde::{Deserialize, Serialize};

/// Upper bound for `ParameterSnapshot::density_levels`
pub const MAX_DENSITY_LEVELS: u8 = 5;

/// The four mutually exclusive states a cell can hold.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Substance {
    #[default]
    Air = 0,
    SandA = 1,
    Water = 2,
    SandB = 3,
}

impl Substance {
    pub const ALL: [Substance; 4] = [Substance::Air, Substance::SandA, Substance::Water, Substance::SandB];

    /// Decode a type byte. Unknown ids decode to `None`.
    #[inline]
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Substance::Air),
            1 => Some(Substance::SandA),
            2 => Some(Substance::Water),
            3 => Some(Substance::SandB),
            _ => None,
        }
    }

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_sand(self) -> bool {
        matches!(self, Substance::SandA | Substance::SandB)
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self == Substance::Air
    }

    #[inline]
    pub fn is_water(self) -> bool {
        self == Substance::Water
    }

    /// Index into per-species rate tables (`[SandA, SandB]`).
    #[inline]
    pub(crate) fn species_slot(self) -> usize {
        match self {
            Substance::SandB => 1,
            _ => 0,
        }
    }
}

/// One grid position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub substance: Substance,
    /// Reserved palette selector, always 0 today.
    pub color_index: u8,
    /// Density level; only meaningful for sand.
    pub density: u8,
}

impl Cell {
    pub const AIR: Cell = Cell { substance: Substance::Air, color_index: 0, density: 0 };
    pub const WATER: Cell = Cell { substance: Substance::Water, color_index: 0, density: 0 };

    /// Build a cell, dropping density for non-sand substances and clamping it
    /// into `[0, levels-1]` for sand.
    #[inline]
    pub fn new(substance: Substance, density: u8, levels: u8) -> Self {
        let density = if substance.is_sand() { clamp_density(density, levels) } else { 0 };
        Cell { substance, color_index: 0, density }
    }

    #[inline]
    pub fn sand(substance: Substance, density: u8) -> Self {
        debug_assert!(substance.is_sand());
        Cell { substance, color_index: 0, density }
    }

    /// Density as seen by the rules for the current level count.
    #[inline]
    pub fn density_for(self, levels: u8) -> u8 {
        if self.substance.is_sand() { clamp_density(self.density, levels) } else { 0 }
    }

    /// Normalized density in `[0, 1]`; a single level counts as fully heavy.
    #[inline]
    pub fn heaviness(self, levels: u8) -> f32 {
        if levels <= 1 {
            return 1.0;
        }
        self.density_for(levels) as f32 / (levels - 1) as f32
    }

    #[inline]
    pub fn to_bits(self) -> u32 {
        ((self.density as u32) << 16) | ((self.color_index as u32) << 8) | self.substance.id() as u32
    }

    /// Decode the packed form. Unknown type bytes decode to air.
    #[inline]
    pub fn from_bits(bits: u32) -> Self {
        let substance = Substance::from_id((bits & 0xFF) as u8).unwrap_or(Substance::Air);
        let color_index = ((bits >> 8) & 0xFF) as u8;
        let density = if substance.is_sand() { ((bits >> 16) & 0xFF) as u8 } else { 0 };
        Cell { substance, color_index, density }
    }
}

#[inline]
pub fn clamp_density(density: u8, levels: u8) -> u8 {
    density.min(levels.clamp(1, MAX_DENSITY_LEVELS) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_layout_matches_host_format() {
        let cell = Cell::sand(Substance::SandB, 2);
        assert_eq!(cell.to_bits(), 0x0002_0003);
        assert_eq!(Cell::from_bits(0x0002_0003), cell);
        assert_eq!(Cell::WATER.to_bits(), 2);
    }

    #[test]
    fn non_sand_density_is_dropped() {
        assert_eq!(Cell::new(Substance::Water, 4, 5).density, 0);
        assert_eq!(Cell::from_bits(0x0004_0002).density, 0);
        assert_eq!(Cell::from_bits(0xFF), Cell::AIR);
    }

    #[test]
    fn density_clamps_to_current_levels() {
        let heavy = Cell::sand(Substance::SandA, 4);
        assert_eq!(heavy.density_for(3), 2);
        assert_eq!(heavy.density_for(1), 0);
        assert_eq!(Cell::new(Substance::SandA, 9, 5).density, 4);
    }

    #[test]
    fn heaviness_is_normalized() {
        assert_eq!(Cell::sand(Substance::SandA, 0).heaviness(1), 1.0);
        assert_eq!(Cell::sand(Substance::SandA, 0).heaviness(3), 0.0);
        assert_eq!(Cell::sand(Substance::SandA, 1).heaviness(3), 0.5);
        assert_eq!(Cell::sand(Substance::SandA, 4).heaviness(3), 1.0);
    }
}
