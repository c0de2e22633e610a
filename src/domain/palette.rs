//! Render colors. Stored as RGBA bytes; sand colors are the undarkened base tint.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Substance};

/// Darkening per density level, capped at `MAX_DARKEN`.
const DARKEN_PER_LEVEL: f32 = 0.06;
const MAX_DARKEN: f32 = 0.25;

pub type Rgba = [u8; 4];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub air: Rgba,
    pub water: Rgba,
    pub sand_a: Rgba,
    pub sand_b: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            air: [17, 17, 17, 255],
            water: [58, 112, 168, 128],
            sand_a: [0xc8, 0xb0, 0x4a, 255],
            sand_b: [0x9a, 0x77, 0x45, 255],
        }
    }
}

impl Palette {
    /// Replace both sand base colors from `#rgb` / `#rrggbb` strings.
    pub fn with_sand_hex(self, sand_a: &str, sand_b: &str) -> Result<Self, String> {
        Ok(Palette {
            sand_a: parse_hex(sand_a)?,
            sand_b: parse_hex(sand_b)?,
            ..self
        })
    }

    #[inline]
    pub fn color_of(&self, cell: Cell) -> Rgba {
        match cell.substance {
            Substance::Air => self.air,
            Substance::Water => self.water,
            Substance::SandA => darken(self.sand_a, cell.density),
            Substance::SandB => darken(self.sand_b, cell.density),
        }
    }
}

/// Heavier grains get a slightly darker tint.
#[inline]
pub fn darken(base: Rgba, density: u8) -> Rgba {
    let keep = 1.0 - (DARKEN_PER_LEVEL * density as f32).min(MAX_DARKEN);
    [
        (base[0] as f32 * keep) as u8,
        (base[1] as f32 * keep) as u8,
        (base[2] as f32 * keep) as u8,
        base[3],
    ]
}

/// Pack as ABGR (`0xAABBGGRR`), which lands as `[R, G, B, A]` bytes in
/// little-endian memory and can be copied straight into canvas `ImageData`.
#[inline]
pub fn to_abgr(c: Rgba) -> u32 {
    u32::from_le_bytes(c)
}

pub fn parse_hex(hex: &str) -> Result<Rgba, String> {
    let h = hex.trim().trim_start_matches('#');
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| format!("invalid hex color: {hex}"));
    match h.len() {
        3 => {
            let mut out = [0u8, 0, 0, 255];
            for (i, ch) in h.char_indices() {
                let doubled = format!("{ch}{ch}");
                out[i] = channel(&doubled)?;
            }
            Ok(out)
        }
        6 if h.is_ascii() => Ok([channel(&h[0..2])?, channel(&h[2..4])?, channel(&h[4..6])?, 255]),
        _ => Err(format!("invalid hex color: {hex}")),
    }
}
