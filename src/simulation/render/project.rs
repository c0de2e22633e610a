#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::palette::to_abgr;
use crate::domain::Palette;
use crate::spatial::Grid;

/// Byte layout of a projected pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba,
    Rgb,
}

impl PixelFormat {
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba => 4,
            PixelFormat::Rgb => 3,
        }
    }
}

/// Projection reads the grid only. Cells past the end of `out` are not written,
/// and neither is the tail of `out` past the last cell.
pub(super) fn project_to_pixels(grid: &Grid, palette: &Palette, out: &mut [u8], format: PixelFormat) {
    let bpp = format.bytes_per_pixel();

    #[cfg(feature = "parallel")]
    {
        out.par_chunks_exact_mut(bpp)
            .zip(grid.cells.par_iter())
            .for_each(|(px, cell)| px.copy_from_slice(&palette.color_of(*cell)[..bpp]));
    }
    #[cfg(not(feature = "parallel"))]
    {
        out.chunks_exact_mut(bpp)
            .zip(grid.cells.iter())
            .for_each(|(px, cell)| px.copy_from_slice(&palette.color_of(*cell)[..bpp]));
    }
}

pub(super) fn project_to_abgr(grid: &Grid, palette: &Palette, out: &mut [u32]) {
    #[cfg(feature = "parallel")]
    {
        out.par_iter_mut()
            .zip(grid.cells.par_iter())
            .for_each(|(px, cell)| *px = to_abgr(palette.color_of(*cell)));
    }
    #[cfg(not(feature = "parallel"))]
    {
        out.iter_mut()
            .zip(grid.cells.iter())
            .for_each(|(px, cell)| *px = to_abgr(palette.color_of(*cell)));
    }
}
