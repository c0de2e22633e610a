use rand::RngCore;

use crate::domain::Substance;

use super::super::UpdateContext;

/// Walk sideways from `(start_x, y)` in `dir` for up to `range` cells.
///
/// Water is passed through, the first free air cell is the answer. Sand, the grid
/// edge, an air cell that already moved this generation or one about to rise
/// through the water above it end the scan.
#[inline]
pub(super) fn scan_for_air<R: RngCore>(
    ctx: &UpdateContext<'_, R>,
    start_x: i32,
    y: i32,
    dir: i32,
    range: i32,
) -> Option<i32> {
    for i in 1..=range {
        let tx = start_x + dir * i;
        let idx = ctx.grid().checked_index(tx, y)?;
        match ctx.grid().cells[idx].substance {
            Substance::Water => continue,
            Substance::Air => {
                if ctx.buffers.is_claimed(idx) || ctx.is_rising_air(tx, y) {
                    return None;
                }
                return Some(tx);
            }
            Substance::SandA | Substance::SandB => return None,
        }
    }
    None
}
