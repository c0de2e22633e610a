use super::*;

impl Grid {
    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    // === Index conversion ===
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "index: out of bounds ({}, {}) for {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        (y * self.width + x) as usize
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let x = (idx as u32) % self.width;
        let y = (idx as u32) / self.width;
        (x, y)
    }

    // === Bounds checking ===
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Index for signed coordinates, `None` outside the grid (no wraparound).
    #[inline]
    pub fn checked_index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_coords_agree() {
        let grid = Grid::new(16, 20);
        for idx in [0usize, 15, 16, 319] {
            let (x, y) = grid.coords(idx);
            assert_eq!(grid.index(x, y), idx);
        }
    }

    #[test]
    fn edges_do_not_wrap() {
        let grid = Grid::new(16, 16);
        assert_eq!(grid.checked_index(-1, 0), None);
        assert_eq!(grid.checked_index(16, 3), None);
        assert_eq!(grid.checked_index(0, 16), None);
        assert_eq!(grid.checked_index(15, 15), Some(255));
    }
}
