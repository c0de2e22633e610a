use super::*;

impl Grid {
    /// Cell at validated coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Cell {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, cell: Cell) {
        let idx = self.index(x, y);
        self.cells[idx] = cell;
    }

    /// Cell at signed coordinates, `None` outside the grid.
    #[inline]
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        self.checked_index(x, y).map(|i| self.cells[i])
    }

    #[inline]
    pub fn substance_at(&self, x: i32, y: i32) -> Option<Substance> {
        self.cell_at(x, y).map(|c| c.substance)
    }

    #[inline]
    pub fn is_substance(&self, x: i32, y: i32, substance: Substance) -> bool {
        self.substance_at(x, y) == Some(substance)
    }

    /// Count matching cells in the 8-neighbourhood of `(x, y)`.
    /// Out-of-range neighbours never match.
    #[inline]
    pub fn count_around(&self, x: i32, y: i32, mut pred: impl FnMut(Substance) -> bool) -> u32 {
        let mut n = 0;
        for oy in -1..=1 {
            for ox in -1..=1 {
                if ox == 0 && oy == 0 {
                    continue;
                }
                if let Some(s) = self.substance_at(x + ox, y + oy) {
                    if pred(s) {
                        n += 1;
                    }
                }
            }
        }
        n
    }

    /// Count sand neighbours of `(x, y)`, with out-of-range positions counted as solid wall.
    #[inline]
    pub fn count_solid_around(&self, x: i32, y: i32) -> u32 {
        let mut n = 0;
        for oy in -1..=1 {
            for ox in -1..=1 {
                if ox == 0 && oy == 0 {
                    continue;
                }
                match self.substance_at(x + ox, y + oy) {
                    None => n += 1,
                    Some(s) if s.is_sand() => n += 1,
                    Some(_) => {}
                }
            }
        }
        n
    }
}
