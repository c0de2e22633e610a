use super::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Current + next generation.
///
/// During a step the rules read `current` only and write `next` only. Every move is
/// an exchange of two cells; both take a claim for the rest of the generation, so a
/// cell never moves twice and never receives two grains. That keeps per-substance
/// counts exact.
pub struct GridBuffers {
    current: Grid,
    next: Grid,
    claimed: Vec<u8>,
}

impl GridBuffers {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            current: Grid::new(width, height),
            next: Grid::new(width, height),
            claimed: vec![0; (width * height) as usize],
        }
    }

    #[inline]
    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// Direct access for painting and host writes. Never used while a step is running.
    #[inline]
    pub fn current_mut(&mut self) -> &mut Grid {
        &mut self.current
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.current.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.current.height()
    }

    /// Seed `next` from `current` and drop all claims.
    pub fn begin_generation(&mut self) {
        self.next.cells.copy_from_slice(&self.current.cells);
        #[cfg(feature = "parallel")]
        {
            self.claimed.par_iter_mut().for_each(|v| *v = 0);
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.claimed.fill(0);
        }
    }

    #[inline]
    pub fn is_claimed(&self, idx: usize) -> bool {
        self.claimed[idx] != 0
    }

    /// Exchange the current contents of `a` and `b` into `next`.
    /// Returns `false` (and writes nothing) when either cell already moved this generation.
    #[inline]
    pub fn try_swap(&mut self, a: usize, b: usize) -> bool {
        debug_assert_ne!(a, b, "try_swap: a cell cannot swap with itself");
        if self.claimed[a] != 0 || self.claimed[b] != 0 {
            return false;
        }
        self.next.cells[a] = self.current.cells[b];
        self.next.cells[b] = self.current.cells[a];
        self.claimed[a] = 1;
        self.claimed[b] = 1;
        true
    }

    /// Publish `next` as the new current generation. Constant time.
    #[inline]
    pub fn finish_generation(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_writes_next_and_claims_both_cells() {
        let mut buffers = GridBuffers::new(16, 16);
        buffers.current_mut().set(3, 3, Cell::WATER);
        buffers.begin_generation();

        let a = buffers.current().index(3, 3);
        let b = buffers.current().index(3, 4);
        let c = buffers.current().index(4, 4);
        assert!(buffers.try_swap(a, b));
        assert!(!buffers.try_swap(b, c));
        assert!(buffers.is_claimed(a) && buffers.is_claimed(b) && !buffers.is_claimed(c));

        // Current is untouched until the generation is published.
        assert_eq!(buffers.current().get(3, 3), Cell::WATER);
        buffers.finish_generation();
        assert_eq!(buffers.current().get(3, 3), Cell::AIR);
        assert_eq!(buffers.current().get(3, 4), Cell::WATER);
    }

    #[test]
    fn new_generation_clears_claims() {
        let mut buffers = GridBuffers::new(16, 16);
        buffers.begin_generation();
        assert!(buffers.try_swap(0, 1));
        buffers.finish_generation();
        buffers.begin_generation();
        assert!(!buffers.is_claimed(0));
        assert!(buffers.try_swap(0, 1));
    }
}
