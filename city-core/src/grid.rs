/// A dense 2-D field of 8-bit brightness values.
///
/// The grid is the sole rendered output of the simulation: agents and
/// blooms deposit into it, and a renderer reads it back cell by cell.
/// Storage is row-major, allocated once at construction and never
/// resized. All mutation saturates: deposits cap at 255 and decay
/// floors at 0, so every cell stays a valid brightness.
#[derive(Clone, Debug)]
pub struct IntensityGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl IntensityGrid {
    /// Creates an all-zero grid of the given dimensions.
    ///
    /// ### Parameters
    /// - `width` - Number of columns, must be nonzero.
    /// - `height` - Number of rows, must be nonzero.
    ///
    /// ### Panics
    /// Panics if either dimension is zero. Allocation is the only
    /// failure point of the simulation; after construction no grid
    /// operation can fail.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be nonzero");
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major view of all cells, for renderers and tests.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Returns the raw intensity at `(x, y)`.
    ///
    /// ### Panics
    /// Panics if the cell is out of range; callers are expected to stay
    /// within `[0, width) × [0, height)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[self.idx(x, y)]
    }

    /// Adds `amount` to the cell at `(x, y)`, saturating at 255.
    ///
    /// ### Panics
    /// Panics if the cell is out of range.
    #[inline]
    pub fn deposit(&mut self, x: usize, y: usize, amount: u8) {
        let i = self.idx(x, y);
        self.cells[i] = self.cells[i].saturating_add(amount);
    }

    /// Subtracts `amount` from every cell, flooring at 0.
    ///
    /// This is the global fade pass; the engine applies it rarely so
    /// the city stays visually persistent.
    pub fn decay(&mut self, amount: u8) {
        for c in &mut self.cells {
            *c = c.saturating_sub(amount);
        }
    }

    /// Resets every cell to 0.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Deposits a radial glow centered at `(cx, cy)`.
    ///
    /// Every cell within Euclidean distance `radius` of the center
    /// receives `strength − min(strength, d² × 3)`, where `d²` is the
    /// squared distance. The falloff makes the glow center-bright and
    /// edge-soft rather than a hard disc. The one-pixel border of the
    /// grid is never written, and cells outside the grid are skipped,
    /// so the center may lie anywhere (including outside the grid).
    ///
    /// ### Parameters
    /// - `cx`, `cy` - Center cell, in signed coordinates.
    /// - `radius` - Maximum Euclidean reach, in cells.
    /// - `strength` - Peak deposit at the center.
    pub fn bloom(&mut self, cx: i32, cy: i32, radius: i32, strength: u8) {
        let w = self.width as i32;
        let h = self.height as i32;
        let r2 = radius * radius;

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let px = cx + dx;
                let py = cy + dy;
                if px < 1 || px >= w - 1 || py < 1 || py >= h - 1 {
                    continue;
                }

                let d2 = dx * dx + dy * dy;
                if d2 > r2 {
                    continue;
                }

                let falloff = (d2 * 3).min(strength as i32);
                self.deposit(px as usize, py as usize, (strength as i32 - falloff) as u8);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_zero() {
        let g = IntensityGrid::new(16, 9);
        assert_eq!(g.width(), 16);
        assert_eq!(g.height(), 9);
        assert_eq!(g.cells().len(), 16 * 9);
        assert!(g.cells().iter().all(|&c| c == 0));
    }

    #[test]
    #[should_panic]
    fn zero_width_panics() {
        let _ = IntensityGrid::new(0, 9);
    }

    #[test]
    fn deposit_saturates_at_255() {
        let mut g = IntensityGrid::new(8, 8);
        g.deposit(3, 3, 200);
        assert_eq!(g.get(3, 3), 200);

        g.deposit(3, 3, 200);
        assert_eq!(g.get(3, 3), 255);

        // Further deposits stay pinned.
        g.deposit(3, 3, 255);
        assert_eq!(g.get(3, 3), 255);
    }

    #[test]
    fn decay_floors_at_zero() {
        let mut g = IntensityGrid::new(8, 8);
        g.deposit(1, 1, 3);
        g.deposit(2, 2, 100);

        g.decay(5);

        assert_eq!(g.get(1, 1), 0);
        assert_eq!(g.get(2, 2), 95);
        // Untouched cells stay at zero rather than wrapping.
        assert_eq!(g.get(4, 4), 0);
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut g = IntensityGrid::new(8, 8);
        g.bloom(4, 4, 3, 120);
        g.clear();
        assert!(g.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn bloom_peaks_at_center_with_full_strength() {
        let mut g = IntensityGrid::new(64, 64);
        g.bloom(32, 32, 6, 120);
        assert_eq!(g.get(32, 32), 120);
    }

    #[test]
    fn bloom_is_symmetric_under_quarter_rotation() {
        let mut g = IntensityGrid::new(64, 64);
        g.bloom(32, 32, 6, 120);

        for d in 0..=6usize {
            let right = g.get(32 + d, 32);
            assert_eq!(right, g.get(32 - d, 32));
            assert_eq!(right, g.get(32, 32 + d));
            assert_eq!(right, g.get(32, 32 - d));
        }

        // Diagonals match each other as well.
        for d in 0..=4usize {
            let v = g.get(32 + d, 32 + d);
            assert_eq!(v, g.get(32 - d, 32 + d));
            assert_eq!(v, g.get(32 + d, 32 - d));
            assert_eq!(v, g.get(32 - d, 32 - d));
        }
    }

    #[test]
    fn bloom_is_monotone_in_distance_along_axis() {
        let mut g = IntensityGrid::new(64, 64);
        g.bloom(32, 32, 6, 120);

        let mut prev = g.get(32, 32);
        for d in 1..=7usize {
            let v = g.get(32 + d, 32);
            assert!(v <= prev, "intensity rose with distance at d = {}", d);
            prev = v;
        }
    }

    #[test]
    fn bloom_touches_nothing_beyond_radius() {
        let mut g = IntensityGrid::new(64, 64);
        g.bloom(32, 32, 6, 120);

        for y in 0..64i32 {
            for x in 0..64i32 {
                let d2 = (x - 32) * (x - 32) + (y - 32) * (y - 32);
                if d2 > 36 {
                    assert_eq!(g.get(x as usize, y as usize), 0);
                }
            }
        }
    }

    #[test]
    fn bloom_never_writes_the_border() {
        let mut g = IntensityGrid::new(16, 16);
        // Centered on a corner cell: most of the disc is off-grid or on
        // the border and must be skipped without panicking.
        g.bloom(0, 0, 6, 120);

        for i in 0..16usize {
            assert_eq!(g.get(i, 0), 0);
            assert_eq!(g.get(0, i), 0);
            assert_eq!(g.get(i, 15), 0);
            assert_eq!(g.get(15, i), 0);
        }
        // But the interior within reach did receive light.
        assert!(g.get(1, 1) > 0);
    }

    #[test]
    fn overlapping_blooms_saturate() {
        let mut g = IntensityGrid::new(32, 32);
        g.bloom(16, 16, 5, 200);
        g.bloom(16, 16, 5, 200);
        assert_eq!(g.get(16, 16), 255);
    }
}
