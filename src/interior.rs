use crate::{
    config::{Config, Error},
    ring::Ring,
    tile_set::TileSet,
};

/// One straight line through the interior: the ring cells at its two ends and
/// the inner tiles between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub ring: &'static [usize],
    pub inner: &'static [usize],
}

impl Line {
    pub fn sum(&self, ring: &Ring, inner: &[u8]) -> u32 {
        let ends = self.ring.iter().map(|&idx| u32::from(ring[idx]));
        let middle = self.inner.iter().map(|&idx| u32::from(inner[idx]));
        ends.chain(middle).sum()
    }

    /// The values along this line, in the order stored.
    pub fn values(&self, ring: &[u8], inner: &[u8]) -> Vec<u8> {
        self.ring
            .iter()
            .map(|&idx| ring[idx])
            .chain(self.inner.iter().map(|&idx| inner[idx]))
            .collect()
    }
}

/// A cell of the hexagon, addressed by where its value is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Ring(usize),
    Inner(usize),
}

/// Which ring cells and inner tiles make up each interior line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    ring_size: usize,
    inner_count: usize,
    lines: &'static [Line],
    rows: &'static [&'static [Cell]],
}

const ORDER_3_ROWS: &[&[Cell]] = &[
    &[Cell::Ring(0), Cell::Ring(1), Cell::Ring(2)],
    &[Cell::Ring(11), Cell::Inner(0), Cell::Inner(1), Cell::Ring(3)],
    &[Cell::Ring(10), Cell::Inner(2), Cell::Inner(3), Cell::Inner(4), Cell::Ring(4)],
    &[Cell::Ring(9), Cell::Inner(5), Cell::Inner(6), Cell::Ring(5)],
    &[Cell::Ring(8), Cell::Ring(7), Cell::Ring(6)],
];

const ORDER_3_LINE_TABLE: &[Line] = &[
    // rows
    Line { ring: &[11, 3], inner: &[0, 1] },
    Line { ring: &[10, 4], inner: &[2, 3, 4] },
    Line { ring: &[9, 5], inner: &[5, 6] },
    // down and to the left
    Line { ring: &[1, 9], inner: &[0, 2] },
    Line { ring: &[2, 8], inner: &[1, 3, 5] },
    Line { ring: &[3, 7], inner: &[4, 6] },
    // down and to the right
    Line { ring: &[11, 7], inner: &[2, 5] },
    Line { ring: &[0, 6], inner: &[0, 3, 6] },
    Line { ring: &[1, 5], inner: &[1, 4] },
];

impl Layout {
    /// The order-3 hexagon, top edge horizontal, ring read clockwise from the
    /// left corner of the top edge:
    ///
    /// ```text
    ///        r0  r1  r2
    ///      r11 i0  i1  r3
    ///    r10 i2  i3  i4  r4
    ///      r9  i5  i6  r5
    ///        r8  r7  r6
    /// ```
    ///
    /// Checks the three rows and the three lines running down and to the left.
    pub const ORDER_3: Layout = Layout {
        ring_size: 12,
        inner_count: 7,
        lines: ORDER_3_LINE_TABLE.split_at(6).0,
        rows: ORDER_3_ROWS,
    };

    /// As [`ORDER_3`][Self::ORDER_3], also checking the three lines running
    /// down and to the right, so that every line of the hexagon is magic.
    pub const ORDER_3_ALL_LINES: Layout = Layout {
        ring_size: 12,
        inner_count: 7,
        lines: ORDER_3_LINE_TABLE,
        rows: ORDER_3_ROWS,
    };

    pub fn lines(&self) -> &[Line] {
        self.lines
    }

    /// Every cell, row by row from the top, left to right.
    pub fn rows(&self) -> &[&'static [Cell]] {
        self.rows
    }

    pub fn ring_size(&self) -> usize {
        self.ring_size
    }

    pub fn inner_count(&self) -> usize {
        self.inner_count
    }
}

/// The tiles inside the ring, top row first, left to right within each row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerTiles(Vec<u8>);

impl InnerTiles {
    pub fn values(&self) -> &[u8] {
        &self.0
    }

    pub fn top(&self) -> &[u8] {
        &self.0[..2]
    }

    pub fn middle(&self) -> &[u8] {
        &self.0[2..5]
    }

    pub fn bottom(&self) -> &[u8] {
        &self.0[5..]
    }
}

/// Rearrange `values` into the lexicographically next permutation.
///
/// Returns `false`, leaving `values` as they were, if they are already in
/// descending order.
fn next_permutation(values: &mut [u8]) -> bool {
    let Some(pivot) = values.windows(2).rposition(|pair| pair[0] < pair[1]) else {
        return false;
    };
    // something after the pivot is larger than it, or it would not be the pivot
    let successor = values
        .iter()
        .rposition(|&value| value > values[pivot])
        .expect("pivot has a larger successor");
    values.swap(pivot, successor);
    values[pivot + 1..].reverse();
    true
}

/// Completes an edge-valid ring by trying every arrangement of the leftover tiles.
#[derive(Debug, Clone, Copy)]
pub struct InnerTileSolver {
    config: Config,
    layout: Layout,
}

impl InnerTileSolver {
    pub fn new(config: Config, layout: Layout) -> Result<Self, Error> {
        if config.ring_size() != layout.ring_size || config.inner_count() != layout.inner_count {
            return Err(Error::LayoutMismatch {
                expected_ring: layout.ring_size,
                expected_inner: layout.inner_count,
                ring: config.ring_size(),
                inner: config.inner_count(),
            });
        }
        Ok(Self { config, layout })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// `true` when every interior line sums to the magic constant.
    pub fn is_satisfied(&self, ring: &Ring, inner: &[u8]) -> bool {
        inner.len() == self.layout.inner_count
            && self
                .layout
                .lines
                .iter()
                .all(|line| line.sum(ring, inner) == self.config.magic())
    }

    /// Find an arrangement of the tiles missing from `ring` which satisfies
    /// every interior line, or `None` if there is none.
    pub fn solve(&self, ring: &Ring) -> Option<InnerTiles> {
        self.solve_counting(ring, &mut 0)
    }

    /// As [`solve`][Self::solve], adding the number of arrangements tried to `tried`.
    pub fn solve_counting(&self, ring: &Ring, tried: &mut u64) -> Option<InnerTiles> {
        let used: TileSet = ring.values().iter().copied().collect();
        // ascending, so the first arrangement is the smallest permutation
        let mut tiles: Vec<u8> = used.complement(self.config.tile_count()).iter().collect();
        debug_assert_eq!(tiles.len(), self.layout.inner_count);

        loop {
            *tried += 1;
            if self.is_satisfied(ring, &tiles) {
                return Some(InnerTiles(tiles));
            }
            if !next_permutation(&mut tiles) {
                return None;
            }
        }
    }
}

impl Default for InnerTileSolver {
    fn default() -> Self {
        Self {
            config: Config::ORDER_3,
            layout: Layout::ORDER_3,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::ring::RingEnumerator;

    const SOLVED_RING: [u8; 12] = [3, 17, 18, 11, 9, 14, 15, 13, 10, 12, 16, 19];
    const SOLVED_INNER: [u8; 7] = [7, 1, 2, 5, 6, 4, 8];

    fn ring(values: &[u8]) -> Ring {
        RingEnumerator::with_prefix(Config::ORDER_3, values)
            .unwrap()
            .ring()
            .clone()
    }

    #[test]
    fn next_permutation_walks_every_arrangement() {
        let mut values = [1, 2, 3];
        let mut seen = vec![values.to_vec()];
        while next_permutation(&mut values) {
            seen.push(values.to_vec());
        }
        assert_eq!(
            seen,
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1],
            ]
        );
        assert_eq!(values, [3, 2, 1]);
    }

    #[test]
    fn solves_classic_hexagon() {
        let solver = InnerTileSolver::default();
        let inner = solver.solve(&ring(&SOLVED_RING)).unwrap();
        assert_eq!(inner.values(), &SOLVED_INNER);
        assert_eq!(inner.top(), &[7, 1]);
        assert_eq!(inner.middle(), &[2, 5, 6]);
        assert_eq!(inner.bottom(), &[4, 8]);
    }

    #[test]
    fn edge_valid_ring_without_interior() {
        let solver = InnerTileSolver::default();
        let ring = ring(&[3, 16, 19, 4, 15, 9, 14, 11, 13, 7, 18, 17]);
        assert!(ring.is_correct());

        let mut tried = 0;
        assert_eq!(solver.solve_counting(&ring, &mut tried), None);
        assert_eq!(tried, 5040);
    }

    #[test]
    fn satisfaction_check_is_pure() {
        let solver = InnerTileSolver::default();
        let ring = ring(&SOLVED_RING);
        assert!(solver.is_satisfied(&ring, &SOLVED_INNER));
        assert!(solver.is_satisfied(&ring, &SOLVED_INNER));

        let swapped = [1, 7, 2, 5, 6, 4, 8];
        assert!(!solver.is_satisfied(&ring, &swapped));
        assert!(!solver.is_satisfied(&ring, &swapped));
    }

    #[test]
    fn wrong_length_is_never_satisfied() {
        let solver = InnerTileSolver::default();
        assert!(!solver.is_satisfied(&ring(&SOLVED_RING), &SOLVED_INNER[..6]));
    }

    #[test]
    fn every_line_sums_to_38() {
        let ring = ring(&SOLVED_RING);
        for line in Layout::ORDER_3_ALL_LINES.lines() {
            assert_eq!(line.sum(&ring, &SOLVED_INNER), 38, "{line:?}");
        }
    }

    #[rstest]
    #[case(Config::new(7, 6, 12).unwrap())]
    #[case(Config::new(19, 10, 38).unwrap())]
    #[case(Config::new(20, 12, 38).unwrap())]
    fn layout_must_fit_config(#[case] config: Config) {
        assert!(matches!(
            InnerTileSolver::new(config, Layout::ORDER_3),
            Err(Error::LayoutMismatch { .. })
        ));
    }

    #[test]
    fn rows_place_every_cell_once() {
        let mut ring = Vec::new();
        let mut inner = Vec::new();
        for cell in Layout::ORDER_3.rows().iter().flat_map(|row| row.iter()) {
            match *cell {
                Cell::Ring(idx) => ring.push(idx),
                Cell::Inner(idx) => inner.push(idx),
            }
        }
        ring.sort_unstable();
        inner.sort_unstable();
        assert_eq!(ring, (0..12).collect::<Vec<_>>());
        assert_eq!(inner, (0..7).collect::<Vec<_>>());
    }

    #[rstest]
    #[case(Layout::ORDER_3, 6, 2)]
    #[case(Layout::ORDER_3_ALL_LINES, 9, 3)]
    fn every_inner_tile_lies_on_each_direction_once(
        #[case] layout: Layout,
        #[case] lines: usize,
        #[case] per_tile: usize,
    ) {
        assert_eq!(layout.lines().len(), lines);
        let mut counts = [0; 7];
        for line in layout.lines() {
            for &idx in line.inner {
                counts[idx] += 1;
            }
        }
        assert_eq!(counts, [per_tile; 7]);
    }

    #[test]
    fn down_right_lines_are_only_checked_on_request() {
        let ring = ring(&[3, 18, 17, 10, 11, 12, 15, 14, 9, 13, 16, 19]);
        assert!(ring.is_correct());

        let inner = InnerTileSolver::default().solve(&ring).unwrap();
        assert_eq!(inner.values(), &[5, 4, 2, 1, 8, 7, 6]);

        let strict = InnerTileSolver::new(Config::ORDER_3, Layout::ORDER_3_ALL_LINES).unwrap();
        assert!(!strict.is_satisfied(&ring, inner.values()));
        assert_eq!(strict.solve(&ring), None);
    }

    #[test]
    fn all_lines_layout_solves_classic_hexagon() {
        let strict = InnerTileSolver::new(Config::ORDER_3, Layout::ORDER_3_ALL_LINES).unwrap();
        let inner = strict.solve(&ring(&SOLVED_RING)).unwrap();
        assert_eq!(inner.values(), &SOLVED_INNER);
    }
}
