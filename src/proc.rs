use std::fmt;

use rand::Rng;

use crate::error::{Error, Result};

/// Offsets of the eight cells surrounding a cell.
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Rectangular field of alive/dead cells.
///
/// Dimensions are fixed once built; anything outside them counts as dead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<Vec<bool>>,
}

impl Grid {

    /// All-dead grid.
    pub fn empty(rows: usize, cols: usize) -> Result<Self> {
        check_dims(rows, cols)?;
        Ok(Grid {
            rows,
            cols,
            data: vec![vec![false; cols]; rows],
        })
    }

    /// Grid where every cell is independently alive with `live_probability`.
    ///
    /// Each cell draws a uniform value in `[0, 1)` and lives when the draw is
    /// below the probability, so `0.0` gives an empty grid and `1.0` a full one.
    pub fn random<R: Rng>(
        rows: usize,
        cols: usize,
        live_probability: f64,
        rng: &mut R,
    ) -> Result<Self> {
        check_dims(rows, cols)?;
        check_probability(live_probability)?;

        let data = (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| rng.random::<f64>() < live_probability)
                    .collect()
            })
            .collect();

        Ok(Grid { rows, cols, data })
    }

    /// Builds a grid from explicit rows, which must be non-empty and of equal width.
    pub fn from_rows(data: Vec<Vec<bool>>) -> Result<Self> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        check_dims(rows, cols)?;

        if let Some((row, r)) = data.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(Error::RaggedRows {
                row,
                expected: cols,
                found: r.len(),
            });
        }

        Ok(Grid { rows, cols, data })
    }

    /// Parses a text pattern, one line per row.
    ///
    /// `'0'`, `'.'` and `' '` are dead, anything else is alive. Blank lines are skipped.
    pub fn parse(s: &str) -> Result<Self> {
        let mut data: Vec<Vec<bool>> = vec![];

        for line in s.lines() {
            let r: Vec<bool> = line
                .chars()
                .map(|c| !matches!(c, '0' | '.' | ' '))
                .collect();
            if !r.is_empty() {
                data.push(r);
            }
        }

        Self::from_rows(data)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn cells(&self) -> &[Vec<bool>] {
        &self.data
    }

    /// Cell state, or `None` outside the grid.
    #[inline]
    pub fn get(&self, row: isize, col: isize) -> Option<bool> {
        let r = usize::try_from(row).ok()?;
        let c = usize::try_from(col).ok()?;
        self.data.get(r)?.get(c).copied()
    }

    #[inline]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Sets one cell; coordinates outside the grid are ignored and reported as `false`.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> bool {
        match self.data.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = alive;
                true
            }
            None => false,
        }
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.data.iter().flatten().filter(|c| **c).count()
    }

    /// Live cells among the eight around `(row, col)`; outside cells count as dead.
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let (Ok(r), Ok(c)) = (isize::try_from(row), isize::try_from(col)) else {
            return 0;
        };
        let mut count = 0;
        for (dr, dc) in NEIGHBOR_OFFSETS {
            if self.get(r + dr, c + dc) == Some(true) {
                count += 1;
            }
        }
        count
    }

    /// Next generation. `self` is left untouched.
    pub fn step(&self) -> Grid {
        let data = (0..self.rows)
            .map(|i| {
                (0..self.cols)
                    .map(|j| Self::produce_value(self.data[i][j], self.live_neighbors(i, j)))
                    .collect()
            })
            .collect();

        Grid {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// All-dead grid of the same size.
    pub fn cleared(&self) -> Grid {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: vec![vec![false; self.cols]; self.rows],
        }
    }

    /// Cells as 0/1 rows, the form renderers consume.
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        self.data
            .iter()
            .map(|r| r.iter().map(|c| u8::from(*c)).collect())
            .collect()
    }

    fn produce_value(current: bool, neighbors: u8) -> bool {
        match (current, neighbors) {
            (_, 3) => true,    // birth, or survival with three
            (true, 2) => true, // survival
            _ => false,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, r) in self.data.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, c) in r.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", u8::from(*c))?;
            }
        }
        Ok(())
    }
}

pub(crate) fn check_dims(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidDimension { rows, cols });
    }
    Ok(())
}

pub(crate) fn check_probability(p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::InvalidProbability(p));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn grid(rows: &[&[u8]]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|c| *c == 1).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn blinker_flips() {
        let g = grid(&[&[0, 0, 0], &[1, 1, 1], &[0, 0, 0]]);
        let next = g.step();
        assert_eq!(next.to_matrix(), vec![vec![0, 1, 0], vec![0, 1, 0], vec![0, 1, 0]]);
        assert_eq!(next.step(), g);
    }

    #[test]
    fn single_cell_always_dies() {
        for alive in [false, true] {
            let g = Grid::from_rows(vec![vec![alive]]).unwrap();
            assert_eq!(g.step().to_matrix(), vec![vec![0]]);
        }
    }

    #[test]
    fn step_leaves_input_alone() {
        let mut rng = StdRng::seed_from_u64(7);
        let g = Grid::random(9, 11, 0.4, &mut rng).unwrap();
        let before = g.clone();
        let a = g.step();
        let b = g.step();
        assert_eq!(g, before);
        assert_eq!(a, b);
        assert_eq!(a.dims(), (9, 11));
    }

    #[test]
    fn block_is_still_life() {
        let g = grid(&[&[0, 0, 0, 0], &[0, 1, 1, 0], &[0, 1, 1, 0], &[0, 0, 0, 0]]);
        assert_eq!(g.step(), g);
    }

    #[test]
    fn corners_count_outside_as_dead() {
        let g = grid(&[&[1, 1], &[1, 1]]);
        assert_eq!(g.live_neighbors(0, 0), 3);
        assert_eq!(g.step(), g);

        let row = grid(&[&[1, 1, 1, 1, 1]]);
        assert_eq!(row.live_neighbors(0, 0), 1);
        assert_eq!(row.live_neighbors(0, 2), 2);
        assert_eq!(row.step().to_matrix(), vec![vec![0, 1, 1, 1, 0]]);
    }

    #[test]
    fn overcrowded_cell_dies() {
        let g = grid(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]);
        assert_eq!(
            g.step().to_matrix(),
            vec![vec![1, 0, 1], vec![0, 0, 0], vec![1, 0, 1]]
        );
    }

    #[test]
    fn random_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Grid::random(4, 6, 0.0, &mut rng).unwrap().population(), 0);
        assert_eq!(Grid::random(4, 6, 1.0, &mut rng).unwrap().population(), 24);
    }

    #[test]
    fn random_is_reproducible() {
        let a = Grid::random(8, 8, 0.5, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = Grid::random(8, 8, 0.5, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bad_input() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Grid::empty(0, 3),
            Err(Error::InvalidDimension { rows: 0, cols: 3 })
        );
        assert_eq!(
            Grid::random(3, 0, 0.5, &mut rng),
            Err(Error::InvalidDimension { rows: 3, cols: 0 })
        );
        assert_eq!(
            Grid::random(3, 3, 1.5, &mut rng),
            Err(Error::InvalidProbability(1.5))
        );
        assert!(matches!(
            Grid::random(3, 3, f64::NAN, &mut rng),
            Err(Error::InvalidProbability(_))
        ));
        assert_eq!(
            Grid::from_rows(vec![vec![true, false], vec![true]]),
            Err(Error::RaggedRows { row: 1, expected: 2, found: 1 })
        );
    }

    #[test]
    fn parses_text_pattern() {
        let g = Grid::parse(".#.\n0x0\n\n# #\n").unwrap();
        assert_eq!(
            g.to_matrix(),
            vec![vec![0, 1, 0], vec![0, 1, 0], vec![1, 0, 1]]
        );
        assert!(matches!(Grid::parse("\n\n"), Err(Error::InvalidDimension { .. })));
    }

    #[test]
    fn displays_as_digits() {
        let g = grid(&[&[1, 0], &[0, 1]]);
        assert_eq!(g.to_string(), "1 0\n0 1");
    }

    #[test]
    fn set_and_get() {
        let mut g = Grid::empty(2, 3).unwrap();
        assert!(g.set(1, 2, true));
        assert!(!g.set(2, 0, true));
        assert_eq!(g.get(1, 2), Some(true));
        assert_eq!(g.get(-1, 0), None);
        assert_eq!(g.get(0, 3), None);
        assert!(g.is_alive(1, 2));
        assert_eq!(g.population(), 1);
    }
}
