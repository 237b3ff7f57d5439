use crate::error::{Error, Result};
use crate::proc::Grid;

/// A named seed shape given as live `(row, col)` offsets from its top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
];

impl Pattern {
    /// Bounding box as `(rows, cols)`.
    pub fn extent(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(h, w), &(r, c)| {
            (h.max(r + 1), w.max(c + 1))
        })
    }

    /// Copies the pattern onto `grid` with its top-left corner at `(top, left)`.
    pub fn stamp(&self, grid: &mut Grid, top: usize, left: usize) -> Result<()> {
        let (h, w) = self.extent();
        let fits = matches!(
            (top.checked_add(h), left.checked_add(w)),
            (Some(bottom), Some(right)) if bottom <= grid.rows() && right <= grid.cols()
        );
        if !fits {
            return Err(Error::InvalidArgument {
                reason: format!(
                    "pattern {} ({h}x{w}) does not fit a {}x{} grid at ({top}, {left})",
                    self.name,
                    grid.rows(),
                    grid.cols(),
                ),
            });
        }
        for &(r, c) in self.cells {
            grid.set(top + r, left + c, true);
        }
        Ok(())
    }

    /// Empty `rows x cols` grid with the pattern stamped in the middle.
    pub fn centered(&self, rows: usize, cols: usize) -> Result<Grid> {
        let mut grid = Grid::empty(rows, cols)?;
        let (h, w) = self.extent();
        let top = rows.saturating_sub(h) / 2;
        let left = cols.saturating_sub(w) / 2;
        self.stamp(&mut grid, top, left)?;
        Ok(grid)
    }
}

/// Looks a pattern up by name, ignoring case.
pub fn find(name: &str) -> Result<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::UnknownPattern(name.to_owned()))
}
