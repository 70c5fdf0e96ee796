use std::fmt;

use rand::Rng;

use super::Cell;
use crate::error::{EngineError, Result};

/// Grid manages the 2D cellular automaton board.
/// Cells are addressed by `(row, col)` and stored row-major.
/// Edges are hard: everything beyond the border counts as dead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Dead; rows * cols],
        }
    }

    /// Build a grid from a row matrix, which must be exactly `rows x cols`
    pub fn from_matrix(rows: usize, cols: usize, matrix: Vec<Vec<Cell>>) -> Result<Self> {
        if matrix.len() != rows || matrix.iter().any(|line| line.len() != cols) {
            let found_cols = matrix
                .iter()
                .map(Vec::len)
                .find(|&len| len != cols)
                .unwrap_or(cols);
            return Err(EngineError::InvalidDimensions {
                expected: (rows, cols),
                found: (matrix.len(), found_cols),
            });
        }

        Ok(Self {
            rows,
            cols,
            cells: matrix.into_iter().flatten().collect(),
        })
    }

    /// Get grid dimensions as `(rows, cols)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Convert 2D coordinates to 1D index
    const fn get_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Get cell at position (None when off the grid)
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.contains(row, col)
            .then(|| self.cells[self.get_index(row, col)])
    }

    /// Set cell at position. Returns false (and changes nothing) when off the grid.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        if !self.contains(row, col) {
            return false;
        }
        let idx = self.get_index(row, col);
        self.cells[idx] = cell;
        true
    }

    /// Flip a single cell in place and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<Cell> {
        if !self.contains(row, col) {
            return Err(EngineError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let idx = self.get_index(row, col);
        self.cells[idx] = self.cells[idx].toggle();
        Ok(self.cells[idx])
    }

    /// Count live cells in the Moore neighbourhood. Off-grid neighbours are skipped.
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        (-1isize..=1)
            .flat_map(|dr| (-1isize..=1).map(move |dc| (dr, dc)))
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .filter_map(|(dr, dc)| {
                let r = row.checked_add_signed(dr)?;
                let c = col.checked_add_signed(dc)?;
                self.get(r, c)
            })
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    /// Write the next generation into `next`, reading only `self`.
    /// `next` is reshaped if its dimensions differ.
    pub fn evolve_into(&self, next: &mut Grid) {
        if next.dimensions() != self.dimensions() {
            *next = Grid::new(self.rows, self.cols);
        }

        for row in 0..self.rows {
            for col in 0..self.cols {
                let idx = self.get_index(row, col);
                let neighbors = self.count_live_neighbors(row, col);
                next.cells[idx] = self.cells[idx].evolve(neighbors);
            }
        }
    }

    /// Pure functional evolution - returns new grid
    pub fn evolve(&self) -> Self {
        let mut next = Grid::new(self.rows, self.cols);
        self.evolve_into(&mut next);
        next
    }

    /// Clear all cells to dead state
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::Dead);
    }

    /// Make every cell alive independently with probability `density`
    pub fn fill_random<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        self.cells.iter_mut().for_each(|cell| {
            *cell = Cell::from(rng.random::<f64>() < density);
        });
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Borrow a single row
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        (row < self.rows).then(|| &self.cells[row * self.cols..(row + 1) * self.cols])
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &cell)| (idx / self.cols, idx % self.cols, cell))
    }

    /// Copy the grid out as a row matrix
    pub fn to_matrix(&self) -> Vec<Vec<Cell>> {
        (0..self.rows)
            .filter_map(|row| self.row(row).map(<[Cell]>::to_vec))
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = self
                .row(row)
                .unwrap_or_default()
                .iter()
                .map(|cell| if cell.is_alive() { '#' } else { '.' })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
