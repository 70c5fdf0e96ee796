use super::{Cell, Grid};
use crate::error::EngineError;

/// Represents a pattern that can be placed on the grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    /// Relative `(row, col)` offsets of alive cells
    pub cells: &'static [(usize, usize)],
    /// Fixed placement offset added to every cell
    pub origin: (usize, usize),
}

impl Pattern {
    /// Columns spanned by the pattern's cells
    pub fn width(&self) -> usize {
        self.cells.iter().map(|&(_, c)| c).max().map_or(0, |c| c.saturating_add(1))
    }

    /// Rows spanned by the pattern's cells
    pub fn height(&self) -> usize {
        self.cells.iter().map(|&(r, _)| r).max().map_or(0, |r| r.saturating_add(1))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Place pattern on grid at its origin.
    /// Cells falling outside the grid are clipped; returns how many landed.
    pub fn place_on(&self, grid: &mut Grid) -> usize {
        let (origin_row, origin_col) = self.origin;
        self.cells
            .iter()
            .filter(|&&(r, c)| {
                origin_row
                    .checked_add(r)
                    .zip(origin_col.checked_add(c))
                    .is_some_and(|(row, col)| grid.set(row, col, Cell::Alive))
            })
            .count()
    }
}

/// Menu identifiers for the pattern catalogue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternId {
    /// Leaves the grid untouched
    None = 0,
    GliderGun = 1,
    Pulsar = 2,
    Glider = 3,
    Spaceship = 4,
}

impl PatternId {
    /// Every real pattern, in menu order
    pub const ALL: [PatternId; 4] = [
        PatternId::GliderGun,
        PatternId::Pulsar,
        PatternId::Glider,
        PatternId::Spaceship,
    ];

    pub fn pattern(self) -> Option<&'static Pattern> {
        match self {
            PatternId::None => None,
            PatternId::GliderGun => Some(&presets::GLIDER_GUN),
            PatternId::Pulsar => Some(&presets::PULSAR),
            PatternId::Glider => Some(&presets::GLIDER),
            PatternId::Spaceship => Some(&presets::SPACESHIP),
        }
    }
}

impl TryFrom<u32> for PatternId {
    type Error = EngineError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(PatternId::None),
            1 => Ok(PatternId::GliderGun),
            2 => Ok(PatternId::Pulsar),
            3 => Ok(PatternId::Glider),
            4 => Ok(PatternId::Spaceship),
            other => Err(EngineError::UnknownPattern(other)),
        }
    }
}

/// Classic Game of Life patterns library
pub mod presets {
    use super::Pattern;

    /// Gosper Glider Gun - produces gliders indefinitely
    pub const GLIDER_GUN: Pattern = Pattern {
        name: "Glider Gun",
        description: "Produces gliders (period 30)",
        cells: &[
            // Left square
            (5, 1), (5, 2), (6, 1), (6, 2),
            // Left circle
            (5, 11), (6, 11), (7, 11), (4, 12), (8, 12), (3, 13), (9, 13),
            (3, 14), (9, 14), (6, 15), (4, 16), (8, 16), (5, 17), (6, 17),
            (7, 17), (6, 18),
            // Middle pieces
            (3, 21), (4, 21), (5, 21), (3, 22), (4, 22), (5, 22),
            (2, 23), (6, 23), (1, 25), (2, 25), (6, 25), (7, 25),
            // Right square
            (3, 35), (4, 35), (3, 36), (4, 36),
        ],
        origin: (0, 0),
    };

    /// Pulsar - period 3 oscillator
    pub const PULSAR: Pattern = Pattern {
        name: "Pulsar",
        description: "Oscillator (period 3)",
        cells: &[
            (2, 4), (2, 5), (2, 6), (2, 10), (2, 11), (2, 12),
            (4, 2), (5, 2), (6, 2), (4, 7), (5, 7), (6, 7),
            (4, 9), (5, 9), (6, 9), (4, 14), (5, 14), (6, 14),
            (7, 4), (7, 5), (7, 6), (7, 10), (7, 11), (7, 12),
            (9, 4), (9, 5), (9, 6), (9, 10), (9, 11), (9, 12),
            (10, 2), (11, 2), (12, 2), (10, 7), (11, 7), (12, 7),
            (10, 9), (11, 9), (12, 9), (10, 14), (11, 14), (12, 14),
            (14, 4), (14, 5), (14, 6), (14, 10), (14, 11), (14, 12),
        ],
        origin: (0, 0),
    };

    /// Glider - simplest spaceship, moves diagonally
    pub const GLIDER: Pattern = Pattern {
        name: "Glider",
        description: "Moves diagonally (period 4)",
        cells: &[(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)],
        origin: (0, 0),
    };

    /// Lightweight Spaceship (LWSS)
    pub const SPACESHIP: Pattern = Pattern {
        name: "Spaceship",
        description: "Lightweight spaceship (period 4)",
        cells: &[
            (0, 1), (0, 4),
            (1, 0),
            (2, 0), (2, 4),
            (3, 0), (3, 1), (3, 2), (3, 3),
        ],
        origin: (5, 5),
    };

    /// Get all available patterns, in menu order
    pub fn all_patterns() -> [&'static Pattern; 4] {
        [&GLIDER_GUN, &PULSAR, &GLIDER, &SPACESHIP]
    }
}
