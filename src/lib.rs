use std::ops::Index;

use arrayvec::ArrayVec;
use thiserror::Error;

mod fmt;
mod parse;
pub mod solve;
pub mod tree;

pub use parse::Problem;

/// Largest supported grid side. Cells are stored as `u8`.
pub const MAX_DIMENSION: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum InvalidConfig {
    #[error("Puzzle dimension must be positive")]
    ZeroDimension,
    #[error("Puzzle dimension {0} exceeds the maximum of {max}", max = MAX_DIMENSION)]
    DimensionTooLarge(usize),
    #[error("Expecting {expected} cells, got {got}")]
    CellCount { expected: usize, got: usize },
    #[error("Cell value {value} out of range 0..{limit}")]
    CellOutOfRange { value: usize, limit: usize },
    #[error("Duplicate cell value {0}")]
    DuplicateCell(u8),
    #[error("Dimension mismatch: start is {start}x{start}, goal is {goal}x{goal}")]
    DimensionMismatch { start: usize, goal: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("Cannot move the blank {0:?} from {1:?}")]
pub struct IllegalMove(pub Move, pub Vec2);

/// Position on the grid as (row, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vec2(pub u8, pub u8);

/// The direction the blank travels. Sliding the blank up moves the tile above it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up = 0,
    Down,
    Left,
    Right,
}

impl Move {
    /// Expansion order. Decides which of several shortest paths gets reported.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub fn reversed(self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

/// An immutable N×N grid holding a permutation of `0..N²`, with 0 as the blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    dimension: u8,
    blank: Vec2,
    cells: Box<[u8]>,
}

impl Index<Vec2> for PuzzleState {
    type Output = u8;
    fn index(&self, pos: Vec2) -> &Self::Output {
        &self.cells[self.offset(pos)]
    }
}

impl PuzzleState {
    pub fn new(dimension: usize, cells: impl Into<Box<[u8]>>) -> Result<Self, InvalidConfig> {
        let cells = cells.into();
        if dimension == 0 {
            return Err(InvalidConfig::ZeroDimension);
        }
        if dimension > MAX_DIMENSION {
            return Err(InvalidConfig::DimensionTooLarge(dimension));
        }
        let limit = dimension * dimension;
        if cells.len() != limit {
            return Err(InvalidConfig::CellCount {
                expected: limit,
                got: cells.len(),
            });
        }

        let mut seen = vec![false; limit];
        let mut blank = 0;
        for (idx, &value) in cells.iter().enumerate() {
            let slot = seen
                .get_mut(value as usize)
                .ok_or(InvalidConfig::CellOutOfRange {
                    value: value as usize,
                    limit,
                })?;
            if *slot {
                return Err(InvalidConfig::DuplicateCell(value));
            }
            *slot = true;
            if value == 0 {
                blank = idx;
            }
        }

        Ok(Self {
            dimension: dimension as u8,
            blank: Vec2((blank / dimension) as u8, (blank % dimension) as u8),
            cells,
        })
    }

    /// The conventional goal: tiles in row-major order, blank in the bottom-right corner.
    pub fn solved(dimension: usize) -> Result<Self, InvalidConfig> {
        if dimension > MAX_DIMENSION {
            return Err(InvalidConfig::DimensionTooLarge(dimension));
        }
        let limit = dimension * dimension;
        let cells = (1..limit)
            .chain(limit.checked_sub(1).map(|_| 0))
            .map(|v| v as u8)
            .collect::<Vec<_>>();
        Self::new(dimension, cells)
    }

    pub fn dimension(&self) -> usize {
        self.dimension as usize
    }

    /// Row-major cell values.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn blank(&self) -> Vec2 {
        self.blank
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks(self.dimension())
    }

    pub fn is_goal(&self, goal: &PuzzleState) -> bool {
        self == goal
    }

    pub fn legal_moves(&self) -> ArrayVec<Move, 4> {
        Move::ALL
            .into_iter()
            .filter(|&mv| self.sibling_pos(self.blank, mv).is_some())
            .collect()
    }

    /// Returns a new state with the blank slid one cell in `mv`'s direction.
    pub fn apply(&self, mv: Move) -> Result<Self, IllegalMove> {
        let target = self
            .sibling_pos(self.blank, mv)
            .ok_or(IllegalMove(mv, self.blank))?;
        Ok(self.slide_blank_to(target))
    }

    /// Every legal successor in `Move::ALL` order.
    pub fn successors(&self) -> impl Iterator<Item = (Move, Self)> + '_ {
        Move::ALL.into_iter().filter_map(move |mv| {
            let target = self.sibling_pos(self.blank, mv)?;
            Some((mv, self.slide_blank_to(target)))
        })
    }

    fn slide_blank_to(&self, target: Vec2) -> Self {
        let mut cells = self.cells.clone();
        cells.swap(self.offset(self.blank), self.offset(target));
        Self {
            dimension: self.dimension,
            blank: target,
            cells,
        }
    }

    fn offset(&self, pos: Vec2) -> usize {
        pos.0 as usize * self.dimension as usize + pos.1 as usize
    }

    fn sibling_pos(&self, pos: Vec2, mv: Move) -> Option<Vec2> {
        const DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        let x = pos.0.checked_add_signed(DIRECTIONS[mv as usize].0)?;
        let y = pos.1.checked_add_signed(DIRECTIONS[mv as usize].1)?;
        if self.dimension <= x || self.dimension <= y {
            return None;
        }
        Some(Vec2(x, y))
    }
}
