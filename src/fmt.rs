use std::fmt;

use crate::solve::Solution;
use crate::{Move, PuzzleState};

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.cells().len() - 1).to_string().len();
        for row in self.rows() {
            for (cell, col) in row.iter().zip(0..) {
                if col != 0 {
                    " ".fmt(f)?;
                }
                if *cell == 0 {
                    write!(f, "{:>width$}", "_")?;
                } else {
                    write!(f, "{cell:>width$}")?;
                }
            }
            "\n".fmt(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Up => "U".fmt(f),
            Move::Down => "D".fmt(f),
            Move::Left => "L".fmt(f),
            Move::Right => "R".fmt(f),
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Moves: {}", self.move_count())?;
        for mv in &self.moves {
            mv.fmt(f)?;
        }
        "\n".fmt(f)?;
        for state in &self.states {
            "\n".fmt(f)?;
            state.fmt(f)?;
        }
        Ok(())
    }
}
