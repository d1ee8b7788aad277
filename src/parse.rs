use std::str::FromStr;

use anyhow::{bail, ensure, Context, Result};

use crate::{InvalidConfig, Move, PuzzleState, MAX_DIMENSION};

/// A start grid and the goal grid to reach from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub start: PuzzleState,
    pub goal: PuzzleState,
}

type Block<'a> = Vec<(usize, &'a str)>;

/// Splits the input into runs of non-empty lines, dropping `#` comments.
fn blocks(s: &str) -> Vec<Block<'_>> {
    let mut blocks: Vec<Block<'_>> = Vec::new();
    let mut in_block = false;
    for (line, no) in s.lines().map(|line| line.trim()).zip(1..) {
        if line.starts_with('#') {
            continue;
        }
        if line.is_empty() {
            in_block = false;
            continue;
        }
        match blocks.last_mut() {
            Some(block) if in_block => block.push((no, line)),
            _ => blocks.push(vec![(no, line)]),
        }
        in_block = true;
    }
    blocks
}

fn parse_grid(rows: &[(usize, &str)]) -> Result<PuzzleState> {
    let dimension = rows.len();
    if dimension > MAX_DIMENSION {
        return Err(InvalidConfig::DimensionTooLarge(dimension).into());
    }
    let mut cells = Vec::with_capacity(dimension * dimension);
    for &(no, line) in rows {
        let before = cells.len();
        for token in line.split_whitespace() {
            let value = match token {
                "_" => 0,
                _ => token
                    .parse::<u8>()
                    .with_context(|| format!("Line {no}: invalid cell {token:?}"))?,
            };
            cells.push(value);
        }
        let width = cells.len() - before;
        ensure!(
            width == dimension,
            "Line {no}: expecting {dimension} cells, got {width}"
        );
    }
    Ok(PuzzleState::new(dimension, cells)?)
}

impl FromStr for PuzzleState {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = blocks(s).concat();
        ensure!(!rows.is_empty(), "Empty grid");
        parse_grid(&rows)
    }
}

impl FromStr for Problem {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut blocks = blocks(s).into_iter();
        let start = parse_grid(&blocks.next().context("Missing start grid")?)
            .context("Invalid start grid")?;
        let goal = match blocks.next() {
            Some(block) => parse_grid(&block).context("Invalid goal grid")?,
            None => PuzzleState::solved(start.dimension())?,
        };
        ensure!(
            blocks.next().is_none(),
            "Unexpected content after the goal grid"
        );
        ensure!(
            start.dimension() == goal.dimension(),
            InvalidConfig::DimensionMismatch {
                start: start.dimension(),
                goal: goal.dimension(),
            }
        );
        Ok(Problem { start, goal })
    }
}

impl TryFrom<char> for Move {
    type Error = anyhow::Error;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        Ok(match ch {
            'U' => Move::Up,
            'D' => Move::Down,
            'L' => Move::Left,
            'R' => Move::Right,
            _ => bail!("Invalid move: {ch:?}"),
        })
    }
}
