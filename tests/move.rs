use std::fmt::Write;

use anyhow::{ensure, Context};
use common::*;
use npuzzle_bfs::{Move, PuzzleState};

mod common;

fn main() {
    let failed_cnt = run_tests("move", |content| {
        let input = content
            .split_once(SEPARATOR)
            .map_or(content, |(input, _)| input)
            .trim();
        let (actions, grid) = input.split_once('\n').context("No actions")?;
        ensure!(!actions.is_empty(), "No actions");

        let mut state = grid.parse::<PuzzleState>().context("Invalid grid")?;
        let mut got = format!("{input}\n\n{SEPARATOR}");
        for (ch, i) in actions.chars().zip(1..) {
            state = Move::try_from(ch)
                .and_then(|mv| Ok(state.apply(mv)?))
                .with_context(|| format!("Failed to perform step {i} {ch}"))?;
            write!(got, "{state}{SEPARATOR}").unwrap();
        }

        Ok(got)
    });
    finish(failed_cnt);
}
