use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use console::{style, Key, Term};
use indicatif::{ProgressBar, ProgressStyle};
use npuzzle_bfs::solve::{Bfs, Status, Step};
use npuzzle_bfs::Problem;

enum Action {
    Step,
    Run,
    Exit,
}

impl TryFrom<Key> for Action {
    type Error = ();

    fn try_from(key: Key) -> Result<Self, Self::Error> {
        Ok(match key {
            Key::Enter | Key::Char(' ') | Key::ArrowRight => Self::Step,
            Key::Char('r') => Self::Run,
            Key::Escape | Key::Char('q') => Self::Exit,
            _ => return Err(()),
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut path = None;
    let mut stepwise = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--step" => stepwise = true,
            _ if path.is_none() => path = Some(arg),
            _ => bail!("Unexpected argument: {arg:?}"),
        }
    }
    let path = path.context("Missing problem file argument")?;
    let data = std::fs::read_to_string(path).context("Failed to read the problem")?;
    let problem = data
        .parse::<Problem>()
        .context("Failed to parse the problem")?;
    let mut search = Bfs::new(problem.start, problem.goal).context("Invalid problem")?;

    let inst = Instant::now();
    let status = if stepwise {
        match run_interactive(&mut search)? {
            Some(status) => status,
            None => {
                eprintln!(
                    "Cancelled after {} expansions, {} nodes in the tree",
                    search.expanded_count(),
                    search.tree().len(),
                );
                return Ok(());
            }
        }
    } else {
        run_with_progress(&mut search)?
    };
    report(&search, &status, inst.elapsed());
    Ok(())
}

fn run_with_progress(search: &mut Bfs) -> Result<Status> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template(
        "{spinner} [{elapsed_precise}] {msg}",
    )?);
    pb.enable_steady_tick(Duration::from_millis(100));

    let mut expanded = 0u64;
    let mut created = 0u64;
    let status = search.run(|step| {
        expanded += 1;
        created += step.new_nodes.len() as u64;
        if expanded % 4096 == 0 {
            pb.set_message(format!("{expanded} expanded, {created} nodes"));
        }
    });
    pb.finish_and_clear();
    Ok(status)
}

fn run_interactive(search: &mut Bfs) -> Result<Option<Status>> {
    let term = Term::stderr();
    let tree = search.tree();
    eprintln!("{}", tree[tree.root()].state());
    eprintln!("Enter/Space: step, r: run to completion, q: cancel");

    loop {
        let action = loop {
            if let Ok(action) = Action::try_from(term.read_key()?) {
                break action;
            }
        };

        match action {
            Action::Exit => return Ok(None),
            Action::Run => return Ok(Some(search.run(|_| {}))),
            Action::Step => {
                let step = search.step();
                print_step(search, &step);
                if step.status.is_terminal() {
                    return Ok(Some(step.status));
                }
            }
        }
    }
}

fn print_step(search: &Bfs, step: &Step) {
    let tree = search.tree();
    let Some(expanded) = step.expanded else { return };
    eprintln!(
        "{} node {} at depth {}, frontier {}, visited {}",
        style("Expanded").bold(),
        expanded.0,
        tree[expanded].depth(),
        search.frontier_len(),
        search.visited_len(),
    );
    for &id in &step.new_nodes {
        let node = &tree[id];
        if let Some(mv) = node.via() {
            eprintln!("{mv} -> node {}", id.0);
        }
        eprintln!("{}", node.state());
    }
}

fn report(search: &Bfs, status: &Status, elapsed: Duration) {
    match status {
        Status::Running => {}
        Status::AlreadySolved => {
            eprintln!("{}", style("Start state already matches the goal").yellow())
        }
        Status::Found(_) => eprintln!("{}", style("Solved!").green()),
        Status::Exhausted => eprintln!("{}", style("No solution").red()),
    }
    eprintln!(
        "{:.3} s, {} expanded, {} visited, {} nodes",
        elapsed.as_secs_f64(),
        search.expanded_count(),
        search.visited_len(),
        search.tree().len(),
    );

    let Some(solution) = search.solution() else { return };
    println!("Moves: {}", solution.move_count());
    let moves = solution.moves.iter().map(|mv| mv.to_string()).collect::<String>();
    println!("{moves}\n");
    let last = solution.states.len() - 1;
    for (state, i) in solution.states.iter().zip(0..) {
        if i == 0 {
            println!("{}", style(state).red());
        } else if i == last {
            println!("{}", style(state).green());
        } else {
            println!("{state}");
        }
    }
}
