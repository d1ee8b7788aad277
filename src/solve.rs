use std::collections::VecDeque;

use log::{debug, trace};

use crate::tree::{NodeId, SearchTree};
use crate::{InvalidConfig, Move, PuzzleState};

type IndexSet<K> = indexmap::IndexSet<K, fxhash::FxBuildHasher>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Running,
    /// The start state already equals the goal.
    AlreadySolved,
    /// Node ids from the root to the goal node.
    Found(Vec<NodeId>),
    /// Every reachable state was visited without meeting the goal.
    Exhausted,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// What a single expand step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The node taken off the frontier, or `None` if the search had already terminated.
    pub expanded: Option<NodeId>,
    /// Children created by the expansion, in move order.
    pub new_nodes: Vec<NodeId>,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// States from the start to the goal, both inclusive.
    pub states: Vec<PuzzleState>,
    pub moves: Vec<Move>,
}

impl Solution {
    pub fn move_count(&self) -> usize {
        self.states.len() - 1
    }
}

/// Breadth-first search driven one expansion at a time by the caller.
#[derive(Debug, Clone)]
pub struct Bfs {
    tree: SearchTree,
    goal: PuzzleState,
    frontier: VecDeque<NodeId>,
    visited: IndexSet<PuzzleState>,
    expanded_count: usize,
    path: Option<Vec<NodeId>>,
    status: Status,
}

impl Bfs {
    pub fn new(start: PuzzleState, goal: PuzzleState) -> Result<Self, InvalidConfig> {
        if start.dimension() != goal.dimension() {
            return Err(InvalidConfig::DimensionMismatch {
                start: start.dimension(),
                goal: goal.dimension(),
            });
        }

        let tree = SearchTree::new(start);
        let root = tree.root();
        let mut this = Self {
            tree,
            goal,
            frontier: VecDeque::new(),
            visited: IndexSet::default(),
            expanded_count: 0,
            path: None,
            status: Status::Running,
        };

        if this.tree.is_goal(root, &this.goal) {
            debug!("Start state is already the goal");
            this.path = Some(vec![root]);
            this.status = Status::AlreadySolved;
        } else {
            debug!(
                "Starting BFS on a {0}x{0} puzzle",
                this.goal.dimension()
            );
            this.visited.insert(this.tree[root].state().clone());
            this.frontier.push_back(root);
        }
        Ok(this)
    }

    /// Runs one expand step: pops the oldest frontier node, expands it and enqueues every
    /// child whose state is new. Once the search has terminated this does nothing.
    pub fn step(&mut self) -> Step {
        if self.status.is_terminal() {
            return Step {
                expanded: None,
                new_nodes: Vec::new(),
                status: self.status.clone(),
            };
        }

        #[cfg(feature = "coz")]
        coz::scope!("Expand step");

        let Some(current) = self.frontier.pop_front() else {
            self.status = Status::Exhausted;
            return Step {
                expanded: None,
                new_nodes: Vec::new(),
                status: self.status.clone(),
            };
        };

        self.expanded_count += 1;
        let children = self.tree.expand(current).to_vec();

        let mut goal_node = None;
        for &child in &children {
            if self.tree.is_goal(child, &self.goal) {
                goal_node = Some(child);
                // Nothing else gets enqueued once the goal is known.
                break;
            }
            if self.visited.insert(self.tree[child].state().clone()) {
                self.frontier.push_back(child);
            }
        }

        #[cfg(feature = "coz")]
        coz::progress!("Step");

        trace!(
            "Expanded node {} at depth {}: {} children, frontier {}, visited {}",
            current.0,
            self.tree[current].depth(),
            children.len(),
            self.frontier.len(),
            self.visited.len(),
        );

        if let Some(goal_node) = goal_node {
            let path = self.tree.path_to_root(goal_node);
            debug!(
                "Found goal after {} expansions, {} moves",
                self.expanded_count,
                path.len() - 1
            );
            self.status = Status::Found(path.clone());
            self.path = Some(path);
        } else if self.frontier.is_empty() {
            debug!(
                "Frontier exhausted after visiting {} states",
                self.visited.len()
            );
            self.status = Status::Exhausted;
        }

        Step {
            expanded: Some(current),
            new_nodes: children,
            status: self.status.clone(),
        }
    }

    /// Steps until the search terminates, calling `on_step` after every step.
    pub fn run(&mut self, mut on_step: impl FnMut(&Step)) -> Status {
        loop {
            let step = self.step();
            on_step(&step);
            if step.status.is_terminal() {
                return step.status;
            }
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    pub fn goal(&self) -> &PuzzleState {
        &self.goal
    }

    /// Number of distinct states ever enqueued.
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded_count
    }

    /// Root-to-goal node ids, available once the goal has been reached.
    pub fn path(&self) -> Option<&[NodeId]> {
        self.path.as_deref()
    }

    pub fn solution(&self) -> Option<Solution> {
        let path = self.path.as_ref()?;
        Some(Solution {
            states: path
                .iter()
                .map(|&id| self.tree[id].state().clone())
                .collect(),
            moves: path.iter().filter_map(|&id| self.tree[id].via()).collect(),
        })
    }
}

/// Runs a whole search and returns the shortest solution, or `None` if the goal is
/// unreachable from `start`.
pub fn bfs(
    start: PuzzleState,
    goal: PuzzleState,
    mut on_step: impl FnMut(),
) -> Result<Option<Solution>, InvalidConfig> {
    let mut search = Bfs::new(start, goal)?;
    search.run(|_| on_step());
    Ok(search.solution())
}
