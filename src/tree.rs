//! The search tree. Nodes live in an arena and refer to each other by [`NodeId`], so the
//! parent back-links never own anything.

use std::ops::Index;

use crate::{Move, PuzzleState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub struct SearchNode {
    state: PuzzleState,
    parent: Option<NodeId>,
    via: Option<Move>,
    depth: usize,
    children: Vec<NodeId>,
    expanded: bool,
}

impl SearchNode {
    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The move that turned the parent's state into this one. `None` for the root.
    pub fn via(&self) -> Option<Move> {
        self.via
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_goal(&self, goal: &PuzzleState) -> bool {
        self.state.is_goal(goal)
    }
}

#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl Index<NodeId> for SearchTree {
    type Output = SearchNode;
    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

impl SearchTree {
    pub fn new(root: PuzzleState) -> Self {
        Self {
            nodes: vec![SearchNode {
                state: root,
                parent: None,
                via: None,
                depth: 0,
                children: Vec::new(),
                expanded: false,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    /// All nodes in creation order, which is also breadth-first order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> + '_ {
        self.nodes.iter().zip(0..).map(|(node, id)| (NodeId(id), node))
    }

    pub fn is_goal(&self, id: NodeId, goal: &PuzzleState) -> bool {
        self[id].is_goal(goal)
    }

    /// Creates one child per legal move of `id`'s state and returns them.
    ///
    /// Children are only ever created once; expanding an already expanded node hands back
    /// the existing children.
    pub fn expand(&mut self, id: NodeId) -> &[NodeId] {
        let idx = id.0;
        if !self.nodes[idx].expanded {
            let depth = self.nodes[idx].depth + 1;
            let successors = self.nodes[idx].state.successors().collect::<Vec<_>>();
            let mut children = Vec::with_capacity(successors.len());
            for (mv, state) in successors {
                children.push(NodeId(self.nodes.len()));
                self.nodes.push(SearchNode {
                    state,
                    parent: Some(id),
                    via: Some(mv),
                    depth,
                    children: Vec::new(),
                    expanded: false,
                });
            }
            let node = &mut self.nodes[idx];
            node.children = children;
            node.expanded = true;
        }
        &self.nodes[idx].children
    }

    /// Node ids from the root down to `id`, both inclusive.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = std::iter::successors(Some(id), |&i| self[i].parent).collect::<Vec<_>>();
        path.reverse();
        path
    }
}
