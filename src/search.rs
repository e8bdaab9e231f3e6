//! Breadth-first search over boards with a lookahead-driven priority boost.

use log::{debug, info, trace};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::time::{Duration, Instant};

use crate::goal::is_solved;
use crate::lookahead::is_promising;
use crate::puzzle::{Board, Move};

/// Index of a board in a [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    board: Board,
    parent: Option<NodeId>,
    movement: Option<Move>,
}

/// Arena of every board discovered in one run. Nodes are only ever appended,
/// and a parent always has a smaller index than its children.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    pub fn new(root: Board) -> Self {
        Self {
            nodes: vec![Node {
                board: root,
                parent: None,
                movement: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn push(&mut self, board: Board, parent: NodeId, movement: Move) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            board,
            parent: Some(parent),
            movement: Some(movement),
        });
        id
    }

    pub fn board(&self, id: NodeId) -> &Board {
        &self.nodes[id.0].board
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks parent links from `id` back to the root and returns the boards
    /// start first, along with the moves between them.
    pub fn reconstruct(&self, id: NodeId) -> Path {
        let mut boards = Vec::new();
        let mut moves = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id.0];
            boards.push(node.board.clone());
            if let Some(m) = node.movement {
                moves.push(m);
            }
            current = node.parent;
        }
        boards.reverse();
        moves.reverse();
        Path { boards, moves }
    }
}

/// Ordered boards from start to goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub boards: Vec<Board>,
    pub moves: Vec<Move>,
}

impl Path {
    pub fn move_count(&self) -> usize {
        self.boards.len().saturating_sub(1)
    }

    pub fn start(&self) -> &Board {
        &self.boards[0]
    }

    pub fn goal(&self) -> &Board {
        &self.boards[self.boards.len() - 1]
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Enqueue promising boards a second time.
    pub boost: bool,
    /// Give up once more than this many distinct boards have been discovered.
    pub node_limit: Option<usize>,
    /// Give up once the run has taken this long.
    pub deadline: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            boost: true,
            node_limit: None,
            deadline: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: usize,
    pub generated: usize,
    pub boosted: usize,
    pub max_frontier: usize,
    pub elapsed: Duration,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expanded {}, generated {}, boosted {}, max frontier {}, {:.3?}",
            self.expanded, self.generated, self.boosted, self.max_frontier, self.elapsed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustReason {
    FrontierEmpty,
    NodeLimit,
    Deadline,
}

impl fmt::Display for ExhaustReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            ExhaustReason::FrontierEmpty => "frontier exhausted",
            ExhaustReason::NodeLimit => "node limit reached",
            ExhaustReason::Deadline => "deadline passed",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub path: Path,
    pub stats: SearchStats,
}

impl Solution {
    pub fn move_count(&self) -> usize {
        self.path.move_count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exhausted {
    pub reason: ExhaustReason,
    pub stats: SearchStats,
}

/// Result of one search run. Running out of frontier is an ordinary outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Solution),
    Exhausted(Exhausted),
}

impl Outcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            Outcome::Exhausted(_) => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            Outcome::Solved(solution) => &solution.stats,
            Outcome::Exhausted(exhausted) => &exhausted.stats,
        }
    }
}

/// Runs the search from `start` until a solved board is dequeued or the
/// frontier (or a configured limit) runs out.
pub fn solve(start: &Board, config: &SearchConfig) -> Outcome {
    let started = Instant::now();
    debug!("Searching from {:?} with {:?}", start.key(), config);

    let mut tree = SearchTree::new(start.clone());
    let mut queue = VecDeque::from([tree.root()]);
    let mut visited = HashSet::from([start.key()]);
    let mut stats = SearchStats {
        generated: 1,
        max_frontier: 1,
        ..SearchStats::default()
    };

    let reason = loop {
        if let Some(limit) = config.node_limit {
            if tree.len() > limit {
                break ExhaustReason::NodeLimit;
            }
        }
        if let Some(deadline) = config.deadline {
            if started.elapsed() >= deadline {
                break ExhaustReason::Deadline;
            }
        }

        let Some(current) = queue.pop_front() else {
            break ExhaustReason::FrontierEmpty;
        };

        if is_solved(tree.board(current)) {
            stats.elapsed = started.elapsed();
            let path = tree.reconstruct(current);
            debug!("Solved in {} moves ({})", path.move_count(), stats);
            return Outcome::Solved(Solution { path, stats });
        }

        stats.expanded += 1;
        let successors = tree.board(current).successors();
        for (movement, neighbor) in successors {
            if !visited.insert(neighbor.key()) {
                continue;
            }
            let promising = config.boost && is_promising(&neighbor);
            let child = tree.push(neighbor, current, movement);
            stats.generated += 1;
            queue.push_back(child);
            if promising {
                trace!("Boosting {:?}", tree.board(child).key());
                queue.push_back(child);
                stats.boosted += 1;
            }
        }
        stats.max_frontier = stats.max_frontier.max(queue.len());
    };

    stats.elapsed = started.elapsed();
    match reason {
        ExhaustReason::FrontierEmpty => debug!("No solution: {} ({})", reason, stats),
        _ => info!("Search stopped early: {} ({})", reason, stats),
    }
    Outcome::Exhausted(Exhausted { reason, stats })
}
