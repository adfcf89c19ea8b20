//! Stepwise traversal state machines.
//!
//! Every algorithm is a state machine started on a shared [`Graph`] and advanced by
//! [`Traverse::step`], one unit of algorithmic work per call. [`Traversal`] is the
//! tagged union the session stores.

mod bfs;
mod dfs;
mod dijkstra;
mod disjoint_set;
mod kruskal;
mod prim;
mod priority;

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::algorithms::Algorithm;
use crate::graph::{Edge, EdgeKey, Graph, NodeId, Weight};
use crate::worklist::{self, Worklist};

pub use self::bfs::Bfs;
pub use self::dfs::Dfs;
pub use self::dijkstra::{Dijkstra, QueueEntry};
pub use self::disjoint_set::DisjointSet;
pub use self::kruskal::Kruskal;
pub use self::prim::Prim;
pub use self::priority::{Prioritized, PriorityList};

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// No traversal was bound to the current graph; a fresh one was started instead.
    Restarted,
    /// DFS/BFS visited a node.
    Visited(NodeId),
    /// DFS/BFS popped a node that was already visited.
    Skipped(NodeId),
    /// Dijkstra finalized the distance of a node.
    Settled(NodeId),
    /// An edge joined the spanning tree.
    Accepted(Edge),
    /// A candidate edge was discarded because it would close a cycle.
    Rejected(Edge),
    /// The worklist ran dry, the traversal is complete now.
    Finished,
    /// Step called on a finished traversal, nothing changed.
    AlreadyFinished,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        matches!(self, Outcome::Finished | Outcome::AlreadyFinished)
    }
}

/// State shared by all algorithms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    visited: BTreeSet<NodeId>,
    traversed: BTreeSet<EdgeKey>,
    tree: Vec<Edge>,
    finished: bool,
    steps: usize,
    message: String,
}

impl Progress {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Visited nodes (settled nodes for Dijkstra, tree nodes for Prim).
    pub fn visited(&self) -> &BTreeSet<NodeId> {
        &self.visited
    }

    pub fn is_visited(&self, id: NodeId) -> bool {
        self.visited.contains(&id)
    }

    /// Edges highlighted as walked.
    pub fn traversed(&self) -> &BTreeSet<EdgeKey> {
        &self.traversed
    }

    pub fn is_traversed(&self, key: EdgeKey) -> bool {
        self.traversed.contains(&key)
    }

    /// Spanning tree edges in acceptance order. Empty for non-MST algorithms.
    pub fn tree_edges(&self) -> &[Edge] {
        &self.tree
    }

    pub fn is_tree_edge(&self, key: EdgeKey) -> bool {
        self.tree.iter().any(|e| e.key() == key)
    }

    pub fn tree_weight(&self) -> Weight {
        self.tree.iter().map(|e| e.weight).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of steps that did work, including skips and the finishing step.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn visit(&mut self, id: NodeId) -> bool {
        self.visited.insert(id)
    }

    pub(crate) fn traverse(&mut self, a: NodeId, b: NodeId) {
        self.traversed.insert(EdgeKey::new(a, b));
    }

    pub(crate) fn add_tree_edge(&mut self, e: Edge) {
        self.traversed.insert(e.key());
        self.tree.push(e);
    }

    pub(crate) fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub(crate) fn finish(&mut self, message: impl Into<String>) -> Outcome {
        self.finished = true;
        self.message = message.into();
        Outcome::Finished
    }
}

/// One algorithm's state machine.
pub trait Traverse {
    /// Creates the initial state on `graph`, starting at `start`.
    fn start(graph: Arc<Graph>, start: NodeId) -> Self
    where
        Self: Sized;

    fn algorithm(&self) -> Algorithm;

    /// Graph the state is bound to.
    fn graph(&self) -> &Arc<Graph>;

    fn progress(&self) -> &Progress;

    fn progress_mut(&mut self) -> &mut Progress;

    /// Performs one unit of work. Never called once the traversal is finished.
    fn advance(&mut self) -> Outcome;

    /// Nodes currently waiting in the worklist.
    fn pending(&self) -> Vec<NodeId>;

    /// Node to highlight as the one just processed.
    fn current(&self) -> Option<NodeId> {
        None
    }

    /// Advances by one unit of work, or reports that there is nothing left to do.
    fn step(&mut self) -> Outcome {
        let algorithm = self.algorithm();
        if self.progress().is_finished() {
            let message = format!("{algorithm} already finished");
            log::debug!("{message}");
            self.progress_mut().set_message(message);
            return Outcome::AlreadyFinished;
        }

        let outcome = self.advance();
        let progress = self.progress_mut();
        progress.steps += 1;
        log::debug!("{algorithm} step {}: {}", progress.steps, progress.message);

        outcome
    }
}

/// Traversal state of the selected algorithm.
#[derive(Debug, Clone)]
pub enum Traversal {
    Dfs(Dfs),
    Bfs(Bfs),
    Dijkstra(Dijkstra),
    Prim(Prim),
    Kruskal(Kruskal),
}

impl Traversal {
    /// Starts `algorithm` on `graph` from node 0.
    pub fn start(algorithm: Algorithm, graph: Arc<Graph>) -> Self {
        Self::start_from(algorithm, graph, 0)
    }

    /// Starts `algorithm` on `graph` from `start`. Unknown start nodes fall back to 0.
    pub fn start_from(algorithm: Algorithm, graph: Arc<Graph>, start: NodeId) -> Self {
        let start = if graph.contains(start) {
            start
        } else {
            log::warn!("start node {start} is not in the graph, starting at 0");
            0
        };
        log::info!(
            "starting {algorithm} at {} on {} nodes / {} edges",
            graph.label(start),
            graph.node_count(),
            graph.edge_count()
        );

        match algorithm {
            Algorithm::Dfs => Traversal::Dfs(Dfs::start(graph, start)),
            Algorithm::Bfs => Traversal::Bfs(Bfs::start(graph, start)),
            Algorithm::Dijkstra => Traversal::Dijkstra(Dijkstra::start(graph, start)),
            Algorithm::Prim => Traversal::Prim(Prim::start(graph, start)),
            Algorithm::Kruskal => Traversal::Kruskal(Kruskal::start(graph, start)),
        }
    }

    fn inner(&self) -> &dyn Traverse {
        match self {
            Traversal::Dfs(t) => t,
            Traversal::Bfs(t) => t,
            Traversal::Dijkstra(t) => t,
            Traversal::Prim(t) => t,
            Traversal::Kruskal(t) => t,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Traverse {
        match self {
            Traversal::Dfs(t) => t,
            Traversal::Bfs(t) => t,
            Traversal::Dijkstra(t) => t,
            Traversal::Prim(t) => t,
            Traversal::Kruskal(t) => t,
        }
    }

    pub fn step(&mut self) -> Outcome {
        self.inner_mut().step()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.inner().algorithm()
    }

    pub fn graph(&self) -> &Arc<Graph> {
        self.inner().graph()
    }

    /// Whether this state was started on exactly this graph instance.
    pub fn is_bound_to(&self, graph: &Arc<Graph>) -> bool {
        Arc::ptr_eq(self.graph(), graph)
    }

    pub fn progress(&self) -> &Progress {
        self.inner().progress()
    }

    pub fn is_finished(&self) -> bool {
        self.progress().is_finished()
    }

    pub fn message(&self) -> &str {
        self.progress().message()
    }

    pub fn current(&self) -> Option<NodeId> {
        self.inner().current()
    }

    pub fn pending(&self) -> Vec<NodeId> {
        self.inner().pending()
    }

    /// Shortest distances, only known to Dijkstra.
    pub fn distances(&self) -> Option<&[Option<Weight>]> {
        match self {
            Traversal::Dijkstra(d) => Some(d.distances()),
            _ => None,
        }
    }

    pub fn worklist(&self) -> Worklist {
        worklist::project(self)
    }

    /// Everything a renderer needs, detached from the live state.
    pub fn snapshot(&self) -> Snapshot {
        let progress = self.progress();
        Snapshot {
            algorithm: self.algorithm(),
            visited: progress.visited().iter().copied().collect(),
            pending: self.pending(),
            current: self.current(),
            traversed: progress.traversed().iter().copied().collect(),
            tree: progress.tree_edges().to_vec(),
            distances: self.distances().map(<[_]>::to_vec).unwrap_or_default(),
            finished: progress.is_finished(),
            steps: progress.steps(),
            message: progress.message().to_string(),
            worklist: self.worklist(),
        }
    }
}

/// Detached, serializable view of a traversal after a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub algorithm: Algorithm,
    pub visited: Vec<NodeId>,
    pub pending: Vec<NodeId>,
    pub current: Option<NodeId>,
    pub traversed: Vec<EdgeKey>,
    pub tree: Vec<Edge>,
    /// Dijkstra only; `None` stands for an infinite distance
    pub distances: Vec<Option<Weight>>,
    pub finished: bool,
    pub steps: usize,
    pub message: String,
    pub worklist: Worklist,
}

impl Snapshot {
    pub fn is_visited(&self, id: NodeId) -> bool {
        self.visited.contains(&id)
    }

    pub fn is_pending(&self, id: NodeId) -> bool {
        self.pending.contains(&id)
    }

    pub fn is_traversed(&self, key: EdgeKey) -> bool {
        self.traversed.contains(&key)
    }

    pub fn is_tree_edge(&self, key: EdgeKey) -> bool {
        self.tree.iter().any(|e| e.key() == key)
    }

    pub fn distance(&self, id: NodeId) -> Option<Weight> {
        self.distances.get(id).copied().flatten()
    }
}

/// Formats a distance, `∞` for unreachable.
pub fn format_distance(d: Option<Weight>) -> String {
    d.map_or_else(|| "∞".to_string(), |d| d.to_string())
}

/// Joins node labels for step messages.
pub(crate) fn join_labels(g: &Graph, ids: impl IntoIterator<Item = NodeId>) -> String {
    ids.into_iter()
        .map(|id| g.label(id))
        .collect::<Vec<_>>()
        .join(", ")
}
