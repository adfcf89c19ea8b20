use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::adjacency::Adjacency;
use crate::algorithms::Algorithm;
use crate::graph::{Graph, NodeId};

use super::{join_labels, Outcome, Progress, Traverse};

/// Breadth-first search with a FIFO queue, neighbors enqueued in ascending id order.
#[derive(Debug, Clone)]
pub struct Bfs {
    graph: Arc<Graph>,
    adjacency: Adjacency,

    queue: VecDeque<NodeId>,
    queued: HashSet<NodeId>,
    parents: HashMap<NodeId, NodeId>,
    current: Option<NodeId>,

    progress: Progress,
}

impl Bfs {
    /// Pending nodes, front first.
    pub fn queue(&self) -> &VecDeque<NodeId> {
        &self.queue
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }
}

impl Traverse for Bfs {
    fn start(graph: Arc<Graph>, start: NodeId) -> Self {
        let adjacency = Adjacency::build(&graph);
        let progress = Progress::new(format!("BFS ready, start at {}", graph.label(start)));

        Self {
            graph,
            adjacency,
            queue: VecDeque::from([start]),
            queued: HashSet::from([start]),
            parents: HashMap::new(),
            current: None,
            progress,
        }
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Bfs
    }

    fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    fn progress(&self) -> &Progress {
        &self.progress
    }

    fn progress_mut(&mut self) -> &mut Progress {
        &mut self.progress
    }

    fn advance(&mut self) -> Outcome {
        let Some(node) = self.queue.pop_front() else {
            self.current = None;
            let message = format!(
                "BFS finished, visited {} of {} nodes",
                self.progress.visited().len(),
                self.graph.node_count()
            );
            return self.progress.finish(message);
        };
        self.queued.remove(&node);

        if self.progress.is_visited(node) {
            self.progress
                .set_message(format!("Skip {}: already visited", self.graph.label(node)));
            return Outcome::Skipped(node);
        }

        self.progress.visit(node);
        self.current = Some(node);
        let via = match self.parents.get(&node) {
            Some(&p) => {
                self.progress.traverse(p, node);
                format!(" from {}", self.graph.label(p))
            }
            None => String::new(),
        };

        let mut enqueued = Vec::new();
        for &next in self.adjacency.neighbors(node) {
            if self.progress.is_visited(next) || self.queued.contains(&next) {
                continue;
            }
            self.queue.push_back(next);
            self.queued.insert(next);
            self.parents.entry(next).or_insert(node);
            enqueued.push(next);
        }

        let enqueued = if enqueued.is_empty() {
            "nothing new to enqueue".to_string()
        } else {
            format!("enqueue {}", join_labels(&self.graph, enqueued))
        };
        self.progress.set_message(format!(
            "Visit {}{via}, {enqueued}",
            self.graph.label(node)
        ));

        Outcome::Visited(node)
    }

    fn pending(&self) -> Vec<NodeId> {
        self.queue.iter().copied().collect()
    }

    fn current(&self) -> Option<NodeId> {
        self.current
    }
}
