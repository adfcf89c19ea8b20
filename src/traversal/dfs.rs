use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::adjacency::Adjacency;
use crate::algorithms::Algorithm;
use crate::graph::{Graph, NodeId};

use super::{join_labels, Outcome, Progress, Traverse};

/// Depth-first search with an explicit stack.
///
/// Neighbors are pushed in descending id order so they pop in ascending order.
/// A node is never pushed while it is already pending; the visited check on pop
/// still tolerates stale entries.
#[derive(Debug, Clone)]
pub struct Dfs {
    graph: Arc<Graph>,
    adjacency: Adjacency,

    /// Last element is the top
    stack: Vec<NodeId>,
    on_stack: HashSet<NodeId>,
    /// Child -> parent that first discovered it
    parents: HashMap<NodeId, NodeId>,
    current: Option<NodeId>,

    progress: Progress,
}

impl Dfs {
    /// Pending nodes, bottom first.
    pub fn stack(&self) -> &[NodeId] {
        &self.stack
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }
}

impl Traverse for Dfs {
    fn start(graph: Arc<Graph>, start: NodeId) -> Self {
        let adjacency = Adjacency::build(&graph);
        let progress = Progress::new(format!("DFS ready, start at {}", graph.label(start)));

        Self {
            graph,
            adjacency,
            stack: vec![start],
            on_stack: HashSet::from([start]),
            parents: HashMap::new(),
            current: None,
            progress,
        }
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Dfs
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
        let Some(node) = self.stack.pop() else {
            self.current = None;
            let message = format!(
                "DFS finished, visited {} of {} nodes",
                self.progress.visited().len(),
                self.graph.node_count()
            );
            return self.progress.finish(message);
        };
        self.on_stack.remove(&node);

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

        let mut pushed = Vec::new();
        for &next in self.adjacency.neighbors(node).iter().rev() {
            if self.progress.is_visited(next) || self.on_stack.contains(&next) {
                continue;
            }
            self.stack.push(next);
            self.on_stack.insert(next);
            self.parents.entry(next).or_insert(node);
            pushed.push(next);
        }

        let pushed = if pushed.is_empty() {
            "nothing new to push".to_string()
        } else {
            format!("push {}", join_labels(&self.graph, pushed))
        };
        self.progress.set_message(format!(
            "Visit {}{via}, {pushed}",
            self.graph.label(node)
        ));

        Outcome::Visited(node)
    }

    fn pending(&self) -> Vec<NodeId> {
        self.stack.clone()
    }

    fn current(&self) -> Option<NodeId> {
        self.current
    }
}
