use std::collections::VecDeque;
use std::sync::Arc;

use crate::algorithms::Algorithm;
use crate::graph::{Edge, Graph, NodeId, Weight};

use super::disjoint_set::DisjointSet;
use super::{Outcome, Progress, Traverse};

/// Kruskal's minimum spanning tree over all edges sorted by weight.
///
/// The sort is stable so equal weights keep the graph's edge order.
#[derive(Debug, Clone)]
pub struct Kruskal {
    graph: Arc<Graph>,

    remaining: VecDeque<Edge>,
    sets: DisjointSet,

    progress: Progress,
}

impl Kruskal {
    /// Edges not examined yet, cheapest first.
    pub fn remaining(&self) -> &VecDeque<Edge> {
        &self.remaining
    }

    pub fn sets(&self) -> &DisjointSet {
        &self.sets
    }

    pub fn total_weight(&self) -> Weight {
        self.progress.tree_weight()
    }

    fn tree_complete(&self) -> bool {
        self.progress.tree_edges().len() + 1 >= self.graph.node_count()
    }
}

impl Traverse for Kruskal {
    /// Kruskal has no start node; `_start` is accepted for a uniform interface.
    fn start(graph: Arc<Graph>, _start: NodeId) -> Self {
        let mut sorted = graph.edges().to_vec();
        sorted.sort_by_key(|e| e.weight);
        let sets = DisjointSet::new(graph.node_count());
        let progress = Progress::new(format!(
            "Kruskal ready, {} edges sorted by weight",
            sorted.len()
        ));

        Self {
            graph,
            remaining: sorted.into(),
            sets,
            progress,
        }
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Kruskal
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
        let edge = match self.remaining.front() {
            Some(&edge) if !self.tree_complete() => edge,
            _ => {
                let message = format!(
                    "Kruskal finished, {} tree edges with total weight {}",
                    self.progress.tree_edges().len(),
                    self.total_weight()
                );
                return self.progress.finish(message);
            }
        };
        self.remaining.pop_front();

        let label = self.graph.edge_label(edge.from, edge.to);
        if self.sets.union(edge.from, edge.to) {
            self.progress.add_tree_edge(edge);
            self.progress
                .set_message(format!("Accept {label} ({}): joins two components", edge.weight));
            Outcome::Accepted(edge)
        } else {
            self.progress.traverse(edge.from, edge.to);
            self.progress
                .set_message(format!("Reject {label} ({}): would close a cycle", edge.weight));
            Outcome::Rejected(edge)
        }
    }

    fn pending(&self) -> Vec<NodeId> {
        Vec::new()
    }
}
