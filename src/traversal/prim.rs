use std::sync::Arc;

use crate::adjacency::WeightedAdjacency;
use crate::algorithms::Algorithm;
use crate::graph::{Edge, Graph, NodeId, Weight};

use super::priority::PriorityList;
use super::{Outcome, Progress, Traverse};

/// Prim's minimum spanning tree grown from a start node.
///
/// Candidate edges are oriented `from` tree node `to` outside node and kept sorted by
/// weight. Candidates whose target joined the tree in the meantime stay queued until
/// popped, then get discarded.
#[derive(Debug, Clone)]
pub struct Prim {
    graph: Arc<Graph>,
    adjacency: WeightedAdjacency,

    queue: PriorityList<Edge>,
    current: Option<NodeId>,

    progress: Progress,
}

impl Prim {
    pub fn queue(&self) -> impl Iterator<Item = &Edge> {
        self.queue.iter()
    }

    pub fn total_weight(&self) -> Weight {
        self.progress.tree_weight()
    }

    fn enqueue_from(&mut self, node: NodeId) -> usize {
        let mut added = 0;
        for n in self.adjacency.neighbors(node) {
            if self.progress.is_visited(n.to) {
                continue;
            }
            self.queue.insert(Edge::new(node, n.to, n.weight));
            added += 1;
        }
        added
    }
}

impl Traverse for Prim {
    fn start(graph: Arc<Graph>, start: NodeId) -> Self {
        let adjacency = WeightedAdjacency::build(&graph);
        let mut progress = Progress::default();
        progress.visit(start);

        let mut prim = Self {
            graph,
            adjacency,
            queue: PriorityList::new(),
            current: Some(start),
            progress,
        };
        let added = prim.enqueue_from(start);
        let message = format!(
            "Prim ready, tree = {{{}}}, {added} candidate edges",
            prim.graph.label(start)
        );
        prim.progress.set_message(message);

        prim
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Prim
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
        let Some(edge) = self.queue.pop() else {
            self.current = None;
            let message = format!(
                "Prim finished, {} tree edges with total weight {}",
                self.progress.tree_edges().len(),
                self.total_weight()
            );
            return self.progress.finish(message);
        };

        let label = self.graph.edge_label(edge.from, edge.to);
        if self.progress.is_visited(edge.to) {
            self.progress.set_message(format!(
                "Discard {label} ({}): {} already in tree",
                edge.weight,
                self.graph.label(edge.to)
            ));
            return Outcome::Rejected(edge);
        }

        self.progress.visit(edge.to);
        self.progress.add_tree_edge(edge);
        self.current = Some(edge.to);
        let added = self.enqueue_from(edge.to);
        self.progress.set_message(format!(
            "Add {label} ({}) to tree, {added} new candidate edges",
            edge.weight
        ));

        Outcome::Accepted(edge)
    }

    fn pending(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = Vec::new();
        for e in self.queue.iter() {
            if !self.progress.is_visited(e.to) && !ids.contains(&e.to) {
                ids.push(e.to);
            }
        }
        ids
    }

    fn current(&self) -> Option<NodeId> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_with_diagonal() -> Arc<Graph> {
        // A-B 1, B-C 4, C-D 2, D-A 3, A-C 3
        Arc::new(
            Graph::from_parts(
                ["A", "B", "C", "D"],
                [
                    Edge::new(0, 1, 1),
                    Edge::new(1, 2, 4),
                    Edge::new(2, 3, 2),
                    Edge::new(3, 0, 3),
                    Edge::new(0, 2, 3),
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn start_seeds_candidates_from_start_node() {
        let t = Prim::start(square_with_diagonal(), 0);
        let queued: Vec<_> = t.queue().map(|e| (e.to, e.weight)).collect();
        // equal weights keep insertion (neighbor id) order
        assert_eq!(queued, vec![(1, 1), (2, 3), (3, 3)]);
        assert!(t.progress().is_visited(0));
        assert_eq!(t.progress().message(), "Prim ready, tree = {A}, 3 candidate edges");
    }

    #[test]
    fn grows_minimum_tree_and_discards_stale_candidates() {
        let mut t = Prim::start(square_with_diagonal(), 0);

        assert_eq!(t.step(), Outcome::Accepted(Edge::new(0, 1, 1)));
        assert_eq!(t.step(), Outcome::Accepted(Edge::new(0, 2, 3)));
        assert_eq!(t.step(), Outcome::Accepted(Edge::new(2, 3, 2)));
        // A-D (3) is still queued although D is in the tree now
        assert_eq!(t.queue().count(), 2);
        assert_eq!(t.step(), Outcome::Rejected(Edge::new(0, 3, 3)));
        assert_eq!(t.progress().message(), "Discard A-D (3): D already in tree");
        assert_eq!(t.step(), Outcome::Rejected(Edge::new(1, 2, 4)));
        assert_eq!(t.step(), Outcome::Finished);

        assert_eq!(t.progress().tree_edges().len(), 3);
        assert_eq!(t.total_weight(), 6);
        assert!(t.pending().is_empty());
    }
}
