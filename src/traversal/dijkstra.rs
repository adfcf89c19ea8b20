use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::adjacency::WeightedAdjacency;
use crate::algorithms::Algorithm;
use crate::graph::{Graph, NodeId, Weight};

use super::priority::{Prioritized, PriorityList};
use super::{format_distance, Outcome, Progress, Traverse};

/// Tentative distance of a node waiting in the priority queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: NodeId,
    pub dist: Weight,
}

impl Prioritized for QueueEntry {
    fn priority(&self) -> Weight {
        self.dist
    }
}

/// Dijkstra's single source shortest paths.
///
/// Improved distances are inserted as new queue entries; outdated entries stay in
/// the queue and are dropped when popped for an already settled node. One step
/// settles exactly one node or declares completion.
#[derive(Debug, Clone)]
pub struct Dijkstra {
    graph: Arc<Graph>,
    adjacency: WeightedAdjacency,
    source: NodeId,

    /// `None` is infinity
    distances: Vec<Option<Weight>>,
    previous: Vec<Option<NodeId>>,
    queue: PriorityList<QueueEntry>,
    current: Option<NodeId>,

    progress: Progress,
}

impl Dijkstra {
    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn distances(&self) -> &[Option<Weight>] {
        &self.distances
    }

    pub fn distance(&self, id: NodeId) -> Option<Weight> {
        self.distances.get(id).copied().flatten()
    }

    pub fn previous(&self, id: NodeId) -> Option<NodeId> {
        self.previous.get(id).copied().flatten()
    }

    pub fn queue(&self) -> impl Iterator<Item = &QueueEntry> {
        self.queue.iter()
    }

    /// Shortest known path from the source to `target`, source first.
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        self.distance(target)?;

        let mut path = vec![target];
        let mut curr = target;
        while let Some(p) = self.previous(curr) {
            // previous links form a tree, a longer walk means corrupted state
            if path.len() > self.distances.len() {
                return None;
            }
            path.push(p);
            curr = p;
        }
        path.reverse();

        (curr == self.source).then_some(path)
    }
}

impl Traverse for Dijkstra {
    fn start(graph: Arc<Graph>, start: NodeId) -> Self {
        let adjacency = WeightedAdjacency::build(&graph);
        let n = graph.node_count();

        let mut distances = vec![None; n];
        if let Some(d) = distances.get_mut(start) {
            *d = Some(0);
        }
        let mut queue = PriorityList::new();
        queue.insert(QueueEntry { id: start, dist: 0 });

        let progress = Progress::new(format!(
            "Dijkstra ready, source {} at distance 0",
            graph.label(start)
        ));

        Self {
            graph,
            adjacency,
            source: start,
            distances,
            previous: vec![None; n],
            queue,
            current: None,
            progress,
        }
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
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
        let mut stale = 0;
        let entry = loop {
            match self.queue.pop() {
                Some(e) if self.progress.is_visited(e.id) => stale += 1,
                Some(e) => break e,
                None => {
                    self.current = None;
                    let reached = self.distances.iter().filter(|d| d.is_some()).count();
                    let message = format!(
                        "Dijkstra finished, {reached} of {} nodes reachable from {}",
                        self.graph.node_count(),
                        self.graph.label(self.source)
                    );
                    return self.progress.finish(message);
                }
            }
        };

        let node = entry.id;
        let dist = entry.dist;
        self.progress.visit(node);
        self.current = Some(node);
        if let Some(p) = self.previous(node) {
            self.progress.traverse(p, node);
        }

        let mut relaxed = Vec::new();
        for n in self.adjacency.neighbors(node) {
            if self.progress.is_visited(n.to) {
                continue;
            }
            let candidate = dist.saturating_add(n.weight);
            let improves = self.distances[n.to].is_none_or(|known| candidate < known);
            if improves {
                self.distances[n.to] = Some(candidate);
                self.previous[n.to] = Some(node);
                self.queue.insert(QueueEntry {
                    id: n.to,
                    dist: candidate,
                });
                relaxed.push(format!("{}={candidate}", self.graph.label(n.to)));
            }
        }

        let mut message = format!(
            "Settle {} at distance {}",
            self.graph.label(node),
            format_distance(Some(dist))
        );
        if stale > 0 {
            message.push_str(&format!(" (dropped {stale} stale entries)"));
        }
        if relaxed.is_empty() {
            message.push_str(", no distance improved");
        } else {
            message.push_str(&format!(", update {}", relaxed.join(", ")));
        }
        self.progress.set_message(message);

        Outcome::Settled(node)
    }

    fn pending(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = Vec::new();
        for e in self.queue.iter() {
            if !self.progress.is_visited(e.id) && !ids.contains(&e.id) {
                ids.push(e.id);
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
    use crate::graph::{Edge, EdgeKey};

    fn diamond() -> Arc<Graph> {
        Arc::new(
            Graph::from_parts(
                ["A", "B", "C", "D"],
                [
                    Edge::new(0, 1, 1),
                    Edge::new(1, 2, 2),
                    Edge::new(0, 2, 5),
                    Edge::new(2, 3, 1),
                ],
            )
            .unwrap(),
        )
    }

    fn run(t: &mut Dijkstra) -> Vec<Outcome> {
        std::iter::from_fn(|| {
            let o = t.step();
            (!o.is_terminal()).then_some(o)
        })
        .collect()
    }

    #[test]
    fn computes_shortest_distances() {
        let mut t = Dijkstra::start(diamond(), 0);
        let settled = run(&mut t);
        assert_eq!(
            settled,
            vec![
                Outcome::Settled(0),
                Outcome::Settled(1),
                Outcome::Settled(2),
                Outcome::Settled(3)
            ]
        );
        assert_eq!(t.distances(), &[Some(0), Some(1), Some(3), Some(4)]);
        assert_eq!(t.path_to(3), Some(vec![0, 1, 2, 3]));
        assert!(t.progress().is_traversed(EdgeKey(1, 2)));
        assert!(!t.progress().is_traversed(EdgeKey(0, 2)));
    }

    #[test]
    fn stale_entries_are_dropped_inside_one_step() {
        let mut t = Dijkstra::start(diamond(), 0);
        t.step();
        t.step();
        // C was queued at 5 and again at 3
        let queued: Vec<_> = t.queue().map(|e| (e.id, e.dist)).collect();
        assert_eq!(queued, vec![(2, 3), (2, 5)]);
        assert_eq!(t.pending(), vec![2]);

        assert_eq!(t.step(), Outcome::Settled(2));
        assert_eq!(t.step(), Outcome::Settled(3));
        // the only thing left is the outdated C=5 entry
        assert_eq!(t.queue().count(), 1);
        assert_eq!(t.step(), Outcome::Finished);
        assert_eq!(t.queue().count(), 0);
    }

    #[test]
    fn messages_describe_relaxations() {
        let mut t = Dijkstra::start(diamond(), 0);
        assert_eq!(t.progress().message(), "Dijkstra ready, source A at distance 0");
        t.step();
        assert_eq!(t.progress().message(), "Settle A at distance 0, update B=1, C=5");
    }

    #[test]
    fn unknown_targets_have_no_path() {
        let t = Dijkstra::start(diamond(), 0);
        assert_eq!(t.path_to(3), None);
        assert_eq!(t.path_to(0), Some(vec![0]));
        assert_eq!(t.path_to(77), None);
    }
}
