//! Read-only projection of a traversal's pending work into display rows.

use serde::{Deserialize, Serialize};

use crate::graph::{Edge, Graph, NodeId, Weight};
use crate::traversal::Traversal;

/// What a worklist row refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkItem {
    Node(NodeId),
    Edge(Edge),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorklistRow {
    /// 0 is the entry the next step takes
    pub position: usize,
    pub item: WorkItem,
    pub label: String,
    /// Edge weight (DFS/BFS parent edge, Prim, Kruskal) or tentative distance (Dijkstra)
    pub value: Option<Weight>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worklist {
    pub title: String,
    pub rows: Vec<WorklistRow>,
}

impl Worklist {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Projects the worklist of `t` in the order the next steps will consume it.
///
/// DFS lists its stack top first, BFS its queue front first, Dijkstra and Prim their
/// priority lists and Kruskal its remaining sorted edges. Outdated entries are shown
/// as they are, nothing is filtered.
pub fn project(t: &Traversal) -> Worklist {
    let g = t.graph();
    let title = t.algorithm().info().worklist_title.to_string();

    let rows = match t {
        Traversal::Dfs(dfs) => dfs
            .stack()
            .iter()
            .rev()
            .map(|&id| node_row(g, id, dfs.parent(id)))
            .collect::<Vec<_>>(),
        Traversal::Bfs(bfs) => bfs
            .queue()
            .iter()
            .map(|&id| node_row(g, id, bfs.parent(id)))
            .collect(),
        Traversal::Dijkstra(d) => d
            .queue()
            .map(|e| (WorkItem::Node(e.id), g.label(e.id), Some(e.dist)))
            .collect(),
        Traversal::Prim(p) => p.queue().map(|&e| edge_row(g, e)).collect(),
        Traversal::Kruskal(k) => k.remaining().iter().map(|&e| edge_row(g, e)).collect(),
    };

    Worklist {
        title,
        rows: rows
            .into_iter()
            .enumerate()
            .map(|(position, (item, label, value))| WorklistRow {
                position,
                item,
                label,
                value,
            })
            .collect(),
    }
}

fn node_row(g: &Graph, id: NodeId, parent: Option<NodeId>) -> (WorkItem, String, Option<Weight>) {
    let weight = parent.and_then(|p| g.weight_between(p, id));
    (WorkItem::Node(id), g.label(id), weight)
}

fn edge_row(g: &Graph, e: Edge) -> (WorkItem, String, Option<Weight>) {
    (
        WorkItem::Edge(e),
        g.edge_label(e.from, e.to),
        Some(e.weight),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::algorithms::Algorithm;

    fn graph() -> Arc<Graph> {
        // A-B 4, A-C 2, B-C 1, C-D 7
        Arc::new(
            Graph::from_parts(
                ["A", "B", "C", "D"],
                [
                    Edge::new(0, 1, 4),
                    Edge::new(0, 2, 2),
                    Edge::new(1, 2, 1),
                    Edge::new(2, 3, 7),
                ],
            )
            .unwrap(),
        )
    }

    fn labels(w: &Worklist) -> Vec<&str> {
        w.rows.iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn dfs_lists_stack_top_first() {
        let mut t = Traversal::start(Algorithm::Dfs, graph());
        t.step();
        let w = t.worklist();
        assert_eq!(w.title, "Stack");
        assert_eq!(labels(&w), vec!["B", "C"]);
        assert_eq!(w.rows[0].value, Some(4));
        assert_eq!(w.rows[1].position, 1);
    }

    #[test]
    fn bfs_lists_queue_front_first() {
        let mut t = Traversal::start(Algorithm::Bfs, graph());
        t.step();
        assert_eq!(labels(&t.worklist()), vec!["B", "C"]);
    }

    #[test]
    fn dijkstra_lists_tentative_distances_including_outdated() {
        let mut t = Traversal::start(Algorithm::Dijkstra, graph());
        t.step();
        t.step();
        // C settled at 2, B improved from 4 to 3, the B=4 entry stays visible
        let w = t.worklist();
        let rows: Vec<_> = w.rows.iter().map(|r| (r.label.as_str(), r.value)).collect();
        assert_eq!(rows, vec![("B", Some(3)), ("B", Some(4)), ("D", Some(9))]);
    }

    #[test]
    fn mst_worklists_show_edges() {
        let t = Traversal::start(Algorithm::Kruskal, graph());
        assert_eq!(labels(&t.worklist()), vec!["B-C", "A-C", "A-B", "C-D"]);

        let t = Traversal::start(Algorithm::Prim, graph());
        let w = t.worklist();
        assert_eq!(labels(&w), vec!["A-C", "A-B"]);
        assert!(matches!(w.rows[0].item, WorkItem::Edge(e) if e.weight == 2));
    }

    #[test]
    fn projection_is_idempotent() {
        for algorithm in Algorithm::ALL {
            let mut t = Traversal::start(algorithm, graph());
            t.step();
            assert_eq!(t.worklist(), t.worklist(), "{algorithm}");
        }
    }

    #[test]
    fn finished_traversals_have_empty_worklists() {
        for algorithm in Algorithm::ALL {
            let mut t = Traversal::start(algorithm, graph());
            while !t.step().is_terminal() {}
            assert!(t.worklist().is_empty(), "{algorithm}");
        }
    }

    #[test]
    fn kruskal_keeps_unexamined_edges_after_tree_completes() {
        let g = Graph::from_parts(
            ["A", "B", "C"],
            [Edge::new(0, 1, 2), Edge::new(1, 2, 3), Edge::new(0, 2, 9)],
        )
        .unwrap();
        let mut t = Traversal::start(Algorithm::Kruskal, Arc::new(g));
        while !t.step().is_terminal() {}
        assert_eq!(labels(&t.worklist()), vec!["A-C"]);
    }
}
