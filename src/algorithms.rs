use std::fmt;

use serde::{Deserialize, Serialize};

/// Static description of an algorithm, consulted by the generator and the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlgorithmInfo {
    pub label: &'static str,
    pub short_label: &'static str,
    /// Probability of every extra non-tree edge when generating a graph
    pub default_edge_chance: f64,
    /// Graphs generated for this algorithm always carry random weights
    pub forces_weights: bool,
    /// Name of the worklist shown next to the graph
    pub worklist_title: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    Dfs,
    Bfs,
    Dijkstra,
    Prim,
    Kruskal,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Dfs,
        Algorithm::Bfs,
        Algorithm::Dijkstra,
        Algorithm::Prim,
        Algorithm::Kruskal,
    ];

    pub fn info(self) -> AlgorithmInfo {
        match self {
            Algorithm::Dfs => AlgorithmInfo {
                label: "Depth-first search",
                short_label: "DFS",
                default_edge_chance: 0.15,
                forces_weights: false,
                worklist_title: "Stack",
            },
            Algorithm::Bfs => AlgorithmInfo {
                label: "Breadth-first search",
                short_label: "BFS",
                default_edge_chance: 0.15,
                forces_weights: false,
                worklist_title: "Queue",
            },
            Algorithm::Dijkstra => AlgorithmInfo {
                label: "Dijkstra's shortest paths",
                short_label: "Dijkstra",
                default_edge_chance: 0.25,
                forces_weights: true,
                worklist_title: "Priority queue",
            },
            Algorithm::Prim => AlgorithmInfo {
                label: "Prim's minimum spanning tree",
                short_label: "Prim",
                default_edge_chance: 0.25,
                forces_weights: true,
                worklist_title: "Candidate edges",
            },
            Algorithm::Kruskal => AlgorithmInfo {
                label: "Kruskal's minimum spanning tree",
                short_label: "Kruskal",
                default_edge_chance: 0.25,
                forces_weights: true,
                worklist_title: "Edges by weight",
            },
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().short_label)
    }
}
