use crate::graph::{Graph, NodeId, Weight};

/// Neighbor reachable over a weighted edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedNeighbor {
    pub to: NodeId,
    pub weight: Weight,
}

/// Plain adjacency view: for every node its neighbors in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    neighbors: Vec<Vec<NodeId>>,
}

impl Adjacency {
    pub fn build(g: &Graph) -> Self {
        let mut neighbors = vec![Vec::new(); g.node_count()];
        for e in g.edges() {
            neighbors[e.from].push(e.to);
            neighbors[e.to].push(e.from);
        }
        neighbors.iter_mut().for_each(|n| n.sort_unstable());

        Self { neighbors }
    }

    /// Neighbors of `id` in ascending order. Unknown ids have no neighbors.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.neighbors.get(id).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

/// Weighted adjacency view: for every node its `{to, weight}` pairs in ascending
/// neighbor id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedAdjacency {
    neighbors: Vec<Vec<WeightedNeighbor>>,
}

impl WeightedAdjacency {
    pub fn build(g: &Graph) -> Self {
        let mut neighbors = vec![Vec::new(); g.node_count()];
        for e in g.edges() {
            neighbors[e.from].push(WeightedNeighbor {
                to: e.to,
                weight: e.weight,
            });
            neighbors[e.to].push(WeightedNeighbor {
                to: e.from,
                weight: e.weight,
            });
        }
        neighbors
            .iter_mut()
            .for_each(|n| n.sort_unstable_by_key(|w| w.to));

        Self { neighbors }
    }

    pub fn neighbors(&self, id: NodeId) -> &[WeightedNeighbor] {
        self.neighbors.get(id).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}
