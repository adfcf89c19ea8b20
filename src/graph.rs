use std::collections::{BTreeSet, HashMap, VecDeque};
use std::fmt;

use egui::Pos2;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Node identifier. Nodes of a [`Graph`] are always numbered `0..node_count`.
pub type NodeId = usize;

/// Edge weight. Unweighted graphs use weight `1` everywhere.
pub type Weight = u32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("graph needs at least 2 nodes, got {0}")]
    TooFewNodes(usize),

    #[error("edge references node {node} but the graph has only {node_count} nodes")]
    UnknownNode { node: NodeId, node_count: usize },

    #[error("self loop on node {0}")]
    SelfLoop(NodeId),

    #[error("duplicate edge between {from} and {to}")]
    DuplicateEdge { from: NodeId, to: NodeId },

    #[error("edge between {from} and {to} has zero weight")]
    ZeroWeight { from: NodeId, to: NodeId },

    #[error("node at position {position} has id {id}")]
    NodeIdMismatch { position: usize, id: NodeId },

    #[error("graph is not connected, unreachable from node 0: {unreachable:?}")]
    Disconnected { unreachable: Vec<NodeId> },
}

/// Graph node: identity, display label and a normalized position in `[0, 1]²`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    label: String,
    location: Pos2,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>, location: Pos2) -> Self {
        Self {
            id,
            label: label.into(),
            location,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn location(&self) -> Pos2 {
        self.location
    }
}

/// Undirected weighted edge. `from`/`to` keep the orientation the edge was created
/// with, traversal code treats them as an unordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, weight: Weight) -> Self {
        Self { from, to, weight }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.from, self.to)
    }

    /// Returns the endpoint opposite to `node`, if `node` is an endpoint at all.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.from {
            Some(self.to)
        } else if node == self.to {
            Some(self.from)
        } else {
            None
        }
    }
}

/// Unordered node pair, normalized so that `.0 <= .1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey(pub NodeId, pub NodeId);

impl EdgeKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

/// Default label for node `id`: `A`..`Z`, then `N26`, `N27`, ...
pub fn default_label(id: NodeId) -> String {
    match u8::try_from(id) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => format!("N{id}"),
    }
}

/// Immutable, connected, undirected graph the traversals run on.
///
/// Built whole by [`crate::generate_random_graph`] or [`Graph::from_parts`] and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphParts")]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    weighted: bool,

    #[serde(skip)]
    index: HashMap<EdgeKey, usize>,
}

#[derive(Deserialize)]
struct GraphParts {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    weighted: bool,
}

impl TryFrom<GraphParts> for Graph {
    type Error = GraphError;

    fn try_from(p: GraphParts) -> Result<Self, Self::Error> {
        Self::validated(p.nodes, p.edges, p.weighted)
    }
}

impl Graph {
    /// Assembles a graph from already validated parts.
    pub(crate) fn assemble(nodes: Vec<Node>, edges: Vec<Edge>, weighted: bool) -> Self {
        let index = edges
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key(), i))
            .collect();

        Self {
            nodes,
            edges,
            weighted,
            index,
        }
    }

    /// Builds a graph from labels and edges, validating every invariant the
    /// traversals rely on. Nodes are placed evenly around a circle.
    pub fn from_parts<L: Into<String>>(
        labels: impl IntoIterator<Item = L>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Result<Self, GraphError> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let node_count = labels.len();
        let nodes = labels
            .into_iter()
            .enumerate()
            .map(|(id, label)| Node::new(id, label, circle_location(id, node_count, 0.4)))
            .collect();

        Self::validated(nodes, edges, false)
    }

    /// Checks node numbering, edges and connectivity. The graph counts as weighted when
    /// `weighted` is set or any weight differs from 1.
    fn validated(
        nodes: Vec<Node>,
        edges: impl IntoIterator<Item = Edge>,
        mut weighted: bool,
    ) -> Result<Self, GraphError> {
        let node_count = nodes.len();
        if node_count < 2 {
            return Err(GraphError::TooFewNodes(node_count));
        }
        if let Some((position, n)) = nodes.iter().enumerate().find(|(i, n)| n.id != *i) {
            return Err(GraphError::NodeIdMismatch {
                position,
                id: n.id,
            });
        }

        let mut seen = BTreeSet::new();
        let mut checked = Vec::new();
        for e in edges {
            for node in [e.from, e.to] {
                if node >= node_count {
                    return Err(GraphError::UnknownNode { node, node_count });
                }
            }
            if e.from == e.to {
                return Err(GraphError::SelfLoop(e.from));
            }
            if e.weight == 0 {
                return Err(GraphError::ZeroWeight {
                    from: e.from,
                    to: e.to,
                });
            }
            if !seen.insert(e.key()) {
                return Err(GraphError::DuplicateEdge {
                    from: e.from,
                    to: e.to,
                });
            }
            weighted |= e.weight != 1;
            checked.push(e);
        }

        let g = Self::assemble(nodes, checked, weighted);
        let unreachable = g.unreachable_from(0);
        if !unreachable.is_empty() {
            return Err(GraphError::Disconnected { unreachable });
        }

        Ok(g)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id < self.nodes.len()
    }

    /// Label of node `id`, or the raw id when the node does not exist.
    pub fn label(&self, id: NodeId) -> String {
        match self.node(id) {
            Some(n) => n.label.clone(),
            None => {
                log::warn!("label lookup for unknown node {id}");
                id.to_string()
            }
        }
    }

    /// Human readable edge label such as `A-B`.
    pub fn edge_label(&self, a: NodeId, b: NodeId) -> String {
        format!("{}-{}", self.label(a), self.label(b))
    }

    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.index
            .get(&EdgeKey::new(a, b))
            .and_then(|&i| self.edges.get(i))
    }

    pub fn weight_between(&self, a: NodeId, b: NodeId) -> Option<Weight> {
        self.edge_between(a, b).map(|e| e.weight)
    }

    /// Nodes not reachable from `start` using the graph edges.
    pub fn unreachable_from(&self, start: NodeId) -> Vec<NodeId> {
        let adjacency = crate::Adjacency::build(self);
        let mut seen = vec![false; self.node_count()];
        let mut queue = VecDeque::new();
        if let Some(s) = seen.get_mut(start) {
            *s = true;
            queue.push_back(start);
        }
        while let Some(n) = queue.pop_front() {
            for &next in adjacency.neighbors(n) {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }

        seen.iter()
            .enumerate()
            .filter(|(_, s)| !**s)
            .map(|(i, _)| i)
            .collect()
    }

    /// Converts into a petgraph graph. Node `i` becomes `NodeIndex::new(i)`.
    pub fn to_petgraph(&self) -> UnGraph<Node, Weight> {
        let mut g = UnGraph::with_capacity(self.node_count(), self.edge_count());
        for n in &self.nodes {
            g.add_node(n.clone());
        }
        for e in &self.edges {
            g.add_edge(NodeIndex::new(e.from), NodeIndex::new(e.to), e.weight);
        }
        g
    }
}

/// Evenly spaced location on a circle centered in the unit square, starting at the top.
pub(crate) fn circle_location(i: usize, count: usize, radius: f32) -> Pos2 {
    let angle = -std::f32::consts::FRAC_PI_2 + (i as f32) * std::f32::consts::TAU / (count as f32);
    Pos2::new(0.5 + radius * angle.cos(), 0.5 + radius * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::algo::connected_components;

    fn triangle() -> Graph {
        Graph::from_parts(
            ["A", "B", "C"],
            [Edge::new(0, 1, 2), Edge::new(1, 2, 3), Edge::new(0, 2, 9)],
        )
        .unwrap()
    }

    #[test]
    fn labels_follow_alphabet() {
        assert_eq!(default_label(0), "A");
        assert_eq!(default_label(25), "Z");
        assert_eq!(default_label(26), "N26");
    }

    #[test]
    fn lookups_are_unordered() {
        let g = triangle();
        assert_eq!(g.weight_between(2, 0), Some(9));
        assert_eq!(g.weight_between(0, 2), Some(9));
        assert_eq!(g.edge_between(1, 0).map(Edge::key), Some(EdgeKey(0, 1)));
        assert!(g.is_weighted());
    }

    #[test]
    fn unknown_node_label_falls_back_to_id() {
        let g = triangle();
        assert_eq!(g.label(1), "B");
        assert_eq!(g.label(42), "42");
    }

    #[test]
    fn rejects_invalid_parts() {
        assert_eq!(
            Graph::from_parts(["A"], []).unwrap_err(),
            GraphError::TooFewNodes(1)
        );
        assert_eq!(
            Graph::from_parts(["A", "B"], [Edge::new(0, 1, 1), Edge::new(1, 0, 4)]).unwrap_err(),
            GraphError::DuplicateEdge { from: 1, to: 0 }
        );
        assert_eq!(
            Graph::from_parts(["A", "B"], [Edge::new(0, 0, 1)]).unwrap_err(),
            GraphError::SelfLoop(0)
        );
        assert_eq!(
            Graph::from_parts(["A", "B"], [Edge::new(0, 5, 1)]).unwrap_err(),
            GraphError::UnknownNode {
                node: 5,
                node_count: 2
            }
        );
        assert_eq!(
            Graph::from_parts(["A", "B"], [Edge::new(0, 1, 0)]).unwrap_err(),
            GraphError::ZeroWeight { from: 0, to: 1 }
        );
        assert_eq!(
            Graph::from_parts(["A", "B", "C"], [Edge::new(0, 1, 1)]).unwrap_err(),
            GraphError::Disconnected {
                unreachable: vec![2]
            }
        );
    }

    #[test]
    fn rejects_misnumbered_nodes() {
        let nodes = vec![
            Node::new(1, "B", Pos2::ZERO),
            Node::new(0, "A", Pos2::ZERO),
        ];
        assert_eq!(
            Graph::validated(nodes, [Edge::new(0, 1, 1)], false).unwrap_err(),
            GraphError::NodeIdMismatch { position: 0, id: 1 }
        );
    }

    #[test]
    fn petgraph_conversion_keeps_structure() {
        let g = triangle();
        let pg = g.to_petgraph();
        assert_eq!(pg.node_count(), 3);
        assert_eq!(pg.edge_count(), 3);
        assert_eq!(connected_components(&pg), 1);
        assert_eq!(pg[NodeIndex::new(2)].label(), "C");
    }

    #[test]
    fn lookup_survives_serde_round_trip() {
        let g = triangle();
        let json = serde_json::to_string(&g).unwrap();
        let back: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(back.weight_between(1, 2), Some(3));
        assert_eq!(back, g);
    }
}
