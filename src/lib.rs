mod adjacency;
mod algorithms;
mod generate;
mod graph;
mod playback;
mod render;
mod session;
mod settings;
mod traversal;
mod worklist;

#[cfg(feature = "events")]
pub mod events;

pub use self::adjacency::{Adjacency, WeightedAdjacency, WeightedNeighbor};
pub use self::algorithms::{Algorithm, AlgorithmInfo};
pub use self::generate::generate_random_graph;
pub use self::graph::{default_label, Edge, EdgeKey, Graph, GraphError, Node, NodeId, Weight};
pub use self::playback::Playback;
pub use self::render::{draw, edge_role, node_role, EdgeRole, NodeRole, TraversalView};
pub use self::session::Session;
pub use self::settings::{
    Settings, SettingsGraph, SettingsPlayback, SettingsStyle, DEFAULT_INTERVAL, MAX_NODE_COUNT,
    MAX_WEIGHT, MIN_NODE_COUNT, MIN_WEIGHT,
};
pub use self::traversal::{
    format_distance, Bfs, Dfs, Dijkstra, DisjointSet, Kruskal, Outcome, Prim, Prioritized,
    PriorityList, Progress, QueueEntry, Snapshot, Traversal, Traverse,
};
pub use self::worklist::{project, WorkItem, Worklist, WorklistRow};
