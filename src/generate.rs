use std::collections::HashSet;

use egui::Pos2;
use rand::Rng;

use crate::graph::{circle_location, default_label, Edge, EdgeKey, Graph, Node};
use crate::settings::{MAX_NODE_COUNT, MAX_WEIGHT, MIN_NODE_COUNT, MIN_WEIGHT};

const CIRCLE_RADIUS: f32 = 0.38;
const RADIUS_JITTER: f32 = 0.04;
const ANGLE_JITTER: f32 = 0.08;

/// Generates a random connected undirected graph.
///
/// `node_count` is clamped to `[2, 25]`. Every node `i > 0` is first attached to a
/// uniformly chosen earlier node, which yields a random recursive spanning tree.
/// Every remaining unordered pair is then connected with probability `edge_chance`.
/// Weights are drawn from `1..=9` when `weighted`, otherwise all weights are `1`.
pub fn generate_random_graph<R: Rng + ?Sized>(
    rng: &mut R,
    node_count: usize,
    edge_chance: f64,
    weighted: bool,
) -> Graph {
    let node_count = node_count.clamp(MIN_NODE_COUNT, MAX_NODE_COUNT);
    let edge_chance = if edge_chance.is_finite() {
        edge_chance.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut edges = Vec::with_capacity(node_count * 2);
    let mut connected = HashSet::with_capacity(node_count * 2);

    for i in 1..node_count {
        let j = rng.random_range(0..i);
        connected.insert(EdgeKey::new(j, i));
        let w = draw_weight(rng, weighted);
        edges.push(Edge::new(j, i, w));
    }

    for i in 0..node_count {
        for j in (i + 1)..node_count {
            if connected.contains(&EdgeKey::new(i, j)) {
                continue;
            }
            if rng.random_bool(edge_chance) {
                connected.insert(EdgeKey::new(i, j));
                let w = draw_weight(rng, weighted);
                edges.push(Edge::new(i, j, w));
            }
        }
    }

    let nodes = (0..node_count)
        .map(|id| Node::new(id, default_label(id), jittered_location(rng, id, node_count)))
        .collect();

    log::info!(
        "generated graph with {node_count} nodes and {} edges (weighted: {weighted})",
        edges.len()
    );

    Graph::assemble(nodes, edges, weighted)
}

fn draw_weight<R: Rng + ?Sized>(rng: &mut R, weighted: bool) -> u32 {
    if weighted {
        rng.random_range(MIN_WEIGHT..=MAX_WEIGHT)
    } else {
        1
    }
}

fn jittered_location<R: Rng + ?Sized>(rng: &mut R, i: usize, count: usize) -> Pos2 {
    let base = circle_location(i, count, 1.);
    let radius = CIRCLE_RADIUS + rng.random_range(-RADIUS_JITTER..=RADIUS_JITTER);
    let (dx, dy) = (base.x - 0.5, base.y - 0.5);
    let angle = dy.atan2(dx) + rng.random_range(-ANGLE_JITTER..=ANGLE_JITTER);

    Pos2::new(0.5 + radius * angle.cos(), 0.5 + radius * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn no_extra_edges_yields_a_tree() {
        let mut rng = StdRng::seed_from_u64(7);
        let g = generate_random_graph(&mut rng, 10, 0.0, false);
        assert_eq!(g.node_count(), 10);
        assert_eq!(g.edge_count(), 9);
        assert!(g.unreachable_from(0).is_empty());
        assert!(g.edges().iter().all(|e| e.weight == 1));
    }

    #[test]
    fn full_density_yields_a_complete_graph() {
        let mut rng = StdRng::seed_from_u64(7);
        let g = generate_random_graph(&mut rng, 6, 1.0, true);
        assert_eq!(g.edge_count(), 6 * 5 / 2);
        assert!(g
            .edges()
            .iter()
            .all(|e| (MIN_WEIGHT..=MAX_WEIGHT).contains(&e.weight)));
    }

    #[test]
    fn node_count_is_clamped() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate_random_graph(&mut rng, 0, 0.3, false).node_count(), 2);
        assert_eq!(generate_random_graph(&mut rng, 100, 0.3, false).node_count(), 25);
    }

    #[test]
    fn same_seed_same_graph() {
        let a = generate_random_graph(&mut StdRng::seed_from_u64(42), 12, 0.3, true);
        let b = generate_random_graph(&mut StdRng::seed_from_u64(42), 12, 0.3, true);
        assert_eq!(a, b);
    }

    #[test]
    fn locations_stay_inside_unit_square() {
        let mut rng = StdRng::seed_from_u64(3);
        let g = generate_random_graph(&mut rng, 25, 0.2, false);
        for n in g.nodes() {
            let p = n.location();
            assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
            assert_eq!(n.label(), default_label(n.id()));
        }
    }
}
