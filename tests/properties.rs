use std::sync::Arc;

use egui_traversals::{
    generate_random_graph, Algorithm, DisjointSet, EdgeKey, Graph, Traversal, MAX_NODE_COUNT,
    MAX_WEIGHT, MIN_NODE_COUNT, MIN_WEIGHT,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const STEP_LIMIT: usize = 10_000;

fn graph(seed: u64, nodes: usize, chance: f64, weighted: bool) -> Arc<Graph> {
    let mut rng = StdRng::seed_from_u64(seed);
    Arc::new(generate_random_graph(&mut rng, nodes, chance, weighted))
}

fn finish(t: &mut Traversal) {
    for _ in 0..STEP_LIMIT {
        if t.step().is_terminal() {
            return;
        }
    }
    panic!("{} did not finish", t.algorithm());
}

proptest! {
    #[test]
    fn prop_generated_graphs_are_connected_and_simple(
        seed in any::<u64>(),
        nodes in 0usize..40,
        chance in 0.0f64..=1.0,
        weighted in any::<bool>(),
    ) {
        let g = graph(seed, nodes, chance, weighted);
        let n = g.node_count();
        prop_assert!(g.edge_count() >= n - 1 && g.edge_count() <= n * (n - 1) / 2);
        if weighted {
            prop_assert!(g.edges().iter().all(|e| (MIN_WEIGHT..=MAX_WEIGHT).contains(&e.weight)));
        } else {
            prop_assert!(g.edges().iter().all(|e| e.weight == 1));
        }
        prop_assert!(g.node_count() >= MIN_NODE_COUNT && g.node_count() <= MAX_NODE_COUNT);
        prop_assert!(g.unreachable_from(0).is_empty());

        let mut keys: Vec<EdgeKey> = g.edges().iter().map(|e| e.key()).collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), total);
        prop_assert!(g.edges().iter().all(|e| e.from != e.to));
    }

    #[test]
    fn prop_searches_visit_everything_one_node_at_a_time(
        seed in any::<u64>(),
        nodes in 2usize..=25,
        chance in 0.0f64..=1.0,
        bfs in any::<bool>(),
    ) {
        let g = graph(seed, nodes, chance, false);
        let algorithm = if bfs { Algorithm::Bfs } else { Algorithm::Dfs };
        let mut t = Traversal::start(algorithm, g.clone());

        let mut visited = 0;
        for _ in 0..STEP_LIMIT {
            let done = t.step().is_terminal();
            let now = t.progress().visited().len();
            prop_assert!(now == visited || now == visited + 1);
            visited = now;
            if done {
                break;
            }
        }
        prop_assert!(t.is_finished());
        prop_assert_eq!(visited, g.node_count());
    }

    #[test]
    fn prop_spanning_trees_agree(
        seed in any::<u64>(),
        nodes in 2usize..=25,
        chance in 0.0f64..=1.0,
    ) {
        let g = graph(seed, nodes, chance, true);

        let mut prim = Traversal::start(Algorithm::Prim, g.clone());
        finish(&mut prim);
        let mut kruskal = Traversal::start(Algorithm::Kruskal, g.clone());
        finish(&mut kruskal);

        prop_assert_eq!(prim.progress().tree_edges().len(), g.node_count() - 1);
        prop_assert_eq!(kruskal.progress().tree_edges().len(), g.node_count() - 1);
        prop_assert_eq!(prim.progress().tree_weight(), kruskal.progress().tree_weight());
    }

    #[test]
    fn prop_kruskal_never_accepts_a_cycle(
        seed in any::<u64>(),
        nodes in 2usize..=25,
        chance in 0.0f64..=1.0,
    ) {
        let g = graph(seed, nodes, chance, true);
        let mut t = Traversal::start(Algorithm::Kruskal, g.clone());

        for _ in 0..STEP_LIMIT {
            let done = t.step().is_terminal();
            let mut sets = DisjointSet::new(g.node_count());
            for e in t.progress().tree_edges() {
                prop_assert!(sets.union(e.from, e.to), "cycle through {}", e.key());
            }
            if done {
                break;
            }
        }
    }

    #[test]
    fn prop_worklist_projection_is_idempotent(
        seed in any::<u64>(),
        steps in 0usize..30,
        pick in 0usize..5,
    ) {
        let algorithm = Algorithm::ALL[pick];
        let g = graph(seed, 10, 0.3, algorithm.info().forces_weights);
        let mut t = Traversal::start(algorithm, g);
        for _ in 0..steps {
            t.step();
        }
        prop_assert_eq!(t.worklist(), t.worklist());
    }
}
