use scn_core::rng::RngHandle;
use scn_graph::{
    canonical_hash, erdos_renyi, graph_from_bytes, graph_to_bytes, largest_component,
    preprocess, Graph, PreprocessOptions, RawNetwork,
};
use proptest::prelude::*;

fn check_simplicity(graph: &Graph) {
    for node in 0..graph.node_count() as u32 {
        let neighbors = graph.neighbors(node);
        assert!(neighbors.windows(2).all(|w| w[0] < w[1]));
        assert!(!neighbors.contains(&node));
        for &other in neighbors {
            assert!(graph.has_edge(other, node));
        }
    }
    let m: usize = graph.edges().count();
    assert_eq!(m, graph.edge_count());
}

proptest! {
    #[test]
    fn random_graphs_stay_simple_and_round_trip(seed in any::<u64>(), nodes in 2u32..40, kbar in 0.0f64..6.0) {
        let mut rng = RngHandle::from_seed(seed);
        let graph = erdos_renyi(nodes, kbar, &mut rng).unwrap();
        check_simplicity(&graph);

        let bytes = graph_to_bytes(&graph).unwrap();
        let restored = graph_from_bytes(&bytes).unwrap();
        prop_assert_eq!(canonical_hash(&graph), canonical_hash(&restored));

        let component = largest_component(&graph);
        check_simplicity(&component);
        prop_assert!(component.node_count() <= graph.node_count());
        prop_assert!(component.edge_count() <= graph.edge_count());
    }

    #[test]
    fn preprocessing_dirty_input_always_yields_a_simple_graph(
        seed in any::<u64>(),
        nodes in 2u32..20,
        n_edges in 0usize..60,
    ) {
        let mut rng = RngHandle::from_seed(seed);
        let edges: Vec<(u32, u32)> = (0..n_edges)
            .map(|_| {
                let u = (rng.uniform() * nodes as f64) as u32 % nodes;
                let v = (rng.uniform() * nodes as f64) as u32 % nodes;
                (u, v)
            })
            .collect();
        let raw = RawNetwork {
            n_nodes: nodes,
            edges,
            attrs: Default::default(),
            node_attrs: Default::default(),
        };
        let graph = preprocess(&raw, &PreprocessOptions::default()).unwrap();
        check_simplicity(&graph);
        // A preprocessed graph is connected by construction.
        prop_assert!(graph.node_count() <= 1 || scn_graph::connected_components(&graph).len() == 1);
    }
}
