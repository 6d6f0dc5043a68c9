use scn_census::{Granularity, PathCensus};
use scn_core::table::EntityKey;
use scn_graph::karate_club;

#[test]
fn karate_global_similarity_matches_documented_value() {
    let census = PathCensus::from_graph(&karate_club());
    assert_eq!(census.triangle_count(), 45);
    // 3T / W with W = sum over nodes of C(d, 2) = 528.
    assert!((census.global_similarity() - 135.0 / 528.0).abs() < 1e-12);
    assert!((census.global_similarity() - 0.2557).abs() < 1e-4);
    let comp = census.global_complementarity();
    assert!(comp.is_finite());
    assert!((0.0..=1.0).contains(&comp));
}

#[test]
fn karate_node_zero_matches_hand_count() {
    // Node 0 has degree 16 and sits in 18 triangles: its similarity is
    // 18 / C(16, 2).
    let census = PathCensus::from_graph(&karate_club());
    let counts = &census.node_counts()[0];
    assert_eq!(counts.wedge, 120);
    assert_eq!(counts.tri, 18);
    assert!((census.node_similarity(0) - 18.0 / 120.0).abs() < 1e-12);
}

#[test]
fn granularities_agree_on_aggregated_counts() {
    let census = PathCensus::from_graph(&karate_club());
    let nodes = census.coefs(Granularity::Nodes);
    let global = census.coefs(Granularity::Global);

    let tri_col = nodes.col("tri").unwrap();
    let node_tri_sum: f64 = nodes.column_values(tri_col).sum();
    let global_tri = global.value(0, global.col("tri").unwrap());
    // Every triangle is counted at each of its three nodes.
    assert_eq!(node_tri_sum, 3.0 * global_tri);

    let quad_col = nodes.col("quad").unwrap();
    let node_quad_sum: f64 = nodes.column_values(quad_col).sum();
    let global_quad = global.value(0, global.col("quad").unwrap());
    assert_eq!(node_quad_sum, 4.0 * global_quad);
}

#[test]
fn edge_table_keys_are_ordered_pairs() {
    let census = PathCensus::from_graph(&karate_club());
    let edges = census.coefs(Granularity::Edges);
    assert_eq!(edges.nrows(), 78);
    for (key, row) in edges.rows() {
        match key {
            EntityKey::Edge { source, target } => assert!(source < target),
            other => panic!("unexpected key {other}"),
        }
        let sim = row[edges.col("sim").unwrap()];
        assert!(sim.is_nan() || (0.0..=1.0).contains(&sim));
    }
}
