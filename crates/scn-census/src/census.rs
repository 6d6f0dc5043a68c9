use scn_core::table::{EntityKey, StatTable};
use scn_graph::Graph;
use serde::{Deserialize, Serialize};

use crate::counts::{edge_census, node_census, EdgeCounts, NodeCounts};

/// Granularity of a census table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    /// One row per node.
    Nodes,
    /// One row per edge.
    Edges,
    /// A single whole-graph row; counts are aggregated before the ratio is
    /// formed, never averaged over per-entity coefficients.
    Global,
}

/// Path census of a simple undirected graph.
///
/// Counts closed and open 2-/3-paths and derives the two structural
/// coefficients: similarity (triangle closure of wedges) and complementarity
/// (chordless quadrangle closure of 3-paths). A pure function of topology;
/// any two calls on the same graph produce identical results.
///
/// Coefficients are `NaN` wherever their denominator vanishes (e.g. the
/// similarity of a node of degree < 2); consumers are expected to skip NaN,
/// not to treat it as zero.
#[derive(Debug, Clone)]
pub struct PathCensus {
    degrees: Vec<u32>,
    nodes: Vec<NodeCounts>,
    edges: Vec<EdgeCounts>,
}

impl PathCensus {
    /// Computes the full census of `graph`.
    pub fn from_graph(graph: &Graph) -> Self {
        let edges = edge_census(graph);
        let nodes = node_census(graph, &edges);
        Self {
            degrees: graph.degrees(),
            nodes,
            edges,
        }
    }

    /// Raw per-node counts.
    pub fn node_counts(&self) -> &[NodeCounts] {
        &self.nodes
    }

    /// Raw per-edge counts.
    pub fn edge_counts(&self) -> &[EdgeCounts] {
        &self.edges
    }

    /// Similarity of one node: `tri / wedge`, the fraction of possible
    /// triangles at the node that exist. NaN for degree < 2.
    pub fn node_similarity(&self, node: u32) -> f64 {
        let c = &self.nodes[node as usize];
        ratio(c.tri, c.wedge)
    }

    /// Complementarity of one node: `2 quad / wpath`, the fraction of
    /// 3-paths through the node closed into chordless quadrangles,
    /// normalized so complete bipartite graphs attain 1. NaN when the node
    /// sits in no 3-path middle.
    pub fn node_complementarity(&self, node: u32) -> f64 {
        let c = &self.nodes[node as usize];
        ratio(2 * c.quad, c.wpath)
    }

    /// Similarity of one edge (by index into [`Self::edge_counts`]):
    /// `2 tri / tpath`.
    pub fn edge_similarity(&self, edge: usize) -> f64 {
        let e = &self.edges[edge];
        ratio(2 * e.tri, e.tpath)
    }

    /// Complementarity of one edge: `quad / mpath`.
    pub fn edge_complementarity(&self, edge: usize) -> f64 {
        let e = &self.edges[edge];
        ratio(e.quad, e.mpath)
    }

    /// Global similarity `3T / W`: the fraction of wedges closed into
    /// triangles (graph transitivity).
    pub fn global_similarity(&self) -> f64 {
        let closed: u64 = self.edges.iter().map(|e| e.tri).sum();
        let wedges: u64 = self.nodes.iter().map(|c| c.wedge).sum();
        ratio(closed, wedges)
    }

    /// Global complementarity `4Q / P3`: the fraction of 3-paths closed into
    /// chordless quadrangles.
    pub fn global_complementarity(&self) -> f64 {
        let closed: u64 = self.edges.iter().map(|e| e.quad).sum();
        let paths: u64 = self.edges.iter().map(|e| e.mpath).sum();
        ratio(closed, paths)
    }

    /// Total triangle count `T`.
    pub fn triangle_count(&self) -> u64 {
        self.edges.iter().map(|e| e.tri).sum::<u64>() / 3
    }

    /// Total chordless quadrangle count `Q`.
    pub fn quadrangle_count(&self) -> u64 {
        self.edges.iter().map(|e| e.quad).sum::<u64>() / 4
    }

    /// Census table at the requested granularity: raw counts plus the `sim`
    /// and `comp` coefficient columns.
    pub fn coefs(&self, granularity: Granularity) -> StatTable {
        match granularity {
            Granularity::Nodes => self.node_table(),
            Granularity::Edges => self.edge_table(),
            Granularity::Global => self.global_table(),
        }
    }

    fn node_table(&self) -> StatTable {
        let mut table =
            StatTable::new(["tri", "wedge", "head", "quad", "wpath", "hpath", "sim", "comp"]);
        for (id, counts) in self.nodes.iter().enumerate() {
            let id = id as u32;
            table.push_row(
                EntityKey::Node {
                    id,
                    degree: self.degrees[id as usize],
                },
                &[
                    counts.tri as f64,
                    counts.wedge as f64,
                    counts.head as f64,
                    counts.quad as f64,
                    counts.wpath as f64,
                    counts.hpath as f64,
                    self.node_similarity(id),
                    self.node_complementarity(id),
                ],
            );
        }
        table
    }

    fn edge_table(&self) -> StatTable {
        let mut table = StatTable::new(["tri", "tpath", "quad", "mpath", "sim", "comp"]);
        for (idx, counts) in self.edges.iter().enumerate() {
            table.push_row(
                EntityKey::Edge {
                    source: counts.source,
                    target: counts.target,
                },
                &[
                    counts.tri as f64,
                    counts.tpath as f64,
                    counts.quad as f64,
                    counts.mpath as f64,
                    self.edge_similarity(idx),
                    self.edge_complementarity(idx),
                ],
            );
        }
        table
    }

    fn global_table(&self) -> StatTable {
        let mut table = StatTable::new(["tri", "wedge", "quad", "path3", "sim", "comp"]);
        let paths3: u64 = self.edges.iter().map(|e| e.mpath).sum();
        let wedges: u64 = self.nodes.iter().map(|c| c.wedge).sum();
        table.push_row(
            EntityKey::Global,
            &[
                self.triangle_count() as f64,
                wedges as f64,
                self.quadrangle_count() as f64,
                paths3 as f64,
                self.global_similarity(),
                self.global_complementarity(),
            ],
        );
        table
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        f64::NAN
    } else {
        numerator as f64 / denominator as f64
    }
}
