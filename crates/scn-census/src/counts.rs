//! Raw path and cycle counting.
//!
//! The per-edge census is the primary object: triangles and chordless
//! quadrangles through each edge, together with the 2- and 3-path counts the
//! coefficients are normalized by. Node counts aggregate the edge rows (each
//! triangle at a node spans two of its edges, likewise each quadrangle), and
//! the handful of node quantities that are not edge sums (`wedge`, `head`,
//! `hpath`) come from closed forms and a two-hop sweep.

use scn_graph::Graph;

/// Raw counts for one undirected edge `(source, target)`, `source < target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeCounts {
    /// Smaller endpoint.
    pub source: u32,
    /// Larger endpoint.
    pub target: u32,
    /// Triangles containing the edge (= common neighbours of its endpoints).
    pub tri: u64,
    /// Chordless quadrangles containing the edge.
    pub quad: u64,
    /// 2-paths containing the edge: `d_u + d_v - 2`.
    pub tpath: u64,
    /// 3-paths having the edge in the middle position:
    /// `(d_u - 1)(d_v - 1) - tri`.
    pub mpath: u64,
}

/// Raw counts for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeCounts {
    /// Triangles containing the node.
    pub tri: u64,
    /// Wedges centred at the node: `C(d, 2)` = possible triangles.
    pub wedge: u64,
    /// 2-paths with the node as an endpoint.
    pub head: u64,
    /// Chordless quadrangles containing the node.
    pub quad: u64,
    /// 3-paths with the node in a middle position.
    pub wpath: u64,
    /// 3-paths with the node as an endpoint.
    pub hpath: u64,
}

/// Counts triangles, chordless quadrangles and path denominators per edge.
pub fn edge_census(graph: &Graph) -> Vec<EdgeCounts> {
    let n = graph.node_count();
    let mut counts = Vec::with_capacity(graph.edge_count());
    // Stamped membership marks for N(u) and N(v); an epoch per edge avoids
    // clearing between iterations.
    let mut mark_u = vec![0u32; n];
    let mut mark_v = vec![0u32; n];
    let mut epoch = 0u32;

    for (u, v) in graph.edges() {
        epoch += 1;
        for &x in graph.neighbors(u) {
            mark_u[x as usize] = epoch;
        }
        for &x in graph.neighbors(v) {
            mark_v[x as usize] = epoch;
        }

        let du = graph.degree(u) as u64;
        let dv = graph.degree(v) as u64;
        let tri = graph
            .neighbors(u)
            .iter()
            .filter(|&&x| mark_v[x as usize] == epoch)
            .count() as u64;

        // Quadrangles u-v-l-k: k a non-common neighbour of u, l a
        // non-common neighbour of v, with the closing edge k-l present.
        // Excluding common neighbours enforces chordlessness: the cycle's
        // diagonals are (u, l) and (v, k).
        let mut quad = 0u64;
        for &k in graph.neighbors(u) {
            if k == v || mark_v[k as usize] == epoch {
                continue;
            }
            for &l in graph.neighbors(k) {
                if l != u && mark_v[l as usize] == epoch && mark_u[l as usize] != epoch {
                    quad += 1;
                }
            }
        }

        counts.push(EdgeCounts {
            source: u,
            target: v,
            tri,
            quad,
            tpath: du + dv - 2,
            mpath: (du - 1) * (dv - 1) - tri,
        });
    }
    counts
}

/// Aggregates the edge census into per-node counts and fills in the node
/// quantities that are not sums over incident edges.
pub fn node_census(graph: &Graph, edges: &[EdgeCounts]) -> Vec<NodeCounts> {
    let n = graph.node_count();
    let mut counts = vec![NodeCounts::default(); n];

    // Each triangle at a node spans exactly two of its edges; likewise each
    // quadrangle. A 3-path whose middle edge touches the node has the node
    // in a middle position, once.
    let mut tri2 = vec![0u64; n];
    let mut quad2 = vec![0u64; n];
    for edge in edges {
        for node in [edge.source, edge.target] {
            let node = node as usize;
            tri2[node] += edge.tri;
            quad2[node] += edge.quad;
            counts[node].wpath += edge.mpath;
        }
    }

    let mut mark = vec![0u32; n];
    for i in 0..n as u32 {
        let idx = i as usize;
        let d = graph.degree(i) as u64;
        counts[idx].tri = tri2[idx] / 2;
        counts[idx].quad = quad2[idx] / 2;
        counts[idx].wedge = d * d.saturating_sub(1) / 2;

        let epoch = i + 1;
        for &j in graph.neighbors(i) {
            mark[j as usize] = epoch;
            counts[idx].head += graph.degree(j) as u64 - 1;
        }
        // 3-paths i-j-k-l: any continuation of a 2-path from i, minus the
        // step back to j (already excluded by d_k - 1) and minus l = i.
        let mut hpath = 0u64;
        for &j in graph.neighbors(i) {
            for &k in graph.neighbors(j) {
                if k == i {
                    continue;
                }
                let dk = graph.degree(k) as u64;
                let back_to_i = u64::from(mark[k as usize] == epoch);
                hpath += (dk - 1) - back_to_i;
            }
        }
        counts[idx].hpath = hpath;
    }
    counts
}
