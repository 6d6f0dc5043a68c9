use sha2::{Digest, Sha256};

use crate::graph::Graph;

/// Canonical structural hash of a graph: node count plus the sorted edge
/// list. Metadata attributes are excluded, so two graphs hash equal exactly
/// when they are structurally identical. Used by determinism tests and by
/// sampling reports.
pub fn canonical_hash(graph: &Graph) -> String {
    let mut hasher = Sha256::new();
    hasher.update((graph.node_count() as u64).to_le_bytes());
    hasher.update((graph.edge_count() as u64).to_le_bytes());
    for (u, v) in graph.edges() {
        hasher.update(u.to_le_bytes());
        hasher.update(v.to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}
