use std::collections::BTreeMap;

use scn_core::errors::{ErrorInfo, ScnError};
use serde::{Deserialize, Serialize};

/// Scalar attribute value attached to a graph or to its nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value (dataset names, domains, labels, ...).
    Str(String),
}

impl AttrValue {
    /// Returns the string content when the value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

/// Unsanitized network as stored by the dataset cache: the edge list may
/// contain self-loops, duplicates and asymmetric (directed) pairs. Feed it
/// through [`crate::preprocess`] to obtain a [`Graph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNetwork {
    /// Number of nodes; edge endpoints must be `< n_nodes`.
    pub n_nodes: u32,
    /// Edge list, possibly dirty.
    pub edges: Vec<(u32, u32)>,
    /// Graph level metadata (`name`, `domain`, `relation`, `desc`, ...).
    #[serde(default)]
    pub attrs: BTreeMap<String, AttrValue>,
    /// Per-node attribute columns, each of length `n_nodes`.
    #[serde(default)]
    pub node_attrs: BTreeMap<String, Vec<AttrValue>>,
}

/// Simple undirected graph: sorted adjacency lists, no self-loops, no
/// multi-edges. Nodes are `0..node_count()`.
///
/// Simplicity is enforced at construction, so every consumer (the census,
/// the null model) can rely on it without re-checking.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    adjacency: Vec<Vec<u32>>,
    edge_count: usize,
    attrs: BTreeMap<String, AttrValue>,
    node_attrs: BTreeMap<String, Vec<AttrValue>>,
}

impl Graph {
    /// Builds a graph from a clean undirected edge list.
    ///
    /// Rejects out-of-range endpoints, self-loops and duplicate edges (in
    /// either orientation) with coded errors. Use [`crate::preprocess`] for
    /// dirty input.
    pub fn from_edges(n_nodes: u32, edges: &[(u32, u32)]) -> Result<Self, ScnError> {
        let n = n_nodes as usize;
        let mut adjacency: Vec<Vec<u32>> = vec![Vec::new(); n];
        for &(u, v) in edges {
            if u >= n_nodes || v >= n_nodes {
                return Err(ScnError::Graph(
                    ErrorInfo::new("node-out-of-range", "edge endpoint exceeds node count")
                        .with_context("edge", format!("({u}, {v})"))
                        .with_context("n_nodes", n_nodes.to_string()),
                ));
            }
            if u == v {
                return Err(ScnError::Graph(
                    ErrorInfo::new("self-loop", "self-loops are not allowed in a simple graph")
                        .with_context("node", u.to_string())
                        .with_hint("preprocess the raw network to drop loops"),
                ));
            }
            adjacency[u as usize].push(v);
            adjacency[v as usize].push(u);
        }
        for (node, list) in adjacency.iter_mut().enumerate() {
            list.sort_unstable();
            if list.windows(2).any(|w| w[0] == w[1]) {
                return Err(ScnError::Graph(
                    ErrorInfo::new("duplicate-edge", "duplicate edge in a simple graph")
                        .with_context("node", node.to_string())
                        .with_hint("preprocess the raw network to merge parallel edges"),
                ));
            }
        }
        Ok(Self {
            adjacency,
            edge_count: edges.len(),
            attrs: BTreeMap::new(),
            node_attrs: BTreeMap::new(),
        })
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Degree of `node`.
    pub fn degree(&self, node: u32) -> u32 {
        self.adjacency[node as usize].len() as u32
    }

    /// Degree sequence in node order.
    pub fn degrees(&self) -> Vec<u32> {
        self.adjacency.iter().map(|list| list.len() as u32).collect()
    }

    /// Sorted neighbours of `node`.
    pub fn neighbors(&self, node: u32) -> &[u32] {
        &self.adjacency[node as usize]
    }

    /// True when the undirected edge `{u, v}` exists.
    pub fn has_edge(&self, u: u32, v: u32) -> bool {
        self.adjacency[u as usize].binary_search(&v).is_ok()
    }

    /// Iterates over undirected edges as `(u, v)` with `u < v`, in
    /// lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, list)| {
            let u = u as u32;
            list.iter()
                .copied()
                .filter(move |&v| u < v)
                .map(move |v| (u, v))
        })
    }

    /// Edge density `2m / (n (n - 1))`; NaN for fewer than two nodes.
    pub fn density(&self) -> f64 {
        let n = self.node_count() as f64;
        if n < 2.0 {
            return f64::NAN;
        }
        2.0 * self.edge_count as f64 / (n * (n - 1.0))
    }

    /// Sets a graph level attribute.
    pub fn set_attr(&mut self, key: impl Into<String>, value: AttrValue) {
        self.attrs.insert(key.into(), value);
    }

    /// Returns a graph level attribute.
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// All graph level attributes.
    pub fn attrs(&self) -> &BTreeMap<String, AttrValue> {
        &self.attrs
    }

    /// Sets a per-node attribute column; its length must equal the node
    /// count.
    pub fn set_node_attr(
        &mut self,
        key: impl Into<String>,
        values: Vec<AttrValue>,
    ) -> Result<(), ScnError> {
        if values.len() != self.node_count() {
            return Err(ScnError::Graph(
                ErrorInfo::new("attr-length", "node attribute length must match node count")
                    .with_context("expected", self.node_count().to_string())
                    .with_context("actual", values.len().to_string()),
            ));
        }
        self.node_attrs.insert(key.into(), values);
        Ok(())
    }

    /// Returns a per-node attribute column.
    pub fn node_attr(&self, key: &str) -> Option<&[AttrValue]> {
        self.node_attrs.get(key).map(Vec::as_slice)
    }

    /// All per-node attribute columns.
    pub fn node_attrs(&self) -> &BTreeMap<String, Vec<AttrValue>> {
        &self.node_attrs
    }

    pub(crate) fn replace_metadata(
        &mut self,
        attrs: BTreeMap<String, AttrValue>,
        node_attrs: BTreeMap<String, Vec<AttrValue>>,
    ) {
        self.attrs = attrs;
        self.node_attrs = node_attrs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_and_queries_a_small_graph() {
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.degrees(), vec![2, 2, 3, 1]);
        assert!(g.has_edge(2, 0));
        assert!(!g.has_edge(0, 3));
        assert_eq!(g.neighbors(2), &[0, 1, 3]);
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2), (2, 3)]);
    }

    #[test]
    fn rejects_non_simple_input() {
        let loop_err = Graph::from_edges(2, &[(1, 1)]).unwrap_err();
        assert_eq!(loop_err.info().code, "self-loop");
        let dup_err = Graph::from_edges(3, &[(0, 1), (1, 0)]).unwrap_err();
        assert_eq!(dup_err.info().code, "duplicate-edge");
        let range_err = Graph::from_edges(2, &[(0, 5)]).unwrap_err();
        assert_eq!(range_err.info().code, "node-out-of-range");
    }

    #[test]
    fn node_attr_length_is_checked() {
        let mut g = Graph::from_edges(3, &[(0, 1)]).unwrap();
        let err = g
            .set_node_attr("label", vec![AttrValue::from("a")])
            .unwrap_err();
        assert_eq!(err.info().code, "attr-length");
        g.set_node_attr(
            "label",
            vec![
                AttrValue::from("a"),
                AttrValue::from("b"),
                AttrValue::from("c"),
            ],
        )
        .unwrap();
        assert_eq!(g.node_attr("label").unwrap().len(), 3);
    }
}
