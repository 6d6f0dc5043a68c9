//! Preprocessing of raw networks into analysis-ready graphs.
//!
//! The census and the null model are only defined on simple undirected
//! connected graphs, so every raw network passes through here first:
//! simplification (loop removal, symmetrization, parallel-edge merging) and
//! largest-connected-component extraction, with metadata carried over.

use std::collections::BTreeMap;

use scn_core::errors::{ErrorInfo, ScnError};
use serde::{Deserialize, Serialize};

use crate::graph::{AttrValue, Graph, RawNetwork};

/// Options controlling [`preprocess`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessOptions {
    /// Drop self-loops, symmetrize directed pairs and merge parallel edges.
    /// When disabled the raw edge list must already be simple.
    #[serde(default = "default_true")]
    pub simplify: bool,
    /// Restrict to the largest connected component.
    #[serde(default = "default_true")]
    pub largest_component: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            simplify: true,
            largest_component: true,
        }
    }
}

/// Turns a raw network into a simple undirected [`Graph`], optionally
/// restricted to its largest connected component.
pub fn preprocess(raw: &RawNetwork, options: &PreprocessOptions) -> Result<Graph, ScnError> {
    let edges = if options.simplify {
        simplify_edges(raw.n_nodes, &raw.edges)?
    } else {
        raw.edges.clone()
    };
    let mut graph = Graph::from_edges(raw.n_nodes, &edges)?;
    graph.replace_metadata(raw.attrs.clone(), raw.node_attrs.clone());
    if options.largest_component {
        graph = largest_component(&graph);
    }
    Ok(graph)
}

/// Deduplicated undirected edge list with self-loops removed.
fn simplify_edges(n_nodes: u32, edges: &[(u32, u32)]) -> Result<Vec<(u32, u32)>, ScnError> {
    let mut simple: Vec<(u32, u32)> = Vec::with_capacity(edges.len());
    for &(u, v) in edges {
        if u >= n_nodes || v >= n_nodes {
            return Err(ScnError::Graph(
                ErrorInfo::new("node-out-of-range", "edge endpoint exceeds node count")
                    .with_context("edge", format!("({u}, {v})"))
                    .with_context("n_nodes", n_nodes.to_string()),
            ));
        }
        if u == v {
            continue;
        }
        simple.push(if u < v { (u, v) } else { (v, u) });
    }
    simple.sort_unstable();
    simple.dedup();
    Ok(simple)
}

/// Induced subgraph on `nodes` (ascending, duplicate-free), remapping ids to
/// `0..nodes.len()` and restricting node attribute columns.
pub fn induced_subgraph(graph: &Graph, nodes: &[u32]) -> Graph {
    let mut position = vec![u32::MAX; graph.node_count()];
    for (new_id, &old_id) in nodes.iter().enumerate() {
        position[old_id as usize] = new_id as u32;
    }
    let mut edges = Vec::new();
    for &old_u in nodes {
        for &old_v in graph.neighbors(old_u) {
            if old_u < old_v && position[old_v as usize] != u32::MAX {
                edges.push((position[old_u as usize], position[old_v as usize]));
            }
        }
    }
    let mut sub = Graph::from_edges(nodes.len() as u32, &edges)
        .expect("induced edges of a simple graph are simple");
    let node_attrs: BTreeMap<String, Vec<AttrValue>> = graph
        .node_attrs()
        .iter()
        .map(|(key, column)| {
            let restricted = nodes
                .iter()
                .map(|&old_id| column[old_id as usize].clone())
                .collect();
            (key.clone(), restricted)
        })
        .collect();
    sub.replace_metadata(graph.attrs().clone(), node_attrs);
    sub
}

/// Largest connected component of a graph as an induced subgraph. Ties break
/// towards the component containing the smallest node id, so the result is
/// deterministic.
pub fn largest_component(graph: &Graph) -> Graph {
    let mut largest: Vec<u32> = Vec::new();
    for component in connected_components(graph) {
        if component.len() > largest.len() {
            largest = component;
        }
    }
    induced_subgraph(graph, &largest)
}

/// Connected components as ascending node-id lists, ordered by their
/// smallest member.
pub fn connected_components(graph: &Graph) -> Vec<Vec<u32>> {
    let n = graph.node_count();
    let mut visited = vec![false; n];
    let mut components = Vec::new();
    let mut queue = Vec::new();
    for start in 0..n as u32 {
        if visited[start as usize] {
            continue;
        }
        let mut component = Vec::new();
        visited[start as usize] = true;
        queue.push(start);
        while let Some(node) = queue.pop() {
            component.push(node);
            for &next in graph.neighbors(node) {
                if !visited[next as usize] {
                    visited[next as usize] = true;
                    queue.push(next);
                }
            }
        }
        component.sort_unstable();
        components.push(component);
    }
    components
}
