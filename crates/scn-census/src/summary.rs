//! Descriptive whole-graph summaries for reporting.

use scn_graph::{AttrValue, Graph};
use serde::{Deserialize, Serialize};

use crate::census::PathCensus;

/// Descriptive record for one network: size, density, degree statistics and
/// the two global structural coefficients. What the tabulation collaborators
/// join on downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    /// Graph `name` attribute when present.
    pub name: Option<String>,
    /// Graph `label` attribute when present.
    pub label: Option<String>,
    /// Node count.
    pub n_nodes: usize,
    /// Edge count.
    pub n_edges: usize,
    /// Edge density.
    pub density: f64,
    /// Minimum degree.
    pub d_min: u32,
    /// Maximum degree.
    pub d_max: u32,
    /// Mean degree.
    pub d_mean: f64,
    /// Coefficient of variation of the degree sequence.
    pub d_cv: f64,
    /// Global similarity (transitivity).
    pub sim: f64,
    /// Global complementarity.
    pub comp: f64,
}

/// Computes the descriptive summary of a graph.
pub fn describe(graph: &Graph) -> NetworkSummary {
    let census = PathCensus::from_graph(graph);
    describe_with_census(graph, &census)
}

/// Same as [`describe`], reusing an already computed census.
pub fn describe_with_census(graph: &Graph, census: &PathCensus) -> NetworkSummary {
    let degrees = graph.degrees();
    let n = degrees.len();
    let mean = if n == 0 {
        f64::NAN
    } else {
        degrees.iter().map(|&d| d as f64).sum::<f64>() / n as f64
    };
    let variance = if n == 0 {
        f64::NAN
    } else {
        degrees
            .iter()
            .map(|&d| {
                let delta = d as f64 - mean;
                delta * delta
            })
            .sum::<f64>()
            / n as f64
    };
    let cv = if mean > 0.0 {
        variance.sqrt() / mean
    } else {
        f64::NAN
    };
    NetworkSummary {
        name: attr_string(graph, "name"),
        label: attr_string(graph, "label"),
        n_nodes: n,
        n_edges: graph.edge_count(),
        density: graph.density(),
        d_min: degrees.iter().copied().min().unwrap_or(0),
        d_max: degrees.iter().copied().max().unwrap_or(0),
        d_mean: mean,
        d_cv: cv,
        sim: census.global_similarity(),
        comp: census.global_complementarity(),
    }
}

fn attr_string(graph: &Graph, key: &str) -> Option<String> {
    graph
        .attr(key)
        .and_then(AttrValue::as_str)
        .map(str::to_string)
}
