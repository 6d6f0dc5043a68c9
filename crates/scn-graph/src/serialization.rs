use std::collections::BTreeMap;

use scn_core::errors::{ErrorInfo, ScnError};
use serde::{Deserialize, Serialize};

use crate::graph::{AttrValue, Graph};

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &Graph) -> Result<Vec<u8>, ScnError> {
    bincode::serialize(&SerializableGraph::from_graph(graph))
        .map_err(|err| ScnError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<Graph, ScnError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| ScnError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &Graph) -> Result<String, ScnError> {
    serde_json::to_string_pretty(&SerializableGraph::from_graph(graph))
        .map_err(|err| ScnError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON string. Simplicity is re-validated on load.
pub fn graph_from_json(json: &str) -> Result<Graph, ScnError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| ScnError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    n_nodes: u32,
    edges: Vec<(u32, u32)>,
    attrs: BTreeMap<String, AttrValue>,
    node_attrs: BTreeMap<String, Vec<AttrValue>>,
}

impl SerializableGraph {
    fn from_graph(graph: &Graph) -> Self {
        Self {
            n_nodes: graph.node_count() as u32,
            edges: graph.edges().collect(),
            attrs: graph.attrs().clone(),
            node_attrs: graph.node_attrs().clone(),
        }
    }

    fn into_graph(self) -> Result<Graph, ScnError> {
        let mut graph = Graph::from_edges(self.n_nodes, &self.edges)?;
        for (key, values) in self.node_attrs {
            graph.set_node_attr(key, values)?;
        }
        for (key, value) in self.attrs {
            graph.set_attr(key, value);
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::canonical_hash;

    #[test]
    fn json_round_trip_preserves_structure_and_metadata() {
        let mut graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        graph.set_attr("name", AttrValue::from("square"));
        graph
            .set_node_attr(
                "weight",
                vec![
                    AttrValue::Float(0.5),
                    AttrValue::Float(1.5),
                    AttrValue::Float(2.5),
                    AttrValue::Float(3.5),
                ],
            )
            .unwrap();
        let json = graph_to_json(&graph).unwrap();
        let restored = graph_from_json(&json).unwrap();
        assert_eq!(canonical_hash(&graph), canonical_hash(&restored));
        assert_eq!(restored.attr("name"), Some(&AttrValue::from("square")));
        assert_eq!(restored.node_attr("weight").unwrap().len(), 4);
    }

    #[test]
    fn bytes_round_trip_matches_json_round_trip() {
        let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 0), (3, 4)]).unwrap();
        let bytes = graph_to_bytes(&graph).unwrap();
        let restored = graph_from_bytes(&bytes).unwrap();
        assert_eq!(canonical_hash(&graph), canonical_hash(&restored));
    }

    #[test]
    fn corrupt_json_yields_a_coded_error() {
        let err = graph_from_json("{not json").unwrap_err();
        assert_eq!(err.info().code, "deserialize-json");
    }
}
