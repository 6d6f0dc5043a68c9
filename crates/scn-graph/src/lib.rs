#![deny(missing_docs)]

//! Simple undirected graph representation for the scn engine: construction
//! with enforced simplicity, preprocessing of raw networks, random and
//! reference generators, canonical hashing and serialization.

mod generators;
mod graph;
mod hash;
mod preprocess;
mod serialization;

pub use generators::{erdos_renyi, karate_club, random_geometric};
pub use graph::{AttrValue, Graph, RawNetwork};
pub use hash::canonical_hash;
pub use preprocess::{
    connected_components, induced_subgraph, largest_component, preprocess, PreprocessOptions,
};
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};
