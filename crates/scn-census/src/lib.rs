#![deny(missing_docs)]

//! Path census engine: triangle / wedge and chordless-quadrangle / 3-path
//! counting on simple undirected graphs, with similarity and complementarity
//! coefficients at node, edge and global granularity.

mod census;
mod counts;
mod summary;

pub use census::{Granularity, PathCensus};
pub use counts::{edge_census, node_census, EdgeCounts, NodeCounts};
pub use summary::{describe, describe_with_census, NetworkSummary};
