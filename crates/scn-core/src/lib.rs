#![deny(missing_docs)]

//! Shared contracts for the scn engine: structured errors, the deterministic
//! RNG policy, and the statistic tables exchanged between graph statistics
//! and the inference engine.

pub mod errors;
pub mod rng;
pub mod table;

pub use errors::{ErrorInfo, ScnError};
pub use rng::{derive_substream_seed, RngHandle};
pub use table::{EntityKey, StatTable};
