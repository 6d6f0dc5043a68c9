#![deny(missing_docs)]

//! Inference engine: orchestrates repeated sampling from a fitted null
//! model, evaluates an injectable statistic on the observed graph and on
//! every sample, and derives empirical p-values (with multiple-testing
//! correction) and calibrated log-ratio effect sizes.

mod comparison;
mod effects;
mod pvalues;

pub use comparison::{Comparison, Inference, InferenceOptions};
pub use effects::{calibrated_effects, mean_effects};
pub use pvalues::{
    adjust_pvalues, estimate_pvalues, significance, PoolBy, PvalueOptions, Sidedness,
};

use scn_census::{Granularity, PathCensus};
use scn_core::errors::ScnError;
use scn_core::rng::RngHandle;
use scn_core::table::StatTable;
use scn_graph::Graph;
use scn_ubcm::Ubcm;

/// A statistic maps a graph to a table of scalars. The inference engine is
/// polymorphic over this trait, so any graph summary can be compared against
/// the null model, not just the path census.
pub trait Statistic<G>: Sync {
    /// Computes the statistic table for `graph`.
    fn compute(&self, graph: &G) -> StatTable;
}

impl<G, F> Statistic<G> for F
where
    F: Fn(&G) -> StatTable + Sync,
{
    fn compute(&self, graph: &G) -> StatTable {
        self(graph)
    }
}

/// Path-census statistic at a fixed granularity, the default choice for the
/// structural coefficient analyses.
#[derive(Debug, Clone, Copy)]
pub struct CensusStatistic {
    granularity: Granularity,
}

impl CensusStatistic {
    /// Census coefficients at the given granularity.
    pub fn new(granularity: Granularity) -> Self {
        Self { granularity }
    }

    /// Per-node coefficients.
    pub fn nodes() -> Self {
        Self::new(Granularity::Nodes)
    }

    /// Whole-graph coefficients.
    pub fn global() -> Self {
        Self::new(Granularity::Global)
    }
}

impl Statistic<Graph> for CensusStatistic {
    fn compute(&self, graph: &Graph) -> StatTable {
        PathCensus::from_graph(graph).coefs(self.granularity)
    }
}

/// A fitted null model the engine can draw samples from.
///
/// `ensure_ready` is the validation gate: it is re-checked before every
/// batch, so a model whose fit failed or whose expected degrees drifted from
/// the observed sequence can never silently feed a comparison.
pub trait NullModel: Sync {
    /// Graph type produced by the sampler.
    type Graph: Send;

    /// Confirms the model is fitted and validated.
    fn ensure_ready(&self) -> Result<(), ScnError>;

    /// Draws one sample using the provided RNG.
    fn sample_one(&self, rng: &mut RngHandle) -> Result<Self::Graph, ScnError>;
}

impl NullModel for Ubcm {
    type Graph = Graph;

    fn ensure_ready(&self) -> Result<(), ScnError> {
        self.validate()
    }

    fn sample_one(&self, rng: &mut RngHandle) -> Result<Graph, ScnError> {
        Ubcm::sample_one(self, rng)
    }
}
