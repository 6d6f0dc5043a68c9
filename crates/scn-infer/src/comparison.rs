use rayon::prelude::*;
use scn_core::errors::{ErrorInfo, ScnError};
use scn_core::rng::RngHandle;
use scn_core::table::StatTable;
use serde::{Deserialize, Serialize};

use crate::effects::calibrated_effects;
use crate::pvalues::{estimate_pvalues, PoolBy, PvalueOptions};
use crate::{NullModel, Statistic};

/// Options for the comparison batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceOptions {
    /// Run the sample+statistic units on the rayon thread pool. The serial
    /// path produces bit-identical results; parallelism only changes wall
    /// time because every unit owns a seed substream derived from its
    /// sample id.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self { parallel: false }
    }
}

/// Observed statistic and its empirical null ensemble, indexed by sample id.
///
/// Kept only as long as the comparison needs it; the downstream artefacts
/// are the p-value and effect tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    /// Statistic of the observed graph.
    pub observed: StatTable,
    /// Statistic of each null sample, in sample-id order.
    pub null: Vec<StatTable>,
}

/// Ties together an observed graph, a fitted null model and a statistic.
pub struct Inference<'a, M: NullModel, S> {
    graph: &'a M::Graph,
    model: &'a M,
    statistic: S,
    options: InferenceOptions,
}

impl<'a, M, S> Inference<'a, M, S>
where
    M: NullModel,
    S: Statistic<M::Graph>,
{
    /// Creates an engine with default options (serial execution).
    pub fn new(graph: &'a M::Graph, model: &'a M, statistic: S) -> Self {
        Self::with_options(graph, model, statistic, InferenceOptions::default())
    }

    /// Creates an engine with explicit options.
    pub fn with_options(
        graph: &'a M::Graph,
        model: &'a M,
        statistic: S,
        options: InferenceOptions,
    ) -> Self {
        Self {
            graph,
            model,
            statistic,
            options,
        }
    }

    /// Draws `n_samples` null samples, computes the statistic on the
    /// observed graph and on every sample, and returns both.
    ///
    /// Sample `k` uses the RNG substream `(master_seed, k)`, so a comparison
    /// is reproducible given the seed regardless of `parallel`.
    pub fn init_comparison(
        &self,
        n_samples: usize,
        master_seed: u64,
    ) -> Result<Comparison, ScnError> {
        if n_samples == 0 {
            return Err(ScnError::Inference(ErrorInfo::new(
                "empty-ensemble",
                "a comparison needs at least one null sample",
            )));
        }
        self.model.ensure_ready()?;
        let observed = self.statistic.compute(self.graph);

        tracing::info!(n_samples, parallel = self.options.parallel, "drawing null ensemble");
        let model = self.model;
        let statistic = &self.statistic;
        let unit = move |k: usize| -> Result<StatTable, ScnError> {
            let mut rng = RngHandle::substream(master_seed, k as u64);
            let sample = model.sample_one(&mut rng)?;
            let table = statistic.compute(&sample);
            tracing::trace!(sample = k, "null sample evaluated");
            Ok(table)
        };
        let null: Result<Vec<StatTable>, ScnError> = if self.options.parallel {
            (0..n_samples).into_par_iter().map(unit).collect()
        } else {
            (0..n_samples).map(unit).collect()
        };
        let null = null?;

        for table in &null {
            if table.columns() != observed.columns() {
                return Err(ScnError::Inference(ErrorInfo::new(
                    "statistic-shape",
                    "the statistic produced differently shaped tables on null samples",
                )));
            }
        }
        tracing::info!(n_samples, "null ensemble complete");
        Ok(Comparison { observed, null })
    }

    /// Empirical p-values for an existing comparison; see
    /// [`crate::estimate_pvalues`].
    pub fn estimate_pvalues(
        &self,
        comparison: &Comparison,
        options: &PvalueOptions,
    ) -> Result<StatTable, ScnError> {
        estimate_pvalues(comparison, options)
    }

    /// Calibrated log-ratio effect sizes; see [`crate::calibrated_effects`].
    pub fn calibrated_effects(
        &self,
        comparison: &Comparison,
        pool_by: PoolBy,
    ) -> Result<StatTable, ScnError> {
        calibrated_effects(comparison, pool_by)
    }
}
