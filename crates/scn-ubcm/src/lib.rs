#![deny(missing_docs)]

//! Undirected binary configuration model (UBCM): the maximum-entropy
//! distribution over simple graphs whose expected degree sequence equals an
//! observed one. Fitting, validation and reproducible sampling.

mod sampling;
mod solver;

pub use solver::{degree_classes, pair_probability, DegreeClass, FitOptions, FitReport};

use scn_core::errors::{ErrorInfo, ScnError};
use scn_core::rng::RngHandle;
use scn_graph::Graph;
use serde::{Deserialize, Serialize};

/// Outcome of the most recent fit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FitStatus {
    /// `fit()` has not been called yet.
    Unfitted,
    /// The solver reached the requested tolerance.
    Converged(FitReport),
    /// The solver ran out of iterations; sampling is refused.
    Failed(FitReport),
}

/// Fitted (or to-be-fitted) UBCM for one observed degree sequence.
///
/// The parameter vector is stored per degree class; nodes of equal degree
/// provably share the same maximum-likelihood parameter. After a successful
/// [`Ubcm::fit`] the model is immutable in practice: sampling and probability
/// queries take `&self`, so one fitted model can be shared read-only across
/// any number of concurrent sampling units.
#[derive(Debug, Clone)]
pub struct Ubcm {
    degrees: Vec<u32>,
    classes: Vec<DegreeClass>,
    class_of: Vec<usize>,
    x: Vec<f64>,
    status: FitStatus,
}

/// Default relative tolerance for [`Ubcm::validate`].
pub const DEFAULT_VALIDATION_RTOL: f64 = 1e-6;

impl Ubcm {
    /// Builds an unfitted model from an observed graph's degree sequence.
    pub fn from_graph(graph: &Graph) -> Self {
        Self::from_degrees(graph.degrees())
    }

    /// Builds an unfitted model from an explicit degree sequence.
    pub fn from_degrees(degrees: Vec<u32>) -> Self {
        let classes = degree_classes(&degrees);
        let class_of = degrees
            .iter()
            .map(|&d| {
                classes
                    .binary_search_by_key(&d, |class| class.degree)
                    .expect("every degree has a class by construction")
            })
            .collect();
        Self {
            degrees,
            classes,
            class_of,
            x: Vec::new(),
            status: FitStatus::Unfitted,
        }
    }

    /// Observed degree sequence the model reproduces in expectation.
    pub fn degrees(&self) -> &[u32] {
        &self.degrees
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.degrees.len()
    }

    /// Current fit status.
    pub fn status(&self) -> FitStatus {
        self.status
    }

    /// Fits the model with default options.
    pub fn fit(&mut self) -> Result<FitReport, ScnError> {
        self.fit_with(&FitOptions::default())
    }

    /// Fits the model, solving `E[d_i] = d_i` for the class parameters.
    ///
    /// A non-converged solve leaves the model in [`FitStatus::Failed`] and
    /// returns a `fit-not-converged` error: the caller must not sample from
    /// it, and [`Ubcm::sample_one`] enforces that.
    pub fn fit_with(&mut self, options: &FitOptions) -> Result<FitReport, ScnError> {
        let (x, report) = solver::solve(&self.classes, options);
        self.x = x;
        if report.converged {
            tracing::debug!(
                iterations = report.iterations,
                max_abs_error = report.max_abs_error,
                "ubcm fit converged"
            );
            self.status = FitStatus::Converged(report);
            Ok(report)
        } else {
            self.status = FitStatus::Failed(report);
            Err(ScnError::Model(
                ErrorInfo::new("fit-not-converged", "UBCM fixed point did not converge")
                    .with_context("iterations", report.iterations.to_string())
                    .with_context("max_abs_error", report.max_abs_error.to_string())
                    .with_hint("raise max_iter or the relaxation factor"),
            ))
        }
    }

    /// Checks that the fitted expected degrees reproduce the observed ones
    /// within `DEFAULT_VALIDATION_RTOL`.
    pub fn validate(&self) -> Result<(), ScnError> {
        self.validate_with(DEFAULT_VALIDATION_RTOL)
    }

    /// Validation with an explicit relative tolerance: fails loudly when any
    /// node violates `|E[d_i] - d_i| <= rtol * max(d_i, 1)`.
    pub fn validate_with(&self, rtol: f64) -> Result<(), ScnError> {
        self.ensure_fitted()?;
        let mut worst: Option<(usize, f64, f64)> = None;
        for (c, class) in self.classes.iter().enumerate() {
            let observed = class.degree as f64;
            let expected = solver::expected_degree(&self.classes, &self.x, c);
            let relative = (expected - observed).abs() / observed.max(1.0);
            if worst.map_or(true, |(_, _, w)| relative > w) {
                worst = Some((c, expected, relative));
            }
        }
        if let Some((c, expected, relative)) = worst {
            if relative > rtol {
                return Err(ScnError::Model(
                    ErrorInfo::new(
                        "validation-failed",
                        "fitted expected degrees diverge from the observed sequence",
                    )
                    .with_context("degree", self.classes[c].degree.to_string())
                    .with_context("expected", expected.to_string())
                    .with_context("relative_error", relative.to_string())
                    .with_context("rtol", rtol.to_string()),
                ));
            }
        }
        Ok(())
    }

    /// Expected degree sequence implied by the fitted parameters.
    pub fn expected_degrees(&self) -> Result<Vec<f64>, ScnError> {
        self.ensure_fitted()?;
        let per_class: Vec<f64> = (0..self.classes.len())
            .map(|c| solver::expected_degree(&self.classes, &self.x, c))
            .collect();
        Ok(self.class_of.iter().map(|&c| per_class[c]).collect())
    }

    /// Fitted edge probability for the pair `(i, j)`.
    pub fn edge_probability(&self, i: u32, j: u32) -> Result<f64, ScnError> {
        self.ensure_fitted()?;
        if i == j {
            return Ok(0.0);
        }
        let xi = self.x[self.class_of[i as usize]];
        let xj = self.x[self.class_of[j as usize]];
        Ok(pair_probability(xi, xj))
    }

    /// Per-node parameters `x_i`.
    pub fn params(&self) -> Result<Vec<f64>, ScnError> {
        self.ensure_fitted()?;
        Ok(self.class_of.iter().map(|&c| self.x[c]).collect())
    }

    /// Per-node log-parameters `theta_i = ln x_i` (`-inf` for isolated
    /// nodes, whose connection probabilities are zero).
    pub fn theta(&self) -> Result<Vec<f64>, ScnError> {
        Ok(self.params()?.into_iter().map(f64::ln).collect())
    }

    /// Draws one random simple graph from the fitted ensemble.
    ///
    /// Reproducible: the same fitted model and the same `rng` state always
    /// yield the same graph.
    pub fn sample_one(&self, rng: &mut RngHandle) -> Result<Graph, ScnError> {
        self.ensure_fitted()?;
        let params = self.params()?;
        let edges = sampling::draw_edges(&params, rng);
        Graph::from_edges(self.node_count() as u32, &edges)
    }

    /// Draws `n` independent samples, one substream per sample id derived
    /// from `master_seed`. Sample `k` is identical whether drawn here or by
    /// any parallel scheme using `RngHandle::substream(master_seed, k)`.
    pub fn sample(&self, n: usize, master_seed: u64) -> Result<Vec<Graph>, ScnError> {
        (0..n)
            .map(|k| {
                let mut rng = RngHandle::substream(master_seed, k as u64);
                self.sample_one(&mut rng)
            })
            .collect()
    }

    fn ensure_fitted(&self) -> Result<(), ScnError> {
        match self.status {
            FitStatus::Converged(_) => Ok(()),
            FitStatus::Unfitted => Err(ScnError::Model(ErrorInfo::new(
                "model-not-fitted",
                "call fit() before querying or sampling the model",
            ))),
            FitStatus::Failed(report) => Err(ScnError::Model(
                ErrorInfo::new("model-not-fitted", "the last fit attempt did not converge")
                    .with_context("max_abs_error", report.max_abs_error.to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfitted_model_refuses_to_sample() {
        let model = Ubcm::from_degrees(vec![2, 2, 2]);
        let err = model.sample_one(&mut RngHandle::from_seed(1)).unwrap_err();
        assert_eq!(err.info().code, "model-not-fitted");
    }

    #[test]
    fn fit_validate_and_query_probabilities() {
        let mut model = Ubcm::from_degrees(vec![3; 10]);
        model.fit().unwrap();
        model.validate().unwrap();
        let p = model.edge_probability(0, 1).unwrap();
        assert!((p - 3.0 / 9.0).abs() < 1e-8);
        assert_eq!(model.edge_probability(4, 4).unwrap(), 0.0);
        let expected = model.expected_degrees().unwrap();
        assert!(expected.iter().all(|&e| (e - 3.0).abs() < 1e-8));
    }
}
