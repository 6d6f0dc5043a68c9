//! Fixed-point solver for the UBCM likelihood equations.
//!
//! The model assigns every node a parameter `x_i >= 0` and connects each
//! unordered pair independently with probability
//! `p_ij = x_i x_j / (1 + x_i x_j)`. Fitting solves `E[d_i] = d_i` for all
//! nodes. Nodes of equal degree share the same parameter (a symmetry of the
//! maximum-entropy problem), so the iteration runs over degree classes
//! rather than nodes, which compresses the system from `n` unknowns to the
//! number of distinct degrees.

use serde::{Deserialize, Serialize};

/// Options controlling the fixed-point iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitOptions {
    /// Convergence threshold on `max_i |E[d_i] - d_i|`.
    #[serde(default = "default_tol")]
    pub tol: f64,
    /// Maximum number of fixed-point iterations.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    /// Relaxation factor in `[0, 1)`: `x <- (1 - r) x_new + r x_old`.
    /// Zero (the default) is the plain fixed point; raise it for dense
    /// graphs where the plain iteration oscillates.
    #[serde(default)]
    pub relaxation: f64,
}

fn default_tol() -> f64 {
    1e-10
}

fn default_max_iter() -> usize {
    10_000
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            tol: default_tol(),
            max_iter: default_max_iter(),
            relaxation: 0.0,
        }
    }
}

/// Diagnostics of a completed (or abandoned) fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    /// Iterations performed.
    pub iterations: usize,
    /// Final `max_i |E[d_i] - d_i|`.
    pub max_abs_error: f64,
    /// Whether the error dropped below the tolerance.
    pub converged: bool,
}

/// One degree class: a distinct degree value and its multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeClass {
    /// Degree shared by every node in the class.
    pub degree: u32,
    /// Number of nodes with this degree.
    pub count: u64,
}

/// Groups a degree sequence into sorted degree classes.
pub fn degree_classes(degrees: &[u32]) -> Vec<DegreeClass> {
    let mut sorted = degrees.to_vec();
    sorted.sort_unstable();
    let mut classes: Vec<DegreeClass> = Vec::new();
    for degree in sorted {
        match classes.last_mut() {
            Some(class) if class.degree == degree => class.count += 1,
            _ => classes.push(DegreeClass { degree, count: 1 }),
        }
    }
    classes
}

/// Expected degree of a node in class `c` under class parameters `x`.
///
/// `sum_{j != i} p_ij`, with the node's own contribution to its class sum
/// removed.
pub fn expected_degree(classes: &[DegreeClass], x: &[f64], c: usize) -> f64 {
    let xc = x[c];
    if xc == 0.0 {
        return 0.0;
    }
    let mut expected = 0.0;
    for (h, class) in classes.iter().enumerate() {
        let p = pair_probability(xc, x[h]);
        expected += class.count as f64 * p;
        if h == c {
            expected -= p;
        }
    }
    expected
}

/// Edge probability for parameters `xa`, `xb`.
pub fn pair_probability(xa: f64, xb: f64) -> f64 {
    let product = xa * xb;
    if product.is_infinite() {
        return 1.0;
    }
    product / (1.0 + product)
}

/// Runs the fixed-point iteration; returns class parameters and diagnostics.
///
/// The update for class `c` with target degree `d_c` is
/// `x_c <- d_c / (sum_h n_h x_h / (1 + x_c x_h) - x_c / (1 + x_c^2))`,
/// the Squartini–Garlaschelli iteration restricted to degree classes.
pub fn solve(classes: &[DegreeClass], options: &FitOptions) -> (Vec<f64>, FitReport) {
    let total_degree: f64 = classes
        .iter()
        .map(|class| class.degree as f64 * class.count as f64)
        .sum();
    // Chung-Lu style starting point; exact for sparse uncorrelated graphs.
    let scale = total_degree.sqrt().max(1.0);
    let mut x: Vec<f64> = classes
        .iter()
        .map(|class| class.degree as f64 / scale)
        .collect();

    let relaxation = options.relaxation.clamp(0.0, 0.99);
    let mut report = FitReport {
        iterations: 0,
        max_abs_error: max_abs_error(classes, &x),
        converged: false,
    };

    for iteration in 0..options.max_iter {
        if report.max_abs_error <= options.tol {
            report.converged = true;
            break;
        }
        let mut next = vec![0.0; x.len()];
        for (c, class) in classes.iter().enumerate() {
            if class.degree == 0 {
                continue;
            }
            let xc = x[c];
            let mut denominator = 0.0;
            for (h, other) in classes.iter().enumerate() {
                denominator += other.count as f64 * x[h] / (1.0 + xc * x[h]);
            }
            denominator -= xc / (1.0 + xc * xc);
            if denominator > 0.0 {
                next[c] = class.degree as f64 / denominator;
            } else {
                next[c] = xc;
            }
        }
        for (value, old) in next.iter_mut().zip(&x) {
            *value = (1.0 - relaxation) * *value + relaxation * old;
        }
        x = next;
        report.iterations = iteration + 1;
        report.max_abs_error = max_abs_error(classes, &x);
    }
    if report.max_abs_error <= options.tol {
        report.converged = true;
    }
    (x, report)
}

fn max_abs_error(classes: &[DegreeClass], x: &[f64]) -> f64 {
    let mut worst = 0.0f64;
    for c in 0..classes.len() {
        let error = (expected_degree(classes, x, c) - classes[c].degree as f64).abs();
        worst = worst.max(error);
    }
    worst
}
