use std::error::Error;

use clap::Args;
use scn_ubcm::{FitOptions, Ubcm};
use serde::Serialize;

use crate::io::InputArgs;

#[derive(Args, Debug)]
pub struct FitArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Convergence tolerance on the expected degree error.
    #[arg(long, default_value_t = 1e-10)]
    pub tol: f64,
    /// Maximum fixed-point iterations.
    #[arg(long, default_value_t = 10_000)]
    pub max_iter: usize,
    /// Relaxation factor in [0, 1).
    #[arg(long, default_value_t = 0.0)]
    pub relaxation: f64,
    /// Validation tolerance (relative expected-degree error).
    #[arg(long, default_value_t = 1e-6)]
    pub rtol: f64,
}

#[derive(Debug, Serialize)]
struct FitOutput {
    n_nodes: usize,
    iterations: usize,
    max_abs_error: f64,
    converged: bool,
    validated: bool,
}

pub fn run(args: &FitArgs) -> Result<(), Box<dyn Error>> {
    let graph = args.input.load()?;
    let mut model = Ubcm::from_graph(&graph);
    let report = model.fit_with(&FitOptions {
        tol: args.tol,
        max_iter: args.max_iter,
        relaxation: args.relaxation,
    })?;
    model.validate_with(args.rtol)?;
    let output = FitOutput {
        n_nodes: model.node_count(),
        iterations: report.iterations,
        max_abs_error: report.max_abs_error,
        converged: report.converged,
        validated: true,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
