use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use scn_infer::{
    significance, CensusStatistic, Inference, InferenceOptions, PoolBy, PvalueOptions, Sidedness,
};
use scn_ubcm::Ubcm;
use serde::{Deserialize, Serialize};

use crate::commands::census::GranularityArg;
use crate::io::{write_table_csv, InputArgs};

#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// YAML run configuration; command line flags below are used when
    /// omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Number of null samples.
    #[arg(long, default_value_t = 100)]
    pub samples: usize,
    /// Master seed for the null ensemble.
    #[arg(long, default_value_t = 303)]
    pub seed: u64,
    /// Statistic granularity: nodes, edges or global.
    #[arg(long, value_enum, default_value = "nodes")]
    pub granularity: GranularityArg,
    /// Evaluate samples on the rayon thread pool.
    #[arg(long)]
    pub parallel: bool,
    /// Output CSV for adjusted p-values; stdout when omitted.
    #[arg(long)]
    pub pvalues: Option<PathBuf>,
    /// Output CSV for calibrated effects.
    #[arg(long)]
    pub effects: Option<PathBuf>,
    /// Output CSV for significance flags.
    #[arg(long)]
    pub flags: Option<PathBuf>,
}

/// YAML-configurable comparison run, mirroring the command line flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub sidedness: Sidedness,
    #[serde(default)]
    pub pool_by: PoolBy,
    #[serde(default = "default_adjust")]
    pub adjust: bool,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_samples() -> usize {
    100
}

fn default_seed() -> u64 {
    303
}

fn default_adjust() -> bool {
    true
}

fn default_alpha() -> f64 {
    0.01
}

impl CompareArgs {
    fn config(&self) -> Result<CompareConfig, Box<dyn Error>> {
        if let Some(path) = &self.config {
            let yaml = fs::read_to_string(path)?;
            return Ok(serde_yaml::from_str(&yaml)?);
        }
        Ok(CompareConfig {
            samples: self.samples,
            seed: self.seed,
            parallel: self.parallel,
            sidedness: Sidedness::default(),
            pool_by: PoolBy::default(),
            adjust: true,
            alpha: 0.01,
        })
    }
}

pub fn run(args: &CompareArgs) -> Result<(), Box<dyn Error>> {
    let config = args.config()?;
    let graph = args.input.load()?;

    let mut model = Ubcm::from_graph(&graph);
    model.fit()?;
    model.validate()?;

    let statistic = CensusStatistic::new(args.granularity.into());
    let infer = Inference::with_options(
        &graph,
        &model,
        statistic,
        InferenceOptions {
            parallel: config.parallel,
        },
    );
    let comparison = infer.init_comparison(config.samples, config.seed)?;

    let pvalue_options = PvalueOptions {
        sidedness: config.sidedness,
        pool_by: config.pool_by,
        adjust: config.adjust,
        alpha: config.alpha,
    };
    let pvalues = infer.estimate_pvalues(&comparison, &pvalue_options)?;
    write_table_csv(&pvalues, args.pvalues.as_ref())?;

    if let Some(path) = &args.effects {
        let effects = infer.calibrated_effects(&comparison, config.pool_by)?;
        write_table_csv(&effects, Some(path))?;
    }
    if let Some(path) = &args.flags {
        let flags = significance(&pvalues, config.alpha);
        write_table_csv(&flags, Some(path))?;
    }
    Ok(())
}
