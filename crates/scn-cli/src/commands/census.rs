use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use scn_census::{Granularity, PathCensus};

use crate::io::{write_table_csv, InputArgs};

#[derive(Args, Debug)]
pub struct CensusArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Table granularity: nodes, edges or global.
    #[arg(long, value_enum, default_value = "nodes")]
    pub granularity: GranularityArg,
    /// Output CSV path; stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum GranularityArg {
    Nodes,
    Edges,
    Global,
}

impl From<GranularityArg> for Granularity {
    fn from(value: GranularityArg) -> Self {
        match value {
            GranularityArg::Nodes => Granularity::Nodes,
            GranularityArg::Edges => Granularity::Edges,
            GranularityArg::Global => Granularity::Global,
        }
    }
}

pub fn run(args: &CensusArgs) -> Result<(), Box<dyn Error>> {
    let graph = args.input.load()?;
    let census = PathCensus::from_graph(&graph);
    let table = census.coefs(args.granularity.into());
    write_table_csv(&table, args.out.as_ref())
}
