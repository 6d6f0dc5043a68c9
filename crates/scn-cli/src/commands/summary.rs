use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use scn_census::describe;

use crate::io::InputArgs;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &SummaryArgs) -> Result<(), Box<dyn Error>> {
    let graph = args.input.load()?;
    let summary = describe(&graph);
    let json = serde_json::to_string_pretty(&summary)?;
    match &args.out {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
