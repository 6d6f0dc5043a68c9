use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use scn_graph::{canonical_hash, graph_to_json};
use scn_ubcm::Ubcm;

use crate::io::InputArgs;

#[derive(Args, Debug)]
pub struct SampleArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Number of samples to draw.
    #[arg(long, default_value_t = 10)]
    pub n: usize,
    /// Master seed; sample k uses substream (seed, k).
    #[arg(long, default_value_t = 303)]
    pub seed: u64,
    /// Directory for the sampled graph JSON files.
    #[arg(long)]
    pub out_dir: PathBuf,
}

pub fn run(args: &SampleArgs) -> Result<(), Box<dyn Error>> {
    let graph = args.input.load()?;
    let mut model = Ubcm::from_graph(&graph);
    model.fit()?;
    model.validate()?;

    fs::create_dir_all(&args.out_dir)?;
    for (index, sample) in model.sample(args.n, args.seed)?.into_iter().enumerate() {
        let path = args.out_dir.join(format!("sample_{index:04}.json"));
        fs::write(&path, graph_to_json(&sample)?)?;
        println!("{} {}", path.display(), canonical_hash(&sample));
    }
    Ok(())
}
