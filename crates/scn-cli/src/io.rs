//! Shared input loading and table output helpers for the subcommands.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use scn_core::table::{EntityKey, StatTable};
use scn_data::NetworkCache;
use scn_graph::{graph_from_json, Graph, PreprocessOptions};

/// Where the input graph comes from: a JSON file or the dataset cache.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Graph JSON file.
    #[arg(long, conflicts_with_all = ["data_root", "dataset", "network"])]
    pub input: Option<PathBuf>,
    /// Dataset cache root directory.
    #[arg(long, requires = "dataset")]
    pub data_root: Option<PathBuf>,
    /// Dataset name within the cache.
    #[arg(long, requires = "data_root")]
    pub dataset: Option<String>,
    /// Network name within the dataset; defaults to the dataset name.
    #[arg(long, requires = "dataset")]
    pub network: Option<String>,
    /// Preprocess the input (simplify + largest component) before analysis.
    #[arg(long)]
    pub preprocess: bool,
}

impl InputArgs {
    /// Loads the graph described by the arguments.
    pub fn load(&self) -> Result<Graph, Box<dyn Error>> {
        if let Some(path) = &self.input {
            let json = fs::read_to_string(path)?;
            let graph = graph_from_json(&json)?;
            if self.preprocess {
                let raw = scn_graph::RawNetwork {
                    n_nodes: graph.node_count() as u32,
                    edges: graph.edges().collect(),
                    attrs: graph.attrs().clone(),
                    node_attrs: graph.node_attrs().clone(),
                };
                return Ok(scn_graph::preprocess(&raw, &PreprocessOptions::default())?);
            }
            return Ok(graph);
        }
        let (root, dataset) = match (&self.data_root, &self.dataset) {
            (Some(root), Some(dataset)) => (root, dataset),
            _ => return Err("pass either --input or --data-root with --dataset".into()),
        };
        let cache = NetworkCache::new(root);
        let network = self.network.clone().unwrap_or_else(|| dataset.clone());
        let options = self.preprocess.then(PreprocessOptions::default);
        Ok(cache.load_graph(dataset, &network, options.as_ref())?)
    }
}

/// Writes a statistic table as CSV to `path`, or to stdout when `None`.
///
/// The entity key is split into `entity`, `id` and `degree` columns so
/// downstream tabulation can join on stable identifiers.
pub fn write_table_csv(table: &StatTable, path: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    let mut writer: csv::Writer<Box<dyn std::io::Write>> = match path {
        Some(path) => csv::Writer::from_writer(Box::new(fs::File::create(path)?)),
        None => csv::Writer::from_writer(Box::new(std::io::stdout())),
    };
    let mut header = vec![
        "entity".to_string(),
        "id".to_string(),
        "degree".to_string(),
    ];
    header.extend(table.columns().iter().cloned());
    writer.write_record(&header)?;
    for (key, row) in table.rows() {
        let (entity, id, degree) = match key {
            EntityKey::Global => ("global".to_string(), String::new(), String::new()),
            EntityKey::Node { id, degree } => {
                ("node".to_string(), id.to_string(), degree.to_string())
            }
            EntityKey::Edge { source, target } => {
                ("edge".to_string(), format!("{source}-{target}"), String::new())
            }
        };
        let mut record = vec![entity, id, degree];
        record.extend(row.iter().map(|value| value.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
