#![deny(missing_docs)]

//! On-disk dataset cache.
//!
//! Networks are grouped into named datasets; each network is one JSON file
//! `<root>/<dataset>/<dataset>__<name>.json` holding a
//! [`RawNetwork`] with its metadata attributes (`name`, `domain`,
//! `relation`, `desc`, `label`, ...). The cache only lists, loads and stores
//! local files — acquisition from remote catalogues is somebody else's job,
//! and nothing here performs network I/O.

use std::fs;
use std::path::{Path, PathBuf};

use scn_core::errors::{ErrorInfo, ScnError};
use scn_graph::{preprocess, AttrValue, Graph, PreprocessOptions, RawNetwork};

/// Handle to a cache directory.
#[derive(Debug, Clone)]
pub struct NetworkCache {
    root: PathBuf,
}

impl NetworkCache {
    /// Opens (without touching the filesystem) a cache rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the cache.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists the network names stored for `dataset`, sorted.
    pub fn list(&self, dataset: &str) -> Result<Vec<String>, ScnError> {
        let dir = self.root.join(dataset);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&dir).map_err(|err| {
            ScnError::Data(
                ErrorInfo::new("cache-list", err.to_string())
                    .with_context("path", dir.display().to_string()),
            )
        })?;
        let prefix = format!("{dataset}__");
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| {
                ScnError::Data(
                    ErrorInfo::new("cache-list", err.to_string())
                        .with_context("path", dir.display().to_string()),
                )
            })?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if let Some(stem) = file_name.strip_suffix(".json") {
                if let Some(name) = stem.strip_prefix(&prefix) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Stores a raw network under `dataset` / `name`, creating directories
    /// as needed, and returns the file path.
    pub fn store(
        &self,
        dataset: &str,
        name: &str,
        network: &RawNetwork,
    ) -> Result<PathBuf, ScnError> {
        let path = self.file_path(dataset, name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                ScnError::Data(
                    ErrorInfo::new("cache-write", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(network).map_err(|err| {
            ScnError::Data(ErrorInfo::new("cache-encode", err.to_string()))
        })?;
        fs::write(&path, json).map_err(|err| {
            ScnError::Data(
                ErrorInfo::new("cache-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Ok(path)
    }

    /// Loads the raw network stored under `dataset` / `name`.
    pub fn load(&self, dataset: &str, name: &str) -> Result<RawNetwork, ScnError> {
        let path = self.file_path(dataset, name);
        if !path.exists() {
            return Err(ScnError::Data(
                ErrorInfo::new("cache-missing", "network is not in the cache")
                    .with_context("dataset", dataset)
                    .with_context("name", name)
                    .with_context("path", path.display().to_string()),
            ));
        }
        let json = fs::read_to_string(&path).map_err(|err| {
            ScnError::Data(
                ErrorInfo::new("cache-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&json).map_err(|err| {
            ScnError::Data(
                ErrorInfo::new("cache-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Loads and preprocesses a network into an analysis-ready graph.
    ///
    /// `options = None` skips preprocessing entirely, in which case the
    /// stored edge list must already be simple. The `name` attribute is
    /// filled in from the cache key when the stored metadata lacks it.
    pub fn load_graph(
        &self,
        dataset: &str,
        name: &str,
        options: Option<&PreprocessOptions>,
    ) -> Result<Graph, ScnError> {
        let raw = self.load(dataset, name)?;
        let mut graph = match options {
            Some(options) => preprocess(&raw, options)?,
            None => preprocess(
                &raw,
                &PreprocessOptions {
                    simplify: false,
                    largest_component: false,
                },
            )?,
        };
        if graph.attr("name").is_none() {
            graph.set_attr("name", AttrValue::from(name));
        }
        Ok(graph)
    }

    /// Path of the file backing `dataset` / `name`. Names containing the
    /// dataset separator `__` are used verbatim.
    pub fn file_path(&self, dataset: &str, name: &str) -> PathBuf {
        let file = if name.contains("__") {
            format!("{name}.json")
        } else {
            format!("{dataset}__{name}.json")
        };
        self.root.join(dataset).join(file)
    }
}
