//! Statistic tables exchanged between graph statistics and the inference
//! engine.
//!
//! A statistic maps a graph to a table of scalars: named columns, one row per
//! entity (a node, an edge, or the whole graph). [`StatTable`] is that
//! interchange type. Node keys carry the node degree because degree is the
//! sufficient statistic of the configuration model: the inference engine
//! pools null values over degree classes when estimating p-values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies the entity a table row refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKey {
    /// Whole-graph scalar summary.
    Global,
    /// A single node together with its observed degree.
    Node {
        /// Node identifier.
        id: u32,
        /// Degree of the node in the graph the statistic was computed on.
        degree: u32,
    },
    /// An undirected edge, endpoints ordered `source < target`.
    Edge {
        /// Smaller endpoint.
        source: u32,
        /// Larger endpoint.
        target: u32,
    },
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Global => write!(f, "global"),
            EntityKey::Node { id, .. } => write!(f, "node:{id}"),
            EntityKey::Edge { source, target } => write!(f, "edge:{source}-{target}"),
        }
    }
}

/// Column-named table of scalars keyed by [`EntityKey`].
///
/// Values are stored row major. `NaN` is a legal value and means "undefined
/// for this entity" (e.g. similarity of a degree-1 node); consumers skip NaN
/// rather than propagate it into aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatTable {
    columns: Vec<String>,
    keys: Vec<EntityKey>,
    values: Vec<f64>,
}

impl StatTable {
    /// Creates an empty table with the given column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Appends a row. The number of values must match the number of columns.
    pub fn push_row(&mut self, key: EntityKey, values: &[f64]) {
        assert_eq!(
            values.len(),
            self.columns.len(),
            "row arity must match column count"
        );
        self.keys.push(key);
        self.values.extend_from_slice(values);
    }

    /// Returns the column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the position of a column by name.
    pub fn col(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of rows in the table.
    pub fn nrows(&self) -> usize {
        self.keys.len()
    }

    /// Number of columns in the table.
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the key of row `row`.
    pub fn key(&self, row: usize) -> EntityKey {
        self.keys[row]
    }

    /// Returns the values of row `row`.
    pub fn row(&self, row: usize) -> &[f64] {
        let w = self.columns.len();
        &self.values[row * w..(row + 1) * w]
    }

    /// Returns a single cell.
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.columns.len() + col]
    }

    /// Iterates over `(key, row values)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (EntityKey, &[f64])> + '_ {
        let w = self.columns.len();
        self.keys
            .iter()
            .copied()
            .zip(self.values.chunks_exact(w.max(1)))
    }

    /// Iterates over the values of column `col`.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        let w = self.columns.len();
        self.values.iter().skip(col).step_by(w.max(1)).copied()
    }

    /// Mean of a column with NaN entries skipped; NaN when nothing is finite.
    pub fn column_mean(&self, col: usize) -> f64 {
        let mut sum = 0.0;
        let mut count = 0usize;
        for v in self.column_values(col) {
            if v.is_finite() {
                sum += v;
                count += 1;
            }
        }
        if count == 0 {
            f64::NAN
        } else {
            sum / count as f64
        }
    }

    /// True when `other` has identical keys and columns, so cells can be
    /// combined positionally.
    pub fn same_shape(&self, other: &StatTable) -> bool {
        self.columns == other.columns && self.keys == other.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> StatTable {
        let mut table = StatTable::new(["sim", "comp"]);
        table.push_row(EntityKey::Node { id: 0, degree: 3 }, &[0.5, 0.1]);
        table.push_row(EntityKey::Node { id: 1, degree: 1 }, &[f64::NAN, 0.2]);
        table
    }

    #[test]
    fn lookup_and_iteration() {
        let table = sample_table();
        assert_eq!(table.col("comp"), Some(1));
        assert_eq!(table.nrows(), 2);
        assert_eq!(table.value(0, 0), 0.5);
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[1].0, EntityKey::Node { id: 1, degree: 1 });
    }

    #[test]
    fn column_mean_skips_nan() {
        let table = sample_table();
        let sim = table.col("sim").unwrap();
        assert_eq!(table.column_mean(sim), 0.5);
    }

    #[test]
    fn serde_round_trip() {
        let table = sample_table();
        let json = serde_json::to_string(&table).unwrap();
        let back: StatTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.columns(), table.columns());
        assert_eq!(back.nrows(), table.nrows());
        assert_eq!(back.value(0, 1), table.value(0, 1));
    }
}
