//! Empirical p-values and multiple-testing correction.
//!
//! Under the configuration model the distribution of a node-level statistic
//! depends on the node only through its degree, so node rows pool null
//! values over the degree class recorded in each sample by default. This is
//! what makes moderate ensembles (a few hundred samples) sufficient: every
//! observed node is compared against `n_samples * class_size` null values
//! rather than `n_samples`.

use std::collections::BTreeMap;

use scn_core::errors::{ErrorInfo, ScnError};
use scn_core::table::{EntityKey, StatTable};
use serde::{Deserialize, Serialize};

use crate::comparison::Comparison;

/// Direction of the "at least as extreme" comparison.
///
/// Enrichment (significantly *high* similarity / complementarity) is the
/// usual question, so `Greater` is the default; the direction is an explicit
/// parameter rather than an implicit convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Sidedness {
    /// P(null >= observed).
    #[default]
    Greater,
    /// P(null <= observed).
    Less,
    /// Two-sided: twice the smaller one-sided p, capped at 1.
    TwoSided,
}

/// How null values are pooled per observed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PoolBy {
    /// Pool node rows by degree class (the UBCM sufficient statistic).
    /// Global rows always pool over samples; edge rows fall back to entity
    /// pooling.
    #[default]
    Degree,
    /// Pool strictly by entity identity.
    Entity,
}

/// Options for [`estimate_pvalues`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PvalueOptions {
    /// Comparison direction.
    #[serde(default)]
    pub sidedness: Sidedness,
    /// Null pooling scheme.
    #[serde(default)]
    pub pool_by: PoolBy,
    /// Apply Benjamini-Hochberg adjustment across entities within each
    /// column.
    #[serde(default = "default_adjust")]
    pub adjust: bool,
    /// Significance level used by [`significance`] flags and recorded in
    /// reports.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_adjust() -> bool {
    true
}

fn default_alpha() -> f64 {
    0.01
}

impl Default for PvalueOptions {
    fn default() -> Self {
        Self {
            sidedness: Sidedness::default(),
            pool_by: PoolBy::default(),
            adjust: default_adjust(),
            alpha: default_alpha(),
        }
    }
}

/// Key a row pools its null values under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum PoolKey {
    Global,
    Degree(u32),
    Node(u32),
    Edge(u32, u32),
}

pub(crate) fn pool_key(key: EntityKey, pool_by: PoolBy) -> PoolKey {
    match (key, pool_by) {
        (EntityKey::Global, _) => PoolKey::Global,
        (EntityKey::Node { degree, .. }, PoolBy::Degree) => PoolKey::Degree(degree),
        (EntityKey::Node { id, .. }, PoolBy::Entity) => PoolKey::Node(id),
        (EntityKey::Edge { source, target }, _) => PoolKey::Edge(source, target),
    }
}

/// Collects per-column null pools from the ensemble; NaN values are dropped.
pub(crate) fn build_pools(
    comparison: &Comparison,
    pool_by: PoolBy,
) -> Result<BTreeMap<PoolKey, Vec<Vec<f64>>>, ScnError> {
    let ncols = comparison.observed.ncols();
    let mut pools: BTreeMap<PoolKey, Vec<Vec<f64>>> = BTreeMap::new();
    for table in &comparison.null {
        if table.columns() != comparison.observed.columns() {
            return Err(ScnError::Inference(ErrorInfo::new(
                "statistic-shape",
                "null tables do not share the observed table's columns",
            )));
        }
        for (key, row) in table.rows() {
            let pool = pools
                .entry(pool_key(key, pool_by))
                .or_insert_with(|| vec![Vec::new(); ncols]);
            for (col, &value) in row.iter().enumerate() {
                if value.is_finite() {
                    pool[col].push(value);
                }
            }
        }
    }
    Ok(pools)
}

/// Estimates empirical p-values for every entity and column of the observed
/// table, keyed identically to it.
///
/// The estimator is `(1 + k) / (1 + n)` with `k` the number of pooled null
/// values at least as extreme as the observed one, so a finite ensemble
/// never yields p = 0. Rows with NaN observations or empty pools yield NaN.
pub fn estimate_pvalues(
    comparison: &Comparison,
    options: &PvalueOptions,
) -> Result<StatTable, ScnError> {
    let pools = build_pools(comparison, options.pool_by)?;
    let observed = &comparison.observed;
    let mut table = StatTable::new(observed.columns().iter().map(String::as_str));
    let empty: Vec<Vec<f64>> = Vec::new();
    for (key, row) in observed.rows() {
        let pool = pools
            .get(&pool_key(key, options.pool_by))
            .unwrap_or(&empty);
        let mut pvals = Vec::with_capacity(row.len());
        for (col, &value) in row.iter().enumerate() {
            let values = pool.get(col).map(Vec::as_slice).unwrap_or(&[]);
            pvals.push(empirical_pvalue(value, values, options.sidedness));
        }
        table.push_row(key, &pvals);
    }
    if options.adjust {
        Ok(adjust_table(&table))
    } else {
        Ok(table)
    }
}

fn empirical_pvalue(observed: f64, pool: &[f64], sidedness: Sidedness) -> f64 {
    if !observed.is_finite() || pool.is_empty() {
        return f64::NAN;
    }
    let n = pool.len() as f64;
    let greater = pool.iter().filter(|&&v| v >= observed).count() as f64;
    let less = pool.iter().filter(|&&v| v <= observed).count() as f64;
    let p_greater = (1.0 + greater) / (1.0 + n);
    let p_less = (1.0 + less) / (1.0 + n);
    match sidedness {
        Sidedness::Greater => p_greater,
        Sidedness::Less => p_less,
        Sidedness::TwoSided => (2.0 * p_greater.min(p_less)).min(1.0),
    }
}

/// Benjamini-Hochberg adjustment of a p-value slice.
///
/// NaN entries are passed through untouched and do not count towards the
/// number of tests. Usable at any significance level without recomputing
/// the empirical distribution.
pub fn adjust_pvalues(pvalues: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..pvalues.len())
        .filter(|&i| pvalues[i].is_finite())
        .collect();
    let m = order.len();
    if m == 0 {
        return pvalues.to_vec();
    }
    order.sort_by(|&a, &b| {
        pvalues[a]
            .partial_cmp(&pvalues[b])
            .expect("finite p-values are comparable")
    });
    let mut adjusted = pvalues.to_vec();
    let mut running_min = 1.0f64;
    for (rank, &idx) in order.iter().enumerate().rev() {
        let candidate = (pvalues[idx] * m as f64 / (rank + 1) as f64).min(1.0);
        running_min = running_min.min(candidate);
        adjusted[idx] = running_min;
    }
    adjusted
}

fn adjust_table(pvalues: &StatTable) -> StatTable {
    let ncols = pvalues.ncols();
    let adjusted_columns: Vec<Vec<f64>> = (0..ncols)
        .map(|col| adjust_pvalues(&pvalues.column_values(col).collect::<Vec<f64>>()))
        .collect();
    let mut table = StatTable::new(pvalues.columns().iter().map(String::as_str));
    for row in 0..pvalues.nrows() {
        let values: Vec<f64> = (0..ncols).map(|col| adjusted_columns[col][row]).collect();
        table.push_row(pvalues.key(row), &values);
    }
    table
}

/// Binary significance flags (1.0 when `p <= alpha`, 0.0 otherwise, NaN
/// passed through), keyed like the p-value table.
pub fn significance(pvalues: &StatTable, alpha: f64) -> StatTable {
    let mut table = StatTable::new(pvalues.columns().iter().map(String::as_str));
    for (key, row) in pvalues.rows() {
        let flags: Vec<f64> = row
            .iter()
            .map(|&p| {
                if p.is_nan() {
                    f64::NAN
                } else if p <= alpha {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();
        table.push_row(key, &flags);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benjamini_hochberg_matches_hand_computation() {
        // Classic example: p = [0.01, 0.02, 0.03, 0.04] with m = 4.
        // Adjusted: [0.04, 0.04, 0.04, 0.04].
        let adjusted = adjust_pvalues(&[0.01, 0.02, 0.03, 0.04]);
        for value in &adjusted {
            assert!((value - 0.04).abs() < 1e-12);
        }

        // Mixed case with a clear split.
        let adjusted = adjust_pvalues(&[0.001, 0.5, 0.04]);
        assert!((adjusted[0] - 0.003).abs() < 1e-12);
        assert!((adjusted[2] - 0.06).abs() < 1e-12);
        assert!((adjusted[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn nan_pvalues_survive_adjustment_untouched() {
        let adjusted = adjust_pvalues(&[0.02, f64::NAN, 0.01]);
        assert!(adjusted[1].is_nan());
        // m = 2 finite tests.
        assert!((adjusted[2] - 0.02).abs() < 1e-12);
        assert!((adjusted[0] - 0.02).abs() < 1e-12);
    }

    #[test]
    fn empirical_pvalue_sidedness() {
        let pool = [1.0, 2.0, 3.0, 4.0, 5.0];
        let greater = empirical_pvalue(4.5, &pool, Sidedness::Greater);
        assert!((greater - 2.0 / 6.0).abs() < 1e-12);
        let less = empirical_pvalue(4.5, &pool, Sidedness::Less);
        assert!((less - 5.0 / 6.0).abs() < 1e-12);
        let two = empirical_pvalue(4.5, &pool, Sidedness::TwoSided);
        assert!((two - 4.0 / 6.0).abs() < 1e-12);
        assert!(empirical_pvalue(f64::NAN, &pool, Sidedness::Greater).is_nan());
        assert!(empirical_pvalue(1.0, &[], Sidedness::Greater).is_nan());
    }
}
