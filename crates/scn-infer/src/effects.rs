//! Calibrated effect sizes.

use scn_core::errors::ScnError;
use scn_core::table::StatTable;

use crate::comparison::Comparison;
use crate::pvalues::{build_pools, pool_key, PoolBy};

/// Calibrated log-ratio effect size per entity and column:
/// `ln(observed / mean(null pool))`.
///
/// Zero or NaN observations, empty pools and non-positive pool means all
/// produce NaN — never ±infinity — so downstream aggregation over nodes or
/// graphs is not poisoned by degenerate entities.
pub fn calibrated_effects(
    comparison: &Comparison,
    pool_by: PoolBy,
) -> Result<StatTable, ScnError> {
    let pools = build_pools(comparison, pool_by)?;
    let observed = &comparison.observed;
    let mut table = StatTable::new(observed.columns().iter().map(String::as_str));
    let empty: Vec<Vec<f64>> = Vec::new();
    for (key, row) in observed.rows() {
        let pool = pools.get(&pool_key(key, pool_by)).unwrap_or(&empty);
        let effects: Vec<f64> = row
            .iter()
            .enumerate()
            .map(|(col, &value)| {
                let values = pool.get(col).map(Vec::as_slice).unwrap_or(&[]);
                log_ratio(value, values)
            })
            .collect();
        table.push_row(key, &effects);
    }
    Ok(table)
}

/// Per-column mean of an effect table with NaN entries skipped: the
/// graph-level calibrated coefficient.
pub fn mean_effects(effects: &StatTable) -> Vec<(String, f64)> {
    effects
        .columns()
        .iter()
        .enumerate()
        .map(|(col, name)| (name.clone(), effects.column_mean(col)))
        .collect()
}

fn log_ratio(observed: f64, pool: &[f64]) -> f64 {
    if !observed.is_finite() || pool.is_empty() {
        return f64::NAN;
    }
    let mean = pool.iter().sum::<f64>() / pool.len() as f64;
    let ratio = (observed / mean).ln();
    if ratio.is_finite() {
        ratio
    } else {
        f64::NAN
    }
}
