//! Recovery of known p-values from a synthetic null distribution.

use rand::RngCore;
use scn_core::rng::RngHandle;
use scn_core::table::{EntityKey, StatTable};
use scn_infer::{estimate_pvalues, Comparison, PoolBy, PvalueOptions, Sidedness};

fn global_row(value: f64) -> StatTable {
    let mut table = StatTable::new(["stat"]);
    table.push_row(EntityKey::Global, &[value]);
    table
}

fn uniform_null(n: usize, seed: u64) -> Vec<StatTable> {
    let mut rng = RngHandle::from_seed(seed);
    (0..n)
        .map(|_| {
            let u = (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64);
            global_row(u)
        })
        .collect()
}

fn pvalue_of(observed: f64, sidedness: Sidedness) -> f64 {
    let comparison = Comparison {
        observed: global_row(observed),
        null: uniform_null(999, 2024),
    };
    let pvals = estimate_pvalues(
        &comparison,
        &PvalueOptions {
            sidedness,
            pool_by: PoolBy::Entity,
            adjust: false,
            alpha: 0.01,
        },
    )
    .unwrap();
    pvals.value(0, 0)
}

#[test]
fn one_sided_pvalues_track_the_uniform_quantile() {
    // Against Uniform(0, 1) nulls, P(null >= q) = 1 - q.
    for &(quantile, expected) in &[(0.5, 0.5), (0.9, 0.1), (0.1, 0.9)] {
        let p = pvalue_of(quantile, Sidedness::Greater);
        assert!(
            (p - expected).abs() < 0.05,
            "quantile {quantile}: got {p}, expected ~{expected}"
        );
    }
}

#[test]
fn two_sided_pvalue_at_the_median_is_near_one() {
    let p = pvalue_of(0.5, Sidedness::TwoSided);
    assert!(p > 0.9);
}

#[test]
fn less_sided_pvalue_mirrors_greater() {
    let greater = pvalue_of(0.8, Sidedness::Greater);
    let less = pvalue_of(0.8, Sidedness::Less);
    assert!((greater + less - 1.0).abs() < 0.01);
}

#[test]
fn extreme_observations_hit_the_estimator_floor() {
    // Nothing in the pool exceeds 2.0, so p = 1/(n+1), never zero.
    let p = pvalue_of(2.0, Sidedness::Greater);
    assert!((p - 1.0 / 1000.0).abs() < 1e-12);
}
