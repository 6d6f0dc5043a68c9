//! Sampling simple graphs from a fitted model.

use scn_core::rng::RngHandle;

use crate::solver::pair_probability;

/// Draws one graph as an edge list: every unordered pair `(i, j)` enters
/// independently with probability `p_ij = x_i x_j / (1 + x_i x_j)`.
///
/// `x` holds the per-node parameters. Pairs where either parameter is zero
/// are skipped wholesale, so isolated observed nodes stay isolated in every
/// sample.
pub fn draw_edges(x: &[f64], rng: &mut RngHandle) -> Vec<(u32, u32)> {
    let n = x.len();
    let mut edges = Vec::new();
    for i in 0..n {
        let xi = x[i];
        if xi == 0.0 {
            continue;
        }
        for j in (i + 1)..n {
            let xj = x[j];
            if xj == 0.0 {
                continue;
            }
            if rng.uniform() < pair_probability(xi, xj) {
                edges.push((i as u32, j as u32));
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_parameters_never_connect() {
        let x = vec![0.0, 1e9, 1e9];
        let mut rng = RngHandle::from_seed(5);
        for _ in 0..50 {
            let edges = draw_edges(&x, &mut rng);
            assert!(edges.iter().all(|&(u, v)| u != 0 && v != 0));
        }
    }

    #[test]
    fn huge_parameters_connect_almost_surely() {
        let x = vec![1e12; 4];
        let mut rng = RngHandle::from_seed(5);
        let edges = draw_edges(&x, &mut rng);
        assert_eq!(edges.len(), 6);
    }
}
