use scn_core::rng::RngHandle;
use scn_graph::{canonical_hash, karate_club};
use scn_ubcm::{FitOptions, FitStatus, Ubcm};

#[test]
fn karate_fit_reproduces_the_degree_sequence() {
    let graph = karate_club();
    let mut model = Ubcm::from_graph(&graph);
    let report = model.fit().unwrap();
    assert!(report.converged);
    assert!(report.max_abs_error <= 1e-10);
    model.validate().unwrap();

    let expected = model.expected_degrees().unwrap();
    for (node, &degree) in graph.degrees().iter().enumerate() {
        let relative = (expected[node] - degree as f64).abs() / (degree as f64).max(1.0);
        assert!(
            relative <= 1e-6,
            "node {node}: expected {} vs observed {degree}",
            expected[node]
        );
    }
}

#[test]
fn sampling_is_seed_deterministic() {
    let mut model = Ubcm::from_graph(&karate_club());
    model.fit().unwrap();

    let a = model.sample_one(&mut RngHandle::from_seed(303)).unwrap();
    let b = model.sample_one(&mut RngHandle::from_seed(303)).unwrap();
    let c = model.sample_one(&mut RngHandle::from_seed(404)).unwrap();
    assert_eq!(canonical_hash(&a), canonical_hash(&b));
    assert_ne!(canonical_hash(&a), canonical_hash(&c));

    // Batch sampling must agree with per-substream draws.
    let batch = model.sample(4, 777).unwrap();
    let third = model
        .sample_one(&mut RngHandle::substream(777, 2))
        .unwrap();
    assert_eq!(canonical_hash(&batch[2]), canonical_hash(&third));
}

#[test]
fn mean_sampled_degrees_converge_to_observed() {
    let graph = karate_club();
    let mut model = Ubcm::from_graph(&graph);
    model.fit().unwrap();
    model.validate().unwrap();

    let degrees = graph.degrees();
    let error_for = |n_samples: usize, seed: u64| -> f64 {
        let mut sums = vec![0.0f64; degrees.len()];
        for sample in model.sample(n_samples, seed).unwrap() {
            for (node, &d) in sample.degrees().iter().enumerate() {
                sums[node] += d as f64;
            }
        }
        degrees
            .iter()
            .enumerate()
            .map(|(node, &d)| (sums[node] / n_samples as f64 - d as f64).abs())
            .fold(0.0, f64::max)
    };

    let coarse = error_for(64, 11);
    let fine = error_for(1024, 12);
    // Monte Carlo error scales like 1/sqrt(N); allow five standard errors
    // of the largest-degree node.
    assert!(fine <= 5.0 * (17.0f64 / 1024.0).sqrt());
    assert!(fine < coarse);
}

#[test]
fn fit_failure_and_validation_failure_are_distinct() {
    let graph = karate_club();

    // One iteration cannot reach a 1e-10 tolerance.
    let mut starved = Ubcm::from_graph(&graph);
    let err = starved
        .fit_with(&FitOptions {
            tol: 1e-10,
            max_iter: 1,
            relaxation: 0.0,
        })
        .unwrap_err();
    assert_eq!(err.info().code, "fit-not-converged");
    assert!(matches!(starved.status(), FitStatus::Failed(_)));
    let sample_err = starved
        .sample_one(&mut RngHandle::from_seed(1))
        .unwrap_err();
    assert_eq!(sample_err.info().code, "model-not-fitted");

    // A deliberately loose fit converges by its own standard but fails the
    // strict validation gate.
    let mut loose = Ubcm::from_graph(&graph);
    loose
        .fit_with(&FitOptions {
            tol: 0.5,
            max_iter: 1000,
            relaxation: 0.0,
        })
        .unwrap();
    let err = loose.validate().unwrap_err();
    assert_eq!(err.info().code, "validation-failed");
}

#[test]
fn samples_preserve_isolated_nodes_and_simplicity() {
    let mut degrees = vec![0u32, 0];
    degrees.extend(vec![3u32; 12]);
    let mut model = Ubcm::from_degrees(degrees);
    model.fit().unwrap();
    model.validate().unwrap();
    for sample in model.sample(20, 99).unwrap() {
        assert_eq!(sample.degree(0), 0);
        assert_eq!(sample.degree(1), 0);
        assert_eq!(sample.node_count(), 14);
    }
}
