use annealforge::annealer::Annealer;
use annealforge::config::AnnealParams;
use annealforge::error::AnnealError;
use annealforge::scorer::{aggregate, weighted_geo_mean, BenchmarkProblem, QualityScorer};
use rstest::rstest;
use strum::IntoEnumIterator;

fn small() -> AnnealParams {
    AnnealParams::new(100.0, 30, 0.8, 10)
}

#[rstest]
#[case(&[1.0, 1.0, 1.0], &[2.0, 3.0, 5.0], (2.0f64 * 3.0 * 5.0).powf(1.0 / 3.0))]
#[case(&[3.0, 1.0], &[7.0, 11.0], ((3.0 * 7.0f64.ln() + 11.0f64.ln()) / 4.0).exp())]
#[case(&[3.0, 3.0, 1.0, 1.0], &[4.0, 4.0, 16.0, 16.0], 4.0f64.powf(1.25))]
fn test_weighted_geo_mean(#[case] weights: &[f64], #[case] values: &[f64], #[case] expected: f64) {
    let got = weighted_geo_mean(weights, values).unwrap();
    assert!(
        (got - expected).abs() < 1e-9 * expected.max(1.0),
        "got {got}, expected {expected}"
    );
}

#[rstest]
#[case(&[1.0, 1.0], &[0.0, 2.0])]
#[case(&[1.0, 1.0], &[-1.0, 2.0])]
#[case(&[1.0, 1.0], &[f64::INFINITY, 2.0])]
#[case(&[1.0], &[1.0, 2.0])]
#[case(&[], &[])]
#[case(&[-1.0, 2.0], &[1.0, 2.0])]
#[case(&[0.0, 0.0], &[1.0, 2.0])]
fn test_weighted_geo_mean_rejects(#[case] weights: &[f64], #[case] values: &[f64]) {
    let err = weighted_geo_mean(weights, values).unwrap_err();
    assert!(matches!(err, AnnealError::Config(_)));
}

#[test]
fn test_quality_is_weighted_geomean_of_samples() {
    let report = QualityScorer::new(
        vec![BenchmarkProblem::Linear, BenchmarkProblem::OscillatingCost],
        vec![
            ("metropolis".to_string(), Annealer::new(small())),
            ("boltzmann".to_string(), Annealer::boltzmann(small())),
        ],
    )
    .with_seed(4)
    .score()
    .unwrap();

    assert_eq!(report.samples.len(), 4);
    let order: Vec<_> = report
        .samples
        .iter()
        .map(|s| (s.problem, s.optimizer.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            (BenchmarkProblem::Linear, "metropolis"),
            (BenchmarkProblem::Linear, "boltzmann"),
            (BenchmarkProblem::OscillatingCost, "metropolis"),
            (BenchmarkProblem::OscillatingCost, "boltzmann"),
        ]
    );

    let mut weights = vec![3.0; 4];
    weights.extend([1.0; 4]);
    let mut values: Vec<f64> = report.samples.iter().map(|s| s.cost).collect();
    values.extend(report.samples.iter().map(|s| s.transitions as f64));
    let expected = weighted_geo_mean(&weights, &values).unwrap();

    assert!((report.quality - expected).abs() < 1e-12);
    assert!((aggregate(&report.samples).unwrap() - expected).abs() < 1e-12);
}

#[test]
fn test_scoring_is_reproducible_and_parallel_safe() {
    let scorer = || {
        QualityScorer::new(
            BenchmarkProblem::iter().collect(),
            vec![("a".to_string(), Annealer::new(small()))],
        )
        .with_seed(99)
    };
    let seq = scorer().score().unwrap();
    let again = scorer().score().unwrap();
    let par = scorer().with_parallel(true).score().unwrap();

    assert_eq!(seq.quality, again.quality);
    assert_eq!(seq.quality, par.quality);
    for (a, b) in seq.samples.iter().zip(&par.samples) {
        assert_eq!(a.cost, b.cost);
        assert_eq!(a.transitions, b.transitions);
    }
}

#[test]
fn test_invalid_annealer_fails_scoring() {
    let broken = AnnealParams::new(100.0, 30, 1.5, 10);
    let err = QualityScorer::new(
        vec![BenchmarkProblem::Linear],
        vec![("broken".to_string(), Annealer::new(broken))],
    )
    .score()
    .unwrap_err();
    assert!(matches!(err, AnnealError::Config(_)));
}
