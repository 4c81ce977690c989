mod common;

use common::toy_landscape;
use rstest::rstest;
use weightforge::algorithms::Algorithm;
use weightforge::config::{AcoParams, Config, GaParams, PsoParams, TabuParams};
use weightforge::optimizer::Runner;

fn config() -> Config {
    Config {
        ga: GaParams {
            population_size: 8,
            generations: 6,
            ..Default::default()
        },
        pso: PsoParams {
            swarm_size: 6,
            iterations: 6,
            ..Default::default()
        },
        aco: AcoParams {
            ant_count: 5,
            iterations: 6,
            ..Default::default()
        },
        tabu: TabuParams {
            iterations: 6,
            neighborhood_size: 5,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[rstest]
#[case(Algorithm::Ga)]
#[case(Algorithm::Pso)]
#[case(Algorithm::Aco)]
#[case(Algorithm::Tabu)]
fn test_same_seed_same_run(#[case] algorithm: Algorithm) {
    let runner = Runner::new(toy_landscape(), config());
    let a = runner.run(algorithm, Some(1234)).unwrap();
    let b = runner.run(algorithm, Some(1234)).unwrap();

    assert_eq!(a.best_weights, b.best_weights);
    assert_eq!(a.best_fitness, b.best_fitness);
    assert_eq!(a.history.best_fitness, b.history.best_fitness);
    assert_eq!(a.history.best_accuracy, b.history.best_accuracy);
    assert_eq!(a.history.secondary, b.history.secondary);
}

#[rstest]
#[case(Algorithm::Ga)]
#[case(Algorithm::Pso)]
#[case(Algorithm::Tabu)]
fn test_different_seeds_diverge(#[case] algorithm: Algorithm) {
    let runner = Runner::new(toy_landscape(), config());
    let a = runner.run(algorithm, Some(1)).unwrap();
    let b = runner.run(algorithm, Some(2)).unwrap();
    assert_ne!(a.best_weights, b.best_weights);
}

#[test]
fn test_shared_landscape_is_untouched() {
    let landscape = toy_landscape();
    let weights = vec![0.05; landscape.dimensions()];
    let before = landscape.fitness(&weights);

    let runner = Runner::new(landscape.clone(), config());
    runner.run_all(Some(5), true).unwrap();

    assert_eq!(landscape.fitness(&weights), before);
}

#[test]
fn test_run_all_with_maximum_seed() {
    let runner = Runner::new(toy_landscape(), config());
    let sequential = runner.run_all(Some(u64::MAX), false).unwrap();
    let parallel = runner.run_all(Some(u64::MAX), true).unwrap();

    assert_eq!(sequential.algorithms.len(), 4);
    assert_eq!(sequential.best_algorithm, parallel.best_algorithm);
    for (algo, report) in &sequential.algorithms {
        assert_eq!(report.accuracy_history, parallel.algorithms[algo].accuracy_history);
    }
}
