mod common;

use common::toy_landscape;
use proptest::prelude::*;
use weightforge::landscape::engine::{argmax, sigmoid, softmax_in_place};
use weightforge::optimizer::colony::PheromoneGrid;
use weightforge::optimizer::crossover::splice_at;
use weightforge::optimizer::tabu::move_between;

prop_compose! {
    fn arb_weights()(w in prop::collection::vec(-3.0..3.0f64, 26)) -> Vec<f64> {
        w
    }
}

proptest! {
    #[test]
    fn fitness_is_finite_and_bounded(w in arb_weights()) {
        let landscape = toy_landscape();
        let f = landscape.fitness(&w);
        prop_assert!(f.is_finite());
        // The log epsilon can lift a near-certain prediction a hair above zero
        prop_assert!(f <= 1e-9);
        let acc = landscape.accuracy(&w);
        prop_assert!((0.0..=1.0).contains(&acc));
    }

    #[test]
    fn sigmoid_stays_in_range(x in -1e6..1e6f64) {
        let s = sigmoid(x);
        prop_assert!((0.0..=1.0).contains(&s));
        prop_assert!(s.is_finite());
    }

    #[test]
    fn softmax_is_a_distribution(mut row in prop::collection::vec(-800.0..800.0f64, 1..6)) {
        softmax_in_place(&mut row);
        let sum: f64 = row.iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
        prop_assert!(row.iter().all(|p| *p >= 0.0));
    }

    #[test]
    fn argmax_returns_a_maximum(values in prop::collection::vec(-10.0..10.0f64, 1..10)) {
        let i = argmax(&values);
        prop_assert!(values.iter().all(|v| *v <= values[i]));
        prop_assert!(values[..i].iter().all(|v| *v < values[i]));
    }

    #[test]
    fn splice_takes_prefix_and_suffix(
        p1 in prop::collection::vec(-1.0..1.0f64, 2..20),
        seed in any::<u64>()
    ) {
        let p2: Vec<f64> = p1.iter().map(|v| v + 10.0).collect();
        let cut = fastrand::Rng::with_seed(seed).usize(1..p1.len());
        let child = splice_at(&p1, &p2, cut);
        prop_assert_eq!(&child[..cut], &p1[..cut]);
        prop_assert_eq!(&child[cut..], &p2[cut..]);
    }

    #[test]
    fn grid_index_is_clamped(value in -50.0..50.0f64, points in 2usize..30) {
        let grid = PheromoneGrid::new(1, points, -1.0, 1.0);
        let idx = grid.index_of(value);
        prop_assert!(idx < points);
    }

    #[test]
    fn move_points_at_largest_change(
        current in prop::collection::vec(-1.0..1.0f64, 1..12),
        seed in any::<u64>()
    ) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let neighbor: Vec<f64> = current.iter().map(|v| v + rng.f64() - 0.5).collect();
        let mv = move_between(&current, &neighbor);
        let deltas: Vec<f64> = current.iter().zip(&neighbor).map(|(c, n)| (n - c).abs()).collect();
        prop_assert!(deltas.iter().all(|d| *d <= deltas[mv.dimension]));
        let expected = if neighbor[mv.dimension] > current[mv.dimension] { 1 } else { -1 };
        prop_assert_eq!(mv.direction, expected);
    }
}
