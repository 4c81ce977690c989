use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use weightforge::landscape::{Dataset, FitnessLandscape, Matrix, NetworkTopology};

/// Iris-sized problem: 4 features, 3 classes, 120 train / 30 test rows.
fn setup_landscape() -> FitnessLandscape {
    let mut rng = fastrand::Rng::with_seed(7);
    let mut make = |rows: usize| {
        let mut data = Vec::with_capacity(rows * 4);
        let mut labels = Vec::with_capacity(rows);
        for r in 0..rows {
            let class = r % 3;
            for _ in 0..4 {
                data.push(class as f64 + rng.f64() - 0.5);
            }
            labels.push(class);
        }
        Dataset::new(Matrix::new(rows, 4, data).unwrap(), labels)
    };
    let train = make(120);
    let test = make(30);
    FitnessLandscape::new(NetworkTopology::new(4, 8, 3), train, test).unwrap()
}

fn fitness_benchmark(c: &mut Criterion) {
    let landscape = setup_landscape();
    let mut rng = fastrand::Rng::with_seed(42);
    let weights = landscape.random_weights(&mut rng);

    c.bench_function("fitness_iris_sized", |b| {
        b.iter(|| landscape.fitness(black_box(&weights)))
    });

    c.bench_function("accuracy_iris_sized", |b| {
        b.iter(|| landscape.accuracy(black_box(&weights)))
    });
}

criterion_group!(benches, fitness_benchmark);
criterion_main!(benches);
