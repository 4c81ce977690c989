#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use weightforge::landscape::{Dataset, FitnessLandscape, Matrix, NetworkTopology};

/// Eight points, three features, two linearly separable classes.
pub fn toy_dataset() -> Dataset {
    let rows = vec![
        vec![-1.0, -0.8, -1.2],
        vec![-0.9, -1.1, -0.7],
        vec![-1.2, -0.6, -1.0],
        vec![-0.7, -1.0, -0.9],
        vec![1.0, 0.9, 1.1],
        vec![0.8, 1.2, 0.7],
        vec![1.1, 0.7, 1.0],
        vec![0.9, 1.0, 1.3],
    ];
    let labels = vec![0, 0, 0, 0, 1, 1, 1, 1];
    Dataset::new(Matrix::from_rows(&rows).unwrap(), labels)
}

pub fn toy_topology() -> NetworkTopology {
    NetworkTopology::new(3, 4, 2)
}

pub fn toy_landscape() -> Arc<FitnessLandscape> {
    let data = toy_dataset();
    Arc::new(FitnessLandscape::new(toy_topology(), data.clone(), data).unwrap())
}

/// A temp directory holding a small three-class CSV with a header row.
pub struct DataContext {
    _dir: TempDir,
    pub csv_path: PathBuf,
    pub dir_path: PathBuf,
}

impl DataContext {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let csv_path = dir.path().join("flowers.csv");
        let dir_path = dir.path().to_path_buf();

        let mut file = File::create(&csv_path).unwrap();
        writeln!(file, "sepal_length,sepal_width,petal_length,petal_width,species").unwrap();
        let centers = [
            ("setosa", [5.0, 3.4, 1.5, 0.2]),
            ("versicolor", [5.9, 2.8, 4.3, 1.3]),
            ("virginica", [6.6, 3.0, 5.6, 2.0]),
        ];
        for (name, c) in centers {
            for i in 0..10 {
                let jitter = (i as f64 - 4.5) * 0.04;
                writeln!(
                    file,
                    "{:.2},{:.2},{:.2},{:.2},{}",
                    c[0] + jitter,
                    c[1] - jitter,
                    c[2] + jitter,
                    c[3] + jitter * 0.5,
                    name
                )
                .unwrap();
            }
        }

        Self {
            _dir: dir,
            csv_path,
            dir_path,
        }
    }
}
