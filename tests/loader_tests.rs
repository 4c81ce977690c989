mod common;

use common::DataContext;
use std::fs;
use weightforge::landscape::loader::{load_csv, split_and_standardize, Standardizer};
use weightforge::landscape::{FitnessLandscape, Matrix, NetworkTopology};

#[test]
fn test_load_with_header_and_string_labels() {
    let ctx = DataContext::new();
    let samples = load_csv(&ctx.csv_path).unwrap();

    assert_eq!(samples.rows.len(), 30);
    assert!(samples.rows.iter().all(|r| r.len() == 4));
    assert_eq!(samples.class_names, vec!["setosa", "versicolor", "virginica"]);
    assert_eq!(samples.labels[0], 0);
    assert_eq!(samples.labels[29], 2);
}

#[test]
fn test_integer_labels_without_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("numeric.csv");
    fs::write(&path, "0.1,0.2,1\n0.3,0.4,0\n0.5,0.6,2\n").unwrap();

    let samples = load_csv(&path).unwrap();
    assert_eq!(samples.labels, vec![1, 0, 2]);
    assert_eq!(samples.rows[2], vec![0.5, 0.6]);
}

#[test]
fn test_bad_value_after_header_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "a,b,label\n0.1,0.2,x\n0.3,oops,y\n").unwrap();
    assert!(load_csv(&path).is_err());
}

#[test]
fn test_missing_file() {
    assert!(load_csv("/no/such/file.csv").is_err());
}

#[test]
fn test_split_sizes_and_reproducibility() {
    let ctx = DataContext::new();
    let a = split_and_standardize(load_csv(&ctx.csv_path).unwrap(), 0.2, 42).unwrap();
    let b = split_and_standardize(load_csv(&ctx.csv_path).unwrap(), 0.2, 42).unwrap();

    assert_eq!(a.test.len(), 6);
    assert_eq!(a.train.len(), 24);
    assert_eq!(a.train, b.train);
    assert_eq!(a.test, b.test);
}

#[test]
fn test_split_rejects_bad_fraction() {
    let ctx = DataContext::new();
    let samples = load_csv(&ctx.csv_path).unwrap();
    assert!(split_and_standardize(samples.clone(), 0.0, 1).is_err());
    assert!(split_and_standardize(samples, 1.0, 1).is_err());
}

#[test]
fn test_train_columns_are_standardized() {
    let ctx = DataContext::new();
    let split = split_and_standardize(load_csv(&ctx.csv_path).unwrap(), 0.2, 7).unwrap();
    let m = &split.train.features;

    for c in 0..m.cols {
        let col: Vec<f64> = (0..m.rows).map(|r| m.row(r)[c]).collect();
        let mean = col.iter().sum::<f64>() / col.len() as f64;
        let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / col.len() as f64;
        assert!(mean.abs() < 1e-9, "column {} mean {}", c, mean);
        assert!((var - 1.0).abs() < 1e-9, "column {} variance {}", c, var);
    }
}

#[test]
fn test_constant_column_keeps_unit_std() {
    let m = Matrix::from_rows(&[vec![2.0, 1.0], vec![2.0, 3.0]]).unwrap();
    let scaler = Standardizer::fit(&m);
    assert_eq!(scaler.stds[0], 1.0);

    let mut m = m;
    scaler.apply(&mut m);
    assert_eq!(m.row(0)[0], 0.0);
    assert_eq!(m.row(1)[0], 0.0);
}

#[test]
fn test_landscape_from_csv() {
    let ctx = DataContext::new();
    let landscape = FitnessLandscape::from_csv(&ctx.csv_path, 0.2, 42, 8).unwrap();
    assert_eq!(landscape.topology, NetworkTopology::new(4, 8, 3));
    assert_eq!(landscape.dimensions(), 4 * 8 + 8 + 8 * 3 + 3);
}

#[test]
fn test_builtin_iris() {
    let samples = weightforge::landscape::loader::iris().unwrap();
    assert_eq!(samples.rows.len(), 150);
    assert_eq!(samples.class_names, vec!["setosa", "versicolor", "virginica"]);
    for class in 0..3 {
        assert_eq!(samples.labels.iter().filter(|&&l| l == class).count(), 50);
    }
    assert_eq!(samples.rows[0], vec![5.1, 3.5, 1.4, 0.2]);
}
