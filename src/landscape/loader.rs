use super::types::{Dataset, Matrix};
use crate::error::{WeightForgeError, WfResult};
use std::collections::BTreeSet;
use std::path::Path;

/// Raw samples as read from disk, before splitting.
#[derive(Debug, Clone, Default)]
pub struct RawSamples {
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<usize>,
    /// Original label text, indexed by class id.
    pub class_names: Vec<String>,
}

/// Train/test pair handed to the landscape.
#[derive(Debug, Clone)]
pub struct SplitData {
    pub train: Dataset,
    pub test: Dataset,
    pub class_names: Vec<String>,
}

/// Reads a CSV of numeric feature columns followed by a label column.
/// A non-numeric first row is treated as a header. Labels that are all
/// non-negative integers are used as class ids; otherwise the distinct
/// label strings are sorted and numbered.
pub fn load_csv<P: AsRef<Path>>(path: P) -> WfResult<RawSamples> {
    let rdr = reader_builder().from_path(path.as_ref())?;
    read_samples(rdr)
}

/// Same format as [`load_csv`], from an in-memory string.
pub fn parse_csv(content: &str) -> WfResult<RawSamples> {
    read_samples(reader_builder().from_reader(content.as_bytes()))
}

/// Fisher's Iris measurements (150 rows, 3 species), compiled into the binary.
pub const IRIS_CSV: &str = include_str!("../../data/iris.csv");

pub fn iris() -> WfResult<RawSamples> {
    parse_csv(IRIS_CSV)
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).trim(csv::Trim::All);
    builder
}

fn read_samples<R: std::io::Read>(mut rdr: csv::Reader<R>) -> WfResult<RawSamples> {
    let mut rows = Vec::new();
    let mut raw_labels = Vec::new();

    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() < 2 {
            return Err(WeightForgeError::Validation(format!(
                "Line {} needs at least one feature and a label",
                line + 1
            )));
        }

        let feature_count = record.len() - 1;
        let parsed: Result<Vec<f64>, _> = record
            .iter()
            .take(feature_count)
            .map(|f| f.parse::<f64>())
            .collect();

        match parsed {
            Ok(features) => {
                rows.push(features);
                raw_labels.push(record[feature_count].to_string());
            }
            Err(_) if line == 0 => continue,
            Err(e) => {
                return Err(WeightForgeError::Validation(format!(
                    "Line {}: invalid feature value ({})",
                    line + 1,
                    e
                )));
            }
        }
    }

    if rows.is_empty() {
        return Err(WeightForgeError::Validation(
            "Dataset file contains no samples".to_string(),
        ));
    }

    let (labels, class_names) = encode_labels(&raw_labels);
    Ok(RawSamples {
        rows,
        labels,
        class_names,
    })
}

fn encode_labels(raw: &[String]) -> (Vec<usize>, Vec<String>) {
    let numeric: Option<Vec<usize>> = raw.iter().map(|l| l.parse::<usize>().ok()).collect();
    if let Some(ids) = numeric {
        let count = ids.iter().max().map(|&m| m + 1).unwrap_or(0);
        let names = (0..count).map(|i| i.to_string()).collect();
        return (ids, names);
    }

    let names: Vec<String> = raw
        .iter()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let ids = raw
        .iter()
        .map(|l| names.iter().position(|n| n == l).unwrap_or(0))
        .collect();
    (ids, names)
}

/// Shuffles with `seed`, holds out `ceil(n * test_size)` rows for testing,
/// and standardizes both sides with statistics fitted on the training rows.
pub fn split_and_standardize(samples: RawSamples, test_size: f64, seed: u64) -> WfResult<SplitData> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(WeightForgeError::Config(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }
    let n = samples.rows.len();
    let n_test = ((n as f64) * test_size).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(WeightForgeError::Validation(format!(
            "Cannot split {} samples with test_size {}",
            n, test_size
        )));
    }

    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = fastrand::Rng::with_seed(seed);
    rng.shuffle(&mut order);
    let (test_idx, train_idx) = order.split_at(n_test);

    let gather = |idx: &[usize]| -> WfResult<Dataset> {
        let rows: Vec<Vec<f64>> = idx.iter().map(|&i| samples.rows[i].clone()).collect();
        let labels = idx.iter().map(|&i| samples.labels[i]).collect();
        Ok(Dataset::new(Matrix::from_rows(&rows)?, labels))
    };

    let mut train = gather(train_idx)?;
    let mut test = gather(test_idx)?;

    let scaler = Standardizer::fit(&train.features);
    scaler.apply(&mut train.features);
    scaler.apply(&mut test.features);

    Ok(SplitData {
        train,
        test,
        class_names: samples.class_names,
    })
}

/// Per-column z-score scaling.
#[derive(Debug, Clone)]
pub struct Standardizer {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
}

impl Standardizer {
    pub fn fit(m: &Matrix) -> Self {
        let mut means = vec![0.0; m.cols];
        let mut stds = vec![0.0; m.cols];
        if m.rows == 0 {
            return Self {
                means,
                stds: vec![1.0; m.cols],
            };
        }

        for r in 0..m.rows {
            for (acc, &v) in means.iter_mut().zip(m.row(r)) {
                *acc += v;
            }
        }
        for v in means.iter_mut() {
            *v /= m.rows as f64;
        }

        for r in 0..m.rows {
            for ((acc, &v), &mu) in stds.iter_mut().zip(m.row(r)).zip(&means) {
                *acc += (v - mu) * (v - mu);
            }
        }
        for v in stds.iter_mut() {
            *v = (*v / m.rows as f64).sqrt();
            // Constant column: leave centred values untouched
            if *v == 0.0 {
                *v = 1.0;
            }
        }

        Self { means, stds }
    }

    pub fn apply(&self, m: &mut Matrix) {
        let cols = m.cols;
        for row in m.data.chunks_mut(cols) {
            for ((v, &mu), &sd) in row.iter_mut().zip(&self.means).zip(&self.stds) {
                *v = (*v - mu) / sd;
            }
        }
    }
}
