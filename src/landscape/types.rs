use crate::error::{WeightForgeError, WfResult};
use serde::{Deserialize, Serialize};

/// Dense row-major matrix of features (rows = samples).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> WfResult<Self> {
        if data.len() != rows * cols {
            return Err(WeightForgeError::Validation(format!(
                "Matrix of {}x{} needs {} values, got {}",
                rows,
                cols,
                rows * cols,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from nested rows. Ragged input is rejected.
    pub fn from_rows(rows: &[Vec<f64>]) -> WfResult<Self> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(WeightForgeError::Validation(format!(
                    "Row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    #[inline(always)]
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

/// A feature matrix paired with integer class labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub features: Matrix,
    pub labels: Vec<usize>,
}

impl Dataset {
    pub fn new(features: Matrix, labels: Vec<usize>) -> Self {
        Self { features, labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of distinct classes implied by the labels (max label + 1).
    pub fn class_count(&self) -> usize {
        self.labels.iter().max().map(|&m| m + 1).unwrap_or(0)
    }

    pub fn validate(&self, name: &str, input_size: usize, output_size: usize) -> WfResult<()> {
        if self.features.is_empty() || self.is_empty() {
            return Err(WeightForgeError::Validation(format!(
                "{} set is empty",
                name
            )));
        }
        if self.features.rows != self.labels.len() {
            return Err(WeightForgeError::Validation(format!(
                "{} set has {} feature rows but {} labels",
                name,
                self.features.rows,
                self.labels.len()
            )));
        }
        if self.features.cols != input_size {
            return Err(WeightForgeError::Validation(format!(
                "{} set has {} features, network expects {}",
                name, self.features.cols, input_size
            )));
        }
        if let Some(&bad) = self.labels.iter().find(|&&l| l >= output_size) {
            return Err(WeightForgeError::Validation(format!(
                "{} set contains label {} but the network has {} outputs",
                name, bad, output_size
            )));
        }
        Ok(())
    }
}
