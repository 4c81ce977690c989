pub mod engine;
pub mod loader;
pub mod network;
pub mod types;

pub use self::network::NetworkTopology;
pub use self::types::{Dataset, Matrix};
use crate::error::{WeightForgeError, WfResult};
use serde::{Deserialize, Serialize};

/// Fitness and held-out accuracy of one weight vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub fitness: f64,
    pub accuracy: f64,
}

/// The surface every optimizer searches: a fixed network topology bound to
/// fixed train and test sets. Read-only after construction, so one instance
/// can be shared (`Arc`) by any number of concurrent runs.
#[derive(Debug, Clone)]
pub struct FitnessLandscape {
    pub topology: NetworkTopology,
    train: Dataset,
    test: Dataset,
}

impl FitnessLandscape {
    pub fn new(topology: NetworkTopology, train: Dataset, test: Dataset) -> WfResult<Self> {
        if topology.input_size == 0 || topology.hidden_size == 0 || topology.output_size == 0 {
            return Err(WeightForgeError::Validation(format!(
                "Network layers must be non-empty, got {}-{}-{}",
                topology.input_size, topology.hidden_size, topology.output_size
            )));
        }
        train.validate("Training", topology.input_size, topology.output_size)?;
        test.validate("Test", topology.input_size, topology.output_size)?;

        tracing::debug!(
            "Landscape ready: {}-{}-{} network, {} weights, {} train / {} test rows",
            topology.input_size,
            topology.hidden_size,
            topology.output_size,
            topology.total_weights(),
            train.len(),
            test.len()
        );

        Ok(Self {
            topology,
            train,
            test,
        })
    }

    /// Infers input and output sizes from the data.
    pub fn from_datasets(hidden_size: usize, train: Dataset, test: Dataset) -> WfResult<Self> {
        let input_size = train.features.cols;
        let output_size = train.class_count().max(test.class_count());
        Self::new(
            NetworkTopology::new(input_size, hidden_size, output_size),
            train,
            test,
        )
    }

    /// Loads, splits and standardizes a CSV dataset in one go.
    pub fn from_csv<P: AsRef<std::path::Path>>(
        path: P,
        test_size: f64,
        split_seed: u64,
        hidden_size: usize,
    ) -> WfResult<Self> {
        let path = path.as_ref();
        tracing::info!("Loading dataset: {}", path.display());
        Self::from_samples(loader::load_csv(path)?, test_size, split_seed, hidden_size)
    }

    /// The bundled Iris dataset.
    pub fn iris(test_size: f64, split_seed: u64, hidden_size: usize) -> WfResult<Self> {
        tracing::info!("Loading built-in Iris dataset");
        Self::from_samples(loader::iris()?, test_size, split_seed, hidden_size)
    }

    pub fn from_samples(
        samples: loader::RawSamples,
        test_size: f64,
        split_seed: u64,
        hidden_size: usize,
    ) -> WfResult<Self> {
        let split = loader::split_and_standardize(samples, test_size, split_seed)?;
        Self::from_datasets(hidden_size, split.train, split.test)
    }

    pub fn dimensions(&self) -> usize {
        self.topology.total_weights()
    }

    pub fn train(&self) -> &Dataset {
        &self.train
    }

    pub fn test(&self) -> &Dataset {
        &self.test
    }

    fn check_len(&self, weights: &[f64]) -> WfResult<()> {
        let expected = self.dimensions();
        if weights.len() != expected {
            return Err(WeightForgeError::DimensionMismatch {
                expected,
                actual: weights.len(),
            });
        }
        Ok(())
    }

    /// Negated mean training cross-entropy; higher is better.
    ///
    /// # Panics
    /// If `weights.len()` differs from [`Self::dimensions`].
    pub fn fitness(&self, weights: &[f64]) -> f64 {
        assert_eq!(
            weights.len(),
            self.dimensions(),
            "weight vector length does not match network"
        );
        -engine::cross_entropy(&self.topology, &self.train, weights)
    }

    /// Fraction of test rows classified correctly.
    ///
    /// # Panics
    /// If `weights.len()` differs from [`Self::dimensions`].
    pub fn accuracy(&self, weights: &[f64]) -> f64 {
        assert_eq!(
            weights.len(),
            self.dimensions(),
            "weight vector length does not match network"
        );
        engine::accuracy(&self.topology, &self.test, weights)
    }

    pub fn try_fitness(&self, weights: &[f64]) -> WfResult<f64> {
        self.check_len(weights)?;
        Ok(self.fitness(weights))
    }

    pub fn try_accuracy(&self, weights: &[f64]) -> WfResult<f64> {
        self.check_len(weights)?;
        Ok(self.accuracy(weights))
    }

    pub fn evaluate(&self, weights: &[f64]) -> WfResult<Evaluation> {
        self.check_len(weights)?;
        Ok(Evaluation {
            fitness: self.fitness(weights),
            accuracy: self.accuracy(weights),
        })
    }

    pub fn predict(&self, features: &Matrix, weights: &[f64]) -> WfResult<Vec<usize>> {
        self.check_len(weights)?;
        if features.cols != self.topology.input_size {
            return Err(WeightForgeError::Validation(format!(
                "Expected {} features per row, got {}",
                self.topology.input_size, features.cols
            )));
        }
        Ok(engine::predict(&self.topology, features, weights))
    }

    pub fn random_weights(&self, rng: &mut fastrand::Rng) -> Vec<f64> {
        self.topology.random_weights(rng)
    }
}
