use serde::{Deserialize, Serialize};

/// Shape of the one-hidden-layer classifier whose weights are searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkTopology {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
}

/// Borrowed view of a flat weight vector split into layers.
/// Matrices are row-major: `w1` is `input x hidden`, `w2` is `hidden x output`.
pub struct LayerView<'a> {
    pub w1: &'a [f64],
    pub b1: &'a [f64],
    pub w2: &'a [f64],
    pub b2: &'a [f64],
}

impl NetworkTopology {
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Self {
        Self {
            input_size,
            hidden_size,
            output_size,
        }
    }

    pub fn total_weights(&self) -> usize {
        self.input_size * self.hidden_size
            + self.hidden_size
            + self.hidden_size * self.output_size
            + self.output_size
    }

    /// Splits `weights` into W1, b1, W2, b2. Caller guarantees the length.
    pub fn unpack<'a>(&self, weights: &'a [f64]) -> LayerView<'a> {
        let w1_end = self.input_size * self.hidden_size;
        let b1_end = w1_end + self.hidden_size;
        let w2_end = b1_end + self.hidden_size * self.output_size;
        let b2_end = w2_end + self.output_size;

        LayerView {
            w1: &weights[..w1_end],
            b1: &weights[w1_end..b1_end],
            w2: &weights[b1_end..w2_end],
            b2: &weights[w2_end..b2_end],
        }
    }

    /// Xavier-scaled random weights with zero biases.
    pub fn random_weights(&self, rng: &mut fastrand::Rng) -> Vec<f64> {
        let scale1 = (2.0 / (self.input_size + self.hidden_size) as f64).sqrt();
        let scale2 = (2.0 / (self.hidden_size + self.output_size) as f64).sqrt();

        let mut weights = Vec::with_capacity(self.total_weights());
        for _ in 0..self.input_size * self.hidden_size {
            weights.push(crate::optimizer::mutation::gaussian(rng) * scale1);
        }
        weights.extend(std::iter::repeat(0.0).take(self.hidden_size));
        for _ in 0..self.hidden_size * self.output_size {
            weights.push(crate::optimizer::mutation::gaussian(rng) * scale2);
        }
        weights.extend(std::iter::repeat(0.0).take(self.output_size));
        weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_weights_iris_shape() {
        let topo = NetworkTopology::new(4, 8, 3);
        assert_eq!(topo.total_weights(), 4 * 8 + 8 + 8 * 3 + 3);
    }

    #[test]
    fn test_unpack_order() {
        let topo = NetworkTopology::new(2, 2, 2);
        let weights: Vec<f64> = (0..topo.total_weights()).map(|i| i as f64).collect();
        let view = topo.unpack(&weights);

        assert_eq!(view.w1, &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(view.b1, &[4.0, 5.0]);
        assert_eq!(view.w2, &[6.0, 7.0, 8.0, 9.0]);
        assert_eq!(view.b2, &[10.0, 11.0]);
    }

    #[test]
    fn test_random_weights_zero_biases() {
        let topo = NetworkTopology::new(3, 4, 2);
        let mut rng = fastrand::Rng::with_seed(7);
        let weights = topo.random_weights(&mut rng);
        assert_eq!(weights.len(), topo.total_weights());

        let view = topo.unpack(&weights);
        assert!(view.b1.iter().all(|&b| b == 0.0));
        assert!(view.b2.iter().all(|&b| b == 0.0));
        assert!(view.w1.iter().any(|&w| w != 0.0));
    }
}
