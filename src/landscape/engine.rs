use super::network::NetworkTopology;
use super::types::{Dataset, Matrix};

/// Pre-activations beyond this magnitude saturate the sigmoid anyway.
const SIGMOID_CLAMP: f64 = 500.0;

/// Keeps `ln` finite when the true-class probability underflows to zero.
pub const LOG_EPSILON: f64 = 1e-10;

#[inline(always)]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x.clamp(-SIGMOID_CLAMP, SIGMOID_CLAMP)).exp())
}

/// In-place softmax over one output row, shifted by the row max.
#[inline(always)]
pub fn softmax_in_place(row: &mut [f64]) {
    let max = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for v in row.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    for v in row.iter_mut() {
        *v /= sum;
    }
}

/// Index of the largest entry; the lowest index wins ties.
#[inline(always)]
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// Runs one sample through the network, writing class probabilities into `out`.
/// `hidden` is scratch space of length `hidden_size`.
#[inline(always)]
fn forward_row(
    topo: &NetworkTopology,
    weights: &[f64],
    x: &[f64],
    hidden: &mut [f64],
    out: &mut [f64],
) {
    let layers = topo.unpack(weights);
    let h = topo.hidden_size;
    let o = topo.output_size;

    hidden.copy_from_slice(layers.b1);
    for (i, &xi) in x.iter().enumerate() {
        let w_row = &layers.w1[i * h..(i + 1) * h];
        for (acc, &w) in hidden.iter_mut().zip(w_row) {
            *acc += xi * w;
        }
    }
    for a in hidden.iter_mut() {
        *a = sigmoid(*a);
    }

    out.copy_from_slice(layers.b2);
    for (j, &a) in hidden.iter().enumerate() {
        let w_row = &layers.w2[j * o..(j + 1) * o];
        for (acc, &w) in out.iter_mut().zip(w_row) {
            *acc += a * w;
        }
    }
    softmax_in_place(out);
}

/// Class probabilities for every row, row-major `rows x output_size`.
pub fn forward(topo: &NetworkTopology, features: &Matrix, weights: &[f64]) -> Vec<f64> {
    let o = topo.output_size;
    let mut probs = vec![0.0; features.rows * o];
    let mut hidden = vec![0.0; topo.hidden_size];

    for r in 0..features.rows {
        forward_row(
            topo,
            weights,
            features.row(r),
            &mut hidden,
            &mut probs[r * o..(r + 1) * o],
        );
    }
    probs
}

pub fn predict(topo: &NetworkTopology, features: &Matrix, weights: &[f64]) -> Vec<usize> {
    let o = topo.output_size;
    forward(topo, features, weights)
        .chunks(o)
        .map(argmax)
        .collect()
}

/// Mean cross-entropy of the true class over the dataset.
pub fn cross_entropy(topo: &NetworkTopology, data: &Dataset, weights: &[f64]) -> f64 {
    let mut hidden = vec![0.0; topo.hidden_size];
    let mut out = vec![0.0; topo.output_size];
    let mut total = 0.0;

    for (r, &label) in data.labels.iter().enumerate() {
        forward_row(topo, weights, data.features.row(r), &mut hidden, &mut out);
        total -= (out[label] + LOG_EPSILON).ln();
    }
    total / data.len() as f64
}

/// Fraction of rows whose argmax class equals the label.
pub fn accuracy(topo: &NetworkTopology, data: &Dataset, weights: &[f64]) -> f64 {
    let mut hidden = vec![0.0; topo.hidden_size];
    let mut out = vec![0.0; topo.output_size];
    let mut correct = 0usize;

    for (r, &label) in data.labels.iter().enumerate() {
        forward_row(topo, weights, data.features.row(r), &mut hidden, &mut out);
        if argmax(&out) == label {
            correct += 1;
        }
    }
    correct as f64 / data.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_saturates_without_overflow() {
        assert_eq!(sigmoid(1e6), 1.0);
        assert_eq!(sigmoid(-1e6), 1.0 / (1.0 + SIGMOID_CLAMP.exp()));
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_softmax_large_logits_stay_finite() {
        let mut row = [1000.0, 1001.0, 999.0];
        softmax_in_place(&mut row);
        let sum: f64 = row.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(row.iter().all(|p| p.is_finite()));
        assert_eq!(argmax(&row), 1);
    }

    #[test]
    fn test_argmax_tie_prefers_first() {
        assert_eq!(argmax(&[0.5, 0.5, 0.1]), 0);
        assert_eq!(argmax(&[0.1, 0.4, 0.4]), 1);
    }

    #[test]
    fn test_zero_weights_give_uniform_loss() {
        let topo = NetworkTopology::new(2, 3, 4);
        let features = Matrix::new(2, 2, vec![1.0, -1.0, 0.5, 2.0]).unwrap();
        let data = Dataset::new(features, vec![0, 3]);
        let weights = vec![0.0; topo.total_weights()];

        let loss = cross_entropy(&topo, &data, &weights);
        let expected = -(0.25f64 + LOG_EPSILON).ln();
        assert!((loss - expected).abs() < 1e-12);
    }
}
