use fastrand::Rng;
use std::f64::consts::TAU;

/// Seeded generator when a seed is given, entropy-seeded otherwise.
pub fn make_rng(seed: Option<u64>) -> Rng {
    if let Some(s) = seed {
        Rng::with_seed(s)
    } else {
        Rng::new()
    }
}

/// Standard normal draw (Box-Muller).
#[inline(always)]
pub fn gaussian(rng: &mut Rng) -> f64 {
    // 1 - [0, 1) keeps u1 away from zero so ln stays finite
    let u1 = 1.0 - rng.f64();
    let u2 = rng.f64();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Vector of `len` independent N(0, scale^2) draws.
pub fn gaussian_vector(rng: &mut Rng, len: usize, scale: f64) -> Vec<f64> {
    (0..len).map(|_| gaussian(rng) * scale).collect()
}

/// Adds N(0, scale^2) noise to each gene independently with probability `rate`.
pub fn mutate_genes(rng: &mut Rng, genes: &mut [f64], rate: f64, scale: f64) -> usize {
    let mut flipped = 0;
    for g in genes.iter_mut() {
        if rng.f64() < rate {
            *g += gaussian(rng) * scale;
            flipped += 1;
        }
    }
    flipped
}

/// `base + N(0, step^2)` per coordinate.
pub fn perturb(rng: &mut Rng, base: &[f64], step: f64) -> Vec<f64> {
    base.iter().map(|&v| v + gaussian(rng) * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_moments() {
        let mut rng = Rng::with_seed(42);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| gaussian(&mut rng)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

        assert!(mean.abs() < 0.05, "mean drifted: {}", mean);
        assert!((var - 1.0).abs() < 0.05, "variance drifted: {}", var);
        assert!(samples.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_mutate_rate_bounds() {
        let mut rng = Rng::with_seed(1);
        let mut genes = vec![0.0; 64];
        assert_eq!(mutate_genes(&mut rng, &mut genes, 0.0, 0.1), 0);
        assert!(genes.iter().all(|&g| g == 0.0));

        let flipped = mutate_genes(&mut rng, &mut genes, 1.0, 0.1);
        assert_eq!(flipped, 64);
        assert!(genes.iter().all(|&g| g != 0.0));
    }

    #[test]
    fn test_seeded_rng_repeats() {
        let mut a = make_rng(Some(9));
        let mut b = make_rng(Some(9));
        assert_eq!(gaussian_vector(&mut a, 8, 0.1), gaussian_vector(&mut b, 8, 0.1));
    }
}
