use fastrand::Rng;

/// Single-point crossover: genes `[0, cut)` from `p1`, `[cut, len)` from `p2`,
/// with `cut` uniform in `[1, len - 1]`. Parents shorter than two genes are
/// copied from `p1`.
pub fn single_point(p1: &[f64], p2: &[f64], rng: &mut Rng) -> Vec<f64> {
    let len = p1.len();
    if len < 2 {
        return p1.to_vec();
    }
    let cut = rng.usize(1..len);
    splice_at(p1, p2, cut)
}

pub fn splice_at(p1: &[f64], p2: &[f64], cut: usize) -> Vec<f64> {
    let mut child = Vec::with_capacity(p1.len());
    child.extend_from_slice(&p1[..cut]);
    child.extend_from_slice(&p2[cut..]);
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_splice_layout() {
        let p1 = vec![1.0, 1.0, 1.0, 1.0];
        let p2 = vec![2.0, 2.0, 2.0, 2.0];
        assert_eq!(splice_at(&p1, &p2, 1), vec![1.0, 2.0, 2.0, 2.0]);
        assert_eq!(splice_at(&p1, &p2, 3), vec![1.0, 1.0, 1.0, 2.0]);
    }

    proptest! {
        #[test]
        fn prop_child_takes_both_parents(seed in any::<u64>(), len in 2usize..40) {
            let mut rng = Rng::with_seed(seed);
            let p1 = vec![1.0; len];
            let p2 = vec![2.0; len];
            let child = single_point(&p1, &p2, &mut rng);

            prop_assert_eq!(child.len(), len);
            // Cut is never 0 or len, so both parents always contribute
            prop_assert_eq!(child[0], 1.0);
            prop_assert_eq!(child[len - 1], 2.0);
            let cut = child.iter().position(|&g| g == 2.0).unwrap();
            prop_assert!(child[cut..].iter().all(|&g| g == 2.0));
        }
    }
}
