/// Prefix sums with a leading zero so that any range sum is a single
/// subtraction.
pub fn prefix_sums(samples: &[f64]) -> Vec<f64> {
    let mut prefix = Vec::with_capacity(samples.len() + 1);
    let mut acc = 0.0;
    prefix.push(acc);

    for sample in samples {
        acc += sample;
        prefix.push(acc);
    }

    prefix
}

/// Sum of the underlying samples over `[start, end)`.
pub fn range_sum(prefix: &[f64], start: usize, end: usize) -> f64 {
    debug_assert!(start <= end && end < prefix.len());

    prefix[end] - prefix[start]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_sums_match_direct_summation() {
        let samples = [1.0, 2.5, -1.0, 4.0, 0.5];
        let prefix = prefix_sums(&samples);

        assert_eq!(range_sum(&prefix, 0, 5), 7.0);
        assert_eq!(range_sum(&prefix, 1, 4), 5.5);
        assert_eq!(range_sum(&prefix, 3, 3), 0.0);
    }
}
