// src/services/downsample.rs

/// Pick the indices to keep when thinning a series of `len` points down
/// to roughly `max_points` for charting.
///
/// Identity when the series already fits. Otherwise stride by
/// `ceil(len / max_points)` starting at 0, then force the final index so
/// the displayed last point always matches the computed summary. The
/// result is sorted, duplicate-free, and deterministic; it can exceed
/// `max_points` by a small constant because of stride rounding plus the
/// forced last index.
pub fn downsample_indices(len: usize, max_points: usize) -> Vec<usize> {
    if max_points == 0 || len <= max_points {
        return (0..len).collect();
    }

    let step = (len + max_points - 1) / max_points;
    let mut indices: Vec<usize> = (0..len).step_by(step).collect();
    if indices.last() != Some(&(len - 1)) {
        indices.push(len - 1);
    }
    indices
}

/// Thin `points` to the index set chosen by [`downsample_indices`].
///
/// Per-index-aligned companion sequences (values, contributions, labels)
/// must all be thinned with the same `max_points` so they stay aligned;
/// the index selection depends only on length and `max_points`.
pub fn downsample<T: Clone>(points: &[T], max_points: usize) -> Vec<T> {
    let indices = downsample_indices(points.len(), max_points);
    if indices.len() == points.len() {
        return points.to_vec();
    }
    indices.into_iter().map(|i| points[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_series_untouched() {
        let points: Vec<u32> = (0..10).collect();
        assert_eq!(downsample(&points, 10), points);
        assert_eq!(downsample(&points, 100), points);
    }

    #[test]
    fn ten_points_to_three() {
        // step = ceil(10/3) = 4, strides {0, 4, 8}, 9 forced as last.
        assert_eq!(downsample_indices(10, 3), vec![0, 4, 8, 9]);
    }

    #[test]
    fn stride_landing_on_last_not_duplicated() {
        // step = ceil(9/3) = 3, strides {0, 3, 6}, 8 forced.
        assert_eq!(downsample_indices(9, 3), vec![0, 3, 6, 8]);
        // step = ceil(7/4) = 2, strides {0, 2, 4, 6}; 6 is already last.
        assert_eq!(downsample_indices(7, 4), vec![0, 2, 4, 6]);
    }

    #[test]
    fn single_point_budget_keeps_endpoints() {
        assert_eq!(downsample_indices(10, 1), vec![0, 9]);
    }

    #[test]
    fn endpoints_and_ordering_invariants() {
        for len in 1..=40usize {
            for max_points in 1..=12usize {
                let indices = downsample_indices(len, max_points);
                assert_eq!(indices[0], 0, "len={} max={}", len, max_points);
                assert_eq!(*indices.last().unwrap(), len - 1);
                assert!(indices.windows(2).all(|w| w[0] < w[1]));
                assert!(indices.len() <= len);
            }
        }
    }

    #[test]
    fn aligned_sequences_get_the_same_indices() {
        let values: Vec<f64> = (0..120).map(|i| i as f64).collect();
        let labels: Vec<String> = (0..120).map(|i| format!("m{}", i)).collect();

        let thin_values = downsample(&values, 25);
        let thin_labels = downsample(&labels, 25);
        assert_eq!(thin_values.len(), thin_labels.len());
        for (v, l) in thin_values.iter().zip(&thin_labels) {
            assert_eq!(format!("m{}", *v as usize), *l);
        }
    }
}
