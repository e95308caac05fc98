//! Correlation matrix computation

use crate::structs::{CcError, Result, Sample};
use ndarray::{Array2, Axis};

/// Compute the `PxP` Pearson correlation matrix between all columns
///
/// Each column is one parcel's time series. Samples are widened to `f64`
/// here. Columns with zero variance produce NaN across their row and column.
///
/// # Errors
/// Returns error if there are fewer than 2 samples
#[allow(clippy::float_cmp)]
pub fn compute_correlation<A: Sample>(samples: &Array2<A>) -> Result<Array2<f64>> {
    let data: Array2<f64> = samples.mapv(Into::into);
    let (n_samples, n_parcels) = data.dim();
    if n_samples < 2 {
        return Err(CcError::Shape(format!(
            "need at least 2 samples for correlation, got {n_samples}"
        )));
    }

    tracing::info!("computing correlation matrix");

    let means = data
        .mean_axis(Axis(0))
        .ok_or_else(|| CcError::Shape("cannot take the mean of an empty matrix".into()))?;
    let mut scaled = &data - &means;

    // Unit-norm columns turn the Gram matrix into correlations
    for (original, mut column) in data.columns().into_iter().zip(scaled.columns_mut()) {
        let first = original[0];
        if original.iter().all(|&v| v == first) {
            // Zero variance; the centred residue is rounding noise
            column.fill(f64::NAN);
            continue;
        }
        let norm = column.iter().map(|v| v * v).sum::<f64>().sqrt();
        column.mapv_inplace(|v| v / norm);
    }

    let mut matrix = scaled.t().dot(&scaled);

    for i in 0..n_parcels {
        matrix[[i, i]] = matrix[[i, i]].clamp(-1.0, 1.0);
        for j in (i + 1)..n_parcels {
            let r = matrix[[i, j]].clamp(-1.0, 1.0);
            matrix[[i, j]] = r;
            matrix[[j, i]] = r;
        }
    }

    tracing::info!("correlation matrix: {} x {}", matrix.nrows(), matrix.ncols());
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::timeseries::parse_matrix;
    use ndarray::array;

    fn sample_data() -> Array2<f64> {
        Array2::from_shape_fn((35, 5), |(r, c)| (((r * 7 + c * 3) % 11) as f64) + (r * c) as f64 * 0.1)
    }

    #[test]
    fn test_perfect_correlation() {
        let data = array![[1.0, 2.0, 10.0], [2.0, 4.0, 8.0], [3.0, 6.0, 6.0]];
        let corr = compute_correlation(&data).expect("correlate");

        assert_eq!(corr.dim(), (3, 3));
        assert!((corr[[0, 1]] - 1.0).abs() < 1e-12);
        assert!((corr[[0, 2]] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_with_unit_diagonal() {
        let corr = compute_correlation(&sample_data()).expect("correlate");

        assert_eq!(corr.dim(), (5, 5));
        for i in 0..5 {
            assert!((corr[[i, i]] - 1.0).abs() < 1e-12);
            for j in 0..5 {
                assert_eq!(corr[[i, j]].to_bits(), corr[[j, i]].to_bits());
                assert!(corr[[i, j]].abs() <= 1.0);
            }
        }
    }

    #[test]
    fn test_matches_pairwise_formula() {
        let data = sample_data();
        let corr = compute_correlation(&data).expect("correlate");

        let x = data.column(1).to_vec();
        let y = data.column(3).to_vec();
        let n = x.len() as f64;
        let mx = x.iter().sum::<f64>() / n;
        let my = y.iter().sum::<f64>() / n;
        let cov: f64 = x.iter().zip(&y).map(|(a, b)| (a - mx) * (b - my)).sum();
        let vx: f64 = x.iter().map(|a| (a - mx).powi(2)).sum();
        let vy: f64 = y.iter().map(|b| (b - my).powi(2)).sum();

        assert!((corr[[1, 3]] - cov / (vx * vy).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_is_nan() {
        let data = array![[1.0, 5.0, 3.0], [2.0, 5.0, 1.0], [3.0, 5.0, 2.0]];
        let corr = compute_correlation(&data).expect("correlate");

        for k in 0..3 {
            assert!(corr[[1, k]].is_nan());
            assert!(corr[[k, 1]].is_nan());
        }
        assert!((corr[[0, 0]] - 1.0).abs() < 1e-12);
        assert!(!corr[[0, 2]].is_nan());
    }

    #[test]
    fn test_zero_variance_with_inexact_mean() {
        let content = "0.1 1\n0.1 2\n0.1 3\n0.1 4\n0.1 5\n0.1 6\n0.1 7\n";

        let double = parse_matrix::<f64>(content, "constant.txt").expect("parse");
        let corr = compute_correlation(&double).expect("correlate");
        assert!(corr[[0, 0]].is_nan());
        assert!(corr[[0, 1]].is_nan());
        assert!(corr[[1, 0]].is_nan());
        assert!((corr[[1, 1]] - 1.0).abs() < 1e-12);

        let single = parse_matrix::<f32>(content, "constant.txt").expect("parse");
        let corr = compute_correlation(&single).expect("correlate");
        assert!(corr[[0, 1]].is_nan());
        assert!((corr[[1, 1]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_half_input_is_widened() {
        let content = "0.1 1\n0.3 2\n0.2 4\n";
        let narrow = parse_matrix::<half::f16>(content, "half.txt").expect("parse");
        let wide = narrow.mapv(f64::from);

        let from_narrow = compute_correlation(&narrow).expect("correlate");
        let from_wide = compute_correlation(&wide).expect("correlate");
        assert_eq!(from_narrow, from_wide);
    }

    #[test]
    fn test_too_few_samples() {
        let data = array![[1.0, 2.0, 3.0]];
        assert!(matches!(compute_correlation(&data), Err(CcError::Shape(_))));
    }
}
