//! Parcel permutation derived from metadata, applied to both matrix axes

use crate::structs::{CcError, ParcelRecord, Result};
use ndarray::{Array2, Axis};

/// Order parcels by (hemisphere, network), keeping file order for ties
///
/// Returns 0-based indices suitable for [`reorder`].
///
/// # Errors
/// Returns `Index` if any parcel id is 0
pub fn derive_permutation(records: &[ParcelRecord]) -> Result<Vec<usize>> {
    let mut sorted: Vec<&ParcelRecord> = records.iter().collect();
    // sort_by is stable
    sorted.sort_by(|a, b| {
        a.hemisphere
            .cmp(&b.hemisphere)
            .then_with(|| a.network.cmp(&b.network))
    });

    sorted
        .iter()
        .map(|record| {
            record.id.checked_sub(1).ok_or_else(|| {
                CcError::Index("parcel ids are 1-based, found id 0".into())
            })
        })
        .collect()
}

/// Check that `permutation` is a bijection over `0..size`
///
/// # Errors
/// Returns `Index` on wrong length, out-of-range, or duplicate indices
pub fn validate_permutation(permutation: &[usize], size: usize) -> Result<()> {
    if permutation.len() != size {
        return Err(CcError::Index(format!(
            "permutation has {} entries for a {size}x{size} matrix",
            permutation.len()
        )));
    }

    let mut seen = vec![false; size];
    for (pos, &idx) in permutation.iter().enumerate() {
        if idx >= size {
            return Err(CcError::Index(format!(
                "permutation[{pos}] = {idx} is out of range 0..{size}"
            )));
        }
        if seen[idx] {
            return Err(CcError::Index(format!(
                "permutation[{pos}] = {idx} appears more than once"
            )));
        }
        seen[idx] = true;
    }

    Ok(())
}

/// Apply the same permutation to rows and then columns
///
/// # Errors
/// Returns `Shape` if the matrix is not square, `Index` if the permutation is invalid
pub fn reorder(matrix: &Array2<f64>, permutation: &[usize]) -> Result<Array2<f64>> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(CcError::Shape(format!(
            "reorder needs a square matrix, got {rows}x{cols}"
        )));
    }
    validate_permutation(permutation, rows)?;

    let by_rows = matrix.select(Axis(0), permutation);
    Ok(by_rows.select(Axis(1), permutation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn record(id: usize, hemisphere: &str, network: &str) -> ParcelRecord {
        ParcelRecord {
            id,
            hemisphere: hemisphere.to_string(),
            x: None,
            y: None,
            z: None,
            lobe: "lobe".to_string(),
            region: "region".to_string(),
            network: network.to_string(),
            yeo7_network: "0".to_string(),
            yeo17_network: "0".to_string(),
        }
    }

    fn inverse(permutation: &[usize]) -> Vec<usize> {
        let mut inv = vec![0; permutation.len()];
        for (pos, &idx) in permutation.iter().enumerate() {
            inv[idx] = pos;
        }
        inv
    }

    fn symmetric() -> Array2<f64> {
        array![
            [1.0, 0.2, 0.3, 0.4],
            [0.2, 1.0, 0.5, 0.6],
            [0.3, 0.5, 1.0, 0.7],
            [0.4, 0.6, 0.7, 1.0]
        ]
    }

    #[test]
    fn test_derive_permutation_groups_hemispheres() {
        let records = vec![
            record(1, "R", "Visual"),
            record(2, "L", "Visual"),
            record(3, "R", "Default"),
            record(4, "L", "Default"),
            record(5, "L", "Visual"),
        ];

        let perm = derive_permutation(&records).expect("derive");

        // L/Default, L/Visual (file order), R/Default, R/Visual
        assert_eq!(perm, vec![3, 1, 4, 2, 0]);
    }

    #[test]
    fn test_derive_permutation_rejects_zero_id() {
        let records = vec![record(0, "L", "Visual")];
        assert!(matches!(derive_permutation(&records), Err(CcError::Index(_))));
    }

    #[test]
    fn test_reorder_relabels() {
        let m = symmetric();
        let reordered = reorder(&m, &[2, 0, 3, 1]).expect("reorder");

        assert!((reordered[[0, 0]] - 1.0).abs() < f64::EPSILON);
        // new (0,1) is old (2,0)
        assert!((reordered[[0, 1]] - 0.3).abs() < f64::EPSILON);
        // new (2,3) is old (3,1)
        assert!((reordered[[2, 3]] - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reorder_preserves_symmetry() {
        let reordered = reorder(&symmetric(), &[3, 1, 0, 2]).expect("reorder");
        assert_eq!(reordered, reordered.t());
    }

    #[test]
    fn test_reorder_is_invertible() {
        let m = symmetric();
        let perm = vec![3, 1, 0, 2];

        let reordered = reorder(&m, &perm).expect("reorder");
        let restored = reorder(&reordered, &inverse(&perm)).expect("restore");

        assert_eq!(restored, m);
    }

    #[test]
    fn test_reorder_rejects_invalid_permutations() {
        let m = symmetric();

        assert!(matches!(reorder(&m, &[0, 1, 2, 4]), Err(CcError::Index(_))));
        assert!(matches!(reorder(&m, &[0, 1, 1, 2]), Err(CcError::Index(_))));
        assert!(matches!(reorder(&m, &[0, 1, 2]), Err(CcError::Index(_))));
    }

    #[test]
    fn test_reorder_rejects_non_square() {
        let m = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert!(matches!(reorder(&m, &[0, 1]), Err(CcError::Shape(_))));
    }
}
