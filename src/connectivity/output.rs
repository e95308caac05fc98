//! Plain-text matrix writer

use crate::structs::Result;
use ndarray::Array2;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Format a value in scientific notation with a signed, two-digit exponent
///
/// `1.0` with 18 digits becomes `1.000000000000000000e+00`.
#[must_use]
pub fn format_scientific(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "inf" } else { "-inf" };
        return text.to_string();
    }

    let rendered = format!("{value:.digits$e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => rendered,
    }
}

/// Write the matrix as space-separated rows, one row per line
///
/// # Errors
/// Returns error if the file cannot be created or written
pub fn write_matrix(matrix: &Array2<f64>, path: &Path, digits: usize) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(fs::File::create(path)?);
    for row in matrix.rows() {
        let line: Vec<String> = row.iter().map(|&v| format_scientific(v, digits)).collect();
        writeln!(writer, "{}", line.join(" "))?;
    }
    writer.flush()?;

    tracing::info!("wrote {}x{} matrix to {}", matrix.nrows(), matrix.ncols(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tempfile::TempDir;

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_scientific(1.0, 18), "1.000000000000000000e+00");
        assert_eq!(format_scientific(-0.25, 3), "-2.500e-01");
        assert_eq!(format_scientific(12345.0, 2), "1.23e+04");
        assert_eq!(format_scientific(0.0, 1), "0.0e+00");
        assert_eq!(format_scientific(1e-123, 1), "1.0e-123");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_scientific(f64::NAN, 18), "nan");
        assert_eq!(format_scientific(f64::INFINITY, 18), "inf");
        assert_eq!(format_scientific(f64::NEG_INFINITY, 18), "-inf");
    }

    #[test]
    fn test_write_matrix() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("nested").join("cc.txt");
        let m = array![[1.0, -0.5], [-0.5, 1.0]];

        write_matrix(&m, &path, 2).expect("write matrix");

        let content = fs::read_to_string(&path).expect("read");
        assert_eq!(content, "1.00e+00 -5.00e-01\n-5.00e-01 1.00e+00\n");
    }
}
