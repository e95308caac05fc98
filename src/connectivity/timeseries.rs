//! Timeseries discovery, parsing and row-wise stacking

use crate::structs::{CcError, Precision, Result, Sample};
use half::f16;
use ndarray::{concatenate, Array2, ArrayView2, Axis};
use std::fs;
use std::path::{Path, PathBuf};

/// Stacked timeseries held at the precision they were loaded with
#[derive(Debug, Clone, PartialEq)]
pub enum SampleMatrix {
    Half(Array2<f16>),
    Single(Array2<f32>),
    Double(Array2<f64>),
}

impl SampleMatrix {
    /// `(samples, parcels)`
    #[must_use]
    pub fn dim(&self) -> (usize, usize) {
        match self {
            Self::Half(a) => a.dim(),
            Self::Single(a) => a.dim(),
            Self::Double(a) => a.dim(),
        }
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        match self {
            Self::Half(_) => Precision::Half,
            Self::Single(_) => Precision::Single,
            Self::Double(_) => Precision::Double,
        }
    }
}

/// Stacked timeseries and the files they came from
#[derive(Debug, Clone)]
pub struct TimeseriesSet {
    /// Shape `(total_samples, parcels)`
    pub data: SampleMatrix,
    /// Source files in stacking order
    pub files: Vec<PathBuf>,
}

impl TimeseriesSet {
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.data.dim().0
    }

    #[must_use]
    pub fn n_parcels(&self) -> usize {
        self.data.dim().1
    }
}

/// List files in `dir` with the given extension, sorted by file name
///
/// # Errors
/// Returns error if `dir` is not a directory or cannot be read
pub fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CcError::Empty(format!(
            "timeseries directory not found: {}",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Load every timeseries file in `dir` and stack them row-wise
///
/// # Errors
/// Returns `Empty` if no files match, `FileFormat` if any file is malformed
/// or disagrees with the others on column count
pub fn load_and_concatenate(
    dir: &Path,
    extension: &str,
    precision: Precision,
) -> Result<TimeseriesSet> {
    let files = discover_files(dir, extension)?;
    tracing::info!("found {} timeseries files", files.len());

    if files.is_empty() {
        return Err(CcError::Empty(format!(
            "no *.{extension} files in {}",
            dir.display()
        )));
    }

    let data = match precision {
        Precision::Half => SampleMatrix::Half(load_files(&files)?),
        Precision::Single => SampleMatrix::Single(load_files(&files)?),
        Precision::Double => SampleMatrix::Double(load_files(&files)?),
    };
    Ok(TimeseriesSet { data, files })
}

fn load_files<A: Sample>(files: &[PathBuf]) -> Result<Array2<A>> {
    let mut arrays: Vec<Array2<A>> = Vec::with_capacity(files.len());
    for path in files {
        let array = read_matrix::<A>(path)?;
        tracing::debug!("{}: {} x {}", path.display(), array.nrows(), array.ncols());

        if let Some(first) = arrays.first() {
            if array.ncols() != first.ncols() {
                return Err(CcError::FileFormat(format!(
                    "{} has {} columns, expected {} (from {})",
                    path.display(),
                    array.ncols(),
                    first.ncols(),
                    files[0].display()
                )));
            }
        }
        arrays.push(array);
    }

    stack_rows(&arrays)
}

/// Read one whitespace-delimited numeric file
///
/// # Errors
/// Returns error if the file cannot be read or is not a rectangular numeric table
pub fn read_matrix<A: Sample>(path: &Path) -> Result<Array2<A>> {
    let content = fs::read_to_string(path)?;
    parse_matrix(&content, &path.display().to_string())
}

/// Parse whitespace-delimited numbers; `#` starts a comment, blank lines are skipped
///
/// # Errors
/// Returns `FileFormat` on a non-numeric token, ragged rows, or no data
pub fn parse_matrix<A: Sample>(content: &str, source: &str) -> Result<Array2<A>> {
    let mut values = Vec::new();
    let mut n_cols: Option<usize> = None;
    let mut n_rows = 0;

    for (line_no, line) in content.lines().enumerate() {
        let data = line.split('#').next().unwrap_or("");
        let mut count = 0;

        for token in data.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| {
                CcError::FileFormat(format!(
                    "{source}:{}: not a number: {token:?}",
                    line_no + 1
                ))
            })?;
            values.push(A::narrow(value));
            count += 1;
        }

        if count == 0 {
            continue;
        }

        match n_cols {
            None => n_cols = Some(count),
            Some(expected) if expected != count => {
                return Err(CcError::FileFormat(format!(
                    "{source}:{}: expected {expected} columns, found {count}",
                    line_no + 1
                )));
            }
            Some(_) => {}
        }
        n_rows += 1;
    }

    let n_cols =
        n_cols.ok_or_else(|| CcError::FileFormat(format!("{source}: no data rows")))?;

    Array2::from_shape_vec((n_rows, n_cols), values)
        .map_err(|e| CcError::FileFormat(format!("{source}: {e}")))
}

/// Stack arrays row-wise in slice order
///
/// # Errors
/// Returns `Empty` for no arrays, `FileFormat` if column counts disagree
pub fn stack_rows<A: Clone>(arrays: &[Array2<A>]) -> Result<Array2<A>> {
    let first = arrays
        .first()
        .ok_or_else(|| CcError::Empty("nothing to stack".into()))?;

    if let Some((i, bad)) = arrays
        .iter()
        .enumerate()
        .find(|(_, a)| a.ncols() != first.ncols())
    {
        return Err(CcError::FileFormat(format!(
            "array {i} has {} columns, expected {}",
            bad.ncols(),
            first.ncols()
        )));
    }

    let views: Vec<ArrayView2<A>> = arrays.iter().map(|a| a.view()).collect();
    concatenate(Axis(0), &views).map_err(|e| CcError::FileFormat(format!("stacking failed: {e}")))
}
