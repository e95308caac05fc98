//! Consolidated public types for the ccmtx crate
//!
//! This module contains the error type and the structs shared between the
//! connectivity builder, the parcel reader, and the package scanner.

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum CcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("No input found: {0}")]
    Empty(String),

    #[error("File format error: {0}")]
    FileFormat(String),

    #[error("Shape error: {0}")]
    Shape(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Parcel metadata error: {0}")]
    Metadata(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CcError>;

// ============================================================================
// Timeseries Types
// ============================================================================

/// Storage precision for loaded timeseries values
///
/// Values are parsed as `f64`, narrowed to this type, and kept narrow until
/// the correlation widens them again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// IEEE-754 binary16
    #[default]
    Half,
    /// IEEE-754 binary32
    Single,
    /// Full f64, no rounding
    Double,
}

/// Element type a timeseries matrix can be stored as
pub trait Sample: Copy + Into<f64> + fmt::Debug + 'static {
    /// Round a parsed value into this type
    fn narrow(value: f64) -> Self;
}

impl Sample for half::f16 {
    fn narrow(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl Sample for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn narrow(value: f64) -> Self {
        value as Self
    }
}

impl Sample for f64 {
    fn narrow(value: f64) -> Self {
        value
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Half => write!(f, "half"),
            Self::Single => write!(f, "single"),
            Self::Double => write!(f, "double"),
        }
    }
}

// ============================================================================
// Parcel Types
// ============================================================================

/// One row of the parcel metadata table
///
/// Fields are positional; the table carries no header row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParcelRecord {
    /// 1-based parcel identifier
    pub id: usize,
    pub hemisphere: String,
    /// Coordinates are `None` when the cell is empty or not a number (`NA`)
    #[allow(dead_code)]
    #[serde(deserialize_with = "csv::invalid_option")]
    pub x: Option<f64>,
    #[allow(dead_code)]
    #[serde(deserialize_with = "csv::invalid_option")]
    pub y: Option<f64>,
    #[allow(dead_code)]
    #[serde(deserialize_with = "csv::invalid_option")]
    pub z: Option<f64>,
    #[allow(dead_code)]
    pub lobe: String,
    #[allow(dead_code)]
    pub region: String,
    pub network: String,
    #[allow(dead_code)]
    pub yeo7_network: String,
    #[allow(dead_code)]
    pub yeo17_network: String,
}

// ============================================================================
// Pipeline Results
// ============================================================================

/// What a connectivity run read and wrote
#[derive(Debug, Clone)]
pub struct ConnectivitySummary {
    pub file_count: usize,
    pub total_samples: usize,
    pub parcels: usize,
    pub output: PathBuf,
}

impl ConnectivitySummary {
    /// Format as a one-line report
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} files, {} samples x {} parcels -> {}",
            self.file_count,
            self.total_samples,
            self.parcels,
            self.output.display()
        )
    }
}

/// What a package scan found and wrote
#[derive(Debug, Clone)]
pub struct PackagesSummary {
    pub documents: usize,
    pub packages: Vec<String>,
    pub dockerfile_includes: PathBuf,
    pub install_script: PathBuf,
}
