//! Configuration loading from a TOML file.
//!
//! Both sections are optional. Missing fields fall back to the defaults
//! below, and command-line flags override whatever the file sets.
//!
//! # Example Configuration
//!
//! ```toml
//! [connectivity]
//! timeseries_dir = "/data/myconnectome/combined_data_scrubbed"
//! extension = "txt"
//! parcels = "parcel_data.txt"
//! output = "ccmtx_sorted.txt"
//! precision = "half"
//! digits = 18
//!
//! [packages]
//! source_dir = ".."
//! extension = "Rmd"
//! output_dir = "."
//! seed = ["StanHeaders"]
//! append = ["bookdown"]
//! exclude = ["fiftystater", "rstan"]
//! ```

use crate::structs::{CcError, Precision, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Upper bound on mantissa digits in the written matrix
pub const MAX_DIGITS: usize = 30;

pub const DEFAULT_CRAN_REPO: &str = "https://cran.rstudio.com";

/// Root configuration loaded from `--config`
#[derive(Debug, Deserialize, Default)]
pub struct CcConfig {
    #[serde(default)]
    pub connectivity: ConnectivityConfig,

    #[serde(default)]
    pub packages: PackagesConfig,
}

impl CcConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or does not parse
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Settings for `ccmtx connectivity`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    /// Directory holding one timeseries file per session
    pub timeseries_dir: PathBuf,
    /// Extension (without the dot) that selects timeseries files
    pub extension: String,
    /// Tab-separated parcel metadata table
    pub parcels: PathBuf,
    /// Destination of the reordered matrix
    pub output: PathBuf,
    pub precision: Precision,
    /// Mantissa digits in the scientific-notation output
    pub digits: usize,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            timeseries_dir: PathBuf::from("/data/myconnectome/combined_data_scrubbed"),
            extension: "txt".to_string(),
            parcels: PathBuf::from("parcel_data.txt"),
            output: PathBuf::from("ccmtx_sorted.txt"),
            precision: Precision::Half,
            digits: 18,
        }
    }
}

impl ConnectivityConfig {
    /// Check values the type system cannot
    ///
    /// # Errors
    /// Returns error if the extension is empty or `digits` is out of range
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() {
            return Err(CcError::Config("timeseries extension must not be empty".into()));
        }
        if self.digits > MAX_DIGITS {
            return Err(CcError::Config(format!(
                "digits must be at most {MAX_DIGITS}, got {}",
                self.digits
            )));
        }
        Ok(())
    }
}

/// Settings for `ccmtx packages`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PackagesConfig {
    /// Directory scanned for documents
    pub source_dir: PathBuf,
    /// Extension (without the dot) of scanned documents
    pub extension: String,
    /// Directory the generated files are written to
    pub output_dir: PathBuf,
    /// Packages installed regardless of what the documents load
    pub seed: Vec<String>,
    /// Packages added after scanning
    pub append: Vec<String>,
    /// Packages dropped from the generic install list
    pub exclude: Vec<String>,
    /// Repository for the generic install lines
    pub cran_repo: String,
    /// Lines written before the generic installs
    pub preamble: Vec<String>,
    /// Lines written after the generic installs
    pub postamble: Vec<String>,
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(".."),
            extension: "Rmd".to_string(),
            output_dir: PathBuf::from("."),
            seed: vec!["StanHeaders".to_string()],
            append: vec!["bookdown".to_string()],
            exclude: vec!["fiftystater".to_string(), "rstan".to_string()],
            cran_repo: DEFAULT_CRAN_REPO.to_string(),
            preamble: vec![
                "install.packages('rstan', repos='https://cloud.r-project.org/', dependencies=TRUE)"
                    .to_string(),
            ],
            postamble: vec![
                "install.packages(\"https://cran.r-project.org/src/contrib/Archive/fiftystater/fiftystater_1.0.1.tar.gz\",repos=NULL,dependencies=TRUE)".to_string(),
                "install.packages(\"fivethirtyeightdata\", repos =\"https://fivethirtyeightdata.github.io/drat/\", type = \"source\")".to_string(),
            ],
        }
    }
}
