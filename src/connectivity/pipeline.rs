//! Connectivity pipeline: load, correlate, reorder, write

use crate::config::ConnectivityConfig;
use crate::connectivity::correlation::compute_correlation;
use crate::connectivity::output::write_matrix;
use crate::connectivity::reorder::{derive_permutation, reorder};
use crate::connectivity::timeseries::{load_and_concatenate, SampleMatrix};
use crate::parcels::read_parcels;
use crate::structs::{ConnectivitySummary, ParcelRecord, Result, Sample};
use ndarray::Array2;

/// Correlate stacked timeseries and reorder the result by parcel metadata
///
/// # Errors
/// Returns error if correlation fails or the metadata does not describe a
/// valid permutation of the parcels
pub fn connectivity_from_parts<A: Sample>(
    timeseries: &Array2<A>,
    records: &[ParcelRecord],
) -> Result<Array2<f64>> {
    let correlation = compute_correlation(timeseries)?;
    let permutation = derive_permutation(records)?;
    reorder(&correlation, &permutation)
}

/// Run the full connectivity build described by `config`
///
/// # Errors
/// Any I/O, format, or shape failure aborts the run
pub fn build_connectivity(config: &ConnectivityConfig) -> Result<ConnectivitySummary> {
    config.validate()?;

    tracing::debug!("loading timeseries from {}", config.timeseries_dir.display());
    let set = load_and_concatenate(&config.timeseries_dir, &config.extension, config.precision)?;
    tracing::info!(
        "stacked {} samples x {} parcels ({} precision)",
        set.n_samples(),
        set.n_parcels(),
        set.data.precision()
    );

    let records = read_parcels(&config.parcels)?;
    let sorted = match &set.data {
        SampleMatrix::Half(samples) => connectivity_from_parts(samples, &records)?,
        SampleMatrix::Single(samples) => connectivity_from_parts(samples, &records)?,
        SampleMatrix::Double(samples) => connectivity_from_parts(samples, &records)?,
    };

    write_matrix(&sorted, &config.output, config.digits)?;

    Ok(ConnectivitySummary {
        file_count: set.files.len(),
        total_samples: set.n_samples(),
        parcels: set.n_parcels(),
        output: config.output.clone(),
    })
}
