use crate::structs::{CcError, ParcelRecord, Result};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;

/// Read the tab-separated parcel metadata table
///
/// # Errors
/// Returns error if the file is missing, a row is malformed, or the table is empty
pub fn read_parcels(path: &Path) -> Result<Vec<ParcelRecord>> {
    let file = std::fs::File::open(path)?;
    let records = parse_parcels(file)?;
    tracing::debug!("Read {} parcels from {}", records.len(), path.display());
    Ok(records)
}

/// Parse parcel rows from any reader
///
/// # Errors
/// Returns error if a row does not have exactly ten well-typed fields,
/// or if there are no rows at all
pub fn parse_parcels<R: Read>(reader: R) -> Result<Vec<ParcelRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: ParcelRecord = result?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(CcError::Metadata("parcel table has no rows".into()));
    }

    Ok(records)
}
