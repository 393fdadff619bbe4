use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::{CleanedObservation, RawPollRecord};
use crate::error::Result;
use crate::simulate::SimulatedDraw;

/// Reads the raw polling export. Only the six columns the pipeline needs
/// are deserialized; the export's many other columns are ignored.
pub fn read_raw_polls(path: &Path) -> Result<Vec<RawPollRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    info!(rows = records.len(), path = %path.display(), "read raw polling file");
    Ok(records)
}

/// Writes the cleaned analysis dataset. Header names come from the
/// `CleanedObservation` field order, which is the persisted column
/// contract the fitter reads back.
pub fn write_cleaned_dataset(path: &Path, dataset: &[CleanedObservation]) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for row in dataset {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(rows = dataset.len(), path = %path.display(), "wrote cleaned dataset");
    Ok(())
}

pub fn read_cleaned_dataset(path: &Path) -> Result<Vec<CleanedObservation>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut dataset = Vec::new();
    for row in reader.deserialize() {
        dataset.push(row?);
    }
    info!(rows = dataset.len(), path = %path.display(), "read cleaned dataset");
    Ok(dataset)
}

pub fn write_simulated_draws(path: &Path, draws: &[SimulatedDraw]) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for draw in draws {
        writer.serialize(draw)?;
    }
    writer.flush()?;
    info!(rows = draws.len(), path = %path.display(), "wrote simulated predictions");
    Ok(())
}

/// Creates the directory a file will be written into, if missing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
