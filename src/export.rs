use crate::error::{AtlasError, Result};
use crate::types::Attraction;
use std::path::Path;

/// Column order of the flat-file export. The reader in `data` checks
/// incoming files against the same array.
pub const CSV_HEADER: [&str; 5] = ["Name", "Latitude", "Longitude", "Description", "Type"];

/// File name used for the `generate` artifact and the download link.
pub const CSV_FILE_NAME: &str = "malaysia_tourist_attractions.csv";

/// Write the ordered dataset to `path` as CSV, header first, one row per
/// record, no derived columns.
pub fn write_csv(path: &Path, attractions: &[Attraction]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| {
        AtlasError::ExportError(format!("failed to create {}: {}", path.display(), e))
    })?;
    write_rows(&mut wtr, attractions)?;
    wtr.flush()
        .map_err(|e| AtlasError::ExportError(format!("failed to write {}: {}", path.display(), e)))
}

/// The same export, rendered to a string for the HTTP download route.
pub fn csv_string(attractions: &[Attraction]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    write_rows(&mut wtr, attractions)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| AtlasError::ExportError(format!("failed to flush CSV buffer: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| AtlasError::ExportError(format!("CSV output was not UTF-8: {}", e)))
}

fn write_rows<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    attractions: &[Attraction],
) -> Result<()> {
    wtr.write_record(CSV_HEADER)
        .map_err(|e| AtlasError::ExportError(format!("failed to write CSV header: {}", e)))?;
    for a in attractions {
        let latitude = a.latitude.to_string();
        let longitude = a.longitude.to_string();
        wtr.write_record([
            a.name.as_str(),
            latitude.as_str(),
            longitude.as_str(),
            a.description.as_str(),
            a.category.label(),
        ])
        .map_err(|e| {
            AtlasError::ExportError(format!("failed to write record for '{}': {}", a.name, e))
        })?;
    }
    Ok(())
}
