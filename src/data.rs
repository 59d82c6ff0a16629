use crate::config::AppConfig;
use crate::error::AtlasError;
use crate::export::CSV_HEADER;
use crate::types::{Attraction, Category};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::warn;

pub fn load_data(config: &AppConfig) -> Result<Vec<Attraction>> {
    let attractions = match &config.input.attractions_csv {
        Some(path) => {
            println!("Loading attractions from {:?}...", path);
            read_attractions_csv(path)
                .with_context(|| format!("Failed to load attractions from {:?}", path))?
        }
        None => builtin_attractions(),
    };

    println!("Loaded {} attractions", attractions.len());
    warn_on_duplicate_names(&attractions);

    Ok(attractions)
}

/// Parse an attractions CSV in the export format (`Name,Latitude,Longitude,
/// Description,Type`). Every record is validated; a bad row fails the whole
/// load rather than being skipped.
pub fn read_attractions_csv(path: &Path) -> std::result::Result<Vec<Attraction>, AtlasError> {
    let file = File::open(path)
        .map_err(|e| AtlasError::ExportError(format!("failed to open {}: {}", path.display(), e)))?;
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = rdr
        .headers()
        .map_err(|e| AtlasError::ExportError(format!("failed to read CSV header: {}", e)))?;
    let header_ok = headers.len() == CSV_HEADER.len()
        && headers.iter().zip(CSV_HEADER.iter()).all(|(got, want)| got == *want);
    if !header_ok {
        return Err(AtlasError::ExportError(format!(
            "unexpected CSV header {:?}, expected {:?}",
            headers, CSV_HEADER
        )));
    }

    let mut attractions = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record_no = i + 1;
        let record = result.map_err(|e| {
            AtlasError::ExportError(format!("failed to read CSV record {}: {}", record_no, e))
        })?;
        if record.len() != CSV_HEADER.len() {
            return Err(AtlasError::ExportError(format!(
                "CSV record {} has {} fields, expected {}",
                record_no,
                record.len(),
                CSV_HEADER.len()
            )));
        }

        let latitude = parse_coordinate(record.get(1).unwrap_or(""), "latitude", record_no)?;
        let longitude = parse_coordinate(record.get(2).unwrap_or(""), "longitude", record_no)?;

        let attraction = Attraction {
            name: record.get(0).unwrap_or("").to_string(),
            latitude,
            longitude,
            description: record.get(3).unwrap_or("").to_string(),
            category: Category::parse(record.get(4).unwrap_or("")),
        };
        attraction.validate()?;
        attractions.push(attraction);
    }

    Ok(attractions)
}

fn parse_coordinate(
    field: &str,
    what: &str,
    record_no: usize,
) -> std::result::Result<f64, AtlasError> {
    field.trim().parse::<f64>().map_err(|_| {
        AtlasError::ExportError(format!(
            "CSV record {} has an invalid {}: '{}'",
            record_no, what, field
        ))
    })
}

/// Names are expected unique but not enforced; flag repeats and keep going.
fn warn_on_duplicate_names(attractions: &[Attraction]) {
    let mut seen = HashSet::new();
    for a in attractions {
        if !seen.insert(a.name.as_str()) {
            warn!("duplicate attraction name in dataset: '{}'", a.name);
        }
    }
}

/// The sample dataset of popular Malaysian tourist attractions, compiled in
/// so both commands work without any input file.
pub fn builtin_attractions() -> Vec<Attraction> {
    vec![
        Attraction {
            name: "Petronas Twin Towers".to_string(),
            latitude: 3.1579,
            longitude: 101.7118,
            description: "Iconic twin skyscrapers in Kuala Lumpur, a must-visit landmark in Malaysia.".to_string(),
            category: Category::HistoricalSite,
        },
        Attraction {
            name: "Batu Caves".to_string(),
            latitude: 3.2370,
            longitude: 101.6832,
            description: "A limestone hill with caves and Hindu temples, featuring a giant Lord Murugan statue.".to_string(),
            category: Category::HistoricalSite,
        },
        Attraction {
            name: "Langkawi Sky Bridge".to_string(),
            latitude: 6.3742,
            longitude: 99.6653,
            description: "A curved pedestrian bridge above Langkawi Island, offering stunning views.".to_string(),
            category: Category::NaturalWonder,
        },
        Attraction {
            name: "Penang Hill".to_string(),
            latitude: 5.4226,
            longitude: 100.2767,
            description: "A hill resort with a funicular train, offering panoramic views of Penang.".to_string(),
            category: Category::NaturalWonder,
        },
        Attraction {
            name: "Taman Negara".to_string(),
            latitude: 4.7109,
            longitude: 102.4070,
            description: "One of the world's oldest tropical rainforests, popular for trekking and wildlife watching.".to_string(),
            category: Category::NaturalWonder,
        },
        Attraction {
            name: "Sunway Lagoon".to_string(),
            latitude: 3.0731,
            longitude: 101.6073,
            description: "A famous amusement park in Selangor offering thrilling rides and water attractions.".to_string(),
            category: Category::AmusementPark,
        },
    ]
}
