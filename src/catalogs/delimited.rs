//! Comma-separated star records with sexagesimal columns.
//!
//! Expected header:
//!
//! ```text
//! catalog_id,ra_hours,ra_minutes,ra_seconds,dec_degrees,dec_minutes,dec_seconds,magnitude,spectral_type
//! ```
//!
//! `spectral_type` may be empty or omitted.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{CatalogError, CatalogResult};
use crate::{Declination, RightAscension, StarCatalog, StarRecord};

#[derive(Debug, Deserialize)]
struct DelimitedRow {
    catalog_id: u64,
    ra_hours: u32,
    ra_minutes: u32,
    ra_seconds: f64,
    dec_degrees: i32,
    dec_minutes: u32,
    dec_seconds: f64,
    magnitude: f64,
    #[serde(default)]
    spectral_type: Option<String>,
}

impl From<DelimitedRow> for StarRecord {
    fn from(row: DelimitedRow) -> Self {
        let mut star = StarRecord::new(
            row.catalog_id,
            RightAscension::new(row.ra_hours, row.ra_minutes, row.ra_seconds),
            Declination::new(row.dec_degrees, row.dec_minutes, row.dec_seconds),
            row.magnitude,
        );
        star.spectral_type = row.spectral_type.filter(|s| !s.trim().is_empty());
        star
    }
}

/// Read star records from CSV with a header row, in file order.
pub fn read_delimited_records<R: Read>(reader: R) -> CatalogResult<Vec<StarRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    rdr.deserialize::<DelimitedRow>()
        .enumerate()
        .map(|(index, row)| {
            row.map(StarRecord::from)
                .map_err(|e| CatalogError::Decode {
                    index,
                    message: e.to_string(),
                })
        })
        .collect()
}

/// Load a CSV catalog from an in-memory string.
pub fn load_delimited_catalog(data: &str) -> CatalogResult<StarCatalog> {
    StarCatalog::new(read_delimited_records(data.as_bytes())?)
}

pub fn load_delimited_catalog_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<StarCatalog> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let catalog = StarCatalog::new(read_delimited_records(file)?)?;
    info!("Loaded {} stars from {}", catalog.len(), path.display());
    Ok(catalog)
}
