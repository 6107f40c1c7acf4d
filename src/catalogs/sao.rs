//! SAO-style JSON star records.
//!
//! The input is a JSON array of objects shaped like
//!
//! ```json
//! {
//!   "sao": 308,
//!   "right_ascension": { "hours": 2, "minutes": 31, "seconds": "49.09" },
//!   "declination": { "degrees": 89, "minutes": 15, "seconds": "51" },
//!   "magnitude": 2.02,
//!   "spectral_type": "F7"
//! }
//! ```
//!
//! Seconds fields appear both as JSON numbers and as numeric strings in the
//! wild; both are accepted. The identifier may be named `sao`, `id` or
//! `catalog_id`.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{CatalogError, CatalogResult};
use crate::{Declination, RightAscension, StarCatalog, StarRecord};

/// A seconds field given either as a number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Seconds {
    Number(f64),
    Text(String),
}

impl Seconds {
    fn value(&self) -> Option<f64> {
        match self {
            Seconds::Number(v) => Some(*v),
            Seconds::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawRightAscension {
    hours: u32,
    minutes: u32,
    seconds: Seconds,
}

#[derive(Debug, Clone, Deserialize)]
struct RawDeclination {
    degrees: i32,
    minutes: u32,
    seconds: Seconds,
}

/// One record as it appears in the JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct SaoStar {
    #[serde(alias = "sao", alias = "id")]
    catalog_id: u64,
    right_ascension: RawRightAscension,
    declination: RawDeclination,
    magnitude: f64,
    #[serde(default)]
    spectral_type: Option<String>,
}

impl SaoStar {
    /// Convert to a [`StarRecord`]; `index` is used for error reporting.
    pub fn to_record(&self, index: usize) -> CatalogResult<StarRecord> {
        let ra_seconds = self.right_ascension.seconds.value().ok_or_else(|| {
            CatalogError::Decode {
                index,
                message: "right ascension seconds is not a number".to_string(),
            }
        })?;
        let dec_seconds = self
            .declination
            .seconds
            .value()
            .ok_or_else(|| CatalogError::Decode {
                index,
                message: "declination seconds is not a number".to_string(),
            })?;

        let mut record = StarRecord::new(
            self.catalog_id,
            RightAscension::new(
                self.right_ascension.hours,
                self.right_ascension.minutes,
                ra_seconds,
            ),
            Declination::new(
                self.declination.degrees,
                self.declination.minutes,
                dec_seconds,
            ),
            self.magnitude,
        );
        record.spectral_type = self.spectral_type.clone();
        Ok(record)
    }
}

/// Parse SAO JSON text into star records, in file order.
pub fn parse_sao_records(data: &str) -> CatalogResult<Vec<StarRecord>> {
    let raw: Vec<serde_json::Value> =
        serde_json::from_str(data).map_err(|e| CatalogError::Format {
            message: e.to_string(),
        })?;
    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            let star: SaoStar =
                serde_json::from_value(value).map_err(|e| CatalogError::Decode {
                    index,
                    message: e.to_string(),
                })?;
            star.to_record(index)
        })
        .collect()
}

/// Load an SAO JSON catalog from an in-memory string.
pub fn load_sao_catalog(data: &str) -> CatalogResult<StarCatalog> {
    StarCatalog::new(parse_sao_records(data)?)
}

pub fn load_sao_catalog_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<StarCatalog> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)?;
    let catalog = load_sao_catalog(&data)?;
    info!("Loaded {} stars from {}", catalog.len(), path.display());
    Ok(catalog)
}
