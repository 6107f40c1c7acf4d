//! Immutable star catalog ordered by right ascension.
//!
//! `StarCatalog` is built once from loader output and never mutated. Stars are
//! stored in ascending decimal right ascension, and the decimal RA/Dec of every
//! star is cached alongside the records so the nearest-star query never has to
//! re-derive them from sexagesimal fields.
//!
//! Construction validates every record (legal sexagesimal ranges, finite
//! values). Unsorted input is either re-sorted ([`StarCatalog::new`]) or
//! rejected ([`StarCatalog::new_presorted`]).

use rkyv::{Archive, Deserialize, Serialize};
use tracing::{debug, info};

use crate::angle::{DEC_DEGREES_MAX, RA_HOURS_MAX};
use crate::error::{CatalogError, CatalogResult};
use crate::StarRecord;

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
pub struct StarCatalog {
    stars: Vec<StarRecord>,
    ra_hours: Vec<f64>,
    dec_degrees: Vec<f64>,
}

impl StarCatalog {
    /// Build a catalog from loader output, re-sorting by right ascension if needed.
    ///
    /// The sort is stable, so stars with equal RA keep their input order.
    ///
    /// # Errors
    /// Returns a [`CatalogError`] for the first record with an out-of-range or
    /// non-finite field.
    pub fn new(mut stars: Vec<StarRecord>) -> CatalogResult<Self> {
        for (index, star) in stars.iter().enumerate() {
            validate_record(index, star)?;
        }

        if first_unsorted(&stars).is_some() {
            info!("Catalog input not sorted by RA; re-sorting {} stars", stars.len());
            stars.sort_by(|a, b| a.ra_hours().total_cmp(&b.ra_hours()));
        }

        let catalog = Self::from_sorted(stars);
        info!("Built star catalog with {} stars", catalog.len());
        Ok(catalog)
    }

    /// Build a catalog from input that must already be sorted by right ascension.
    ///
    /// # Errors
    /// Returns [`CatalogError::Unsorted`] at the first out-of-order record, or
    /// the validation error for the first malformed record.
    pub fn new_presorted(stars: Vec<StarRecord>) -> CatalogResult<Self> {
        for (index, star) in stars.iter().enumerate() {
            validate_record(index, star)?;
        }
        if let Some(index) = first_unsorted(&stars) {
            return Err(CatalogError::Unsorted {
                index,
                previous: stars[index - 1].ra_hours(),
                current: stars[index].ra_hours(),
            });
        }
        Ok(Self::from_sorted(stars))
    }

    /// An empty catalog. Queries against it always return `None`.
    pub fn empty() -> Self {
        Self::from_sorted(Vec::new())
    }

    fn from_sorted(stars: Vec<StarRecord>) -> Self {
        let ra_hours = stars.iter().map(StarRecord::ra_hours).collect();
        let dec_degrees = stars.iter().map(StarRecord::dec_degrees).collect();
        Self {
            stars,
            ra_hours,
            dec_degrees,
        }
    }

    /// Return the total number of stars in the catalog.
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    /// Alias of [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Return `true` when the catalog contains no stars.
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Star at position `index` in RA order, or `None` past the end.
    pub fn at(&self, index: usize) -> Option<&StarRecord> {
        self.stars.get(index)
    }

    /// Return all catalog stars as an immutable slice, in RA order.
    pub fn stars(&self) -> &[StarRecord] {
        &self.stars
    }

    /// Decimal right ascension (hours) of every star, in catalog order.
    pub fn ra_hours(&self) -> &[f64] {
        &self.ra_hours
    }

    /// Decimal declination (degrees) of every star, in catalog order.
    pub fn dec_degrees(&self) -> &[f64] {
        &self.dec_degrees
    }

    /// Position of the star with the given catalog id, if present.
    pub fn position_of(&self, catalog_id: u64) -> Option<usize> {
        self.stars.iter().position(|s| s.catalog_id == catalog_id)
    }
}

// ── Validation ──────────────────────────────────────────────────────────────

fn validate_record(index: usize, star: &StarRecord) -> CatalogResult<()> {
    let id = star.catalog_id;
    let ra = &star.right_ascension;
    let dec = &star.declination;

    for (field, value) in [
        ("right ascension seconds", ra.seconds),
        ("declination seconds", dec.seconds),
        ("magnitude", star.magnitude),
    ] {
        if !value.is_finite() {
            return Err(CatalogError::NonFiniteField {
                index,
                catalog_id: id,
                field,
            });
        }
    }

    let ra_err = |field, value| CatalogError::RightAscensionOutOfRange {
        index,
        catalog_id: id,
        field,
        value,
    };
    if ra.hours >= RA_HOURS_MAX as u32 {
        return Err(ra_err("hours", ra.hours as f64));
    }
    if ra.minutes >= 60 {
        return Err(ra_err("minutes", ra.minutes as f64));
    }
    if !(0.0..60.0).contains(&ra.seconds) {
        return Err(ra_err("seconds", ra.seconds));
    }
    let ra_hours = star.ra_hours();
    if !(0.0..RA_HOURS_MAX).contains(&ra_hours) {
        return Err(ra_err("decimal hours", ra_hours));
    }

    let dec_err = |field, value| CatalogError::DeclinationOutOfRange {
        index,
        catalog_id: id,
        field,
        value,
    };
    if dec.degrees.unsigned_abs() > DEC_DEGREES_MAX as u32 {
        return Err(dec_err("degrees", dec.degrees as f64));
    }
    if dec.minutes >= 60 {
        return Err(dec_err("minutes", dec.minutes as f64));
    }
    if !(0.0..60.0).contains(&dec.seconds) {
        return Err(dec_err("seconds", dec.seconds));
    }
    let dec_degrees = star.dec_degrees();
    if !(-DEC_DEGREES_MAX..=DEC_DEGREES_MAX).contains(&dec_degrees) {
        return Err(dec_err("decimal degrees", dec_degrees));
    }

    Ok(())
}

/// Index of the first record whose RA is below its predecessor's.
fn first_unsorted(stars: &[StarRecord]) -> Option<usize> {
    stars
        .windows(2)
        .position(|w| w[0].ra_hours() > w[1].ra_hours())
        .map(|i| i + 1)
}

// ── Serialization ───────────────────────────────────────────────────────────

impl StarCatalog {
    /// Serialize the catalog to bytes using rkyv.
    pub fn to_rkyv_bytes(&self) -> anyhow::Result<Vec<u8>> {
        let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(self)
            .map_err(|e| anyhow::anyhow!("rkyv serialization failed: {}", e))?;
        Ok(bytes.to_vec())
    }

    /// Save the catalog to a file using rkyv.
    pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let bytes = self.to_rkyv_bytes()?;
        std::fs::write(path, &bytes)?;
        info!("Saved catalog to {:?} ({} bytes)", path, bytes.len());
        Ok(())
    }

    /// Load a catalog from an rkyv file.
    ///
    /// The stored records are re-validated and must still be in RA order;
    /// the cached decimal coordinates are rebuilt rather than trusted.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let stored = rkyv::from_bytes::<Self, rkyv::rancor::Error>(&bytes)
            .map_err(|e| anyhow::anyhow!("rkyv deserialization failed: {}", e))?;
        debug!("Decoded {} stored stars from {:?}", stored.stars.len(), path);
        let catalog = Self::new_presorted(stored.stars)?;
        info!("Loaded catalog: {} stars", catalog.len());
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Declination, RightAscension};

    fn star(id: u64, ra_h: u32, ra_m: u32, dec_d: i32) -> StarRecord {
        StarRecord::new(
            id,
            RightAscension::new(ra_h, ra_m, 0.0),
            Declination::new(dec_d, 0, 0.0),
            5.0,
        )
    }

    #[test]
    fn resorts_unsorted_input() {
        let catalog = StarCatalog::new(vec![
            star(1, 20, 0, 0),
            star(2, 1, 30, 10),
            star(3, 1, 0, 10),
        ])
        .unwrap();

        let ids: Vec<u64> = catalog.stars().iter().map(|s| s.catalog_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(catalog.ra_hours(), &[1.0, 1.5, 20.0]);
        assert_eq!(catalog.dec_degrees(), &[10.0, 10.0, 0.0]);
    }

    #[test]
    fn resort_is_stable_for_equal_ra() {
        let catalog = StarCatalog::new(vec![
            star(9, 5, 0, 0),
            star(7, 3, 0, 1),
            star(8, 3, 0, 2),
        ])
        .unwrap();
        let ids: Vec<u64> = catalog.stars().iter().map(|s| s.catalog_id).collect();
        assert_eq!(ids, vec![7, 8, 9]);
    }

    #[test]
    fn presorted_rejects_unsorted_input() {
        let err = StarCatalog::new_presorted(vec![star(1, 2, 0, 0), star(2, 1, 0, 0)])
            .unwrap_err();
        match err {
            CatalogError::Unsorted {
                index,
                previous,
                current,
            } => {
                assert_eq!(index, 1);
                assert_eq!(previous, 2.0);
                assert_eq!(current, 1.0);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let bad_hours = star(1, 24, 0, 0);
        assert!(matches!(
            StarCatalog::new(vec![bad_hours]),
            Err(CatalogError::RightAscensionOutOfRange { field: "hours", .. })
        ));

        let bad_minutes = star(2, 1, 60, 0);
        assert!(matches!(
            StarCatalog::new(vec![bad_minutes]),
            Err(CatalogError::RightAscensionOutOfRange {
                field: "minutes",
                ..
            })
        ));

        let mut bad_seconds = star(3, 1, 0, 0);
        bad_seconds.right_ascension.seconds = -1.0;
        assert!(matches!(
            StarCatalog::new(vec![bad_seconds]),
            Err(CatalogError::RightAscensionOutOfRange {
                field: "seconds",
                ..
            })
        ));

        let bad_dec = star(4, 1, 0, 91);
        assert!(matches!(
            StarCatalog::new(vec![bad_dec]),
            Err(CatalogError::DeclinationOutOfRange {
                field: "degrees",
                ..
            })
        ));

        let mut over_pole = star(5, 1, 0, 90);
        over_pole.declination.minutes = 30;
        assert!(matches!(
            StarCatalog::new(vec![over_pole]),
            Err(CatalogError::DeclinationOutOfRange {
                field: "decimal degrees",
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_finite_fields() {
        let mut s = star(1, 1, 0, 0);
        s.magnitude = f64::NAN;
        let err = StarCatalog::new(vec![star(0, 0, 0, 0), s]).unwrap_err();
        assert_eq!(err.record_index(), Some(1));
        assert!(matches!(err, CatalogError::NonFiniteField { field: "magnitude", .. }));

        let mut s = star(2, 1, 0, 0);
        s.right_ascension.seconds = f64::INFINITY;
        assert!(matches!(
            StarCatalog::new(vec![s]),
            Err(CatalogError::NonFiniteField {
                field: "right ascension seconds",
                ..
            })
        ));

        let mut s = star(3, 1, 0, 0);
        s.declination.seconds = f64::NAN;
        assert!(matches!(
            StarCatalog::new(vec![s]),
            Err(CatalogError::NonFiniteField {
                field: "declination seconds",
                ..
            })
        ));
    }

    #[test]
    fn seconds_are_half_open() {
        let mut s = star(1, 1, 0, 0);
        s.declination.seconds = 60.0;
        assert!(matches!(
            StarCatalog::new(vec![s]),
            Err(CatalogError::DeclinationOutOfRange {
                field: "seconds",
                ..
            })
        ));

        let mut s = star(2, 1, 0, 0);
        s.right_ascension.seconds = 60.0;
        assert!(matches!(
            StarCatalog::new(vec![s]),
            Err(CatalogError::RightAscensionOutOfRange {
                field: "seconds",
                ..
            })
        ));

        let mut s = star(3, 1, 59, 0);
        s.right_ascension.seconds = 59.999;
        s.declination.seconds = 59.999;
        assert!(StarCatalog::new(vec![s]).is_ok());
    }

    #[test]
    fn empty_catalog() {
        let catalog = StarCatalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.size(), 0);
        assert!(catalog.at(0).is_none());
        assert!(StarCatalog::empty().is_empty());
    }

    #[test]
    fn indexed_access() {
        let catalog = StarCatalog::new(vec![star(11, 3, 0, 0), star(10, 2, 0, 0)]).unwrap();
        assert_eq!(catalog.at(0).map(|s| s.catalog_id), Some(10));
        assert_eq!(catalog.at(1).map(|s| s.catalog_id), Some(11));
        assert!(catalog.at(2).is_none());
        assert_eq!(catalog.position_of(11), Some(1));
        assert_eq!(catalog.position_of(99), None);
    }

    #[test]
    fn rkyv_file_round_trip() {
        let catalog = StarCatalog::new(vec![
            star(1, 1, 0, 10),
            star(2, 4, 15, -30).with_spectral_type("K0"),
        ])
        .unwrap();

        let file = tempfile::NamedTempFile::new().unwrap();
        catalog.save_to_file(file.path()).unwrap();
        let loaded = StarCatalog::load_from_file(file.path()).unwrap();

        assert_eq!(loaded.stars(), catalog.stars());
        assert_eq!(loaded.ra_hours(), catalog.ra_hours());
        assert_eq!(loaded.dec_degrees(), catalog.dec_degrees());
    }

    #[test]
    fn load_rejects_garbage() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"not a catalog").unwrap();
        assert!(StarCatalog::load_from_file(file.path()).is_err());
    }
}
