use rkyv::{Archive, Deserialize, Serialize};

use crate::angle;

/// Right ascension in sexagesimal hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Archive, Serialize, Deserialize)]
pub struct RightAscension {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl RightAscension {
    pub fn new(hours: u32, minutes: u32, seconds: f64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Decimal hours, `hours + minutes/60 + seconds/3600`.
    pub fn to_decimal_hours(&self) -> f64 {
        angle::ra_to_decimal_hours(self)
    }
}

/// Declination in sexagesimal degrees, arcminutes and arcseconds.
///
/// The sign is carried by `degrees`; `minutes` and `seconds` are magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Archive, Serialize, Deserialize)]
pub struct Declination {
    pub degrees: i32,
    pub minutes: u32,
    pub seconds: f64,
}

impl Declination {
    pub fn new(degrees: i32, minutes: u32, seconds: f64) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    /// Decimal degrees, `degrees + minutes/60 + seconds/3600`.
    pub fn to_decimal_degrees(&self) -> f64 {
        angle::dec_to_decimal_degrees(self)
    }
}

/// One entry of the star catalog.
///
/// Magnitude is a brightness value (lower is brighter) used for marker
/// sizing only; it never filters stars out of a query.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct StarRecord {
    /// Opaque catalog identifier (e.g. SAO number).
    pub catalog_id: u64,
    pub right_ascension: RightAscension,
    pub declination: Declination,
    pub magnitude: f64,
    /// Display-only spectral classification.
    pub spectral_type: Option<String>,
}

impl StarRecord {
    pub fn new(
        catalog_id: u64,
        right_ascension: RightAscension,
        declination: Declination,
        magnitude: f64,
    ) -> Self {
        Self {
            catalog_id,
            right_ascension,
            declination,
            magnitude,
            spectral_type: None,
        }
    }

    /// Builder-style setter for the spectral type.
    pub fn with_spectral_type(mut self, spectral_type: impl Into<String>) -> Self {
        self.spectral_type = Some(spectral_type.into());
        self
    }

    /// Right ascension in decimal hours.
    pub fn ra_hours(&self) -> f64 {
        self.right_ascension.to_decimal_hours()
    }

    /// Declination in decimal degrees.
    pub fn dec_degrees(&self) -> f64 {
        self.declination.to_decimal_degrees()
    }

    /// Unit vector pointing to the star's position on the celestial sphere.
    ///
    /// RA is converted at 15° per hour; +Z points at the north celestial pole.
    pub fn uvec(&self) -> crate::Vector3 {
        let ra = angle::hours_to_radians(self.ra_hours());
        let dec = self.dec_degrees().to_radians();
        let (rasin, racos) = ra.sin_cos();
        let (decsin, deccos) = dec.sin_cos();
        crate::Vector3::new(deccos * racos, deccos * rasin, decsin)
    }
}
