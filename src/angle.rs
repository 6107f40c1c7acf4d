//! Angle normalization between sexagesimal catalog fields and decimal values.
//!
//! Right ascension is carried in decimal **hours** `[0, 24)` and declination in
//! decimal **degrees** `[-90, 90]` throughout the crate. Conversion back to
//! sexagesimal is never needed: display layers format decimals directly.

use crate::star::{Declination, RightAscension};

/// Degrees of arc per hour of right ascension.
pub const DEGREES_PER_HOUR: f64 = 15.0;
/// Exclusive upper bound of decimal right ascension.
pub const RA_HOURS_MAX: f64 = 24.0;
/// Absolute bound of decimal declination.
pub const DEC_DEGREES_MAX: f64 = 90.0;

/// Convert a sexagesimal right ascension to decimal hours.
#[inline]
pub fn ra_to_decimal_hours(ra: &RightAscension) -> f64 {
    ra.hours as f64 + ra.minutes as f64 / 60.0 + ra.seconds / 3600.0
}

/// Convert a sexagesimal declination to decimal degrees.
///
/// This is the straight linear combination of the three fields; the sign of
/// `degrees` is not propagated into the minutes and seconds terms.
#[inline]
pub fn dec_to_decimal_degrees(dec: &Declination) -> f64 {
    dec.degrees as f64 + dec.minutes as f64 / 60.0 + dec.seconds / 3600.0
}

/// Decimal hours of right ascension to radians (15° per hour).
#[inline]
pub fn hours_to_radians(hours: f64) -> f64 {
    (hours * DEGREES_PER_HOUR).to_radians()
}

/// Radians to decimal hours of right ascension.
#[inline]
pub fn radians_to_hours(rad: f64) -> f64 {
    rad.to_degrees() / DEGREES_PER_HOUR
}

/// Wrap any hour angle into `[0, 24)`.
#[inline]
pub fn wrap_hours(hours: f64) -> f64 {
    let h = hours.rem_euclid(RA_HOURS_MAX);
    // rem_euclid can round up to exactly 24.0 for tiny negative inputs
    if h >= RA_HOURS_MAX {
        0.0
    } else {
        h
    }
}

/// `true` if `hours` lies in the closed plotting range `[0, 24]`.
#[inline]
pub fn in_ra_range(hours: f64) -> bool {
    (0.0..=RA_HOURS_MAX).contains(&hours)
}

/// `true` if `degrees` lies in `[-90, 90]`.
#[inline]
pub fn in_dec_range(degrees: f64) -> bool {
    (-DEC_DEGREES_MAX..=DEC_DEGREES_MAX).contains(&degrees)
}

/// Round to a fixed number of decimal places for display stability.
pub fn round_to_places(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}
