//! Coordinate grid geometry for both map bindings.
//!
//! The sphere view draws parallels and meridians as polylines on a sphere
//! slightly inside the star sphere; the planar view draws straight grid lines
//! at "nice" tick values across the visible domain.

use nalgebra::Vector3;

use super::sphere::SphereConfig;

/// Parallels are drawn every this many degrees of latitude, poles excluded.
pub const PARALLEL_STEP_DEG: i32 = 15;
/// Meridians are drawn every this many degrees of longitude.
pub const MERIDIAN_STEP_DEG: i32 = 30;
/// Polyline segments per parallel.
pub const PARALLEL_SEGMENTS: usize = 64;

/// A point on the grid sphere at `(lon, lat)` radians.
fn grid_point(radius: f64, lon: f64, lat: f64) -> Vector3<f64> {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    Vector3::new(
        radius * cos_lat * cos_lon,
        radius * cos_lat * sin_lon,
        radius * sin_lat,
    )
}

/// Closed circles of constant latitude from -75° to +75°.
pub fn sphere_parallels(config: &SphereConfig) -> Vec<Vec<Vector3<f64>>> {
    let limit = 90 - PARALLEL_STEP_DEG;
    (-limit..=limit)
        .step_by(PARALLEL_STEP_DEG as usize)
        .map(|lat_deg| {
            let lat = (lat_deg as f64).to_radians();
            (0..=PARALLEL_SEGMENTS)
                .map(|j| {
                    let lon = j as f64 * std::f64::consts::TAU / PARALLEL_SEGMENTS as f64;
                    grid_point(config.grid_radius, lon, lat)
                })
                .collect()
        })
        .collect()
}

/// Pole-to-pole half circles every 30° of longitude, sampled every degree.
pub fn sphere_meridians(config: &SphereConfig) -> Vec<Vec<Vector3<f64>>> {
    (0..360)
        .step_by(MERIDIAN_STEP_DEG as usize)
        .map(|lon_deg| {
            let lon = (lon_deg as f64).to_radians();
            (-90..=90)
                .map(|lat_deg| grid_point(config.grid_radius, lon, (lat_deg as f64).to_radians()))
                .collect()
        })
        .collect()
}

/// Roughly `count` evenly spaced round values covering `[start, stop]`.
///
/// Steps are 1, 2 or 5 times a power of ten. Returns an empty vector for
/// non-finite bounds or a zero count.
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };

    let step = (hi - lo) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    // Negative powers divide by an integer to keep ticks like 0.1 exact.
    let ticks: Vec<f64> = if power >= 0.0 {
        let inc = factor * 10f64.powf(power);
        let first = (lo / inc).ceil() as i64;
        let last = (hi / inc).floor() as i64;
        (first..=last).map(|k| k as f64 * inc).collect()
    } else {
        let inv = 10f64.powf(-power) / factor;
        let first = (lo * inv).ceil() as i64;
        let last = (hi * inv).floor() as i64;
        (first..=last).map(|k| k as f64 / inv).collect()
    };

    if start > stop {
        ticks.into_iter().rev().collect()
    } else {
        ticks
    }
}
