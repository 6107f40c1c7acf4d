//! Per-frame geometry handed to the drawing surface.
//!
//! Every function here is a pure function of the catalog and the current
//! view state; callers re-run them once per view change instead of patching
//! previously drawn elements.

use crate::projection::graticule::linear_ticks;
use crate::projection::sphere::{point_size, SphereCamera};
use crate::projection::{Dimensions, SkyDomain, Viewport};
use crate::StarCatalog;

/// Tick counts for the grid lines spanning the plot.
pub const GRID_RA_TICKS: usize = 24;
pub const GRID_DEC_TICKS: usize = 18;
/// Tick counts for the labelled axes.
pub const AXIS_RA_TICKS: usize = 12;
pub const AXIS_DEC_TICKS: usize = 10;

/// A star marker in plot pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedStar {
    /// Index into [`StarCatalog::stars`].
    pub index: usize,
    pub x: f64,
    pub y: f64,
    /// Marker radius in pixels.
    pub radius: f64,
    /// Whether the marker center falls inside the plotting rectangle.
    pub visible: bool,
}

/// A star point sprite in screen pixels for the sphere view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpherePoint {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Marker radius for a magnitude at zoom scale `k`.
///
/// Markers keep a constant on-screen size as the map zooms.
pub fn marker_radius(magnitude: f64, k: f64) -> f64 {
    (6.0 - magnitude).max(1.0) * 0.2 / k
}

/// Project every catalog star onto the planar map.
pub fn project_catalog(catalog: &StarCatalog, viewport: &Viewport) -> Vec<RenderedStar> {
    let k = viewport.transform().k;
    catalog
        .stars()
        .iter()
        .zip(catalog.ra_hours().iter().zip(catalog.dec_degrees()))
        .enumerate()
        .map(|(index, (star, (&ra, &dec)))| {
            let (x, y) = viewport.project(ra, dec);
            RenderedStar {
                index,
                x,
                y,
                radius: marker_radius(star.magnitude, k),
                visible: viewport.contains_pixel(x, y),
            }
        })
        .collect()
}

/// Project the stars in front of the camera for the sphere view.
pub fn project_catalog_sphere(
    catalog: &StarCatalog,
    camera: &SphereCamera,
    size: Dimensions,
) -> Vec<SpherePoint> {
    catalog
        .stars()
        .iter()
        .zip(catalog.ra_hours().iter().zip(catalog.dec_degrees()))
        .enumerate()
        .filter_map(|(index, (star, (&ra, &dec)))| {
            let (x, y) = camera.project_radec(ra, dec, size)?;
            Some(SpherePoint {
                index,
                x,
                y,
                size: point_size(star.magnitude),
            })
        })
        .collect()
}

/// Range readouts shown along the axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    pub ra: String,
    pub dec: String,
}

impl AxisLabels {
    pub fn from_domain(domain: &SkyDomain) -> Self {
        Self {
            ra: format!(
                "RA (hours): {:.3} - {:.3}",
                domain.ra_range[0], domain.ra_range[1]
            ),
            dec: format!(
                "Dec (degrees): {:.3} - {:.3}",
                domain.dec_range[0], domain.dec_range[1]
            ),
        }
    }
}

/// Tick positions along both axes, in sky units.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticks {
    pub ra: Vec<f64>,
    pub dec: Vec<f64>,
}

/// Grid-line ticks across the visible domain.
pub fn grid_ticks(domain: &SkyDomain) -> Ticks {
    ticks(domain, GRID_RA_TICKS, GRID_DEC_TICKS)
}

/// Labelled axis ticks across the visible domain.
pub fn axis_ticks(domain: &SkyDomain) -> Ticks {
    ticks(domain, AXIS_RA_TICKS, AXIS_DEC_TICKS)
}

fn ticks(domain: &SkyDomain, ra_count: usize, dec_count: usize) -> Ticks {
    Ticks {
        ra: linear_ticks(domain.ra_range[0], domain.ra_range[1], ra_count),
        dec: linear_ticks(domain.dec_range[0], domain.dec_range[1], dec_count),
    }
}
