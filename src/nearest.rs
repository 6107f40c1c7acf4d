//! Nearest-star lookup over the RA-sorted catalog.
//!
//! The query runs in two phases so that it fits inside a single pointer-event
//! handler regardless of catalog size:
//!
//! 1. **Binary search on RA** lands on an index whose RA is close to the query.
//! 2. **Bounded scan** of `±window` indices around the landing point keeps the
//!    star with the smallest planar distance.
//!
//! The distance is Euclidean in the (RA hours, Dec degrees) plane, *not* the
//! great-circle separation. Because the window is an index range and not an
//! angular one, a closer star outside the window (for example across the
//! 0h/24h seam, or behind a dense RA cluster) is not seen. Both are accepted
//! limits of the method.

use std::ops::RangeInclusive;

use crate::{StarCatalog, StarRecord};

/// Default half-width of the scan window, in catalog indices.
pub const DEFAULT_SEARCH_WINDOW: usize = 1000;

/// Parameters controlling the nearest-star query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    /// Half-width of the linear scan around the binary-search landing index.
    /// Default 1000.
    pub window: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_SEARCH_WINDOW,
        }
    }
}

/// Result of a nearest-star query: the star's catalog index and its distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarMatch {
    /// Index into [`StarCatalog::stars`].
    pub index: usize,
    /// Planar distance in the (RA hours, Dec degrees) plane.
    pub distance: f64,
}

/// Euclidean distance in the (RA hours, Dec degrees) plane.
#[inline]
pub fn planar_distance(ra_a: f64, dec_a: f64, ra_b: f64, dec_b: f64) -> f64 {
    let dra = ra_a - ra_b;
    let ddec = dec_a - dec_b;
    (dra * dra + ddec * ddec).sqrt()
}

impl StarCatalog {
    /// Catalog index where a binary search for `ra_hours` lands.
    ///
    /// On an exact RA match this is the index of the matching star (any one of
    /// them when several share the RA). Otherwise it is the insertion point,
    /// which may equal `len()`.
    pub fn landing_index(&self, ra_hours: f64) -> usize {
        let ras = self.ra_hours();
        let mut left: isize = 0;
        let mut right: isize = ras.len() as isize - 1;
        while left <= right {
            let mid = (left + right) / 2;
            let mid_ra = ras[mid as usize];
            if mid_ra < ra_hours {
                left = mid + 1;
            } else if mid_ra > ra_hours {
                right = mid - 1;
            } else {
                // equal, or NaN on either side
                left = mid;
                break;
            }
        }
        left as usize
    }

    /// Inclusive index range scanned for a query at `ra_hours`.
    ///
    /// Returns `None` for an empty catalog.
    pub fn search_window(&self, ra_hours: f64, window: usize) -> Option<RangeInclusive<usize>> {
        if self.is_empty() {
            return None;
        }
        let landing = self.landing_index(ra_hours);
        let start = landing.saturating_sub(window);
        let end = landing.saturating_add(window).min(self.len() - 1);
        Some(start..=end)
    }

    /// Nearest star to `(ra_hours, dec_degrees)` with its index and distance.
    ///
    /// Ties keep the lowest index. Query coordinates are not range checked;
    /// a NaN coordinate yields `None`.
    pub fn find_nearest_match(
        &self,
        ra_hours: f64,
        dec_degrees: f64,
        config: &QueryConfig,
    ) -> Option<StarMatch> {
        let range = self.search_window(ra_hours, config.window)?;
        let ras = self.ra_hours();
        let decs = self.dec_degrees();

        let mut best: Option<StarMatch> = None;
        let mut best_distance = f64::INFINITY;
        for idx in range {
            let distance = planar_distance(ra_hours, dec_degrees, ras[idx], decs[idx]);
            if distance < best_distance {
                best_distance = distance;
                best = Some(StarMatch {
                    index: idx,
                    distance,
                });
            }
        }
        best
    }

    /// Nearest catalog star to `(ra_hours, dec_degrees)`, or `None` if the
    /// catalog is empty.
    pub fn find_nearest(
        &self,
        ra_hours: f64,
        dec_degrees: f64,
        config: &QueryConfig,
    ) -> Option<&StarRecord> {
        self.find_nearest_match(ra_hours, dec_degrees, config)
            .and_then(|m| self.at(m.index))
    }
}
