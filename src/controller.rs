//! Event-driven controller for the planar sky map.
//!
//! The controller owns the viewport state and the latest click result, and
//! shares the read-only catalog. Every handler runs to completion before
//! returning, so observers only ever see fully updated state.

use std::sync::Arc;

use tracing::debug;

use crate::angle::round_to_places;
use crate::nearest::{QueryConfig, StarMatch};
use crate::projection::{Dimensions, SkyDomain, Viewport, ViewportConfig};
use crate::render::{self, AxisLabels, RenderedStar};
use crate::{StarCatalog, StarRecord};

/// Configuration for an [`InteractionController`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkyMapConfig {
    pub query: QueryConfig,
    pub viewport: ViewportConfig,
    /// Decimal places the published click coordinates are rounded to. Default 2.
    pub click_precision: u32,
}

impl Default for SkyMapConfig {
    fn default() -> Self {
        Self {
            query: QueryConfig::default(),
            viewport: ViewportConfig::default(),
            click_precision: 2,
        }
    }
}

/// Decimal sky coordinates of a click, rounded for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryPoint {
    /// Right ascension in hours.
    pub ra: f64,
    /// Declination in degrees.
    pub dec: f64,
}

/// Outcome of a click.
///
/// `query_point` is `None` when the pointer was outside the map;
/// `matched` is `None` on any miss, including an empty catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickResult {
    pub query_point: Option<QueryPoint>,
    pub matched: Option<StarMatch>,
}

impl ClickResult {
    pub const MISS: ClickResult = ClickResult {
        query_point: None,
        matched: None,
    };

    pub fn is_miss(&self) -> bool {
        self.matched.is_none()
    }

    /// The matched star record, looked up in `catalog`.
    pub fn matched_star<'a>(&self, catalog: &'a StarCatalog) -> Option<&'a StarRecord> {
        self.matched.and_then(|m| catalog.at(m.index))
    }
}

/// Wires resize, wheel, drag and click events to the viewport and the
/// nearest-star query.
#[derive(Debug, Clone)]
pub struct InteractionController {
    catalog: Arc<StarCatalog>,
    viewport: Viewport,
    config: SkyMapConfig,
    last_click: Option<ClickResult>,
}

impl InteractionController {
    pub fn new(catalog: Arc<StarCatalog>, width: f64, height: f64, config: SkyMapConfig) -> Self {
        let viewport = Viewport::new(width, height, config.viewport.clone());
        debug!(
            "Sky map controller created: {} stars, {}x{} px",
            catalog.len(),
            viewport.dimensions().width,
            viewport.dimensions().height
        );
        Self {
            catalog,
            viewport,
            config,
            last_click: None,
        }
    }

    pub fn catalog(&self) -> &Arc<StarCatalog> {
        &self.catalog
    }

    pub fn config(&self) -> &SkyMapConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn dimensions(&self) -> Dimensions {
        self.viewport.dimensions()
    }

    pub fn domain(&self) -> SkyDomain {
        self.viewport.domain()
    }

    pub fn last_click(&self) -> Option<&ClickResult> {
        self.last_click.as_ref()
    }

    /// Star matched by the latest click, if any.
    pub fn last_click_star(&self) -> Option<&StarRecord> {
        self.last_click
            .as_ref()
            .and_then(|click| click.matched_star(&self.catalog))
    }

    // ── Event handlers ─────────────────────────────────────────────────────

    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
        debug!(
            "Resized to {}x{} px, domain {:?}",
            self.viewport.dimensions().width,
            self.viewport.dimensions().height,
            self.viewport.domain()
        );
    }

    /// Wheel event at plot pixel `(px, py)`. Returns `true` if the view changed.
    pub fn on_wheel(&mut self, px: f64, py: f64, delta: f64) -> bool {
        let changed = self.viewport.zoom_by_wheel(px, py, delta);
        if changed {
            debug!("Zoom k = {:.3}", self.viewport.transform().k);
        }
        changed
    }

    /// Drag by a pixel delta. Returns `true` if the view changed.
    pub fn on_drag(&mut self, dx: f64, dy: f64) -> bool {
        self.viewport.pan_by(dx, dy)
    }

    /// Resolve a click at plot pixel `(px, py)` and publish the result.
    ///
    /// The query uses full-precision coordinates; only the published query
    /// point is rounded.
    pub fn on_click(&mut self, px: f64, py: f64) -> &ClickResult {
        let result = match self.viewport.unproject(px, py) {
            Some((ra, dec)) => {
                let places = self.config.click_precision;
                let matched = self.catalog.find_nearest_match(ra, dec, &self.config.query);
                ClickResult {
                    query_point: Some(QueryPoint {
                        ra: round_to_places(ra, places),
                        dec: round_to_places(dec, places),
                    }),
                    matched,
                }
            }
            None => ClickResult::MISS,
        };

        match result.matched_star(&self.catalog) {
            Some(star) => debug!(
                "Click ({:.1}, {:.1}) matched star {} at distance {:.4}",
                px,
                py,
                star.catalog_id,
                result.matched.map_or(f64::NAN, |m| m.distance)
            ),
            None => debug!("Click ({:.1}, {:.1}) missed", px, py),
        }

        self.last_click.insert(result)
    }

    // ── Derived frame data ─────────────────────────────────────────────────

    /// Star markers for the current view.
    pub fn render(&self) -> Vec<RenderedStar> {
        render::project_catalog(&self.catalog, &self.viewport)
    }

    pub fn axis_labels(&self) -> AxisLabels {
        AxisLabels::from_domain(&self.viewport.domain())
    }
}
