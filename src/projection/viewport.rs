//! Planar sky map viewport: linear RA/Dec scales plus a zoom/pan transform.
//!
//! # Coordinate conventions
//!
//! - **Plot pixels**: origin at the top-left corner of the inner plotting
//!   rectangle (the drawing surface minus its margins), +X right, +Y down.
//!   Pointer events are expected in this frame; use
//!   [`Viewport::surface_to_plot`] to convert from whole-surface pixels.
//! - **Sky**: RA in decimal hours on X (`0h` at the left edge), Dec in
//!   decimal degrees on Y (`+90°` at the top).
//!
//! # Pipeline
//!
//! ```text
//! (ra, dec) → x_scale / y_scale → unzoomed pixel → k·p + t → plot pixel
//! plot pixel → (p − t) / k → unzoomed pixel → invert scales → (ra, dec)
//! ```
//!
//! The transform is always clamped so that the visible window never leaves the
//! full sky `[0, 24] × [-90, 90]`, and the visible [`SkyDomain`] is recomputed
//! from `(k, t, size)` after every change.

use crate::angle::{self, DEC_DEGREES_MAX, RA_HOURS_MAX};

use super::scale::LinearScale;

/// Pixel size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Space reserved around the plotting rectangle for axes, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: 30.0,
            left: 30.0,
        }
    }
}

/// Zoom scale `k` and pan offset `(x, y)` applied on top of the base scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    /// Zoomed position of an unzoomed pixel.
    #[inline]
    pub fn apply(&self, px: f64, py: f64) -> (f64, f64) {
        (self.x + self.k * px, self.y + self.k * py)
    }

    /// Unzoomed position of a zoomed pixel.
    #[inline]
    pub fn invert(&self, px: f64, py: f64) -> (f64, f64) {
        ((px - self.x) / self.k, (py - self.y) / self.k)
    }
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The RA/Dec window currently visible in the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyDomain {
    /// `[min, max]` right ascension, in hours.
    pub ra_range: [f64; 2],
    /// `[min, max]` declination, in degrees.
    pub dec_range: [f64; 2],
}

impl SkyDomain {
    /// The whole sky, `[0, 24] × [-90, 90]`.
    pub const FULL: SkyDomain = SkyDomain {
        ra_range: [0.0, RA_HOURS_MAX],
        dec_range: [-DEC_DEGREES_MAX, DEC_DEGREES_MAX],
    };

    pub fn contains(&self, ra_hours: f64, dec_degrees: f64) -> bool {
        ra_hours >= self.ra_range[0]
            && ra_hours <= self.ra_range[1]
            && dec_degrees >= self.dec_range[0]
            && dec_degrees <= self.dec_range[1]
    }
}

/// Parameters controlling the planar viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportConfig {
    /// Margins between the surface edge and the plotting rectangle.
    pub margin: Margin,
    /// Smallest zoom scale (fully zoomed out). Default 1; values below 1 are raised to 1.
    pub min_scale: f64,
    /// Largest zoom scale. Default 10.
    pub max_scale: f64,
    /// Floor applied to surface and plot dimensions so scales stay finite. Default 1 px.
    pub min_dimension: f64,
    /// Wheel delta to zoom exponent: one unit of delta scales by `2^(-sensitivity)`.
    /// Default 0.002 (a 100-unit notch zooms by about 13%).
    pub wheel_sensitivity: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            margin: Margin::default(),
            min_scale: 1.0,
            max_scale: 10.0,
            min_dimension: 1.0,
            wheel_sensitivity: 0.002,
        }
    }
}

impl ViewportConfig {
    /// Repair an invalid configuration instead of failing.
    fn normalized(mut self) -> Self {
        if !self.min_dimension.is_finite() || self.min_dimension <= 0.0 {
            self.min_dimension = 1.0;
        }
        if !self.min_scale.is_finite() || self.min_scale < 1.0 {
            self.min_scale = 1.0;
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            self.max_scale = self.min_scale;
        }
        if !self.wheel_sensitivity.is_finite() {
            self.wheel_sensitivity = 0.002;
        }
        self
    }
}

/// Zoomable, pannable mapping between sky coordinates and plot pixels.
#[derive(Debug, Clone)]
pub struct Viewport {
    config: ViewportConfig,
    dimensions: Dimensions,
    inner: Dimensions,
    x_scale: LinearScale,
    y_scale: LinearScale,
    transform: ZoomTransform,
    domain: SkyDomain,
}

impl Viewport {
    /// Create a fully zoomed-out viewport for a surface of the given size.
    pub fn new(width: f64, height: f64, config: ViewportConfig) -> Self {
        let config = config.normalized();
        let transform = ZoomTransform {
            k: config.min_scale,
            x: 0.0,
            y: 0.0,
        };
        let mut viewport = Self {
            config,
            dimensions: Dimensions::new(0.0, 0.0),
            inner: Dimensions::new(0.0, 0.0),
            x_scale: LinearScale::new([0.0, RA_HOURS_MAX], [0.0, 0.0]),
            y_scale: LinearScale::new([-DEC_DEGREES_MAX, DEC_DEGREES_MAX], [0.0, 0.0]),
            transform,
            domain: SkyDomain::FULL,
        };
        viewport.set_dimensions(width, height);
        viewport.set_transform(transform);
        viewport
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Size of the whole drawing surface.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Size of the inner plotting rectangle.
    pub fn inner_size(&self) -> Dimensions {
        self.inner
    }

    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    /// Sky window currently visible, derived from the transform and size.
    pub fn domain(&self) -> SkyDomain {
        self.domain
    }

    /// RA (hours) → unzoomed plot X.
    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    /// Dec (degrees) → unzoomed plot Y.
    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    // ── State changes ──────────────────────────────────────────────────────

    /// Resize the drawing surface. The zoom scale is kept; the pan offset is
    /// re-clamped against the new plot size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.set_dimensions(width, height);
        self.set_transform(self.transform);
    }

    /// Zoom by `factor` keeping the sky point under `(px, py)` fixed.
    ///
    /// The resulting scale is clamped to the configured extent. When zooming
    /// out near an edge, the pan clamp wins over the anchor. Returns `true`
    /// if the transform changed.
    pub fn zoom_at(&mut self, px: f64, py: f64, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 || !px.is_finite() || !py.is_finite() {
            return false;
        }
        let k = (self.transform.k * factor).clamp(self.config.min_scale, self.config.max_scale);
        self.zoom_to(px, py, k)
    }

    /// Zoom for a signed wheel delta (negative zooms in) anchored at `(px, py)`.
    ///
    /// Deltas too large to represent as a factor saturate at the scale extent.
    pub fn zoom_by_wheel(&mut self, px: f64, py: f64, delta: f64) -> bool {
        if !delta.is_finite() {
            return false;
        }
        // exp2 stays finite and non-zero inside ±1000
        let exponent = (-delta * self.config.wheel_sensitivity).clamp(-1000.0, 1000.0);
        self.zoom_at(px, py, exponent.exp2())
    }

    /// Set the zoom scale to `k` keeping the sky point under `(px, py)` fixed.
    pub fn zoom_to(&mut self, px: f64, py: f64, k: f64) -> bool {
        if !k.is_finite() {
            return false;
        }
        let k = k.clamp(self.config.min_scale, self.config.max_scale);
        let (ux, uy) = self.transform.invert(px, py);
        let before = self.transform;
        self.set_transform(ZoomTransform {
            k,
            x: px - k * ux,
            y: py - k * uy,
        });
        self.transform != before
    }

    /// Pan by a pixel delta. Returns `true` if the transform changed.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        if !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        let before = self.transform;
        self.set_transform(ZoomTransform {
            k: before.k,
            x: before.x + dx,
            y: before.y + dy,
        });
        self.transform != before
    }

    /// Back to fully zoomed out.
    pub fn reset(&mut self) {
        self.set_transform(ZoomTransform {
            k: self.config.min_scale,
            x: 0.0,
            y: 0.0,
        });
    }

    /// Replace the transform, clamping scale and translation.
    pub fn set_transform(&mut self, transform: ZoomTransform) {
        let k = if transform.k.is_finite() {
            transform.k.clamp(self.config.min_scale, self.config.max_scale)
        } else {
            self.config.min_scale
        };
        self.transform = ZoomTransform {
            k,
            x: clamp_translate(transform.x, self.inner.width, k),
            y: clamp_translate(transform.y, self.inner.height, k),
        };
        self.refresh_domain();
    }

    fn set_dimensions(&mut self, width: f64, height: f64) {
        let min = self.config.min_dimension;
        let margin = self.config.margin;
        self.dimensions = Dimensions::new(at_least(width, min), at_least(height, min));
        self.inner = Dimensions::new(
            at_least(self.dimensions.width - margin.left - margin.right, min),
            at_least(self.dimensions.height - margin.top - margin.bottom, min),
        );
        self.x_scale = LinearScale::new([0.0, RA_HOURS_MAX], [0.0, self.inner.width]);
        self.y_scale = LinearScale::new(
            [-DEC_DEGREES_MAX, DEC_DEGREES_MAX],
            [self.inner.height, 0.0],
        );
    }

    fn refresh_domain(&mut self) {
        let t = self.transform;
        let ra_a = self.x_scale.invert((0.0 - t.x) / t.k);
        let ra_b = self.x_scale.invert((self.inner.width - t.x) / t.k);
        let dec_a = self.y_scale.invert((self.inner.height - t.y) / t.k);
        let dec_b = self.y_scale.invert((0.0 - t.y) / t.k);
        self.domain = SkyDomain {
            ra_range: [ra_a.min(ra_b), ra_a.max(ra_b)],
            dec_range: [dec_a.min(dec_b), dec_a.max(dec_b)],
        };
    }

    // ── Projection ─────────────────────────────────────────────────────────

    /// Forward projection: sky coordinates to plot pixels under the current transform.
    pub fn project(&self, ra_hours: f64, dec_degrees: f64) -> (f64, f64) {
        self.transform
            .apply(self.x_scale.apply(ra_hours), self.y_scale.apply(dec_degrees))
    }

    /// Inverse projection without any range checks.
    pub fn unproject_unchecked(&self, px: f64, py: f64) -> (f64, f64) {
        let (sx, sy) = self.transform.invert(px, py);
        (self.x_scale.invert(sx), self.y_scale.invert(sy))
    }

    /// Inverse projection of a pointer position.
    ///
    /// Returns `None` (a miss) when the pixel is outside the plotting
    /// rectangle, its unzoomed position is outside it, or the resulting
    /// angles leave `[0, 24] × [-90, 90]`.
    pub fn unproject(&self, px: f64, py: f64) -> Option<(f64, f64)> {
        if !self.contains_pixel(px, py) {
            return None;
        }
        let (sx, sy) = self.transform.invert(px, py);
        if !self.x_scale.range_contains(sx) || !self.y_scale.range_contains(sy) {
            return None;
        }
        let ra = self.x_scale.invert(sx);
        let dec = self.y_scale.invert(sy);
        if !angle::in_ra_range(ra) || !angle::in_dec_range(dec) {
            return None;
        }
        Some((ra, dec))
    }

    /// Whether a plot pixel lies inside the plotting rectangle.
    pub fn contains_pixel(&self, px: f64, py: f64) -> bool {
        (0.0..=self.inner.width).contains(&px) && (0.0..=self.inner.height).contains(&py)
    }

    /// Convert whole-surface pixel coordinates to plot pixels.
    pub fn surface_to_plot(&self, sx: f64, sy: f64) -> (f64, f64) {
        (sx - self.config.margin.left, sy - self.config.margin.top)
    }
}

#[inline]
fn at_least(value: f64, min: f64) -> f64 {
    if value.is_finite() {
        value.max(min)
    } else {
        min
    }
}

/// Bound a translation so the zoomed plot still covers the whole rectangle.
#[inline]
fn clamp_translate(t: f64, extent: f64, k: f64) -> f64 {
    let t = if t.is_finite() { t } else { 0.0 };
    t.max(extent * (1.0 - k)).min(0.0)
}
