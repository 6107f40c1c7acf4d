//! Celestial-sphere view: stars placed on a sphere, seen by a perspective camera.
//!
//! This is the alternative renderer binding to the planar [`Viewport`](super::Viewport).
//! Zoom changes the camera's field of view (not its distance); navigation
//! orbits the camera around the sphere's center.
//!
//! # Coordinate conventions
//!
//! - **World**: `x = R·cos(dec)·cos(ra)`, `y = R·cos(dec)·sin(ra)`,
//!   `z = R·sin(dec)`, with RA converted at 15° per hour.
//! - **Camera**: looks at the origin from `position`, world +Y is "up".
//! - **Screen pixels**: origin at the top-left corner, +X right, +Y down.
//!   The field of view is vertical, so the focal length is
//!   `f = (height/2) / tan(fov/2)`.
//!
//! # Pipeline
//!
//! ```text
//! (ra, dec) → sphere point → camera frame (right, up, forward) → divide by depth · f → pixel
//! pixel → ray through camera → intersect sphere → (ra, dec)
//! ```

use nalgebra::Vector3;

use crate::angle;

use super::viewport::Dimensions;

/// Parameters for the sphere view.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereConfig {
    /// Radius of the sphere stars are placed on. Default 600.
    pub radius: f64,
    /// Radius of the sphere the graticule is drawn on. Default 500.
    pub grid_radius: f64,
    /// Narrowest field of view in degrees. Default 12.
    pub min_fov_deg: f64,
    /// Widest field of view in degrees. Default 75.
    pub max_fov_deg: f64,
    /// Field of view when the view is created. Default 75.
    pub initial_fov_deg: f64,
    /// Multiplicative FOV step per wheel tick; zooming in multiplies by it,
    /// zooming out divides. Default 0.96.
    pub zoom_factor: f64,
    /// Distance of the orbiting camera from the origin. Default 10.
    pub camera_distance: f64,
    /// Orbit latitude limit in degrees, short of the poles. Default 89.
    pub max_orbit_lat_deg: f64,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 600.0,
            grid_radius: 500.0,
            min_fov_deg: 12.0,
            max_fov_deg: 75.0,
            initial_fov_deg: 75.0,
            zoom_factor: 0.96,
            camera_distance: 10.0,
            max_orbit_lat_deg: 89.0,
        }
    }
}

impl SphereConfig {
    /// Repair an invalid configuration instead of failing.
    fn normalized(mut self) -> Self {
        let defaults = Self::default();
        let positive = |v: f64, fallback: f64| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                fallback
            }
        };
        let fov = |v: f64, fallback: f64| {
            if v.is_finite() && v > 0.0 && v < 180.0 {
                v
            } else {
                fallback
            }
        };

        self.radius = positive(self.radius, defaults.radius);
        self.grid_radius = positive(self.grid_radius, defaults.grid_radius);
        self.camera_distance = positive(self.camera_distance, defaults.camera_distance);

        self.min_fov_deg = fov(self.min_fov_deg, defaults.min_fov_deg);
        self.max_fov_deg = fov(self.max_fov_deg, defaults.max_fov_deg);
        if self.min_fov_deg > self.max_fov_deg {
            std::mem::swap(&mut self.min_fov_deg, &mut self.max_fov_deg);
        }
        if !self.initial_fov_deg.is_finite() {
            self.initial_fov_deg = self.max_fov_deg;
        }

        if !(self.zoom_factor > 0.0 && self.zoom_factor < 1.0) {
            self.zoom_factor = defaults.zoom_factor;
        }
        if !(self.max_orbit_lat_deg >= 0.0 && self.max_orbit_lat_deg < 90.0) {
            self.max_orbit_lat_deg = defaults.max_orbit_lat_deg;
        }
        self
    }
}

/// Place a star on a sphere of the given radius.
pub fn sphere_position(ra_hours: f64, dec_degrees: f64, radius: f64) -> Vector3<f64> {
    let (sin_ra, cos_ra) = angle::hours_to_radians(ra_hours).sin_cos();
    let (sin_dec, cos_dec) = dec_degrees.to_radians().sin_cos();
    Vector3::new(
        radius * cos_dec * cos_ra,
        radius * cos_dec * sin_ra,
        radius * sin_dec,
    )
}

/// RA (hours, `[0, 24)`) and Dec (degrees) of a point, from its direction only.
pub fn position_to_radec(p: &Vector3<f64>) -> Option<(f64, f64)> {
    let r = p.norm();
    if r <= 0.0 || !r.is_finite() {
        return None;
    }
    let dec = (p.z / r).clamp(-1.0, 1.0).asin().to_degrees();
    let ra = angle::wrap_hours(angle::radians_to_hours(p.y.atan2(p.x)));
    Some((ra, dec))
}

/// Point sprite size for a magnitude (brighter stars draw larger).
pub fn point_size(magnitude: f64) -> f64 {
    if magnitude < 0.0 {
        8.0
    } else if magnitude < 5.0 {
        7.0
    } else if magnitude < 10.0 {
        4.0
    } else if magnitude < 20.0 {
        2.0
    } else {
        1.0
    }
}

/// Perspective camera orbiting the celestial sphere.
#[derive(Debug, Clone)]
pub struct SphereCamera {
    config: SphereConfig,
    position: Vector3<f64>,
    fov_deg: f64,
}

impl SphereCamera {
    /// Camera on the +Z axis at the configured distance, looking at the origin.
    pub fn new(config: SphereConfig) -> Self {
        let config = config.normalized();
        let fov_deg = config
            .initial_fov_deg
            .clamp(config.min_fov_deg, config.max_fov_deg);
        let position = Vector3::new(0.0, 0.0, config.camera_distance);
        Self {
            config,
            position,
            fov_deg,
        }
    }

    pub fn config(&self) -> &SphereConfig {
        &self.config
    }

    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    /// Vertical field of view, in degrees.
    pub fn fov_deg(&self) -> f64 {
        self.fov_deg
    }

    /// Focal length in pixels for a surface of the given height.
    pub fn focal_length_px(&self, height: f64) -> f64 {
        (height / 2.0) / (self.fov_deg.to_radians() / 2.0).tan()
    }

    /// Camera longitude/latitude readout in degrees:
    /// `lon = atan2(x, z)`, `lat = asin(y / r)`.
    pub fn lon_lat_deg(&self) -> (f64, f64) {
        let p = self.position;
        let r = p.norm();
        let lat = (p.y / r).clamp(-1.0, 1.0).asin().to_degrees();
        let lon = p.x.atan2(p.z).to_degrees();
        (lon, lat)
    }

    /// Apply one wheel tick. Negative `delta_y` narrows the field of view.
    /// A zero delta is ignored. Returns `true` if the FOV changed.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        let before = self.fov_deg;
        if delta_y < 0.0 {
            self.fov_deg = (self.fov_deg * self.config.zoom_factor).max(self.config.min_fov_deg);
        } else if delta_y > 0.0 {
            self.fov_deg = (self.fov_deg / self.config.zoom_factor).min(self.config.max_fov_deg);
        }
        self.fov_deg != before
    }

    /// Orbit around the origin by the given longitude/latitude steps (degrees).
    pub fn orbit(&mut self, d_lon_deg: f64, d_lat_deg: f64) {
        if !d_lon_deg.is_finite() || !d_lat_deg.is_finite() {
            return;
        }
        let (lon, lat) = self.lon_lat_deg();
        let limit = self.config.max_orbit_lat_deg;
        self.set_orbit(lon + d_lon_deg, (lat + d_lat_deg).clamp(-limit, limit));
    }

    /// Place the camera at the given orbit longitude/latitude (degrees).
    pub fn set_orbit(&mut self, lon_deg: f64, lat_deg: f64) {
        let limit = self.config.max_orbit_lat_deg;
        let (sin_lon, cos_lon) = lon_deg.to_radians().sin_cos();
        let (sin_lat, cos_lat) = lat_deg.clamp(-limit, limit).to_radians().sin_cos();
        let r = self.config.camera_distance;
        self.position = Vector3::new(r * cos_lat * sin_lon, r * sin_lat, r * cos_lat * cos_lon);
    }

    /// Orthonormal camera axes `(right, up, forward)`.
    fn basis(&self) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        let forward = (-self.position).normalize();
        let world_up = Vector3::new(0.0, 1.0, 0.0);
        let right = forward.cross(&world_up).normalize();
        let up = right.cross(&forward);
        (right, up, forward)
    }

    /// Project a world point to screen pixels.
    ///
    /// Returns `None` if the point is on or behind the camera plane.
    pub fn project_point(&self, point: &Vector3<f64>, size: Dimensions) -> Option<(f64, f64)> {
        let (right, up, forward) = self.basis();
        let v = point - self.position;
        let depth = v.dot(&forward);
        if depth <= 1e-9 {
            return None;
        }
        let f = self.focal_length_px(size.height);
        let x = size.width / 2.0 + f * v.dot(&right) / depth;
        let y = size.height / 2.0 - f * v.dot(&up) / depth;
        Some((x, y))
    }

    /// Project a sky position (placed on the star sphere) to screen pixels.
    pub fn project_radec(
        &self,
        ra_hours: f64,
        dec_degrees: f64,
        size: Dimensions,
    ) -> Option<(f64, f64)> {
        self.project_point(
            &sphere_position(ra_hours, dec_degrees, self.config.radius),
            size,
        )
    }

    /// Sky position under a screen pixel.
    ///
    /// Casts a ray from the camera through the pixel and intersects it with
    /// the star sphere. Returns `None` if the ray misses the sphere (only
    /// possible when the camera is outside it).
    pub fn pick(&self, px: f64, py: f64, size: Dimensions) -> Option<(f64, f64)> {
        if !px.is_finite() || !py.is_finite() {
            return None;
        }
        let (right, up, forward) = self.basis();
        let f = self.focal_length_px(size.height);
        let dir = (forward + right * ((px - size.width / 2.0) / f)
            - up * ((py - size.height / 2.0) / f))
            .normalize();

        // |p + t·d|² = R², with |d| = 1
        let b = self.position.dot(&dir);
        let c = self.position.norm_squared() - self.config.radius * self.config.radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let t = -b + disc.sqrt();
        if t <= 0.0 {
            return None;
        }
        position_to_radec(&(self.position + dir * t))
    }
}

impl Default for SphereCamera {
    fn default() -> Self {
        Self::new(SphereConfig::default())
    }
}
