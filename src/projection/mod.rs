//! Mapping between catalog sky coordinates and screen space.
//!
//! Two renderer bindings are provided; they are alternatives, not layers:
//!
//! - [`viewport`]: **planar** map. RA runs linearly along X, Dec along Y,
//!   with a clamped zoom/pan transform on top. This is the binding the
//!   [`InteractionController`](crate::InteractionController) drives, and the
//!   one clicks are resolved against.
//! - [`sphere`]: **spherical** view. Stars sit on a sphere and a perspective
//!   camera orbits it; zoom is the field of view.
//!
//! [`scale`] holds the linear scales both axes use, and [`graticule`] the
//! grid-line geometry.

pub mod graticule;
pub mod scale;
pub mod sphere;
pub mod viewport;

pub use scale::LinearScale;
pub use sphere::{point_size, sphere_position, SphereCamera, SphereConfig};
pub use viewport::{Dimensions, Margin, SkyDomain, Viewport, ViewportConfig, ZoomTransform};
