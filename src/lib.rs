//! # skymap
//!
//! An interactive **sky map engine**: a fixed star catalog, a nearest-star
//! query fast enough to run inside a pointer-click handler, and the two-way
//! mapping between catalog coordinates and a zoomable, pannable screen.
//!
//! ## Features
//!
//! - **Catalog store**: validated, immutable, ordered by right ascension, with
//!   [rkyv](https://docs.rs/rkyv) persistence for instant loading
//! - **Nearest-star query**: binary search on RA followed by a bounded
//!   `±window` scan, so click latency does not grow with the catalog
//! - **Planar map**: linear RA/Dec scales under a clamped zoom/pan transform,
//!   with forward projection for drawing and inverse projection for clicks
//! - **Sphere view**: stars on a celestial sphere seen by an orbiting
//!   perspective camera, with ray picking
//! - **Loaders** for SAO-style JSON and CSV catalogs
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use skymap::{catalogs, InteractionController, SkyMapConfig};
//!
//! let catalog = catalogs::load_sao_catalog_from_file("data/sao_catalog.json").unwrap();
//! catalog.save_to_file("data/sao_catalog.rkyv").unwrap();
//!
//! let mut map = InteractionController::new(
//!     Arc::new(catalog),
//!     800.0,
//!     600.0,
//!     SkyMapConfig::default(),
//! );
//!
//! // Zoom in around the pointer, then click
//! map.on_wheel(400.0, 300.0, -250.0);
//! let click = map.on_click(412.0, 288.0);
//! if let Some(q) = click.query_point {
//!     println!("RA {:.2} h, Dec {:.2}°", q.ra, q.dec);
//! }
//! if let Some(star) = map.last_click_star() {
//!     println!("Nearest star: {} (mag {:.2})", star.catalog_id, star.magnitude);
//! }
//! println!("{}", map.axis_labels().ra);
//! ```
//!
//! ## Coordinates
//!
//! Right ascension is handled in decimal hours `[0, 24)` and declination in
//! decimal degrees `[-90, 90]`. Distances used by the nearest-star query are
//! planar in that (hours, degrees) space, not great-circle separations.

pub mod angle;
/// Raw star catalogs: SAO-style JSON & CSV
pub mod catalogs;
pub mod controller;
pub mod error;
pub mod nearest;
pub mod projection;
pub mod render;
pub mod star;
pub mod starcatalog;

pub use controller::{ClickResult, InteractionController, QueryPoint, SkyMapConfig};
pub use error::{CatalogError, CatalogResult};
pub use nearest::{QueryConfig, StarMatch, DEFAULT_SEARCH_WINDOW};
pub use projection::{
    Dimensions, Margin, SkyDomain, SphereCamera, SphereConfig, Viewport, ViewportConfig,
    ZoomTransform,
};
pub use render::{AxisLabels, RenderedStar, SpherePoint};
pub use star::*;
pub use starcatalog::*;

/// Cartesian vector used for sphere placement and unit directions.
pub type Vector3 = nalgebra::Vector3<f64>;
