//! Integration tests for the planar viewport, the sphere view and the
//! interaction controller.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skymap::render::project_catalog_sphere;
use skymap::{
    Dimensions, InteractionController, QueryConfig, SkyDomain, SkyMapConfig, SphereCamera,
    StarCatalog, Viewport, ViewportConfig,
};

use test_data::{random_catalog, star_at};

const EPS: f64 = 1e-9;

/// Drive a viewport through a random sequence of zooms and pans.
fn scramble(viewport: &mut Viewport, rng: &mut StdRng, steps: usize) {
    let inner = viewport.inner_size();
    for _ in 0..steps {
        let px = rng.random_range(0.0..=inner.width);
        let py = rng.random_range(0.0..=inner.height);
        if rng.random_bool(0.5) {
            viewport.zoom_by_wheel(px, py, rng.random_range(-400.0..400.0));
        } else {
            viewport.pan_by(
                rng.random_range(-2000.0..2000.0),
                rng.random_range(-2000.0..2000.0),
            );
        }
    }
}

fn within_full_sky(domain: &SkyDomain) -> bool {
    domain.ra_range[0] >= -EPS
        && domain.ra_range[1] <= 24.0 + EPS
        && domain.dec_range[0] >= -90.0 - EPS
        && domain.dec_range[1] <= 90.0 + EPS
        && domain.ra_range[0] <= domain.ra_range[1]
        && domain.dec_range[0] <= domain.dec_range[1]
}

#[test]
fn test_top_left_pixel_is_ra_min_dec_max() {
    let viewport = Viewport::new(800.0, 600.0, ViewportConfig::default());
    let (ra, dec) = viewport.unproject(0.0, 0.0).unwrap();
    assert!(ra.abs() < EPS);
    assert!((dec - 90.0).abs() < EPS);
}

/// Forward then inverse projection returns the starting coordinates.
#[test]
fn test_project_unproject_identity() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..50 {
        let mut viewport = Viewport::new(
            rng.random_range(200.0..1600.0),
            rng.random_range(200.0..1200.0),
            ViewportConfig::default(),
        );
        scramble(&mut viewport, &mut rng, 20);
        let domain = viewport.domain();
        for _ in 0..50 {
            let fx: f64 = rng.random_range(0.01..0.99);
            let fy: f64 = rng.random_range(0.01..0.99);
            let ra = domain.ra_range[0] + fx * (domain.ra_range[1] - domain.ra_range[0]);
            let dec = domain.dec_range[0] + fy * (domain.dec_range[1] - domain.dec_range[0]);
            let (px, py) = viewport.project(ra, dec);
            let (ra2, dec2) = viewport.unproject(px, py).unwrap();
            assert!((ra - ra2).abs() < EPS, "ra {} vs {}", ra, ra2);
            assert!((dec - dec2).abs() < EPS, "dec {} vs {}", dec, dec2);
        }
    }
}

/// No sequence of gestures shows sky outside `[0, 24] × [-90, 90]`.
#[test]
fn test_pan_clamp_keeps_full_sky_bounds() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut viewport = Viewport::new(1024.0, 768.0, ViewportConfig::default());
    for _ in 0..1000 {
        scramble(&mut viewport, &mut rng, 1);
        assert!(within_full_sky(&viewport.domain()), "{:?}", viewport.domain());
        let t = viewport.transform();
        assert!(t.k >= 1.0 && t.k <= 10.0);
    }
}

/// The sky point under the pointer stays under the pointer while zooming in.
#[test]
fn test_zoom_anchor_fixpoint() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut viewport = Viewport::new(900.0, 700.0, ViewportConfig::default());
    let inner = viewport.inner_size();
    for _ in 0..500 {
        if viewport.transform().k > 9.0 {
            viewport.reset();
        }
        let px = rng.random_range(0.0..=inner.width);
        let py = rng.random_range(0.0..=inner.height);
        let factor = rng.random_range(1.0..1.1);
        let (ra, dec) = viewport.unproject_unchecked(px, py);
        viewport.zoom_at(px, py, factor);
        let (qx, qy) = viewport.project(ra, dec);
        assert!((qx - px).abs() < 1e-6, "x {} vs {}", qx, px);
        assert!((qy - py).abs() < 1e-6, "y {} vs {}", qy, py);
        if rng.random_bool(0.3) {
            viewport.pan_by(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0));
        }
    }
}

/// Clicks outside the plotting rectangle never match a star.
#[test]
fn test_click_outside_plot_is_miss() {
    let catalog = Arc::new(random_catalog(3000, 5));
    let mut controller =
        InteractionController::new(catalog, 800.0, 600.0, SkyMapConfig::default());
    let inner = controller.viewport().inner_size();
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..200 {
        let px = match rng.random_range(0..3) {
            0 => -rng.random_range(0.001..500.0),
            1 => inner.width + rng.random_range(0.001..500.0),
            _ => rng.random_range(0.0..=inner.width),
        };
        let py = if px >= 0.0 && px <= inner.width {
            if rng.random_bool(0.5) {
                -rng.random_range(0.001..500.0)
            } else {
                inner.height + rng.random_range(0.001..500.0)
            }
        } else {
            rng.random_range(-500.0..inner.height + 500.0)
        };
        let click = controller.on_click(px, py);
        assert!(click.is_miss(), "({}, {}) should miss", px, py);
        assert!(click.query_point.is_none());
        if rng.random_bool(0.2) {
            controller.on_wheel(400.0, 300.0, rng.random_range(-300.0..300.0));
        }
    }
}

#[test]
fn test_controller_click_finds_rendered_star() {
    let _ = tracing_subscriber::fmt().with_env_filter("debug").try_init();

    let catalog = Arc::new(
        StarCatalog::new(vec![
            star_at(1, 2.0, 30.0, 1.0),
            star_at(2, 8.0, -20.0, 3.0),
            star_at(3, 16.0, 45.0, 6.0),
        ])
        .unwrap(),
    );
    let mut controller = InteractionController::new(
        catalog,
        800.0,
        600.0,
        SkyMapConfig {
            query: QueryConfig { window: 10 },
            ..Default::default()
        },
    );

    controller.on_wheel(200.0, 200.0, -600.0);
    let rendered = controller.render();
    let target = rendered.iter().find(|s| s.index == 1).unwrap();
    let (x, y) = (target.x, target.y);
    assert!(target.visible);

    let click = *controller.on_click(x + 0.5, y - 0.5);
    let q = click.query_point.unwrap();
    assert!((q.ra - 8.0).abs() < 0.05);
    assert!((q.dec + 20.0).abs() < 0.5);
    assert_eq!(controller.last_click_star().unwrap().catalog_id, 2);
    assert!(controller.axis_labels().dec.starts_with("Dec (degrees): "));
}

#[test]
fn test_resize_between_zoom_and_click() {
    let catalog = Arc::new(random_catalog(500, 8));
    let mut controller =
        InteractionController::new(catalog, 1200.0, 900.0, SkyMapConfig::default());
    controller.on_wheel(600.0, 400.0, -800.0);
    controller.on_resize(640.0, 480.0);

    assert_eq!(controller.dimensions(), Dimensions::new(640.0, 480.0));
    assert!(within_full_sky(&controller.domain()));

    let inner = controller.viewport().inner_size();
    let click = *controller.on_click(inner.width / 2.0, inner.height / 2.0);
    assert!(!click.is_miss());
    let (ra, dec) = controller
        .viewport()
        .unproject(inner.width / 2.0, inner.height / 2.0)
        .unwrap();
    assert!(controller.domain().contains(ra, dec));
}

#[test]
fn test_sphere_pick_resolves_visible_star() {
    let catalog = StarCatalog::new(vec![
        star_at(1, 1.0, -60.0, 2.0),
        star_at(2, 7.0, -35.0, 4.0),
        star_at(3, 13.0, -70.0, 0.5),
        star_at(4, 19.0, 60.0, 1.0),
    ])
    .unwrap();
    let size = Dimensions::new(1024.0, 768.0);
    let camera = SphereCamera::default();

    let points = project_catalog_sphere(&catalog, &camera, size);
    // camera on +Z looks toward the south celestial pole
    assert!(points.iter().all(|p| catalog.at(p.index).unwrap().catalog_id != 4));

    for p in &points {
        if p.x < 0.0 || p.x > size.width || p.y < 0.0 || p.y > size.height {
            continue;
        }
        let (ra, dec) = camera.pick(p.x, p.y, size).unwrap();
        let star = catalog
            .find_nearest(ra, dec, &QueryConfig::default())
            .unwrap();
        assert_eq!(star.catalog_id, catalog.at(p.index).unwrap().catalog_id);
    }
}
