// Host-side tests for hotspot placement.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod hull {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod hotspot {
        include!("../src/core/hotspot.rs");
    }
}

use hull::constants::*;
use hull::hotspot::*;
use glam::Vec3;

const EPS: f32 = 1e-4;

fn spot(latitude: f32, longitude: f32) -> Hotspot {
    Hotspot {
        name: "test",
        url: Some("https://example.com"),
        latitude,
        longitude,
        size: 0.6,
    }
}

#[test]
fn allyabase_lands_on_pick_radius() {
    let h = Hotspot {
        name: "allyabase",
        url: None,
        latitude: 43.0,
        longitude: 95.0,
        size: 0.7,
    };
    let placed = place_hotspot(h, PICK_RADIUS).unwrap();
    assert!((placed.position.length() - 2.02).abs() < EPS);
    assert!((placed.radius - 0.7).abs() < EPS);
}

#[test]
fn every_catalog_entry_sits_at_pick_radius_facing_out() {
    let (placed, rejected) = place_catalog(&CATALOG);
    assert!(rejected.is_empty());
    assert_eq!(placed.len(), CATALOG.len());
    for p in &placed {
        assert!((p.position.length() - PICK_RADIUS).abs() < EPS, "{}", p.name());
        assert!(p.normal.dot(p.position) > 0.0, "{} faces inward", p.name());
        assert!((p.normal.length() - 1.0).abs() < EPS);
        assert!(p.interactive);
        assert!(p.link().is_some());
    }
}

#[test]
fn orientation_turns_disk_face_outward() {
    for (lat, lon) in [(43.0, 185.0), (-22.0, 95.0), (0.0, 0.0), (90.0, 10.0), (-90.0, 0.0)] {
        let p = place_hotspot(spot(lat, lon), PICK_RADIUS).unwrap();
        let face = p.orientation * Vec3::Z;
        assert!(face.distance(p.normal) < 1e-3, "lat {lat} lon {lon}");
    }
}

#[test]
fn whole_globe_grid_keeps_radius_and_outward_face() {
    // 5 degree steps, both poles included, longitude 360 excluded
    for lat_step in 0..=36 {
        let lat = -90.0 + lat_step as f32 * 5.0;
        for lon_step in 0..72 {
            let lon = lon_step as f32 * 5.0;
            let p = place_hotspot(spot(lat, lon), PICK_RADIUS).unwrap();
            assert!(
                (p.position.length() - PICK_RADIUS).abs() < EPS,
                "lat {lat} lon {lon} at distance {}",
                p.position.length()
            );
            assert!((p.normal.length() - 1.0).abs() < EPS, "lat {lat} lon {lon}");
            assert!(p.normal.dot(p.position) > 0.0, "lat {lat} lon {lon} faces inward");
            let face = p.orientation * Vec3::Z;
            assert!(face.distance(p.normal) < 1e-3, "lat {lat} lon {lon} disk tilted");
        }
    }
    assert!(place_hotspot(spot(0.0, 360.0), PICK_RADIUS).is_err());
}

#[test]
fn poles_and_equator_match_expected_axes() {
    let north = lat_lon_to_position(90.0, 0.0, 2.0);
    assert!(north.distance(Vec3::new(0.0, 2.0, 0.0)) < EPS);

    let south = lat_lon_to_position(-90.0, 0.0, 2.0);
    assert!(south.distance(Vec3::new(0.0, -2.0, 0.0)) < EPS);

    let meridian = lat_lon_to_position(0.0, 0.0, 2.0);
    assert!(meridian.distance(Vec3::new(-2.0, 0.0, 0.0)) < EPS);

    let quarter = lat_lon_to_position(0.0, 90.0, 2.0);
    assert!(quarter.distance(Vec3::new(0.0, 0.0, -2.0)) < EPS);
}

#[test]
fn out_of_range_coordinates_are_rejected() {
    assert!(matches!(
        spot(91.0, 10.0).validate(),
        Err(HotspotError::Latitude { .. })
    ));
    assert!(matches!(
        spot(10.0, 360.0).validate(),
        Err(HotspotError::Longitude { .. })
    ));
    assert!(matches!(
        spot(f32::NAN, 10.0).validate(),
        Err(HotspotError::Latitude { .. })
    ));
    assert!(spot(-90.0, 0.0).validate().is_ok());
}

#[test]
fn catalog_placement_skips_bad_entries() {
    let catalog = [spot(10.0, 10.0), spot(120.0, 10.0), spot(-10.0, 200.0)];
    let (placed, rejected) = place_catalog(&catalog);
    assert_eq!(placed.len(), 2);
    assert_eq!(rejected.len(), 1);
    assert!(rejected[0].to_string().contains("latitude"));
}

#[test]
fn missing_size_falls_back_to_default() {
    let mut h = spot(0.0, 0.0);
    h.size = 0.0;
    assert_eq!(h.radius(), DEFAULT_HOTSPOT_SIZE);
    h.size = f32::NAN;
    assert_eq!(h.radius(), DEFAULT_HOTSPOT_SIZE);
}

#[test]
fn blank_url_is_not_a_link() {
    let mut h = spot(0.0, 0.0);
    h.url = Some("  ");
    let p = place_hotspot(h, PICK_RADIUS).unwrap();
    assert_eq!(p.link(), None);
}
