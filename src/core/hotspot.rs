// Hotspot catalog and placement on the hull.
//
// Hotspots are authored in geographic-style coordinates (latitude from the
// equator, longitude from the reference meridian) so they can be lined up
// with the equirectangular SVG texture. Placement turns them into
// sphere-local positions plus an orientation whose +Z axis faces outward.

use super::constants::{DEFAULT_HOTSPOT_SIZE, PICK_RADIUS};
use glam::{Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hotspot {
    pub name: &'static str,
    pub url: Option<&'static str>,
    pub latitude: f32,
    pub longitude: f32,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HotspotError {
    #[error("hotspot {name:?}: latitude {latitude} outside [-90, 90]")]
    Latitude { name: &'static str, latitude: f32 },
    #[error("hotspot {name:?}: longitude {longitude} outside [0, 360)")]
    Longitude { name: &'static str, longitude: f32 },
}

impl Hotspot {
    /// Disk radius, falling back to the default for missing or bogus sizes.
    pub fn radius(&self) -> f32 {
        if self.size.is_finite() && self.size > 0.0 {
            self.size
        } else {
            DEFAULT_HOTSPOT_SIZE
        }
    }

    pub fn validate(&self) -> Result<(), HotspotError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(HotspotError::Latitude {
                name: self.name,
                latitude: self.latitude,
            });
        }
        if !(0.0..360.0).contains(&self.longitude) {
            return Err(HotspotError::Longitude {
                name: self.name,
                longitude: self.longitude,
            });
        }
        Ok(())
    }
}

/// The four regions painted on the hull texture.
pub const CATALOG: [Hotspot; 4] = [
    Hotspot {
        name: "The Stack",
        url: Some("https://github.com/planet-nine-app/planet-nine/blob/main/The%20Stack.md"),
        latitude: 43.0,
        longitude: 185.0,
        size: 0.6,
    },
    Hotspot {
        name: "allyabase",
        url: Some("https://github.com/planet-nine-app/allyabase"),
        latitude: 43.0,
        longitude: 95.0,
        size: 0.7,
    },
    Hotspot {
        name: "The Advancement",
        url: Some("https://github.com/planet-nine-app/the-advancement"),
        latitude: -22.0,
        longitude: 185.0,
        size: 0.6,
    },
    Hotspot {
        name: "The Nullary",
        url: Some("https://github.com/planet-nine-app/the-nullary"),
        latitude: -22.0,
        longitude: 95.0,
        size: 0.7,
    },
];

/// Sphere-local position for a latitude/longitude pair (degrees).
#[inline]
pub fn lat_lon_to_position(latitude: f32, longitude: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - latitude).to_radians();
    let theta = longitude.to_radians();
    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        -radius * phi.sin() * theta.sin(),
    )
}

#[derive(Clone, Debug)]
pub struct PlacedHotspot {
    pub data: Hotspot,
    pub position: Vec3,
    pub normal: Vec3,
    /// Rotates the disk's +Z face onto `normal`.
    pub orientation: Quat,
    pub radius: f32,
    pub interactive: bool,
}

impl PlacedHotspot {
    pub fn name(&self) -> &'static str {
        self.data.name
    }

    /// Link to open on pick, if the record carries a usable one.
    pub fn link(&self) -> Option<&'static str> {
        self.data.url.filter(|u| !u.trim().is_empty())
    }
}

pub fn place_hotspot(hotspot: Hotspot, radius: f32) -> Result<PlacedHotspot, HotspotError> {
    hotspot.validate()?;
    let position = lat_lon_to_position(hotspot.latitude, hotspot.longitude, radius);
    // only a zero radius has no direction
    let normal = position.try_normalize().unwrap_or(Vec3::Z);
    Ok(PlacedHotspot {
        data: hotspot,
        position,
        normal,
        orientation: Quat::from_rotation_arc(Vec3::Z, normal),
        radius: hotspot.radius(),
        interactive: true,
    })
}

/// Place every valid entry at the pick radius; invalid entries come back as errors.
pub fn place_catalog(catalog: &[Hotspot]) -> (Vec<PlacedHotspot>, Vec<HotspotError>) {
    let mut placed = Vec::with_capacity(catalog.len());
    let mut rejected = Vec::new();
    for h in catalog {
        match place_hotspot(*h, PICK_RADIUS) {
            Ok(p) => placed.push(p),
            Err(e) => rejected.push(e),
        }
    }
    (placed, rejected)
}
