use crate::constants::{HOTSPOT_COLOR, HOTSPOT_OPACITY};
use crate::core::constants::HOTSPOT_DISK_SEGMENTS;
use crate::core::geometry;
use crate::core::hotspot::{place_catalog, Hotspot, PlacedHotspot};
use crate::render::{Attach, GpuState, Material, Pass};
use glam::Mat4;

/// Clickable hotspot disks riding on the hull.
///
/// Built once; the placed list is shared read-only with the pick handler.
pub struct Surface {
    hotspots: Vec<PlacedHotspot>,
}

impl Surface {
    pub fn new(gpu: &mut GpuState, catalog: &[Hotspot]) -> Self {
        let (hotspots, rejected) = place_catalog(catalog);
        for e in &rejected {
            log::warn!("[surface] skipping hotspot: {}", e);
        }

        let material = Material {
            color: HOTSPOT_COLOR,
            opacity: HOTSPOT_OPACITY,
            shininess: 0.0,
            lit: false,
            texture: None,
        };
        for h in &hotspots {
            let mesh = geometry::disk(h.radius, HOTSPOT_DISK_SEGMENTS);
            let local = Mat4::from_rotation_translation(h.orientation, h.position);
            gpu.add_mesh(
                h.name(),
                &mesh,
                material,
                Pass::TranslucentDoubleSided,
                Attach::Hull,
                local,
            );
        }

        log::info!(
            "[surface] placed {} hotspots ({} rejected)",
            hotspots.len(),
            rejected.len()
        );
        Self { hotspots }
    }

    /// Every placed hotspot with its originating record.
    pub fn hotspots(&self) -> &[PlacedHotspot] {
        &self.hotspots
    }
}
