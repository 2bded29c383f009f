// Ray picking against the hotspot disks.
//
// Only hotspots are candidates; the hull and overlays never block a pick.

use super::hotspot::PlacedHotspot;
use glam::{Quat, Vec2, Vec3};

/// Something that can open a link in a new browsing context.
pub trait Navigator {
    fn open(&self, url: &str);
}

/// Convert viewport pointer coordinates to NDC relative to a bounding rect.
///
/// `rect` is `(left, top, width, height)` in CSS pixels. A degenerate rect
/// maps everything to the center.
#[inline]
pub fn pointer_to_ndc(client: Vec2, rect: (f32, f32, f32, f32)) -> Vec2 {
    let (left, top, width, height) = rect;
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        ((client.x - left) / width) * 2.0 - 1.0,
        -((client.y - top) / height) * 2.0 + 1.0,
    )
}

/// Distance along the ray to a disk, hitting either face.
#[inline]
pub fn ray_disk(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    normal: Vec3,
    radius: f32,
) -> Option<f32> {
    let denom = normal.dot(ray_dir);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (center - ray_origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    let hit = ray_origin + ray_dir * t;
    (hit.distance_squared(center) <= radius * radius).then_some(t)
}

#[derive(Clone, Copy, Debug)]
pub struct PickHit<'a> {
    pub hotspot: &'a PlacedHotspot,
    pub distance: f32,
}

/// Nearest hotspot under the ray, with hotspots rotated along with the hull.
pub fn pick_nearest<'a>(
    ray_origin: Vec3,
    ray_dir: Vec3,
    hotspots: &'a [PlacedHotspot],
    hull_rotation: Quat,
) -> Option<PickHit<'a>> {
    let mut best: Option<PickHit<'a>> = None;
    for h in hotspots {
        let center = hull_rotation * h.position;
        let normal = hull_rotation * h.normal;
        if let Some(t) = ray_disk(ray_origin, ray_dir, center, normal, h.radius) {
            match best {
                Some(b) if t >= b.distance => {}
                _ => {
                    best = Some(PickHit {
                        hotspot: h,
                        distance: t,
                    })
                }
            }
        }
    }
    best
}

/// Open the link of the nearest interactive hotspot under the ray.
///
/// Returns the opened URL; a miss or a record without a link does nothing.
pub fn dispatch_pick<'a>(
    ray_origin: Vec3,
    ray_dir: Vec3,
    hotspots: &'a [PlacedHotspot],
    hull_rotation: Quat,
    navigator: &dyn Navigator,
) -> Option<&'a str> {
    let hit = pick_nearest(ray_origin, ray_dir, hotspots, hull_rotation)?;
    if !hit.hotspot.interactive {
        return None;
    }
    let url = hit.hotspot.link()?;
    navigator.open(url);
    Some(url)
}
