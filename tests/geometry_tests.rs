// Host-side tests for mesh builders and shared constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod hull {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod geometry {
        include!("../src/core/geometry.rs");
    }
}

use glam::Vec3;
use hull::constants::*;
use hull::geometry::*;
use std::f32::consts::PI;

fn face_normal(mesh: &MeshData, tri: &[u32]) -> Vec3 {
    let p = |i: u32| Vec3::from(mesh.vertices[i as usize].position);
    let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
    (b - a).cross(c - a)
}

#[test]
fn sphere_vertices_lie_on_radius() {
    let mesh = uv_sphere(SPHERE_RADIUS, 16, 8);
    assert_eq!(mesh.vertices.len(), 17 * 9);
    for v in &mesh.vertices {
        let p = Vec3::from(v.position);
        assert!((p.length() - SPHERE_RADIUS).abs() < 1e-4);
        assert!(p.normalize().distance(Vec3::from(v.normal)) < 1e-4);
        assert!((0.0..=1.0).contains(&v.uv[1]));
    }
}

#[test]
fn sphere_faces_point_outward() {
    let mesh = uv_sphere(SPHERE_RADIUS, 12, 6);
    assert_eq!(mesh.indices.len() % 3, 0);
    for tri in mesh.indices.chunks(3) {
        let centroid = tri
            .iter()
            .map(|&i| Vec3::from(mesh.vertices[i as usize].position))
            .sum::<Vec3>()
            / 3.0;
        assert!(face_normal(&mesh, tri).dot(centroid) > 0.0);
    }
    // poles get a single triangle per segment
    assert_eq!(mesh.indices.len(), 3 * (12 * 2 * (6 - 1)));
}

#[test]
fn hemisphere_covers_half_the_longitudes() {
    let mesh = sphere(OVERLAY_RADIUS, OVERLAY_SEGMENTS, OVERLAY_SEGMENTS, 0.0, PI);
    for v in &mesh.vertices {
        // phi in [0, PI] keeps z = r sin(phi) sin(theta) non-negative
        assert!(v.position[2] >= -1e-4);
    }
}

#[test]
fn uv_origin_is_top_left() {
    let mesh = uv_sphere(1.0, 8, 4);
    let top = &mesh.vertices[0];
    assert!(top.position[1] > 0.99);
    assert_eq!(top.uv[1], 0.0);
    let plane = plane(TEXT_PLANE_SIZE, TEXT_PLANE_SIZE);
    let tl = plane.vertices[0];
    assert_eq!(tl.uv, [0.0, 0.0]);
    assert!(tl.position[0] < 0.0 && tl.position[1] > 0.0);
}

#[test]
fn plane_and_disk_face_positive_z() {
    let plane = plane(2.0, 1.0);
    assert_eq!(plane.indices.len(), 6);
    for tri in plane.indices.chunks(3) {
        assert!(face_normal(&plane, tri).z > 0.0);
    }
    let disk = disk(0.7, HOTSPOT_DISK_SEGMENTS);
    assert_eq!(disk.vertices.len() as u32, HOTSPOT_DISK_SEGMENTS + 2);
    assert_eq!(disk.indices.len() as u32, HOTSPOT_DISK_SEGMENTS * 3);
    for tri in disk.indices.chunks(3) {
        assert!(face_normal(&disk, tri).z > 0.0);
    }
    for v in &disk.vertices[1..] {
        assert!((Vec3::from(v.position).length() - 0.7).abs() < 1e-5);
    }
}

#[test]
fn layers_stack_outward_from_the_hull() {
    assert!(SPHERE_RADIUS < OVERLAY_RADIUS);
    assert!(OVERLAY_RADIUS < PICK_RADIUS);
    assert!(PICK_RADIUS < TEXT_PLANE_Z);
    assert!(MIN_CAMERA_DISTANCE <= CAMERA_START_Z && CAMERA_START_Z <= MAX_CAMERA_DISTANCE);
    assert!(ROTATION_BLEND > 0.0 && ROTATION_BLEND <= 1.0);
}
