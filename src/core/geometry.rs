// Mesh builders for the hull, its overlays and the hotspot disks.
//
// Triangles wind counter-clockwise seen from the front face. Texture
// coordinates use a top-left origin (v grows downward), matching how
// canvas pixels are uploaded.

use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// UV sphere, optionally limited to a longitude span.
///
/// Longitude runs from `phi_start` over `phi_length`; the full latitude range
/// is always covered. The seam column is duplicated so `u` reaches 1.0.
pub fn sphere(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
    phi_start: f32,
    phi_length: f32,
) -> MeshData {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let mut mesh = MeshData::default();
    let mut grid = Vec::with_capacity(h as usize + 1);
    let mut index = 0u32;

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        // nudge pole texels to the middle of their segment
        let u_offset = if iy == 0 {
            0.5 / w as f32
        } else if iy == h {
            -0.5 / w as f32
        } else {
            0.0
        };
        let theta = v * PI;
        let mut row = Vec::with_capacity(w as usize + 1);
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let phi = phi_start + u * phi_length;
            let pos = [
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            ];
            let len = (pos[0] * pos[0] + pos[1] * pos[1] + pos[2] * pos[2]).sqrt();
            let normal = if len > 0.0 {
                [pos[0] / len, pos[1] / len, pos[2] / len]
            } else {
                [0.0, 1.0, 0.0]
            };
            mesh.vertices.push(Vertex {
                position: pos,
                normal,
                uv: [u + u_offset, v],
            });
            row.push(index);
            index += 1;
        }
        grid.push(row);
    }

    for iy in 0..h as usize {
        for ix in 0..w as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h as usize - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Full sphere.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    sphere(radius, width_segments, height_segments, 0.0, TAU)
}

/// Single-quad plane in XY facing +Z, centered on the origin.
pub fn plane(width: f32, height: f32) -> MeshData {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let n = [0.0, 0.0, 1.0];
    let vertices = vec![
        Vertex { position: [-hw, hh, 0.0], normal: n, uv: [0.0, 0.0] },
        Vertex { position: [hw, hh, 0.0], normal: n, uv: [1.0, 0.0] },
        Vertex { position: [-hw, -hh, 0.0], normal: n, uv: [0.0, 1.0] },
        Vertex { position: [hw, -hh, 0.0], normal: n, uv: [1.0, 1.0] },
    ];
    MeshData {
        vertices,
        indices: vec![0, 2, 1, 2, 3, 1],
    }
}

/// Triangle-fan disk in XY facing +Z.
pub fn disk(radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let n = [0.0, 0.0, 1.0];
    let mut mesh = MeshData::default();
    mesh.vertices.push(Vertex {
        position: [0.0, 0.0, 0.0],
        normal: n,
        uv: [0.5, 0.5],
    });
    for s in 0..=segments {
        let a = s as f32 / segments as f32 * TAU;
        let (sin, cos) = a.sin_cos();
        mesh.vertices.push(Vertex {
            position: [radius * cos, radius * sin, 0.0],
            normal: n,
            uv: [(cos + 1.0) * 0.5, (1.0 - sin) * 0.5],
        });
    }
    for i in 1..=segments {
        mesh.indices.extend_from_slice(&[i, i + 1, 0]);
    }
    mesh
}
