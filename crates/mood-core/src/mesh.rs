//! Primary-mesh geometry, one kind per mood.
//!
//! Generates indexed vertex/normal buffers the GPU backend uploads
//! directly. Polyhedra are subdivided and projected onto their
//! circumsphere; the quality tier picks the detail level.

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshKind {
    Sphere,
    Torus,
    Icosahedron,
    Dodecahedron,
    Octahedron,
    Plane,
}

/// Vertex layout of the mesh pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

const RADIUS: f32 = 1.5;

/// Build the geometry for a mesh kind. `high_detail` is driven by the
/// quality tier: more segments and one extra subdivision level.
pub fn generate(kind: MeshKind, high_detail: bool) -> MeshData {
    match kind {
        MeshKind::Sphere => uv_sphere(RADIUS, if high_detail { 32 } else { 16 }),
        MeshKind::Torus => torus(
            RADIUS,
            0.4,
            if high_detail { 16 } else { 8 },
            if high_detail { 100 } else { 50 },
        ),
        MeshKind::Icosahedron => polyhedron(
            &ICOSAHEDRON_VERTICES,
            &ICOSAHEDRON_INDICES,
            if high_detail { 2 } else { 1 },
        ),
        MeshKind::Dodecahedron => polyhedron(
            &DODECAHEDRON_VERTICES,
            &DODECAHEDRON_INDICES,
            if high_detail { 1 } else { 0 },
        ),
        MeshKind::Octahedron => polyhedron(
            &OCTAHEDRON_VERTICES,
            &OCTAHEDRON_INDICES,
            if high_detail { 1 } else { 0 },
        ),
        MeshKind::Plane => plane(3.0),
    }
}

fn uv_sphere(radius: f32, segments: u32) -> MeshData {
    let mut data = MeshData::default();
    for lat in 0..=segments {
        let phi = std::f32::consts::PI * lat as f32 / segments as f32;
        for lon in 0..=segments {
            let theta = std::f32::consts::TAU * lon as f32 / segments as f32;
            let normal = Vec3::new(
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            );
            data.vertices.push(MeshVertex {
                position: (normal * radius).to_array(),
                normal: normal.to_array(),
            });
        }
    }
    let stride = segments + 1;
    for lat in 0..segments {
        for lon in 0..segments {
            let a = lat * stride + lon;
            let b = a + stride;
            data.indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    data
}

fn torus(major: f32, minor: f32, radial: u32, tubular: u32) -> MeshData {
    let mut data = MeshData::default();
    for j in 0..=radial {
        let v = std::f32::consts::TAU * j as f32 / radial as f32;
        for i in 0..=tubular {
            let u = std::f32::consts::TAU * i as f32 / tubular as f32;
            let center = Vec3::new(major * u.cos(), major * u.sin(), 0.0);
            let position = Vec3::new(
                (major + minor * v.cos()) * u.cos(),
                (major + minor * v.cos()) * u.sin(),
                minor * v.sin(),
            );
            let normal = (position - center).normalize_or_zero();
            data.vertices.push(MeshVertex {
                position: position.to_array(),
                normal: normal.to_array(),
            });
        }
    }
    let stride = tubular + 1;
    for j in 0..radial {
        for i in 0..tubular {
            let a = j * stride + i;
            let b = a + stride;
            data.indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    data
}

fn plane(size: f32) -> MeshData {
    let h = size / 2.0;
    let normal = [0.0, 0.0, 1.0];
    MeshData {
        vertices: vec![
            MeshVertex { position: [-h, -h, 0.0], normal },
            MeshVertex { position: [h, -h, 0.0], normal },
            MeshVertex { position: [h, h, 0.0], normal },
            MeshVertex { position: [-h, h, 0.0], normal },
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Subdivide a convex polyhedron and project every vertex onto the
/// circumsphere. Emits a triangle soup with smooth (radial) normals.
fn polyhedron(vertices: &[[f32; 3]], indices: &[u32], detail: u32) -> MeshData {
    let mut data = MeshData::default();
    for tri in indices.chunks_exact(3) {
        let a = Vec3::from(vertices[tri[0] as usize]);
        let b = Vec3::from(vertices[tri[1] as usize]);
        let c = Vec3::from(vertices[tri[2] as usize]);
        subdivide(a, b, c, detail, &mut data);
    }
    data
}

fn subdivide(a: Vec3, b: Vec3, c: Vec3, detail: u32, out: &mut MeshData) {
    if detail == 0 {
        for v in [a, b, c] {
            let normal = v.normalize_or_zero();
            out.indices.push(out.vertices.len() as u32);
            out.vertices.push(MeshVertex {
                position: (normal * RADIUS).to_array(),
                normal: normal.to_array(),
            });
        }
        return;
    }
    let ab = (a + b) / 2.0;
    let bc = (b + c) / 2.0;
    let ca = (c + a) / 2.0;
    subdivide(a, ab, ca, detail - 1, out);
    subdivide(ab, b, bc, detail - 1, out);
    subdivide(ca, bc, c, detail - 1, out);
    subdivide(ab, bc, ca, detail - 1, out);
}

// Golden ratio and its inverse, shared by the platonic solids below.
const T: f32 = 1.618_034;
const R: f32 = 0.618_034;

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0, T, 0.0],
    [1.0, T, 0.0],
    [-1.0, -T, 0.0],
    [1.0, -T, 0.0],
    [0.0, -1.0, T],
    [0.0, 1.0, T],
    [0.0, -1.0, -T],
    [0.0, 1.0, -T],
    [T, 0.0, -1.0],
    [T, 0.0, 1.0],
    [-T, 0.0, -1.0],
    [-T, 0.0, 1.0],
];

const ICOSAHEDRON_INDICES: [u32; 60] = [
    0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, //
    1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8, //
    3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, //
    4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
];

const DODECAHEDRON_VERTICES: [[f32; 3]; 20] = [
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [0.0, -R, -T],
    [0.0, -R, T],
    [0.0, R, -T],
    [0.0, R, T],
    [-R, -T, 0.0],
    [-R, T, 0.0],
    [R, -T, 0.0],
    [R, T, 0.0],
    [-T, 0.0, -R],
    [T, 0.0, -R],
    [-T, 0.0, R],
    [T, 0.0, R],
];

const DODECAHEDRON_INDICES: [u32; 108] = [
    3, 11, 7, 3, 7, 15, 3, 15, 13, //
    7, 19, 17, 7, 17, 6, 7, 6, 15, //
    17, 4, 8, 17, 8, 10, 17, 10, 6, //
    8, 0, 16, 8, 16, 2, 8, 2, 10, //
    0, 12, 1, 0, 1, 18, 0, 18, 16, //
    6, 10, 2, 6, 2, 13, 6, 13, 15, //
    2, 16, 18, 2, 18, 3, 2, 3, 13, //
    18, 1, 9, 18, 9, 11, 18, 11, 3, //
    4, 14, 12, 4, 12, 0, 4, 0, 8, //
    11, 9, 5, 11, 5, 19, 11, 19, 7, //
    19, 5, 14, 19, 14, 4, 19, 4, 17, //
    1, 12, 14, 1, 14, 5, 1, 5, 9,
];

const OCTAHEDRON_VERTICES: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

const OCTAHEDRON_INDICES: [u32; 24] = [
    0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2, //
    1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
];
