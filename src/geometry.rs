//! Procedural meshes for every entity shape.
//!
//! Meshes are built once when a scene is prepared for display and never
//! touched again; animation only changes the model transform.

use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use glam::{vec3, Vec3};

#[derive(Debug, Copy, Clone, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Icosahedron {
        radius: f32,
        detail: u32,
    },
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.
}

impl Shape {
    pub const fn sphere(radius: f32) -> Self {
        Shape::Sphere {
            radius,
            width_segments: 64,
            height_segments: 64,
        }
    }

    pub const fn torus(radius: f32, tube: f32) -> Self {
        Shape::Torus {
            radius,
            tube,
            radial_segments: 16,
            tubular_segments: 100,
        }
    }

    pub const fn cube(size: f32) -> Self {
        Shape::Box {
            width: size,
            height: size,
            depth: size,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        match *self {
            Shape::Sphere {
                radius,
                width_segments,
                height_segments,
            } => {
                if !positive(radius) {
                    return Err("sphere radius must be positive");
                }
                if width_segments < 3 || height_segments < 2 {
                    return Err("sphere needs at least 3x2 segments");
                }
            }
            Shape::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => {
                if !positive(radius) || !positive(tube) {
                    return Err("torus radii must be positive");
                }
                if radial_segments < 3 || tubular_segments < 3 {
                    return Err("torus needs at least 3 segments per direction");
                }
            }
            Shape::Icosahedron { radius, detail } => {
                if !positive(radius) {
                    return Err("icosahedron radius must be positive");
                }
                if detail > 5 {
                    return Err("icosahedron detail above 5 is not supported");
                }
            }
            Shape::Box {
                width,
                height,
                depth,
            } => {
                if !(positive(width) && positive(height) && positive(depth)) {
                    return Err("box dimensions must be positive");
                }
            }
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => {
                let radii_ok = radius_top.is_finite()
                    && radius_bottom.is_finite()
                    && radius_top >= 0.
                    && radius_bottom >= 0.
                    && radius_top + radius_bottom > 0.;
                if !radii_ok || !positive(height) {
                    return Err("cylinder needs a positive height and a non-zero radius");
                }
                if radial_segments < 3 {
                    return Err("cylinder needs at least 3 radial segments");
                }
            }
        }
        Ok(())
    }

    pub fn mesh(&self) -> Mesh {
        match *self {
            Shape::Sphere {
                radius,
                width_segments,
                height_segments,
            } => sphere(radius, width_segments, height_segments),
            Shape::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => torus(radius, tube, radial_segments, tubular_segments),
            Shape::Icosahedron { radius, detail } => icosahedron(radius, detail),
            Shape::Box {
                width,
                height,
                depth,
            } => cuboid(vec3(width, height, depth) * 0.5),
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => cylinder(radius_top, radius_bottom, height, radial_segments),
        }
    }
}

fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let mut mesh = Mesh::default();
    let row = width_segments + 1;

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let normal = vec3(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.vertices.push(Vertex::new(normal * radius, normal));
        }
    }

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // The pole rows collapse to a point, so skip their degenerate halves.
            if iy != 0 {
                mesh.indices.extend([a, b, d]);
            }
            if iy != height_segments - 1 {
                mesh.indices.extend([b, c, d]);
            }
        }
    }

    mesh
}

fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Mesh {
    let mut mesh = Mesh::default();
    let row = tubular_segments + 1;

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let position = vec3(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = vec3(radius * u.cos(), radius * u.sin(), 0.);
            mesh.vertices
                .push(Vertex::new(position, (position - center).normalize()));
        }
    }

    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend([a, b, d, b, c, d]);
        }
    }

    mesh
}

const GOLDEN: f32 = 1.618_034;

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1., GOLDEN, 0.],
    [1., GOLDEN, 0.],
    [-1., -GOLDEN, 0.],
    [1., -GOLDEN, 0.],
    [0., -1., GOLDEN],
    [0., 1., GOLDEN],
    [0., -1., -GOLDEN],
    [0., 1., -GOLDEN],
    [GOLDEN, 0., -1.],
    [GOLDEN, 0., 1.],
    [-GOLDEN, 0., -1.],
    [-GOLDEN, 0., 1.],
];

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Faceted icosphere: every face is split `detail` times, projected onto the
/// sphere and given its own flat normal.
fn icosahedron(radius: f32, detail: u32) -> Mesh {
    let mut mesh = Mesh::default();
    let n = detail as usize + 1;

    for face in ICOSAHEDRON_FACES {
        let [a, b, c] = face.map(|i| Vec3::from(ICOSAHEDRON_VERTICES[i]));

        // grid[i][j]: row i walks from edge a-b towards c, j walks along the row.
        let grid: Vec<Vec<Vec3>> = (0..=n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let start = a.lerp(c, t);
                let end = b.lerp(c, t);
                let cols = n - i;
                (0..=cols)
                    .map(|j| {
                        if cols == 0 {
                            start
                        } else {
                            start.lerp(end, j as f32 / cols as f32)
                        }
                    })
                    .collect()
            })
            .collect();

        for i in 0..n {
            for j in 0..(2 * (n - i) - 1) {
                let k = j / 2;
                let triangle = if j % 2 == 0 {
                    [grid[i][k + 1], grid[i + 1][k], grid[i][k]]
                } else {
                    [grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]
                };
                push_flat_triangle(&mut mesh, triangle.map(|p| p.normalize() * radius));
            }
        }
    }

    mesh
}

fn push_flat_triangle(mesh: &mut Mesh, [a, b, c]: [Vec3; 3]) {
    let mut normal = (b - a).cross(c - a).normalize_or_zero();
    let mut corners = [a, b, c];
    if normal.dot(a + b + c) < 0. {
        normal = -normal;
        corners.swap(1, 2);
    }
    let base = mesh.vertices.len() as u32;
    mesh.vertices
        .extend(corners.iter().map(|&p| Vertex::new(p, normal)));
    mesh.indices.extend([base, base + 1, base + 2]);
}

fn cuboid(half: Vec3) -> Mesh {
    let mut mesh = Mesh::default();
    let faces = [Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z];

    for normal in faces {
        // Two tangents spanning the face, chosen so (u x v) == normal.
        let u = if normal.y.abs() > 0.5 {
            Vec3::X
        } else {
            vec3(-normal.z, 0., normal.x)
        };
        let v = normal.cross(u);
        let base = mesh.vertices.len() as u32;
        for (su, sv) in [(-1., -1.), (1., -1.), (1., 1.), (-1., 1.)] {
            let corner = (normal + u * su + v * sv) * half;
            mesh.vertices.push(Vertex::new(corner, normal));
        }
        mesh.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}

fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Mesh {
    let mut mesh = Mesh::default();
    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / height;

    for (y, radius) in [(half, radius_top), (-half, radius_bottom)] {
        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.vertices.push(Vertex::new(
                vec3(radius * sin, y, radius * cos),
                vec3(sin, slope, cos).normalize(),
            ));
        }
    }

    let row = radial_segments + 1;
    for x in 0..radial_segments {
        let a = x;
        let b = row + x;
        let c = row + x + 1;
        let d = x + 1;
        mesh.indices.extend([a, b, d, b, c, d]);
    }

    for (y, radius, up) in [(half, radius_top, 1.), (-half, radius_bottom, -1.)] {
        if radius <= 0. {
            continue;
        }
        let normal = vec3(0., up, 0.);
        let center = mesh.vertices.len() as u32;
        mesh.vertices.push(Vertex::new(vec3(0., y, 0.), normal));
        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.vertices
                .push(Vertex::new(vec3(radius * sin, y, radius * cos), normal));
        }
        for x in 0..radial_segments {
            let i = center + 1 + x;
            if up > 0. {
                mesh.indices.extend([i, i + 1, center]);
            } else {
                mesh.indices.extend([i + 1, i, center]);
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_indices_in_range(mesh: &Mesh) {
        assert_eq!(mesh.indices.len() % 3, 0);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    fn assert_unit_normals(mesh: &Mesh) {
        for vertex in &mesh.vertices {
            let length = Vec3::from(vertex.normal).length();
            assert!((length - 1.).abs() < 1e-4, "normal length {}", length);
        }
    }

    #[test]
    fn sphere_vertices_lie_on_the_surface() {
        let mesh = Shape::Sphere {
            radius: 2.,
            width_segments: 16,
            height_segments: 8,
        }
        .mesh();

        assert_eq!(mesh.vertices.len(), 17 * 9);
        assert_eq!(mesh.indices.len(), 6 * 16 * (8 - 1));
        assert_indices_in_range(&mesh);
        assert_unit_normals(&mesh);
        for vertex in &mesh.vertices {
            let r = Vec3::from(vertex.position).length();
            assert!((r - 2.).abs() < 1e-4);
        }
    }

    #[test]
    fn torus_vertices_keep_tube_distance() {
        let mesh = Shape::torus(1.5, 0.25).mesh();
        assert_indices_in_range(&mesh);
        assert_unit_normals(&mesh);
        for vertex in &mesh.vertices {
            let p = Vec3::from(vertex.position);
            let ring = vec3(p.x, p.y, 0.).normalize() * 1.5;
            assert!(((p - ring).length() - 0.25).abs() < 1e-4);
        }
    }

    #[test]
    fn icosahedron_subdivision_multiplies_faces() {
        let coarse = Shape::Icosahedron {
            radius: 1.,
            detail: 0,
        }
        .mesh();
        let fine = Shape::Icosahedron {
            radius: 1.,
            detail: 2,
        }
        .mesh();

        assert_eq!(coarse.indices.len(), 20 * 3);
        assert_eq!(fine.indices.len(), 20 * 9 * 3);
        assert_indices_in_range(&fine);
        assert_unit_normals(&fine);
        for vertex in &fine.vertices {
            let p = Vec3::from(vertex.position);
            assert!((p.length() - 1.).abs() < 1e-4);
            assert!(p.dot(Vec3::from(vertex.normal)) > 0.);
        }
    }

    #[test]
    fn box_spans_its_dimensions() {
        let mesh = Shape::Box {
            width: 2.,
            height: 1.,
            depth: 4.,
        }
        .mesh();

        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        let max = mesh
            .vertices
            .iter()
            .fold(Vec3::ZERO, |acc, v| acc.max(Vec3::from(v.position)));
        assert!((max - vec3(1., 0.5, 2.)).abs().max_element() < 1e-6);
    }

    #[test]
    fn cone_skips_the_missing_cap() {
        let cone = Shape::Cylinder {
            radius_top: 0.,
            radius_bottom: 1.,
            height: 2.,
            radial_segments: 8,
        };
        let cylinder = Shape::Cylinder {
            radius_top: 1.,
            radius_bottom: 1.,
            height: 2.,
            radial_segments: 8,
        };

        let cone_mesh = cone.mesh();
        let cylinder_mesh = cylinder.mesh();
        assert_indices_in_range(&cone_mesh);
        assert_indices_in_range(&cylinder_mesh);
        assert_eq!(cylinder_mesh.indices.len() - cone_mesh.indices.len(), 8 * 3);
    }

    #[test]
    fn validation_rejects_degenerate_shapes() {
        assert!(Shape::sphere(0.).validate().is_err());
        assert!(Shape::sphere(f32::NAN).validate().is_err());
        assert!(Shape::torus(1., -0.1).validate().is_err());
        assert!(Shape::cube(1.).validate().is_ok());
        assert!(Shape::Cylinder {
            radius_top: 0.,
            radius_bottom: 0.,
            height: 1.,
            radial_segments: 8,
        }
        .validate()
        .is_err());
    }
}
