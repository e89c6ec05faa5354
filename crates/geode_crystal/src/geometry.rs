//! # Crystal Geometry
//!
//! Turns a facet count and a color palette into a small 3D mesh.
//!
//! Vertices are distributed by a Fibonacci sphere; faces are a naive fan
//! triangulation with a few interior triangles for visual depth. This is a
//! deliberately simple approximation of a convex hull - the viewer wants a
//! glinting crystal, not watertight topology - so the triangulation must be
//! reproduced exactly, not replaced with a real hull algorithm.

use crate::error::{CrystalError, CrystalResult};
use crate::math::Vec3;
use crate::metrics::DEFAULT_COLOR;

use serde::{Deserialize, Serialize};

/// Golden ratio, spacing the Fibonacci spiral.
const GOLDEN_RATIO: f64 = 1.618_033_988_749_895; // (1 + sqrt(5)) / 2

/// Interior triangles only weave through the first vertices of the spiral.
const INTERIOR_VERTEX_CAP: u32 = 20;

/// A crystal mesh in the shape the 3D viewer consumes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CrystalGeometry {
    /// Unit-sphere vertex positions, coordinates rounded to 4 decimals.
    pub vertices: Vec<Vec3>,
    /// Vertex index triplets.
    pub faces: Vec<[u32; 3]>,
    /// Per-face unit normals (zero vector for degenerate faces).
    pub normals: Vec<Vec3>,
    /// Per-vertex RGB colors, channels in [0,1] rounded to 3 decimals.
    pub colors: Vec<Vec3>,
}

/// Builds crystal meshes from presentation metrics.
#[derive(Clone, Copy, Debug, Default)]
pub struct CrystalGeometryBuilder;

impl CrystalGeometryBuilder {
    /// Creates a builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the mesh for `facet_count` facets colored from `hex_colors`.
    ///
    /// Colors cycle across vertices; an empty palette falls back to the
    /// default crystal color.
    ///
    /// # Errors
    ///
    /// [`CrystalError::DegenerateFacetCount`] when `facet_count <= 1` (the
    /// sphere distribution divides by `facet_count - 1`), and
    /// [`CrystalError::InvalidColor`] for non-`#rrggbb` palette entries.
    pub fn build(&self, facet_count: u32, hex_colors: &[String]) -> CrystalResult<CrystalGeometry> {
        if facet_count <= 1 {
            return Err(CrystalError::DegenerateFacetCount(facet_count));
        }

        let vertices = fibonacci_sphere(facet_count);
        let faces = triangulate(facet_count);
        let normals = face_normals(&vertices, &faces);
        let colors = vertex_colors(facet_count, hex_colors)?;

        Ok(CrystalGeometry {
            vertices,
            faces,
            normals,
            colors,
        })
    }
}

/// Distributes `count` points evenly over the unit sphere.
fn fibonacci_sphere(count: u32) -> Vec<Vec3> {
    let mut vertices = Vec::with_capacity(count as usize);
    for i in 0..count {
        let fi = f64::from(i);
        let y = 1.0 - 2.0 * fi / f64::from(count - 1);
        let radius = (1.0 - y * y).max(0.0).sqrt();
        let theta = 2.0 * std::f64::consts::PI * fi / GOLDEN_RATIO;
        let x = theta.cos() * radius;
        let z = theta.sin() * radius;
        vertices.push(Vec3::new(round4(x), round4(y), round4(z)));
    }
    vertices
}

/// Fan triangulation over the spiral, plus interior triangles through the
/// origin-most vertex for odd indices.
fn triangulate(count: u32) -> Vec<[u32; 3]> {
    let mut faces = Vec::new();
    for i in 0..count {
        faces.push([i, (i + 1) % count, (i + 2) % count]);
    }
    let cap = count.min(INTERIOR_VERTEX_CAP);
    let mut i = 1;
    while i < cap {
        faces.push([0, i, (i + 1) % count]);
        i += 2;
    }
    faces
}

/// Per-face normals from the cross product of the two edges at the first
/// vertex. Zero-area faces keep the zero vector.
fn face_normals(vertices: &[Vec3], faces: &[[u32; 3]]) -> Vec<Vec3> {
    faces
        .iter()
        .map(|face| {
            let v0 = vertices[face[0] as usize];
            let v1 = vertices[face[1] as usize];
            let v2 = vertices[face[2] as usize];
            (v1 - v0).cross(v2 - v0).normalized()
        })
        .collect()
}

/// Cycles the palette across vertices.
fn vertex_colors(count: u32, hex_colors: &[String]) -> CrystalResult<Vec<Vec3>> {
    let palette: Vec<Vec3> = if hex_colors.is_empty() {
        vec![parse_hex_color(DEFAULT_COLOR)?]
    } else {
        hex_colors
            .iter()
            .map(|hex| parse_hex_color(hex))
            .collect::<CrystalResult<_>>()?
    };

    Ok((0..count as usize)
        .map(|i| palette[i % palette.len()])
        .collect())
}

/// Parses `#rrggbb` into a unit RGB triplet, channels rounded to 3 decimals.
fn parse_hex_color(hex: &str) -> CrystalResult<Vec3> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CrystalError::InvalidColor(hex.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| -> CrystalResult<f32> {
        let value = u8::from_str_radix(&digits[range], 16)
            .map_err(|_| CrystalError::InvalidColor(hex.to_string()))?;
        Ok(round3(f64::from(value) / 255.0))
    };
    Ok(Vec3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[allow(clippy::cast_possible_truncation)]
fn round4(value: f64) -> f32 {
    ((value * 10_000.0).round() / 10_000.0) as f32
}

#[allow(clippy::cast_possible_truncation)]
fn round3(value: f64) -> f32 {
    ((value * 1_000.0).round() / 1_000.0) as f32
}
