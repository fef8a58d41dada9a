//! Procedural ballpark geometry and overlay line batches
//!
//! The park is built in world units of meters with +Y up, home plate at the
//! origin and center field along +Z.

use ballpark_core::OverlaySink;
use ballpark_math::{RigidTransform, Vec3};
use crate::pipeline::Vertex;

const GRASS_LIGHT: [f32; 4] = [0.30, 0.62, 0.25, 1.0];
const GRASS_DARK: [f32; 4] = [0.24, 0.52, 0.20, 1.0];
const DIRT: [f32; 4] = [0.62, 0.45, 0.30, 1.0];
const BASE: [f32; 4] = [0.95, 0.95, 0.95, 1.0];
const WALL: [f32; 4] = [0.12, 0.30, 0.18, 1.0];
const FOUL_POLE: [f32; 4] = [0.95, 0.85, 0.15, 1.0];

/// Distance between bases
pub const BASE_PATH: f32 = 27.43;
/// Distance from home plate to the outfield wall
pub const FENCE_DISTANCE: f32 = 110.0;
/// Outfield wall height
pub const WALL_HEIGHT: f32 = 3.0;

/// Number of mowing stripes in the outfield grass
const STRIPES: usize = 11;
/// Arc segments along the outfield wall
const ARC_SEGMENTS: usize = 48;

/// Triangle list describing the park
pub struct ParkGeometry {
    /// Vertices, three per triangle
    pub vertices: Vec<Vertex>,
}

impl Default for ParkGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl ParkGeometry {
    /// Build the park: striped grass fan, infield, bases, mound, wall and foul poles
    pub fn new() -> Self {
        let mut park = Self { vertices: Vec::new() };
        park.add_grass();
        park.add_infield();
        park.add_wall();
        park
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Axis-aligned bounds `(min, max)` of the park
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Vec3::new(f32::MIN, f32::MIN, f32::MIN);
        for v in &self.vertices {
            let [x, y, z] = v.position;
            min = Vec3::new(min.x.min(x), min.y.min(y), min.z.min(z));
            max = Vec3::new(max.x.max(x), max.y.max(y), max.z.max(z));
        }
        (min, max)
    }

    /// Point on the fair-territory arc at `t` in 0..=1 (left to right field line)
    fn arc_point(t: f32, radius: f32) -> Vec3 {
        let angle = std::f32::consts::FRAC_PI_4 * (2.0 * t - 1.0);
        Vec3::new(radius * angle.sin(), 0.0, radius * angle.cos())
    }

    fn add_grass(&mut self) {
        // Stripes are concentric rings of the fair-territory fan
        for stripe in 0..STRIPES {
            let inner = FENCE_DISTANCE * stripe as f32 / STRIPES as f32;
            let outer = FENCE_DISTANCE * (stripe + 1) as f32 / STRIPES as f32;
            let color = if stripe % 2 == 0 { GRASS_LIGHT } else { GRASS_DARK };
            for seg in 0..ARC_SEGMENTS {
                let t0 = seg as f32 / ARC_SEGMENTS as f32;
                let t1 = (seg + 1) as f32 / ARC_SEGMENTS as f32;
                let a = Self::arc_point(t0, inner);
                let b = Self::arc_point(t1, inner);
                let c = Self::arc_point(t1, outer);
                let d = Self::arc_point(t0, outer);
                if stripe == 0 {
                    self.add_triangle(a, d, c, color);
                } else {
                    self.add_quad(a, d, c, b, color);
                }
            }
        }

        // Foul territory behind home plate
        let h = BASE_PATH;
        self.add_quad(
            Vec3::new(-h, -0.01, -h),
            Vec3::new(-h, -0.01, 0.0),
            Vec3::new(h, -0.01, 0.0),
            Vec3::new(h, -0.01, -h),
            GRASS_DARK,
        );
    }

    fn add_infield(&mut self) {
        let d = BASE_PATH * std::f32::consts::FRAC_1_SQRT_2;
        let y = 0.01;
        let home = Vec3::new(0.0, y, 0.0);
        let first = Vec3::new(d, y, d);
        let second = Vec3::new(0.0, y, 2.0 * d);
        let third = Vec3::new(-d, y, d);

        // Dirt diamond, slightly larger than the base paths
        let grow = 1.15;
        self.add_quad(
            home * grow - Vec3::new(0.0, 0.0, 2.0),
            third * grow,
            second * grow,
            first * grow,
            DIRT,
        );

        for base in [home, first, second, third] {
            self.add_box(base + Vec3::new(0.0, 0.04, 0.0), Vec3::new(0.2, 0.04, 0.2), BASE);
        }

        // Pitcher's mound
        let mound = Vec3::new(0.0, 0.1, 18.44);
        self.add_box(mound, Vec3::new(1.5, 0.1, 1.5), DIRT);
        self.add_box(mound + Vec3::new(0.0, 0.12, 0.0), Vec3::new(0.3, 0.02, 0.08), BASE);
    }

    fn add_wall(&mut self) {
        for seg in 0..ARC_SEGMENTS {
            let t0 = seg as f32 / ARC_SEGMENTS as f32;
            let t1 = (seg + 1) as f32 / ARC_SEGMENTS as f32;
            let a = Self::arc_point(t0, FENCE_DISTANCE);
            let b = Self::arc_point(t1, FENCE_DISTANCE);
            let up = Vec3::new(0.0, WALL_HEIGHT, 0.0);
            // Facing the field
            self.add_quad(b, a, a + up, b + up, WALL);
        }

        for t in [0.0, 1.0] {
            let base = Self::arc_point(t, FENCE_DISTANCE);
            self.add_box(
                base + Vec3::new(0.0, 7.5, 0.0),
                Vec3::new(0.15, 7.5, 0.15),
                FOUL_POLE,
            );
        }
    }

    /// Add one triangle with a flat normal
    pub fn add_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: [f32; 4]) {
        let normal = (b - a).cross(c - a).normalized().to_array();
        for p in [a, b, c] {
            self.vertices.push(Vertex::new(p.to_array(), normal, color));
        }
    }

    /// Add a planar quad (`a`, `b`, `c`, `d` counter-clockwise seen from the front)
    pub fn add_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3, color: [f32; 4]) {
        self.add_triangle(a, b, c, color);
        self.add_triangle(a, c, d, color);
    }

    /// Add an axis-aligned box
    pub fn add_box(&mut self, center: Vec3, half: Vec3, color: [f32; 4]) {
        let corner = |sx: f32, sy: f32, sz: f32| {
            center + Vec3::new(sx * half.x, sy * half.y, sz * half.z)
        };
        let faces = [
            // +Y, -Y
            [(-1.0, 1.0, -1.0), (-1.0, 1.0, 1.0), (1.0, 1.0, 1.0), (1.0, 1.0, -1.0)],
            [(-1.0, -1.0, -1.0), (1.0, -1.0, -1.0), (1.0, -1.0, 1.0), (-1.0, -1.0, 1.0)],
            // +X, -X
            [(1.0, -1.0, -1.0), (1.0, 1.0, -1.0), (1.0, 1.0, 1.0), (1.0, -1.0, 1.0)],
            [(-1.0, -1.0, -1.0), (-1.0, -1.0, 1.0), (-1.0, 1.0, 1.0), (-1.0, 1.0, -1.0)],
            // +Z, -Z
            [(-1.0, -1.0, 1.0), (1.0, -1.0, 1.0), (1.0, 1.0, 1.0), (-1.0, 1.0, 1.0)],
            [(-1.0, -1.0, -1.0), (-1.0, 1.0, -1.0), (1.0, 1.0, -1.0), (1.0, -1.0, -1.0)],
        ];
        for face in faces {
            let [a, b, c, d] = face.map(|(x, y, z)| corner(x, y, z));
            self.add_quad(a, b, c, d, color);
        }
    }
}

/// Overlay line segments collected for one frame
#[derive(Default)]
pub struct OverlayBatch {
    lines: Vec<Vertex>,
    transparent_lines: Vec<Vertex>,
}

impl OverlayBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every line (start of a new frame)
    pub fn clear(&mut self) {
        self.lines.clear();
        self.transparent_lines.clear();
    }

    /// Number of segments in the batch
    pub fn line_count(&self) -> usize {
        (self.lines.len() + self.transparent_lines.len()) / 2
    }

    /// Whether the batch holds no segments
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.transparent_lines.is_empty()
    }

    /// Line-list vertices, opaque segments first
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut out = Vec::with_capacity(self.lines.len() + self.transparent_lines.len());
        out.extend_from_slice(&self.lines);
        out.extend_from_slice(&self.transparent_lines);
        out
    }

    /// Draw the local axes of `transform` (X red, Y green, Z blue)
    pub fn axes(&mut self, transform: &RigidTransform, length: f32) {
        let origin = transform.origin();
        let axes = [
            (Vec3::X, [1.0, 0.2, 0.2, 1.0]),
            (Vec3::Y, [0.2, 1.0, 0.2, 1.0]),
            (Vec3::Z, [0.3, 0.4, 1.0, 1.0]),
        ];
        for (axis, color) in axes {
            let tip = origin + transform.transform_direction(axis) * length;
            self.line(origin, tip, color);
        }
    }

    /// Draw a translucent square of half-size `size` through the origin of
    /// `transform`, spanning its local X and Z axes
    pub fn square(&mut self, transform: &RigidTransform, size: f32, color: [f32; 4]) {
        let corner = |sx: f32, sz: f32| {
            transform.transform_point(Vec3::new(sx * size, 0.0, sz * size))
        };
        let corners = [corner(-1.0, -1.0), corner(1.0, -1.0), corner(1.0, 1.0), corner(-1.0, 1.0)];
        for i in 0..4 {
            self.transparent_line(corners[i], corners[(i + 1) % 4], color);
        }
    }
}

impl OverlaySink for OverlayBatch {
    fn line(&mut self, from: Vec3, to: Vec3, color: [f32; 4]) {
        self.lines.push(Vertex::new(from.to_array(), [0.0; 3], color));
        self.lines.push(Vertex::new(to.to_array(), [0.0; 3], color));
    }

    fn transparent_line(&mut self, from: Vec3, to: Vec3, color: [f32; 4]) {
        self.transparent_lines.push(Vertex::new(from.to_array(), [0.0; 3], color));
        self.transparent_lines.push(Vertex::new(to.to_array(), [0.0; 3], color));
    }
}
