//! Clip-plane register interface
//!
//! The renderer programs user clip planes the way fixed-function graphics
//! APIs expose them: a small, numbered set of registers, each enabled or
//! disabled, each holding a plane equation `(a, b, c, d)` that keeps points
//! with `a*x + b*y + c*z + d >= 0`.
//!
//! wgpu has no such registers, so [`ClipPlaneRegisters`] keeps them on the
//! CPU and packs the enabled ones into a uniform block that the park shader
//! tests every fragment against.

use ballpark_math::Plane;
use crate::pipeline::ClipPlaneUniforms;

/// Number of clip-plane registers the park shader provides
pub const MAX_CLIP_PLANES: usize = 8;

/// A graphics API exposing numbered user clip-plane registers
pub trait ClipPlaneApi {
    /// Number of usable registers (queried at runtime)
    fn max_clip_planes(&self) -> usize;

    /// Start clipping against register `index`
    fn enable_clip_plane(&mut self, index: usize);

    /// Stop clipping against register `index`
    fn disable_clip_plane(&mut self, index: usize);

    /// Load a plane equation into register `index`
    fn set_clip_plane(&mut self, index: usize, equation: [f64; 4]);
}

/// Convert a plane to its register equation `(nx, ny, nz, -offset)`
///
/// Points on the positive side of the plane (the side its normal points
/// to) are kept.
pub fn plane_equation(plane: &Plane) -> [f64; 4] {
    [
        plane.normal.x as f64,
        plane.normal.y as f64,
        plane.normal.z as f64,
        -(plane.offset as f64),
    ]
}

/// CPU-side clip-plane register file
#[derive(Clone, Debug)]
pub struct ClipPlaneRegisters {
    limit: usize,
    enabled: [bool; MAX_CLIP_PLANES],
    equations: [[f64; 4]; MAX_CLIP_PLANES],
}

impl Default for ClipPlaneRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipPlaneRegisters {
    /// Create a register file with every shader register usable
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    /// Create a register file reporting at most `limit` registers
    ///
    /// Limits above [`MAX_CLIP_PLANES`] are clamped.
    pub fn with_limit(limit: Option<usize>) -> Self {
        let limit = limit.map_or(MAX_CLIP_PLANES, |l| l.min(MAX_CLIP_PLANES));
        Self {
            limit,
            enabled: [false; MAX_CLIP_PLANES],
            equations: [[0.0; 4]; MAX_CLIP_PLANES],
        }
    }

    /// Whether register `index` is enabled
    pub fn is_enabled(&self, index: usize) -> bool {
        self.enabled.get(index).copied().unwrap_or(false)
    }

    /// Equation currently loaded in register `index`
    pub fn equation(&self, index: usize) -> Option<[f64; 4]> {
        self.equations.get(index).copied()
    }

    /// Number of enabled registers
    pub fn enabled_count(&self) -> usize {
        self.enabled.iter().filter(|&&e| e).count()
    }

    /// Pack the enabled registers, in register order, for the shader
    pub fn to_uniforms(&self) -> ClipPlaneUniforms {
        let mut uniforms = ClipPlaneUniforms::default();
        let mut count = 0;
        for (eq, _) in self
            .equations
            .iter()
            .zip(self.enabled.iter())
            .filter(|(_, &enabled)| enabled)
        {
            uniforms.planes[count] = eq.map(|c| c as f32);
            count += 1;
        }
        uniforms.count = count as u32;
        uniforms
    }

    fn register_in_range(&self, index: usize) -> bool {
        if index < self.limit {
            true
        } else {
            log::warn!("Clip plane register {} out of range (limit {})", index, self.limit);
            false
        }
    }
}

impl ClipPlaneApi for ClipPlaneRegisters {
    fn max_clip_planes(&self) -> usize {
        self.limit
    }

    fn enable_clip_plane(&mut self, index: usize) {
        if self.register_in_range(index) {
            self.enabled[index] = true;
        }
    }

    fn disable_clip_plane(&mut self, index: usize) {
        if self.register_in_range(index) {
            self.enabled[index] = false;
        }
    }

    fn set_clip_plane(&mut self, index: usize, equation: [f64; 4]) {
        if self.register_in_range(index) {
            self.equations[index] = equation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballpark_math::Vec3;

    #[test]
    fn test_plane_equation_negates_offset() {
        let plane = Plane::from_normal_point(Vec3::Y, Vec3::new(0.0, 2.5, 0.0));
        assert_eq!(plane_equation(&plane), [0.0, 1.0, 0.0, -2.5]);
    }

    #[test]
    fn test_plane_equation_round_trip() {
        let plane = Plane::new(Vec3::new(1.0, 2.0, -2.0), 4.0);
        let eq = plane_equation(&plane);
        let normal = Vec3::new(eq[0] as f32, eq[1] as f32, eq[2] as f32);
        let back = Plane::from_normal_point(normal, normal * -(eq[3] as f32));

        assert!((back.normal - plane.normal).length() < 1e-6);
        assert!((back.offset - plane.offset).abs() < 1e-5);
    }

    #[test]
    fn test_equation_keeps_positive_side() {
        let plane = Plane::from_normal_point(Vec3::X, Vec3::new(1.0, 0.0, 0.0));
        let eq = plane_equation(&plane);
        let keep = |p: Vec3| eq[0] * p.x as f64 + eq[1] * p.y as f64 + eq[2] * p.z as f64 + eq[3] >= 0.0;

        assert!(keep(Vec3::new(2.0, 0.0, 0.0)));
        assert!(!keep(Vec3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_limit_clamped() {
        assert_eq!(ClipPlaneRegisters::new().max_clip_planes(), MAX_CLIP_PLANES);
        assert_eq!(ClipPlaneRegisters::with_limit(Some(3)).max_clip_planes(), 3);
        assert_eq!(ClipPlaneRegisters::with_limit(Some(64)).max_clip_planes(), MAX_CLIP_PLANES);
    }

    #[test]
    fn test_out_of_range_register_ignored() {
        let mut regs = ClipPlaneRegisters::with_limit(Some(2));
        regs.enable_clip_plane(2);
        regs.set_clip_plane(2, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(regs.enabled_count(), 0);
        assert_eq!(regs.equation(2), Some([0.0; 4]));
    }

    #[test]
    fn test_uniforms_pack_enabled_in_register_order() {
        let mut regs = ClipPlaneRegisters::new();
        regs.set_clip_plane(0, [1.0, 0.0, 0.0, -1.0]);
        regs.set_clip_plane(2, [0.0, 1.0, 0.0, -2.0]);
        regs.set_clip_plane(5, [0.0, 0.0, 1.0, -3.0]);
        regs.enable_clip_plane(5);
        regs.enable_clip_plane(0);
        regs.enable_clip_plane(2);
        regs.disable_clip_plane(2);

        let uniforms = regs.to_uniforms();
        assert_eq!(uniforms.count, 2);
        assert_eq!(uniforms.planes[0], [1.0, 0.0, 0.0, -1.0]);
        assert_eq!(uniforms.planes[1], [0.0, 0.0, 1.0, -3.0]);
        assert_eq!(uniforms.planes[2], [0.0; 4]);
    }
}
