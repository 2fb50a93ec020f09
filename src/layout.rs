//! Layout modes and the geometry that places particles in each one.
//!
//! Every generator here is a pure function of the particle index, the
//! population size and the viewport. The random inputs a layout needs
//! (grid scatter, warp angle, ring thickness) are drawn once through a
//! [`SpawnContext`] and stored in the descriptor, so the per-frame code
//! only evaluates cheap time-varying terms.
//!
//! # Example
//!
//! ```
//! use formation::layout::{cube_spacing, cube_target, Viewport};
//!
//! let viewport = Viewport::new(1280.0, 720.0);
//! let corner = cube_target(0, 1000, viewport);
//! assert_eq!(corner.lattice, formation::Vec3::splat(-4.5));
//! assert_eq!(corner.position, corner.lattice * cube_spacing(viewport) + viewport.center3());
//! ```

use crate::spawn::SpawnContext;
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};
use std::fmt;

/// Spacing between grid lines in logical pixels.
pub const GRID_SIZE: f32 = 45.0;

/// Viewports narrower than this use the mobile proportions.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// Length of one warp tunnel cycle along the depth axis.
pub const WARP_DEPTH: f32 = 1500.0;

/// Depth travelled by warp particles per millisecond.
pub const WARP_SPEED: f64 = 0.6;

/// Maximum distance of a warp particle from the tunnel axis.
pub const WARP_MAX_DISTANCE: f32 = 900.0;

/// Total spread of the ring thickness jitter (centered on the ring).
pub const CIRCLE_THICKNESS: f32 = 85.0;

/// Radius of the sphere layout.
pub const SPHERE_RADIUS: f32 = 400.0;

/// Amplitude of the sideways drift of floating sphere particles.
pub const SPHERE_FLOAT_AMPLITUDE: f32 = 20.0;

/// Fraction of particles that roam around the circle.
pub const ROAM_CHANCE: f32 = 0.15;

/// Fraction of particles that float on the sphere.
pub const FLOAT_CHANCE: f32 = 0.2;

/// One of the five named target-generation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Particles scattered along evenly spaced horizontal and vertical lines.
    #[default]
    Grid,
    /// A tunnel of particles streaming toward the viewer.
    Warp,
    /// A thick ring around the viewport center.
    Circle,
    /// A Fibonacci lattice on a sphere.
    Sphere,
    /// A centered cubic lattice.
    Cube,
}

impl Mode {
    /// All modes in their cyclic order.
    pub const ALL: [Mode; 5] = [Mode::Grid, Mode::Warp, Mode::Circle, Mode::Sphere, Mode::Cube];

    /// Lower-case display name.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Grid => "grid",
            Mode::Warp => "warp",
            Mode::Circle => "circle",
            Mode::Sphere => "sphere",
            Mode::Cube => "cube",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Logical size of the drawing surface.
///
/// Dimensions are clamped to at least 1 so no layout formula divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Create a viewport, clamping each dimension to a minimum of 1.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: clamp_dimension(width),
            height: clamp_dimension(height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Center of the viewport in logical pixels.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Center as a world-space point on the z = 0 plane.
    #[inline]
    pub fn center3(&self) -> Vec3 {
        self.center().extend(0.0)
    }

    #[inline]
    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Whether the viewport is narrower than [`MOBILE_BREAKPOINT`].
    #[inline]
    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_BREAKPOINT
    }

    /// Particle size multiplier for this viewport class.
    #[inline]
    pub fn size_multiplier(&self) -> f32 {
        if self.is_mobile() {
            1.0
        } else {
            1.5
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

fn clamp_dimension(value: f32) -> f32 {
    if value.is_finite() {
        value.max(1.0)
    } else {
        1.0
    }
}

/// Axis along which a grid particle is snapped to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    /// Snapped in x, so it lies on a vertical line.
    X,
    /// Snapped in y, so it lies on a horizontal line.
    Y,
}

/// Grid layout descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTarget {
    pub position: Vec2,
    pub axis: GridAxis,
    /// Signed drift speed along the line. Not used by the current motion.
    pub speed: f32,
}

/// Warp layout descriptor. Depth is evaluated per frame from `base_depth`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpTarget {
    pub angle: f32,
    pub distance: f32,
    pub base_depth: f32,
}

/// Per-particle roaming oscillation on the circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roam {
    /// Amplitude in pixels.
    pub factor: f32,
    /// Angular frequency per millisecond.
    pub frequency: f64,
}

/// Circle layout descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleTarget {
    pub position: Vec2,
    pub roam: Option<Roam>,
}

/// Sphere layout descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereTarget {
    pub normal: Vec3,
    pub position: Vec3,
    pub floating: bool,
}

/// Cube layout descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeTarget {
    pub lattice: Vec3,
    pub position: Vec3,
}

/// Snap `value` to the nearest grid line along a dimension of size `extent`.
///
/// Lines sit on multiples of [`GRID_SIZE`] shifted by half the leftover so
/// the pattern is centered in the viewport.
pub fn snap_to_grid(value: f32, extent: f32) -> f32 {
    let offset = (extent % GRID_SIZE) / 2.0;
    ((value - offset) / GRID_SIZE).round() * GRID_SIZE + offset
}

/// Grid target: a random point with one coordinate snapped to a grid line.
pub fn grid_target(ctx: &mut SpawnContext, viewport: Viewport) -> GridTarget {
    let axis = if ctx.random() > 0.5 { GridAxis::X } else { GridAxis::Y };
    let direction = if ctx.random() > 0.5 { 1.0 } else { -1.0 };
    let speed = direction * ctx.random_range(0.6, 1.6);

    let sx = ctx.random() * viewport.width();
    let sy = ctx.random() * viewport.height();
    let position = match axis {
        GridAxis::X => Vec2::new(snap_to_grid(sx, viewport.width()), sy),
        GridAxis::Y => Vec2::new(sx, snap_to_grid(sy, viewport.height())),
    };

    GridTarget {
        position,
        axis,
        speed,
    }
}

/// Warp target parameters: fixed angle, distance and depth phase.
pub fn warp_target(ctx: &mut SpawnContext) -> WarpTarget {
    WarpTarget {
        base_depth: ctx.random() * WARP_DEPTH,
        angle: ctx.random() * TAU,
        distance: ctx.random() * WARP_MAX_DISTANCE,
    }
}

/// Depth of a warp particle at `elapsed_ms`, in `[-750, 750)`.
pub fn warp_depth(base_depth: f32, elapsed_ms: f64) -> f32 {
    let cycle = WARP_DEPTH as f64;
    ((base_depth as f64 + elapsed_ms * WARP_SPEED).rem_euclid(cycle) - cycle / 2.0) as f32
}

/// Screen-plane position of a warp particle.
pub fn warp_position(warp: &WarpTarget, viewport: Viewport) -> Vec2 {
    viewport.center() + Vec2::from_angle(warp.angle) * warp.distance
}

/// Base ring radius for the viewport.
pub fn circle_radius(viewport: Viewport) -> f32 {
    let ratio = if viewport.is_mobile() { 0.57 } else { 0.38 };
    viewport.min_dimension() * ratio
}

/// Circle target: particles evenly spread by index around a thick ring.
pub fn circle_target(ctx: &mut SpawnContext, viewport: Viewport) -> CircleTarget {
    let angle = ctx.progress() * TAU;
    let thickness = ctx.random_range(-CIRCLE_THICKNESS / 2.0, CIRCLE_THICKNESS / 2.0);
    let radius = circle_radius(viewport) + thickness;
    let position = viewport.center() + Vec2::from_angle(angle) * radius;

    let roaming = ctx.random() < ROAM_CHANCE;
    let factor = ctx.random_range(60.0, 180.0);
    let frequency = 0.0006 + ctx.random() as f64 * 0.0012;

    CircleTarget {
        position,
        roam: roaming.then_some(Roam { factor, frequency }),
    }
}

/// Roaming offset at `elapsed_ms`.
pub fn roam_offset(roam: &Roam, elapsed_ms: f64) -> Vec2 {
    let phase = elapsed_ms * roam.frequency;
    Vec2::new(phase.sin() as f32, phase.cos() as f32) * roam.factor
}

/// Unit normal of point `index` on a Fibonacci sphere of `total` points.
pub fn sphere_normal(index: u32, total: u32) -> Vec3 {
    let total = total.max(1) as f32;
    let phi = (1.0 - 2.0 * (index as f32 / total)).clamp(-1.0, 1.0).acos();
    // Golden angle increments, reduced mod TAU to keep precision at high indices.
    let theta = ((PI as f64) * (1.0 + 5f64.sqrt()) * index as f64).rem_euclid(TAU as f64) as f32;
    Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

/// Sphere target: the Fibonacci lattice scaled to [`SPHERE_RADIUS`].
pub fn sphere_target(ctx: &mut SpawnContext, viewport: Viewport) -> SphereTarget {
    let normal = sphere_normal(ctx.index, ctx.count);
    SphereTarget {
        normal,
        position: normal * SPHERE_RADIUS + viewport.center3(),
        floating: ctx.random() < FLOAT_CHANCE,
    }
}

/// Sideways drift of a floating sphere particle.
pub fn float_offset(index: u32, elapsed_ms: f64) -> f32 {
    (elapsed_ms * 0.001 + index as f64).sin() as f32 * SPHERE_FLOAT_AMPLITUDE
}

/// Number of lattice points along each cube edge: `ceil(cbrt(total))`.
pub fn cube_side(total: u32) -> u32 {
    let total = total.max(1);
    let mut side = (total as f64).cbrt().round() as u32;
    // Correct float error in either direction so side³ >= total > (side-1)³.
    while side.pow(3) < total {
        side += 1;
    }
    while side > 1 && (side - 1).pow(3) >= total {
        side -= 1;
    }
    side.max(1)
}

/// Centered integer lattice coordinate of point `index` in the cube.
pub fn cube_lattice(index: u32, total: u32) -> Vec3 {
    let side = cube_side(total);
    let offset = (side - 1) as f32 / 2.0;
    Vec3::new(
        (index % side) as f32,
        ((index / side) % side) as f32,
        (index / (side * side)) as f32,
    ) - Vec3::splat(offset)
}

/// Distance between neighbouring cube lattice points.
pub fn cube_spacing(viewport: Viewport) -> f32 {
    let ratio = if viewport.is_mobile() { 0.18 } else { 0.06 };
    viewport.min_dimension() * ratio
}

/// Cube target: the lattice scaled by [`cube_spacing`].
pub fn cube_target(index: u32, total: u32, viewport: Viewport) -> CubeTarget {
    let lattice = cube_lattice(index, total);
    CubeTarget {
        lattice,
        position: lattice * cube_spacing(viewport) + viewport.center3(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ctx(index: u32, count: u32) -> SpawnContext {
        SpawnContext::seeded(index, count, 1234)
    }

    #[test]
    fn test_viewport_clamps_degenerate_sizes() {
        let viewport = Viewport::new(0.0, -5.0);
        assert_eq!(viewport.width(), 1.0);
        assert_eq!(viewport.height(), 1.0);

        let viewport = Viewport::new(f32::NAN, 10.0);
        assert_eq!(viewport.width(), 1.0);
    }

    #[test]
    fn test_mobile_breakpoint() {
        assert!(Viewport::new(767.0, 1000.0).is_mobile());
        assert!(!Viewport::new(768.0, 1000.0).is_mobile());
        assert_eq!(Viewport::new(500.0, 500.0).size_multiplier(), 1.0);
        assert_eq!(Viewport::new(1500.0, 500.0).size_multiplier(), 1.5);
    }

    #[test]
    fn test_snap_to_grid_centers_lines() {
        // 100 % 45 = 10, so lines sit at 5, 50, 95.
        assert_eq!(snap_to_grid(0.0, 100.0), 5.0);
        assert_eq!(snap_to_grid(30.0, 100.0), 50.0);
        assert_eq!(snap_to_grid(80.0, 100.0), 95.0);
    }

    #[test]
    fn test_grid_target_lies_on_line() {
        let viewport = Viewport::new(1280.0, 720.0);
        for i in 0..200 {
            let grid = grid_target(&mut ctx(i, 200), viewport);
            let (value, extent) = match grid.axis {
                GridAxis::X => (grid.position.x, viewport.width()),
                GridAxis::Y => (grid.position.y, viewport.height()),
            };
            let offset = (extent % GRID_SIZE) / 2.0;
            let steps = (value - offset) / GRID_SIZE;
            assert!((steps - steps.round()).abs() < 1e-3, "{value} is off-grid");
            assert!(grid.speed.abs() >= 0.6 && grid.speed.abs() < 1.6);
        }
    }

    #[test]
    fn test_warp_depth_wraps() {
        assert_eq!(warp_depth(0.0, 0.0), -750.0);
        assert_eq!(warp_depth(750.0, 0.0), 0.0);
        // 2500 ms * 0.6 = 1500, a full cycle.
        assert!((warp_depth(100.0, 2500.0) - warp_depth(100.0, 0.0)).abs() < 1e-3);
        for step in 0..100 {
            let depth = warp_depth(1499.0, step as f64 * 37.0);
            assert!((-750.0..750.0).contains(&depth));
        }
    }

    #[test]
    fn test_circle_radius_breakpoint() {
        assert_eq!(circle_radius(Viewport::new(1000.0, 800.0)), 800.0 * 0.38);
        assert!(
            (circle_radius(Viewport::new(400.0, 800.0)) - 400.0 * 0.57).abs() < 1e-4
        );
    }

    #[test]
    fn test_circle_target_on_thick_ring() {
        let viewport = Viewport::new(1200.0, 800.0);
        let radius = circle_radius(viewport);
        let mut roaming = 0;
        for i in 0..1000 {
            let circle = circle_target(&mut ctx(i, 1000), viewport);
            let distance = (circle.position - viewport.center()).length();
            assert!((distance - radius).abs() <= CIRCLE_THICKNESS / 2.0 + 1e-2);
            if let Some(roam) = circle.roam {
                roaming += 1;
                assert!((60.0..180.0).contains(&roam.factor));
                assert!((0.0006..0.0018).contains(&roam.frequency));
            }
        }
        // ~15% roam; generous bounds for a seeded sample.
        assert!((80..230).contains(&roaming), "roaming = {roaming}");
    }

    #[test]
    fn test_sphere_normals_are_unit_and_distinct() {
        let normals: Vec<Vec3> = (0..1000).map(|i| sphere_normal(i, 1000)).collect();
        for n in &normals {
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
        let distinct: HashSet<[u32; 3]> = normals
            .iter()
            .map(|n| [n.x.to_bits(), n.y.to_bits(), n.z.to_bits()])
            .collect();
        assert_eq!(distinct.len(), 1000);
    }

    #[test]
    fn test_sphere_nearest_neighbour_spacing_is_uniform() {
        let normals: Vec<Vec3> = (0..1000).map(|i| sphere_normal(i, 1000)).collect();
        let nearest: Vec<f32> = normals
            .iter()
            .enumerate()
            .map(|(i, a)| {
                normals
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, b)| a.dot(*b).clamp(-1.0, 1.0).acos())
                    .fold(f32::MAX, f32::min)
            })
            .collect();

        let mean = nearest.iter().sum::<f32>() / nearest.len() as f32;
        // Ideal spacing for 1000 points is roughly sqrt(4π / 1000) ≈ 0.112 rad.
        assert!(mean > 0.08 && mean < 0.14, "mean = {mean}");
        let max = nearest.iter().copied().fold(0.0, f32::max);
        let min = nearest.iter().copied().fold(f32::MAX, f32::min);
        assert!(max < mean * 2.0, "gap too large: {max}");
        assert!(min > 0.0);
    }

    #[test]
    fn test_sphere_single_particle() {
        let normal = sphere_normal(0, 1);
        assert!(normal.is_finite());
        assert!((normal.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cube_side() {
        assert_eq!(cube_side(0), 1);
        assert_eq!(cube_side(1), 1);
        assert_eq!(cube_side(8), 2);
        assert_eq!(cube_side(9), 3);
        assert_eq!(cube_side(27), 3);
        assert_eq!(cube_side(1000), 10);
        assert_eq!(cube_side(1001), 11);
    }

    #[test]
    fn test_cube_lattice_fills_exactly() {
        let coords: Vec<Vec3> = (0..1000).map(|i| cube_lattice(i, 1000)).collect();
        let unique: HashSet<[i32; 3]> = coords
            .iter()
            .map(|c| [(c.x * 2.0) as i32, (c.y * 2.0) as i32, (c.z * 2.0) as i32])
            .collect();
        assert_eq!(unique.len(), 1000);

        for axis in 0..3 {
            let min = coords.iter().map(|c| c[axis]).fold(f32::MAX, f32::min);
            let max = coords.iter().map(|c| c[axis]).fold(f32::MIN, f32::max);
            assert_eq!(min, -4.5);
            assert_eq!(max, 4.5);
        }
    }

    #[test]
    fn test_cube_single_particle_is_centered() {
        let viewport = Viewport::new(800.0, 600.0);
        let cube = cube_target(0, 1, viewport);
        assert_eq!(cube.lattice, Vec3::ZERO);
        assert_eq!(cube.position, viewport.center3());
    }

    #[test]
    fn test_generators_are_deterministic() {
        let viewport = Viewport::new(1024.0, 768.0);
        for i in [0, 17, 999] {
            let grid = grid_target(&mut ctx(i, 1000), viewport);
            assert_eq!(grid, grid_target(&mut ctx(i, 1000), viewport));
            assert_eq!(warp_target(&mut ctx(i, 1000)), warp_target(&mut ctx(i, 1000)));
            let circle = circle_target(&mut ctx(i, 1000), viewport);
            assert_eq!(circle, circle_target(&mut ctx(i, 1000), viewport));
            let sphere = sphere_target(&mut ctx(i, 1000), viewport);
            assert_eq!(sphere, sphere_target(&mut ctx(i, 1000), viewport));
            assert_eq!(cube_target(i, 1000, viewport), cube_target(i, 1000, viewport));
        }
    }

    #[test]
    fn test_degenerate_viewport_produces_finite_targets() {
        let viewport = Viewport::new(0.0, 0.0);
        let grid = grid_target(&mut ctx(3, 10), viewport);
        let circle = circle_target(&mut ctx(3, 10), viewport);
        let cube = cube_target(3, 10, viewport);
        assert!(grid.position.is_finite());
        assert!(circle.position.is_finite());
        assert!(cube.position.is_finite());
    }
}
