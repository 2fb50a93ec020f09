//! Per-particle state.

use crate::layout::{
    circle_target, cube_target, grid_target, sphere_target, warp_target, CircleTarget, CubeTarget,
    GridTarget, SphereTarget, Viewport, WarpTarget,
};
use crate::spawn::SpawnContext;
use glam::{Vec2, Vec3};

/// Half-size of the cube new particles are scattered in before their first layout.
pub const SCATTER_HALF_SIZE: f32 = 1000.0;

/// Precomputed target descriptors for every layout mode.
///
/// Only the descriptor of the active mode is consulted each frame; the rest
/// are kept so a mode switch needs no recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Targets {
    pub grid: GridTarget,
    pub warp: WarpTarget,
    pub circle: CircleTarget,
    pub sphere: SphereTarget,
    pub cube: CubeTarget,
}

impl Targets {
    /// Build all descriptors for the particle described by `ctx`.
    pub fn generate(ctx: &mut SpawnContext, viewport: Viewport) -> Self {
        Self {
            grid: grid_target(ctx, viewport),
            warp: warp_target(ctx),
            circle: circle_target(ctx, viewport),
            sphere: sphere_target(ctx, viewport),
            cube: cube_target(ctx.index, ctx.count, viewport),
        }
    }
}

/// A single point in the population.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    id: u32,
    total: u32,
    /// Current interpolated world-space position.
    pub position: Vec3,
    pub targets: Targets,
    pub base_radius: f32,
    pub opacity: f32,
    /// Screen position from the last draw. Not read by the simulation.
    pub render_position: Vec2,
}

impl Particle {
    /// Create particle `id` of `total`, scattered randomly in a large cube.
    pub fn new(id: u32, total: u32, viewport: Viewport, seed: u64) -> Self {
        let mut ctx = SpawnContext::seeded(id, total, seed);
        let position = ctx.random_in_cube(SCATTER_HALF_SIZE);
        let mut particle = Self {
            id,
            total,
            position,
            targets: Targets::generate(&mut ctx, viewport),
            base_radius: 0.0,
            opacity: 0.0,
            render_position: Vec2::ZERO,
        };
        particle.apply_visuals(&mut ctx, viewport);
        particle
    }

    /// Regenerate targets and visual attributes for a new viewport.
    ///
    /// `position` is left untouched so the particle eases toward the new
    /// layout from wherever it currently is.
    pub fn reinit(&mut self, viewport: Viewport, seed: u64) {
        let mut ctx = SpawnContext::seeded(self.id, self.total, seed);
        // Skip the scatter draw so reinit and new() agree on every attribute.
        ctx.random_in_cube(SCATTER_HALF_SIZE);
        self.targets = Targets::generate(&mut ctx, viewport);
        self.apply_visuals(&mut ctx, viewport);
    }

    fn apply_visuals(&mut self, ctx: &mut SpawnContext, viewport: Viewport) {
        self.base_radius = ctx.random_range(0.6, 1.0) * viewport.size_multiplier();
        self.opacity = ctx.random_range(0.3, 1.0);
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }
}
