//! Per-frame motion: target evaluation and damped interpolation.
//!
//! Particles never jump to a target. Each frame moves them a fixed fraction
//! of the remaining distance, which is what keeps mode switches continuous.

use crate::layout::{float_offset, roam_offset, warp_depth, warp_position, Mode, Viewport};
use crate::particle::Particle;
use glam::Vec3;

/// Fraction of the remaining distance a particle covers each frame.
pub const PARTICLE_DAMPING: f32 = 0.07;

/// How damping factors relate to wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Damping {
    /// Apply λ once per frame regardless of frame duration.
    ///
    /// Motion speed follows the display refresh rate.
    #[default]
    PerFrame,
    /// Treat λ as the per-frame factor at `reference_hz` and rescale it to
    /// the actual frame duration.
    TimeScaled { reference_hz: f32 },
}

impl Damping {
    /// Number of reference frames covered by a frame of `delta_ms`.
    pub fn frames(&self, delta_ms: f64) -> f32 {
        match *self {
            Damping::PerFrame => 1.0,
            Damping::TimeScaled { reference_hz } => {
                (delta_ms * reference_hz as f64 / 1000.0).max(0.0) as f32
            }
        }
    }

    /// Effective interpolation factor for `lambda` over a frame of `delta_ms`.
    pub fn factor(&self, lambda: f32, delta_ms: f64) -> f32 {
        match self {
            Damping::PerFrame => lambda,
            Damping::TimeScaled { .. } => 1.0 - (1.0 - lambda).powf(self.frames(delta_ms)),
        }
    }
}

/// World-space target of `particle` under `mode` at `elapsed_ms`.
///
/// Only the active mode's perturbation is evaluated: warp depth always
/// advances, circle particles roam if flagged, sphere particles float if
/// flagged, grid and cube are static.
pub fn target_for(particle: &Particle, mode: Mode, viewport: Viewport, elapsed_ms: f64) -> Vec3 {
    let targets = &particle.targets;
    match mode {
        Mode::Grid => targets.grid.position.extend(0.0),
        Mode::Warp => {
            let depth = warp_depth(targets.warp.base_depth, elapsed_ms);
            warp_position(&targets.warp, viewport).extend(depth)
        }
        Mode::Circle => {
            let circle = &targets.circle;
            let offset = circle.roam.map(|roam| roam_offset(&roam, elapsed_ms)).unwrap_or_default();
            (circle.position + offset).extend(0.0)
        }
        Mode::Sphere => {
            let sphere = &targets.sphere;
            let mut target = sphere.position;
            if sphere.floating {
                target.x += float_offset(particle.id(), elapsed_ms);
            }
            target
        }
        Mode::Cube => targets.cube.position,
    }
}

/// Move `position` toward `target` by `lambda` of the remaining distance on every axis.
#[inline]
pub fn approach(position: Vec3, target: Vec3, lambda: f32) -> Vec3 {
    position + (target - position) * lambda
}

/// Advance every particle one frame toward its target for `mode`.
pub fn step(
    particles: &mut [Particle],
    mode: Mode,
    viewport: Viewport,
    elapsed_ms: f64,
    lambda: f32,
) {
    for particle in particles {
        let target = target_for(particle, mode, viewport, elapsed_ms);
        particle.position = approach(particle.position, target, lambda);
    }
}
