//! Perspective projection and the per-frame draw pass.
//!
//! Positions are taken relative to the viewport center, rotated by the
//! camera (yaw about Y, then pitch about X), culled when behind the camera
//! plane and perspective-divided with a fixed focal distance. The result is
//! handed to a [`Canvas`] as one [`DrawCircle`] per visible particle.

use crate::layout::Viewport;
use crate::particle::Particle;
use glam::{Vec2, Vec3, Vec4};

/// Focal distance of the perspective projection.
pub const FOV: f32 = 800.0;

/// Upper bound on the perspective scale for points just in front of the camera plane.
pub const MAX_SCALE: f32 = 1000.0;

/// Particles above this alpha get a glow halo.
pub const GLOW_THRESHOLD: f32 = 0.6;

/// Blur radius of the glow halo in pixels.
pub const GLOW_RADIUS: f32 = 4.0;

/// Background clear color (#020d14).
pub const BACKGROUND: Vec4 = Vec4::new(2.0 / 255.0, 13.0 / 255.0, 20.0 / 255.0, 1.0);

/// Particle fill hue, rgb(74, 222, 222). Alpha is set per particle.
pub const PARTICLE_RGB: Vec3 = Vec3::new(74.0 / 255.0, 222.0 / 255.0, 222.0 / 255.0);

/// Glow halo color.
pub const GLOW_COLOR: Vec4 = Vec4::new(74.0 / 255.0, 222.0 / 255.0, 222.0 / 255.0, 0.5);

/// Soft halo drawn around a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub radius: f32,
    pub color: Vec4,
}

/// A filled circle in surface pixels.
///
/// The glow is part of the call rather than state on the surface, so draw
/// calls can be batched or reordered freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCircle {
    pub center: Vec2,
    pub radius: f32,
    /// Straight (non-premultiplied) RGBA.
    pub color: Vec4,
    pub glow: Option<Glow>,
}

/// A 2D drawing target.
pub trait Canvas {
    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Vec4);

    /// Draw a filled circle.
    fn fill_circle(&mut self, circle: &DrawCircle);
}

/// Canvas that keeps the draw calls of the current frame in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    pub clear_color: Option<Vec4>,
    pub circles: Vec<DrawCircle>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Vec4) {
        self.clear_color = Some(color);
        self.circles.clear();
    }

    fn fill_circle(&mut self, circle: &DrawCircle) {
        self.circles.push(*circle);
    }
}

/// A point after camera rotation and perspective divide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Position on the surface in pixels.
    pub screen: Vec2,
    /// Perspective scale factor, clamped to [`MAX_SCALE`].
    pub scale: f32,
    /// Depth after rotation.
    pub depth: f32,
}

impl Projected {
    /// Depth attenuation in `[0, 1]`: 1 at and beyond the focal plane's
    /// origin, fading to 0 at the camera plane.
    pub fn depth_fade(&self) -> f32 {
        ((self.depth + FOV) / FOV).clamp(0.0, 1.0)
    }
}

/// Rotate a center-relative point by yaw (`rotation.y`) then pitch (`rotation.x`).
pub fn rotate(relative: Vec3, rotation: Vec2) -> Vec3 {
    let (sin_y, cos_y) = rotation.y.sin_cos();
    let (sin_x, cos_x) = rotation.x.sin_cos();

    let x1 = relative.x * cos_y - relative.z * sin_y;
    let z1 = relative.z * cos_y + relative.x * sin_y;
    let y1 = relative.y * cos_x - z1 * sin_x;
    let z2 = z1 * cos_x + relative.y * sin_x;

    Vec3::new(x1, y1, z2)
}

/// Perspective-project an already rotated, center-relative point.
///
/// Returns `None` when the point is on or behind the camera plane
/// (`depth <= -FOV`).
pub fn project_rotated(rotated: Vec3, center: Vec2) -> Option<Projected> {
    if rotated.z <= -FOV {
        return None;
    }
    let scale = (FOV / (FOV + rotated.z)).min(MAX_SCALE);
    Some(Projected {
        screen: rotated.truncate() * scale + center,
        scale,
        depth: rotated.z,
    })
}

/// Project a world-space position through the camera.
pub fn project(position: Vec3, rotation: Vec2, viewport: Viewport) -> Option<Projected> {
    let relative = position - viewport.center3();
    project_rotated(rotate(relative, rotation), viewport.center())
}

/// Build the draw call for a projected particle.
pub fn circle_for(projected: &Projected, base_radius: f32, opacity: f32) -> DrawCircle {
    let alpha = opacity * projected.depth_fade();
    DrawCircle {
        center: projected.screen,
        radius: base_radius * projected.scale,
        color: PARTICLE_RGB.extend(alpha),
        glow: (alpha > GLOW_THRESHOLD).then_some(Glow {
            radius: GLOW_RADIUS,
            color: GLOW_COLOR,
        }),
    }
}

/// Clear `canvas` and draw every visible particle.
///
/// Updates each particle's `render_position`; culled particles keep their
/// previous one. Returns the number of circles drawn.
pub fn draw<C: Canvas + ?Sized>(
    canvas: &mut C,
    particles: &mut [Particle],
    rotation: Vec2,
    viewport: Viewport,
) -> usize {
    canvas.clear(BACKGROUND);

    let mut drawn = 0;
    for particle in particles {
        let Some(projected) = project(particle.position, rotation, viewport) else {
            continue;
        };
        particle.render_position = projected.screen;
        canvas.fill_circle(&circle_for(&projected, particle.base_radius, particle.opacity));
        drawn += 1;
    }
    drawn
}
