//! Camera rotation driven by the pointer or an idle drift.

use std::f32::consts::TAU;

use glam::Vec2;

/// Fraction of the remaining rotation covered each frame.
pub const CAMERA_DAMPING: f32 = 0.05;

/// Radians of rotation per pixel of pointer offset from the center.
pub const POINTER_SENSITIVITY: f32 = 0.0005;

/// Yaw added to the idle target each frame.
pub const IDLE_YAW_STEP: f32 = 0.001;

/// Amplitude of the idle pitch wobble in radians.
pub const IDLE_PITCH_AMPLITUDE: f32 = 0.1;

/// Angular frequency of the idle pitch wobble per millisecond.
pub const IDLE_PITCH_FREQUENCY: f64 = 0.0005;

/// Last known pointer position and whether it is over the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub position: Vec2,
    pub active: bool,
}

impl Pointer {
    pub fn moved(&mut self, position: Vec2) {
        self.position = position;
        self.active = true;
    }

    pub fn left(&mut self) {
        self.active = false;
    }
}

/// Current and target camera rotation.
///
/// `x` is pitch (about the X axis) and `y` is yaw (about the Y axis), both
/// in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraRig {
    pub rotation: Vec2,
    pub target: Vec2,
}

impl CameraRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the target from the pointer (or the idle drift) and ease
    /// `rotation` toward it.
    ///
    /// `frames` is the number of reference frames this update stands for
    /// (1.0 when damping per frame) and `lambda` the damping factor to use.
    pub fn update(
        &mut self,
        pointer: &Pointer,
        center: Vec2,
        elapsed_ms: f64,
        frames: f32,
        lambda: f32,
    ) {
        if pointer.active {
            let offset = pointer.position - center;
            self.target = Vec2::new(offset.y, offset.x) * POINTER_SENSITIVITY;
        } else {
            let phase = elapsed_ms * IDLE_PITCH_FREQUENCY;
            self.target.x = phase.sin() as f32 * IDLE_PITCH_AMPLITUDE;
            self.target.y += IDLE_YAW_STEP * frames;
            self.unwind_yaw();
        }

        self.rotation += (self.target - self.rotation) * lambda;
    }

    /// Drop whole turns from the idle yaw, shifting `rotation` by the same
    /// amount so the easing gap is unchanged. Keeps the f32 sum small enough
    /// that each step still registers.
    fn unwind_yaw(&mut self) {
        let turns = (self.target.y / TAU).floor();
        if turns != 0.0 {
            self.target.y -= turns * TAU;
            self.rotation.y -= turns * TAU;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Vec2 = Vec2::new(400.0, 300.0);

    #[test]
    fn test_pointer_sets_target() {
        let mut rig = CameraRig::new();
        let mut pointer = Pointer::default();
        pointer.moved(Vec2::new(600.0, 200.0));

        rig.update(&pointer, CENTER, 0.0, 1.0, CAMERA_DAMPING);
        assert!((rig.target.x - (-100.0 * POINTER_SENSITIVITY)).abs() < 1e-7);
        assert!((rig.target.y - 200.0 * POINTER_SENSITIVITY).abs() < 1e-7);
        assert!((rig.rotation - rig.target * CAMERA_DAMPING).length() < 1e-7);
    }

    #[test]
    fn test_idle_yaw_accumulates() {
        let mut rig = CameraRig::new();
        let pointer = Pointer::default();
        for _ in 0..10 {
            rig.update(&pointer, CENTER, 0.0, 1.0, CAMERA_DAMPING);
        }
        assert!((rig.target.y - 10.0 * IDLE_YAW_STEP).abs() < 1e-6);
        assert_eq!(rig.target.x, 0.0);
        assert!(rig.rotation.y > 0.0 && rig.rotation.y < rig.target.y);
    }

    #[test]
    fn test_idle_pitch_wobbles() {
        let mut rig = CameraRig::new();
        let pointer = Pointer::default();
        // sin(π/2) at 1000π ms
        rig.update(&pointer, CENTER, std::f64::consts::PI * 1000.0, 1.0, CAMERA_DAMPING);
        assert!((rig.target.x - IDLE_PITCH_AMPLITUDE).abs() < 1e-6);
    }

    #[test]
    fn test_idle_resumes_after_pointer_leaves() {
        let mut rig = CameraRig::new();
        let mut pointer = Pointer::default();
        pointer.moved(Vec2::new(800.0, 300.0));
        rig.update(&pointer, CENTER, 0.0, 1.0, CAMERA_DAMPING);
        let yaw = rig.target.y;

        pointer.left();
        rig.update(&pointer, CENTER, 0.0, 1.0, CAMERA_DAMPING);
        assert!((rig.target.y - (yaw + IDLE_YAW_STEP)).abs() < 1e-7);
    }

    #[test]
    fn test_idle_yaw_keeps_advancing_after_long_runs() {
        let mut rig = CameraRig::new();
        let pointer = Pointer::default();
        rig.target.y = 32768.0;
        rig.rotation.y = 32768.0;

        rig.update(&pointer, CENTER, 0.0, 1.0, CAMERA_DAMPING);
        assert!((0.0..TAU).contains(&rig.target.y));
        let before = rig.target.y;
        for _ in 0..1000 {
            rig.update(&pointer, CENTER, 0.0, 1.0, CAMERA_DAMPING);
        }
        let advanced = (rig.target.y - before).rem_euclid(TAU);
        assert!((advanced - 1000.0 * IDLE_YAW_STEP).abs() < 1e-3, "advanced {advanced}");
    }

    #[test]
    fn test_unwinding_keeps_rotation_gap() {
        let mut rig = CameraRig::new();
        let pointer = Pointer::default();
        rig.target.y = 3.0 * TAU + 0.5;
        rig.rotation.y = 3.0 * TAU + 0.4;

        rig.update(&pointer, CENTER, 0.0, 1.0, CAMERA_DAMPING);
        assert!(rig.target.y < TAU);
        let gap = rig.target.y - rig.rotation.y;
        let expected = (0.1 + IDLE_YAW_STEP) * (1.0 - CAMERA_DAMPING);
        assert!((gap - expected).abs() < 1e-4, "gap {gap}");
    }

    #[test]
    fn test_rotation_converges_slowly() {
        let mut rig = CameraRig::new();
        let mut pointer = Pointer::default();
        pointer.moved(CENTER + Vec2::new(200.0, 0.0));
        rig.update(&pointer, CENTER, 0.0, 1.0, CAMERA_DAMPING);
        let first = rig.rotation.y;
        for _ in 0..200 {
            rig.update(&pointer, CENTER, 0.0, 1.0, CAMERA_DAMPING);
        }
        assert!(first < rig.target.y * 0.06);
        assert!((rig.rotation.y - rig.target.y).abs() < 1e-4);
    }
}
