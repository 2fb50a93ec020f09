//! End-to-end behaviour of the engine through its public API.

use formation::prelude::*;
use formation::projection::{self, BACKGROUND};

fn grid_engine(count: u32, size: f32) -> Engine {
    let config = EngineConfig::new()
        .with_particle_count(count)
        .with_seed(42)
        .with_modes(vec![Mode::Grid]);
    let mut engine = Engine::new(config).unwrap();
    engine.start(size, size);
    engine
}

#[test]
fn test_first_frame_draws_projected_positions() {
    let mut engine = grid_engine(4, 100.0);
    let mut canvas = RecordingCanvas::new();

    let stats = engine.frame(0.0, &mut canvas).unwrap();
    assert_eq!(stats.mode, Mode::Grid);
    assert_eq!(canvas.clear_color, Some(BACKGROUND));
    assert_eq!(stats.drawn, canvas.circles.len());

    let rotation = engine.camera().rotation;
    let viewport = engine.viewport();
    for particle in engine.particles() {
        if let Some(projected) = projection::project(particle.position, rotation, viewport) {
            assert_eq!(particle.render_position, projected.screen);
        }
    }
}

#[test]
fn test_grid_settles_inside_viewport() {
    let mut engine = grid_engine(4, 100.0);
    let mut canvas = RecordingCanvas::new();
    // Pointer at the center keeps the camera level.
    engine.handle(Signal::PointerMoved { x: 50.0, y: 50.0 }, 0.0);

    for frame in 0..300 {
        engine.frame(frame as f64 * 16.0, &mut canvas);
    }

    assert_eq!(canvas.circles.len(), 4);
    for particle in engine.particles() {
        let p = particle.render_position;
        assert!((-1.0..=101.0).contains(&p.x), "x out of view: {p}");
        assert!((-1.0..=101.0).contains(&p.y), "y out of view: {p}");
        assert!(particle.position.z.abs() < 1e-3);
    }
}

#[test]
fn test_scroll_cycles_with_settle_lockout() {
    let config = EngineConfig::new().with_particle_count(10).with_seed(1);
    let mut engine = Engine::new(config).unwrap();
    engine.start(800.0, 600.0);

    let forward = CycleSignal::new(Direction::Forward, 120.0);
    assert_eq!(
        engine.cycle_mode(forward, 0.0),
        Some(CycleOutcome::Advanced(Mode::Warp))
    );
    assert_eq!(engine.cycle_mode(forward, 500.0), Some(CycleOutcome::Locked));
    assert_eq!(engine.mode(), Mode::Warp);

    let tiny = CycleSignal::new(Direction::Forward, 2.0);
    assert_eq!(engine.cycle_mode(tiny, 2000.0), Some(CycleOutcome::TooSmall));

    let backward = CycleSignal::new(Direction::Backward, 120.0);
    assert_eq!(
        engine.cycle_mode(backward, 2000.0),
        Some(CycleOutcome::Advanced(Mode::Grid))
    );
    assert_eq!(
        engine.cycle_mode(backward, 4000.0),
        Some(CycleOutcome::Advanced(Mode::Cube))
    );
}

#[test]
fn test_same_seed_same_frames() {
    let run = || {
        let mut engine = grid_engine(25, 640.0);
        let mut canvas = RecordingCanvas::new();
        for frame in 0..10 {
            engine.frame(frame as f64 * 16.0, &mut canvas);
        }
        canvas.circles
    };
    assert_eq!(run(), run());
}

#[test]
fn test_engines_are_independent() {
    let mut a = grid_engine(8, 200.0);
    let mut b = grid_engine(8, 200.0);
    let mut canvas = RecordingCanvas::new();

    a.handle(Signal::ViewportResized { width: 500.0, height: 300.0 }, 0.0);
    a.frame(0.0, &mut canvas);

    assert_eq!(b.viewport(), Viewport::new(200.0, 200.0));
    assert!(b.frame(0.0, &mut canvas).is_some());
    b.stop();
    assert!(a.frame(16.0, &mut canvas).is_some());
}
