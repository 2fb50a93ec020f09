//! # Formation
//!
//! A 3D particle formation engine. A fixed population of particles eases
//! toward one of five spatial layouts while a perspective camera follows
//! the pointer, and every frame is drawn as glowing circles.
//!
//! ## Quick Start
//!
//! ```ignore
//! use formation::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     env_logger::init();
//!     formation::window::run(EngineConfig::new().with_particle_count(1000))
//! }
//! ```
//!
//! ## Modes
//!
//! | Mode | Layout |
//! |------|--------|
//! | [`Mode::Grid`] | Scattered points with one coordinate snapped to a 45 px grid line |
//! | [`Mode::Warp`] | A starfield tunnel streaming toward the viewer |
//! | [`Mode::Circle`] | A thick ring, some particles roaming in and out |
//! | [`Mode::Sphere`] | A Fibonacci sphere with a few floating particles |
//! | [`Mode::Cube`] | A centered cubic lattice |
//!
//! Scrolling cycles through the modes. After each change further scrolls
//! are ignored until the particles have had time to settle.
//!
//! ## Headless use
//!
//! [`Engine`] does not own a window. It draws through the [`Canvas`] trait,
//! so a host can drive it with its own clock and input:
//!
//! ```ignore
//! let mut engine = Engine::new(EngineConfig::new().with_seed(7))?;
//! engine.start(800.0, 600.0);
//!
//! let mut canvas = RecordingCanvas::new();
//! engine.handle(Signal::PointerMoved { x: 400.0, y: 300.0 }, 0.0);
//! engine.frame(16.0, &mut canvas);
//! assert!(!canvas.circles.is_empty());
//! ```

pub mod camera;
pub mod config;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod layout;
pub mod motion;
pub mod particle;
pub mod projection;
pub mod sequencer;
pub mod spawn;
pub mod time;
pub mod window;

pub use config::EngineConfig;
pub use engine::{Engine, FrameStats};
pub use error::{ConfigError, GpuError, RunError};
pub use glam::{Vec2, Vec3, Vec4};
pub use input::Signal;
pub use layout::{Mode, Viewport};
pub use motion::Damping;
pub use projection::{Canvas, DrawCircle, Glow, RecordingCanvas};
pub use sequencer::{CycleOutcome, CycleSignal, Direction};

/// Common imports for hosting an engine.
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::{Engine, FrameStats};
    pub use crate::error::{ConfigError, GpuError, RunError};
    pub use crate::input::{InputMapper, Signal};
    pub use crate::layout::{Mode, Viewport};
    pub use crate::motion::Damping;
    pub use crate::projection::{Canvas, DrawCircle, Glow, RecordingCanvas};
    pub use crate::sequencer::{CycleOutcome, CycleSignal, Direction};
    pub use crate::time::Time;
    pub use crate::{Vec2, Vec3, Vec4};
}
