//! The engine context: particles, camera, pointer, sequencer and viewport
//! for one drawing surface.
//!
//! All per-frame work runs inside [`Engine::frame`]. Input arrives through
//! the signal methods, which only record state for the next frame (or, for
//! a resize, rebuild the layout descriptors). Nothing here is global, so
//! several engines can run side by side.

use crate::camera::{CameraRig, Pointer};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::input::Signal;
use crate::layout::{Mode, Viewport};
use crate::motion;
use crate::particle::Particle;
use crate::projection::{self, Canvas};
use crate::sequencer::{CycleOutcome, CycleSignal, ModeSequencer};
use glam::Vec2;

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub mode: Mode,
    /// Circles handed to the canvas (particles not culled).
    pub drawn: usize,
}

/// A running (or stopped) particle engine.
pub struct Engine {
    config: EngineConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    camera: CameraRig,
    pointer: Pointer,
    sequencer: ModeSequencer,
    running: bool,
    /// Number of layout rebuilds since start; mixed into the seed.
    generation: u64,
    last_frame_ms: Option<f64>,
}

impl Engine {
    /// Create a stopped engine. Call [`start`](Self::start) to build the particles.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let sequencer = Self::sequencer_for(&config);
        Ok(Self {
            config,
            viewport: Viewport::default(),
            particles: Vec::new(),
            camera: CameraRig::new(),
            pointer: Pointer::default(),
            sequencer,
            running: false,
            generation: 0,
            last_frame_ms: None,
        })
    }

    fn sequencer_for(config: &EngineConfig) -> ModeSequencer {
        ModeSequencer::new(config.modes.clone())
            .with_settle_ms(config.settle_ms)
            .with_threshold(config.cycle_threshold)
    }

    /// Initialize all state for a surface of `width` × `height` and start
    /// accepting frames. Restarting a running engine rebuilds it from scratch.
    pub fn start(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.generation = 0;
        let total = self.config.particle_count;
        let seed = self.config.seed;
        let viewport = self.viewport;
        self.particles = (0..total).map(|id| Particle::new(id, total, viewport, seed)).collect();
        self.camera = CameraRig::new();
        self.pointer = Pointer::default();
        self.sequencer = Self::sequencer_for(&self.config);
        self.last_frame_ms = None;
        self.running = true;

        log::info!(
            "Engine started: {} particles, {}x{} viewport, mode {}",
            total,
            viewport.width(),
            viewport.height(),
            self.sequencer.current()
        );
    }

    /// Stop accepting frames and drop any pending lockout. Stopping a
    /// stopped engine does nothing.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.sequencer.cancel_lockout();
        self.last_frame_ms = None;
        log::info!("Engine stopped");
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Record a new surface size and rebuild every particle's layout
    /// descriptors and randomized attributes. Positions are kept.
    pub fn resize(&mut self, width: f32, height: f32) {
        let viewport = Viewport::new(width, height);
        if !self.running {
            self.viewport = viewport;
            return;
        }
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;

        self.generation += 1;
        let seed = self.config.seed.wrapping_add(self.generation);
        for particle in &mut self.particles {
            particle.reinit(viewport, seed);
        }
        log::info!("Viewport resized to {}x{}", viewport.width(), viewport.height());
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.running {
            self.pointer.moved(Vec2::new(x, y));
        }
    }

    pub fn pointer_left(&mut self) {
        if self.running {
            self.pointer.left();
        }
    }

    /// Feed a cycle signal received at `now_ms` to the sequencer.
    ///
    /// Returns `None` while the engine is stopped.
    pub fn cycle_mode(&mut self, signal: CycleSignal, now_ms: f64) -> Option<CycleOutcome> {
        if !self.running {
            return None;
        }
        let outcome = self.sequencer.cycle(signal, now_ms);
        match outcome {
            CycleOutcome::Advanced(mode) => log::debug!("Mode changed to {}", mode),
            CycleOutcome::Locked => log::debug!("Mode change ignored: transition in progress"),
            CycleOutcome::TooSmall => {
                log::trace!("Mode change ignored: magnitude {}", signal.magnitude)
            }
        }
        Some(outcome)
    }

    /// Dispatch an input signal.
    pub fn handle(&mut self, signal: Signal, now_ms: f64) {
        match signal {
            Signal::PointerMoved { x, y } => self.pointer_moved(x, y),
            Signal::PointerLeft => self.pointer_left(),
            Signal::CycleMode(cycle) => {
                self.cycle_mode(cycle, now_ms);
            }
            Signal::ViewportResized { width, height } => self.resize(width, height),
        }
    }

    /// Run one frame at `now_ms`: step the particles, ease the camera and
    /// draw everything onto `canvas`.
    ///
    /// Returns `None` without touching the canvas while stopped.
    pub fn frame<C: Canvas + ?Sized>(&mut self, now_ms: f64, canvas: &mut C) -> Option<FrameStats> {
        if !self.running {
            return None;
        }

        // The first frame has no measurable duration; it counts as one reference frame.
        let (frames, particle_lambda, camera_lambda) = match self.last_frame_ms {
            Some(last) => {
                let delta_ms = (now_ms - last).max(0.0);
                let damping = self.config.damping;
                (
                    damping.frames(delta_ms),
                    damping.factor(self.config.particle_lambda, delta_ms),
                    damping.factor(self.config.camera_lambda, delta_ms),
                )
            }
            None => (1.0, self.config.particle_lambda, self.config.camera_lambda),
        };
        self.last_frame_ms = Some(now_ms);
        self.sequencer.poll(now_ms);

        let mode = self.sequencer.current();
        motion::step(&mut self.particles, mode, self.viewport, now_ms, particle_lambda);
        let center = self.viewport.center();
        self.camera.update(&self.pointer, center, now_ms, frames, camera_lambda);
        let rotation = self.camera.rotation;
        let drawn = projection::draw(canvas, &mut self.particles, rotation, self.viewport);

        Some(FrameStats { mode, drawn })
    }

    /// The active layout mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.sequencer.current()
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    #[inline]
    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    #[inline]
    pub fn sequencer(&self) -> &ModeSequencer {
        &self.sequencer
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
