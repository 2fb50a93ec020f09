//! Engine configuration builder.
//!
//! ```ignore
//! let config = EngineConfig::new()
//!     .with_particle_count(1000)
//!     .with_seed(7)
//!     .with_modes(vec![Mode::Sphere, Mode::Cube]);
//! let engine = Engine::new(config)?;
//! ```

use crate::camera::CAMERA_DAMPING;
use crate::error::ConfigError;
use crate::layout::Mode;
use crate::motion::{Damping, PARTICLE_DAMPING};
use crate::sequencer::{CYCLE_THRESHOLD, SETTLE_MS};
use crate::spawn::time_seed;

/// Particle count of the canonical configuration.
pub const DEFAULT_PARTICLE_COUNT: u32 = 1000;

/// Settings an [`Engine`](crate::Engine) is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub particle_count: u32,
    pub seed: u64,
    pub modes: Vec<Mode>,
    pub damping: Damping,
    pub particle_lambda: f32,
    pub camera_lambda: f32,
    pub settle_ms: f64,
    pub cycle_threshold: f32,
}

impl EngineConfig {
    /// Default settings with a seed that differs per run.
    pub fn new() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            seed: time_seed(),
            modes: Mode::ALL.to_vec(),
            damping: Damping::PerFrame,
            particle_lambda: PARTICLE_DAMPING,
            camera_lambda: CAMERA_DAMPING,
            settle_ms: SETTLE_MS,
            cycle_threshold: CYCLE_THRESHOLD,
        }
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    /// Fix the RNG seed so layouts are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the ordered list of modes to cycle through.
    pub fn with_modes(mut self, modes: Vec<Mode>) -> Self {
        self.modes = modes;
        self
    }

    pub fn with_damping(mut self, damping: Damping) -> Self {
        self.damping = damping;
        self
    }

    /// Set the per-frame particle and camera damping factors.
    pub fn with_lambdas(mut self, particle: f32, camera: f32) -> Self {
        self.particle_lambda = particle;
        self.camera_lambda = camera;
        self
    }

    /// Set the lockout after a mode change, in milliseconds.
    pub fn with_settle_ms(mut self, settle_ms: f64) -> Self {
        self.settle_ms = settle_ms;
        self
    }

    /// Set the minimum magnitude of an accepted cycle signal.
    pub fn with_cycle_threshold(mut self, threshold: f32) -> Self {
        self.cycle_threshold = threshold;
        self
    }

    /// Check the settings for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        if self.modes.is_empty() {
            return Err(ConfigError::NoModes);
        }
        for lambda in [self.particle_lambda, self.camera_lambda] {
            if !(lambda > 0.0 && lambda <= 1.0) {
                return Err(ConfigError::InvalidDamping(lambda));
            }
        }
        if let Damping::TimeScaled { reference_hz } = self.damping {
            if !(reference_hz.is_finite() && reference_hz > 0.0) {
                return Err(ConfigError::InvalidReferenceRate(reference_hz));
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
