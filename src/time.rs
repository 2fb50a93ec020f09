//! Frame clock for the host loop.
//!
//! The engine itself is driven by explicit timestamps; `Time` is what the
//! windowed host uses to produce them.
//!
//! # Example
//!
//! ```ignore
//! use formation::time::Time;
//!
//! let mut time = Time::new();
//!
//! // Once per frame:
//! let (elapsed_ms, delta_ms) = time.update();
//! println!("Frame {} at {:.0} ms ({:.1} fps)", time.frame(), elapsed_ms, time.fps());
//! ```

use std::time::{Duration, Instant};

/// Time tracking for the frame loop.
#[derive(Debug)]
pub struct Time {
    /// When the timer was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Total elapsed time in milliseconds.
    elapsed_ms: f64,
    /// Time since last frame in milliseconds.
    delta_ms: f64,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl Time {
    /// Create a new time tracker starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_ms: 0.0,
            delta_ms: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns `(elapsed_ms, delta_ms)` for convenience.
    pub fn update(&mut self) -> (f64, f64) {
        let now = Instant::now();

        self.delta_ms = now.duration_since(self.last_frame).as_secs_f64() * 1000.0;
        self.last_frame = now;
        self.elapsed_ms = now.duration_since(self.start).as_secs_f64() * 1000.0;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (self.elapsed_ms, self.delta_ms)
    }

    /// Milliseconds since start, as of the last update.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Milliseconds between the last two updates.
    #[inline]
    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Milliseconds since start right now, without advancing the frame.
    pub fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Reset the timer to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
