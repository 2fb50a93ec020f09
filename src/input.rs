//! Input signals consumed by the engine.
//!
//! The engine never sees raw window events. A host translates them into
//! [`Signal`]s, either by hand or with [`InputMapper`] for winit windows.
//!
//! ```ignore
//! let mut mapper = InputMapper::new(window.scale_factor());
//! if let Some(signal) = mapper.map(&event) {
//!     engine.handle(signal, time.now_ms());
//! }
//! ```

use crate::sequencer::CycleSignal;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{MouseScrollDelta, WindowEvent};

/// Pixels scrolled per wheel line, matching typical browser wheel deltas.
pub const PIXELS_PER_LINE: f32 = 100.0;

/// Something that happened on the surface, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    PointerMoved { x: f32, y: f32 },
    PointerLeft,
    CycleMode(CycleSignal),
    ViewportResized { width: f32, height: f32 },
}

/// Translates winit window events into engine signals.
#[derive(Debug, Clone, Copy)]
pub struct InputMapper {
    scale_factor: f64,
}

impl InputMapper {
    /// Create a mapper for a window with the given scale factor.
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor: sanitize_scale(scale_factor),
        }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = sanitize_scale(scale_factor);
    }

    /// Convert a physical cursor position to logical pixels.
    pub fn pointer(&self, position: PhysicalPosition<f64>) -> Signal {
        let logical = position.to_logical::<f64>(self.scale_factor);
        Signal::PointerMoved {
            x: logical.x as f32,
            y: logical.y as f32,
        }
    }

    /// Convert a physical surface size to a logical viewport size.
    pub fn resized(&self, size: PhysicalSize<u32>) -> Signal {
        let logical = size.to_logical::<f64>(self.scale_factor);
        Signal::ViewportResized {
            width: logical.width as f32,
            height: logical.height as f32,
        }
    }

    /// Convert a wheel delta to a cycle signal.
    ///
    /// winit reports "scroll up" as positive y, browsers as negative deltaY;
    /// the sign is flipped so scrolling down moves forward.
    pub fn wheel(&self, delta: MouseScrollDelta) -> Signal {
        let delta_y = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * PIXELS_PER_LINE,
            MouseScrollDelta::PixelDelta(pos) => (-pos.y / self.scale_factor) as f32,
        };
        Signal::CycleMode(CycleSignal::from_scroll(delta_y))
    }

    /// Map a window event to a signal, if it is one the engine cares about.
    ///
    /// `ScaleFactorChanged` updates the mapper and yields nothing; the
    /// `Resized` event that follows it carries the new size.
    pub fn map(&mut self, event: &WindowEvent) -> Option<Signal> {
        match event {
            WindowEvent::CursorMoved { position, .. } => Some(self.pointer(*position)),
            WindowEvent::CursorLeft { .. } => Some(Signal::PointerLeft),
            WindowEvent::MouseWheel { delta, .. } => Some(self.wheel(*delta)),
            WindowEvent::Resized(size) => Some(self.resized(*size)),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor);
                None
            }
            _ => None,
        }
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn sanitize_scale(scale_factor: f64) -> f64 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    }
}
