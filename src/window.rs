//! Windowed host: a winit event loop feeding an [`Engine`] and presenting
//! its frames through a [`GpuCanvas`].

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::RunError;
use crate::gpu::GpuCanvas;
use crate::input::InputMapper;
use crate::time::Time;

const TITLE: &str = "formation";

/// Frames between window title refreshes.
const TITLE_INTERVAL: u64 = 30;

/// Open a window and run the engine until it is closed.
pub fn run(config: EngineConfig) -> Result<(), RunError> {
    let engine = Engine::new(config)?;

    let event_loop = EventLoop::new()?;
    // Frames are paced by request_redraw + vsync, not by polling.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(engine);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    window: Option<Arc<Window>>,
    canvas: Option<GpuCanvas>,
    engine: Engine,
    input: InputMapper,
    time: Time,
    error: Option<RunError>,
}

impl App {
    fn new(engine: Engine) -> Self {
        Self {
            window: None,
            canvas: None,
            engine,
            input: InputMapper::default(),
            time: Time::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let capacity = self.engine.config().particle_count as usize;
        let canvas = pollster::block_on(GpuCanvas::new(window.clone(), capacity))?;

        self.input = InputMapper::new(window.scale_factor());
        let size = window.inner_size().to_logical::<f64>(window.scale_factor());
        self.time.reset();
        self.engine.start(size.width as f32, size.height as f32);

        window.request_redraw();
        self.window = Some(window);
        self.canvas = Some(canvas);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(canvas)) = (&self.window, &mut self.canvas) else {
            return;
        };

        let (now_ms, _) = self.time.update();
        let Some(stats) = self.engine.frame(now_ms, canvas) else {
            return;
        };

        match canvas.present() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                canvas.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                self.engine.stop();
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        if self.time.frame() % TITLE_INTERVAL == 0 {
            window.set_title(&format!("{} - {} - {:.0} fps", TITLE, stats.mode, self.time.fps()));
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("{}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.engine.stop();
                event_loop.exit();
                return;
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                return;
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(canvas) = &mut self.canvas {
                    canvas.resize(physical_size, self.input.scale_factor());
                }
            }
            _ => {}
        }

        if let Some(signal) = self.input.map(&event) {
            self.engine.handle(signal, self.time.now_ms());
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.engine.stop();
    }
}
