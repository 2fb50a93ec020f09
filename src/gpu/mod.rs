//! wgpu-backed [`Canvas`]: every circle of a frame becomes one instance of
//! a screen-space quad, drawn in a single pass.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::error::GpuError;
use crate::projection::{Canvas, DrawCircle, BACKGROUND};

/// WGSL source of the circle pipeline.
pub const CIRCLE_SHADER: &str = include_str!("circles.wgsl");

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct CircleInstance {
    center: [f32; 2],
    radius: f32,
    glow_radius: f32,
    color: [f32; 4],
    glow_color: [f32; 4],
}

impl CircleInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32,
        2 => Float32,
        3 => Float32x4,
        4 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<&DrawCircle> for CircleInstance {
    fn from(circle: &DrawCircle) -> Self {
        let (glow_radius, glow_color) = circle
            .glow
            .map_or((0.0, Vec4::ZERO), |glow| (glow.radius, glow.color));
        Self {
            center: circle.center.to_array(),
            radius: circle.radius,
            glow_radius,
            color: circle.color.to_array(),
            glow_color: glow_color.to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    viewport: [f32; 2],
    _padding: [f32; 2],
}

fn to_wgpu_color(color: Vec4) -> wgpu::Color {
    wgpu::Color {
        r: color.x as f64,
        g: color.y as f64,
        b: color.z as f64,
        a: color.w as f64,
    }
}

/// Window surface that renders draw calls with wgpu.
///
/// Coordinates are logical pixels; the surface itself is configured at
/// physical resolution.
pub struct GpuCanvas {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    instances: Vec<CircleInstance>,
    clear_color: wgpu::Color,
    logical_size: Vec2,
}

impl GpuCanvas {
    /// Create a canvas for `window`, pre-sizing the instance buffer for
    /// `capacity` circles.
    pub async fn new(window: Arc<Window>, capacity: usize) -> Result<Self, GpuError> {
        let size = window.inner_size();
        let scale_factor = window.scale_factor();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        // Colors are given in sRGB-encoded canvas values; a non-sRGB target
        // stores them unchanged.
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniform Buffer"),
            size: std::mem::size_of::<Uniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Circle Shader"),
            source: wgpu::ShaderSource::Wgsl(CIRCLE_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Circle Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Circle Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[CircleInstance::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let instance_capacity = capacity.max(1);
        let instance_buffer = create_instance_buffer(&device, instance_capacity);

        log::info!(
            "GPU canvas ready: {} ({:?}), {}x{} surface, {:?}",
            adapter.get_info().name,
            adapter.get_info().backend,
            config.width,
            config.height,
            config.format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            instance_buffer,
            instance_capacity,
            instances: Vec::with_capacity(instance_capacity),
            clear_color: to_wgpu_color(BACKGROUND),
            logical_size: logical_size(size, scale_factor),
        })
    }

    /// Reconfigure the surface for a new physical size.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>, scale_factor: f64) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.logical_size = logical_size(new_size, scale_factor);
        }
    }

    /// Configure the surface again with its current size, after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Number of circles queued since the last clear.
    pub fn queued(&self) -> usize {
        self.instances.len()
    }

    /// Submit the queued circles and present the frame.
    pub fn present(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        if self.instances.len() > self.instance_capacity {
            self.instance_capacity = self.instances.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(&self.device, self.instance_capacity);
        }
        if !self.instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&self.instances));
        }
        let uniforms = Uniforms {
            viewport: self.logical_size.to_array(),
            _padding: [0.0; 2],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !self.instances.is_empty() {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
                render_pass.draw(0..6, 0..self.instances.len() as u32);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl Canvas for GpuCanvas {
    fn clear(&mut self, color: Vec4) {
        self.clear_color = to_wgpu_color(color);
        self.instances.clear();
    }

    fn fill_circle(&mut self, circle: &DrawCircle) {
        self.instances.push(CircleInstance::from(circle));
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Circle Instance Buffer"),
        size: (capacity * std::mem::size_of::<CircleInstance>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn logical_size(size: PhysicalSize<u32>, scale_factor: f64) -> Vec2 {
    let logical = size.to_logical::<f64>(scale_factor);
    Vec2::new(logical.width.max(1.0) as f32, logical.height.max(1.0) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{Glow, GLOW_COLOR};

    #[test]
    fn test_instance_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 48);
        assert_eq!(CircleInstance::ATTRIBUTES[3].offset, 16);
        assert_eq!(CircleInstance::ATTRIBUTES[4].offset, 32);
    }

    #[test]
    fn test_instance_from_circle_without_glow() {
        let circle = DrawCircle {
            center: Vec2::new(10.0, 20.0),
            radius: 1.5,
            color: Vec4::new(0.1, 0.2, 0.3, 0.4),
            glow: None,
        };
        let instance = CircleInstance::from(&circle);
        assert_eq!(instance.center, [10.0, 20.0]);
        assert_eq!(instance.glow_radius, 0.0);
        assert_eq!(instance.glow_color, [0.0; 4]);
    }

    #[test]
    fn test_instance_from_circle_with_glow() {
        let circle = DrawCircle {
            center: Vec2::ZERO,
            radius: 1.0,
            color: Vec4::ONE,
            glow: Some(Glow {
                radius: 4.0,
                color: GLOW_COLOR,
            }),
        };
        let instance = CircleInstance::from(&circle);
        assert_eq!(instance.glow_radius, 4.0);
        assert_eq!(instance.glow_color, GLOW_COLOR.to_array());
    }

    #[test]
    fn test_logical_size_divides_scale() {
        assert_eq!(
            logical_size(PhysicalSize::new(2560, 1440), 2.0),
            Vec2::new(1280.0, 720.0)
        );
        assert_eq!(logical_size(PhysicalSize::new(0, 0), 1.0), Vec2::ONE);
    }
}
