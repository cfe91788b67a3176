use std::time::Instant;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use fifths_core::{
    Chroma, FlatFill, Params, Vertex, Visualizer, MESH_WGSL, PITCH_CLASSES,
};

// Seconds each chord is held before the progression moves one fifth on.
const CHORD_HOLD_SEC: f32 = 2.0;
const INITIAL_VERTEX_BYTES: u64 = 64 * 1024;

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: u64,
    width: u32,
    height: u32,
    start: Instant,
    visualizer: Visualizer,
}

fn create_vertex_buffer(device: &wgpu::Device, size: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("mesh_vb"),
        size,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window, params: Params) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        log::info!("[gpu] adapter: {}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        log::info!("[gpu] surface format {:?}", format);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(MESH_WGSL.into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        // Interleaved x, y, r, g, b, a
        let vertex_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 8,
                    shader_location: 1,
                },
            ],
        }];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let vertex_buffer = create_vertex_buffer(&device, INITIAL_VERTEX_BYTES);
        let visualizer = Visualizer::new(params, (size.width, size.height))?;

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_BYTES,
            width: size.width,
            height: size.height,
            start: Instant::now(),
            visualizer,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        // The visualizer sees the new size on its next frame either way.
        self.width = new_size.width;
        self.height = new_size.height;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        log::info!("[gpu] resize {}x{}", new_size.width, new_size.height);
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn adjust_params(&mut self, edit: impl FnOnce(&mut Params)) {
        let mut params = *self.visualizer.params();
        edit(&mut params);
        if let Err(e) = self.visualizer.set_params(params) {
            log::warn!("[input] {e}");
        }
    }

    fn handle_key(&mut self, key: &Key) -> bool {
        match key {
            Key::Named(NamedKey::Escape) => return false,
            Key::Named(NamedKey::ArrowUp) => {
                self.adjust_params(|p| p.resolution = p.stepped_resolution(1))
            }
            Key::Named(NamedKey::ArrowDown) => {
                self.adjust_params(|p| p.resolution = p.stepped_resolution(-1))
            }
            Key::Character(c) if c.as_str().eq_ignore_ascii_case("s") => {
                self.adjust_params(|p| p.smooth = !p.smooth)
            }
            Key::Character(c) if c.as_str().eq_ignore_ascii_case("f") => {
                self.adjust_params(|p| {
                    p.flat_fill = match p.flat_fill {
                        FlatFill::White => FlatFill::Midpoint,
                        FlatFill::Midpoint => FlatFill::White,
                    }
                })
            }
            _ => {}
        }
        true
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let raw = demo_chroma(self.start.elapsed().as_secs_f32());
        self.visualizer.frame(&raw, (self.width, self.height));
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        let vertices = self.visualizer.vertices();
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        if bytes.len() as u64 > self.vertex_capacity {
            let next = (bytes.len() as u64).next_power_of_two();
            log::debug!("[gpu] vertex buffer {} -> {} bytes", self.vertex_capacity, next);
            self.vertex_buffer = create_vertex_buffer(&self.device, next);
            self.vertex_capacity = next;
        }
        if !bytes.is_empty() {
            self.queue.write_buffer(&self.vertex_buffer, 0, bytes);
        }
        let vertex_count = vertices.len() as u32;

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let [r, g, b] = self.visualizer.params().background_color;

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if vertex_count > 0 {
                rpass.set_pipeline(&self.pipeline);
                rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                rpass.draw(0..vertex_count, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Stand-in for live chroma analysis: a major triad whose root walks the
/// circle of fifths, with a little shimmer on the chord tones.
fn demo_chroma(t_sec: f32) -> Chroma {
    let step = (t_sec / CHORD_HOLD_SEC) as usize;
    let root = (7 * step) % PITCH_CLASSES;
    let mut chroma = [0.1; PITCH_CLASSES];
    for (k, interval) in [0usize, 4, 7].into_iter().enumerate() {
        let shimmer = 0.05 * (t_sec * 3.0 + k as f32 * 2.1).sin();
        chroma[(root + interval) % PITCH_CLASSES] = 0.95 + shimmer;
    }
    chroma
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Meta fifths (native)")
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(&window, Params::default()))?;
    log::info!("[input] S: smooth shading  F: flat fill  Up/Down: resolution  Esc: quit");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => state.resize(size),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                },
            ..
        } => {
            if !state.handle_key(&logical_key) {
                elwt.exit();
            }
        }
        Event::AboutToWait => match state.render() {
            Ok(_) => state.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
            Err(_) => {}
        },
        _ => {}
    })?;
    Ok(())
}
