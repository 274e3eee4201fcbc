//! wgpu implementation of the render boundary, shared by both frontends.

use crate::camera::Projection;
use crate::constants::Style;
use crate::scene::{FrameSnapshot, RenderBridge};

pub static NET_WGSL: &str = include_str!("../shaders/net.wgsl");

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const VEC3_STRIDE: u64 = (std::mem::size_of::<f32>() * 3) as u64;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
    eye: [f32; 4],
    point_color: [f32; 4],
    line_color: [f32; 4],
    params: [f32; 4], // fog near, fog far, point size, unused
}

/// Vertex buffer that is reallocated (at the next power of two) when a frame
/// outgrows it.
struct GrowableBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: u64,
}

impl GrowableBuffer {
    fn new(device: &wgpu::Device, label: &'static str, bytes: u64) -> Self {
        let capacity = bytes.max(VEC3_STRIDE * 2);
        Self {
            label,
            buffer: Self::allocate(device, label, capacity),
            capacity,
        }
    }

    fn allocate(device: &wgpu::Device, label: &'static str, size: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Upload `data`, returning the number of bytes written.
    fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[f32]) -> u64 {
        let bytes = std::mem::size_of_val(data) as u64;
        if bytes == 0 {
            return 0;
        }
        if bytes > self.capacity {
            self.capacity = bytes.next_power_of_two();
            log::debug!("[render] growing {} to {} bytes", self.label, self.capacity);
            self.buffer = Self::allocate(device, self.label, self.capacity);
        }
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        bytes
    }
}

pub struct NetRenderer<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    point_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    point_vb: GrowableBuffer,
    line_vb: GrowableBuffer,
    projection: Projection,
}

impl<'w> NetRenderer<'w> {
    /// Set up device, pipelines and buffers for `surface`.
    ///
    /// `points` and `segments` size the initial vertex buffers; both grow on
    /// demand afterwards.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'w>,
        width: u32,
        height: u32,
        points: usize,
        segments: usize,
    ) -> anyhow::Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
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
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("net_shader"),
            source: wgpu::ShaderSource::Wgsl(NET_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("net_uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("net_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("net_bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("net_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let point_pipeline = build_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            PipelineKind::Points,
        );
        let line_pipeline = build_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            PipelineKind::Lines,
        );

        let point_vb = GrowableBuffer::new(&device, "point_vb", points as u64 * VEC3_STRIDE);
        let line_vb = GrowableBuffer::new(&device, "line_vb", segments as u64 * 2 * VEC3_STRIDE);
        log::info!(
            "[render] surface {}x{} format={:?} points={} segments={}",
            config.width,
            config.height,
            format,
            points,
            segments
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            point_pipeline,
            line_pipeline,
            uniform_buffer,
            bind_group,
            point_vb,
            line_vb,
            projection: Projection::default(),
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if (width, height) != self.size() {
            self.resize(width, height);
        }
    }

    /// Re-apply the current configuration after a lost or outdated surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, frame: &FrameSnapshot<'_>) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let linear = self.config.format.is_srgb();
        let uniforms = self.uniforms(frame, linear);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        let point_bytes = self
            .point_vb
            .write(&self.device, &self.queue, frame.positions);
        let line_bytes = self
            .line_vb
            .write(&self.device, &self.queue, frame.segments);

        let fog = to_target_space(frame.style.fog_color, linear);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("net_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("net_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: fog[0] as f64,
                            g: fog[1] as f64,
                            b: fog[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);

            // Lines first so the discs sit on top of their links.
            if line_bytes > 0 {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_vertex_buffer(0, self.line_vb.buffer.slice(..line_bytes));
                rpass.draw(0..(frame.segment_count() * 2) as u32, 0..1);
            }
            if point_bytes > 0 && frame.style.point_size > 0.0 {
                rpass.set_pipeline(&self.point_pipeline);
                rpass.set_vertex_buffer(0, self.point_vb.buffer.slice(..point_bytes));
                rpass.draw(0..6, 0..frame.point_count() as u32);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    fn uniforms(&self, frame: &FrameSnapshot<'_>, linear: bool) -> Uniforms {
        let aspect = self.config.width as f32 / self.config.height.max(1) as f32;
        let pose = frame.pose;
        let view_proj = self.projection.matrix(aspect) * pose.view_matrix();
        let style: &Style = &frame.style;
        let rgba = |c: [f32; 4]| {
            let rgb = to_target_space([c[0], c[1], c[2]], linear);
            [rgb[0], rgb[1], rgb[2], c[3]]
        };
        Uniforms {
            view_proj: view_proj.to_cols_array_2d(),
            cam_right: pose.right().extend(0.0).to_array(),
            cam_up: pose.up().extend(0.0).to_array(),
            eye: pose.position.extend(1.0).to_array(),
            point_color: rgba(style.point_color),
            line_color: rgba(style.line_color),
            params: [style.fog_near, style.fog_far, style.point_size, 0.0],
        }
    }
}

impl RenderBridge for NetRenderer<'_> {
    type Error = wgpu::SurfaceError;

    fn draw(&mut self, frame: &FrameSnapshot<'_>) -> Result<(), Self::Error> {
        self.render(frame)
    }
}

#[derive(Clone, Copy)]
enum PipelineKind {
    Points,
    Lines,
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    kind: PipelineKind,
) -> wgpu::RenderPipeline {
    let (label, vs, fs, step_mode, topology) = match kind {
        PipelineKind::Points => (
            "point_pipeline",
            "vs_point",
            "fs_point",
            wgpu::VertexStepMode::Instance,
            wgpu::PrimitiveTopology::TriangleList,
        ),
        PipelineKind::Lines => (
            "line_pipeline",
            "vs_line",
            "fs_line",
            wgpu::VertexStepMode::Vertex,
            wgpu::PrimitiveTopology::LineList,
        ),
    };
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: VEC3_STRIDE,
                step_mode,
                attributes: &POSITION_ATTRS,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

/// sRGB-authored color converted for the surface: linearized when the
/// surface encodes sRGB on write, passed through otherwise.
fn to_target_space(rgb: [f32; 3], linear: bool) -> [f32; 3] {
    if linear {
        rgb.map(srgb_to_linear)
    } else {
        rgb
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_endpoints_are_fixed() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!(srgb_to_linear(0.5) < 0.5);
    }

    #[test]
    fn uniform_block_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
    }
}
