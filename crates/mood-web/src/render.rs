//! WebGPU point-cloud/mesh backend.
//!
//! Two pipelines share one uniform buffer: an indexed pass for the primary
//! mesh with directional lighting, and an instanced-quad pass that draws
//! every cloud point as a circular-masked disc. The cloud population is
//! sized at initialization from the quality budget and the mood density and
//! is never resized mid-session; quality changes rebuild cloud and mesh in
//! place on the existing device.

use glam::Vec3;
use mood_core::camera::Camera;
use mood_core::cloud::{visual_config, MeshMotion, PointCloud, PointInstance, VisualConfig};
use mood_core::color::rgb_from_hex;
use mood_core::mesh::{self, MeshVertex};
use mood_core::mood::MoodState;
use mood_core::quality::QualityTier;
use web_sys as web;
use wgpu::util::DeviceExt;

const CLOUD_SEED: u64 = 7;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    mesh_color: [f32; 4],
    light_dir: [f32; 4],
}

const SHADER_SRC: &str = r#"
struct Uniforms {
  view_proj: mat4x4<f32>,
  model: mat4x4<f32>,
  mesh_color: vec4<f32>,
  light_dir: vec4<f32>,
};
@group(0) @binding(0) var<uniform> u: Uniforms;

// ---- mesh pass ----

struct MeshOut {
  @builtin(position) pos: vec4<f32>,
  @location(0) normal: vec3<f32>,
};

@vertex
fn vs_mesh(
  @location(0) position: vec3<f32>,
  @location(1) normal: vec3<f32>,
) -> MeshOut {
  var out: MeshOut;
  out.pos = u.view_proj * u.model * vec4<f32>(position, 1.0);
  out.normal = (u.model * vec4<f32>(normal, 0.0)).xyz;
  return out;
}

@fragment
fn fs_mesh(inf: MeshOut) -> @location(0) vec4<f32> {
  let n = normalize(inf.normal);
  let lambert = max(dot(n, normalize(-u.light_dir.xyz)), 0.0);
  let rgb = u.mesh_color.rgb * (0.25 + 0.75 * lambert);
  return vec4<f32>(rgb, u.mesh_color.a);
}

// ---- point pass ----

struct PointOut {
  @builtin(position) pos: vec4<f32>,
  @location(0) color: vec4<f32>,
  @location(1) local: vec2<f32>,
};

@vertex
fn vs_point(
  @location(0) v_pos: vec2<f32>,
  @location(1) i_pos: vec3<f32>,
  @location(2) i_size: f32,
  @location(3) i_color: vec4<f32>,
) -> PointOut {
  let world = vec4<f32>(i_pos, 1.0) + vec4<f32>(v_pos * i_size, 0.0, 0.0);
  var out: PointOut;
  out.pos = u.view_proj * world;
  out.color = i_color;
  out.local = v_pos; // unscaled local for shape mask
  return out;
}

@fragment
fn fs_point(inf: PointOut) -> @location(0) vec4<f32> {
  // Circular mask within the quad (unit circle of radius 0.5)
  let r = length(inf.local);
  let shape_alpha = 1.0 - smoothstep(0.48, 0.5, r);
  return vec4<f32>(inf.color.rgb, shape_alpha * inf.color.a);
}
"#;

pub struct GpuScene {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    mesh_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    mesh_vb: wgpu::Buffer,
    mesh_ib: wgpu::Buffer,
    mesh_index_count: u32,
    width: u32,
    height: u32,

    visual: &'static VisualConfig,
    cloud: PointCloud,
    motion: MeshMotion,
    camera: Camera,
    intensity: f32,
    high_detail: bool,
    instances: Vec<PointInstance>,
}

impl GpuScene {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        mood: &MoodState,
        tier: QualityTier,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("no WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits: older WebGPU impls reject unknown fields
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SRC.into()),
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Quad vertex buffer (two triangles)
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
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
            label: Some("bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let mesh_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }];
        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_mesh"),
                buffers: &mesh_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_mesh"),
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

        let point_buffers = [
            // slot 0: quad positions
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: per-point instance data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                ],
            },
        ];
        let point_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("point pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_point"),
                buffers: &point_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_point"),
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

        let settings = tier.settings();
        let high_detail = tier == QualityTier::High;
        let visual = visual_config(mood);
        let cloud = PointCloud::new(settings.particle_budget, visual, CLOUD_SEED);
        let (mesh_vb, mesh_ib, mesh_index_count) =
            upload_mesh(&device, visual, high_detail);
        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<PointInstance>() * cloud.len().max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera = Camera::for_base(
            Vec3::from(visual.camera_eye),
            width as f32 / height.max(1) as f32,
        );

        log::info!(
            "[gpu] initialized: {} points, {} mesh indices, {}x{}",
            cloud.len(),
            mesh_index_count,
            width,
            height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            mesh_pipeline,
            point_pipeline,
            uniform_buffer,
            bind_group,
            quad_vb,
            instance_vb,
            mesh_vb,
            mesh_ib,
            mesh_index_count,
            width,
            height,
            visual,
            cloud,
            motion: MeshMotion::default(),
            camera,
            intensity: mood.intensity,
            high_detail,
            instances: Vec::new(),
        })
    }

    /// Mood change: rebuild the primary mesh, reassign point colors, retarget
    /// the camera base. The point population itself is untouched.
    pub fn update_mood(&mut self, mood: &MoodState) {
        self.visual = visual_config(mood);
        self.intensity = mood.intensity;
        self.cloud.recolor(self.visual);
        let (vb, ib, count) = upload_mesh(&self.device, self.visual, self.high_detail);
        self.mesh_vb = vb;
        self.mesh_ib = ib;
        self.mesh_index_count = count;
    }

    /// Quality change: the one path that resizes the population. Cloud and
    /// mesh are rebuilt on the existing device.
    pub fn update_quality(&mut self, tier: QualityTier, mood: &MoodState) {
        self.high_detail = tier == QualityTier::High;
        self.visual = visual_config(mood);
        self.cloud = PointCloud::new(tier.settings().particle_budget, self.visual, CLOUD_SEED);
        self.instance_vb = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<PointInstance>() * self.cloud.len().max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let (vb, ib, count) = upload_mesh(&self.device, self.visual, self.high_detail);
        self.mesh_vb = vb;
        self.mesh_ib = ib;
        self.mesh_index_count = count;
        log::debug!("[gpu] rebuilt for {} tier: {} points", tier.name(), self.cloud.len());
    }

    pub fn particle_count(&self) -> usize {
        self.cloud.len()
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    pub fn render(&mut self, time_sec: f32) -> Result<(), wgpu::SurfaceError> {
        self.cloud
            .update(self.visual.movement, time_sec, self.intensity);
        self.motion.tick(self.intensity);
        self.camera
            .orbit(Vec3::from(self.visual.camera_eye), time_sec);

        let mesh_rgb = rgb_from_hex(self.visual.primary);
        let uniforms = Uniforms {
            view_proj: self.camera.view_proj().to_cols_array_2d(),
            model: self.motion.model_matrix(time_sec, self.intensity).to_cols_array_2d(),
            mesh_color: [mesh_rgb.x, mesh_rgb.y, mesh_rgb.z, 0.75],
            light_dir: [-0.4, -1.0, -0.3, 0.0],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        self.cloud.write_instances(&mut self.instances);
        self.queue
            .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(&self.instances));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.03,
                            g: 0.04,
                            b: 0.08,
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

            rpass.set_pipeline(&self.mesh_pipeline);
            rpass.set_vertex_buffer(0, self.mesh_vb.slice(..));
            rpass.set_index_buffer(self.mesh_ib.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.mesh_index_count, 0, 0..1);

            rpass.set_pipeline(&self.point_pipeline);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.draw(0..6, 0..(self.cloud.len() as u32));
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn upload_mesh(
    device: &wgpu::Device,
    visual: &VisualConfig,
    high_detail: bool,
) -> (wgpu::Buffer, wgpu::Buffer, u32) {
    let data = mesh::generate(visual.mesh, high_detail);
    let vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_vb"),
        contents: bytemuck::cast_slice(&data.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_ib"),
        contents: bytemuck::cast_slice(&data.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    (vb, ib, data.indices.len() as u32)
}
