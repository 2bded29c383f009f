use crate::constants::*;
use crate::core::bitmap::Bitmap;
use crate::core::camera::Camera;
use crate::core::geometry::MeshData;
use crate::core::svg::{check_texture_size, TextureError};
use glam::{Mat4, Quat, Vec3};
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
mod texture;

pub use texture::Wrap;
use texture::GpuTexture;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GlobalUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    key_dir: [f32; 4],
    key_color: [f32; 4],
    fill_dir: [f32; 4],
    fill_color: [f32; 4],
    point_pos: [f32; 4],
    point_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

/// Surface appearance of one draw item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    pub shininess: f32,
    pub lit: bool,
    pub texture: Option<TextureId>,
}

impl Material {
    pub fn solid(color: [f32; 3], shininess: f32) -> Self {
        Self {
            color,
            opacity: 1.0,
            shininess,
            lit: true,
            texture: None,
        }
    }
}

/// Which pipeline draws an item. Translucent items draw after opaque ones,
/// in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    Opaque,
    Translucent,
    TranslucentDoubleSided,
}

/// Transform parent of a draw item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attach {
    /// Positioned in world space with its own rotation.
    Scene,
    /// Child of the hull; inherits the hull rotation.
    Hull,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureId(usize);

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct DrawItem {
    mesh: GpuMesh,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    material: Material,
    pass: Pass,
    attach: Attach,
    local: Mat4,
    rotation: Quat,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    object_bgl: wgpu::BindGroupLayout,

    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    translucent_double_pipeline: wgpu::RenderPipeline,

    #[allow(dead_code)]
    depth_tex: wgpu::Texture, // kept alive for depth_view
    depth_view: wgpu::TextureView,

    white: GpuTexture,
    textures: Vec<GpuTexture>,
    repeat_u_sampler: wgpu::Sampler,
    clamp_sampler: wgpu::Sampler,

    items: Vec<DrawItem>,
    hull_rotation: Quat,
    view_proj: Mat4,
    camera_eye: Vec3,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });

        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    // uniforms
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    // tex
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    // sampler
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl, &object_bgl],
            push_constant_ranges: &[],
        });

        let opaque_pipeline = helpers::make_mesh_pipeline(
            &device,
            "opaque_pipeline",
            &layout,
            &shader,
            format,
            Some(wgpu::BlendState::REPLACE),
            Some(wgpu::Face::Back),
            true,
        );
        let translucent_pipeline = helpers::make_mesh_pipeline(
            &device,
            "translucent_pipeline",
            &layout,
            &shader,
            format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            Some(wgpu::Face::Back),
            false,
        );
        let translucent_double_pipeline = helpers::make_mesh_pipeline(
            &device,
            "translucent_double_pipeline",
            &layout,
            &shader,
            format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            None,
            false,
        );

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals_uniforms"),
            size: std::mem::size_of::<GlobalUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let (depth_tex, depth_view) = helpers::create_depth_texture(&device, width, height);
        let white = GpuTexture::white(&device, &queue);
        let repeat_u_sampler = texture::create_sampler(&device, Wrap::RepeatU);
        let clamp_sampler = texture::create_sampler(&device, Wrap::Clamp);

        log::info!("[gpu] ready {}x{} format={:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            globals_buffer,
            globals_bind_group,
            object_bgl,
            opaque_pipeline,
            translucent_pipeline,
            translucent_double_pipeline,
            depth_tex,
            depth_view,
            white,
            textures: Vec::new(),
            repeat_u_sampler,
            clamp_sampler,
            items: Vec::new(),
            hull_rotation: Quat::IDENTITY,
            view_proj: Mat4::IDENTITY,
            camera_eye: Vec3::ZERO,
            width,
            height,
        })
    }

    pub fn create_texture(
        &mut self,
        label: &'static str,
        width: u32,
        height: u32,
        wrap: Wrap,
    ) -> TextureId {
        self.textures
            .push(GpuTexture::new(&self.device, label, width, height, wrap));
        TextureId(self.textures.len() - 1)
    }

    /// Upload new pixels; bind groups follow if the texture was reallocated.
    ///
    /// Bitmaps larger than the device allows are refused before any GPU call.
    pub fn upload_bitmap(&mut self, id: TextureId, bitmap: &Bitmap) -> Result<(), TextureError> {
        let max = self.device.limits().max_texture_dimension_2d;
        check_texture_size(bitmap.width, bitmap.height, max)?;
        let Some(tex) = self.textures.get_mut(id.0) else {
            return Ok(());
        };
        if tex.upload(&self.device, &self.queue, bitmap) {
            for i in 0..self.items.len() {
                if self.items[i].material.texture == Some(id) {
                    self.items[i].bind_group = self.object_bind_group(i);
                }
            }
        }
        Ok(())
    }

    pub fn add_mesh(
        &mut self,
        label: &str,
        mesh: &MeshData,
        material: Material,
        pass: Pass,
        attach: Attach,
        local: Mat4,
    ) -> NodeId {
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<ObjectUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.make_bind_group(&uniform_buffer, material.texture);
        self.items.push(DrawItem {
            mesh: GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: mesh.indices.len() as u32,
            },
            uniform_buffer,
            bind_group,
            material,
            pass,
            attach,
            local,
            rotation: Quat::IDENTITY,
        });
        NodeId(self.items.len() - 1)
    }

    pub fn set_material(&mut self, node: NodeId, material: Material) {
        let Some(item) = self.items.get_mut(node.0) else {
            return;
        };
        let rebind = item.material.texture != material.texture;
        item.material = material;
        if rebind {
            self.items[node.0].bind_group = self.object_bind_group(node.0);
        }
    }

    pub fn set_hull_rotation(&mut self, rotation: Quat) {
        self.hull_rotation = rotation;
    }

    /// Own rotation of a scene-level item; ignored for hull children.
    pub fn set_node_rotation(&mut self, node: NodeId, rotation: Quat) {
        if let Some(item) = self.items.get_mut(node.0) {
            item.rotation = rotation;
        }
    }

    pub fn set_camera(&mut self, camera: &Camera) {
        self.view_proj = camera.view_proj();
        self.camera_eye = camera.eye;
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
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
            (self.depth_tex, self.depth_view) =
                helpers::create_depth_texture(&self.device, width, height);
        }
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.write_uniforms();
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
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            let opaque = self.items.iter().filter(|i| i.pass == Pass::Opaque);
            let translucent = self.items.iter().filter(|i| i.pass != Pass::Opaque);
            for item in opaque.chain(translucent) {
                let pipeline = match item.pass {
                    Pass::Opaque => &self.opaque_pipeline,
                    Pass::Translucent => &self.translucent_pipeline,
                    Pass::TranslucentDoubleSided => &self.translucent_double_pipeline,
                };
                rpass.set_pipeline(pipeline);
                rpass.set_bind_group(1, &item.bind_group, &[]);
                rpass.set_vertex_buffer(0, item.mesh.vertex_buffer.slice(..));
                rpass.set_index_buffer(item.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..item.mesh.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl<'a> GpuState<'a> {
    fn write_uniforms(&self) {
        let scaled = |c: [f32; 3], k: f32| [c[0] * k, c[1] * k, c[2] * k, 1.0];
        let g = GlobalUniforms {
            view_proj: self.view_proj.to_cols_array_2d(),
            camera_pos: self.camera_eye.extend(1.0).to_array(),
            ambient: scaled(AMBIENT_COLOR, AMBIENT_INTENSITY),
            key_dir: KEY_LIGHT_POS.normalize().extend(0.0).to_array(),
            key_color: scaled(KEY_LIGHT_COLOR, KEY_LIGHT_INTENSITY),
            fill_dir: SIDE_LIGHT_POS.normalize().extend(0.0).to_array(),
            fill_color: scaled(SIDE_LIGHT_COLOR, SIDE_LIGHT_INTENSITY),
            point_pos: TEXT_LIGHT_POS.extend(TEXT_LIGHT_RANGE).to_array(),
            point_color: scaled(TEXT_LIGHT_COLOR, TEXT_LIGHT_INTENSITY),
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&g));

        let hull = Mat4::from_quat(self.hull_rotation);
        for item in &self.items {
            let model = match item.attach {
                Attach::Hull => hull * item.local,
                Attach::Scene => Mat4::from_quat(item.rotation) * item.local,
            };
            let m = item.material;
            let u = ObjectUniforms {
                model: model.to_cols_array_2d(),
                color: [m.color[0], m.color[1], m.color[2], m.opacity],
                params: [
                    m.shininess,
                    if m.lit { 1.0 } else { 0.0 },
                    if m.texture.is_some() { 1.0 } else { 0.0 },
                    0.0,
                ],
            };
            self.queue
                .write_buffer(&item.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }
    }

    fn object_bind_group(&self, index: usize) -> wgpu::BindGroup {
        let item = &self.items[index];
        self.make_bind_group(&item.uniform_buffer, item.material.texture)
    }

    fn make_bind_group(&self, uniforms: &wgpu::Buffer, texture: Option<TextureId>) -> wgpu::BindGroup {
        let tex = texture
            .and_then(|id| self.textures.get(id.0))
            .unwrap_or(&self.white);
        let sampler = match tex.wrap {
            Wrap::RepeatU => &self.repeat_u_sampler,
            Wrap::Clamp => &self.clamp_sampler,
        };
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bg"),
            layout: &self.object_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&tex.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }
}
