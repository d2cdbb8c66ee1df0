use wgpu::util::DeviceExt;

use crate::controller::{CameraUniform, FrameLoopContext, LightingUniform, ObjectUniform};
use crate::model::SceneObject;
use crate::utils::{create_box_mesh, MeshBuffer, Vertex};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.1, g: 0.1, b: 0.1, a: 1.0 };

pub struct CameraResources {
    pub camera_buffer: wgpu::Buffer,
    pub lighting_buffer: wgpu::Buffer,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub camera_bind_group: wgpu::BindGroup,
}

/// Uniform buffer and bind group for one drawn object
struct ObjectSlot {
    object: SceneObject,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Draws every [`SceneObject`] as a lit, flat-colored box.
///
/// Opaque objects go first with depth writes; translucent ones follow,
/// blended and depth-tested without writing depth.
pub struct SceneRenderer {
    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    camera: CameraResources,
    objects: Vec<ObjectSlot>,
    opaque_count: usize,
    box_mesh: MeshBuffer,
    depth_view: wgpu::TextureView,
}

pub fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
    let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d { width: width.max(1), height: height.max(1), depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());
    (depth_texture, depth_view)
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

pub fn create_camera_resources(device: &wgpu::Device) -> CameraResources {
    let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("camera_buffer"),
        size: std::mem::size_of::<CameraUniform>() as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let lighting_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("lighting_buffer"),
        size: std::mem::size_of::<LightingUniform>() as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("camera_bind_group_layout"),
        entries: &[
            uniform_entry(0, wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT),
            uniform_entry(1, wgpu::ShaderStages::FRAGMENT),
        ],
    });

    let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("camera_bind_group"),
        layout: &bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() },
            wgpu::BindGroupEntry { binding: 1, resource: lighting_buffer.as_entire_binding() },
        ],
    });

    CameraResources { camera_buffer, lighting_buffer, bind_group_layout, camera_bind_group }
}

fn create_scene_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    shader: &wgpu::ShaderModule,
    pipeline_layout: &wgpu::PipelineLayout,
    translucent: bool,
) -> wgpu::RenderPipeline {
    let (label, blend) = if translucent {
        ("scene_translucent_pipeline", wgpu::BlendState::ALPHA_BLENDING)
    } else {
        ("scene_opaque_pipeline", wgpu::BlendState::REPLACE)
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(pipeline_layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[
                    wgpu::VertexAttribute { offset: 0, shader_location: 0, format: wgpu::VertexFormat::Float32x3 },
                    wgpu::VertexAttribute { offset: 12, shader_location: 1, format: wgpu::VertexFormat::Float32x3 },
                ],
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: !translucent,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState { count: 1, mask: !0, alpha_to_coverage_enabled: false },
        multiview: None,
        cache: None,
    })
}

impl SceneRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, width: u32, height: u32) -> Self {
        let camera = create_camera_resources(device);

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bind_group_layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT)],
        });

        let objects: Vec<ObjectSlot> = SceneObject::draw_order()
            .into_iter()
            .map(|object| {
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("object_uniform"),
                    contents: bytemuck::bytes_of(&ObjectUniform {
                        model: glam::Mat4::IDENTITY.to_cols_array_2d(),
                        color: object.color(),
                        sway: [0.0; 2],
                        _pad: [0.0; 2],
                    }),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("object_bind_group"),
                    layout: &object_layout,
                    entries: &[wgpu::BindGroupEntry { binding: 0, resource: buffer.as_entire_binding() }],
                });
                ObjectSlot { object, buffer, bind_group }
            })
            .collect();

        let opaque_count = objects.iter().filter(|slot| !slot.object.is_translucent()).count();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&camera.bind_group_layout, &object_layout],
            push_constant_ranges: &[],
        });
        let opaque_pipeline = create_scene_pipeline(device, format, &shader, &pipeline_layout, false);
        let translucent_pipeline = create_scene_pipeline(device, format, &shader, &pipeline_layout, true);
        let box_mesh = create_box_mesh().upload(device);
        let (_, depth_view) = create_depth_texture(device, width, height);

        tracing::debug!(objects = objects.len(), translucent = objects.len() - opaque_count, "scene renderer ready");

        Self {
            opaque_pipeline,
            translucent_pipeline,
            camera,
            objects,
            opaque_count,
            box_mesh,
            depth_view,
        }
    }

    /// Recreate the depth attachment to match a new surface size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let (_, depth_view) = create_depth_texture(device, width, height);
        self.depth_view = depth_view;
    }

    /// Copy this frame's camera, lighting and object transforms to the GPU.
    pub fn upload(&self, queue: &wgpu::Queue, frame: &FrameLoopContext) {
        queue.write_buffer(&self.camera.camera_buffer, 0, bytemuck::bytes_of(&frame.camera_uniform()));
        queue.write_buffer(&self.camera.lighting_buffer, 0, bytemuck::bytes_of(&frame.lighting_uniform()));
        for slot in &self.objects {
            queue.write_buffer(&slot.buffer, 0, bytemuck::bytes_of(&frame.object_uniform(slot.object)));
        }
    }

    pub fn draw(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
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

        render_pass.set_bind_group(0, &self.camera.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.box_mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.box_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        let (opaque, translucent) = self.objects.split_at(self.opaque_count);
        for (pipeline, slots) in [(&self.opaque_pipeline, opaque), (&self.translucent_pipeline, translucent)] {
            render_pass.set_pipeline(pipeline);
            for slot in slots {
                render_pass.set_bind_group(1, &slot.bind_group, &[]);
                render_pass.draw_indexed(0..self.box_mesh.index_count, 0, 0..1);
            }
        }
    }
}
