use bytemuck::{Pod, Zeroable};

use crate::draw::{DrawCmd, DrawList, Triangle};
use crate::paint::Color;

use super::{RenderCtx, RenderTarget};

/// One vertex of a flat-coloured triangle, logical pixels.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub pos: [f32; 2],
    /// Linear premultiplied RGBA.
    pub color: [f32; 4],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

const VIEWPORT_UBO_SIZE: wgpu::BufferSize = match wgpu::BufferSize::new(size_of::<ViewportUniform>() as u64) {
    Some(size) => size,
    None => panic!("viewport uniform is zero-sized"),
};

/// Flattens `list` into a triangle list, in paint order.
///
/// Non-finite geometry is skipped. `out` is cleared first.
pub fn tessellate(list: &DrawList, out: &mut Vec<MeshVertex>) {
    out.clear();
    for item in list.iter_in_paint_order() {
        match &item.cmd {
            DrawCmd::Triangle(tri) => push_triangle(out, tri),
            DrawCmd::Quad(quad) => {
                for tri in &quad.triangles() {
                    push_triangle(out, tri);
                }
            }
        }
    }
}

fn push_triangle(out: &mut Vec<MeshVertex>, tri: &Triangle) {
    if !tri.points.iter().all(|p| p.is_finite()) {
        return;
    }
    let color = tri.color.to_array();
    out.extend(tri.points.iter().map(|p| MeshVertex { pos: [p.x, p.y], color }));
}

/// Draws the frame's triangles in one pass over a cleared target.
///
/// Geometry arrives in logical pixels; the vertex shader maps it to NDC.
/// No depth buffer: later commands paint over earlier ones.
#[derive(Default)]
pub struct MeshRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,

    vertices: Vec<MeshVertex>,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears `target` to `clear` and draws `list` over it.
    ///
    /// Returns the number of vertices submitted.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        list: &DrawList,
        clear: Color,
    ) -> u32 {
        self.ensure_pipeline(ctx);

        let mut vertices = std::mem::take(&mut self.vertices);
        tessellate(list, &mut vertices);
        let count = vertices.len() as u32;

        if !vertices.is_empty() {
            self.write_viewport_uniform(ctx);
            self.ensure_vbo_capacity(ctx, vertices.len());
            if let Some(vbo) = self.vbo.as_ref() {
                ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&vertices));
            }
        }
        self.vertices = vertices;

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("voxel mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if count == 0 {
            return 0;
        }

        let (Some(pipeline), Some(bind_group), Some(vbo)) =
            (self.pipeline.as_ref(), self.bind_group.as_ref(), self.vbo.as_ref())
        else {
            return 0;
        };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..count, 0..1);
        count
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("voxel mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("voxel mesh bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(VIEWPORT_UBO_SIZE),
                },
                count: None,
            }],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("voxel mesh pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("voxel mesh pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Scenes cull on the CPU; screen winding is not meaningful here.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("voxel mesh viewport ubo"),
            size: VIEWPORT_UBO_SIZE.get(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("voxel mesh bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        log::debug!("mesh pipeline built for {:?}", ctx.surface_format);
        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group = Some(bind_group);
        self.viewport_ubo = Some(viewport_ubo);
    }

    fn write_viewport_uniform(&self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        let u = ViewportUniform {
            size: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
            _pad: [0.0; 2],
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn ensure_vbo_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(256);
        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("voxel mesh vbo"),
            size: (new_cap * size_of::<MeshVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
    }
}
