//! Editor overlay: selection outline and pending creation points.
//!
//! Geometry is in logical pixels with a top-left origin, like window input.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::{ColorRgba, Rect, Vec2};
use crate::render::{RenderCtx, RenderTarget};

use super::common::{
    premul_alpha_blend, QuadVertex, ViewportUniform, QUAD_INDICES, QUAD_VERTICES,
};

/// Overlay appearance.
#[derive(Debug, Clone)]
pub struct OverlayStyle {
    /// Diameter of creation-point markers, logical px.
    pub marker_size: f32,
    pub marker_color: ColorRgba,
    /// Selection outline stroke, logical px.
    pub outline_width: f32,
    pub outline_color: ColorRgba,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            marker_size: 10.0,
            marker_color: ColorRgba::new(1.0, 1.0, 1.0, 0.9),
            outline_width: 1.5,
            outline_color: ColorRgba::new(1.0, 1.0, 1.0, 0.8),
        }
    }
}

/// Shape kinds understood by `shaders/overlay.wgsl`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum MarkKind {
    Outline = 0,
    Dot = 1,
}

/// CPU-side list of overlay marks for one frame.
#[derive(Debug, Default)]
pub struct OverlayList {
    instances: Vec<OverlayInstance>,
}

impl OverlayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Stroked rectangle; the stroke lies inside `rect`.
    ///
    /// Sides thinner than two strokes are widened about the centre, so a point or a
    /// line still shows a small box.
    pub fn push_outline(&mut self, rect: Rect, width: f32, color: ColorRgba) {
        if !rect.is_finite() || width <= 0.0 {
            return;
        }
        let size = rect.size.max(Vec2::splat(2.0 * width));
        let origin = rect.center() - size * 0.5;
        self.instances.push(OverlayInstance {
            origin: origin.to_array(),
            size: size.to_array(),
            color: color.premultiplied(),
            params: [MarkKind::Outline as u32 as f32, width, 0.0, 0.0],
        });
    }

    /// Filled disc centred on `center`.
    pub fn push_dot(&mut self, center: Vec2, diameter: f32, color: ColorRgba) {
        if diameter <= 0.0 || !center.is_finite() {
            return;
        }
        let half = Vec2::splat(diameter * 0.5);
        self.instances.push(OverlayInstance {
            origin: (center - half).to_array(),
            size: [diameter, diameter],
            color: color.premultiplied(),
            params: [MarkKind::Dot as u32 as f32, 0.0, 0.0, 0.0],
        });
    }
}

/// Instanced quad renderer for [`OverlayList`].
#[derive(Default)]
pub struct OverlayRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `list` over the current contents of `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, list: &OverlayList) {
        if list.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        self.ensure_instance_capacity(ctx, list.len());

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(viewport_ubo) = self.viewport_ubo.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };
        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };

        ctx.queue.write_buffer(
            viewport_ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)),
        );
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&list.instances));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lumen overlay pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..list.len() as u32);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lumen overlay shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/overlay.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("lumen overlay bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: ViewportUniform::min_binding_size(),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("lumen overlay pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("lumen overlay pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), OverlayInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
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
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen overlay viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lumen overlay bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lumen overlay quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lumen overlay quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(16);
        let new_size = (new_cap * std::mem::size_of::<OverlayInstance>()) as u64;
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen overlay instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  origin  [f32; 2]  loc 1  (top-left, logical px)
///  offset  8  size    [f32; 2]  loc 2
///  offset 16  color   [f32; 4]  loc 3  (premultiplied)
///  offset 32  params  [f32; 4]  loc 4  (.x = kind, .y = stroke width)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct OverlayInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
    params: [f32; 4],
}

impl OverlayInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4, // color
        4 => Float32x4  // params
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OverlayInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
