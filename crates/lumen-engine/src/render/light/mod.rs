//! Progressive 2D light-transport renderer.
//!
//! Each frame one compute dispatch traces a path per physical pixel and adds its
//! radiance into an accumulation buffer; a fullscreen pass then shows the running mean.
//! Surfaces whose buffer would exceed the device's storage binding limit are traced at
//! an integer fraction of their size and stretched on display.
//! Scene data arrives through [`SceneRenderer`] and is staged on the CPU until the next
//! [`LightRenderer::render`], which is the only place GPU buffers are written.

mod accumulation;
mod layout;

pub use accumulation::{AccumulationStep, Accumulator};
pub use layout::{sample_normalization, FrameUniform, GpuCircle, GpuMaterial, GpuSample, GpuTriangle};

use bytemuck::Pod;

use crate::coords::Camera;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::shapes::{Circle, Triangle};
use crate::scene::{DispersionSample, Material, SceneRenderer};

/// Must match `@workgroup_size` in `shaders/trace.wgsl`.
const WORKGROUP_SIZE: u32 = 16;

/// Bytes per accumulated pixel (`vec4<f32>`).
const ACCUM_TEXEL_BYTES: u64 = 16;

/// Light renderer settings.
#[derive(Debug, Clone)]
pub struct LightConfig {
    /// Path segments traced per pixel before the path is terminated.
    pub max_bounces: u32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self { max_bounces: 8 }
    }
}

pub struct LightRenderer {
    config: LightConfig,

    pipeline_format: Option<wgpu::TextureFormat>,
    trace_pipeline: Option<wgpu::ComputePipeline>,
    display_pipeline: Option<wgpu::RenderPipeline>,
    trace_bgl: Option<wgpu::BindGroupLayout>,
    display_bgl: Option<wgpu::BindGroupLayout>,

    trace_bind_group: Option<wgpu::BindGroup>,
    display_bind_group: Option<wgpu::BindGroup>,

    frame_ubo: Option<wgpu::Buffer>,
    accum: Option<wgpu::Buffer>,
    accum_size: [u32; 2],

    materials: StorageArray,
    circles: StorageArray,
    triangles: StorageArray,
    samples: StorageArray,

    frame: FrameUniform,
    accumulator: Accumulator,
}

impl Default for LightRenderer {
    fn default() -> Self {
        Self::new(LightConfig::default())
    }
}

impl LightRenderer {
    pub fn new(config: LightConfig) -> Self {
        let frame = FrameUniform {
            max_bounces: config.max_bounces,
            color_norm: [1.0; 4],
            ..FrameUniform::default()
        };
        Self {
            config,
            pipeline_format: None,
            trace_pipeline: None,
            display_pipeline: None,
            trace_bgl: None,
            display_bgl: None,
            trace_bind_group: None,
            display_bind_group: None,
            frame_ubo: None,
            accum: None,
            accum_size: [0, 0],
            materials: StorageArray::new::<GpuMaterial>("lumen materials"),
            circles: StorageArray::new::<GpuCircle>("lumen circles"),
            triangles: StorageArray::new::<GpuTriangle>("lumen triangles"),
            samples: StorageArray::new::<GpuSample>("lumen dispersion samples"),
            frame,
            accumulator: Accumulator::default(),
        }
    }

    pub fn config(&self) -> &LightConfig {
        &self.config
    }

    /// Dispatches accumulated so far.
    pub fn iterations(&self) -> u32 {
        self.accumulator.iterations()
    }

    /// Traces one sample per pixel into the accumulation buffer and draws the mean into
    /// `target`, overwriting it.
    ///
    /// Nothing is dispatched (and the counter does not move) if the surface has no area.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame_index: u64) {
        let (width, height) = ctx.surface_size;
        if width == 0 || height == 0 {
            return;
        }

        let limits = ctx.device.limits();
        let max_bytes = u64::from(limits.max_storage_buffer_binding_size).min(limits.max_buffer_size);
        let size = trace_size([width, height], max_bytes);

        self.ensure_pipelines(ctx);
        self.ensure_accumulation(ctx, size);
        self.flush_staged(ctx);
        self.ensure_bindings(ctx);

        let Some(trace_pipeline) = self.trace_pipeline.as_ref() else { return };
        let Some(display_pipeline) = self.display_pipeline.as_ref() else { return };
        let Some(trace_bind_group) = self.trace_bind_group.as_ref() else { return };
        let Some(display_bind_group) = self.display_bind_group.as_ref() else { return };
        let Some(frame_ubo) = self.frame_ubo.as_ref() else { return };
        let Some(accum) = self.accum.as_ref() else { return };

        let step = self.accumulator.advance();
        if step.clear {
            target.encoder.clear_buffer(accum, 0, None);
        }

        self.frame.image_size = size;
        self.frame.display_size = [width, height];
        self.frame.iterations = step.iterations;
        self.frame.seed = frame_seed(frame_index, step.iterations);
        ctx.queue.write_buffer(frame_ubo, 0, bytemuck::bytes_of(&self.frame));

        {
            let mut cpass = target.encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("lumen trace pass"),
                timestamp_writes: None,
            });
            cpass.set_pipeline(trace_pipeline);
            cpass.set_bind_group(0, trace_bind_group, &[]);
            cpass.dispatch_workgroups(
                size[0].div_ceil(WORKGROUP_SIZE),
                size[1].div_ceil(WORKGROUP_SIZE),
                1,
            );
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lumen display pass"),
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
        rpass.set_pipeline(display_pipeline);
        rpass.set_bind_group(0, display_bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format)
            && self.trace_pipeline.is_some()
            && self.display_pipeline.is_some()
        {
            return;
        }

        let trace_shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lumen trace shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/trace.wgsl").into()),
        });
        let display_shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lumen display shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/display.wgsl").into()),
        });

        let trace_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lumen trace bgl"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::COMPUTE),
                storage_entry(1, wgpu::ShaderStages::COMPUTE, true),
                storage_entry(2, wgpu::ShaderStages::COMPUTE, true),
                storage_entry(3, wgpu::ShaderStages::COMPUTE, true),
                storage_entry(4, wgpu::ShaderStages::COMPUTE, true),
                storage_entry(5, wgpu::ShaderStages::COMPUTE, false),
            ],
        });
        let display_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lumen display bgl"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::FRAGMENT),
                storage_entry(1, wgpu::ShaderStages::FRAGMENT, true),
            ],
        });

        let trace_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lumen trace pipeline layout"),
            bind_group_layouts: &[&trace_bgl],
            immediate_size: 0,
        });
        let display_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lumen display pipeline layout"),
            bind_group_layouts: &[&display_bgl],
            immediate_size: 0,
        });

        let trace_pipeline = ctx.device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("lumen trace pipeline"),
            layout: Some(&trace_layout),
            module: &trace_shader,
            entry_point: Some("trace_main"),
            compilation_options: Default::default(),
            cache: None,
        });

        let display_pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("lumen display pipeline"),
            layout: Some(&display_layout),
            vertex: wgpu::VertexState {
                module: &display_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &display_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
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

        log::debug!("light pipelines built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.trace_pipeline = Some(trace_pipeline);
        self.display_pipeline = Some(display_pipeline);
        self.trace_bgl = Some(trace_bgl);
        self.display_bgl = Some(display_bgl);
        self.invalidate_bindings();
    }

    fn ensure_accumulation(&mut self, ctx: &RenderCtx<'_>, size: [u32; 2]) {
        if self.accum.is_some() && self.accum_size == size {
            return;
        }

        let bytes = u64::from(size[0]) * u64::from(size[1]) * ACCUM_TEXEL_BYTES;
        self.accum = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen accumulation buffer"),
            size: bytes,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        log::debug!("accumulation buffer resized to {}x{}", size[0], size[1]);
        if size != [ctx.surface_size.0, ctx.surface_size.1] {
            log::info!(
                "tracing at {}x{} for a {}x{} surface",
                size[0],
                size[1],
                ctx.surface_size.0,
                ctx.surface_size.1
            );
        }

        self.accum_size = size;
        self.accumulator.reset();
        self.invalidate_bindings();
    }

    fn flush_staged(&mut self, ctx: &RenderCtx<'_>) {
        let mut reallocated = false;
        for array in [&mut self.materials, &mut self.circles, &mut self.triangles, &mut self.samples] {
            reallocated |= array.flush(ctx);
        }
        if reallocated {
            self.invalidate_bindings();
        }
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.trace_bind_group.is_some() && self.display_bind_group.is_some() {
            return;
        }
        let Some(trace_bgl) = self.trace_bgl.as_ref() else { return };
        let Some(display_bgl) = self.display_bgl.as_ref() else { return };
        let Some(accum) = self.accum.as_ref() else { return };
        let (Some(materials), Some(circles), Some(triangles), Some(samples)) = (
            self.materials.buffer.as_ref(),
            self.circles.buffer.as_ref(),
            self.triangles.buffer.as_ref(),
            self.samples.buffer.as_ref(),
        ) else {
            return;
        };

        let frame_ubo = self.frame_ubo.get_or_insert_with(|| {
            ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("lumen frame ubo"),
                size: std::mem::size_of::<FrameUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });

        self.trace_bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lumen trace bind group"),
            layout: trace_bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: frame_ubo.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: materials.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 2, resource: circles.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 3, resource: triangles.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 4, resource: samples.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 5, resource: accum.as_entire_binding() },
            ],
        }));
        self.display_bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lumen display bind group"),
            layout: display_bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: frame_ubo.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: accum.as_entire_binding() },
            ],
        }));
    }

    fn invalidate_bindings(&mut self) {
        self.trace_bind_group = None;
        self.display_bind_group = None;
    }
}

impl SceneRenderer for LightRenderer {
    fn upload_materials(&mut self, materials: &[Material]) {
        let records: Vec<GpuMaterial> = materials.iter().map(GpuMaterial::from).collect();
        self.materials.stage(&records);
    }

    fn upload_primitives(&mut self, circles: &[Circle], triangles: &[Triangle]) {
        let c: Vec<GpuCircle> = circles.iter().map(GpuCircle::from).collect();
        let t: Vec<GpuTriangle> = triangles.iter().map(GpuTriangle::from).collect();
        self.circles.stage(&c);
        self.triangles.stage(&t);
        self.frame.circle_count = c.len() as u32;
        self.frame.triangle_count = t.len() as u32;
    }

    fn upload_dispersion(&mut self, samples: &[DispersionSample]) {
        let records: Vec<GpuSample> = samples.iter().map(GpuSample::from).collect();
        self.samples.stage(&records);
        self.frame.sample_count = records.len() as u32;
        let [r, g, b] = sample_normalization(samples);
        self.frame.color_norm = [r, g, b, 1.0];
    }

    fn set_camera(&mut self, camera: &Camera) {
        self.frame.set_camera(camera);
    }

    fn reset_accumulation(&mut self) {
        self.accumulator.reset();
    }
}

/// A read-only storage buffer holding one array of fixed-size records.
///
/// Arrays are never bound empty: an empty upload writes one zeroed record, and the
/// shader relies on the counts in [`FrameUniform`] instead.
struct StorageArray {
    label: &'static str,
    record_size: usize,
    buffer: Option<wgpu::Buffer>,
    capacity: u64,
    pending: Option<Vec<u8>>,
}

impl StorageArray {
    fn new<T: Pod>(label: &'static str) -> Self {
        Self {
            label,
            record_size: std::mem::size_of::<T>(),
            buffer: None,
            capacity: 0,
            pending: None,
        }
    }

    fn stage<T: Pod>(&mut self, records: &[T]) {
        debug_assert_eq!(std::mem::size_of::<T>(), self.record_size);
        self.pending = Some(if records.is_empty() {
            vec![0u8; self.record_size]
        } else {
            bytemuck::cast_slice(records).to_vec()
        });
    }

    /// Writes pending bytes. Returns `true` if the buffer object was replaced.
    fn flush(&mut self, ctx: &RenderCtx<'_>) -> bool {
        if self.buffer.is_none() && self.pending.is_none() {
            self.pending = Some(vec![0u8; self.record_size]);
        }
        let Some(bytes) = self.pending.take() else { return false };

        let required = bytes.len() as u64;
        let reallocated = self.buffer.is_none() || required > self.capacity;
        if reallocated {
            let capacity = required.next_power_of_two().max(256);
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: capacity,
                usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = capacity;
        }

        if let Some(buffer) = self.buffer.as_ref() {
            ctx.queue.write_buffer(buffer, 0, &bytes);
        }
        reallocated
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<FrameUniform>() as u64),
        },
        count: None,
    }
}

fn storage_entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
    read_only: bool,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Largest image, in whole-pixel steps down from `surface`, whose accumulation buffer
/// fits in `max_bytes`.
fn trace_size(surface: [u32; 2], max_bytes: u64) -> [u32; 2] {
    let fits = |w: u32, h: u32| u64::from(w) * u64::from(h) * ACCUM_TEXEL_BYTES <= max_bytes;
    let [width, height] = surface;
    let mut divisor = 1;
    loop {
        let w = width.div_ceil(divisor);
        let h = height.div_ceil(divisor);
        if fits(w, h) || (w == 1 && h == 1) {
            return [w, h];
        }
        divisor += 1;
    }
}

/// Seed for the per-pixel generators; differs between consecutive dispatches.
fn frame_seed(frame_index: u64, iterations: u32) -> u32 {
    let folded = (frame_index ^ (frame_index >> 32)) as u32;
    folded.wrapping_mul(0x9E37_79B9) ^ iterations.wrapping_mul(0x85EB_CA6B)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rgb, Vec2};
    use crate::scene::{dispersion_samples, MaterialId};

    #[test]
    fn uploads_update_counts_and_normalization() {
        let mut r = LightRenderer::default();
        let m = MaterialId(0);
        r.upload_primitives(
            &[Circle::new(Vec2::zero(), 0.5, m), Circle::new(Vec2::new(1.0, 0.0), 0.2, m)],
            &[Triangle::new(Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), m)],
        );
        assert_eq!(r.frame.circle_count, 2);
        assert_eq!(r.frame.triangle_count, 1);

        r.upload_dispersion(&dispersion_samples(true));
        assert_eq!(r.frame.sample_count, 41);
        assert!(r.frame.color_norm[..3].iter().all(|k| *k > 0.0));

        r.upload_dispersion(&[DispersionSample { wavelength: 500.0, color: Rgb::white() }]);
        assert_eq!(r.frame.sample_count, 1);
        assert_eq!(r.frame.color_norm, [1.0; 4]);
    }

    #[test]
    fn camera_lands_in_frame_uniform() {
        let mut r = LightRenderer::default();
        r.set_camera(&Camera::new(Vec2::new(-2.0, -1.0), Vec2::new(2.0, 3.0)));
        assert_eq!(r.frame.camera_min, [-2.0, -1.0]);
        assert_eq!(r.frame.camera_max, [2.0, 3.0]);
    }

    #[test]
    fn reset_is_deferred_to_next_dispatch() {
        let mut r = LightRenderer::default();
        r.accumulator.advance();
        r.reset_accumulation();
        assert_eq!(r.iterations(), 0);
        assert!(r.accumulator.clear_pending());
    }

    #[test]
    fn empty_arrays_stage_one_zeroed_record() {
        let mut a = StorageArray::new::<GpuCircle>("test");
        a.stage::<GpuCircle>(&[]);
        assert_eq!(a.pending.as_deref(), Some(&[0u8; 16][..]));
    }

    #[test]
    fn max_bounces_comes_from_config() {
        let r = LightRenderer::new(LightConfig { max_bounces: 3 });
        assert_eq!(r.frame.max_bounces, 3);
        assert_eq!(r.config().max_bounces, 3);
    }

    #[test]
    fn trace_size_keeps_surfaces_that_fit() {
        let default_limit = 128 << 20;
        assert_eq!(trace_size([3840, 2160], default_limit), [3840, 2160]);
        assert_eq!(trace_size([1, 1], 16), [1, 1]);
    }

    #[test]
    fn trace_size_shrinks_past_the_binding_limit() {
        let default_limit: u64 = 128 << 20;
        // 8K needs about four times the limit; halving each side is enough.
        let [w, h] = trace_size([7680, 4320], default_limit);
        assert_eq!([w, h], [3840, 2160]);
        assert!(u64::from(w) * u64::from(h) * ACCUM_TEXEL_BYTES <= default_limit);

        // A tighter limit takes a larger divisor.
        assert_eq!(trace_size([7680, 4320], 100 << 20), [2560, 1440]);
    }

    #[test]
    fn trace_size_never_reaches_zero() {
        assert_eq!(trace_size([100, 50], 0), [1, 1]);
    }

    #[test]
    fn consecutive_seeds_differ() {
        assert_ne!(frame_seed(0, 1), frame_seed(1, 2));
        assert_ne!(frame_seed(7, 1), frame_seed(7, 2));
    }
}
