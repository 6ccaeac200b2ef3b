//! Fixed-size GPU records for the light-transport buffers.
//!
//! Layouts must match the structs in `shaders/trace.wgsl` byte for byte.

use bytemuck::{Pod, Zeroable};

use crate::coords::Camera;
use crate::scene::shapes::{Circle, Triangle};
use crate::scene::{DispersionSample, Material};

/// Circle record (16 bytes):
///
///  offset  0  center       [f32; 2]
///  offset  8  radius       f32
///  offset 12  material_id  u32
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuCircle {
    pub center: [f32; 2],
    pub radius: f32,
    pub material_id: u32,
}

impl From<&Circle> for GpuCircle {
    fn from(c: &Circle) -> Self {
        Self {
            center: c.center.to_array(),
            radius: c.radius,
            material_id: c.material.0,
        }
    }
}

/// Triangle record (32 bytes), vertices in stored (clockwise) order:
///
///  offset  0  v0           [f32; 2]
///  offset  8  v1           [f32; 2]
///  offset 16  v2           [f32; 2]
///  offset 24  material_id  u32
///  offset 28  _pad         u32
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuTriangle {
    pub v0: [f32; 2],
    pub v1: [f32; 2],
    pub v2: [f32; 2],
    pub material_id: u32,
    pub _pad: u32,
}

impl From<&Triangle> for GpuTriangle {
    fn from(t: &Triangle) -> Self {
        let [v0, v1, v2] = t.vertices();
        Self {
            v0: v0.to_array(),
            v1: v1.to_array(),
            v2: v2.to_array(),
            material_id: t.material.0,
            _pad: 0,
        }
    }
}

/// Material record (64 bytes). WGSL `vec3<f32>` is 16-byte aligned, hence the pads.
///
///  offset  0  weights         [f32; 4]  (emissive, reflective, refractive, diffuse)
///  offset 16  emission_color  [f32; 3] + pad
///  offset 32  diffuse_color   [f32; 3] + pad
///  offset 48  eta             [f32; 3] + pad
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuMaterial {
    pub weights: [f32; 4],
    pub emission_color: [f32; 3],
    pub _pad0: f32,
    pub diffuse_color: [f32; 3],
    pub _pad1: f32,
    pub eta: [f32; 3],
    pub _pad2: f32,
}

impl From<&Material> for GpuMaterial {
    fn from(m: &Material) -> Self {
        Self {
            weights: [m.emissive, m.reflective, m.refractive, m.diffuse],
            emission_color: m.emission_color.to_array(),
            _pad0: 0.0,
            diffuse_color: m.diffuse_color.to_array(),
            _pad1: 0.0,
            eta: m.eta,
            _pad2: 0.0,
        }
    }
}

/// Dispersion sample (16 bytes): `x` = wavelength (nm), `yzw` = colour.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuSample {
    pub data: [f32; 4],
}

impl From<&DispersionSample> for GpuSample {
    fn from(s: &DispersionSample) -> Self {
        Self { data: [s.wavelength, s.color.r, s.color.g, s.color.b] }
    }
}

/// Per-frame uniform shared by the trace and display passes (80 bytes):
///
///  offset  0  camera_min      [f32; 2]
///  offset  8  camera_max      [f32; 2]
///  offset 16  image_size      [u32; 2]  (traced pixels)
///  offset 24  seed            u32
///  offset 28  iterations      u32       (including the current dispatch)
///  offset 32  circle_count    u32
///  offset 36  triangle_count  u32
///  offset 40  sample_count    u32
///  offset 44  max_bounces     u32
///  offset 48  color_norm      [f32; 4]  (xyz used)
///  offset 64  display_size    [u32; 2]  (surface pixels)
///  offset 72  _pad            [u32; 2]
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    pub camera_min: [f32; 2],
    pub camera_max: [f32; 2],
    pub image_size: [u32; 2],
    pub seed: u32,
    pub iterations: u32,
    pub circle_count: u32,
    pub triangle_count: u32,
    pub sample_count: u32,
    pub max_bounces: u32,
    pub color_norm: [f32; 4],
    pub display_size: [u32; 2],
    pub _pad: [u32; 2],
}

impl FrameUniform {
    pub fn set_camera(&mut self, camera: &Camera) {
        self.camera_min = camera.min.to_array();
        self.camera_max = camera.max.to_array();
    }
}

/// Per-channel factor that makes a uniformly picked sample average to white.
///
/// Channels no sample contributes to are left at 1.
pub fn sample_normalization(samples: &[DispersionSample]) -> [f32; 3] {
    if samples.is_empty() {
        return [1.0; 3];
    }
    let n = samples.len() as f32;
    let mut sum = [0.0_f32; 3];
    for s in samples {
        for (acc, v) in sum.iter_mut().zip(s.color.to_array()) {
            *acc += v;
        }
    }
    sum.map(|total| if total > 0.0 { n / total } else { 1.0 })
}
