/// One acquired swapchain image.
///
/// Short-lived: the surface texture blocks acquisition of the next frame until it is
/// submitted through [`super::Gpu::submit`].
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
