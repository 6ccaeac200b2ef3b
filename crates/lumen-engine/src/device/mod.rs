//! GPU device + surface management.
//!
//! - [`Gpu`] owns the wgpu instance/adapter/device/queue and the window surface
//! - [`GpuFrame`] is one acquired swapchain image plus its command encoder
//! - surface errors are mapped to a [`SurfaceErrorAction`] for the runtime

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
