//! GPU rendering subsystem.
//!
//! - [`light`] traces the scene progressively and draws the running mean
//! - [`overlay`] draws editor marks on top, in logical pixels (top-left origin)
//!
//! Each renderer owns its GPU resources and builds them lazily on first use.

mod common;
mod ctx;

pub mod light;
pub mod overlay;

pub use ctx::{RenderCtx, RenderTarget};
pub use light::{LightConfig, LightRenderer};
pub use overlay::{OverlayList, OverlayRenderer, OverlayStyle};
