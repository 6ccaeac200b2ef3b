//! Contract between the runtime loop and the application.
//!
//! The application never sees the event loop; it gets one [`FrameCtx`] per frame with
//! everything needed to read input and render.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
