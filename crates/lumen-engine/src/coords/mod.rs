//! Coordinate and geometry types shared by the scene model and renderers.
//!
//! Spaces:
//! - Screen: logical pixels, origin bottom-left, +Y up (scene mapping)
//! - Window: logical pixels, origin top-left, +Y down (events, overlay drawing)
//! - World: the camera window, +Y up
//!
//! `Viewport::flip_y` converts between screen and window positions.

mod camera;
mod color;
mod rect;
mod vec2;
mod viewport;

pub use camera::Camera;
pub use color::{ColorRgba, Rgb};
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
