//! Input subsystem.
//!
//! Public types are platform-agnostic; [`translate`] is the only place that sees winit.
//! Pointer positions are logical pixels with a top-left origin, as the window reports
//! them. Consumers flip to a bottom-left origin themselves where needed.

mod frame;
mod state;
mod types;

pub(crate) mod translate;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, MouseButton, MouseButtonState, MouseWheelDelta};
