//! Lumen engine crate.
//!
//! Scene model and editing logic ([`scene`], [`coords`]) are plain Rust and GPU-free.
//! The platform and GPU runtime ([`window`], [`device`], [`render`]) drive them.

pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;
