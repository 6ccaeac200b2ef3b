//! Scene model: primitives, materials, picking, creation and renderer sync.
//!
//! Responsibilities:
//! - own the authoritative CPU-side scene (primitives + material arena)
//! - map pointer input through the camera and apply edits
//! - record which GPU-visible state changed, for the renderer to pick up once per frame
//!
//! Nothing here touches wgpu; the renderer is reached through [`SceneRenderer`].

mod creation;
mod material;
mod model;
mod primitive;
mod spectrum;
mod sync;

pub mod shapes;

pub use creation::{Creation, CreationMode, CreationStep, ShapeDraft};
pub use material::{Material, MaterialId};
pub use model::SceneModel;
pub use primitive::{partition, Primitive};
pub use spectrum::{
    dispersion_samples, wavelength_to_color, DispersionSample, DISPERSION_SAMPLES,
    DISPERSION_START, DISPERSION_STEP, MONOCHROME_WAVELENGTH,
};
pub use sync::{SceneRenderer, SyncQueue, SyncRequest};
