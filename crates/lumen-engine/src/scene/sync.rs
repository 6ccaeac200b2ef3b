use crate::coords::Camera;

use super::shapes::{Circle, Triangle};
use super::spectrum::DispersionSample;
use super::Material;

/// A GPU-visible change the renderer must apply before its next frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SyncRequest {
    Materials,
    Primitives,
    Dispersion,
    Camera,
    /// Clear the accumulated image and counter.
    ResetAccumulation,
}

impl SyncRequest {
    /// Drain order. Uploads come first so the reset sees the final state.
    pub const ORDER: [SyncRequest; 5] = [
        SyncRequest::Materials,
        SyncRequest::Primitives,
        SyncRequest::Dispersion,
        SyncRequest::Camera,
        SyncRequest::ResetAccumulation,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            SyncRequest::Materials => 1 << 0,
            SyncRequest::Primitives => 1 << 1,
            SyncRequest::Dispersion => 1 << 2,
            SyncRequest::Camera => 1 << 3,
            SyncRequest::ResetAccumulation => 1 << 4,
        }
    }
}

/// Coalescing queue of pending [`SyncRequest`]s.
///
/// Repeated requests within a frame collapse into one. Every upload request also
/// schedules an accumulation reset, since the accumulated image no longer matches the
/// scene.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SyncQueue {
    bits: u8,
}

impl SyncQueue {
    pub fn push(&mut self, req: SyncRequest) {
        self.bits |= req.bit() | SyncRequest::ResetAccumulation.bit();
    }

    pub fn contains(&self, req: SyncRequest) -> bool {
        self.bits & req.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns pending requests in [`SyncRequest::ORDER`] and empties the queue.
    pub fn drain(&mut self) -> impl Iterator<Item = SyncRequest> + use<> {
        let bits = std::mem::take(&mut self.bits);
        SyncRequest::ORDER
            .into_iter()
            .filter(move |req| bits & req.bit() != 0)
    }
}

/// Renderer capability the scene model drives.
///
/// Implementations may defer the actual GPU work to their next frame; the contract is
/// only that the next accumulation dispatch observes every call made before it.
pub trait SceneRenderer {
    fn upload_materials(&mut self, materials: &[Material]);

    /// Both partitions are in scene insertion order.
    fn upload_primitives(&mut self, circles: &[Circle], triangles: &[Triangle]);

    fn upload_dispersion(&mut self, samples: &[DispersionSample]);

    fn set_camera(&mut self, camera: &Camera);

    /// Zero the accumulated image and counter before the next dispatch.
    fn reset_accumulation(&mut self);
}
