/// Per-frame snapshot handed to the app.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Monotonic frame counter, starting at 0. Seeds the per-frame light samples.
    pub frame_index: u64,
}

/// Produces [`FrameTime`] snapshots.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock and returns the snapshot for the frame about to render.
    pub fn tick(&mut self) -> FrameTime {
        let ft = FrameTime { frame_index: self.frame_index };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}
