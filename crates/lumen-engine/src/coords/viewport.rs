use super::Vec2;

/// Viewport size in logical pixels.
///
/// This is the basis for screen ↔ world mapping on the CPU. Renderers receive the same
/// value through `RenderCtx` so hit-testing and drawing agree.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Converts a top-left origin position (window events) to the bottom-left origin
    /// used by the scene mapping, or back.
    #[inline]
    pub fn flip_y(self, p: Vec2) -> Vec2 {
        Vec2::new(p.x, self.height - p.y)
    }
}
