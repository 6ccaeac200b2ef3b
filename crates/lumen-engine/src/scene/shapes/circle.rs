use crate::coords::{Rect, Vec2};
use crate::scene::MaterialId;

/// Circle primitive in world units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    /// Non-negative. Zero is accepted and yields a single-point circle.
    pub radius: f32,
    pub material: MaterialId,
}

impl Circle {
    #[inline]
    pub fn new(center: Vec2, radius: f32, material: MaterialId) -> Self {
        debug_assert!(radius >= 0.0, "circle radius must be non-negative");
        Self { center, radius, material }
    }

    /// Circle centred at `center` passing through `rim`.
    #[inline]
    pub fn through(center: Vec2, rim: Vec2, material: MaterialId) -> Self {
        Self::new(center, (rim - center).length(), material)
    }

    #[inline]
    pub fn aabb(&self) -> Rect {
        let r = Vec2::splat(self.radius);
        Rect::from_corners(self.center - r, self.center + r)
    }

    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Boundary inclusive.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        (p - self.center).length_squared() <= self.radius * self.radius
    }
}
