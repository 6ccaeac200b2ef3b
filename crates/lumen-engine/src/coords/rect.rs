use super::Vec2;

/// Axis-aligned rectangle (`origin` is the minimum corner).
///
/// The origin convention depends on the space the rect lives in: scene output uses a
/// bottom-left origin, the overlay renderer expects top-left.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Builds the rect spanning two corners, in any order.
    #[inline]
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::from_origin_size(min, max - min)
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Mirrors the rect vertically inside a space of the given height.
    ///
    /// Converts between bottom-left and top-left origin conventions; applying it
    /// twice is the identity.
    #[inline]
    pub fn flip_y(self, height: f32) -> Self {
        Rect::new(
            self.origin.x,
            height - self.origin.y - self.size.y,
            self.size.x,
            self.size.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── from_corners ──────────────────────────────────────────────────────

    #[test]
    fn from_corners_orders_components() {
        let rect = Rect::from_corners(Vec2::new(10.0, 2.0), Vec2::new(4.0, 8.0));
        assert_eq!(rect, r(4.0, 2.0, 6.0, 6.0));
    }

    #[test]
    fn from_corners_of_one_point_has_no_size() {
        let p = Vec2::new(3.0, 3.0);
        assert_eq!(Rect::from_corners(p, p), r(3.0, 3.0, 0.0, 0.0));
    }

    // ── flip_y ────────────────────────────────────────────────────────────

    #[test]
    fn flip_y_moves_bottom_band_to_top() {
        let rect = r(5.0, 0.0, 20.0, 10.0);
        assert_eq!(rect.flip_y(100.0), r(5.0, 90.0, 20.0, 10.0));
    }

    #[test]
    fn flip_y_twice_is_identity() {
        let rect = r(1.0, 7.0, 3.0, 4.0);
        assert_eq!(rect.flip_y(50.0).flip_y(50.0), rect);
    }

    #[test]
    fn center_is_midpoint() {
        assert_eq!(r(2.0, 4.0, 6.0, 8.0).center(), Vec2::new(5.0, 8.0));
    }
}
