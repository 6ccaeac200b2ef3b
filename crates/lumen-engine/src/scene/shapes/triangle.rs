use crate::coords::{Rect, Vec2};
use crate::scene::MaterialId;

/// Triangle primitive in world units.
///
/// Invariant: vertices are stored clockwise (+Y up). The order is fixed in
/// [`Triangle::new`] and only translation touches the vertices afterwards, so the
/// inside test does not depend on how the caller ordered its input.
///
/// Fields are read-only outside the scene module to keep the winding intact.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    v0: Vec2,
    v1: Vec2,
    v2: Vec2,
    pub material: MaterialId,
}

impl Triangle {
    pub fn new(v0: Vec2, v1: Vec2, v2: Vec2, material: MaterialId) -> Self {
        // v2 on the right of v0→v1 means the input is already clockwise.
        let normal_01 = (v1 - v0).perp();
        let (v1, v2) = if normal_01.dot(v2 - v0) < 0.0 { (v1, v2) } else { (v2, v1) };
        Self { v0, v1, v2, material }
    }

    #[inline]
    pub fn vertices(&self) -> [Vec2; 3] {
        [self.v0, self.v1, self.v2]
    }

    #[inline]
    pub fn aabb(&self) -> Rect {
        let min = self.v0.min(self.v1).min(self.v2);
        let max = self.v0.max(self.v1).max(self.v2);
        Rect::from_corners(min, max)
    }

    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.v0 += delta;
        self.v1 += delta;
        self.v2 += delta;
    }

    /// Edge half-plane test against the clockwise winding. Edges are inclusive.
    pub fn contains(&self, p: Vec2) -> bool {
        let edges = [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)];
        edges
            .iter()
            .all(|&(a, b)| (p - a).dot((b - a).perp()) <= 0.0)
    }
}
