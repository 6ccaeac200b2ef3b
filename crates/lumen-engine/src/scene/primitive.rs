use crate::coords::{Rect, Vec2};

use super::shapes::{Circle, Triangle};
use super::MaterialId;

/// Closed set of scene primitives.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here and extend every `match` below
/// - add a matching fixed-size GPU record under `render::light::layout`
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Primitive {
    Circle(Circle),
    Triangle(Triangle),
}

impl Primitive {
    /// World-space bounding box.
    pub fn aabb(&self) -> Rect {
        match self {
            Primitive::Circle(c) => c.aabb(),
            Primitive::Triangle(t) => t.aabb(),
        }
    }

    pub fn material(&self) -> MaterialId {
        match self {
            Primitive::Circle(c) => c.material,
            Primitive::Triangle(t) => t.material,
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Primitive::Circle(c) => c.translate(delta),
            Primitive::Triangle(t) => t.translate(delta),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        match self {
            Primitive::Circle(c) => c.contains(p),
            Primitive::Triangle(t) => t.contains(p),
        }
    }
}

impl From<Circle> for Primitive {
    fn from(c: Circle) -> Self {
        Primitive::Circle(c)
    }
}

impl From<Triangle> for Primitive {
    fn from(t: Triangle) -> Self {
        Primitive::Triangle(t)
    }
}

/// Splits primitives into per-variant sequences, keeping insertion order within each.
///
/// The GPU side stores each variant in its own fixed-layout array.
pub fn partition(primitives: &[Primitive]) -> (Vec<Circle>, Vec<Triangle>) {
    let mut circles = Vec::new();
    let mut triangles = Vec::new();
    for p in primitives {
        match p {
            Primitive::Circle(c) => circles.push(*c),
            Primitive::Triangle(t) => triangles.push(*t),
        }
    }
    (circles, triangles)
}
