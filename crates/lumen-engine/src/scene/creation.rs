use crate::coords::Vec2;

/// Which primitive the next pointer clicks are building, if any.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum CreationMode {
    #[default]
    Idle,
    Circle,
    Triangle,
}

impl CreationMode {
    /// Points needed to finish the shape: circle = centre + rim, triangle = vertices.
    pub fn required_points(self) -> usize {
        match self {
            CreationMode::Idle => 0,
            CreationMode::Circle => 2,
            CreationMode::Triangle => 3,
        }
    }
}

/// Geometry collected by a finished creation gesture. Material assignment happens in
/// the scene model.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ShapeDraft {
    Circle { center: Vec2, rim: Vec2 },
    Triangle([Vec2; 3]),
}

/// Outcome of feeding one point to the creation state machine.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CreationStep {
    /// Not creating anything; the point was not consumed.
    Ignored,
    /// Point stored; more are needed.
    Pending,
    /// Last point stored; the state machine is back to idle.
    Complete(ShapeDraft),
}

/// Creation state machine: a mode plus the world-space points collected so far.
///
/// Invariant: `points.len() < mode.required_points()` between calls, and `points` is
/// empty whenever the mode is idle.
#[derive(Debug, Clone, Default)]
pub struct Creation {
    mode: CreationMode,
    points: Vec<Vec2>,
}

impl Creation {
    pub fn mode(&self) -> CreationMode {
        self.mode
    }

    /// World-space points collected for the shape in progress.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn is_active(&self) -> bool {
        self.mode != CreationMode::Idle
    }

    /// Enters `mode`, dropping any partially collected shape.
    pub fn start(&mut self, mode: CreationMode) {
        self.mode = mode;
        self.points.clear();
    }

    pub fn abort(&mut self) {
        self.start(CreationMode::Idle);
    }

    pub fn push(&mut self, world: Vec2) -> CreationStep {
        if !self.is_active() {
            return CreationStep::Ignored;
        }

        self.points.push(world);
        if self.points.len() < self.mode.required_points() {
            return CreationStep::Pending;
        }

        let draft = match (self.mode, self.points.as_slice()) {
            (CreationMode::Circle, &[center, rim]) => ShapeDraft::Circle { center, rim },
            (CreationMode::Triangle, &[a, b, c]) => ShapeDraft::Triangle([a, b, c]),
            // Unreachable while the length invariant holds; reset rather than panic.
            _ => {
                log::warn!("creation state out of sync ({:?}, {} points)", self.mode, self.points.len());
                self.abort();
                return CreationStep::Ignored;
            }
        };

        self.abort();
        CreationStep::Complete(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32) -> Vec2 { Vec2::new(x, x) }

    #[test]
    fn idle_ignores_points() {
        let mut c = Creation::default();
        assert_eq!(c.push(p(1.0)), CreationStep::Ignored);
        assert!(c.points().is_empty());
        assert_eq!(c.mode(), CreationMode::Idle);
    }

    #[test]
    fn circle_needs_two_points() {
        let mut c = Creation::default();
        c.start(CreationMode::Circle);
        assert_eq!(c.push(p(0.0)), CreationStep::Pending);
        assert_eq!(c.points(), &[p(0.0)]);
        assert_eq!(
            c.push(p(1.0)),
            CreationStep::Complete(ShapeDraft::Circle { center: p(0.0), rim: p(1.0) })
        );
        assert_eq!(c.mode(), CreationMode::Idle);
        assert!(c.points().is_empty());
    }

    #[test]
    fn triangle_needs_three_points() {
        let mut c = Creation::default();
        c.start(CreationMode::Triangle);
        assert_eq!(c.push(p(0.0)), CreationStep::Pending);
        assert_eq!(c.push(p(1.0)), CreationStep::Pending);
        assert_eq!(
            c.push(p(2.0)),
            CreationStep::Complete(ShapeDraft::Triangle([p(0.0), p(1.0), p(2.0)]))
        );
        assert!(!c.is_active());
    }

    #[test]
    fn switching_mode_drops_pending_points() {
        let mut c = Creation::default();
        c.start(CreationMode::Triangle);
        c.push(p(0.0));
        c.push(p(1.0));
        c.start(CreationMode::Circle);
        assert!(c.points().is_empty());
        assert_eq!(c.push(p(5.0)), CreationStep::Pending);
    }

    #[test]
    fn abort_returns_to_idle() {
        let mut c = Creation::default();
        c.start(CreationMode::Circle);
        c.push(p(0.0));
        c.abort();
        assert_eq!(c.mode(), CreationMode::Idle);
        assert!(c.points().is_empty());
        assert_eq!(c.push(p(1.0)), CreationStep::Ignored);
    }
}
