use super::{Vec2, Viewport};

/// World-space window mapped onto the viewport.
///
/// Invariant: `min.x < max.x` and `min.y < max.y`. Panning preserves it and zooming
/// preserves it for positive scale factors.
///
/// Screen positions use a bottom-left origin; window events must be flipped with
/// [`Viewport::flip_y`] before they reach the camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::splat(-1.0), Vec2::splat(1.0))
    }
}

impl Camera {
    #[inline]
    pub fn new(min: Vec2, max: Vec2) -> Self {
        debug_assert!(min.x < max.x && min.y < max.y, "camera window must be non-empty");
        Self { min, max }
    }

    /// World-space size of the window.
    #[inline]
    pub fn extent(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn screen_to_world(&self, screen: Vec2, viewport: Viewport) -> Vec2 {
        screen / viewport.size() * self.extent() + self.min
    }

    pub fn world_to_screen(&self, world: Vec2, viewport: Viewport) -> Vec2 {
        (world - self.min) * viewport.size() / self.extent()
    }

    /// Converts a screen-space displacement to world units.
    ///
    /// Mapping the delta as a point would add `min` to it.
    pub fn screen_delta_to_world(&self, delta: Vec2, viewport: Viewport) -> Vec2 {
        self.screen_to_world(delta, viewport) - self.screen_to_world(Vec2::zero(), viewport)
    }

    /// Drags the view: content follows `delta` (world units), so the window moves the
    /// opposite way.
    pub fn pan(&mut self, delta: Vec2) {
        self.min -= delta;
        self.max -= delta;
    }

    /// Scales the window about its centre. `< 1` zooms in, `> 1` zooms out.
    pub fn zoom(&mut self, scale: f32) {
        debug_assert!(scale > 0.0, "zoom scale must be positive, got {scale}");
        let center = self.center();
        self.min = center + (self.min - center) * scale;
        self.max = center + (self.max - center) * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const VP: Viewport = Viewport::new(1024.0, 1024.0);

    fn assert_vec_close(a: Vec2, b: Vec2) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-4);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-4);
    }

    // ── mapping ───────────────────────────────────────────────────────────

    #[test]
    fn viewport_center_maps_to_world_origin() {
        let cam = Camera::default();
        assert_vec_close(cam.screen_to_world(Vec2::new(512.0, 512.0), VP), Vec2::zero());
    }

    #[test]
    fn viewport_corners_map_to_camera_corners() {
        let cam = Camera::new(Vec2::new(-3.0, 1.0), Vec2::new(5.0, 2.0));
        let vp = Viewport::new(800.0, 600.0);
        assert_vec_close(cam.screen_to_world(Vec2::zero(), vp), cam.min);
        assert_vec_close(cam.screen_to_world(vp.size(), vp), cam.max);
    }

    #[test]
    fn world_to_screen_inverts_screen_to_world() {
        let cams = [
            Camera::default(),
            Camera::new(Vec2::new(-10.0, 3.5), Vec2::new(-2.0, 4.0)),
            Camera::new(Vec2::new(0.001, -1000.0), Vec2::new(0.002, 1000.0)),
        ];
        let vp = Viewport::new(1280.0, 720.0);
        let points = [
            Vec2::zero(),
            Vec2::new(0.5, -0.25),
            Vec2::new(-7.0, 3.75),
            Vec2::new(123.0, -456.0),
        ];

        for cam in cams {
            for p in points {
                let back = cam.screen_to_world(cam.world_to_screen(p, vp), vp);
                let tol = 1e-4 * (1.0 + p.x.abs().max(p.y.abs()));
                assert_abs_diff_eq!(back.x, p.x, epsilon = tol);
                assert_abs_diff_eq!(back.y, p.y, epsilon = tol);
            }
        }
    }

    #[test]
    fn screen_delta_ignores_origin_offset() {
        let cam = Camera::new(Vec2::new(4.0, 4.0), Vec2::new(6.0, 6.0));
        let d = cam.screen_delta_to_world(Vec2::new(512.0, 0.0), VP);
        assert_vec_close(d, Vec2::new(1.0, 0.0));
    }

    // ── pan / zoom ────────────────────────────────────────────────────────

    #[test]
    fn pan_moves_window_opposite_to_delta() {
        let mut cam = Camera::default();
        cam.pan(Vec2::new(0.5, -0.25));
        assert_vec_close(cam.min, Vec2::new(-1.5, -0.75));
        assert_vec_close(cam.max, Vec2::new(0.5, 1.25));
        assert_vec_close(cam.extent(), Vec2::splat(2.0));
    }

    #[test]
    fn zoom_scales_about_center() {
        let mut cam = Camera::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 2.0));
        cam.zoom(0.5);
        assert_vec_close(cam.min, Vec2::new(1.0, 0.5));
        assert_vec_close(cam.max, Vec2::new(3.0, 1.5));
        assert_vec_close(cam.center(), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn zoom_then_inverse_restores_window() {
        let original = Camera::new(Vec2::new(-2.0, 0.5), Vec2::new(7.0, 3.0));
        for scale in [0.88_f32, 1.12, 0.1, 3.0] {
            let mut cam = original;
            cam.zoom(scale);
            cam.zoom(1.0 / scale);
            assert_vec_close(cam.min, original.min);
            assert_vec_close(cam.max, original.max);
        }
    }
}
