use crate::coords::{Camera, Rect, Vec2, Viewport};

use super::creation::{Creation, CreationMode, CreationStep, ShapeDraft};
use super::primitive::{partition, Primitive};
use super::shapes::{Circle, Triangle};
use super::spectrum::{dispersion_samples, DispersionSample};
use super::sync::{SceneRenderer, SyncQueue, SyncRequest};
use super::{Material, MaterialId};

/// Viewport assumed until the host reports the real window size.
const DEFAULT_VIEWPORT: Viewport = Viewport::new(1024.0, 1024.0);

/// Authoritative editor state: primitives, material arena, camera, creation and
/// selection state, dispersion samples, and the pending GPU sync requests.
///
/// All screen positions are logical pixels with a bottom-left origin, mapped through
/// the current camera and viewport.
///
/// Every operation is total. Calls that need a selection or an active creation mode
/// do nothing when there is none.
#[derive(Debug, Clone)]
pub struct SceneModel {
    primitives: Vec<Primitive>,
    materials: Vec<Material>,
    camera: Camera,
    viewport: Viewport,

    creation: Creation,
    /// Index into `primitives`. Invalidated by deletion, so deletion clears it.
    selected: Option<usize>,

    dispersion: bool,
    samples: Vec<DispersionSample>,

    sync: SyncQueue,
}

impl Default for SceneModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneModel {
    /// Starter scene: two diffuse circles on top, two lights below, one triangle.
    pub fn new() -> Self {
        let mut scene = Self::empty();

        let red = scene.push_material(Material {
            eta: [1.0, 8000.0, 10000.0],
            ..Material::default()
        });
        let light = scene.push_material(Material::light());

        for (center, material) in [
            (Vec2::new(-0.5, 0.5), red),
            (Vec2::new(0.5, 0.5), red),
            (Vec2::new(-0.5, -0.5), light),
            (Vec2::new(0.5, -0.5), light),
        ] {
            scene.push_primitive(Circle::new(center, 0.3, material));
        }
        scene.push_primitive(Triangle::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.5, 0.5),
            Vec2::new(1.0, 0.0),
            red,
        ));

        scene
    }

    /// Scene with no primitives or materials, default camera, dispersion off.
    pub fn empty() -> Self {
        Self {
            primitives: Vec::new(),
            materials: Vec::new(),
            camera: Camera::default(),
            viewport: DEFAULT_VIEWPORT,
            creation: Creation::default(),
            selected: None,
            dispersion: false,
            samples: dispersion_samples(false),
            sync: SyncQueue::default(),
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn creation_mode(&self) -> CreationMode {
        self.creation.mode()
    }

    /// Pending creation points in world space.
    pub fn pending_points(&self) -> &[Vec2] {
        self.creation.points()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn dispersion(&self) -> bool {
        self.dispersion
    }

    pub fn dispersion_samples(&self) -> &[DispersionSample] {
        &self.samples
    }

    /// Requests not yet flushed to a renderer.
    pub fn pending_sync(&self) -> SyncQueue {
        self.sync
    }

    // ── building ──────────────────────────────────────────────────────────

    /// Appends a material and returns its stable id.
    pub fn push_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(material);
        self.sync.push(SyncRequest::Materials);
        id
    }

    /// Appends a primitive and returns its index.
    ///
    /// The primitive's material must already exist in the arena.
    pub fn push_primitive(&mut self, primitive: impl Into<Primitive>) -> usize {
        let primitive = primitive.into();
        debug_assert!(
            primitive.material().index() < self.materials.len(),
            "primitive references unknown material {:?}",
            primitive.material()
        );
        self.primitives.push(primitive);
        self.sync.push(SyncRequest::Primitives);
        self.primitives.len() - 1
    }

    // ── coordinate mapping ────────────────────────────────────────────────

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.camera.screen_to_world(screen, self.viewport)
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.camera.world_to_screen(world, self.viewport)
    }

    /// Updates the viewport used for mapping. A size change invalidates the
    /// accumulated image.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport || !viewport.is_valid() {
            return;
        }
        self.viewport = viewport;
        self.sync.push(SyncRequest::ResetAccumulation);
    }

    // ── creation ──────────────────────────────────────────────────────────

    pub fn start_circle(&mut self) {
        self.start_creation(CreationMode::Circle);
    }

    pub fn start_triangle(&mut self) {
        self.start_creation(CreationMode::Triangle);
    }

    fn start_creation(&mut self, mode: CreationMode) {
        log::debug!("start creating {mode:?}");
        self.selected = None;
        self.creation.start(mode);
    }

    pub fn abort_creation(&mut self) {
        self.creation.abort();
    }

    /// Feeds a click to the creation state machine.
    ///
    /// Returns `false` when no creation is in progress, so the caller can fall back to
    /// selection. The final point builds the primitive with a fresh default material.
    pub fn add_primitive_point(&mut self, screen: Vec2) -> bool {
        let world = self.screen_to_world(screen);
        match self.creation.push(world) {
            CreationStep::Ignored => false,
            CreationStep::Pending => true,
            CreationStep::Complete(draft) => {
                let material = self.push_material(Material::default());
                let index = match draft {
                    ShapeDraft::Circle { center, rim } => {
                        self.push_primitive(Circle::through(center, rim, material))
                    }
                    ShapeDraft::Triangle([a, b, c]) => {
                        self.push_primitive(Triangle::new(a, b, c, material))
                    }
                };
                log::debug!("created primitive #{index} with material {material:?}");
                true
            }
        }
    }

    /// Pending creation points mapped to screen space, for click markers.
    pub fn pending_points_in_screen(&self) -> Vec<Vec2> {
        self.creation
            .points()
            .iter()
            .map(|&p| self.world_to_screen(p))
            .collect()
    }

    // ── selection ─────────────────────────────────────────────────────────

    /// Index of the first primitive containing `world`.
    ///
    /// Lowest index wins, so earlier primitives shadow later ones for picking.
    pub fn primitive_at(&self, world: Vec2) -> Option<usize> {
        self.primitives.iter().position(|p| p.contains(world))
    }

    /// Selects the primitive under `screen`, or clears the selection.
    pub fn select_primitive(&mut self, screen: Vec2) -> bool {
        self.selected = self.primitive_at(self.screen_to_world(screen));
        log::debug!("selection -> {:?}", self.selected);
        self.selected.is_some()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn selected_primitive(&self) -> Option<&Primitive> {
        self.selected.and_then(|i| self.primitives.get(i))
    }

    /// Bounding box of the selection in screen space (bottom-left origin).
    pub fn selected_bounds_in_screen(&self) -> Option<Rect> {
        let aabb = self.selected_primitive()?.aabb();
        Some(Rect::from_corners(
            self.world_to_screen(aabb.min()),
            self.world_to_screen(aabb.max()),
        ))
    }

    pub fn delete_selected(&mut self) {
        let Some(index) = self.selected.take() else { return };
        if index >= self.primitives.len() {
            return;
        }
        self.primitives.remove(index);
        log::debug!("deleted primitive #{index}");
        self.sync.push(SyncRequest::Primitives);
    }

    /// Drags the selection by a screen-space displacement.
    pub fn move_selected(&mut self, screen_delta: Vec2) {
        let delta = self.camera.screen_delta_to_world(screen_delta, self.viewport);
        let Some(primitive) = self.selected.and_then(|i| self.primitives.get_mut(i)) else {
            return;
        };
        primitive.translate(delta);
        self.sync.push(SyncRequest::Primitives);
    }

    /// Material of the selection. Shared materials affect every primitive using them.
    pub fn selected_material(&self) -> Option<Material> {
        let id = self.selected_primitive()?.material();
        self.materials.get(id.index()).copied()
    }

    pub fn set_selected_material(&mut self, material: Material) {
        let Some(id) = self.selected_primitive().map(Primitive::material) else { return };
        let Some(slot) = self.materials.get_mut(id.index()) else { return };
        *slot = material;
        self.sync.push(SyncRequest::Materials);
    }

    // ── camera ────────────────────────────────────────────────────────────

    /// Pans by a screen-space displacement. Clears the selection.
    pub fn move_camera(&mut self, screen_delta: Vec2) {
        self.selected = None;
        let delta = self.camera.screen_delta_to_world(screen_delta, self.viewport);
        self.camera.pan(delta);
        self.sync.push(SyncRequest::Camera);
    }

    /// Zooms about the view centre; `factor < 1` zooms in. Clears the selection.
    pub fn zoom_camera(&mut self, factor: f32) {
        self.selected = None;
        self.camera.zoom(factor);
        self.sync.push(SyncRequest::Camera);
    }

    // ── dispersion ────────────────────────────────────────────────────────

    pub fn set_dispersion(&mut self, enabled: bool) {
        if self.dispersion == enabled {
            return;
        }
        self.dispersion = enabled;
        self.samples = dispersion_samples(enabled);
        log::debug!("dispersion {} ({} samples)", if enabled { "on" } else { "off" }, self.samples.len());
        self.sync.push(SyncRequest::Dispersion);
    }

    // ── renderer sync ─────────────────────────────────────────────────────

    /// Schedules every upload, e.g. for a renderer that has never seen this scene.
    pub fn sync_all(&mut self) {
        for req in SyncRequest::ORDER {
            self.sync.push(req);
        }
    }

    /// Drains pending requests into `renderer`. Call once per frame, before it
    /// accumulates.
    pub fn flush<R: SceneRenderer + ?Sized>(&mut self, renderer: &mut R) {
        for req in self.sync.drain() {
            match req {
                SyncRequest::Materials => renderer.upload_materials(&self.materials),
                SyncRequest::Primitives => {
                    let (circles, triangles) = partition(&self.primitives);
                    renderer.upload_primitives(&circles, &triangles);
                }
                SyncRequest::Dispersion => renderer.upload_dispersion(&self.samples),
                SyncRequest::Camera => renderer.set_camera(&self.camera),
                SyncRequest::ResetAccumulation => renderer.reset_accumulation(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Records renderer calls by name.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        circles: usize,
        triangles: usize,
        materials: usize,
        samples: usize,
        camera: Option<Camera>,
    }

    impl SceneRenderer for Recorder {
        fn upload_materials(&mut self, materials: &[Material]) {
            self.calls.push("materials");
            self.materials = materials.len();
        }
        fn upload_primitives(&mut self, circles: &[Circle], triangles: &[Triangle]) {
            self.calls.push("primitives");
            self.circles = circles.len();
            self.triangles = triangles.len();
        }
        fn upload_dispersion(&mut self, samples: &[DispersionSample]) {
            self.calls.push("dispersion");
            self.samples = samples.len();
        }
        fn set_camera(&mut self, camera: &Camera) {
            self.calls.push("camera");
            self.camera = Some(*camera);
        }
        fn reset_accumulation(&mut self) {
            self.calls.push("reset");
        }
    }

    /// Default scene with the construction-time requests already flushed.
    fn scene() -> SceneModel {
        let mut s = SceneModel::new();
        s.flush(&mut Recorder::default());
        s
    }

    fn screen_of(s: &SceneModel, x: f32, y: f32) -> Vec2 {
        s.world_to_screen(Vec2::new(x, y))
    }

    fn flushed(s: &mut SceneModel) -> Vec<&'static str> {
        let mut r = Recorder::default();
        s.flush(&mut r);
        r.calls
    }

    // ── defaults ──────────────────────────────────────────────────────────

    #[test]
    fn default_scene_contents() {
        let s = SceneModel::new();
        assert_eq!(s.primitives().len(), 5);
        assert_eq!(s.materials().len(), 2);
        assert_eq!(s.creation_mode(), CreationMode::Idle);
        assert_eq!(s.selected(), None);
        assert!(!s.dispersion());
        assert_eq!(s.dispersion_samples().len(), 1);
    }

    #[test]
    fn construction_requests_initial_upload() {
        let mut s = SceneModel::new();
        assert_eq!(flushed(&mut s), vec!["materials", "primitives", "reset"]);
        assert!(s.pending_sync().is_empty());
    }

    #[test]
    fn viewport_center_maps_to_origin() {
        let s = scene();
        let w = s.screen_to_world(Vec2::new(512.0, 512.0));
        assert_abs_diff_eq!(w.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(w.y, 0.0, epsilon = 1e-6);
    }

    // ── creation ──────────────────────────────────────────────────────────

    #[test]
    fn add_point_while_idle_is_rejected() {
        let mut s = scene();
        assert!(!s.add_primitive_point(Vec2::new(10.0, 10.0)));
        assert_eq!(s.primitives().len(), 5);
        assert!(s.pending_sync().is_empty());
    }

    #[test]
    fn two_clicks_create_circle() {
        let mut s = SceneModel::empty();
        s.start_circle();

        let a = screen_of(&s, -0.5, 0.5);
        let b = screen_of(&s, -0.2, 0.5);
        assert!(s.add_primitive_point(a));
        assert_eq!(s.pending_points().len(), 1);
        assert!(s.pending_sync().is_empty());
        assert!(s.add_primitive_point(b));

        assert_eq!(s.primitives().len(), 1);
        assert_eq!(s.materials().len(), 1);
        assert_eq!(s.creation_mode(), CreationMode::Idle);
        assert!(s.pending_points().is_empty());

        let Primitive::Circle(c) = s.primitives()[0] else { panic!("expected circle") };
        assert_abs_diff_eq!(c.center.x, -0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(c.center.y, 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(c.radius, 0.3, epsilon = 1e-5);
        assert_eq!(c.material, MaterialId(0));
        assert_eq!(s.materials()[0], Material::default());

        assert_eq!(flushed(&mut s), vec!["materials", "primitives", "reset"]);
    }

    #[test]
    fn three_clicks_create_triangle_with_new_material() {
        let mut s = scene();
        s.start_triangle();
        for (x, y) in [(-0.9, -0.9), (-0.9, -0.6), (-0.6, -0.9)] {
            assert!(s.add_primitive_point(screen_of(&s, x, y)));
        }

        assert_eq!(s.primitives().len(), 6);
        assert_eq!(s.materials().len(), 3);
        assert_eq!(s.creation_mode(), CreationMode::Idle);
        assert!(s.pending_points().is_empty());
        assert_eq!(s.primitives()[5].material(), MaterialId(2));
        assert!(s.primitives()[5].contains(Vec2::new(-0.85, -0.85)));
    }

    #[test]
    fn starting_creation_clears_selection() {
        let mut s = scene();
        assert!(s.select_primitive(screen_of(&s, -0.5, 0.5)));
        s.start_circle();
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn pending_points_map_back_to_click_positions() {
        let mut s = scene();
        s.start_triangle();
        s.add_primitive_point(Vec2::new(100.0, 200.0));
        s.add_primitive_point(Vec2::new(300.0, 50.0));
        let pts = s.pending_points_in_screen();
        assert_eq!(pts.len(), 2);
        assert_abs_diff_eq!(pts[0].x, 100.0, epsilon = 1e-3);
        assert_abs_diff_eq!(pts[0].y, 200.0, epsilon = 1e-3);
        assert_abs_diff_eq!(pts[1].x, 300.0, epsilon = 1e-3);
        assert_abs_diff_eq!(pts[1].y, 50.0, epsilon = 1e-3);
    }

    #[test]
    fn abort_discards_pending_shape() {
        let mut s = scene();
        s.start_circle();
        s.add_primitive_point(Vec2::new(10.0, 10.0));
        s.abort_creation();
        assert!(s.pending_points().is_empty());
        assert!(!s.add_primitive_point(Vec2::new(20.0, 20.0)));
        assert_eq!(s.primitives().len(), 5);
    }

    #[test]
    fn degenerate_circle_is_accepted() {
        let mut s = SceneModel::empty();
        s.start_circle();
        s.add_primitive_point(Vec2::new(50.0, 50.0));
        s.add_primitive_point(Vec2::new(50.0, 50.0));
        let Primitive::Circle(c) = s.primitives()[0] else { panic!("expected circle") };
        assert_eq!(c.radius, 0.0);
    }

    // ── selection ─────────────────────────────────────────────────────────

    #[test]
    fn selects_circle_under_click() {
        let mut s = scene();
        assert!(s.select_primitive(screen_of(&s, -0.5, 0.5)));
        assert_eq!(s.selected(), Some(0));
        assert!(s.select_primitive(screen_of(&s, 0.5, 0.5)));
        assert_eq!(s.selected(), Some(1));
    }

    #[test]
    fn overlap_prefers_lowest_index() {
        let mut s = scene();
        // Inside both circle #1 and the triangle #4.
        let p = Vec2::new(0.5, 0.3);
        assert!(s.primitives()[4].contains(p));
        assert!(s.select_primitive(screen_of(&s, p.x, p.y)));
        assert_eq!(s.selected(), Some(1));
    }

    #[test]
    fn selects_triangle_outside_circles() {
        let mut s = scene();
        assert!(s.select_primitive(screen_of(&s, 0.5, 0.1)));
        assert_eq!(s.selected(), Some(4));
    }

    #[test]
    fn click_on_empty_space_clears_selection() {
        let mut s = scene();
        s.select_primitive(screen_of(&s, -0.5, 0.5));
        assert!(!s.select_primitive(screen_of(&s, 0.0, 0.9)));
        assert_eq!(s.selected(), None);
        assert_eq!(s.selected_bounds_in_screen(), None);
    }

    #[test]
    fn selection_bounds_in_screen_space() {
        let mut s = scene();
        s.select_primitive(screen_of(&s, -0.5, 0.5));
        let Some(bounds) = s.selected_bounds_in_screen() else { panic!("expected bounds") };
        // Circle (-0.5, 0.5) r 0.3 → world [-0.8, -0.2] x [0.2, 0.8] on a 1024² view.
        assert_abs_diff_eq!(bounds.origin.x, 0.1 * 1024.0, epsilon = 1e-2);
        assert_abs_diff_eq!(bounds.origin.y, 0.6 * 1024.0, epsilon = 1e-2);
        assert_abs_diff_eq!(bounds.size.x, 0.3 * 1024.0, epsilon = 1e-2);
        assert_abs_diff_eq!(bounds.size.y, 0.3 * 1024.0, epsilon = 1e-2);
    }

    #[test]
    fn selection_on_empty_scene_is_noop() {
        let mut s = SceneModel::empty();
        assert!(!s.select_primitive(Vec2::new(512.0, 512.0)));
        s.move_selected(Vec2::new(10.0, 10.0));
        s.delete_selected();
        assert!(s.primitives().is_empty());
        assert!(s.pending_sync().is_empty());
    }

    // ── delete / move ─────────────────────────────────────────────────────

    #[test]
    fn delete_without_selection_changes_nothing() {
        let mut s = scene();
        let camera = *s.camera();
        s.delete_selected();
        assert_eq!(s.primitives().len(), 5);
        assert_eq!(s.materials().len(), 2);
        assert_eq!(*s.camera(), camera);
        assert_eq!(s.selected(), None);
        assert!(s.pending_sync().is_empty());
    }

    #[test]
    fn delete_removes_primitive_and_keeps_material() {
        let mut s = scene();
        s.select_primitive(screen_of(&s, 0.5, 0.5));
        s.delete_selected();

        assert_eq!(s.primitives().len(), 4);
        assert_eq!(s.materials().len(), 2);
        assert_eq!(s.selected(), None);
        // Higher indices shifted down: the old #2 light circle is now #1.
        assert!(s.primitives()[1].contains(Vec2::new(-0.5, -0.5)));
        assert_eq!(flushed(&mut s), vec!["primitives", "reset"]);
    }

    #[test]
    fn move_selected_translates_by_world_delta() {
        let mut s = scene();
        s.select_primitive(screen_of(&s, -0.5, 0.5));
        // 256 px on a 1024 px / 2-unit view = 0.5 world units.
        s.move_selected(Vec2::new(256.0, -256.0));

        let Primitive::Circle(c) = s.primitives()[0] else { panic!("expected circle") };
        assert_abs_diff_eq!(c.center.x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(c.center.y, 0.0, epsilon = 1e-5);
        assert_eq!(s.selected(), Some(0));
        assert_eq!(flushed(&mut s), vec!["primitives", "reset"]);
    }

    #[test]
    fn move_without_selection_is_noop() {
        let mut s = scene();
        let before = s.primitives().to_vec();
        s.move_selected(Vec2::new(40.0, 40.0));
        assert_eq!(s.primitives(), before.as_slice());
        assert!(s.pending_sync().is_empty());
    }

    // ── materials ─────────────────────────────────────────────────────────

    #[test]
    fn material_of_selection_roundtrip() {
        let mut s = scene();
        assert_eq!(s.selected_material(), None);

        s.select_primitive(screen_of(&s, -0.5, -0.5));
        let mut m = s.selected_material().expect("selection has a material");
        assert_eq!(m.emissive, 1.0);

        m.reflective = 0.5;
        s.set_selected_material(m);
        assert_eq!(s.materials()[1].reflective, 0.5);
        // Shared material: the other light circle sees the change too.
        assert_eq!(s.materials()[s.primitives()[3].material().index()].reflective, 0.5);
        assert_eq!(flushed(&mut s), vec!["materials", "reset"]);
    }

    #[test]
    fn set_material_without_selection_is_noop() {
        let mut s = scene();
        let before = s.materials().to_vec();
        s.set_selected_material(Material::light());
        assert_eq!(s.materials(), before.as_slice());
        assert!(s.pending_sync().is_empty());
    }

    // ── camera ────────────────────────────────────────────────────────────

    #[test]
    fn pan_clears_selection_and_requests_camera() {
        let mut s = scene();
        s.select_primitive(screen_of(&s, -0.5, 0.5));
        s.move_camera(Vec2::new(512.0, 0.0));

        assert_eq!(s.selected(), None);
        assert_abs_diff_eq!(s.camera().min.x, -2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(s.camera().max.x, 0.0, epsilon = 1e-5);

        let mut r = Recorder::default();
        s.flush(&mut r);
        assert_eq!(r.calls, vec!["camera", "reset"]);
        assert_eq!(r.camera, Some(*s.camera()));
    }

    #[test]
    fn zoom_roundtrip_restores_camera() {
        let mut s = scene();
        let original = *s.camera();
        s.select_primitive(screen_of(&s, -0.5, 0.5));
        s.zoom_camera(0.88);
        assert_eq!(s.selected(), None);
        s.zoom_camera(1.0 / 0.88);
        assert_abs_diff_eq!(s.camera().min.x, original.min.x, epsilon = 1e-5);
        assert_abs_diff_eq!(s.camera().min.y, original.min.y, epsilon = 1e-5);
        assert_abs_diff_eq!(s.camera().max.x, original.max.x, epsilon = 1e-5);
        assert_abs_diff_eq!(s.camera().max.y, original.max.y, epsilon = 1e-5);
    }

    #[test]
    fn viewport_change_resets_accumulation_only() {
        let mut s = scene();
        s.set_viewport(Viewport::new(800.0, 600.0));
        assert_eq!(flushed(&mut s), vec!["reset"]);
        s.set_viewport(Viewport::new(800.0, 600.0));
        s.set_viewport(Viewport::new(0.0, 600.0));
        assert!(s.pending_sync().is_empty());
        assert_eq!(s.viewport(), Viewport::new(800.0, 600.0));
    }

    // ── dispersion ────────────────────────────────────────────────────────

    #[test]
    fn dispersion_toggle_rebuilds_samples() {
        let mut s = scene();
        s.set_dispersion(true);
        assert_eq!(s.dispersion_samples().len(), 41);

        let mut r = Recorder::default();
        s.flush(&mut r);
        assert_eq!(r.calls, vec!["dispersion", "reset"]);
        assert_eq!(r.samples, 41);

        s.set_dispersion(false);
        assert_eq!(s.dispersion_samples().len(), 1);
        assert_eq!(s.dispersion_samples()[0].wavelength, 500.0);
    }

    #[test]
    fn unchanged_dispersion_is_noop() {
        let mut s = scene();
        s.set_dispersion(false);
        assert!(s.pending_sync().is_empty());
        s.set_dispersion(true);
        s.flush(&mut Recorder::default());
        s.set_dispersion(true);
        assert!(s.pending_sync().is_empty());
    }

    // ── flush ─────────────────────────────────────────────────────────────

    #[test]
    fn sync_all_uploads_everything_partitioned() {
        let mut s = scene();
        s.sync_all();
        let mut r = Recorder::default();
        s.flush(&mut r);
        assert_eq!(r.calls, vec!["materials", "primitives", "dispersion", "camera", "reset"]);
        assert_eq!(r.circles, 4);
        assert_eq!(r.triangles, 1);
        assert_eq!(r.materials, 2);
        assert_eq!(r.samples, 1);
    }

    #[test]
    fn interleaved_edits_coalesce_per_frame() {
        let mut s = scene();
        s.select_primitive(screen_of(&s, -0.5, 0.5));
        s.move_selected(Vec2::new(1.0, 0.0));
        s.move_selected(Vec2::new(1.0, 0.0));
        let m = Material::light();
        s.set_selected_material(m);
        s.zoom_camera(1.1);
        assert_eq!(flushed(&mut s), vec!["materials", "primitives", "camera", "reset"]);
        assert!(flushed(&mut s).is_empty());
    }
}
