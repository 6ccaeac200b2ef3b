//! Maps window input onto scene edits and builds the overlay.
//!
//! Window input is top-left origin; the scene works bottom-left, so every pointer
//! position is flipped through the viewport on the way in and every overlay mark on the
//! way out.

use lumen_engine::coords::{Vec2, Viewport};
use lumen_engine::input::{InputEvent, Key, KeyState, MouseButton, MouseButtonState, MouseWheelDelta};
use lumen_engine::render::{OverlayList, OverlayStyle};
use lumen_engine::scene::{CreationMode, Material, SceneModel};

use crate::presets::{next_palette_color, Preset};

/// Wheel units per line notch.
const WHEEL_NOTCH: f32 = 120.0;

/// Smallest zoom factor a single wheel event may apply.
const MIN_ZOOM_STEP: f32 = 0.1;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Drag {
    /// Primary button held on a selected primitive.
    Selection,
    /// Secondary button held.
    Camera,
}

pub struct Editor {
    scene: SceneModel,
    style: OverlayStyle,
    viewport: Viewport,
    /// Last pointer position, bottom-left origin.
    pointer: Option<Vec2>,
    drag: Option<Drag>,
}

impl Editor {
    pub fn new(scene: SceneModel, style: OverlayStyle) -> Self {
        let viewport = scene.viewport();
        Self {
            scene,
            style,
            viewport,
            pointer: None,
            drag: None,
        }
    }

    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneModel {
        &mut self.scene
    }

    /// Applies one frame of input, in arrival order, against `viewport` (logical px).
    pub fn handle_frame(&mut self, viewport: Viewport, events: &[InputEvent]) {
        if viewport.is_valid() {
            self.viewport = viewport;
            self.scene.set_viewport(viewport);
        }
        for event in events {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerMoved { position } => self.pointer_moved(self.viewport.flip_y(*position)),
            InputEvent::PointerButton { button, state, position } => {
                let screen = self.viewport.flip_y(*position);
                self.pointer = Some(screen);
                match state {
                    MouseButtonState::Pressed => self.pressed(*button, screen),
                    MouseButtonState::Released => self.released(*button),
                }
            }
            InputEvent::MouseWheel(delta) => {
                let units = match delta {
                    MouseWheelDelta::Line { y, .. } => y * WHEEL_NOTCH,
                    MouseWheelDelta::Pixel { y, .. } => *y,
                };
                self.wheel(units);
            }
            InputEvent::Key { key, state: KeyState::Pressed, repeat: false } => self.key(*key),
            InputEvent::PointerLeft => self.pointer = None,
            InputEvent::Focused(false) => self.drag = None,
            _ => {}
        }
    }

    fn pointer_moved(&mut self, screen: Vec2) {
        let previous = self.pointer.replace(screen);
        let Some(previous) = previous else { return };
        let delta = screen - previous;
        match self.drag {
            Some(Drag::Selection) => self.scene.move_selected(delta),
            Some(Drag::Camera) => self.scene.move_camera(delta),
            None => {}
        }
    }

    fn pressed(&mut self, button: MouseButton, screen: Vec2) {
        match button {
            MouseButton::Left => {
                if self.scene.add_primitive_point(screen) {
                    return;
                }
                if self.scene.select_primitive(screen) {
                    self.drag = Some(Drag::Selection);
                }
            }
            MouseButton::Right => self.drag = Some(Drag::Camera),
            _ => {}
        }
    }

    fn released(&mut self, button: MouseButton) {
        let ends = match button {
            MouseButton::Left => Drag::Selection,
            MouseButton::Right => Drag::Camera,
            _ => return,
        };
        if self.drag == Some(ends) {
            self.drag = None;
        }
    }

    /// Positive `units` (wheel away from the user) zooms in.
    fn wheel(&mut self, units: f32) {
        if units == 0.0 || !units.is_finite() {
            return;
        }
        let factor = (1.0 - units / 1000.0).max(MIN_ZOOM_STEP);
        self.scene.zoom_camera(factor);
    }

    fn key(&mut self, key: Key) {
        match key {
            Key::Escape => {
                self.scene.abort_creation();
                self.scene.clear_selection();
            }
            Key::Delete | Key::Backspace => self.scene.delete_selected(),
            Key::Char('c') => self.scene.start_circle(),
            Key::Char('t') => self.scene.start_triangle(),
            Key::Char('d') => {
                let enabled = !self.scene.dispersion();
                self.scene.set_dispersion(enabled);
            }
            Key::Char('5') => {
                if let Some(m) = self.scene.selected_material() {
                    let diffuse_color = next_palette_color(m.diffuse_color);
                    self.scene.set_selected_material(Material { diffuse_color, ..m });
                }
            }
            Key::Char('6') => {
                if let Some(m) = self.scene.selected_material() {
                    let emission_color = next_palette_color(m.emission_color);
                    self.scene.set_selected_material(Material { emission_color, ..m });
                }
            }
            Key::Char(c) => {
                let Some(preset) = Preset::from_key(c) else { return };
                if let Some(m) = self.scene.selected_material() {
                    log::debug!("applying {preset:?} preset");
                    self.scene.set_selected_material(preset.apply(m));
                }
            }
            _ => {}
        }
    }

    /// Rebuilds `list` with the selection outline and pending creation points, in
    /// window coordinates.
    pub fn build_overlay(&self, list: &mut OverlayList) {
        list.clear();
        if let Some(bounds) = self.scene.selected_bounds_in_screen() {
            list.push_outline(
                bounds.flip_y(self.viewport.height),
                self.style.outline_width,
                self.style.outline_color,
            );
        }
        for p in self.scene.pending_points_in_screen() {
            list.push_dot(self.viewport.flip_y(p), self.style.marker_size, self.style.marker_color);
        }
    }

    /// Short status line for the window title.
    pub fn status(&self) -> String {
        let mode = match self.scene.creation_mode() {
            CreationMode::Idle => "select".to_string(),
            CreationMode::Circle => format!("circle {}/2", self.scene.pending_points().len()),
            CreationMode::Triangle => format!("triangle {}/3", self.scene.pending_points().len()),
        };
        let dispersion = if self.scene.dispersion() { "on" } else { "off" };
        format!("lumen | {mode} | dispersion {dispersion}")
    }
}
