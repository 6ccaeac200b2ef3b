use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::InputEvent;

/// Input state that outlives a single event.
///
/// winit reports button presses without a position, so the last pointer position is
/// tracked here and stamped onto them during translation.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels, `None` while outside the window.
    pub pointer: Option<Vec2>,
}

impl InputState {
    /// Tracks the pointer through `ev` and appends `ev` to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::PointerMoved { position } => self.pointer = Some(*position),
            InputEvent::PointerButton { position, .. } => self.pointer = Some(*position),
            InputEvent::PointerLeft => self.pointer = None,
            _ => {}
        }
        frame.events.push(ev);
    }
}
