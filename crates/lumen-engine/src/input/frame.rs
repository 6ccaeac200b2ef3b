use super::types::InputEvent;

/// Input collected since the previous frame, cleared by the runtime after each frame.
///
/// `events` keeps arrival order, which matters for press/move/release sequences
/// inside a single frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
