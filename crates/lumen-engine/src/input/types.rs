use crate::coords::Vec2;

/// Keyboard key identifier.
///
/// Only keys the editor binds get a dedicated variant; printable keys arrive as
/// lowercase [`Key::Char`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Backspace,
    Delete,
    /// Letter or digit, lowercase.
    Char(char),
    /// Platform key code without a mapping.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Mouse wheel delta. `Line` is notch-based, `Pixel` is high precision (logical px).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved {
        position: Vec2,
    },
    /// `position` is the last known pointer position.
    PointerButton {
        button: MouseButton,
        state: MouseButtonState,
        position: Vec2,
    },
    MouseWheel(MouseWheelDelta),
    Key {
        key: Key,
        state: KeyState,
        repeat: bool,
    },
    PointerLeft,
    Focused(bool),
}
