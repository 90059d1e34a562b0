//! Backend-neutral input events.
//!
//! Events are produced by [`crate::Backend::poll_events`] and are meant to be
//! consumed within the same frame, they are never retained by the backend.

use vek::{Extent2, Vec2};

/// A single input event translated from the underlying windowing library.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key on the keyboard was pressed.
    KeyDown {
        /// Which key was pressed.
        key: Key,
        /// Whether this is an auto-repeated press of a held key.
        repeat: bool,
    },
    /// A key on the keyboard was released.
    KeyUp {
        /// Which key was released.
        key: Key,
    },
    /// The pointer moved over the window.
    PointerMoved {
        /// New position in logical pixels.
        position: Vec2<f32>,
        /// Movement since the previous pointer event in logical pixels.
        delta: Vec2<f32>,
    },
    /// A pointer button changed state.
    PointerButton {
        /// Which button changed.
        button: PointerButton,
        /// `true` when pressed, `false` when released.
        pressed: bool,
        /// Pointer position in logical pixels at the time of the event.
        position: Vec2<f32>,
    },
    /// The scroll wheel moved.
    Wheel {
        /// Scroll amount, lines for wheels and logical pixels for touchpads.
        delta: Vec2<f32>,
    },
    /// Committed text input from the IME.
    TextInput {
        /// The committed string.
        text: String,
    },
    /// The user requested the window to close.
    WindowClose,
    /// The window changed size.
    WindowResized {
        /// New logical size in pixels.
        size: Extent2<u32>,
    },
    /// The window is gone, the process should stop its frame loop.
    Quit,
}

/// Neutral keyboard key codes.
///
/// Only the keys an arcade game core cares about are mapped, other native key
/// events are dropped by the adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
}

/// Neutral pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    Back,
    Forward,
    /// Any other hardware button, by native index.
    Other(u16),
}
