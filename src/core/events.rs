//=========================================================================
// Shell Event Types
//
// Defines the portable event vocabulary delivered to the embedded
// application.
//
// This module abstracts away the native windowing/input stack (Winit for
// the window and keyboard/mouse, gilrs for gamepads) into a unified,
// library-independent format consumed through the event queue.
//
// Responsibilities:
// - Represent keyboard, mouse, gamepad, text, resize and exit events in
//   a stable, portable way
// - Carry the owning window/gamepad handle with every windowed event
// - Keep payloads Copy-cheap (no heap allocations anywhere in an Event)
//
// Event Flow:
// ```text
// Native Layer (Winit / gilrs)
//         ↓
//    EventPump (translate + synthesize)
//         ↓
//    Event (this module)
//         ↓
//    EventReader (application thread)
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::handle::{GamepadHandle, WindowHandle};

//=== Key =================================================================

/// Portable key identifier.
///
/// Represents the physical key, not the character produced. Unmapped
/// native codes translate to [`Key::None`]; the pump drops such events
/// rather than forwarding the sentinel.
///
/// Gamepad buttons live in the same enumeration so that stick motion can
/// synthesize directional "digital" presses (see `core::gamepad`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Sentinel for native codes with no portable equivalent.
    None,

    //--- Control & Navigation ---------------------------------------------

    Esc,
    Return,
    Tab,
    Space,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    //--- Punctuation ------------------------------------------------------

    Plus,
    Minus,
    Comma,
    Period,
    Slash,
    Tilde,

    //--- Function Row -----------------------------------------------------

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Numpad -----------------------------------------------------------

    NumPad0, NumPad1, NumPad2, NumPad3, NumPad4,
    NumPad5, NumPad6, NumPad7, NumPad8, NumPad9,

    //--- Number Row -------------------------------------------------------

    Key0, Key1, Key2, Key3, Key4,
    Key5, Key6, Key7, Key8, Key9,

    //--- Letters ----------------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Gamepad Buttons --------------------------------------------------

    GamepadA,
    GamepadB,
    GamepadX,
    GamepadY,
    GamepadThumbL,
    GamepadThumbR,
    GamepadShoulderL,
    GamepadShoulderR,
    GamepadUp,
    GamepadDown,
    GamepadLeft,
    GamepadRight,
    GamepadBack,
    GamepadStart,
    GamepadGuide,
}

//=== Modifiers ===========================================================

/// Modifier key state as an 8-bit mask.
///
/// Unlike a plain shift/ctrl/alt triple, the mask distinguishes left and
/// right variants, matching what the native layer reports. Bits combine
/// with `|`; an empty mask means no modifier held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const LEFT_ALT: Self = Self(0x01);
    pub const RIGHT_ALT: Self = Self(0x02);
    pub const LEFT_CTRL: Self = Self(0x04);
    pub const RIGHT_CTRL: Self = Self(0x08);
    pub const LEFT_SHIFT: Self = Self(0x10);
    pub const RIGHT_SHIFT: Self = Self(0x20);
    pub const LEFT_META: Self = Self(0x40);
    pub const RIGHT_META: Self = Self(0x80);

    /// Raw mask value.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// True if every bit of `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if no modifier is held.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Adds the bits of `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clears the bits of `other`.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// `None` is the sentinel for buttons outside the portable set (side and
/// macro buttons); the pump drops such events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    None,
    Left,
    Middle,
    Right,
}

//=== GamepadAxis =========================================================

/// Analog gamepad axis identifier.
///
/// The discriminant doubles as the index into per-axis state arrays
/// (`[i32; GamepadAxis::COUNT]`), so variants must stay dense and in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftX,
    LeftY,
    LeftZ,
    RightX,
    RightY,
    RightZ,
}

impl GamepadAxis {
    /// Number of tracked axes; sizes the per-pad state arrays.
    pub const COUNT: usize = 6;

    /// Array index for this axis.
    pub fn index(self) -> usize {
        self as usize
    }
}

//=== Event ===============================================================

/// Typed event delivered to the application thread.
///
/// Every windowed variant carries the owning [`WindowHandle`]; gamepad
/// events additionally carry the [`GamepadHandle`]. Ownership transfers
/// by move when polled from the queue; dropping the value releases it.
///
/// # Payload Notes
///
/// - Mouse coordinates are in physical pixels, top-left origin.
/// - `z` on mouse variants is the running wheel accumulator, not a delta.
/// - `Char` carries UTF-8 bytes inline (`bytes[..len as usize]` is the
///   valid slice); no allocation.
/// - Gamepad axis values are XInput-range (`-32768..=32767`), already
///   deadzone-filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Cursor moved (or wheel scrolled; wheel updates re-post the last
    /// cursor position with the new accumulator).
    MouseMove {
        window: WindowHandle,
        x: i32,
        y: i32,
        z: i32,
    },

    /// Mouse button pressed or released at the given position.
    MouseButton {
        window: WindowHandle,
        x: i32,
        y: i32,
        z: i32,
        button: MouseButton,
        down: bool,
    },

    /// Filtered analog axis motion on a connected gamepad.
    GamepadAxis {
        window: WindowHandle,
        gamepad: GamepadHandle,
        axis: GamepadAxis,
        value: i32,
    },

    /// Text input as UTF-8 bytes.
    Char {
        window: WindowHandle,
        len: u8,
        bytes: [u8; 4],
    },

    /// Key (or synthesized gamepad button) edge with modifier state.
    Key {
        window: WindowHandle,
        key: Key,
        modifiers: Modifiers,
        down: bool,
    },

    /// Window client area changed to the given dimensions.
    Size {
        window: WindowHandle,
        width: u32,
        height: u32,
    },

    /// Close was requested; the application should return from its entry
    /// function.
    Exit,
}

impl Event {
    /// Builds a `Char` event from a Rust `char`, encoding UTF-8 inline.
    pub fn char(window: WindowHandle, ch: char) -> Self {
        let mut bytes = [0u8; 4];
        let len = ch.encode_utf8(&mut bytes).len() as u8;
        Self::Char { window, len, bytes }
    }

    /// The owning window, if the variant is bound to one (`Exit` is not).
    pub fn window(&self) -> Option<WindowHandle> {
        match self {
            Self::MouseMove { window, .. }
            | Self::MouseButton { window, .. }
            | Self::GamepadAxis { window, .. }
            | Self::Char { window, .. }
            | Self::Key { window, .. }
            | Self::Size { window, .. } => Some(*window),
            Self::Exit => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
