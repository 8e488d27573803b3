//=========================================================================
// Keyboard & Mouse Translation
//
// Converts Winit key and mouse-button codes to the portable enums.
// Pure, total functions: every native code maps to exactly one engine
// value, with `Key::None`/`MouseButton::None` as the sentinel for codes
// outside the portable set.
//
//=========================================================================

use winit::event::MouseButton as WinitMouseButton;
use winit::keyboard::KeyCode as WinitKeyCode;

use crate::core::events::{Key, Modifiers, MouseButton};

//=== Key Translation =====================================================
//
// Coverage mirrors the portable set: letters, digits, numpad, function
// row, navigation, and common punctuation. Everything else (F13+, media
// keys, IME keys) is the sentinel. Modifier keys are deliberately the
// sentinel too; they surface through `modifier_bit`, not as key events.
//

pub(crate) fn translate_key(code: WinitKeyCode) -> Key {
    use WinitKeyCode::*;
    match code {
        //--- Control & Navigation ----------------------------------------
        Escape => Key::Esc,
        Enter => Key::Return,
        Tab => Key::Tab,
        Space => Key::Space,
        Backspace => Key::Backspace,
        ArrowUp => Key::Up,
        ArrowDown => Key::Down,
        ArrowLeft => Key::Left,
        ArrowRight => Key::Right,
        Insert => Key::Insert,
        Delete => Key::Delete,
        Home => Key::Home,
        End => Key::End,
        PageUp => Key::PageUp,
        PageDown => Key::PageDown,

        //--- Punctuation --------------------------------------------------
        NumpadAdd => Key::Plus,
        Minus | NumpadSubtract => Key::Minus,
        Comma => Key::Comma,
        Period => Key::Period,
        Slash => Key::Slash,
        Backquote => Key::Tilde,

        //--- Function Row -------------------------------------------------
        F1 => Key::F1, F2 => Key::F2, F3 => Key::F3, F4 => Key::F4,
        F5 => Key::F5, F6 => Key::F6, F7 => Key::F7, F8 => Key::F8,
        F9 => Key::F9, F10 => Key::F10, F11 => Key::F11, F12 => Key::F12,

        //--- Numpad -------------------------------------------------------
        Numpad0 => Key::NumPad0, Numpad1 => Key::NumPad1,
        Numpad2 => Key::NumPad2, Numpad3 => Key::NumPad3,
        Numpad4 => Key::NumPad4, Numpad5 => Key::NumPad5,
        Numpad6 => Key::NumPad6, Numpad7 => Key::NumPad7,
        Numpad8 => Key::NumPad8, Numpad9 => Key::NumPad9,

        //--- Number Row ---------------------------------------------------
        Digit0 => Key::Key0, Digit1 => Key::Key1, Digit2 => Key::Key2,
        Digit3 => Key::Key3, Digit4 => Key::Key4, Digit5 => Key::Key5,
        Digit6 => Key::Key6, Digit7 => Key::Key7, Digit8 => Key::Key8,
        Digit9 => Key::Key9,

        //--- Letters ------------------------------------------------------
        KeyA => Key::KeyA, KeyB => Key::KeyB, KeyC => Key::KeyC,
        KeyD => Key::KeyD, KeyE => Key::KeyE, KeyF => Key::KeyF,
        KeyG => Key::KeyG, KeyH => Key::KeyH, KeyI => Key::KeyI,
        KeyJ => Key::KeyJ, KeyK => Key::KeyK, KeyL => Key::KeyL,
        KeyM => Key::KeyM, KeyN => Key::KeyN, KeyO => Key::KeyO,
        KeyP => Key::KeyP, KeyQ => Key::KeyQ, KeyR => Key::KeyR,
        KeyS => Key::KeyS, KeyT => Key::KeyT, KeyU => Key::KeyU,
        KeyV => Key::KeyV, KeyW => Key::KeyW, KeyX => Key::KeyX,
        KeyY => Key::KeyY, KeyZ => Key::KeyZ,

        //--- Fallback -----------------------------------------------------
        _ => Key::None,
    }
}

//=== Modifier Detection ==================================================
//
// Maps the eight modifier key codes to their bit in the mask. Any other
// code contributes no bits, so the result can be OR-folded over held
// keys without special-casing.
//

pub(crate) fn modifier_bit(code: WinitKeyCode) -> Modifiers {
    use WinitKeyCode::*;
    match code {
        AltLeft => Modifiers::LEFT_ALT,
        AltRight => Modifiers::RIGHT_ALT,
        ControlLeft => Modifiers::LEFT_CTRL,
        ControlRight => Modifiers::RIGHT_CTRL,
        ShiftLeft => Modifiers::LEFT_SHIFT,
        ShiftRight => Modifiers::RIGHT_SHIFT,
        SuperLeft => Modifiers::LEFT_META,
        SuperRight => Modifiers::RIGHT_META,
        _ => Modifiers::NONE,
    }
}

//=== Mouse Translation ===================================================

pub(crate) fn translate_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Right => MouseButton::Right,
        _ => MouseButton::None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_translate() {
        assert_eq!(translate_key(WinitKeyCode::KeyA), Key::KeyA);
        assert_eq!(translate_key(WinitKeyCode::KeyZ), Key::KeyZ);
        assert_eq!(translate_key(WinitKeyCode::Digit0), Key::Key0);
        assert_eq!(translate_key(WinitKeyCode::Numpad9), Key::NumPad9);
    }

    #[test]
    fn control_keys_translate() {
        assert_eq!(translate_key(WinitKeyCode::Escape), Key::Esc);
        assert_eq!(translate_key(WinitKeyCode::Enter), Key::Return);
        assert_eq!(translate_key(WinitKeyCode::Backspace), Key::Backspace);
        assert_eq!(translate_key(WinitKeyCode::F12), Key::F12);
    }

    #[test]
    fn unregistered_codes_yield_the_sentinel() {
        assert_eq!(translate_key(WinitKeyCode::F13), Key::None);
        assert_eq!(translate_key(WinitKeyCode::CapsLock), Key::None);
        assert_eq!(translate_key(WinitKeyCode::MediaPlayPause), Key::None);
    }

    #[test]
    fn translation_is_pure() {
        // Same input, same output, call after call.
        for _ in 0..3 {
            assert_eq!(translate_key(WinitKeyCode::Space), Key::Space);
            assert_eq!(translate_key(WinitKeyCode::F13), Key::None);
        }
    }

    #[test]
    fn modifier_keys_map_to_single_bits() {
        let pairs = [
            (WinitKeyCode::AltLeft, Modifiers::LEFT_ALT),
            (WinitKeyCode::AltRight, Modifiers::RIGHT_ALT),
            (WinitKeyCode::ControlLeft, Modifiers::LEFT_CTRL),
            (WinitKeyCode::ControlRight, Modifiers::RIGHT_CTRL),
            (WinitKeyCode::ShiftLeft, Modifiers::LEFT_SHIFT),
            (WinitKeyCode::ShiftRight, Modifiers::RIGHT_SHIFT),
            (WinitKeyCode::SuperLeft, Modifiers::LEFT_META),
            (WinitKeyCode::SuperRight, Modifiers::RIGHT_META),
        ];

        for (code, expected) in pairs {
            let bit = modifier_bit(code);
            assert_eq!(bit, expected);
            assert_eq!(bit.bits().count_ones(), 1);
        }
    }

    #[test]
    fn non_modifier_keys_contribute_no_bits() {
        assert_eq!(modifier_bit(WinitKeyCode::KeyA), Modifiers::NONE);
        assert_eq!(modifier_bit(WinitKeyCode::Escape), Modifiers::NONE);
    }

    #[test]
    fn modifier_keys_are_not_key_events() {
        assert_eq!(translate_key(WinitKeyCode::ShiftLeft), Key::None);
        assert_eq!(translate_key(WinitKeyCode::SuperRight), Key::None);
    }

    #[test]
    fn mouse_buttons_translate() {
        assert_eq!(translate_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(translate_mouse_button(WinitMouseButton::Middle), MouseButton::Middle);
        assert_eq!(translate_mouse_button(WinitMouseButton::Right), MouseButton::Right);
        assert_eq!(translate_mouse_button(WinitMouseButton::Back), MouseButton::None);
        assert_eq!(translate_mouse_button(WinitMouseButton::Other(7)), MouseButton::None);
    }
}
