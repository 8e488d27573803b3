//=========================================================================
// Gamepad Translation
//
// Converts gilrs button and axis identifiers to the portable enums and
// rescales gilrs' normalized axis floats to the engine's integer range.
// Pure, total functions with the usual sentinels for unknown inputs.
//
//=========================================================================

use gilrs::{Axis as GilrsAxis, Button as GilrsButton};

use crate::core::events::{GamepadAxis, Key};

//=== Axis Scaling ========================================================

/// Engine axis range bound; gilrs reports normalized [-1, 1].
const AXIS_SCALE: f32 = 32_767.0;

pub(crate) fn scale_axis(value: f32) -> i32 {
    (value.clamp(-1.0, 1.0) * AXIS_SCALE) as i32
}

//=== Button Translation ==================================================
//
// South/East/West/North is the positional layout (A/B/X/Y on an Xbox
// pad). LeftTrigger/RightTrigger are the bumpers in gilrs vocabulary;
// the analog triggers (LeftTrigger2/RightTrigger2) surface as axes, not
// buttons.
//

pub(crate) fn translate_button(button: GilrsButton) -> Key {
    match button {
        GilrsButton::South => Key::GamepadA,
        GilrsButton::East => Key::GamepadB,
        GilrsButton::West => Key::GamepadX,
        GilrsButton::North => Key::GamepadY,
        GilrsButton::LeftThumb => Key::GamepadThumbL,
        GilrsButton::RightThumb => Key::GamepadThumbR,
        GilrsButton::LeftTrigger => Key::GamepadShoulderL,
        GilrsButton::RightTrigger => Key::GamepadShoulderR,
        GilrsButton::DPadUp => Key::GamepadUp,
        GilrsButton::DPadDown => Key::GamepadDown,
        GilrsButton::DPadLeft => Key::GamepadLeft,
        GilrsButton::DPadRight => Key::GamepadRight,
        GilrsButton::Select => Key::GamepadBack,
        GilrsButton::Start => Key::GamepadStart,
        GilrsButton::Mode => Key::GamepadGuide,
        _ => Key::None,
    }
}

//=== Axis Translation ====================================================

pub(crate) fn translate_axis(axis: GilrsAxis) -> Option<GamepadAxis> {
    match axis {
        GilrsAxis::LeftStickX => Some(GamepadAxis::LeftX),
        GilrsAxis::LeftStickY => Some(GamepadAxis::LeftY),
        GilrsAxis::LeftZ => Some(GamepadAxis::LeftZ),
        GilrsAxis::RightStickX => Some(GamepadAxis::RightX),
        GilrsAxis::RightStickY => Some(GamepadAxis::RightY),
        GilrsAxis::RightZ => Some(GamepadAxis::RightZ),
        _ => None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_buttons_translate() {
        assert_eq!(translate_button(GilrsButton::South), Key::GamepadA);
        assert_eq!(translate_button(GilrsButton::East), Key::GamepadB);
        assert_eq!(translate_button(GilrsButton::West), Key::GamepadX);
        assert_eq!(translate_button(GilrsButton::North), Key::GamepadY);
    }

    #[test]
    fn dpad_and_meta_buttons_translate() {
        assert_eq!(translate_button(GilrsButton::DPadLeft), Key::GamepadLeft);
        assert_eq!(translate_button(GilrsButton::Select), Key::GamepadBack);
        assert_eq!(translate_button(GilrsButton::Start), Key::GamepadStart);
        assert_eq!(translate_button(GilrsButton::Mode), Key::GamepadGuide);
    }

    #[test]
    fn unknown_button_is_the_sentinel() {
        assert_eq!(translate_button(GilrsButton::Unknown), Key::None);
        assert_eq!(translate_button(GilrsButton::C), Key::None);
    }

    #[test]
    fn stick_axes_translate() {
        assert_eq!(translate_axis(GilrsAxis::LeftStickX), Some(GamepadAxis::LeftX));
        assert_eq!(translate_axis(GilrsAxis::RightStickY), Some(GamepadAxis::RightY));
        assert_eq!(translate_axis(GilrsAxis::LeftZ), Some(GamepadAxis::LeftZ));
    }

    #[test]
    fn dpad_axes_are_unmapped() {
        // D-pad hats arrive as buttons, not axes.
        assert_eq!(translate_axis(GilrsAxis::DPadX), None);
        assert_eq!(translate_axis(GilrsAxis::Unknown), None);
    }

    #[test]
    fn axis_scaling_covers_the_integer_range() {
        assert_eq!(scale_axis(0.0), 0);
        assert_eq!(scale_axis(1.0), 32_767);
        assert_eq!(scale_axis(-1.0), -32_767);
        assert_eq!(scale_axis(0.5), 16_383);
    }

    #[test]
    fn axis_scaling_clamps_out_of_range_input() {
        assert_eq!(scale_axis(2.0), 32_767);
        assert_eq!(scale_axis(-5.0), -32_767);
    }
}
