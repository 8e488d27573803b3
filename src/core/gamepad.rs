//=========================================================================
// Gamepad Axis Filter
//
// Per-pad analog axis state: deadzone filtering, edge detection, and
// synthesis of directional "digital" key events from stick motion.
//
// Responsibilities:
// - Zero out axis values whose magnitude sits inside the deadzone
// - Report only actual changes of the filtered value (edge detection)
// - Mirror the four directional axes onto virtual GamepadLeft/Right/
//   Up/Down key events so applications can treat sticks as d-pads
//
// Notes:
// Axis values are XInput-range i32 (-32768..=32767); the platform layer
// scales gilrs' normalized floats before they reach this module. State is
// mutated only on the controller thread.
//=========================================================================

//=== Internal Imports ====================================================

use crate::core::events::{GamepadAxis, Key, Modifiers};
use crate::core::handle::{GamepadHandle, WindowHandle};
use crate::core::queue::EventQueue;

//=== Deadzone Constants ==================================================

// Deadzone values from xinput.h: stick thresholds differ per side, the
// trigger threshold is on the small end of the scaled range.
const DEADZONE: [i32; GamepadAxis::COUNT] = [
    7849, // LeftX
    7849, // LeftY
    30,   // LeftZ
    8689, // RightX
    8689, // RightY
    30,   // RightZ
];

//=== Directional Remap ===================================================

// Virtual key pair (negative side, positive side) synthesized per axis.
// Trigger axes synthesize nothing.
const AXIS_DPAD: [(Key, Key); GamepadAxis::COUNT] = [
    (Key::GamepadLeft, Key::GamepadRight), // LeftX
    (Key::GamepadUp, Key::GamepadDown),    // LeftY
    (Key::None, Key::None),                // LeftZ
    (Key::GamepadLeft, Key::GamepadRight), // RightX
    (Key::GamepadUp, Key::GamepadDown),    // RightY
    (Key::None, Key::None),                // RightZ
];

//=== PadFilter ===========================================================

/// Filtered axis state for one connected gamepad.
///
/// Created on device connect (all axes at rest), discarded on disconnect.
#[derive(Debug)]
pub(crate) struct PadFilter {
    value: [i32; GamepadAxis::COUNT],
}

impl PadFilter {
    pub(crate) fn new() -> Self {
        Self {
            value: [0; GamepadAxis::COUNT],
        }
    }

    /// Applies the deadzone and stores the result.
    ///
    /// `value` is rewritten in place with the filtered value (0 inside
    /// the deadzone, unchanged outside). Returns whether the filtered
    /// value differs from the previously stored one.
    pub(crate) fn filter(&mut self, axis: GamepadAxis, value: &mut i32) -> bool {
        let idx = axis.index();
        let deadzone = DEADZONE[idx];
        let filtered = if value.abs() > deadzone { *value } else { 0 };

        let changed = self.value[idx] != filtered;
        self.value[idx] = filtered;
        *value = filtered;
        changed
    }

    /// Filters one raw axis sample and posts the resulting events.
    ///
    /// On a filtered-value change this posts the axis event and, for
    /// directional axes, the synthesized key edges: entering the deadzone
    /// releases both sides; leaving it presses the side matching the
    /// sign. No change, no events.
    pub(crate) fn update(
        &mut self,
        queue: &EventQueue,
        window: WindowHandle,
        gamepad: GamepadHandle,
        axis: GamepadAxis,
        mut value: i32,
    ) {
        if !self.filter(axis, &mut value) {
            return;
        }

        queue.post_axis(window, gamepad, axis, value);

        let (negative, positive) = AXIS_DPAD[axis.index()];
        if negative == Key::None {
            return;
        }

        if value == 0 {
            queue.post_key(window, negative, Modifiers::NONE, false);
            queue.post_key(window, positive, Modifiers::NONE, false);
        } else {
            let side = if value < 0 { negative } else { positive };
            queue.post_key(window, side, Modifiers::NONE, true);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::Event;
    use crate::core::queue::channel;

    const PAD: GamepadHandle = GamepadHandle(0);

    fn drain(reader: &mut crate::core::queue::EventReader) -> Vec<Event> {
        std::iter::from_fn(|| reader.poll()).collect()
    }

    //=====================================================================
    // Filter Tests
    //=====================================================================

    #[test]
    fn values_inside_deadzone_filter_to_zero() {
        let mut pad = PadFilter::new();

        for raw in [0, 1, -1, 7849, -7849] {
            let mut value = raw;
            pad.filter(GamepadAxis::LeftX, &mut value);
            assert_eq!(value, 0, "raw {} is inside the LeftX deadzone", raw);
        }
    }

    #[test]
    fn values_outside_deadzone_pass_unchanged() {
        let mut pad = PadFilter::new();

        let mut value = 7850;
        pad.filter(GamepadAxis::LeftX, &mut value);
        assert_eq!(value, 7850);

        let mut value = -32768;
        pad.filter(GamepadAxis::LeftX, &mut value);
        assert_eq!(value, -32768);
    }

    #[test]
    fn filter_edge_detects_changes() {
        let mut pad = PadFilter::new();

        let mut value = 0;
        assert!(!pad.filter(GamepadAxis::RightY, &mut value), "rest → rest is no change");

        let mut value = 20_000;
        assert!(pad.filter(GamepadAxis::RightY, &mut value), "rest → deflected changes");

        let mut value = 20_000;
        assert!(!pad.filter(GamepadAxis::RightY, &mut value), "same sample is no change");

        let mut value = 100; // inside deadzone
        assert!(pad.filter(GamepadAxis::RightY, &mut value), "deflected → rest changes");
    }

    #[test]
    fn deadzones_are_per_axis() {
        let mut pad = PadFilter::new();

        // 8000 clears the left stick threshold but not the right.
        let mut value = 8000;
        pad.filter(GamepadAxis::LeftX, &mut value);
        assert_eq!(value, 8000);

        let mut value = 8000;
        pad.filter(GamepadAxis::RightX, &mut value);
        assert_eq!(value, 0);

        // Triggers use the small threshold.
        let mut value = 31;
        pad.filter(GamepadAxis::LeftZ, &mut value);
        assert_eq!(value, 31);
    }

    //=====================================================================
    // Update / Synthesis Tests
    //=====================================================================

    #[test]
    fn no_change_posts_nothing() {
        let (queue, mut reader) = channel(16);
        let mut pad = PadFilter::new();

        pad.update(&queue, WindowHandle::DEFAULT, PAD, GamepadAxis::LeftX, 100);

        assert!(drain(&mut reader).is_empty(), "sample inside deadzone at rest is silent");
    }

    #[test]
    fn leaving_deadzone_presses_matching_side() {
        let (queue, mut reader) = channel(16);
        let mut pad = PadFilter::new();

        pad.update(&queue, WindowHandle::DEFAULT, PAD, GamepadAxis::LeftX, -20_000);

        let events = drain(&mut reader);
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            Event::GamepadAxis { axis: GamepadAxis::LeftX, value: -20_000, .. }
        ));
        assert!(matches!(
            events[1],
            Event::Key { key: Key::GamepadLeft, down: true, .. }
        ));
    }

    #[test]
    fn entering_deadzone_releases_both_sides() {
        let (queue, mut reader) = channel(16);
        let mut pad = PadFilter::new();

        pad.update(&queue, WindowHandle::DEFAULT, PAD, GamepadAxis::LeftY, 20_000);
        drain(&mut reader);

        pad.update(&queue, WindowHandle::DEFAULT, PAD, GamepadAxis::LeftY, 0);

        let events = drain(&mut reader);
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[0],
            Event::GamepadAxis { axis: GamepadAxis::LeftY, value: 0, .. }
        ));
        assert!(matches!(
            events[1],
            Event::Key { key: Key::GamepadUp, down: false, .. }
        ));
        assert!(matches!(
            events[2],
            Event::Key { key: Key::GamepadDown, down: false, .. }
        ));
    }

    #[test]
    fn one_release_pair_per_crossing() {
        let (queue, mut reader) = channel(32);
        let mut pad = PadFilter::new();

        // Deflect, rest, rest again: the second rest sample is silent.
        pad.update(&queue, WindowHandle::DEFAULT, PAD, GamepadAxis::RightX, 30_000);
        pad.update(&queue, WindowHandle::DEFAULT, PAD, GamepadAxis::RightX, 0);
        pad.update(&queue, WindowHandle::DEFAULT, PAD, GamepadAxis::RightX, 50);

        let events = drain(&mut reader);
        let releases = events
            .iter()
            .filter(|e| matches!(e, Event::Key { down: false, .. }))
            .count();
        assert_eq!(releases, 2, "exactly one key-up pair per crossing into the deadzone");
    }

    #[test]
    fn trigger_axes_synthesize_no_keys() {
        let (queue, mut reader) = channel(16);
        let mut pad = PadFilter::new();

        pad.update(&queue, WindowHandle::DEFAULT, PAD, GamepadAxis::LeftZ, 20_000);

        let events = drain(&mut reader);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::GamepadAxis { axis: GamepadAxis::LeftZ, .. }));
    }

    #[test]
    fn sign_flip_presses_other_side() {
        let (queue, mut reader) = channel(16);
        let mut pad = PadFilter::new();

        pad.update(&queue, WindowHandle::DEFAULT, PAD, GamepadAxis::LeftX, -20_000);
        drain(&mut reader);

        pad.update(&queue, WindowHandle::DEFAULT, PAD, GamepadAxis::LeftX, 20_000);
        let events = drain(&mut reader);

        assert!(matches!(
            events[1],
            Event::Key { key: Key::GamepadRight, down: true, .. }
        ));
    }
}
