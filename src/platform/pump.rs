//=========================================================================
// Event Pump
//=========================================================================
//
// Converts decoded native input into portable events on the queue.
//
// Architecture:
//   Winit/gilrs events → Controller (decode) → EventPump → EventQueue
//
// Stateful: tracks the cursor position, the wheel accumulator, the last
// observed window size, the live modifier mask, and one PadFilter per
// connected gamepad. The Controller owns exactly one pump; tests drive
// the pump directly with native enum values and assert on the queue,
// no event loop required.
//
//=========================================================================

//=== External Crates =====================================================

use gilrs::{Axis as GilrsAxis, Button as GilrsButton};
use log::{trace, warn};
use winit::event::MouseButton as WinitMouseButton;
use winit::keyboard::KeyCode as WinitKeyCode;

//=== Internal Imports ====================================================

use crate::core::events::{Key, Modifiers, MouseButton};
use crate::core::gamepad::PadFilter;
use crate::core::handle::{GamepadHandle, HandleArena, WindowHandle, MAX_GAMEPADS};
use crate::core::queue::EventQueue;

use super::keymap;
use super::padmap;

//=== PadSlot =============================================================

/// One connected gamepad: its native id and filtered axis state.
struct PadSlot {
    native: usize,
    filter: PadFilter,
}

//=== EventPump ===========================================================

/// Translates decoded native input into queue events.
///
/// All windowed events are bound to the default window, the single
/// native window this shell drives.
pub(crate) struct EventPump {
    queue: EventQueue,

    /// Last cursor position in physical pixels.
    mouse_x: i32,
    mouse_y: i32,

    /// Wheel accumulator; carried fractionally, reported truncated.
    wheel: f32,

    /// Last observed client size; gates `Size` events.
    width: u32,
    height: u32,

    /// Live modifier mask, maintained from modifier key edges.
    modifiers: Modifiers,

    /// Gamepad slots; index is the handle value.
    pads: [Option<PadSlot>; MAX_GAMEPADS],
    pad_arena: HandleArena<MAX_GAMEPADS>,
}

impl EventPump {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(queue: EventQueue) -> Self {
        Self {
            queue,
            mouse_x: 0,
            mouse_y: 0,
            wheel: 0.0,
            width: 0,
            height: 0,
            modifiers: Modifiers::NONE,
            pads: std::array::from_fn(|_| None),
            pad_arena: HandleArena::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    //--- Window Events ----------------------------------------------------

    /// Close requested; posts `Exit`. The controller drives the actual
    /// shutdown sequence.
    pub(crate) fn close_requested(&mut self) {
        self.queue.post_exit();
    }

    pub(crate) fn mouse_move(&mut self, x: f64, y: f64) {
        self.mouse_x = x as i32;
        self.mouse_y = y as i32;
        self.queue
            .post_mouse_move(WindowHandle::DEFAULT, self.mouse_x, self.mouse_y, self.z());
    }

    pub(crate) fn mouse_button(&mut self, button: WinitMouseButton, down: bool) {
        let button = keymap::translate_mouse_button(button);
        if button == MouseButton::None {
            trace!(target: "platform::input", "Unmapped mouse button ignored");
            return;
        }
        self.queue.post_mouse_button(
            WindowHandle::DEFAULT,
            self.mouse_x,
            self.mouse_y,
            self.z(),
            button,
            down,
        );
    }

    /// Wheel motion re-posts the last cursor position with the updated
    /// accumulator; there is no dedicated wheel event.
    pub(crate) fn scroll(&mut self, delta: f32) {
        self.wheel += delta;
        self.queue
            .post_mouse_move(WindowHandle::DEFAULT, self.mouse_x, self.mouse_y, self.z());
    }

    pub(crate) fn key(&mut self, code: WinitKeyCode, down: bool) {
        let bit = keymap::modifier_bit(code);
        if down {
            self.modifiers.insert(bit);
        } else {
            self.modifiers.remove(bit);
        }

        let key = keymap::translate_key(code);
        if key == Key::None {
            if bit.is_empty() {
                trace!(target: "platform::input", "Unmapped key {:?} ignored", code);
            }
            return;
        }

        // Terminal-style control bytes accompany these three keys so
        // text-driven applications see them without a text event.
        if down {
            match key {
                Key::Esc => self.queue.post_char(WindowHandle::DEFAULT, '\u{1b}'),
                Key::Return => self.queue.post_char(WindowHandle::DEFAULT, '\r'),
                Key::Backspace => self.queue.post_char(WindowHandle::DEFAULT, '\u{8}'),
                _ => {}
            }
        }

        self.queue
            .post_key(WindowHandle::DEFAULT, key, self.modifiers, down);
    }

    /// Printable text input. Control characters are skipped; they are
    /// synthesized from the key edge instead.
    pub(crate) fn text(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.queue.post_char(WindowHandle::DEFAULT, ch);
    }

    pub(crate) fn resized(&mut self, width: u32, height: u32) {
        self.set_size(width, height, false);
    }

    /// Updates the tracked size, posting `Size` iff the dimensions differ
    /// from the last observed ones or the update is forced (startup).
    pub(crate) fn set_size(&mut self, width: u32, height: u32, force: bool) {
        if width == self.width && height == self.height && !force {
            return;
        }
        self.width = width;
        self.height = height;
        self.queue.post_size(WindowHandle::DEFAULT, width, height);
    }

    //--- Gamepad Events ---------------------------------------------------

    /// Device connect: allocates a handle slot with axis state at rest.
    /// A full arena logs and ignores the device.
    pub(crate) fn pad_connected(&mut self, native: usize) {
        if self.slot_of(native).is_some() {
            return; // reconnect of a tracked device
        }
        match self.pad_arena.alloc() {
            Some(idx) => {
                trace!(target: "platform::pad", "Gamepad {} connected as slot {}", native, idx);
                self.pads[idx as usize] = Some(PadSlot {
                    native,
                    filter: PadFilter::new(),
                });
            }
            None => {
                warn!(target: "platform::pad", "Gamepad arena full, ignoring device {}", native);
            }
        }
    }

    /// Device disconnect: frees the slot; events from the id are ignored
    /// from here on.
    pub(crate) fn pad_disconnected(&mut self, native: usize) {
        if let Some(idx) = self.slot_of(native) {
            trace!(target: "platform::pad", "Gamepad {} disconnected from slot {}", native, idx);
            self.pads[idx] = None;
            self.pad_arena.free(idx as u16);
        }
    }

    pub(crate) fn pad_button(&mut self, native: usize, button: GilrsButton, down: bool) {
        let Some(_idx) = self.slot_of(native) else { return };

        let key = padmap::translate_button(button);
        if key == Key::None {
            trace!(target: "platform::pad", "Unmapped gamepad button {:?} ignored", button);
            return;
        }
        self.queue
            .post_key(WindowHandle::DEFAULT, key, Modifiers::NONE, down);
    }

    pub(crate) fn pad_axis(&mut self, native: usize, axis: GilrsAxis, value: f32) {
        let Some(idx) = self.slot_of(native) else { return };
        let Some(axis) = padmap::translate_axis(axis) else { return };

        let value = padmap::scale_axis(value);
        let gamepad = GamepadHandle(idx as u16);
        if let Some(slot) = self.pads[idx].as_mut() {
            slot.filter
                .update(&self.queue, WindowHandle::DEFAULT, gamepad, axis, value);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn z(&self) -> i32 {
        self.wheel as i32
    }

    fn slot_of(&self, native: usize) -> Option<usize> {
        self.pads
            .iter()
            .position(|slot| matches!(slot, Some(s) if s.native == native))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
