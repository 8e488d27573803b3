//=========================================================================
// Event Queue
//
// Bounded cross-thread event channel between the controller thread
// (producer) and the application thread (consumer).
//
// Architecture:
// ```text
//  Controller Thread:                Application Thread:
//  ┌─────────────────────┐          ┌─────────────────────┐
//  │  EventPump          │          │  app entry fn       │
//  │   ↓ post_*()        │          │   ↑ poll()          │
//  │  EventQueue ────────┼──────────┼─► EventReader       │
//  └─────────────────────┘  bounded └─────────────────────┘
//                           channel
// ```
//
// Key Design Decisions:
// - **Never block**: posts use `try_send` and drop on a full queue with a
//   warning; polls use `try_recv`. The run loop and the application loop
//   both stay live regardless of the other side's pace.
// - **Ownership transfer**: `poll` moves the event out; dropping it is
//   the release. There is no reclamation call.
// - **Disconnect tolerance**: a gone consumer downgrades posts to logged
//   drops so the window can still close normally.
//
//=========================================================================

//=== External Crates =====================================================

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use log::{trace, warn};

//=== Internal Imports ====================================================

use crate::core::events::{Event, GamepadAxis, Key, Modifiers, MouseButton};
use crate::core::handle::{GamepadHandle, WindowHandle};

//=== Construction ========================================================

/// Creates a connected producer/consumer pair with the given capacity.
///
/// # Panics
///
/// Panics if `capacity == 0`.
pub fn channel(capacity: usize) -> (EventQueue, EventReader) {
    assert!(capacity > 0, "Event queue capacity must be positive");
    let (tx, rx) = bounded(capacity);
    (EventQueue { tx }, EventReader { rx })
}

//=== EventQueue ==========================================================

/// Producer half of the event channel; lives on the controller thread.
///
/// All `post_*` methods are non-blocking. When the queue is full the
/// event is dropped for this iteration and a warning is logged; when the
/// reader is gone the drop is silent apart from the log.
pub struct EventQueue {
    tx: Sender<Event>,
}

impl EventQueue {
    pub fn post_mouse_move(&self, window: WindowHandle, x: i32, y: i32, z: i32) {
        self.post(Event::MouseMove { window, x, y, z });
    }

    pub fn post_mouse_button(
        &self,
        window: WindowHandle,
        x: i32,
        y: i32,
        z: i32,
        button: MouseButton,
        down: bool,
    ) {
        self.post(Event::MouseButton { window, x, y, z, button, down });
    }

    pub fn post_axis(
        &self,
        window: WindowHandle,
        gamepad: GamepadHandle,
        axis: GamepadAxis,
        value: i32,
    ) {
        self.post(Event::GamepadAxis { window, gamepad, axis, value });
    }

    pub fn post_char(&self, window: WindowHandle, ch: char) {
        self.post(Event::char(window, ch));
    }

    pub fn post_key(&self, window: WindowHandle, key: Key, modifiers: Modifiers, down: bool) {
        self.post(Event::Key { window, key, modifiers, down });
    }

    pub fn post_size(&self, window: WindowHandle, width: u32, height: u32) {
        self.post(Event::Size { window, width, height });
    }

    pub fn post_exit(&self) {
        self.post(Event::Exit);
    }

    //--- Internal Helpers -------------------------------------------------

    fn post(&self, event: Event) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(target: "queue", "Event queue full, dropping {:?}", event);
            }
            Err(TrySendError::Disconnected(event)) => {
                warn!(target: "queue", "Reader disconnected, dropping {:?}", event);
            }
        }
    }
}

//=== EventReader =========================================================

/// Consumer half of the event channel; handed to the application thread
/// inside `AppEnv`.
pub struct EventReader {
    rx: Receiver<Event>,
}

impl EventReader {
    /// Non-blocking retrieval of the next event, any window.
    ///
    /// Returns `None` when the queue is momentarily empty and also after
    /// the producer has gone away; the application distinguishes the two
    /// by having seen [`Event::Exit`].
    pub fn poll(&mut self) -> Option<Event> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Non-blocking retrieval filtered to one window.
    ///
    /// Events bound to other windows are discarded with a trace log;
    /// window-less events (`Exit`) always pass the filter.
    pub fn poll_window(&mut self, window: WindowHandle) -> Option<Event> {
        loop {
            let event = self.poll()?;
            match event.window() {
                None => return Some(event),
                Some(owner) if owner == window => return Some(event),
                Some(owner) => {
                    trace!(target: "queue", "Dropping event for window {:?} while polling {:?}", owner, window);
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_empty_returns_none() {
        let (_queue, mut reader) = channel(8);
        assert_eq!(reader.poll(), None);
    }

    #[test]
    fn events_arrive_in_post_order() {
        let (queue, mut reader) = channel(8);

        queue.post_mouse_move(WindowHandle::DEFAULT, 1, 2, 0);
        queue.post_key(WindowHandle::DEFAULT, Key::Space, Modifiers::NONE, true);
        queue.post_exit();

        assert!(matches!(reader.poll(), Some(Event::MouseMove { x: 1, y: 2, .. })));
        assert!(matches!(reader.poll(), Some(Event::Key { key: Key::Space, down: true, .. })));
        assert_eq!(reader.poll(), Some(Event::Exit));
        assert_eq!(reader.poll(), None);
    }

    #[test]
    fn full_queue_drops_instead_of_blocking() {
        let (queue, mut reader) = channel(2);

        queue.post_exit();
        queue.post_exit();
        queue.post_exit(); // dropped

        assert_eq!(reader.poll(), Some(Event::Exit));
        assert_eq!(reader.poll(), Some(Event::Exit));
        assert_eq!(reader.poll(), None);
    }

    #[test]
    fn post_survives_dropped_reader() {
        let (queue, reader) = channel(2);
        drop(reader);

        // Must not panic.
        queue.post_exit();
    }

    #[test]
    fn poll_window_filters_other_windows() {
        let (queue, mut reader) = channel(8);
        let mine = WindowHandle(1);
        let other = WindowHandle(2);

        queue.post_size(other, 100, 100);
        queue.post_size(mine, 640, 480);

        match reader.poll_window(mine) {
            Some(Event::Size { window, width, height }) => {
                assert_eq!(window, mine);
                assert_eq!((width, height), (640, 480));
            }
            other => panic!("expected Size for the filtered window, got {:?}", other),
        }
        assert_eq!(reader.poll_window(mine), None);
    }

    #[test]
    fn poll_window_passes_exit_through() {
        let (queue, mut reader) = channel(8);
        queue.post_exit();

        assert_eq!(reader.poll_window(WindowHandle(3)), Some(Event::Exit));
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn zero_capacity_panics() {
        let _ = channel(0);
    }
}
